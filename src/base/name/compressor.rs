//! Domain name compression.

use super::{Label, Name};
use crate::base::wire::{Compose, Composer};
use octseq::builder::{OctetsBuilder, Truncate};
use std::collections::HashMap;
use std::vec::Vec;

//------------ NameCompressor ------------------------------------------------

/// A composer that compresses domain names.
///
/// This type wraps around an octets builder and implements domain name
/// compression for it. It remembers the position of every name suffix it
/// has written and replaces a later occurrence of the same suffix with a
/// pointer to the earlier one.
///
/// Positions are relative to the beginning of the underlying builder, so
/// the builder must contain the message only. Since pointers have fourteen
/// bits, only suffixes starting at or before position 0x3FFF are
/// remembered. Suffixes are matched exactly, including the case of their
/// letters, so decoding a compressed name yields exactly what was written.
#[derive(Clone, Debug)]
pub struct NameCompressor<Target> {
    /// The underlying octets builder.
    target: Target,

    /// The node for the root name.
    start: Node,
}

/// A node in the suffix tree.
///
/// The tree follows the labels of the names from the root towards the left.
/// Each node maps the labels found to the immediate left of the name traced
/// by the path to it to the node for the resulting longer name.
#[derive(Clone, Debug, Default)]
struct Node {
    /// The labels immediately to the left of this name and their nodes.
    parents: HashMap<Vec<u8>, Self>,

    /// The position of this name in the message.
    value: Option<u16>,
}

impl Node {
    fn drop_above(&mut self, len: usize) {
        self.value = match self.value {
            Some(value) if usize::from(value) < len => Some(value),
            _ => None,
        };
        self.parents
            .values_mut()
            .for_each(|node| node.drop_above(len))
    }
}

impl<Target> NameCompressor<Target> {
    /// The largest position a pointer can refer to.
    pub const MAX_OFFSET: usize = 0x3FFF;

    /// Creates a new compressor from an underlying octets builder.
    pub fn new(target: Target) -> Self {
        NameCompressor {
            target,
            start: Default::default(),
        }
    }

    /// Returns a reference to the underlying octets builder.
    pub fn as_target(&self) -> &Target {
        &self.target
    }

    /// Converts the compressor into the underlying octets builder.
    pub fn into_target(self) -> Target {
        self.target
    }

    /// Returns the position of a previously written suffix.
    fn get(&self, suffix: &[&Label]) -> Option<u16> {
        let mut node = &self.start;
        for label in suffix.iter().rev() {
            node = node.parents.get(label.as_slice())?;
        }
        node.value
    }

    /// Remembers the position of a suffix.
    ///
    /// An earlier position for the same suffix is kept.
    fn insert(&mut self, suffix: &[&Label], pos: usize) {
        if pos > Self::MAX_OFFSET {
            return;
        }
        let mut node = &mut self.start;
        for label in suffix.iter().rev() {
            node = node.parents.entry(label.as_slice().into()).or_default();
        }
        if node.value.is_none() {
            node.value = Some(pos as u16)
        }
    }
}

//--- AsRef, AsMut, OctetsBuilder, and Truncate

impl<Target: AsRef<[u8]>> AsRef<[u8]> for NameCompressor<Target> {
    fn as_ref(&self) -> &[u8] {
        self.target.as_ref()
    }
}

impl<Target: AsMut<[u8]>> AsMut<[u8]> for NameCompressor<Target> {
    fn as_mut(&mut self) -> &mut [u8] {
        self.target.as_mut()
    }
}

impl<Target: OctetsBuilder> OctetsBuilder for NameCompressor<Target> {
    type AppendError = Target::AppendError;

    fn append_slice(
        &mut self,
        slice: &[u8],
    ) -> Result<(), Self::AppendError> {
        self.target.append_slice(slice)
    }
}

impl<Target: Truncate> Truncate for NameCompressor<Target> {
    fn truncate(&mut self, len: usize) {
        self.target.truncate(len);
        self.start.drop_above(len);
    }
}

//--- Composer

impl<Target: Composer> Composer for NameCompressor<Target> {
    fn append_compressed_name(
        &mut self,
        name: &Name,
    ) -> Result<(), Self::AppendError> {
        let labels: Vec<_> = name.iter_labels().collect();
        for idx in 0..labels.len() {
            let suffix = &labels[idx..];
            if let Some(pos) = self.get(suffix) {
                return (pos | 0xC000).compose(self);
            }
            let pos = self.target.as_ref().len();
            self.insert(suffix, pos);
            let label = labels[idx];
            self.append_slice(&[label.len() as u8])?;
            self.append_slice(label.as_slice())?;
        }
        self.append_slice(&[0])
    }

    fn can_compress(&self) -> bool {
        true
    }
}

//============ Testing =======================================================
