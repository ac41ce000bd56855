//! Domain name labels.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.

use core::{cmp, fmt, hash, mem};

//------------ Label ---------------------------------------------------------

/// An octets slice with the content of a domain name label.
///
/// This is an unsized type wrapping the content of a valid normal label of
/// up to 63 octets. It only contains the label’s content, not the length
/// octet it is preceded by in wire format.
///
/// [`Label`] differs from an octets slice in how it compares: as labels are
/// to be case-insensitive, all the comparison traits as well as `Hash` are
/// implemented ignoring ASCII-case. Ordering follows the canonical ordering
/// of RFC 4034, section 6.1.
#[repr(transparent)]
pub struct Label([u8]);

impl Label {
    /// Domain name labels have a maximum length of 63 octets.
    pub const MAX_LEN: usize = 63;

    /// Creates a label from the underlying slice without any checking.
    ///
    /// # Safety
    ///
    /// The `slice` must be at most 63 octets long.
    pub(super) unsafe fn from_slice_unchecked(slice: &[u8]) -> &Self {
        // SAFETY: Label has repr(transparent)
        mem::transmute(slice)
    }

    /// Creates a label from an octets slice.
    ///
    /// Returns `None` if the slice is longer than 63 octets.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<&Self> {
        if slice.len() > Self::MAX_LEN {
            None
        } else {
            Some(unsafe { Self::from_slice_unchecked(slice) })
        }
    }

    /// Returns a reference to the underlying octets slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the label's content.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether this is the root label.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether the label is the wildcard label `*`.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        &self.0 == b"*"
    }

    /// Returns the length of the label in wire format.
    #[must_use]
    pub fn compose_len(&self) -> usize {
        self.0.len() + 1
    }
}

//--- AsRef

impl AsRef<[u8]> for Label {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//--- PartialEq, Eq, PartialOrd, Ord, Hash

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Label {}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.0
            .iter()
            .map(u8::to_ascii_lowercase)
            .cmp(other.0.iter().map(u8::to_ascii_lowercase))
    }
}

impl hash::Hash for Label {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_u8(self.0.len() as u8);
        for ch in &self.0 {
            state.write_u8(ch.to_ascii_lowercase())
        }
    }
}

//--- Display and Debug

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &ch in &self.0 {
            if ch == b' ' || ch == b'.' || ch == b'\\' {
                write!(f, "\\{}", ch as char)?;
            } else if !(0x20..0x7F).contains(&ch) {
                write!(f, "\\{:03}", ch)?;
            } else {
                write!(f, "{}", ch as char)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Label(")?;
        fmt::Display::fmt(self, f)?;
        f.write_str(")")
    }
}

//============ Testing =======================================================
