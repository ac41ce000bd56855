//! Domain names.
//!
//! A domain name is a sequence of labels, each of up to 63 octets, ending in
//! the empty root label. In wire format, each label is preceded by its
//! length and the whole name must not be longer than 255 octets.
//!
//! [`Name`] keeps the uncompressed wire format of an absolute name. When
//! parsing, compression pointers are resolved so the value never refers
//! back into the message it came from. When composing, names are written
//! either uncompressed, compressed via a [`NameCompressor`], or in the
//! canonical form used for DNSSEC with all ASCII letters lowercased.
//!
//! Names compare and hash ignoring ASCII case. `Ord` implements the
//! canonical ordering of [RFC 4034, section 6.1].
//!
//! [RFC 4034, section 6.1]: https://tools.ietf.org/html/rfc4034#section-6.1

pub use self::compressor::NameCompressor;
pub use self::label::Label;

use super::wire::{ParseError, WireParser};
use bytes::Bytes;
use core::str::FromStr;
use core::{cmp, fmt, hash};
use octseq::builder::OctetsBuilder;

mod compressor;
mod label;

//------------ Name ----------------------------------------------------------

/// An uncompressed, absolute domain name.
#[derive(Clone)]
pub struct Name(Bytes);

impl Name {
    /// The maximum length of a name in wire format.
    pub const MAX_LEN: usize = 255;

    /// The maximum number of compression pointers followed while parsing.
    pub const MAX_POINTERS: usize = 64;

    /// Returns the root name.
    #[must_use]
    pub fn root() -> Self {
        Name(Bytes::from_static(b"\0"))
    }

    /// Creates a name from its uncompressed wire format.
    ///
    /// The octets must contain exactly one name terminated by the root
    /// label.
    pub fn from_slice(slice: &[u8]) -> Result<Self, NameError> {
        Self::check_slice(slice)?;
        Ok(Name(Bytes::copy_from_slice(slice)))
    }

    /// Creates a name from a vec with its uncompressed wire format.
    pub fn from_vec(vec: Vec<u8>) -> Result<Self, NameError> {
        Self::check_slice(&vec)?;
        Ok(Name(vec.into()))
    }

    /// Creates a name from a sequence of label contents.
    ///
    /// The root label is added at the end and must not be part of the
    /// sequence.
    pub fn from_labels<'a>(
        labels: impl IntoIterator<Item = &'a [u8]>,
    ) -> Result<Self, NameError> {
        let mut res = Vec::new();
        for label in labels {
            if label.is_empty() {
                return Err(NameError::EmptyLabel);
            }
            if label.len() > Label::MAX_LEN {
                return Err(NameError::LongLabel);
            }
            res.push(label.len() as u8);
            res.extend_from_slice(label);
            if res.len() >= Self::MAX_LEN {
                return Err(NameError::LongName);
            }
        }
        res.push(0);
        Ok(Name(res.into()))
    }

    fn check_slice(mut slice: &[u8]) -> Result<(), NameError> {
        if slice.len() > Self::MAX_LEN {
            return Err(NameError::LongName);
        }
        loop {
            let (&len, tail) =
                slice.split_first().ok_or(NameError::MissingRoot)?;
            if len == 0 {
                if tail.is_empty() {
                    return Ok(());
                }
                return Err(NameError::TrailingData);
            }
            if len > Label::MAX_LEN as u8 {
                return Err(NameError::BadLabelType);
            }
            let len = usize::from(len);
            if tail.len() < len {
                return Err(NameError::MissingRoot);
            }
            slice = &tail[len..];
        }
    }

    /// Returns the wire format of the name.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns the length of the uncompressed wire format.
    #[must_use]
    pub fn compose_len(&self) -> u16 {
        self.0.len() as u16
    }

    /// Returns whether this is the root name.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Returns whether the first label is the wildcard label.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.first().map(Label::is_wildcard).unwrap_or(false)
    }

    /// Returns an iterator over the non-root labels of the name.
    #[must_use]
    pub fn iter_labels(&self) -> LabelIter {
        LabelIter { slice: self.as_slice() }
    }

    /// Returns the first label or `None` for the root name.
    #[must_use]
    pub fn first(&self) -> Option<&Label> {
        self.iter_labels().next()
    }

    /// Returns the number of labels not counting the root label.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.iter_labels().count()
    }

    /// Returns the label count as used in the RRSIG labels field.
    ///
    /// This is the number of labels without the root label and without a
    /// leading wildcard label.
    #[must_use]
    pub fn rrsig_label_count(&self) -> u8 {
        let count = self.label_count();
        if self.is_wildcard() {
            (count - 1) as u8
        } else {
            count as u8
        }
    }

    /// Returns the parent name or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Name> {
        let first = self.first()?;
        Some(Name(self.0.slice(first.compose_len()..)))
    }

    /// Returns whether `self` is `base` or a subdomain of it.
    #[must_use]
    pub fn ends_with(&self, base: &Name) -> bool {
        let mut name = self.clone();
        loop {
            if name.0.len() < base.0.len() {
                return false;
            }
            if name == *base {
                return true;
            }
            match name.parent() {
                Some(parent) => name = parent,
                None => return false,
            }
        }
    }

    /// Returns the canonical form of the name with all letters lowercased.
    #[must_use]
    pub fn to_canonical(&self) -> Name {
        Name(self.0.to_ascii_lowercase().into())
    }

    /// Appends the uncompressed wire format to the target.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(self.as_slice())
    }

    /// Appends the canonical wire format to the target.
    pub fn compose_canonical<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.0.to_ascii_lowercase())
    }

    /// Takes a possibly compressed name from the parser.
    ///
    /// Compression pointers must point strictly backwards of the pointer
    /// itself and of every earlier pointer target for this name. The
    /// parser is left right after the first pointer or the root label.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        let mut res = Vec::new();
        let mut cur = *parser;
        let mut limit = cur.pos();
        let mut end = None;
        let mut hops = 0;
        loop {
            let pos = cur.pos();
            let ltype = cur.parse_u8()?;
            match ltype {
                0 => {
                    res.push(0);
                    break;
                }
                1..=0x3F => {
                    let len = usize::from(ltype);
                    if res.len() + len + 2 > Self::MAX_LEN {
                        return Err(NameError::LongName.into());
                    }
                    res.push(ltype);
                    res.extend_from_slice(cur.peek(len)?);
                    cur.advance(len)?;
                }
                0xC0..=0xFF => {
                    let low = cur.parse_u8()?;
                    let target =
                        (usize::from(ltype & 0x3F) << 8) | usize::from(low);
                    if target >= pos || target >= limit {
                        return Err(NameError::BadPointer.into());
                    }
                    hops += 1;
                    if hops > Self::MAX_POINTERS {
                        return Err(NameError::TooManyPointers.into());
                    }
                    if end.is_none() {
                        end = Some(cur.pos());
                    }
                    limit = target;
                    cur.seek(target)?;
                }
                _ => return Err(NameError::BadLabelType.into()),
            }
        }
        parser.seek(end.unwrap_or_else(|| cur.pos()))?;
        Ok(Name(res.into()))
    }

    /// Skips over a possibly compressed name.
    pub fn skip(parser: &mut WireParser) -> Result<(), ParseError> {
        loop {
            match parser.parse_u8()? {
                0 => return Ok(()),
                len @ 1..=0x3F => parser.advance(usize::from(len))?,
                0xC0..=0xFF => {
                    parser.advance(1)?;
                    return Ok(());
                }
                _ => return Err(NameError::BadLabelType.into()),
            }
        }
    }
}

//--- FromStr

impl FromStr for Name {
    type Err = NameError;

    /// Parses a name from its presentation format.
    ///
    /// The trailing dot is optional, all names are considered absolute.
    /// Escape sequences `\c` and `\DDD` are supported.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "." {
            return Ok(Name::root());
        }
        let mut res = Vec::new();
        let mut label = Vec::new();
        let mut chars = s.bytes();
        let mut pending = false;
        while let Some(ch) = chars.next() {
            match ch {
                b'.' => {
                    push_label(&mut res, &label)?;
                    label.clear();
                    pending = false;
                    continue;
                }
                b'\\' => {
                    let first = chars.next().ok_or(NameError::BadEscape)?;
                    if first.is_ascii_digit() {
                        let second =
                            chars.next().ok_or(NameError::BadEscape)?;
                        let third = chars.next().ok_or(NameError::BadEscape)?;
                        if !second.is_ascii_digit() || !third.is_ascii_digit()
                        {
                            return Err(NameError::BadEscape);
                        }
                        let value = u32::from(first - b'0') * 100
                            + u32::from(second - b'0') * 10
                            + u32::from(third - b'0');
                        let value = u8::try_from(value)
                            .map_err(|_| NameError::BadEscape)?;
                        label.push(value);
                    } else {
                        label.push(first);
                    }
                }
                ch => label.push(ch),
            }
            pending = true;
        }
        if pending {
            push_label(&mut res, &label)?;
        }
        res.push(0);
        if res.len() > Self::MAX_LEN {
            return Err(NameError::LongName);
        }
        Ok(Name(res.into()))
    }
}

fn push_label(res: &mut Vec<u8>, label: &[u8]) -> Result<(), NameError> {
    if label.is_empty() {
        return Err(NameError::EmptyLabel);
    }
    if label.len() > Label::MAX_LEN {
        return Err(NameError::LongLabel);
    }
    res.push(label.len() as u8);
    res.extend_from_slice(label);
    Ok(())
}

//--- PartialEq, Eq, and Hash

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Name {}

impl hash::Hash for Name {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for label in self.iter_labels() {
            label.hash(state)
        }
    }
}

//--- PartialOrd and Ord

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        let left: Vec<_> = self.iter_labels().collect();
        let right: Vec<_> = other.iter_labels().collect();
        left.iter().rev().cmp(right.iter().rev())
    }
}

//--- Display and Debug

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut labels = self.iter_labels();
        match labels.next() {
            Some(label) => label.fmt(f)?,
            None => return f.write_str("."),
        }
        for label in labels {
            write!(f, ".{}", label)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Name({}.)", self)
    }
}

//------------ LabelIter -----------------------------------------------------

/// An iterator over the non-root labels of a name.
#[derive(Clone, Debug)]
pub struct LabelIter<'a> {
    slice: &'a [u8],
}

impl<'a> Iterator for LabelIter<'a> {
    type Item = &'a Label;

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, tail) = self.slice.split_first()?;
        let len = usize::from(len);
        if len == 0 || tail.len() < len {
            self.slice = &[];
            return None;
        }
        let (label, tail) = tail.split_at(len);
        self.slice = tail;
        Some(unsafe { Label::from_slice_unchecked(label) })
    }
}

//============ Error Types ===================================================

//------------ NameError -----------------------------------------------------

/// A domain name was invalid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// The name was longer than 255 octets.
    LongName,

    /// A label was longer than 63 octets.
    LongLabel,

    /// An empty label appeared in the presentation format.
    EmptyLabel,

    /// An invalid escape sequence appeared in the presentation format.
    BadEscape,

    /// A label of an unknown or obsolete type was encountered.
    BadLabelType,

    /// A compression pointer did not point strictly backwards.
    BadPointer,

    /// Too many compression pointers had to be followed.
    TooManyPointers,

    /// The name was not terminated by the root label.
    MissingRoot,

    /// There was data after the root label.
    TrailingData,
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            NameError::LongName => "long domain name",
            NameError::LongLabel => "long label",
            NameError::EmptyLabel => "empty label",
            NameError::BadEscape => "invalid escape sequence",
            NameError::BadLabelType => "unknown label type",
            NameError::BadPointer => "invalid compression pointer",
            NameError::TooManyPointers => "too many compression pointers",
            NameError::MissingRoot => "missing root label",
            NameError::TrailingData => "trailing data after root label",
        })
    }
}

impl std::error::Error for NameError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(name("www.example.com").as_slice(), b"\x03www\x07example\x03com\0");
        assert_eq!(name("www.example.com."), name("www.example.com"));
        assert_eq!(name(".").as_slice(), b"\0");
        assert_eq!(name("a\\.b.c").as_slice(), b"\x03a.b\x01c\0");
        assert_eq!(name("\\065.b").as_slice(), b"\x01A\x01b\0");
        assert_eq!(Name::from_str("a..b"), Err(NameError::EmptyLabel));
        assert_eq!(Name::from_str("a\\25"), Err(NameError::BadEscape));
        assert_eq!(
            Name::from_str(&"a".repeat(64)),
            Err(NameError::LongLabel)
        );
    }

    #[test]
    fn name_too_long() {
        // 127 labels of one octet make 254 octets plus the root.
        let ok = vec!["a"; 127].join(".");
        assert_eq!(name(&ok).as_slice().len(), 255);
        let long = vec!["a"; 128].join(".");
        assert_eq!(Name::from_str(&long), Err(NameError::LongName));
    }

    #[test]
    fn display() {
        assert_eq!(name("www.Example.com").to_string(), "www.Example.com");
        assert_eq!(Name::root().to_string(), ".");
        assert_eq!(format!("{:?}", name("a.b")), "Name(a.b.)");
    }

    #[test]
    fn case_insensitive_eq() {
        use std::collections::HashSet;

        assert_eq!(name("WWW.example.COM"), name("www.EXAMPLE.com"));
        let mut set = HashSet::new();
        set.insert(name("Example.com"));
        assert!(set.contains(&name("example.COM")));
    }

    #[test]
    fn canonical() {
        assert_eq!(
            name("WWW.Example.COM").to_canonical().as_slice(),
            b"\x03www\x07example\x03com\0"
        );
        let mut buf = Vec::new();
        name("A.B").compose_canonical(&mut buf).unwrap();
        assert_eq!(buf, b"\x01a\x01b\0");
    }

    #[test]
    fn canonical_order() {
        // The example from RFC 4034, section 6.1.
        let ordered = [
            "example",
            "a.example",
            "yljkjljk.a.example",
            "Z.a.example",
            "zABC.a.EXAMPLE",
            "z.example",
            "\\001.z.example",
            "*.z.example",
            "\\200.z.example",
        ];
        for pair in ordered.windows(2) {
            assert!(name(pair[0]) < name(pair[1]), "{:?}", pair);
        }
    }

    #[test]
    fn labels() {
        let n = name("*.a.example");
        assert_eq!(n.label_count(), 3);
        assert_eq!(n.rrsig_label_count(), 2);
        assert!(n.is_wildcard());
        assert_eq!(Name::root().label_count(), 0);
        assert_eq!(n.parent().unwrap(), name("a.example"));
        assert!(n.ends_with(&name("EXAMPLE")));
        assert!(n.ends_with(&Name::root()));
        assert!(!name("example").ends_with(&name("a.example")));
        assert!(!name("xample").ends_with(&name("example")));
    }

    #[test]
    fn from_slice() {
        assert!(Name::from_slice(b"\x03www\0").is_ok());
        assert_eq!(Name::from_slice(b"\x03www"), Err(NameError::MissingRoot));
        assert_eq!(Name::from_slice(b"\0\0"), Err(NameError::TrailingData));
        assert_eq!(Name::from_slice(b"\xC0\x00"), Err(NameError::BadLabelType));
        assert_eq!(
            Name::from_labels([b"a".as_ref(), b"b".as_ref()]).unwrap(),
            name("a.b")
        );
    }

    #[test]
    fn parse_uncompressed() {
        let data = b"\x03www\x07example\x03com\0\xFF";
        let mut parser = WireParser::from_ref(data.as_ref());
        assert_eq!(Name::parse(&mut parser).unwrap(), name("www.example.com"));
        assert_eq!(parser.remaining(), 1);
    }

    #[test]
    fn parse_compressed() {
        // example.com at 0, www + pointer to 0 at 13.
        let data = b"\x07example\x03com\0\x03www\xC0\x00\xFF";
        let mut parser = WireParser::from_ref(data.as_ref());
        parser.advance(13).unwrap();
        assert_eq!(Name::parse(&mut parser).unwrap(), name("www.example.com"));
        assert_eq!(parser.remaining(), 1);
    }

    #[test]
    fn parse_pointer_loops() {
        // Pointer to itself.
        let data = b"\xC0\x00";
        let mut parser = WireParser::from_ref(data.as_ref());
        assert_eq!(
            Name::parse(&mut parser),
            Err(ParseError::MalformedName(NameError::BadPointer))
        );

        // Forward pointer.
        let data = b"\xC0\x02\x00";
        let mut parser = WireParser::from_ref(data.as_ref());
        assert_eq!(
            Name::parse(&mut parser),
            Err(ParseError::MalformedName(NameError::BadPointer))
        );

        // A label followed by a pointer back to the label.
        let data = b"\x01a\xC0\x00";
        let mut parser = WireParser::from_ref(data.as_ref());
        assert_eq!(
            Name::parse(&mut parser),
            Err(ParseError::MalformedName(NameError::BadPointer))
        );

        // Entering at 2, which points to 0, which points forward to 2.
        let data = b"\xC0\x02\xC0\x00";
        let mut parser = WireParser::from_ref(data.as_ref());
        parser.advance(2).unwrap();
        assert_eq!(
            Name::parse(&mut parser),
            Err(ParseError::MalformedName(NameError::BadPointer))
        );
    }

    #[test]
    fn parse_long_name() {
        // 128 one-octet labels exceed the limit.
        let mut data = Vec::new();
        for _ in 0..128 {
            data.extend_from_slice(b"\x01a");
        }
        data.push(0);
        let mut parser = WireParser::from_ref(data.as_slice());
        assert_eq!(
            Name::parse(&mut parser),
            Err(ParseError::MalformedName(NameError::LongName))
        );
    }

    #[test]
    fn parse_short() {
        let data = b"\x03ww";
        let mut parser = WireParser::from_ref(data.as_ref());
        assert_eq!(Name::parse(&mut parser), Err(ParseError::ShortInput));
    }

    #[test]
    fn skip() {
        let data = b"\x03www\xC0\x00\x01";
        let mut parser = WireParser::from_ref(data.as_ref());
        Name::skip(&mut parser).unwrap();
        assert_eq!(parser.remaining(), 1);
    }
}
