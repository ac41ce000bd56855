//! Character strings.
//!
//! The somewhat ill-named `<character-string>` is defined in [RFC 1035] as
//! binary information of up to 255 octets. As such, it doesn’t necessarily
//! contain (ASCII-) characters nor is it a string in a Rust-sense.
//!
//! In wire format, a character string is preceded by a single octet giving
//! its length. This module provides the [`CharStr`] type for such values.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::wire::{
    compose_u8_prefixed, parse_u8_prefixed, ComposeError, WireParser,
};
use super::wire::ParseError;
use bytes::Bytes;
use core::fmt;
use octseq::builder::OctetsBuilder;

//------------ CharStr -------------------------------------------------------

/// The content of a DNS character string.
///
/// A character string consists of up to 255 octets of binary data. This
/// type wraps a bytes value and guarantees that it is never longer than 255
/// octets.
#[derive(Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CharStr(Bytes);

impl CharStr {
    /// The maximum length of a character string.
    pub const MAX_LEN: usize = 255;

    /// Creates a new empty character string.
    #[must_use]
    pub fn empty() -> Self {
        CharStr(Bytes::new())
    }

    /// Creates a new character string from an octets value.
    ///
    /// Returns successfully if `octets` can indeed be used as a
    /// character string, i.e., it is not longer than 255 octets.
    pub fn from_octets(octets: impl Into<Bytes>) -> Result<Self, LongCharStr> {
        let octets = octets.into();
        if octets.len() > Self::MAX_LEN {
            Err(LongCharStr(()))
        } else {
            Ok(CharStr(octets))
        }
    }

    /// Creates a character string from a slice, copying the data.
    pub fn from_slice(slice: &[u8]) -> Result<Self, LongCharStr> {
        Self::from_octets(Bytes::copy_from_slice(slice))
    }

    /// Returns a reference to the content.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns the length of the content.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the character string is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the length of the wire format including the length octet.
    #[must_use]
    pub fn compose_len(&self) -> u16 {
        self.0.len() as u16 + 1
    }

    /// Takes a character string from the parser.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        parse_u8_prefixed(parser).map(|data| CharStr(data.into()))
    }

    /// Appends the wire format including the length octet.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        compose_u8_prefixed(target, self.as_slice())
    }

    /// Returns an object that displays the string as a quoted string.
    #[must_use]
    pub fn display_quoted(&self) -> DisplayQuoted {
        DisplayQuoted(self)
    }
}

//--- AsRef

impl AsRef<[u8]> for CharStr {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//--- Display and Debug

impl fmt::Display for CharStr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &ch in self.0.as_ref() {
            if ch == b'"' || ch == b'\\' {
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

impl fmt::Debug for CharStr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("CharStr")
            .field(&format_args!("{}", self))
            .finish()
    }
}

//------------ DisplayQuoted -------------------------------------------------

/// Helper struct for displaying a character string surrounded by quotes.
#[derive(Clone, Copy, Debug)]
pub struct DisplayQuoted<'a>(&'a CharStr);

impl<'a> fmt::Display for DisplayQuoted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self.0)
    }
}

//============ Error Types ===================================================

//------------ LongCharStr ---------------------------------------------------

/// An attempt was made to create a character string longer than 255 octets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongCharStr(());

impl fmt::Display for LongCharStr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("long character string")
    }
}

impl std::error::Error for LongCharStr {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn length_limit() {
        assert!(CharStr::from_slice(&[b'x'; 255]).is_ok());
        assert_eq!(
            CharStr::from_slice(&[b'x'; 256]),
            Err(LongCharStr(()))
        );
    }

    #[test]
    fn compose_parse() {
        let s = CharStr::from_slice(b"foo").unwrap();
        let mut buf = Vec::new();
        s.compose(&mut buf).unwrap();
        assert_eq!(buf, b"\x03foo");
        assert_eq!(s.compose_len(), 4);
        let mut parser = WireParser::from_ref(buf.as_slice());
        assert_eq!(CharStr::parse(&mut parser).unwrap(), s);
    }

    #[test]
    fn display() {
        let s = CharStr::from_slice(b"a \"b\"\\\x01").unwrap();
        assert_eq!(s.to_string(), "a \\\"b\\\"\\\\\\001");
        assert_eq!(
            CharStr::from_slice(b"hi").unwrap().display_quoted().to_string(),
            "\"hi\""
        );
    }
}
