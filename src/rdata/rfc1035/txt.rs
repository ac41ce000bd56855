//! Record data for the TXT record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::charstr::CharStr;
use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{ComposeError, Composer, ParseError, WireParser};
use core::fmt;

//------------ Txt ----------------------------------------------------------

/// TXT record data.
///
/// TXT records hold descriptive text. While it may appear as a single text,
/// it internally consists of a sequence of one or more character strings.
/// The type holds these strings, use [`text`][Self::text] to get them as a
/// single octets vector.
///
/// The same data is used by the SPF record type which is therefore not a
/// type of its own but a variant of
/// [`AllRecordData`][crate::rdata::AllRecordData].
///
/// The Txt record type is defined in RFC 1035, section 3.3.14.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Txt {
    strings: Vec<CharStr>,
}

impl Txt {
    /// Creates new TXT record data from a sequence of character strings.
    ///
    /// The sequence must not be empty and its wire format must not be
    /// longer than 65,535 octets.
    pub fn new(strings: Vec<CharStr>) -> Result<Self, TxtError> {
        if strings.is_empty() {
            return Err(TxtError::Empty);
        }
        let len: usize = strings
            .iter()
            .map(|s| usize::from(s.compose_len()))
            .sum();
        if len > usize::from(u16::MAX) {
            return Err(TxtError::Long);
        }
        Ok(Txt { strings })
    }

    /// Creates TXT record data from a single slice.
    ///
    /// If the slice is longer than 255 octets, it is broken up into
    /// multiple character strings. An empty slice results in a single
    /// empty character string.
    pub fn build_from_slice(text: &[u8]) -> Result<Self, TxtError> {
        if text.is_empty() {
            return Self::new(vec![CharStr::empty()]);
        }
        let strings = text
            .chunks(CharStr::MAX_LEN)
            .map(CharStr::from_slice)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| TxtError::Long)?;
        Self::new(strings)
    }

    /// Returns an iterator over the character strings.
    pub fn iter(&self) -> impl Iterator<Item = &CharStr> {
        self.strings.iter()
    }

    /// Returns the content of all character strings concatenated.
    #[must_use]
    pub fn text(&self) -> Vec<u8> {
        self.strings
            .iter()
            .flat_map(|s| s.as_slice().iter().copied())
            .collect()
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        let mut strings = Vec::new();
        while parser.remaining() > 0 {
            strings.push(CharStr::parse(parser)?);
        }
        if strings.is_empty() {
            return Err(ParseError::form_error("empty TXT record"));
        }
        Ok(Txt { strings })
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Txt {
    fn rtype(&self) -> Rtype {
        Rtype::TXT
    }
}

impl ParseRecordData for Txt {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::TXT || rtype == Rtype::SPF {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Txt {
    fn compose_len(&self) -> u16 {
        self.strings.iter().map(CharStr::compose_len).sum()
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.strings.iter().try_for_each(|s| s.compose(target))
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.compose_rdata(target)
    }
}

//--- Display

impl fmt::Display for Txt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for s in &self.strings {
            if first {
                first = false;
            } else {
                f.write_str(" ")?;
            }
            write!(f, "{}", s.display_quoted())?;
        }
        Ok(())
    }
}

//------------ TxtError ------------------------------------------------------

/// TXT record data could not be created.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TxtError {
    /// There were no character strings.
    Empty,

    /// The record data would be longer than 65,535 octets.
    Long,
}

impl fmt::Display for TxtError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TxtError::Empty => f.write_str("empty TXT record"),
            TxtError::Long => f.write_str("TXT record too long"),
        }
    }
}

impl std::error::Error for TxtError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_len, test_compose_parse};

    #[test]
    fn txt_compose_parse() {
        let rdata = Txt::new(vec![
            CharStr::from_slice(b"v=spf1").unwrap(),
            CharStr::from_slice(b"-all").unwrap(),
        ])
        .unwrap();
        test_compose_len(rdata.clone());
        test_compose_parse(&rdata, Txt::parse);
        assert_eq!(rdata.to_string(), "\"v=spf1\" \"-all\"");
        assert_eq!(rdata.text(), b"v=spf1-all");
    }

    #[test]
    fn txt_from_long_slice() {
        let rdata = Txt::build_from_slice(&[b'a'; 300]).unwrap();
        let lens: Vec<_> = rdata.iter().map(CharStr::len).collect();
        assert_eq!(lens, [255, 45]);
        assert_eq!(rdata.compose_len(), 302);
    }

    #[test]
    fn txt_rejects_empty() {
        assert_eq!(Txt::new(Vec::new()), Err(TxtError::Empty));
        let mut parser = WireParser::from_ref(b"".as_ref());
        assert!(Txt::parse(&mut parser).is_err());
    }

    #[test]
    fn txt_short_string() {
        let mut parser = WireParser::from_ref(b"\x05abc".as_ref());
        assert_eq!(Txt::parse(&mut parser), Err(ParseError::ShortInput));
    }
}
