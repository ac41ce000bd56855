//! EDNS option for signaling trust anchor key tags.
//!
//! The option in this module – [`KeyTag`] – allows a validating resolver
//! to signal which DNSSEC trust anchors it has configured for the zone
//! being queried. The option is defined in [RFC 8145].
//!
//! [RFC 8145]: https://tools.ietf.org/html/rfc8145

use super::super::iana::OptionCode;
use super::super::wire::{ParseError, WireParser};
use super::{
    AllOptData, ComposeOptData, LongOptData, Opt, OptData, ParseOptData,
};
use core::fmt;
use octseq::builder::OctetsBuilder;

//------------ KeyTag -------------------------------------------------------

/// Option data for the edns-key-tag option.
///
/// The option consists of a list of 16 bit key tags.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct KeyTag {
    tags: Vec<u16>,
}

impl KeyTag {
    /// Creates a new value from a list of key tags.
    ///
    /// Fails if the list would result in option data longer than 65,535
    /// octets.
    pub fn new(tags: Vec<u16>) -> Result<Self, LongOptData> {
        LongOptData::check_len(tags.len() * 2)?;
        Ok(KeyTag { tags })
    }

    /// Returns the key tags.
    #[must_use]
    pub fn tags(&self) -> &[u16] {
        &self.tags
    }

    /// Parses the option data.
    ///
    /// The data must consist of an even number of octets.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        if parser.remaining() % 2 != 0 {
            return Err(ParseError::form_error("invalid key tag length"));
        }
        let mut tags = Vec::with_capacity(parser.remaining() / 2);
        while parser.remaining() > 0 {
            tags.push(parser.parse_u16_be()?);
        }
        Ok(KeyTag { tags })
    }
}

//--- OptData etc.

impl OptData for KeyTag {
    fn code(&self) -> OptionCode {
        OptionCode::KEY_TAG
    }
}

impl ParseOptData for KeyTag {
    fn parse_option(
        code: OptionCode,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if code == OptionCode::KEY_TAG {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeOptData for KeyTag {
    fn compose_len(&self) -> u16 {
        (self.tags.len() * 2) as u16
    }

    fn compose_option<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        for tag in &self.tags {
            target.append_slice(&tag.to_be_bytes())?;
        }
        Ok(())
    }
}

//--- Display

impl fmt::Display for KeyTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for tag in &self.tags {
            if first {
                first = false;
            } else {
                f.write_str(", ")?;
            }
            write!(f, "{}", tag)?;
        }
        Ok(())
    }
}

//--- Extended Opt

impl Opt {
    /// Returns the first edns-key-tag option if present.
    #[must_use]
    pub fn key_tag(&self) -> Option<&KeyTag> {
        self.iter().find_map(|opt| match opt {
            AllOptData::KeyTag(value) => Some(value),
            _ => None,
        })
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::super::test::test_option_compose_parse;
    use super::*;

    #[test]
    fn key_tag_compose_parse() {
        let tags = KeyTag::new(vec![20326, 38696]).unwrap();
        test_option_compose_parse(&tags, KeyTag::parse);
        assert_eq!(tags.to_string(), "20326, 38696");
    }

    #[test]
    fn odd_length() {
        let mut parser = WireParser::from_ref(b"\x4f\x66\x01".as_ref());
        assert!(matches!(KeyTag::parse(&mut parser), Err(ParseError::Form(_))));
    }
}
