//! EDNS option for extended DNS errors.
//!
//! The option in this module – [`ExtendedError`] – carries an info code and
//! an optional human-readable text that give additional context for the
//! response code of a message. It is defined in [RFC 8914].
//!
//! [RFC 8914]: https://tools.ietf.org/html/rfc8914

use super::super::iana::{ExtendedErrorCode, OptionCode};
use super::super::wire::{parse_remaining, Compose, ParseError, WireParser};
use super::{
    AllOptData, ComposeOptData, LongOptData, Opt, OptData, ParseOptData,
};
use bytes::Bytes;
use core::{fmt, str};
use octseq::builder::OctetsBuilder;

//------------ ExtendedError -------------------------------------------------

/// Option data for an extended DNS error.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ExtendedError {
    /// The info code of the error.
    code: ExtendedErrorCode,

    /// The extra text, possibly empty.
    text: Bytes,
}

impl ExtendedError {
    /// Creates a new value from the info code and optional text.
    ///
    /// Fails if the text doesn’t fit into the option.
    pub fn new(
        code: ExtendedErrorCode,
        text: Option<&str>,
    ) -> Result<Self, LongOptData> {
        let text = text.unwrap_or_default();
        LongOptData::check_len(text.len() + 2)?;
        Ok(ExtendedError {
            code,
            text: Bytes::copy_from_slice(text.as_bytes()),
        })
    }

    /// Returns the info code.
    #[must_use]
    pub fn code(&self) -> ExtendedErrorCode {
        self.code
    }

    /// Returns the extra text if present and valid UTF-8.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            str::from_utf8(self.text.as_ref()).ok()
        }
    }

    /// Returns the raw octets of the extra text.
    #[must_use]
    pub fn text_octets(&self) -> &[u8] {
        self.text.as_ref()
    }

    /// Returns whether the info code is in the private use range.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.code.is_private()
    }

    /// Parses a value from its wire format.
    ///
    /// The extra text is kept as is even if it isn’t valid UTF-8.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        let code = ExtendedErrorCode::parse(parser)?;
        let text = parse_remaining(parser).into();
        Ok(ExtendedError { code, text })
    }
}

//--- From

impl From<ExtendedErrorCode> for ExtendedError {
    fn from(code: ExtendedErrorCode) -> Self {
        ExtendedError {
            code,
            text: Bytes::new(),
        }
    }
}

//--- OptData etc.

impl OptData for ExtendedError {
    fn code(&self) -> OptionCode {
        OptionCode::EXTENDED_ERROR
    }
}

impl ParseOptData for ExtendedError {
    fn parse_option(
        code: OptionCode,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if code == OptionCode::EXTENDED_ERROR {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeOptData for ExtendedError {
    fn compose_len(&self) -> u16 {
        ExtendedErrorCode::COMPOSE_LEN + self.text.len() as u16
    }

    fn compose_option<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.code.to_int().compose(target)?;
        target.append_slice(self.text.as_ref())
    }
}

//--- Display

impl fmt::Display for ExtendedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code)?;
        if !self.text.is_empty() {
            write!(f, " ({})", String::from_utf8_lossy(self.text.as_ref()))?;
        }
        Ok(())
    }
}

//--- Extended Opt

impl Opt {
    /// Returns the first extended DNS error option if present.
    #[must_use]
    pub fn extended_error(&self) -> Option<&ExtendedError> {
        self.iter().find_map(|opt| match opt {
            AllOptData::ExtendedError(value) => Some(value),
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
    fn extended_error_compose_parse() {
        let ede = ExtendedError::new(
            ExtendedErrorCode::STALE_ANSWER,
            Some("served from cache"),
        )
        .unwrap();
        test_option_compose_parse(&ede, ExtendedError::parse);

        let mut buf = Vec::new();
        ede.compose_option(&mut buf).unwrap();
        assert_eq!(&buf[..2], b"\x00\x03");
        assert_eq!(&buf[2..], b"served from cache");
    }

    #[test]
    fn extended_error_text() {
        let ede = ExtendedError::from(ExtendedErrorCode::OTHER);
        assert_eq!(ede.text(), None);
        assert_eq!(ede.compose_len(), 2);

        let mut parser = WireParser::from_ref(b"\x00\x00\xff".as_ref());
        let ede = ExtendedError::parse(&mut parser).unwrap();
        assert_eq!(ede.text(), None);
        assert_eq!(ede.text_octets(), b"\xff");

        assert!(ExtendedError::from(ExtendedErrorCode::from_int(49152))
            .is_private());
    }
}
