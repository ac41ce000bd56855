//! Record data from [RFC 8659]: CAA records.
//!
//! This RFC defines the CAA record type.
//!
//! [RFC 8659]: https://www.rfc-editor.org/info/rfc8659

use crate::base::charstr::{CharStr, LongCharStr};
use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{
    parse_remaining, ComposeError, Composer, ParseError, WireParser,
};
use bytes::Bytes;
use core::fmt;

//------------ Caa ---------------------------------------------------------

/// Caa record data.
///
/// The Certification Authority Authorization (CAA) DNS Resource Record allows
/// a DNS domain name holder to specify one or more Certification Authorities
/// (CAs) authorized to issue certificates for that domain name.
///
/// The Caa record type is defined in [RFC 8659, section 4.1][1].
///
/// [1]: https://www.rfc-editor.org/rfc/rfc8659#section-4.1
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Caa {
    flags: u8,
    tag: CharStr,
    value: Bytes,
}

impl Caa {
    /// The flag marking a property as critical.
    pub const CRITICAL: u8 = 0x80;

    /// Creates a new CAA record data from the flags, tag, and value.
    pub fn new(
        flags: u8,
        tag: &[u8],
        value: impl Into<Bytes>,
    ) -> Result<Self, LongCharStr> {
        Ok(Caa {
            flags,
            tag: CharStr::from_slice(tag)?,
            value: value.into(),
        })
    }

    /// The flags of the property.
    ///
    /// A CA must not issue certificates if it doesn’t understand a
    /// property that has the critical flag set.
    #[must_use]
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Returns whether the critical flag is set.
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.flags & Self::CRITICAL != 0
    }

    /// The property identifier.
    #[must_use]
    pub fn tag(&self) -> &CharStr {
        &self.tag
    }

    /// The property value.
    #[must_use]
    pub fn value(&self) -> &[u8] {
        self.value.as_ref()
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        Ok(Caa {
            flags: parser.parse_u8()?,
            tag: CharStr::parse(parser)?,
            value: parse_remaining(parser).into(),
        })
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Caa {
    fn rtype(&self) -> Rtype {
        Rtype::CAA
    }
}

impl ParseRecordData for Caa {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::CAA {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Caa {
    fn compose_len(&self) -> u16 {
        1 + self.tag.compose_len() + self.value.len() as u16
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_slice(&[self.flags])?;
        self.tag.compose(target)?;
        target.append_slice(&self.value)?;
        Ok(())
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.compose_rdata(target)
    }
}

//--- Display

impl fmt::Display for Caa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} \"", self.flags, self.tag)?;
        for &ch in self.value.iter() {
            if ch == b'"' || ch == b'\\' {
                write!(f, "\\{}", ch as char)?;
            } else if !(0x20..0x7F).contains(&ch) {
                write!(f, "\\{:03}", ch)?;
            } else {
                write!(f, "{}", ch as char)?;
            }
        }
        f.write_str("\"")
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_len, test_compose_parse};

    #[test]
    fn caa_compose_parse() {
        let rdata = Caa::new(0, b"issue", &b"ca.example.net"[..]).unwrap();
        test_compose_len(rdata.clone());
        test_compose_parse(&rdata, Caa::parse);

        let mut buf = Vec::new();
        rdata.compose_rdata(&mut buf).unwrap();
        assert_eq!(buf, b"\x00\x05issueca.example.net");
        assert_eq!(rdata.to_string(), "0 issue \"ca.example.net\"");
    }

    #[test]
    fn caa_tag_beyond_data() {
        let mut parser = WireParser::from_ref(b"\x80\x09iss".as_ref());
        assert_eq!(Caa::parse(&mut parser), Err(ParseError::ShortInput));
    }
}
