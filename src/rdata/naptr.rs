//! Record data from [RFC 3403]: NAPTR records.
//!
//! This RFC defines the NAPTR record type.
//!
//! [RFC 3403]: https://www.rfc-editor.org/rfc/rfc3403

use crate::base::charstr::CharStr;
use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{ComposeError, Composer, ParseError, WireParser};
use core::fmt;

//------------ Naptr ---------------------------------------------------------

/// Naptr record data.
///
/// The Naptr encodes a rule which may produce a new domain. A set of
/// rules is processed in order of `order` and then `preference`.
///
/// The replacement name is never compressed on output but may be
/// compressed in received messages.
///
/// The Naptr record type is defined in [RFC 3403, section 4.1][1].
///
/// [1]: https://www.rfc-editor.org/rfc/rfc3403#section-4.1
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Naptr {
    order: u16,
    preference: u16,
    flags: CharStr,
    services: CharStr,
    regexp: CharStr,
    replacement: Name,
}

impl Naptr {
    /// Creates a new Naptr record data from content.
    #[must_use]
    pub fn new(
        order: u16,
        preference: u16,
        flags: CharStr,
        services: CharStr,
        regexp: CharStr,
        replacement: Name,
    ) -> Self {
        Naptr {
            order,
            preference,
            flags,
            services,
            regexp,
            replacement,
        }
    }

    /// The order of processing the records is from lowest to highest.
    #[must_use]
    pub fn order(&self) -> u16 {
        self.order
    }

    /// The priority of the NAPTR record among those with the same order.
    #[must_use]
    pub fn preference(&self) -> u16 {
        self.preference
    }

    /// The flags controlling the rewriting and interpretation of fields.
    #[must_use]
    pub fn flags(&self) -> &CharStr {
        &self.flags
    }

    /// The services available down the rewrite path.
    #[must_use]
    pub fn services(&self) -> &CharStr {
        &self.services
    }

    /// The substitution expression applied to the original client string.
    #[must_use]
    pub fn regexp(&self) -> &CharStr {
        &self.regexp
    }

    /// The next domain name to query for.
    #[must_use]
    pub fn replacement(&self) -> &Name {
        &self.replacement
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        Ok(Self::new(
            parser.parse_u16_be()?,
            parser.parse_u16_be()?,
            CharStr::parse(parser)?,
            CharStr::parse(parser)?,
            CharStr::parse(parser)?,
            Name::parse(parser)?,
        ))
    }

    fn compose_head<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_slice(&self.order.to_be_bytes())?;
        target.append_slice(&self.preference.to_be_bytes())?;
        self.flags.compose(target)?;
        self.services.compose(target)?;
        self.regexp.compose(target)
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Naptr {
    fn rtype(&self) -> Rtype {
        Rtype::NAPTR
    }
}

impl ParseRecordData for Naptr {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::NAPTR {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Naptr {
    fn compose_len(&self) -> u16 {
        4 + self.flags.compose_len()
            + self.services.compose_len()
            + self.regexp.compose_len()
            + self.replacement.compose_len()
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.compose_head(target)?;
        self.replacement.compose(target)?;
        Ok(())
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.compose_head(target)?;
        self.replacement.compose_canonical(target)?;
        Ok(())
    }
}

//--- Display

impl fmt::Display for Naptr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}.",
            self.order,
            self.preference,
            self.flags.display_quoted(),
            self.services.display_quoted(),
            self.regexp.display_quoted(),
            self.replacement
        )
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_len, test_compose_parse};
    use core::str::FromStr;

    fn naptr() -> Naptr {
        Naptr::new(
            100,
            50,
            CharStr::from_slice(b"s").unwrap(),
            CharStr::from_slice(b"SIP+D2U").unwrap(),
            CharStr::empty(),
            Name::from_str("_sip._udp.Example.com").unwrap(),
        )
    }

    #[test]
    fn naptr_compose_parse() {
        let rdata = naptr();
        test_compose_len(rdata.clone());
        test_compose_parse(&rdata, Naptr::parse);
    }

    #[test]
    fn naptr_display() {
        assert_eq!(
            naptr().to_string(),
            "100 50 \"s\" \"SIP+D2U\" \"\" _sip._udp.Example.com."
        );
    }

    #[test]
    fn naptr_canonical() {
        let mut buf = Vec::new();
        naptr().compose_canonical_rdata(&mut buf).unwrap();
        assert!(buf.ends_with(b"\x07example\x03com\x00"));
    }
}
