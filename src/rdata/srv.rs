//! Record data from [RFC 2782]: SRV records.
//!
//! This RFC defines the Srv record type.
//!
//! [RFC 2782]: https://tools.ietf.org/html/rfc2782

use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{ComposeError, Composer, ParseError, WireParser};
use core::fmt;

//------------ Srv ---------------------------------------------------------

/// Srv record data.
///
/// The target name is never compressed when composing. RFC 2782 forbids
/// it and not all resolvers would follow the pointer.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Srv {
    priority: u16,
    weight: u16,
    port: u16,
    target: Name,
}

impl Srv {
    #[must_use]
    pub fn new(priority: u16, weight: u16, port: u16, target: Name) -> Self {
        Srv {
            priority,
            weight,
            port,
            target,
        }
    }

    #[must_use]
    pub fn priority(&self) -> u16 {
        self.priority
    }

    #[must_use]
    pub fn weight(&self) -> u16 {
        self.weight
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn target(&self) -> &Name {
        &self.target
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        Ok(Self::new(
            parser.parse_u16_be()?,
            parser.parse_u16_be()?,
            parser.parse_u16_be()?,
            Name::parse(parser)?,
        ))
    }

    fn compose_head<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_slice(&self.priority.to_be_bytes())?;
        target.append_slice(&self.weight.to_be_bytes())?;
        target.append_slice(&self.port.to_be_bytes())?;
        Ok(())
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Srv {
    fn rtype(&self) -> Rtype {
        Rtype::SRV
    }
}

impl ParseRecordData for Srv {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::SRV {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Srv {
    fn compose_len(&self) -> u16 {
        6 + self.target.compose_len()
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.compose_head(target)?;
        self.target.compose(target)?;
        Ok(())
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.compose_head(target)?;
        self.target.compose_canonical(target)?;
        Ok(())
    }
}

//--- Display

impl fmt::Display for Srv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}.",
            self.priority, self.weight, self.port, self.target
        )
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::name::NameCompressor;
    use crate::base::rdata::test::{test_compose_len, test_compose_parse};
    use core::str::FromStr;

    #[test]
    fn srv_compose_parse() {
        let rdata =
            Srv::new(10, 20, 5060, Name::from_str("sip.example.com").unwrap());
        test_compose_len(rdata.clone());
        test_compose_parse(&rdata, Srv::parse);
        assert_eq!(rdata.to_string(), "10 20 5060 sip.example.com.");
    }

    #[test]
    fn srv_target_not_compressed() {
        let rdata =
            Srv::new(0, 0, 53, Name::from_str("ns.example.com").unwrap());
        let mut target = NameCompressor::new(Vec::new());
        target
            .append_compressed_name(&Name::from_str("example.com").unwrap())
            .unwrap();
        rdata.compose_rdata(&mut target).unwrap();
        let buf = target.into_target();
        assert_eq!(&buf[13 + 6..], b"\x02ns\x07example\x03com\x00");
    }
}
