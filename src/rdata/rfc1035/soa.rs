//! Record data for the SOA record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::record::Ttl;
use crate::base::wire::{ComposeError, Composer, ParseError, WireParser};
use core::fmt;

//------------ Soa ----------------------------------------------------------

/// Soa record data.
///
/// Soa records mark the top of a zone and contain information pertinent to
/// name server maintenance operations.
///
/// The Soa record type is defined in RFC 1035, section 3.3.13.
///
/// The four timer fields are kept as [`Ttl`] values but, unlike record
/// TTLs, are taken verbatim from the wire.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Soa {
    mname: Name,
    rname: Name,
    serial: u32,
    refresh: Ttl,
    retry: Ttl,
    expire: Ttl,
    minimum: Ttl,
}

impl Soa {
    /// Creates new Soa record data from content.
    #[must_use]
    pub fn new(
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: Ttl,
        retry: Ttl,
        expire: Ttl,
        minimum: Ttl,
    ) -> Self {
        Soa {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        }
    }

    /// The primary name server for the zone.
    #[must_use]
    pub fn mname(&self) -> &Name {
        &self.mname
    }

    /// The mailbox for the person responsible for this zone.
    #[must_use]
    pub fn rname(&self) -> &Name {
        &self.rname
    }

    /// The serial number of the original copy of the zone.
    #[must_use]
    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// The time interval before the zone should be refreshed.
    #[must_use]
    pub fn refresh(&self) -> Ttl {
        self.refresh
    }

    /// The time before a failed refresh is retried.
    #[must_use]
    pub fn retry(&self) -> Ttl {
        self.retry
    }

    /// The upper limit of time the zone is authoritative.
    #[must_use]
    pub fn expire(&self) -> Ttl {
        self.expire
    }

    /// The minimum TTL to be exported with any RR from this zone.
    #[must_use]
    pub fn minimum(&self) -> Ttl {
        self.minimum
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        Ok(Self::new(
            Name::parse(parser)?,
            Name::parse(parser)?,
            parser.parse_u32_be()?,
            Ttl::from_secs(parser.parse_u32_be()?),
            Ttl::from_secs(parser.parse_u32_be()?),
            Ttl::from_secs(parser.parse_u32_be()?),
            Ttl::from_secs(parser.parse_u32_be()?),
        ))
    }

    fn compose_fixed<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_slice(&self.serial.to_be_bytes())?;
        self.refresh.compose(target)?;
        self.retry.compose(target)?;
        self.expire.compose(target)?;
        self.minimum.compose(target)?;
        Ok(())
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Soa {
    fn rtype(&self) -> Rtype {
        Rtype::SOA
    }
}

impl ParseRecordData for Soa {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::SOA {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Soa {
    fn compose_len(&self) -> u16 {
        self.mname.compose_len() + self.rname.compose_len() + 20
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_compressed_name(&self.mname)?;
        target.append_compressed_name(&self.rname)?;
        self.compose_fixed(target)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.mname.compose_canonical(target)?;
        self.rname.compose_canonical(target)?;
        self.compose_fixed(target)
    }
}

//--- Display

impl fmt::Display for Soa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}. {}. {} {} {} {} {}",
            self.mname,
            self.rname,
            self.serial,
            self.refresh.as_secs(),
            self.retry.as_secs(),
            self.expire.as_secs(),
            self.minimum.as_secs()
        )
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_len, test_compose_parse};
    use core::str::FromStr;

    fn soa() -> Soa {
        Soa::new(
            Name::from_str("ns.example.com").unwrap(),
            Name::from_str("hostmaster.example.com").unwrap(),
            2024010101,
            Ttl::from_secs(7200),
            Ttl::HOUR,
            Ttl::from_secs(0x8000_0000),
            Ttl::from_secs(300),
        )
    }

    #[test]
    fn soa_compose_parse() {
        let rdata = soa();
        test_compose_len(rdata.clone());
        test_compose_parse(&rdata, Soa::parse);
    }

    #[test]
    fn soa_display() {
        assert_eq!(
            soa().to_string(),
            "ns.example.com. hostmaster.example.com. 2024010101 \
             7200 3600 2147483648 300"
        );
    }
}
