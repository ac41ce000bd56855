//! Record data for the WKS record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{
    parse_remaining, ComposeError, Composer, ParseError, WireParser,
};
use core::fmt;
use std::net::Ipv4Addr;

//------------ Wks ----------------------------------------------------------

/// WKS record data.
///
/// WKS records describe the well known services supported by a protocol
/// on an address. The services are given as a bitmap where bit _n_ is set
/// if the service on port _n_ is available.
///
/// The WKS record type is defined in RFC 1035, section 3.4.2.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Wks {
    address: Ipv4Addr,
    protocol: u8,
    bitmap: Vec<u8>,
}

impl Wks {
    /// Creates new WKS record data from its components.
    ///
    /// Fails if the bitmap would make the record data exceed 65,535
    /// octets.
    pub fn new(
        address: Ipv4Addr,
        protocol: u8,
        bitmap: Vec<u8>,
    ) -> Result<Self, ComposeError> {
        if bitmap.len() > usize::from(u16::MAX) - 5 {
            return Err(ComposeError::LongData);
        }
        Ok(Wks {
            address,
            protocol,
            bitmap,
        })
    }

    #[must_use]
    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// The IP protocol number, e.g. 6 for TCP.
    #[must_use]
    pub fn protocol(&self) -> u8 {
        self.protocol
    }

    #[must_use]
    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    /// Returns whether the service on the given port is listed.
    #[must_use]
    pub fn serves(&self, port: u16) -> bool {
        let idx = usize::from(port >> 3);
        let bit = 0x80u8 >> (port & 0x07);
        self.bitmap.get(idx).map_or(false, |octet| octet & bit != 0)
    }

    /// Returns an iterator over all listed ports.
    pub fn ports(&self) -> impl Iterator<Item = u16> + '_ {
        (0..=u16::MAX).take(self.bitmap.len() * 8).filter(|port| {
            self.serves(*port)
        })
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        let mut address = [0u8; 4];
        parser.parse_buf(&mut address)?;
        let protocol = parser.parse_u8()?;
        Ok(Wks {
            address: address.into(),
            protocol,
            bitmap: parse_remaining(parser),
        })
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Wks {
    fn rtype(&self) -> Rtype {
        Rtype::WKS
    }
}

impl ParseRecordData for Wks {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::WKS {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Wks {
    fn compose_len(&self) -> u16 {
        5 + self.bitmap.len() as u16
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_slice(&self.address.octets())?;
        target.append_slice(&[self.protocol])?;
        target.append_slice(&self.bitmap)?;
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

impl fmt::Display for Wks {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.address, self.protocol)?;
        for port in self.ports() {
            write!(f, " {}", port)?;
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_len, test_compose_parse};

    #[test]
    fn wks_compose_parse() {
        let rdata =
            Wks::new(Ipv4Addr::new(192, 0, 2, 1), 6, vec![0x00, 0x00, 0x05])
                .unwrap();
        test_compose_len(rdata.clone());
        test_compose_parse(&rdata, Wks::parse);
    }

    #[test]
    fn wks_ports() {
        // Ports 21 and 23.
        let rdata =
            Wks::new(Ipv4Addr::new(192, 0, 2, 1), 6, vec![0x00, 0x00, 0x05])
                .unwrap();
        assert!(rdata.serves(21));
        assert!(!rdata.serves(22));
        assert_eq!(rdata.ports().collect::<Vec<_>>(), [21, 23]);
        assert_eq!(rdata.to_string(), "192.0.2.1 6 21 23");
    }
}
