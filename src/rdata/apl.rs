//! Record data from [RFC 3123]: APL records.
//!
//! [RFC 3123]: https://tools.ietf.org/html/rfc3123

use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{
    parse_vec, ComposeError, Composer, ParseError, WireParser,
};
use core::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

//------------ Apl -----------------------------------------------------------

/// APL record data.
///
/// An address prefix list consists of any number of [`AplItem`]s.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Apl {
    items: Vec<AplItem>,
}

impl Apl {
    /// Creates APL record data from a list of items.
    ///
    /// Fails if the record data would be longer than 65,535 octets.
    pub fn new(items: Vec<AplItem>) -> Result<Self, ComposeError> {
        let len: usize =
            items.iter().map(|item| usize::from(item.compose_len())).sum();
        if len > usize::from(u16::MAX) {
            return Err(ComposeError::LongData);
        }
        Ok(Apl { items })
    }

    #[must_use]
    pub fn items(&self) -> &[AplItem] {
        &self.items
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        let mut items = Vec::new();
        while parser.remaining() > 0 {
            items.push(AplItem::parse(parser)?);
        }
        Ok(Apl { items })
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Apl {
    fn rtype(&self) -> Rtype {
        Rtype::APL
    }
}

impl ParseRecordData for Apl {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::APL {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Apl {
    fn compose_len(&self) -> u16 {
        self.items.iter().map(AplItem::compose_len).sum()
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.items.iter().try_for_each(|item| item.compose(target))
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.compose_rdata(target)
    }
}

//--- Display

impl fmt::Display for Apl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for item in &self.items {
            if first {
                first = false;
            } else {
                f.write_str(" ")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

//------------ AplItem -------------------------------------------------------

/// A single address prefix of an APL record.
///
/// The address part is kept with trailing zero octets removed as required
/// for the wire format.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct AplItem {
    family: u16,
    prefix: u8,
    negation: bool,
    afd: Vec<u8>,
}

impl AplItem {
    /// The address family for IPv4.
    pub const FAMILY_IPV4: u16 = 1;

    /// The address family for IPv6.
    pub const FAMILY_IPV6: u16 = 2;

    /// Creates an item from its components.
    ///
    /// Trailing zero octets of `afd` are dropped. Fails if what remains is
    /// longer than 127 octets.
    pub fn new(
        family: u16,
        prefix: u8,
        negation: bool,
        afd: &[u8],
    ) -> Result<Self, ComposeError> {
        let end = afd.iter().rposition(|&x| x != 0).map_or(0, |pos| pos + 1);
        if end > 0x7F {
            return Err(ComposeError::LongData);
        }
        Ok(AplItem {
            family,
            prefix,
            negation,
            afd: afd[..end].to_vec(),
        })
    }

    /// Creates an item for an IPv4 prefix.
    pub fn ipv4(addr: Ipv4Addr, prefix: u8, negation: bool) -> Self {
        AplItem::new(Self::FAMILY_IPV4, prefix, negation, &addr.octets())
            .unwrap_or_else(|_| unreachable!())
    }

    /// Creates an item for an IPv6 prefix.
    pub fn ipv6(addr: Ipv6Addr, prefix: u8, negation: bool) -> Self {
        AplItem::new(Self::FAMILY_IPV6, prefix, negation, &addr.octets())
            .unwrap_or_else(|_| unreachable!())
    }

    #[must_use]
    pub fn family(&self) -> u16 {
        self.family
    }

    #[must_use]
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    #[must_use]
    pub fn negation(&self) -> bool {
        self.negation
    }

    /// The address part without trailing zero octets.
    #[must_use]
    pub fn afd(&self) -> &[u8] {
        &self.afd
    }

    fn compose_len(&self) -> u16 {
        4 + self.afd.len() as u16
    }

    fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        let family = parser.parse_u16_be()?;
        let prefix = parser.parse_u8()?;
        let flags = parser.parse_u8()?;
        let afd = parse_vec(parser, usize::from(flags & 0x7F))?;
        Ok(AplItem {
            family,
            prefix,
            negation: flags & 0x80 != 0,
            afd,
        })
    }

    fn compose<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        let flags = if self.negation { 0x80 } else { 0 };
        target.append_slice(&self.family.to_be_bytes())?;
        target.append_slice(&[self.prefix, flags | self.afd.len() as u8])?;
        target.append_slice(&self.afd)?;
        Ok(())
    }
}

//--- Display

impl fmt::Display for AplItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.negation {
            f.write_str("!")?;
        }
        match self.family {
            Self::FAMILY_IPV4 if self.afd.len() <= 4 => {
                let mut addr = [0u8; 4];
                addr[..self.afd.len()].copy_from_slice(&self.afd);
                write!(f, "1:{}/{}", Ipv4Addr::from(addr), self.prefix)
            }
            Self::FAMILY_IPV6 if self.afd.len() <= 16 => {
                let mut addr = [0u8; 16];
                addr[..self.afd.len()].copy_from_slice(&self.afd);
                write!(f, "2:{}/{}", Ipv6Addr::from(addr), self.prefix)
            }
            family => {
                write!(f, "{}:", family)?;
                for ch in &self.afd {
                    write!(f, "{:02x}", ch)?;
                }
                write!(f, "/{}", self.prefix)
            }
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_len, test_compose_parse};

    #[test]
    fn apl_strips_trailing_zeros() {
        let item = AplItem::ipv4(Ipv4Addr::new(192, 168, 0, 0), 16, false);
        assert_eq!(item.afd(), &[192, 168]);
        let rdata = Apl::new(vec![
            item,
            AplItem::ipv6("2001:db8::".parse().unwrap(), 32, true),
        ])
        .unwrap();

        let mut buf = Vec::new();
        rdata.compose_rdata(&mut buf).unwrap();
        assert_eq!(
            buf,
            b"\x00\x01\x10\x02\xc0\xa8\x00\x02\x20\x84\x20\x01\x0d\xb8"
        );
        test_compose_len(rdata.clone());
        test_compose_parse(&rdata, Apl::parse);
        assert_eq!(rdata.to_string(), "1:192.168.0.0/16 !2:2001:db8::/32");
    }

    #[test]
    fn apl_short_afd() {
        let mut parser = WireParser::from_ref(b"\x00\x01\x08\x03\x0a".as_ref());
        assert_eq!(Apl::parse(&mut parser), Err(ParseError::ShortInput));
    }
}
