//! EDNS option for carrying client subnet information.
//!
//! The option in this module – [`ClientSubnet`] – can be used by a resolver
//! to include information about the network a query originated from in its
//! own query to an authoritative server so it can tailor its response for
//! that network.
//!
//! The option is defined in [RFC 7871](https://tools.ietf.org/html/rfc7871)
//! which also includes some guidance on its use.

use super::super::iana::OptionCode;
use super::super::wire::{Compose, ParseError, WireParser};
use super::{AllOptData, ComposeOptData, Opt, OptData, ParseOptData};
use core::fmt;
use octseq::builder::OctetsBuilder;
use std::net::IpAddr;

/// Address family number for IPv4.
const FAMILY_IPV4: u16 = 1;

/// Address family number for IPv6.
const FAMILY_IPV6: u16 = 2;

//------------ ClientSubnet --------------------------------------------------

/// Option data for the client subnet option.
///
/// The option identifies the network through an address prefix, i.e., an
/// IP address of which only a certain number of left-side bits is
/// interpreted. The _source prefix length_ is the number of bits provided
/// by the client and the _scope prefix length_ is the number of bits that
/// the server considered when providing the answer. The scope prefix length
/// is zero in a query.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClientSubnet {
    /// The source prefix length.
    source_prefix_len: u8,

    /// The scope prefix length.
    scope_prefix_len: u8,

    /// The address.
    addr: IpAddr,
}

impl ClientSubnet {
    /// Creates a new client subnet value.
    ///
    /// Prefix lengths are limited to the address family’s maximum and all
    /// address bits beyond the source prefix length are cleared.
    #[must_use]
    pub fn new(
        source_prefix_len: u8,
        scope_prefix_len: u8,
        addr: IpAddr,
    ) -> ClientSubnet {
        let source_prefix_len = normalize_prefix_len(addr, source_prefix_len);
        let scope_prefix_len = normalize_prefix_len(addr, scope_prefix_len);
        let (addr, _) = addr_apply_mask(addr, source_prefix_len);

        ClientSubnet {
            source_prefix_len,
            scope_prefix_len,
            addr,
        }
    }

    /// Returns the source prefix length.
    #[must_use]
    pub fn source_prefix_len(&self) -> u8 {
        self.source_prefix_len
    }

    /// Returns the scope prefix length.
    #[must_use]
    pub fn scope_prefix_len(&self) -> u8 {
        self.scope_prefix_len
    }

    /// Returns the address.
    #[must_use]
    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    /// Parses a value from its wire format.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        const ERR_ADDR_LEN: &str =
            "invalid address length in client subnet option";

        let family = parser.parse_u16_be()?;
        let source_prefix_len = parser.parse_u8()?;
        let scope_prefix_len = parser.parse_u8()?;

        // https://tools.ietf.org/html/rfc7871#section-6
        //
        // | ADDRESS, variable number of octets, contains either an IPv4 or
        // | IPv6 address, depending on FAMILY, which MUST be truncated to
        // | the number of bits indicated by the SOURCE PREFIX-LENGTH field,
        // | padding with 0 bits to pad to the end of the last octet needed.
        let prefix_bytes = prefix_bytes(source_prefix_len);
        let addr = match family {
            FAMILY_IPV4 => {
                let mut buf = [0; 4];
                parse_prefix(parser, &mut buf, prefix_bytes, ERR_ADDR_LEN)?;
                IpAddr::from(buf)
            }
            FAMILY_IPV6 => {
                let mut buf = [0; 16];
                parse_prefix(parser, &mut buf, prefix_bytes, ERR_ADDR_LEN)?;
                IpAddr::from(buf)
            }
            _ => {
                return Err(ParseError::form_error(
                    "invalid client subnet address family",
                ))
            }
        };

        let (addr, modified) = addr_apply_mask(addr, source_prefix_len);
        if modified {
            return Err(ParseError::form_error(ERR_ADDR_LEN));
        }

        Ok(ClientSubnet {
            source_prefix_len,
            scope_prefix_len,
            addr,
        })
    }
}

//--- OptData etc.

impl OptData for ClientSubnet {
    fn code(&self) -> OptionCode {
        OptionCode::CLIENT_SUBNET
    }
}

impl ParseOptData for ClientSubnet {
    fn parse_option(
        code: OptionCode,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if code == OptionCode::CLIENT_SUBNET {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeOptData for ClientSubnet {
    fn compose_len(&self) -> u16 {
        // At most 16 octets of address, so this can’t overflow.
        prefix_bytes(self.source_prefix_len) as u16 + 4
    }

    fn compose_option<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        let prefix_bytes = prefix_bytes(self.source_prefix_len);
        let (family, octets) = match self.addr {
            IpAddr::V4(addr) => (FAMILY_IPV4, addr.octets().to_vec()),
            IpAddr::V6(addr) => (FAMILY_IPV6, addr.octets().to_vec()),
        };
        family.compose(target)?;
        self.source_prefix_len.compose(target)?;
        self.scope_prefix_len.compose(target)?;
        target.append_slice(&octets[..prefix_bytes.min(octets.len())])
    }
}

//--- Display

impl fmt::Display for ClientSubnet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.source_prefix_len)?;
        if self.scope_prefix_len != 0 {
            write!(f, "/{}", self.scope_prefix_len)?;
        }
        Ok(())
    }
}

//--- Extended Opt

impl Opt {
    /// Returns the first client subnet option if present.
    #[must_use]
    pub fn client_subnet(&self) -> Option<ClientSubnet> {
        self.iter().find_map(|opt| match opt {
            AllOptData::ClientSubnet(value) => Some(*value),
            _ => None,
        })
    }
}

//------------ Helper Functions ----------------------------------------------

/// Parses exactly `len` address octets into the front of `buf`.
fn parse_prefix(
    parser: &mut WireParser,
    buf: &mut [u8],
    len: usize,
    err: &'static str,
) -> Result<(), ParseError> {
    if len > buf.len() || parser.remaining() != len {
        return Err(ParseError::form_error(err));
    }
    parser
        .parse_buf(&mut buf[..len])
        .map_err(|_| ParseError::form_error(err))
}

/// Returns the number of bytes needed for a prefix of a given length.
fn prefix_bytes(bits: u8) -> usize {
    (usize::from(bits) + 7) / 8
}

/// Only keeps the left-most `mask` bits and zeros out the rest.
///
/// Returns whether the buffer has been modified.
fn apply_bit_mask(buf: &mut [u8], mask: usize) -> bool {
    let mut modified = false;

    let mut p = mask / 8;
    if p >= buf.len() {
        return modified;
    }

    let bits = mask % 8;
    if bits != 0 {
        let keep = 0xffu8 << (8 - bits);
        if buf[p] & !keep != 0 {
            buf[p] &= keep;
            modified = true;
        }
        p += 1;
    }

    for octet in &mut buf[p..] {
        if *octet != 0 {
            *octet = 0;
            modified = true;
        }
    }

    modified
}

/// Zeros out unused bits in an address prefix of the given length.
///
/// Returns the new address and whether it was changed.
fn addr_apply_mask(addr: IpAddr, len: u8) -> (IpAddr, bool) {
    match addr {
        IpAddr::V4(a) => {
            let mut array = a.octets();
            let m = apply_bit_mask(&mut array, len.into());
            (array.into(), m)
        }
        IpAddr::V6(a) => {
            let mut array = a.octets();
            let m = apply_bit_mask(&mut array, len.into());
            (array.into(), m)
        }
    }
}

/// Limits a prefix length for the given address.
fn normalize_prefix_len(addr: IpAddr, len: u8) -> u8 {
    let max = match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    };
    len.min(max)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::super::test::test_option_compose_parse;
    use super::*;

    macro_rules! check {
        ($name:ident, $addr:expr, $prefix:expr, $exp:expr, $ok:expr) => {
            #[test]
            fn $name() {
                let addr: IpAddr = $addr.parse().unwrap();
                let opt = ClientSubnet::new($prefix, 0, addr);
                assert_eq!(opt.addr(), $exp.parse::<IpAddr>().unwrap());

                // Put the unmasked address back in to produce possibly
                // invalid wire data.
                let mut raw = opt;
                raw.addr = addr;
                let mut buf = Vec::new();
                raw.compose_option(&mut buf).unwrap();
                match ClientSubnet::parse(&mut WireParser::from_ref(&buf)) {
                    Ok(v) => assert_eq!(opt, v),
                    Err(_) => assert!(!$ok),
                }
            }
        };
    }

    check!(prefix_at_boundary_v4, "192.0.2.0", 24, "192.0.2.0", true);
    check!(prefix_at_boundary_v6, "2001:db8::", 32, "2001:db8::", true);
    check!(prefix_no_truncation, "192.0.2.0", 23, "192.0.2.0", true);
    check!(prefix_need_truncation, "192.0.2.0", 22, "192.0.0.0", false);
    check!(prefix_min, "192.0.2.0", 0, "0.0.0.0", true);
    check!(prefix_max, "192.0.2.0", 32, "192.0.2.0", true);
    check!(prefix_too_long, "192.0.2.0", 100, "192.0.2.0", true);

    #[test]
    fn client_subnet_compose_parse() {
        test_option_compose_parse(
            &ClientSubnet::new(4, 6, "127.0.0.1".parse().unwrap()),
            ClientSubnet::parse,
        );
    }

    #[test]
    fn client_subnet_wire_and_display() {
        let opt = ClientSubnet::new(24, 0, "192.0.2.77".parse().unwrap());
        let mut buf = Vec::new();
        opt.compose_option(&mut buf).unwrap();
        assert_eq!(buf, b"\x00\x01\x18\x00\xc0\x00\x02");
        assert_eq!(opt.to_string(), "192.0.2.0/24");

        let bad_family = b"\x00\x03\x00\x00";
        assert!(matches!(
            ClientSubnet::parse(&mut WireParser::from_ref(bad_family.as_ref())),
            Err(ParseError::Form(_))
        ));
    }
}
