//! Record data from [RFC 2930]: TKEY records.
//!
//! [RFC 2930]: https://tools.ietf.org/html/rfc2930

use crate::base::iana::{Rtype, TsigRcode};
use crate::base::name::Name;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{
    compose_u16_prefixed, parse_u16_prefixed, ComposeError, Composer,
    ParseError, WireParser,
};
use bytes::Bytes;
use core::fmt;

//------------ Tkey ----------------------------------------------------------

/// TKEY record data.
///
/// The record is used to establish shared secret keys between resolvers
/// and servers. Inception and expiration are plain 32 bit Unix times.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Tkey {
    algorithm: Name,
    inception: u32,
    expiration: u32,
    mode: u16,
    error: TsigRcode,
    key: Bytes,
    other: Bytes,
}

impl Tkey {
    /// Server assignment.
    pub const MODE_SERVER: u16 = 1;

    /// Diffie-Hellman exchange.
    pub const MODE_DH: u16 = 2;

    /// GSS-API negotiation.
    pub const MODE_GSS_API: u16 = 3;

    /// Resolver assignment.
    pub const MODE_RESOLVER: u16 = 4;

    /// Key deletion.
    pub const MODE_DELETE: u16 = 5;

    pub fn new(
        algorithm: Name,
        inception: u32,
        expiration: u32,
        mode: u16,
        error: TsigRcode,
        key: impl Into<Bytes>,
        other: impl Into<Bytes>,
    ) -> Result<Self, ComposeError> {
        let key = key.into();
        let other = other.into();
        if key.len() + other.len() + usize::from(algorithm.compose_len()) + 16
            > usize::from(u16::MAX)
        {
            return Err(ComposeError::LongData);
        }
        Ok(Tkey {
            algorithm,
            inception,
            expiration,
            mode,
            error,
            key,
            other,
        })
    }

    #[must_use]
    pub fn algorithm(&self) -> &Name {
        &self.algorithm
    }

    #[must_use]
    pub fn inception(&self) -> u32 {
        self.inception
    }

    #[must_use]
    pub fn expiration(&self) -> u32 {
        self.expiration
    }

    /// The key agreement mode.
    #[must_use]
    pub fn mode(&self) -> u16 {
        self.mode
    }

    #[must_use]
    pub fn error(&self) -> TsigRcode {
        self.error
    }

    /// The key exchange data.
    #[must_use]
    pub fn key(&self) -> &[u8] {
        self.key.as_ref()
    }

    #[must_use]
    pub fn other(&self) -> &[u8] {
        self.other.as_ref()
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        Ok(Tkey {
            algorithm: Name::parse(parser)?,
            inception: parser.parse_u32_be()?,
            expiration: parser.parse_u32_be()?,
            mode: parser.parse_u16_be()?,
            error: TsigRcode::parse(parser)?,
            key: parse_u16_prefixed(parser)?.into(),
            other: parse_u16_prefixed(parser)?.into(),
        })
    }

    fn compose_with_name<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
        name: &Name,
    ) -> Result<(), ComposeError> {
        name.compose(target)?;
        target.append_slice(&self.inception.to_be_bytes())?;
        target.append_slice(&self.expiration.to_be_bytes())?;
        target.append_slice(&self.mode.to_be_bytes())?;
        self.error.compose(target)?;
        compose_u16_prefixed(target, &self.key)?;
        compose_u16_prefixed(target, &self.other)
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Tkey {
    fn rtype(&self) -> Rtype {
        Rtype::TKEY
    }
}

impl ParseRecordData for Tkey {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::TKEY {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Tkey {
    fn compose_len(&self) -> u16 {
        self.algorithm.compose_len()
            + 16
            + self.key.len() as u16
            + self.other.len() as u16
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.compose_with_name(target, &self.algorithm)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.compose_with_name(target, &self.algorithm.to_canonical())
    }
}

//--- Display

impl fmt::Display for Tkey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}. {} {} {} {} {} {}",
            self.algorithm,
            self.inception,
            self.expiration,
            self.mode,
            self.error,
            self.key.len(),
            self.other.len()
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
    fn tkey_compose_parse() {
        let rdata = Tkey::new(
            Name::from_str("gss-tsig").unwrap(),
            1_000,
            2_000,
            Tkey::MODE_GSS_API,
            TsigRcode::NOERROR,
            &b"token"[..],
            Bytes::new(),
        )
        .unwrap();
        test_compose_len(rdata.clone());
        test_compose_parse(&rdata, Tkey::parse);
    }

    #[test]
    fn tkey_name_not_compressed() {
        let name = Name::from_str("gss-tsig").unwrap();
        let rdata = Tkey::new(
            name.clone(),
            0,
            0,
            Tkey::MODE_DELETE,
            TsigRcode::NOERROR,
            Bytes::new(),
            Bytes::new(),
        )
        .unwrap();
        let mut target = NameCompressor::new(Vec::new());
        Composer::append_compressed_name(&mut target, &name).unwrap();
        rdata.compose_rdata(&mut target).unwrap();
        let buf = target.into_target();
        assert_eq!(&buf[10..20], b"\x08gss-tsig\x00");
    }
}
