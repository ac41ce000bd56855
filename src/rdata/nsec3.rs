//! Record data from [RFC 5155]: NSEC3 and NSEC3PARAM records.
//!
//! [RFC 5155]: https://tools.ietf.org/html/rfc5155

use super::dnssec::{write_hex, RtypeBitmap};
use crate::base::iana::{Nsec3HashAlg, Rtype};
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{
    compose_u8_prefixed, parse_u8_prefixed, ComposeError, Composer,
    ParseError, WireParser,
};
use bytes::Bytes;
use core::fmt;

//------------ Nsec3 ---------------------------------------------------------

/// NSEC3 record data.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Nsec3 {
    hash_algorithm: Nsec3HashAlg,
    flags: u8,
    iterations: u16,
    salt: Bytes,
    next_owner: Bytes,
    types: RtypeBitmap,
}

impl Nsec3 {
    /// Creates new NSEC3 record data.
    ///
    /// The salt and the hashed next owner name are limited to 255 octets
    /// each.
    pub fn new(
        hash_algorithm: Nsec3HashAlg,
        flags: u8,
        iterations: u16,
        salt: impl Into<Bytes>,
        next_owner: impl Into<Bytes>,
        types: RtypeBitmap,
    ) -> Result<Self, ComposeError> {
        let salt = salt.into();
        let next_owner = next_owner.into();
        if salt.len() > 255 || next_owner.len() > 255 {
            return Err(ComposeError::LongData);
        }
        Ok(Nsec3 {
            hash_algorithm,
            flags,
            iterations,
            salt,
            next_owner,
            types,
        })
    }

    #[must_use]
    pub fn hash_algorithm(&self) -> Nsec3HashAlg {
        self.hash_algorithm
    }

    #[must_use]
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Returns whether the Opt-Out flag is set.
    #[must_use]
    pub fn opt_out(&self) -> bool {
        self.flags & 0x01 != 0
    }

    #[must_use]
    pub fn iterations(&self) -> u16 {
        self.iterations
    }

    #[must_use]
    pub fn salt(&self) -> &[u8] {
        self.salt.as_ref()
    }

    #[must_use]
    pub fn next_owner(&self) -> &[u8] {
        self.next_owner.as_ref()
    }

    #[must_use]
    pub fn types(&self) -> &RtypeBitmap {
        &self.types
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        Ok(Nsec3 {
            hash_algorithm: Nsec3HashAlg::parse(parser)?,
            flags: parser.parse_u8()?,
            iterations: parser.parse_u16_be()?,
            salt: parse_u8_prefixed(parser)?.into(),
            next_owner: parse_u8_prefixed(parser)?.into(),
            types: RtypeBitmap::parse(parser)?,
        })
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Nsec3 {
    fn rtype(&self) -> Rtype {
        Rtype::NSEC3
    }
}

impl ParseRecordData for Nsec3 {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::NSEC3 {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Nsec3 {
    fn compose_len(&self) -> u16 {
        6 + self.salt.len() as u16
            + self.next_owner.len() as u16
            + self.types.compose_len()
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.hash_algorithm.compose(target)?;
        target.append_slice(&[self.flags])?;
        target.append_slice(&self.iterations.to_be_bytes())?;
        compose_u8_prefixed(target, &self.salt)?;
        compose_u8_prefixed(target, &self.next_owner)?;
        self.types.compose(target)?;
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

impl fmt::Display for Nsec3 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            self.hash_algorithm, self.flags, self.iterations
        )?;
        write_salt(f, &self.salt)?;
        f.write_str(" ")?;
        write_base32hex(f, &self.next_owner)?;
        if !self.types.is_empty() {
            write!(f, " {}", self.types)?;
        }
        Ok(())
    }
}

//------------ Nsec3param ----------------------------------------------------

/// NSEC3PARAM record data.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Nsec3param {
    hash_algorithm: Nsec3HashAlg,
    flags: u8,
    iterations: u16,
    salt: Bytes,
}

impl Nsec3param {
    pub fn new(
        hash_algorithm: Nsec3HashAlg,
        flags: u8,
        iterations: u16,
        salt: impl Into<Bytes>,
    ) -> Result<Self, ComposeError> {
        let salt = salt.into();
        if salt.len() > 255 {
            return Err(ComposeError::LongData);
        }
        Ok(Nsec3param {
            hash_algorithm,
            flags,
            iterations,
            salt,
        })
    }

    #[must_use]
    pub fn hash_algorithm(&self) -> Nsec3HashAlg {
        self.hash_algorithm
    }

    #[must_use]
    pub fn flags(&self) -> u8 {
        self.flags
    }

    #[must_use]
    pub fn iterations(&self) -> u16 {
        self.iterations
    }

    #[must_use]
    pub fn salt(&self) -> &[u8] {
        self.salt.as_ref()
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        Ok(Nsec3param {
            hash_algorithm: Nsec3HashAlg::parse(parser)?,
            flags: parser.parse_u8()?,
            iterations: parser.parse_u16_be()?,
            salt: parse_u8_prefixed(parser)?.into(),
        })
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Nsec3param {
    fn rtype(&self) -> Rtype {
        Rtype::NSEC3PARAM
    }
}

impl ParseRecordData for Nsec3param {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::NSEC3PARAM {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Nsec3param {
    fn compose_len(&self) -> u16 {
        5 + self.salt.len() as u16
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.hash_algorithm.compose(target)?;
        target.append_slice(&[self.flags])?;
        target.append_slice(&self.iterations.to_be_bytes())?;
        compose_u8_prefixed(target, &self.salt)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.compose_rdata(target)
    }
}

//--- Display

impl fmt::Display for Nsec3param {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            self.hash_algorithm, self.flags, self.iterations
        )?;
        write_salt(f, &self.salt)
    }
}

//------------ Helpers -------------------------------------------------------

/// Writes the salt in hex or a dash if it is empty.
fn write_salt(f: &mut fmt::Formatter, salt: &[u8]) -> fmt::Result {
    if salt.is_empty() {
        f.write_str("-")
    } else {
        write_hex(f, salt)
    }
}

/// Writes octets in the base 32 encoding with extended hex alphabet.
///
/// This is the encoding of RFC 4648, section 7, without padding as used
/// for hashed owner names.
fn write_base32hex(f: &mut fmt::Formatter, data: &[u8]) -> fmt::Result {
    const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHIJKLMNOPQRSTUV";
    let mut acc = 0u16;
    let mut bits = 0;
    for &octet in data {
        acc = (acc << 8) | u16::from(octet);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            let idx = usize::from((acc >> bits) & 0x1F);
            write!(f, "{}", char::from(ALPHABET[idx]))?;
        }
        acc &= (1 << bits) - 1;
    }
    if bits > 0 {
        let idx = usize::from((acc << (5 - bits)) & 0x1F);
        write!(f, "{}", char::from(ALPHABET[idx]))?;
    }
    Ok(())
}

//============ Testing =======================================================
