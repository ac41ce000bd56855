//! Record data from [RFC 4034]: DS, DNSKEY, RRSIG, and NSEC records.
//!
//! This RFC defines the record types for DNSSEC. The historical types KEY,
//! SIG, and NXT share their wire format with DNSKEY, RRSIG, and NSEC,
//! respectively, and use the same types here.
//!
//! [RFC 4034]: https://tools.ietf.org/html/rfc4034

use crate::base::iana::{DigestAlg, Rtype, SecAlg};
use crate::base::name::Name;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::record::Ttl;
use crate::base::wire::{
    parse_remaining, ComposeError, Composer, ParseError, WireParser,
};
use bytes::Bytes;
use core::cmp::Ordering;
use core::{fmt, str};
use octseq::builder::OctetsBuilder;
use time::OffsetDateTime;

//------------ Dnskey --------------------------------------------------------

/// DNSKEY record data.
///
/// Also used for the KEY record type of RFC 2535 which has the same wire
/// format.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Dnskey {
    flags: u16,
    protocol: u8,
    algorithm: SecAlg,
    public_key: Bytes,
}

impl Dnskey {
    /// The flags value of a zone signing key.
    pub const ZSK_FLAGS: u16 = 256;

    /// The flags value of a key signing key.
    pub const KSK_FLAGS: u16 = 257;

    /// Creates new DNSKEY record data.
    ///
    /// Fails if the public key would make the record data too long.
    pub fn new(
        flags: u16,
        protocol: u8,
        algorithm: SecAlg,
        public_key: impl Into<Bytes>,
    ) -> Result<Self, ComposeError> {
        let public_key = public_key.into();
        if public_key.len() > usize::from(u16::MAX) - 4 {
            return Err(ComposeError::LongData);
        }
        Ok(Dnskey {
            flags,
            protocol,
            algorithm,
            public_key,
        })
    }

    #[must_use]
    pub fn flags(&self) -> u16 {
        self.flags
    }

    #[must_use]
    pub fn protocol(&self) -> u8 {
        self.protocol
    }

    #[must_use]
    pub fn algorithm(&self) -> SecAlg {
        self.algorithm
    }

    #[must_use]
    pub fn public_key(&self) -> &[u8] {
        self.public_key.as_ref()
    }

    /// Returns whether the Revoke flag is set.
    ///
    /// See [RFC 5011, Section 3].
    ///
    /// [RFC 5011, Section 3]: https://tools.ietf.org/html/rfc5011#section-3
    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.flags & 0b0000_0000_1000_0000 != 0
    }

    /// Returns whether the the Secure Entry Point (SEP) flag is set.
    ///
    /// See [RFC 4034, Section 2.1.1].
    ///
    /// [RFC 4034, Section 2.1.1]: https://tools.ietf.org/html/rfc4034#section-2.1.1
    #[must_use]
    pub fn is_secure_entry_point(&self) -> bool {
        self.flags & 0b0000_0000_0000_0001 != 0
    }

    /// Returns whether the Zone Key flag is set.
    #[must_use]
    pub fn is_zone_key(&self) -> bool {
        self.flags & 0b0000_0001_0000_0000 != 0
    }

    /// Returns the key tag for this DNSKEY data.
    ///
    /// This is the checksum of [RFC 4034, Appendix B] over the record
    /// data. For the obsolete RSAMD5 algorithm, it is taken from the
    /// public key instead.
    ///
    /// [RFC 4034, Appendix B]: https://tools.ietf.org/html/rfc4034#appendix-B
    #[must_use]
    pub fn key_tag(&self) -> u16 {
        if self.algorithm == SecAlg::RSAMD5 {
            let key = self.public_key.as_ref();
            let len = key.len();
            if len > 2 {
                u16::from_be_bytes([key[len - 3], key[len - 2]])
            } else {
                0
            }
        } else {
            // Octets at even positions of the record data are the high
            // octet, those at odd positions the low octet.
            let mut res = u32::from(self.flags);
            res += u32::from(self.protocol) << 8;
            res += u32::from(self.algorithm.to_int());
            for chunk in self.public_key.chunks(2) {
                res += u32::from(chunk[0]) << 8;
                if let Some(&low) = chunk.get(1) {
                    res += u32::from(low);
                }
            }
            res += (res >> 16) & 0xFFFF;
            (res & 0xFFFF) as u16
        }
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        let flags = parser.parse_u16_be()?;
        let protocol = parser.parse_u8()?;
        let algorithm = SecAlg::parse(parser)?;
        Ok(Dnskey {
            flags,
            protocol,
            algorithm,
            public_key: parse_remaining(parser).into(),
        })
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Dnskey {
    fn rtype(&self) -> Rtype {
        Rtype::DNSKEY
    }
}

impl ParseRecordData for Dnskey {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::DNSKEY || rtype == Rtype::KEY {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Dnskey {
    fn compose_len(&self) -> u16 {
        4 + self.public_key.len() as u16
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_slice(&self.flags.to_be_bytes())?;
        target.append_slice(&[self.protocol])?;
        self.algorithm.compose(target)?;
        target.append_slice(&self.public_key)?;
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

impl fmt::Display for Dnskey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} ", self.flags, self.protocol, self.algorithm)?;
        write_hex(f, &self.public_key)
    }
}

//------------ ProtoRrsig ----------------------------------------------------

/// The RRSIG record data to be included when creating the signature.
///
/// This is everything but the signature itself. Its canonical form starts
/// the data over which the signature is calculated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtoRrsig {
    type_covered: Rtype,
    algorithm: SecAlg,
    labels: u8,
    original_ttl: Ttl,
    expiration: Timestamp,
    inception: Timestamp,
    key_tag: u16,
    signer_name: Name,
}

impl ProtoRrsig {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        type_covered: Rtype,
        algorithm: SecAlg,
        labels: u8,
        original_ttl: Ttl,
        expiration: Timestamp,
        inception: Timestamp,
        key_tag: u16,
        signer_name: Name,
    ) -> Self {
        ProtoRrsig {
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
        }
    }

    /// Adds the signature, producing the complete record data.
    pub fn into_rrsig(
        self,
        signature: impl Into<Bytes>,
    ) -> Result<Rrsig, ComposeError> {
        let signature = signature.into();
        if usize::from(self.head_len()) + signature.len()
            > usize::from(u16::MAX)
        {
            return Err(ComposeError::LongData);
        }
        Ok(Rrsig {
            proto: self,
            signature,
        })
    }

    /// Appends the canonical form used as the start of the signed data.
    pub fn compose_canonical<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.compose_head(target)?;
        self.signer_name.compose_canonical(target)?;
        Ok(())
    }

    fn head_len(&self) -> u16 {
        18 + self.signer_name.compose_len()
    }

    fn compose_head<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.type_covered.compose(target)?;
        self.algorithm.compose(target)?;
        target.append_slice(&[self.labels])?;
        self.original_ttl.compose(target)?;
        self.expiration.compose(target)?;
        self.inception.compose(target)?;
        target.append_slice(&self.key_tag.to_be_bytes())?;
        Ok(())
    }
}

//------------ Rrsig ---------------------------------------------------------

/// RRSIG record data.
///
/// Also used for the SIG record type of RFC 2535 which has the same wire
/// format. The signer name is never compressed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rrsig {
    proto: ProtoRrsig,
    signature: Bytes,
}

impl Rrsig {
    /// Creates new RRSIG record data from its components.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        type_covered: Rtype,
        algorithm: SecAlg,
        labels: u8,
        original_ttl: Ttl,
        expiration: Timestamp,
        inception: Timestamp,
        key_tag: u16,
        signer_name: Name,
        signature: impl Into<Bytes>,
    ) -> Result<Self, ComposeError> {
        ProtoRrsig::new(
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
        )
        .into_rrsig(signature)
    }

    #[must_use]
    pub fn type_covered(&self) -> Rtype {
        self.proto.type_covered
    }

    #[must_use]
    pub fn algorithm(&self) -> SecAlg {
        self.proto.algorithm
    }

    #[must_use]
    pub fn labels(&self) -> u8 {
        self.proto.labels
    }

    #[must_use]
    pub fn original_ttl(&self) -> Ttl {
        self.proto.original_ttl
    }

    #[must_use]
    pub fn expiration(&self) -> Timestamp {
        self.proto.expiration
    }

    #[must_use]
    pub fn inception(&self) -> Timestamp {
        self.proto.inception
    }

    #[must_use]
    pub fn key_tag(&self) -> u16 {
        self.proto.key_tag
    }

    #[must_use]
    pub fn signer_name(&self) -> &Name {
        &self.proto.signer_name
    }

    #[must_use]
    pub fn signature(&self) -> &[u8] {
        self.signature.as_ref()
    }

    /// Returns the record data without the signature.
    #[must_use]
    pub fn proto(&self) -> &ProtoRrsig {
        &self.proto
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        let proto = ProtoRrsig::new(
            Rtype::parse(parser)?,
            SecAlg::parse(parser)?,
            parser.parse_u8()?,
            Ttl::from_secs(parser.parse_u32_be()?),
            Timestamp::parse(parser)?,
            Timestamp::parse(parser)?,
            parser.parse_u16_be()?,
            Name::parse(parser)?,
        );
        Ok(Rrsig {
            proto,
            signature: parse_remaining(parser).into(),
        })
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Rrsig {
    fn rtype(&self) -> Rtype {
        Rtype::RRSIG
    }
}

impl ParseRecordData for Rrsig {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::RRSIG || rtype == Rtype::SIG {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Rrsig {
    fn compose_len(&self) -> u16 {
        self.proto.head_len() + self.signature.len() as u16
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.proto.compose_head(target)?;
        self.proto.signer_name.compose(target)?;
        target.append_slice(&self.signature)?;
        Ok(())
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.proto.compose_canonical(target)?;
        target.append_slice(&self.signature)?;
        Ok(())
    }
}

//--- Display

impl fmt::Display for Rrsig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {}. ",
            self.proto.type_covered,
            self.proto.algorithm,
            self.proto.labels,
            self.proto.original_ttl.as_secs(),
            self.proto.expiration,
            self.proto.inception,
            self.proto.key_tag,
            self.proto.signer_name
        )?;
        write_hex(f, &self.signature)
    }
}

//------------ Nsec ----------------------------------------------------------

/// NSEC record data.
///
/// Also used for the NXT record type of RFC 2535.
///
/// The next owner name is never compressed. Following RFC 6840, section
/// 5.1, it is not lowercased in the canonical form either.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Nsec {
    next_name: Name,
    types: RtypeBitmap,
}

impl Nsec {
    #[must_use]
    pub fn new(next_name: Name, types: RtypeBitmap) -> Self {
        Nsec { next_name, types }
    }

    #[must_use]
    pub fn next_name(&self) -> &Name {
        &self.next_name
    }

    pub fn set_next_name(&mut self, next_name: Name) {
        self.next_name = next_name
    }

    #[must_use]
    pub fn types(&self) -> &RtypeBitmap {
        &self.types
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        Ok(Nsec::new(Name::parse(parser)?, RtypeBitmap::parse(parser)?))
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Nsec {
    fn rtype(&self) -> Rtype {
        Rtype::NSEC
    }
}

impl ParseRecordData for Nsec {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::NSEC || rtype == Rtype::NXT {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Nsec {
    fn compose_len(&self) -> u16 {
        self.next_name.compose_len() + self.types.compose_len()
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.next_name.compose(target)?;
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

impl fmt::Display for Nsec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}. {}", self.next_name, self.types)
    }
}

//------------ Ds -----------------------------------------------------------

/// DS record data.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Ds {
    key_tag: u16,
    algorithm: SecAlg,
    digest_type: DigestAlg,
    digest: Bytes,
}

impl Ds {
    pub fn new(
        key_tag: u16,
        algorithm: SecAlg,
        digest_type: DigestAlg,
        digest: impl Into<Bytes>,
    ) -> Result<Self, ComposeError> {
        let digest = digest.into();
        if digest.len() > usize::from(u16::MAX) - 4 {
            return Err(ComposeError::LongData);
        }
        Ok(Ds {
            key_tag,
            algorithm,
            digest_type,
            digest,
        })
    }

    #[must_use]
    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    #[must_use]
    pub fn algorithm(&self) -> SecAlg {
        self.algorithm
    }

    #[must_use]
    pub fn digest_type(&self) -> DigestAlg {
        self.digest_type
    }

    #[must_use]
    pub fn digest(&self) -> &[u8] {
        self.digest.as_ref()
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        Ok(Ds {
            key_tag: parser.parse_u16_be()?,
            algorithm: SecAlg::parse(parser)?,
            digest_type: DigestAlg::parse(parser)?,
            digest: parse_remaining(parser).into(),
        })
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Ds {
    fn rtype(&self) -> Rtype {
        Rtype::DS
    }
}

impl ParseRecordData for Ds {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::DS {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Ds {
    fn compose_len(&self) -> u16 {
        4 + self.digest.len() as u16
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_slice(&self.key_tag.to_be_bytes())?;
        self.algorithm.compose(target)?;
        self.digest_type.compose(target)?;
        target.append_slice(&self.digest)?;
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

impl fmt::Display for Ds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            self.key_tag, self.algorithm, self.digest_type
        )?;
        write_hex(f, &self.digest)
    }
}

//------------ Timestamp -----------------------------------------------------

/// A timestamp for RRSIG records.
///
/// [RFC 4034] defines timestamps as the number of seconds elapsed since
/// 1 January 1970 00:00:00 UTC, ignoring leap seconds, modulo 2^32.
/// Timestamps are compared using serial number arithmetic as defined in
/// [RFC 1982], so they only implement a partial ordering.
///
/// [RFC 1982]: https://tools.ietf.org/html/rfc1982
/// [RFC 4034]: https://tools.ietf.org/html/rfc4034
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u32", into = "u32"))]
pub struct Timestamp(u32);

impl Timestamp {
    /// The length of the wire format.
    pub const COMPOSE_LEN: u16 = 4;

    /// Returns a timestamp for the current Unix time.
    #[must_use]
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc().unix_timestamp() as u32)
    }

    /// Returns the timestamp as a raw integer.
    #[must_use]
    pub fn into_int(self) -> u32 {
        self.0
    }

    /// Adds a number of seconds, wrapping around.
    #[must_use]
    pub fn add(self, secs: u32) -> Self {
        Self(self.0.wrapping_add(secs))
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        Ok(Self(parser.parse_u32_be()?))
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.0.to_be_bytes())
    }
}

//--- From

impl From<u32> for Timestamp {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Timestamp> for u32 {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

//--- PartialOrd

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.0 == other.0 {
            Some(Ordering::Equal)
        } else if self.0 < other.0 && other.0 - self.0 < 0x8000_0000
            || self.0 > other.0 && self.0 - other.0 > 0x8000_0000
        {
            Some(Ordering::Less)
        } else if self.0 < other.0 && other.0 - self.0 > 0x8000_0000
            || self.0 > other.0 && self.0 - other.0 < 0x8000_0000
        {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

//--- Display

impl fmt::Display for Timestamp {
    /// Formats the timestamp in the `YYYYMMDDHHmmSS` format.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match OffsetDateTime::from_unix_timestamp(i64::from(self.0)) {
            Ok(time) => write!(
                f,
                "{:04}{:02}{:02}{:02}{:02}{:02}",
                time.year(),
                u8::from(time.month()),
                time.day(),
                time.hour(),
                time.minute(),
                time.second()
            ),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

//------------ RtypeBitmap ---------------------------------------------------

/// The set of record types present at a name, as used by NSEC and NSEC3.
///
/// The wire format consists of windows, each covering 256 record types.
/// A window starts with its number and the length of its bitmap, followed
/// by the bitmap of at most 32 octets with the most significant bit of the
/// first octet for the first type of the window. Windows appear in
/// ascending order and each bitmap is trimmed after its last non-zero
/// octet.
///
/// Values are created with a [`RtypeBitmapBuilder`] or parsed from the
/// wire. Both ensure that the format is valid.
#[derive(Clone, Default, Eq, Hash, PartialEq)]
pub struct RtypeBitmap(Bytes);

impl RtypeBitmap {
    /// Creates a bitmap from its wire format, checking it.
    ///
    /// Windows with a bitmap length of zero or more than 32 octets and
    /// windows out of order result in [`ParseError::MalformedBitmap`].
    pub fn from_octets(octets: impl Into<Bytes>) -> Result<Self, ParseError> {
        let octets = octets.into();
        {
            let mut data = octets.as_ref();
            let mut last = None;
            while !data.is_empty() {
                if data.len() < 2 {
                    return Err(ParseError::ShortInput);
                }
                let window = data[0];
                let len = usize::from(data[1]);
                if len == 0 || len > 32 {
                    return Err(ParseError::MalformedBitmap);
                }
                if last.map_or(false, |last| window <= last) {
                    return Err(ParseError::MalformedBitmap);
                }
                if data.len() < len + 2 {
                    return Err(ParseError::ShortInput);
                }
                last = Some(window);
                data = &data[len + 2..];
            }
        }
        Ok(RtypeBitmap(octets))
    }

    /// Creates a bitmap containing the given record types.
    pub fn from_rtypes(rtypes: impl IntoIterator<Item = Rtype>) -> Self {
        let mut builder = RtypeBitmapBuilder::new();
        for rtype in rtypes {
            builder.add(rtype);
        }
        builder.finalize()
    }

    /// Returns a new builder for a bitmap.
    #[must_use]
    pub fn builder() -> RtypeBitmapBuilder {
        RtypeBitmapBuilder::new()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the record types in ascending order.
    pub fn iter(&self) -> RtypeBitmapIter {
        RtypeBitmapIter::new(self.0.as_ref())
    }

    /// Returns whether the bitmap contains the record type.
    #[must_use]
    pub fn contains(&self, rtype: Rtype) -> bool {
        let (block, octet, mask) = split_rtype(rtype);
        let mut data = self.0.as_ref();
        while data.len() > 2 {
            let len = usize::from(data[1]);
            if data[0] == block {
                return data[2..2 + len]
                    .get(octet)
                    .map_or(false, |value| value & mask != 0);
            }
            data = &data[len + 2..];
        }
        false
    }

    /// Takes the remaining data of the parser as a bitmap.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        Self::from_octets(parse_remaining(parser))
    }

    #[must_use]
    pub fn compose_len(&self) -> u16 {
        self.0.len() as u16
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(self.0.as_ref())
    }
}

//--- IntoIterator

impl<'a> IntoIterator for &'a RtypeBitmap {
    type Item = Rtype;
    type IntoIter = RtypeBitmapIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//--- Display and Debug

impl fmt::Display for RtypeBitmap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut iter = self.iter();
        if let Some(rtype) = iter.next() {
            write!(f, "{}", rtype)?;
        }
        for rtype in iter {
            write!(f, " {}", rtype)?;
        }
        Ok(())
    }
}

impl fmt::Debug for RtypeBitmap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("RtypeBitmap(")?;
        fmt::Display::fmt(self, f)?;
        f.write_str(")")
    }
}

//------------ RtypeBitmapBuilder --------------------------------------------

/// A builder for a record type bitmap.
//
//  The buffer contains a sequence of blocks encoded similarly to the final
//  format but with all 32 octets of the bitmap present. Blocks are kept in
//  order and only added when needed, possibly in the middle. Finalizing
//  drops the unused octets at the end of each block.
#[derive(Clone, Debug, Default)]
pub struct RtypeBitmapBuilder {
    buf: Vec<u8>,
}

impl RtypeBitmapBuilder {
    #[must_use]
    pub fn new() -> Self {
        RtypeBitmapBuilder {
            buf: Vec::with_capacity(34),
        }
    }

    /// Adds a record type to the bitmap.
    pub fn add(&mut self, rtype: Rtype) {
        let (block, octet, bit) = split_rtype(rtype);
        let block = self.get_block(block);
        if usize::from(block[1]) < octet + 1 {
            block[1] = (octet + 1) as u8
        }
        block[octet + 2] |= bit;
    }

    fn get_block(&mut self, block: u8) -> &mut [u8] {
        let mut pos = 0;
        while pos < self.buf.len() {
            match self.buf[pos].cmp(&block) {
                Ordering::Equal => return &mut self.buf[pos..pos + 34],
                Ordering::Greater => {
                    let len = self.buf.len();
                    self.buf.extend_from_slice(&[0; 34]);
                    self.buf.copy_within(pos..len, pos + 34);
                    self.buf[pos..pos + 34].fill(0);
                    self.buf[pos] = block;
                    return &mut self.buf[pos..pos + 34];
                }
                Ordering::Less => pos += 34,
            }
        }
        self.buf.extend_from_slice(&[0; 34]);
        self.buf[pos] = block;
        &mut self.buf[pos..pos + 34]
    }

    /// Produces the bitmap.
    #[must_use]
    pub fn finalize(mut self) -> RtypeBitmap {
        let mut dst_pos = 0;
        for src_pos in (0..self.buf.len()).step_by(34) {
            let chunk_len = usize::from(self.buf[src_pos + 1]) + 2;
            self.buf.copy_within(src_pos..src_pos + chunk_len, dst_pos);
            dst_pos += chunk_len;
        }
        self.buf.truncate(dst_pos);
        RtypeBitmap(self.buf.into())
    }
}

//------------ RtypeBitmapIter -----------------------------------------------

/// An iterator over the record types in a bitmap.
#[derive(Clone, Debug)]
pub struct RtypeBitmapIter<'a> {
    /// The windows not yet started.
    data: &'a [u8],

    /// The number of the current window.
    window: u8,

    /// The bitmap of the current window.
    bitmap: &'a [u8],

    /// The position of the next bit to check in the current window.
    pos: usize,
}

impl<'a> RtypeBitmapIter<'a> {
    fn new(data: &'a [u8]) -> Self {
        RtypeBitmapIter {
            data,
            window: 0,
            bitmap: &[],
            pos: 0,
        }
    }
}

impl<'a> Iterator for RtypeBitmapIter<'a> {
    type Item = Rtype;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while self.pos < self.bitmap.len() * 8 {
                let pos = self.pos;
                self.pos += 1;
                if self.bitmap[pos >> 3] & (0x80 >> (pos & 0x07)) != 0 {
                    return Some(Rtype::from_int(
                        u16::from(self.window) << 8 | pos as u16,
                    ));
                }
            }
            // Windows were checked when the bitmap was created.
            if self.data.len() < 2 {
                return None;
            }
            let len = usize::from(self.data[1]);
            self.window = self.data[0];
            self.bitmap = &self.data[2..2 + len];
            self.data = &self.data[2 + len..];
            self.pos = 0;
        }
    }
}

//============ Friendly Helper Functions =====================================

/// Splits an Rtype value into window number, octet number, and octet mask.
fn split_rtype(rtype: Rtype) -> (u8, usize, u8) {
    let rtype = rtype.to_int();
    (
        (rtype >> 8) as u8,
        ((rtype & 0xFF) >> 3) as usize,
        0b1000_0000 >> (rtype & 0x07),
    )
}

/// Writes octets as upper case hex digits.
pub(super) fn write_hex(f: &mut fmt::Formatter, data: &[u8]) -> fmt::Result {
    for ch in data {
        write!(f, "{:02X}", ch)?;
    }
    Ok(())
}

//============ Test ==========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_len, test_compose_parse};
    use core::str::FromStr;

    #[test]
    fn rtype_bitmap_windows() {
        let bitmap = RtypeBitmap::from_rtypes([
            Rtype::from_int(1),
            Rtype::from_int(2),
            Rtype::from_int(15),
            Rtype::from_int(65535),
        ]);
        let mut expected = vec![0x00, 0x02, 0x60, 0x01, 0xFF, 0x20];
        expected.extend_from_slice(&[0; 31]);
        expected.push(0x01);
        assert_eq!(bitmap.as_slice(), expected.as_slice());

        let parsed = RtypeBitmap::from_octets(expected).unwrap();
        assert_eq!(
            parsed.iter().map(Rtype::to_int).collect::<Vec<_>>(),
            [1, 2, 15, 65535]
        );
        assert!(parsed.contains(Rtype::NS));
        assert!(!parsed.contains(Rtype::SOA));
        assert!(parsed.contains(Rtype::from_int(65535)));
    }

    #[test]
    fn rtype_bitmap_builder_order() {
        let mut builder = RtypeBitmap::builder();
        builder.add(Rtype::CAA);
        builder.add(Rtype::A);
        builder.add(Rtype::RRSIG);
        builder.add(Rtype::A);
        let bitmap = builder.finalize();
        assert_eq!(
            bitmap.iter().collect::<Vec<_>>(),
            [Rtype::A, Rtype::RRSIG, Rtype::CAA]
        );
        assert_eq!(bitmap.to_string(), "A RRSIG CAA");
    }

    #[test]
    fn rtype_bitmap_malformed() {
        assert_eq!(
            RtypeBitmap::from_octets(&b"\x00\x00"[..]),
            Err(ParseError::MalformedBitmap)
        );
        let mut long = vec![0x00, 33];
        long.extend_from_slice(&[0xFF; 33]);
        assert_eq!(
            RtypeBitmap::from_octets(long),
            Err(ParseError::MalformedBitmap)
        );
        assert_eq!(
            RtypeBitmap::from_octets(&b"\x01\x01\x40\x00\x01\x40"[..]),
            Err(ParseError::MalformedBitmap)
        );
        assert_eq!(
            RtypeBitmap::from_octets(&b"\x00\x02\x40"[..]),
            Err(ParseError::ShortInput)
        );
        assert!(RtypeBitmap::from_octets(Bytes::new()).unwrap().is_empty());
    }

    #[test]
    fn dnskey_key_tag() {
        // The root KSK-2017.
        let key = Dnskey::new(
            257,
            3,
            SecAlg::RSASHA256,
            decode_hex(
                "03010001acffb409bcc939f831f7a1e5ec88f7a59255ec53040be432027390a4\
                 ce896d6f9086f3c5e177fbfe118163aaec7af1462c47945944c4e2c026be5e98\
                 bbcded25978272e1e3e079c5094d573f0e83c92f02b32d3513b1550b826929c8\
                 0dd0f92cac966d17769fd5867b647c3f38029abdc48152eb8f207159ecc5d232\
                 c7c1537c79f4b7ac28ff11682f21681bf6d6aba555032bf6f9f036beb2aaa5b3\
                 778d6eebfba6bf9ea191be4ab0caea759e2f773a1f9029c73ecb8d5735b9321d\
                 b085f1b8e2d8038fe2941992548cee0d67dd4547e11dd63af9c9fc1c5466fb68\
                 4cf009d7197c2cf79e792ab501e6a8a1ca519af2cb9b5f6367e94c0d47502451\
                 357be1b5",
            ),
        )
        .unwrap();
        assert_eq!(key.key_tag(), 20326);
        test_compose_len(key.clone());
        test_compose_parse(&key, Dnskey::parse);
    }

    #[test]
    fn rrsig_compose_parse() {
        let rdata = Rrsig::new(
            Rtype::A,
            SecAlg::ECDSAP256SHA256,
            2,
            Ttl::HOUR,
            Timestamp::from(1_700_086_400),
            Timestamp::from(1_700_000_000),
            12345,
            Name::from_str("Example.com").unwrap(),
            vec![1, 2, 3, 4],
        )
        .unwrap();
        test_compose_len(rdata.clone());
        test_compose_parse(&rdata, Rrsig::parse);

        let mut buf = Vec::new();
        rdata.compose_canonical_rdata(&mut buf).unwrap();
        assert_eq!(&buf[18..31], b"\x07example\x03com\x00");
    }

    #[test]
    fn nsec_canonical_keeps_case() {
        let rdata = Nsec::new(
            Name::from_str("Host.example.com").unwrap(),
            RtypeBitmap::from_rtypes([Rtype::A, Rtype::NSEC]),
        );
        test_compose_len(rdata.clone());
        test_compose_parse(&rdata, Nsec::parse);
        let mut canonical = Vec::new();
        rdata.compose_canonical_rdata(&mut canonical).unwrap();
        assert!(canonical.starts_with(b"\x04Host"));
    }

    #[test]
    fn ds_compose_parse() {
        let rdata =
            Ds::new(60485, SecAlg::RSASHA1, DigestAlg::SHA1, vec![0xAB; 20])
                .unwrap();
        test_compose_len(rdata.clone());
        test_compose_parse(&rdata, Ds::parse);
    }

    #[test]
    fn timestamp_ordering() {
        let early = Timestamp::from(0xFFFF_FF00);
        let late = early.add(0x200);
        assert_eq!(late.into_int(), 0x100);
        assert!(early < late);
        assert_eq!(
            Timestamp::from(0).partial_cmp(&Timestamp::from(0x8000_0000)),
            None
        );
        assert_eq!(Timestamp::from(0).to_string(), "19700101000000");
    }

    fn decode_hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }
}
