//! Record data from [RFC 8945]: TSIG records.
//!
//! This RFC defines the TSIG record type used for signing DNS messages.
//! The actual signing and verification lives in the [`crate::tsig`]
//! module.
//!
//! [RFC 8945]: https://tools.ietf.org/html/rfc8945

use crate::base::iana::{Rtype, TsigRcode};
use crate::base::name::Name;
use crate::base::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use crate::base::wire::{
    compose_u16_prefixed, parse_u16_prefixed, ComposeError, Composer,
    ParseError, WireParser,
};
use bytes::Bytes;
use core::fmt;
use octseq::builder::OctetsBuilder;
use time::OffsetDateTime;

//------------ Tsig ----------------------------------------------------------

/// TSIG record data.
///
/// The algorithm name is never compressed, neither on output nor when
/// producing the data for the MAC.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Tsig {
    /// The signature algorithm as a domain name.
    algorithm: Name,

    /// The Unix epoch time at which the signature was created.
    time_signed: Time48,

    /// Seconds of error perimitted in time signed.
    fudge: u16,

    /// The message authentication code.
    mac: Bytes,

    /// Original message ID.
    original_id: u16,

    /// TSIG response code.
    error: TsigRcode,

    /// Other data.
    ///
    /// This is normally empty unless a BADTIME error happened. It then
    /// holds the server’s current time.
    other: Bytes,
}

impl Tsig {
    /// Creates a new TSIG record from its components.
    ///
    /// Fails if the MAC or the other data are longer than 65,535 octets.
    pub fn new(
        algorithm: Name,
        time_signed: Time48,
        fudge: u16,
        mac: impl Into<Bytes>,
        original_id: u16,
        error: TsigRcode,
        other: impl Into<Bytes>,
    ) -> Result<Self, ComposeError> {
        let mac = mac.into();
        let other = other.into();
        if mac.len() > usize::from(u16::MAX)
            || other.len() > usize::from(u16::MAX)
        {
            return Err(ComposeError::LongData);
        }
        Ok(Tsig {
            algorithm,
            time_signed,
            fudge,
            mac,
            original_id,
            error,
            other,
        })
    }

    /// Returns the algorithm name.
    ///
    /// TSIG encodes the algorithm used for keys and signatures as a domain
    /// name. It does, however, only use the format. No structure is used at
    /// all.
    #[must_use]
    pub fn algorithm(&self) -> &Name {
        &self.algorithm
    }

    /// Returns the Unix time when the signature was created.
    #[must_use]
    pub fn time_signed(&self) -> Time48 {
        self.time_signed
    }

    /// Returns the number of seconds of offset from signing time permitted.
    #[must_use]
    pub fn fudge(&self) -> u16 {
        self.fudge
    }

    #[must_use]
    pub fn mac(&self) -> &[u8] {
        self.mac.as_ref()
    }

    /// Returns the message ID of the message before it was signed.
    #[must_use]
    pub fn original_id(&self) -> u16 {
        self.original_id
    }

    #[must_use]
    pub fn error(&self) -> TsigRcode {
        self.error
    }

    #[must_use]
    pub fn other(&self) -> &[u8] {
        self.other.as_ref()
    }

    /// Returns the time in the other field if there is one.
    ///
    /// A server responding with BADTIME places its current time there.
    #[must_use]
    pub fn other_time(&self) -> Option<Time48> {
        if self.other.len() == 6 {
            Some(Time48::from_slice(&self.other))
        } else {
            None
        }
    }

    /// Returns whether `now` is within `fudge` seconds of the signing time.
    #[must_use]
    pub fn is_valid_at(&self, now: Time48) -> bool {
        now.eq_fudged(self.time_signed, self.fudge.into())
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        Ok(Tsig {
            algorithm: Name::parse(parser)?,
            time_signed: Time48::parse(parser)?,
            fudge: parser.parse_u16_be()?,
            mac: parse_u16_prefixed(parser)?.into(),
            original_id: parser.parse_u16_be()?,
            error: TsigRcode::parse(parser)?,
            other: parse_u16_prefixed(parser)?.into(),
        })
    }

    /// Appends the timer variables of the MAC computation.
    ///
    /// These are the time signed and the fudge.
    pub fn compose_timers<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.time_signed.compose(target)?;
        target.append_slice(&self.fudge.to_be_bytes())?;
        Ok(())
    }

    /// Appends the TSIG variables for the MAC computation.
    ///
    /// These are the algorithm name in canonical form, the timers, the
    /// error, and the other data.
    pub fn compose_variables<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.algorithm.compose_canonical(target)?;
        self.compose_timers(target)?;
        self.error.compose(target)?;
        compose_u16_prefixed(target, &self.other)
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Tsig {
    fn rtype(&self) -> Rtype {
        Rtype::TSIG
    }
}

impl ParseRecordData for Tsig {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::TSIG {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Tsig {
    fn compose_len(&self) -> u16 {
        self.algorithm.compose_len()
            + 16
            + self.mac.len() as u16
            + self.other.len() as u16
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.algorithm.compose(target)?;
        self.compose_timers(target)?;
        compose_u16_prefixed(target, &self.mac)?;
        target.append_slice(&self.original_id.to_be_bytes())?;
        self.error.compose(target)?;
        compose_u16_prefixed(target, &self.other)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.compose_rdata(target)
    }
}

//--- Display

impl fmt::Display for Tsig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}. {} {} {} {} {} {}",
            self.algorithm,
            self.time_signed,
            self.fudge,
            self.mac.len(),
            self.original_id,
            self.error,
            self.other.len()
        )
    }
}

//------------ Time48 --------------------------------------------------------

/// A 48-bit Unix timestamp.
///
/// Values are kept in a `u64` whose upper 16 bits are always zero.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
pub struct Time48(u64);

impl Time48 {
    const MASK: u64 = 0x0000_FFFF_FFFF_FFFF;

    /// Returns the timestamp of the current moment.
    ///
    /// A system clock set before the Unix epoch results in a value of
    /// zero.
    #[must_use]
    pub fn now() -> Time48 {
        let secs = OffsetDateTime::now_utc().unix_timestamp();
        Self::from_u64(u64::try_from(secs).unwrap_or(0))
    }

    /// Creates a value from a 64 bit integer.
    ///
    /// Only the lower 48 bits of the argument are used.
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Time48(value & Self::MASK)
    }

    /// Creates a value from the first six octets of a slice.
    fn from_slice(slice: &[u8]) -> Self {
        let mut buf = [0u8; 8];
        buf[2..].copy_from_slice(&slice[..6]);
        Time48(u64::from_be_bytes(buf))
    }

    /// Returns the octets of the encoded value in network byte order.
    #[must_use]
    pub fn into_octets(self) -> [u8; 6] {
        let mut res = [0u8; 6];
        res.copy_from_slice(&self.0.to_be_bytes()[2..]);
        res
    }

    /// Returns whether the time is within a given period.
    ///
    /// Returns `true` iff `other` is at most `fudge` seconds before or after
    /// this value’s time.
    #[must_use]
    pub fn eq_fudged(self, other: Self, fudge: u64) -> bool {
        self.0.saturating_sub(fudge) <= other.0
            && self.0.saturating_add(fudge) >= other.0
    }

    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        let mut buf = [0u8; 6];
        parser.parse_buf(&mut buf)?;
        Ok(Time48::from_slice(&buf))
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.into_octets())
    }
}

//--- From

impl From<Time48> for u64 {
    fn from(value: Time48) -> u64 {
        value.0
    }
}

//--- Display

impl fmt::Display for Time48 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//============ Testing =======================================================
