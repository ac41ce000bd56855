//! Resource Records.
//!
//! This module defines types related to DNS resource records. The most
//! complete one is [`Record`] which contains a complete record for a certain
//! record type. [`Ttl`] is the record’s time-to-live.

use super::iana::{Class, Rtype};
use super::name::Name;
use super::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use super::wire::{
    ComposeError, Composer, FormError, ParseError, WireParser,
};
use core::fmt;
use core::time::Duration;

//------------ Record --------------------------------------------------------

/// A DNS resource record.
///
/// All information available through the DNS is stored in resource records.
/// They have a three part key of a domain name, resource record type, and
/// class. Data is arranged in a tree which is navigated using the domain
/// name. Each node in the tree carries a label, starting with the root
/// label as the top-most node. The tree is traversed by stepping through the
/// name from right to left, finding a child node carring the label of each
/// step.
///
/// Records also carry a time-to-live value used by caches and the record
/// data which is generic over the type `Data`. The record type is taken
/// from the data via the [`RecordData`] trait.
///
/// A record exclusively owns its data. Cloning a record clones the data.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Record<Data> {
    /// The owner of the record.
    owner: Name,

    /// The class of the record.
    class: Class,

    /// The time-to-live value of the record.
    ttl: Ttl,

    /// The record data. The value also specifies the record’s type.
    data: Data,
}

/// # Creation and Element Access
///
impl<Data> Record<Data> {
    /// Creates a new record from its parts.
    pub fn new(owner: Name, class: Class, ttl: Ttl, data: Data) -> Self {
        Record {
            owner,
            class,
            ttl,
            data,
        }
    }

    /// Returns a reference to the owner domain name.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Rtype
    where
        Data: RecordData,
    {
        self.data.rtype()
    }

    /// Returns the record class.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Sets the record’s class.
    pub fn set_class(&mut self, class: Class) {
        self.class = class
    }

    /// Returns the record’s time-to-live.
    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Sets the record’s time-to-live.
    pub fn set_ttl(&mut self, ttl: Ttl) {
        self.ttl = ttl
    }

    /// Return a reference to the record data.
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Returns a mutable reference to the record data.
    pub fn data_mut(&mut self) -> &mut Data {
        &mut self.data
    }

    /// Trades the record for its record data.
    pub fn into_data(self) -> Data {
        self.data
    }

    /// Trades the record for its owner name and data.
    pub fn into_owner_and_data(self) -> (Name, Data) {
        (self.owner, self.data)
    }
}

/// # Parsing and Composing
///
impl<Data: ParseRecordData> Record<Data> {
    /// Takes a record from the parser.
    ///
    /// Returns `Ok(None)` if `Data` doesn’t want to parse data for the
    /// record’s type. The record is skipped in this case. Running out of
    /// data in the fixed part of the record results in
    /// [`ParseError::TruncatedRecord`], running out of data while parsing
    /// the record data or a record data length beyond the end of the
    /// message in [`ParseError::TruncatedRecordData`].
    pub fn parse(parser: &mut WireParser) -> Result<Option<Self>, ParseError> {
        let header = RecordHeader::parse(parser)?;
        header.parse_into_record(parser)
    }
}

impl<Data: ComposeRecordData> Record<Data> {
    /// Appends the record to the target.
    ///
    /// The owner name is compressed if the target supports it.
    pub fn compose<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_compressed_name(&self.owner)?;
        self.data.rtype().compose(target)?;
        self.class.compose(target)?;
        self.ttl.compose(target)?;
        self.data.compose_len_rdata(target)
    }

    /// Appends the canonical form of the record to the target.
    ///
    /// This is the form of RFC 4034, section 6.2, with the owner name and
    /// names in the record data lowercased and nothing compressed.
    pub fn compose_canonical<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.owner.compose_canonical(target)?;
        self.data.rtype().compose(target)?;
        self.class.compose(target)?;
        self.ttl.compose(target)?;
        self.data.compose_canonical_len_rdata(target)
    }
}

//--- Display

impl<Data: RecordData + fmt::Display> fmt::Display for Record<Data> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}.\t{}\t{}\t{}\t{}",
            self.owner,
            self.ttl.as_secs(),
            self.class,
            self.data.rtype(),
            self.data
        )
    }
}

//------------ RecordHeader --------------------------------------------------

/// The header of a resource record.
///
/// This type contains everything of a record before the actual data: the
/// owner, type, class, time-to-live, and record data length.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordHeader {
    owner: Name,
    rtype: Rtype,
    class: Class,
    ttl: Ttl,
    rdlen: u16,
}

impl RecordHeader {
    /// Takes the header of a record from the parser.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        Self::parse_inner(parser)
            .map_err(|err| err.or_short(ParseError::TruncatedRecord))
    }

    fn parse_inner(parser: &mut WireParser) -> Result<Self, ParseError> {
        Ok(RecordHeader {
            owner: Name::parse(parser)?,
            rtype: Rtype::parse(parser)?,
            class: Class::parse(parser)?,
            ttl: Ttl::parse(parser)?,
            rdlen: parser.parse_u16_be()?,
        })
    }

    /// Skips over a complete record including its data.
    pub fn skip_record(parser: &mut WireParser) -> Result<(), ParseError> {
        let res = Name::skip(parser).and_then(|_| {
            parser.advance(8)?;
            Ok(parser.parse_u16_be()?)
        });
        let rdlen = res.map_err(|err| err.or_short(ParseError::TruncatedRecord))?;
        parser
            .advance(usize::from(rdlen))
            .map_err(|_| ParseError::TruncatedRecordData)
    }

    /// Returns the owner of the record.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the record type of the record.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns the class of the record.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the TTL of the record.
    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Returns the data length of the record.
    pub fn rdlen(&self) -> u16 {
        self.rdlen
    }

    /// Parses the record data following the header into a record.
    ///
    /// The parser must be positioned right after the header.
    pub fn parse_into_record<Data: ParseRecordData>(
        self,
        parser: &mut WireParser,
    ) -> Result<Option<Record<Data>>, ParseError> {
        let rdlen = usize::from(self.rdlen);
        if parser.remaining() < rdlen {
            return Err(ParseError::TruncatedRecordData);
        }
        let mut rdata = parser.parse_parser(rdlen)?;
        let data = Data::parse_rdata(self.rtype, &mut rdata)
            .map_err(|err| err.or_short(ParseError::TruncatedRecordData))?;
        match data {
            Some(data) => {
                if rdata.remaining() != 0 {
                    return Err(FormError::new("trailing record data").into());
                }
                Ok(Some(Record::new(self.owner, self.class, self.ttl, data)))
            }
            None => Ok(None),
        }
    }
}

//------------ Ttl ----------------------------------------------------------

/// A span of time, typically used to describe the time a given DNS record
/// is valid.
///
/// On the wire, the TTL is an unsigned 32 bit number of seconds. Values
/// with the most significant bit set are treated as zero when parsed, as
/// required by RFC 2181, section 8.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
pub struct Ttl(u32);

impl Ttl {
    /// A time-to-live of one second.
    pub const SECOND: Ttl = Ttl::from_secs(1);

    /// A time-to-live of one hour.
    pub const HOUR: Ttl = Ttl::from_secs(3600);

    /// A time-to-live of one day.
    pub const DAY: Ttl = Ttl::from_secs(86400);

    /// A duration of zero time.
    pub const ZERO: Ttl = Ttl::from_secs(0);

    /// The maximum time to live that can be transmitted.
    pub const MAX: Ttl = Ttl::from_secs(i32::MAX as u32);

    /// Creates a new `Ttl` from the specified number of seconds.
    #[must_use]
    pub const fn from_secs(secs: u32) -> Self {
        Ttl(secs)
    }

    /// Returns the total time to live in seconds.
    #[must_use]
    pub const fn as_secs(self) -> u32 {
        self.0
    }

    /// Converts the TTL into a `Duration`.
    #[must_use]
    pub fn into_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }

    /// Takes a TTL from the parser.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        let value = parser.parse_i32_be()?;
        Ok(Ttl(u32::try_from(value).unwrap_or(0)))
    }

    pub fn compose<Target: octseq::builder::OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.0.to_be_bytes())
    }
}

impl From<Duration> for Ttl {
    fn from(duration: Duration) -> Self {
        Ttl(u32::try_from(duration.as_secs()).unwrap_or(u32::MAX))
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::UnknownRecordData;
    use core::str::FromStr;

    #[test]
    fn negative_ttl_is_zero() {
        let mut parser = WireParser::from_ref(b"\xFF\xFF\xFF\xF0".as_ref());
        assert_eq!(Ttl::parse(&mut parser).unwrap(), Ttl::ZERO);
        let mut parser = WireParser::from_ref(b"\x00\x00\x0E\x10".as_ref());
        assert_eq!(Ttl::parse(&mut parser).unwrap(), Ttl::HOUR);
    }

    #[test]
    fn parse_and_compose() {
        let data = b"\x03www\x00\xFF\x00\x00\x01\x00\x00\x0E\x10\x00\x02ab";
        let mut parser = WireParser::from_ref(data.as_ref());
        let record = Record::<UnknownRecordData>::parse(&mut parser)
            .unwrap()
            .unwrap();
        assert_eq!(record.owner(), &Name::from_str("www").unwrap());
        assert_eq!(record.rtype(), Rtype::from_int(0xFF00));
        assert_eq!(record.class(), Class::IN);
        assert_eq!(record.ttl(), Ttl::HOUR);
        assert_eq!(record.data().data(), b"ab");

        let mut buf = Vec::new();
        record.compose(&mut buf).unwrap();
        assert_eq!(buf, data);
    }

    #[test]
    fn truncated() {
        let data = b"\x03www\x00\xFF\x00\x00\x01\x00\x00";
        let mut parser = WireParser::from_ref(data.as_ref());
        assert_eq!(
            Record::<UnknownRecordData>::parse(&mut parser),
            Err(ParseError::TruncatedRecord)
        );

        let data = b"\x03www\x00\xFF\x00\x00\x01\x00\x00\x0E\x10\x00\x05ab";
        let mut parser = WireParser::from_ref(data.as_ref());
        assert_eq!(
            Record::<UnknownRecordData>::parse(&mut parser),
            Err(ParseError::TruncatedRecordData)
        );
    }

    #[test]
    fn skip() {
        let data = b"\x03www\x00\xFF\x00\x00\x01\x00\x00\x0E\x10\x00\x02abX";
        let mut parser = WireParser::from_ref(data.as_ref());
        RecordHeader::skip_record(&mut parser).unwrap();
        assert_eq!(parser.remaining(), 1);
    }
}
