//! Record data for OPT records.
//!
//! Since DNS message headers are relatively short, the amount of information
//! that can be conveyed through them is very limited. In order to provide an
//! extensible means to transmit additional information, [RFC 6891] introduces
//! a resource record called OPT that can be added to the additional section
//! of a message. The record data in turn consists of a sequence of options.
//!
//! This module contains the types for working with both the OPT record and
//! its record data. [`Opt`] is the record data, a sequence of parsed
//! options. [`OptRecord`] is the complete pseudo-record including the
//! values that are encoded in the class and TTL fields of the record
//! header. A [`Message`][super::Message] keeps its OPT record as a value
//! of the latter type rather than in the additional section.
//!
//! Each supported option has a type in a submodule of its own that is
//! re-exported here. [`AllOptData`] is the sum of all these plus
//! [`UnknownOptData`] for all other options.
//!
//! [RFC 6891]: https://tools.ietf.org/html/rfc6891

//============ Sub-modules and Re-exports ====================================
//
// All of these are in a macro. The macro also defines `AllOptData`.

#[macro_use]
mod macros;
opt_types! {
    nsid::{Nsid => NSID};
    subnet::{ClientSubnet => CLIENT_SUBNET};
    cookie::{Cookie => COOKIE};
    keepalive::{TcpKeepalive => TCP_KEEPALIVE};
    keytag::{KeyTag => KEY_TAG};
    exterr::{ExtendedError => EXTENDED_ERROR};
}

//============ Module Content ================================================

use super::iana::{OptRcode, OptionCode, Rcode, Rtype};
use super::name::Name;
use super::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use super::wire::{
    compose_len_prefixed, parse_remaining, ComposeError, Composer,
    ParseError, WireParser,
};
use bytes::Bytes;
use core::fmt;
use octseq::builder::OctetsBuilder;

//------------ Opt -----------------------------------------------------------

/// OPT record data.
///
/// This is the record data type for OPT records. It holds the sequence of
/// options in the order they appeared in or will appear in the record.
///
/// Since some of the information of the OPT record is transmitted in the
/// record header, a special type [`OptRecord`] exists, that contains all
/// the OPT data which is the preferred way of accessing this data.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Opt {
    options: Vec<AllOptData>,
}

impl Opt {
    /// Creates empty OPT record data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates OPT record data from a list of options.
    ///
    /// Fails if the options together would be longer than 65,535 octets.
    pub fn from_options(
        options: Vec<AllOptData>,
    ) -> Result<Self, ComposeError> {
        let len: usize = options
            .iter()
            .map(|opt| usize::from(opt.compose_len()) + 4)
            .sum();
        if len > usize::from(u16::MAX) {
            return Err(ComposeError::LongData);
        }
        Ok(Opt { options })
    }

    /// Returns whether there are no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Returns an iterator over all options.
    pub fn iter(&self) -> impl Iterator<Item = &AllOptData> + '_ {
        self.options.iter()
    }

    /// Returns the first option with the given option code.
    #[must_use]
    pub fn get(&self, code: OptionCode) -> Option<&AllOptData> {
        self.options.iter().find(|opt| opt.code() == code)
    }

    /// Appends an option.
    ///
    /// Fails if the record data would become longer than 65,535 octets.
    pub fn push(
        &mut self,
        option: impl Into<AllOptData>,
    ) -> Result<(), ComposeError> {
        let option = option.into();
        if usize::from(self.compose_len())
            + usize::from(option.compose_len())
            + 4
            > usize::from(u16::MAX)
        {
            return Err(ComposeError::LongData);
        }
        self.options.push(option);
        Ok(())
    }

    /// Parses the record data from the remainder of the parser.
    ///
    /// Each option is parsed from a parser limited to its length. Option
    /// data not consumed completely by the option type is an error.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        let mut options = Vec::new();
        while parser.remaining() > 0 {
            let code = OptionCode::parse(parser)?;
            let len = usize::from(parser.parse_u16_be()?);
            let mut data = parser.parse_parser(len)?;
            if let Some(opt) = AllOptData::parse_option(code, &mut data)? {
                if data.remaining() != 0 {
                    return Err(ParseError::form_error(
                        "trailing option data",
                    ));
                }
                options.push(opt);
            }
        }
        Ok(Opt { options })
    }

    fn compose_options<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        for opt in &self.options {
            opt.code().compose(target)?;
            target.append_slice(&opt.compose_len().to_be_bytes())?;
            opt.compose_option(target)?;
        }
        Ok(())
    }
}

//--- RecordData, ParseRecordData, ComposeRecordData

impl RecordData for Opt {
    fn rtype(&self) -> Rtype {
        Rtype::OPT
    }
}

impl ParseRecordData for Opt {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rtype::OPT {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Opt {
    fn compose_len(&self) -> u16 {
        self.options
            .iter()
            .map(|opt| opt.compose_len() + 4)
            .sum()
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.compose_options(target)
    }

    fn compose_canonical_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.compose_options(target)
    }
}

//--- Display

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for opt in &self.options {
            if first {
                first = false;
            } else {
                f.write_str("; ")?;
            }
            write!(f, "{}", opt)?;
        }
        Ok(())
    }
}

//------------ OptRecord -----------------------------------------------------

/// An entire OPT record.
///
/// The OPT pseudo-record reappropriates the record header for encoding
/// some basic information: the class field holds the UDP payload size the
/// sender can receive and the TTL field holds the upper eight bits of the
/// extended response code, the EDNS version, and a set of flags of which
/// only the DO bit is currently defined. The owner is always the root.
///
/// ```text
///             +0 (MSB)                            +1 (LSB)
///  +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
///  |         EXTENDED-RCODE        |            VERSION            |
///  +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
///  | DO|                           Z                               |
///  +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct OptRecord {
    udp_payload_size: u16,
    ext_rcode: u8,
    version: u8,
    flags: u16,
    data: Opt,
}

impl OptRecord {
    /// The flag for DNSSEC OK.
    const DO_BIT: u16 = 0x8000;

    /// The default UDP payload size announced.
    pub const DEFAULT_UDP_PAYLOAD_SIZE: u16 = 1232;

    /// Creates an OPT record with default values and no options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the UDP payload size.
    ///
    /// Through this field a sender of a message can signal the maximum size
    /// of UDP payload the sender is able to handle when receiving messages.
    /// This value refers to the abilities of the sender’s DNS
    /// implementation, not such things as network MTUs.
    #[must_use]
    pub fn udp_payload_size(&self) -> u16 {
        self.udp_payload_size
    }

    pub fn set_udp_payload_size(&mut self, value: u16) {
        self.udp_payload_size = value
    }

    /// Returns the upper eight bits of the extended response code.
    #[must_use]
    pub fn ext_rcode(&self) -> u8 {
        self.ext_rcode
    }

    pub fn set_ext_rcode(&mut self, value: u8) {
        self.ext_rcode = value
    }

    /// Returns the extended rcode.
    ///
    /// Some of the bits of the rcode are stored in the regular message
    /// header. Such a header needs to be passed to the method.
    #[must_use]
    pub fn rcode(&self, rcode: Rcode) -> OptRcode {
        OptRcode::from_parts(rcode, self.ext_rcode)
    }

    /// Returns the EDNS version of the OPT header.
    ///
    /// Only EDNS version 0 is currently defined.
    #[must_use]
    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn set_version(&mut self, value: u8) {
        self.version = value
    }

    /// Returns the value of the DNSSEC OK (DO) bit.
    ///
    /// By setting this bit, a resolver indicates that it is interested in
    /// also receiving the DNSSEC-related resource records necessary to
    /// validate an answer. The bit and the related procedures are defined
    /// in [RFC 3225].
    ///
    /// [RFC 3225]: https://tools.ietf.org/html/rfc3225
    #[must_use]
    pub fn dnssec_ok(&self) -> bool {
        self.flags & Self::DO_BIT != 0
    }

    pub fn set_dnssec_ok(&mut self, value: bool) {
        if value {
            self.flags |= Self::DO_BIT;
        } else {
            self.flags &= !Self::DO_BIT;
        }
    }

    /// Returns the complete flags field including the reserved Z bits.
    #[must_use]
    pub fn flags(&self) -> u16 {
        self.flags
    }

    /// Returns a reference to the record data, i.e., the options.
    #[must_use]
    pub fn opt(&self) -> &Opt {
        &self.data
    }

    /// Returns a mutable reference to the options.
    pub fn opt_mut(&mut self) -> &mut Opt {
        &mut self.data
    }

    /// Appends an option.
    pub fn push(
        &mut self,
        option: impl Into<AllOptData>,
    ) -> Result<(), ComposeError> {
        self.data.push(option)
    }

    /// Returns the length of the wire format of the whole record.
    #[must_use]
    pub fn compose_len(&self) -> usize {
        11 + usize::from(self.data.compose_len())
    }

    /// Takes an OPT record from the parser.
    ///
    /// The parser must be positioned at the start of the record. Errors
    /// are reported the same way as for regular records.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        let (udp_payload_size, ext_rcode, version, flags, rdlen) =
            Self::parse_header(parser)
                .map_err(|err| err.or_short(ParseError::TruncatedRecord))?;
        if parser.remaining() < rdlen {
            return Err(ParseError::TruncatedRecordData);
        }
        let mut rdata = parser.parse_parser(rdlen)?;
        let data = Opt::parse(&mut rdata)
            .map_err(|err| err.or_short(ParseError::TruncatedRecordData))?;
        Ok(OptRecord {
            udp_payload_size,
            ext_rcode,
            version,
            flags,
            data,
        })
    }

    fn parse_header(
        parser: &mut WireParser,
    ) -> Result<(u16, u8, u8, u16, usize), ParseError> {
        Name::skip(parser)?;
        if Rtype::parse(parser)? != Rtype::OPT {
            return Err(ParseError::form_error("not an OPT record"));
        }
        Ok((
            parser.parse_u16_be()?,
            parser.parse_u8()?,
            parser.parse_u8()?,
            parser.parse_u16_be()?,
            usize::from(parser.parse_u16_be()?),
        ))
    }

    /// Appends the record to the target.
    pub fn compose<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        Name::root().compose(target)?;
        Rtype::OPT.compose(target)?;
        target.append_slice(&self.udp_payload_size.to_be_bytes())?;
        target.append_slice(&[self.ext_rcode, self.version])?;
        target.append_slice(&self.flags.to_be_bytes())?;
        compose_len_prefixed(target, |target| {
            self.data.compose_options(target)
        })
    }
}

//--- Default

impl Default for OptRecord {
    fn default() -> Self {
        OptRecord {
            udp_payload_size: Self::DEFAULT_UDP_PAYLOAD_SIZE,
            ext_rcode: 0,
            version: 0,
            flags: 0,
            data: Opt::new(),
        }
    }
}

//--- Display

impl fmt::Display for OptRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "EDNS: version {}; flags:{}; udp: {}",
            self.version,
            if self.dnssec_ok() { " do" } else { "" },
            self.udp_payload_size
        )?;
        if !self.data.is_empty() {
            write!(f, "; {}", self.data)?;
        }
        Ok(())
    }
}

//------------ OptData -------------------------------------------------------

/// A type representing an OPT option.
///
/// The type needs to be able to report the option code to use for the
/// encoding via the [`code`][Self::code] method.
pub trait OptData {
    /// Returns the option code associated with this option.
    fn code(&self) -> OptionCode;
}

//------------ ParseOptData --------------------------------------------------

/// An OPT option that can be parsed from the record data.
pub trait ParseOptData: OptData + Sized {
    /// Parses the option code data.
    ///
    /// The data is for an option of `code`. The function may decide whether
    /// it wants to parse data for that type. It should return `Ok(None)` if
    /// it doesn’t.
    ///
    /// The `parser` is positioned at the beginning of the option data and
    /// is limited to the length of the data. The caller checks that all
    /// data has been consumed.
    fn parse_option(
        code: OptionCode,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError>;
}

//------------ ComposeOptData ------------------------------------------------

/// An OPT option that can be written to wire format.
pub trait ComposeOptData: OptData {
    /// Returns the length of the option data.
    fn compose_len(&self) -> u16;

    /// Appends the option data without code and length.
    fn compose_option<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError>;
}

//------------ UnknownOptData ------------------------------------------------

/// An OPT option in its raw form.
///
/// This type accepts any option type via its parsing function. It allows
/// access to the raw, unparsed option data.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct UnknownOptData {
    /// The option code for the option.
    code: OptionCode,

    /// The raw option data.
    data: Bytes,
}

impl UnknownOptData {
    /// Creates a new option from the code and data.
    ///
    /// Fails if the data is longer than 65,535 octets.
    pub fn new(
        code: OptionCode,
        data: impl Into<Bytes>,
    ) -> Result<Self, LongOptData> {
        let data = data.into();
        LongOptData::check_len(data.len())?;
        Ok(UnknownOptData { code, data })
    }

    /// Returns the option code of the option.
    #[must_use]
    pub fn code(&self) -> OptionCode {
        self.code
    }

    /// Returns a slice of the option data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }
}

//--- OptData etc.

impl OptData for UnknownOptData {
    fn code(&self) -> OptionCode {
        self.code
    }
}

impl ParseOptData for UnknownOptData {
    fn parse_option(
        code: OptionCode,
        parser: &mut WireParser,
    ) -> Result<Option<Self>, ParseError> {
        Ok(Some(UnknownOptData {
            code,
            data: parse_remaining(parser).into(),
        }))
    }
}

impl ComposeOptData for UnknownOptData {
    fn compose_len(&self) -> u16 {
        self.data.len() as u16
    }

    fn compose_option<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(self.data.as_ref())
    }
}

//--- Display

impl fmt::Display for UnknownOptData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code)?;
        for ch in self.data.iter() {
            write!(f, " {:02x}", ch)?;
        }
        Ok(())
    }
}

//============ Error Types ===================================================

//------------ LongOptData ---------------------------------------------------

/// The octets sequence to be used for option data was too long.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongOptData(());

impl LongOptData {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        "option data too long"
    }

    pub fn check_len(len: usize) -> Result<(), Self> {
        if len > usize::from(u16::MAX) {
            Err(Self(()))
        } else {
            Ok(())
        }
    }
}

impl From<LongOptData> for ComposeError {
    fn from(_: LongOptData) -> Self {
        ComposeError::LongData
    }
}

impl fmt::Display for LongOptData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for LongOptData {}

//============ Testing =======================================================

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use core::fmt::Debug;

    /// Checks that composing and parsing an option are reverse operations.
    pub fn test_option_compose_parse<In, F, Out>(data: &In, parse: F)
    where
        In: ComposeOptData + PartialEq<Out> + Debug,
        F: FnOnce(&mut WireParser) -> Result<Out, ParseError>,
        Out: Debug,
    {
        let mut buf = Vec::new();
        data.compose_option(&mut buf).unwrap();
        assert_eq!(buf.len(), usize::from(data.compose_len()));
        let mut parser = WireParser::from_ref(buf.as_slice());
        let parsed = (parse)(&mut parser).unwrap();
        assert_eq!(parser.remaining(), 0);
        assert_eq!(*data, parsed);
    }

    #[test]
    fn opt_record_header() {
        let mut record = OptRecord::new();
        record.set_udp_payload_size(4096);
        record.set_ext_rcode(0x01);
        record.set_dnssec_ok(true);
        record.push(Nsid::empty()).unwrap();

        let mut buf = Vec::new();
        record.compose(&mut buf).unwrap();
        assert_eq!(
            buf,
            b"\x00\x00\x29\x10\x00\x01\x00\x80\x00\x00\x04\x00\x03\x00\x00"
        );
        assert_eq!(buf.len(), record.compose_len());

        let mut parser = WireParser::from_ref(buf.as_slice());
        let parsed = OptRecord::parse(&mut parser).unwrap();
        assert_eq!(parsed, record);
        assert!(parsed.dnssec_ok());
        assert_eq!(parsed.rcode(Rcode::NOERROR), OptRcode::BADVERS);
        assert_eq!(parsed.opt().nsid(), Some(&Nsid::empty()));
    }

    #[test]
    fn unknown_options_are_kept() {
        let data = b"\x00\x12\x00\x02ab\x00\x0b\x00\x00";
        let mut parser = WireParser::from_ref(data.as_ref());
        let opt = Opt::parse(&mut parser).unwrap();
        let options: Vec<_> = opt.iter().cloned().collect();
        assert_eq!(
            options,
            vec![
                AllOptData::Other(
                    UnknownOptData::new(
                        OptionCode::REPORT_CHANNEL,
                        &b"ab"[..]
                    )
                    .unwrap()
                ),
                AllOptData::TcpKeepalive(TcpKeepalive::new(None)),
            ]
        );
        assert_eq!(opt.compose_len(), data.len() as u16);
    }

    #[test]
    fn option_beyond_rdata() {
        let data = b"\x00\x03\x00\x05ab";
        let mut parser = WireParser::from_ref(data.as_ref());
        assert_eq!(Opt::parse(&mut parser), Err(ParseError::ShortInput));
    }

    #[test]
    fn trailing_option_data() {
        let data = b"\x00\x0b\x00\x03abc";
        let mut parser = WireParser::from_ref(data.as_ref());
        assert!(matches!(Opt::parse(&mut parser), Err(ParseError::Form(_))));
    }
}
