//! The header of a DNS message.
//!
//! Each DNS message starts with a twelve octet long header section
//! containing some general information related to the message as well as
//! the number of records in each of the four sections that follow the
//! header. Its content and format are defined in section 4.1.1 of
//! [RFC 1035].
//!
//! The header is split into two types: [`Header`] contains the message ID
//! and the flags, [`HeaderCounts`] the four record counts. Since
//! [`Message`][super::Message] computes the counts from its sections when
//! composing, only parsing ever produces a [`HeaderCounts`] value from
//! wire data.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::iana::{Opcode, Rcode};
use super::wire::{ParseError, WireParser};
use core::fmt;
use octseq::builder::OctetsBuilder;

/// Defines the getter and setter for each single-bit flag.
macro_rules! header_flags {
    ( $(
        $(#[$attr:meta])*
        ($get:ident, $set:ident, $octet:expr, $bit:expr),
    )* ) => {
        $(
            $(#[$attr])*
            #[must_use]
            pub fn $get(self) -> bool {
                self.inner[$octet] & (1 << $bit) != 0
            }

            #[doc = concat!("Sets or clears the ", stringify!($get), " flag.")]
            pub fn $set(&mut self, set: bool) {
                if set {
                    self.inner[$octet] |= 1 << $bit
                } else {
                    self.inner[$octet] &= !(1 << $bit)
                }
            }
        )*
    }
}

//------------ Header --------------------------------------------------

/// The first part of the header of a DNS message.
///
/// This type represents the information contained in the first four octets
/// of the header: the message ID, opcode, rcode, and the various flags. It
/// keeps those four octets in wire representation, i.e., in network byte
/// order. The data is layed out like this:
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA|Z |AD|CD|   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// Methods are available for accessing each of these fields. For more
/// information on the fields, see these methods.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Header {
    inner: [u8; 4],
}

impl Header {
    /// The length of the header in wire format.
    pub const COMPOSE_LEN: usize = 4;

    /// Creates a new header with all fields set to zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a header from the first four octets of a message.
    #[must_use]
    pub fn from_octets(octets: [u8; 4]) -> Self {
        Header { inner: octets }
    }

    /// Returns a reference to the underlying octets slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }

    /// Takes a header from the beginning of a parser.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        let mut res = Self::default();
        parser.parse_buf(&mut res.inner)?;
        Ok(res)
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.inner)
    }
}

/// # Field Access
///
impl Header {
    /// Returns the value of the ID field.
    ///
    /// The ID field is an identifier chosen by whoever created a query
    /// and is copied into a response by a server. It allows matching
    /// incoming responses to their queries.
    #[must_use]
    pub fn id(self) -> u16 {
        u16::from_be_bytes([self.inner[0], self.inner[1]])
    }

    /// Sets the value of the ID field.
    pub fn set_id(&mut self, value: u16) {
        self.inner[..2].copy_from_slice(&value.to_be_bytes())
    }

    /// Returns the value of the Opcode field.
    #[must_use]
    pub fn opcode(self) -> Opcode {
        Opcode::from_int((self.inner[2] >> 3) & 0x0F)
    }

    /// Sets the value of the opcode field.
    ///
    /// Only the lower four bits of the opcode are used.
    pub fn set_opcode(&mut self, opcode: Opcode) {
        self.inner[2] = self.inner[2] & 0x87 | ((opcode.to_int() & 0x0F) << 3);
    }

    header_flags! {
        /// Query (`false`) or response (`true`).
        (qr, set_qr, 2, 7),
        /// Authoritative answer.
        (aa, set_aa, 2, 2),
        /// Truncated: more data was available than fit into the message.
        (tc, set_tc, 2, 1),
        /// Recursion desired.
        (rd, set_rd, 2, 0),
        /// Recursion available.
        (ra, set_ra, 3, 7),
        /// The reserved bit. Must be zero but is preserved when parsing.
        (z, set_z, 3, 6),
        /// Authentic data, all data in the response was validated.
        (ad, set_ad, 3, 5),
        /// Checking disabled, the server should not perform validation.
        (cd, set_cd, 3, 4),
    }

    /// Returns the value of the RCODE field.
    ///
    /// With EDNS, this is only the lower four bits of the full response
    /// code. Use [`Message::opt_rcode`][super::Message::opt_rcode] to get
    /// the complete value.
    #[must_use]
    pub fn rcode(self) -> Rcode {
        Rcode::from_int(self.inner[3] & 0x0F)
    }

    /// Sets the value of the RCODE field.
    ///
    /// Only the lower four bits of the value are used.
    pub fn set_rcode(&mut self, rcode: Rcode) {
        self.inner[3] = self.inner[3] & 0xF0 | (rcode.to_int() & 0x0F);
    }
}

//--- Display

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id {} opcode {} rcode {} flags",
            self.id(),
            self.opcode(),
            self.rcode()
        )?;
        for (set, name) in [
            (self.qr(), "QR"),
            (self.aa(), "AA"),
            (self.tc(), "TC"),
            (self.rd(), "RD"),
            (self.ra(), "RA"),
            (self.z(), "Z"),
            (self.ad(), "AD"),
            (self.cd(), "CD"),
        ] {
            if set {
                write!(f, " {}", name)?;
            }
        }
        Ok(())
    }
}

//------------ HeaderCounts -------------------------------------------------

/// The section count part of the header section of a DNS message.
///
/// This part consists of four 16 bit counters for the number of entries in
/// the four sections of a DNS message.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct HeaderCounts {
    inner: [u8; 8],
}

impl HeaderCounts {
    /// The length of the counts in wire format.
    pub const COMPOSE_LEN: usize = 8;

    /// Creates a new value with all counters set to zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a value from the four counters.
    #[must_use]
    pub fn from_counts(qd: u16, an: u16, ns: u16, ar: u16) -> Self {
        let mut res = Self::new();
        res.set_qdcount(qd);
        res.set_ancount(an);
        res.set_nscount(ns);
        res.set_arcount(ar);
        res
    }

    /// Returns a reference to the underlying octets slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }

    /// Takes the counts from the beginning of a parser.
    pub fn parse(parser: &mut WireParser) -> Result<Self, ParseError> {
        let mut res = Self::default();
        parser.parse_buf(&mut res.inner)?;
        Ok(res)
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.inner)
    }

    /// Returns the number of entries in the question section.
    #[must_use]
    pub fn qdcount(self) -> u16 {
        self.get_u16(0)
    }

    /// Sets the number of entries in the question section.
    pub fn set_qdcount(&mut self, value: u16) {
        self.set_u16(0, value)
    }

    /// Returns the number of records in the answer section.
    #[must_use]
    pub fn ancount(self) -> u16 {
        self.get_u16(2)
    }

    /// Sets the number of records in the answer section.
    pub fn set_ancount(&mut self, value: u16) {
        self.set_u16(2, value)
    }

    /// Returns the number of records in the authority section.
    #[must_use]
    pub fn nscount(self) -> u16 {
        self.get_u16(4)
    }

    /// Sets the number of records in the authority section.
    pub fn set_nscount(&mut self, value: u16) {
        self.set_u16(4, value)
    }

    /// Returns the number of records in the additional section.
    #[must_use]
    pub fn arcount(self) -> u16 {
        self.get_u16(6)
    }

    /// Sets the number of records in the additional section.
    pub fn set_arcount(&mut self, value: u16) {
        self.set_u16(6, value)
    }

    fn get_u16(self, offset: usize) -> u16 {
        u16::from_be_bytes([self.inner[offset], self.inner[offset + 1]])
    }

    fn set_u16(&mut self, offset: usize, value: u16) {
        self.inner[offset..offset + 2].copy_from_slice(&value.to_be_bytes())
    }
}

//============ Testing ======================================================

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! test_field {
        ($get:ident, $set:ident, $default:expr, $($value:expr),*) => {
            $({
                let mut h = Header::new();
                assert_eq!(h.$get(), $default);
                h.$set($value);
                assert_eq!(h.$get(), $value);
            })*
        }
    }

    #[test]
    fn header() {
        test_field!(id, set_id, 0, 0x1234);
        test_field!(qr, set_qr, false, true, false);
        test_field!(opcode, set_opcode, Opcode::QUERY, Opcode::NOTIFY);
        test_field!(aa, set_aa, false, true, false);
        test_field!(tc, set_tc, false, true, false);
        test_field!(rd, set_rd, false, true, false);
        test_field!(ra, set_ra, false, true, false);
        test_field!(z, set_z, false, true, false);
        test_field!(ad, set_ad, false, true, false);
        test_field!(cd, set_cd, false, true, false);
        test_field!(rcode, set_rcode, Rcode::NOERROR, Rcode::REFUSED);
    }

    #[test]
    fn bit_positions() {
        let mut h = Header::new();
        h.set_qr(true);
        h.set_opcode(Opcode::UPDATE);
        h.set_rd(true);
        h.set_cd(true);
        h.set_rcode(Rcode::NXDOMAIN);
        assert_eq!(h.as_slice(), &[0, 0, 0x80 | (5 << 3) | 0x01, 0x13]);
        let h = Header::from_octets([0x00, 0x01, 0x01, 0x00]);
        assert_eq!(h.id(), 1);
        assert!(h.rd());
        assert!(!h.qr());
    }

    #[test]
    fn counts() {
        let counts = HeaderCounts::from_counts(1, 2, 3, 0x1234);
        let mut buf = Vec::new();
        counts.compose(&mut buf).unwrap();
        assert_eq!(buf, b"\x00\x01\x00\x02\x00\x03\x12\x34");
        let mut parser = WireParser::from_ref(buf.as_slice());
        assert_eq!(HeaderCounts::parse(&mut parser).unwrap(), counts);
    }
}
