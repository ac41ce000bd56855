//! DNS response codes and extended response codes.
//!
//! The original DNS specification in [RFC 1035] defined four bits of the
//! message header as response code. The type [`Rcode`] represents these
//! codes. EDNS, in [RFC 6891], extended the range to twelve bits by storing
//! the upper eight bits in the OPT record. [`OptRcode`] represents those
//! extended codes. Finally, TSIG ([RFC 8945]) defines its own sixteen bit
//! error field represented by [`TsigRcode`].
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035
//! [RFC 6891]: https://tools.ietf.org/html/rfc6891
//! [RFC 8945]: https://tools.ietf.org/html/rfc8945

//------------ Rcode ---------------------------------------------------------

int_enum! {
    /// DNS Response Codes.
    ///
    /// Only the lower four bits of the value can be transmitted in the
    /// message header. The `Header` type masks the value accordingly.
    =>
    Rcode, u8, parse_u8;

    /// No error condition.
    (NOERROR => 0, "NOERROR")

    /// Format error.
    ///
    /// The name server was unable to interpret the query.
    (FORMERR => 1, "FORMERR")

    /// Server failure.
    (SERVFAIL => 2, "SERVFAIL")

    /// Name error.
    ///
    /// The domain name given in the query does not exist.
    (NXDOMAIN => 3, "NXDOMAIN")

    /// Not implemented.
    ///
    /// The name server does not support the requested kind of query.
    (NOTIMP => 4, "NOTIMP")

    /// Query refused.
    (REFUSED => 5, "REFUSED")

    /// Name exists when it should not, see RFC 2136.
    (YXDOMAIN => 6, "YXDOMAIN")

    /// RR set exists when it should not, see RFC 2136.
    (YXRRSET => 7, "YXRRSET")

    /// RR set that should exist does not, see RFC 2136.
    ///
    /// This is code point 8 and not an alias of `NOERROR`.
    (NXRRSET => 8, "NXRRSET")

    /// Server not authoritative for zone or client not authorized.
    (NOTAUTH => 9, "NOTAUTH")

    /// Name not contained in zone.
    (NOTZONE => 10, "NOTZONE")
}

int_enum_str_with_decimal!(Rcode, u8, "unknown response code");

//------------ OptRcode ------------------------------------------------------

/// Extended DNS Response Codes for OPT records.
///
/// The lower four bits live in the message header, the upper eight bits in
/// the TTL field of the OPT record.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OptRcode(u16);

impl OptRcode {
    pub const NOERROR: OptRcode = OptRcode(0);
    pub const FORMERR: OptRcode = OptRcode(1);
    pub const SERVFAIL: OptRcode = OptRcode(2);
    pub const NXDOMAIN: OptRcode = OptRcode(3);
    pub const NOTIMP: OptRcode = OptRcode(4);
    pub const REFUSED: OptRcode = OptRcode(5);

    /// Bad OPT version.
    pub const BADVERS: OptRcode = OptRcode(16);

    /// Bad or missing server cookie, see RFC 7873.
    pub const BADCOOKIE: OptRcode = OptRcode(23);

    /// Creates a value from its raw integer, masked to twelve bits.
    #[must_use]
    pub const fn from_int(value: u16) -> Self {
        OptRcode(value & 0x0FFF)
    }

    #[must_use]
    pub const fn to_int(self) -> u16 {
        self.0
    }

    /// Combines the header response code with the upper eight bits.
    #[must_use]
    pub fn from_parts(rcode: Rcode, ext: u8) -> Self {
        OptRcode((u16::from(ext) << 4) | u16::from(rcode.to_int() & 0x0F))
    }

    /// Returns the header part and the OPT record part.
    #[must_use]
    pub fn to_parts(self) -> (Rcode, u8) {
        (self.rcode(), self.ext())
    }

    /// Returns the part of the code that goes into the message header.
    #[must_use]
    pub fn rcode(self) -> Rcode {
        Rcode::from_int((self.0 & 0x0F) as u8)
    }

    /// Returns the part of the code that goes into the OPT record.
    #[must_use]
    pub fn ext(self) -> u8 {
        (self.0 >> 4) as u8
    }

    /// Returns whether the code needs the OPT record to be expressed.
    #[must_use]
    pub fn is_ext(self) -> bool {
        self.0 > 0x0F
    }
}

impl From<Rcode> for OptRcode {
    fn from(rcode: Rcode) -> Self {
        OptRcode::from_parts(rcode, 0)
    }
}

impl core::fmt::Debug for OptRcode {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            OptRcode::BADVERS => f.write_str("OptRcode::BADVERS"),
            OptRcode::BADCOOKIE => f.write_str("OptRcode::BADCOOKIE"),
            value if !value.is_ext() => {
                write!(f, "OptRcode({:?})", value.rcode())
            }
            value => f.debug_tuple("OptRcode").field(&value.0).finish(),
        }
    }
}

impl core::fmt::Display for OptRcode {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            OptRcode::BADVERS => f.write_str("BADVERS"),
            OptRcode::BADCOOKIE => f.write_str("BADCOOKIE"),
            value if !value.is_ext() => value.rcode().fmt(f),
            value => write!(f, "{}", value.0),
        }
    }
}

//------------ TsigRcode -----------------------------------------------------

int_enum! {
    /// Response codes for transaction authentication (TSIG).
    ///
    /// TSIG and TKEY resource records contain a 16 bit wide error field
    /// whose values are an extension of the standard DNS error codes.
    ///
    /// See [RFC 8945] and the [IANA registry].
    ///
    /// [RFC 8945]: https://tools.ietf.org/html/rfc8945
    /// [IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-6
    =>
    TsigRcode, u16, parse_u16_be;

    /// No error condition.
    (NOERROR => 0, "NOERROR")
    (FORMERR => 1, "FORMERR")
    (SERVFAIL => 2, "SERVFAIL")
    (NXDOMAIN => 3, "NXDOMAIN")
    (NOTIMP => 4, "NOTIMP")
    (REFUSED => 5, "REFUSED")
    (YXDOMAIN => 6, "YXDOMAIN")
    (YXRRSET => 7, "YXRRSET")
    (NXRRSET => 8, "NXRRSET")
    (NOTAUTH => 9, "NOTAUTH")
    (NOTZONE => 10, "NOTZONE")

    /// The MAC did not verify.
    (BADSIG => 16, "BADSIG")

    /// The key is not known to the receiver.
    (BADKEY => 17, "BADKEY")

    /// The signing time is outside the fudge window.
    (BADTIME => 18, "BADTIME")

    /// Bad TKEY mode.
    (BADMODE => 19, "BADMODE")

    /// Duplicate key name.
    (BADNAME => 20, "BADNAME")

    /// Algorithm not supported.
    (BADALG => 21, "BADALG")

    /// The MAC was truncated to an unacceptable length.
    (BADTRUNC => 22, "BADTRUNC")

    /// Bad or missing server cookie.
    (BADCOOKIE => 23, "BADCOOKIE")
}

// Scoped in its own module so its `FromStrError` does not clash with the
// one generated for `Rcode` above.
mod tsig_rcode_str {
    use super::TsigRcode;

    int_enum_str_with_decimal!(TsigRcode, u16, "unknown TSIG error");
}

impl TsigRcode {
    /// Returns the response code to put into the message header.
    ///
    /// All TSIG specific errors are signalled as NOTAUTH in the header.
    #[must_use]
    pub fn header_rcode(self) -> Rcode {
        if self.0 < 16 {
            Rcode::from_int(self.0 as u8)
        } else {
            Rcode::NOTAUTH
        }
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn opt_rcode_parts() {
        let rcode = OptRcode::from_parts(Rcode::NOERROR, 1);
        assert_eq!(rcode, OptRcode::BADVERS);
        assert_eq!(rcode.to_parts(), (Rcode::NOERROR, 1));
        assert_eq!(OptRcode::BADCOOKIE.to_parts(), (Rcode::from_int(7), 1));
        assert!(!OptRcode::from(Rcode::REFUSED).is_ext());
        assert_eq!(OptRcode::from(Rcode::REFUSED).to_string(), "REFUSED");
    }

    #[test]
    fn nxrrset_code_point() {
        assert_eq!(Rcode::NXRRSET.to_int(), 8);
        assert_ne!(Rcode::NXRRSET, Rcode::NOERROR);
        assert_eq!(Rcode::from_int(8).to_string(), "NXRRSET");
        assert_eq!("NXRRSET".parse::<Rcode>().unwrap(), Rcode::NXRRSET);
    }

    #[test]
    fn tsig_header_rcode() {
        assert_eq!(TsigRcode::BADSIG.header_rcode(), Rcode::NOTAUTH);
        assert_eq!(TsigRcode::FORMERR.header_rcode(), Rcode::FORMERR);
    }
}
