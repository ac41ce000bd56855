//! Resource Record (RR) TYPEs

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Resource Record Types.
    ///
    /// Each resource records has a 16 bit type value indicating what kind of
    /// information is represented by the record. Normal query includes the
    /// type of record information is requested for. A few aditional types,
    /// called query types, are defined as well and can only be used in
    /// questions. This type represents both these types.
    ///
    /// For more information see the [IANA registry].
    ///
    /// [IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
    =>
    Rtype, u16, parse_u16_be;

    /// A host address.
    (A => 1, "A")

    /// An authoritative name server.
    (NS => 2, "NS")

    /// A mail destination (obsolete, use MX).
    (MD => 3, "MD")

    /// A mail forwarder (obsolete, use MX).
    (MF => 4, "MF")

    /// The canonical name for an alias.
    (CNAME => 5, "CNAME")

    /// Marks the start of a zone of authority.
    (SOA => 6, "SOA")

    (MB => 7, "MB")
    (MG => 8, "MG")
    (MR => 9, "MR")

    /// A null resource record.
    (NULL => 10, "NULL")

    /// A well known service description.
    (WKS => 11, "WKS")

    /// A domain name pointer.
    (PTR => 12, "PTR")

    /// Host information.
    (HINFO => 13, "HINFO")

    /// Mailbox or mail list information.
    (MINFO => 14, "MINFO")

    /// Mail exchange.
    (MX => 15, "MX")

    /// Text strings.
    (TXT => 16, "TXT")

    (RP => 17, "RP")
    (AFSDB => 18, "AFSDB")
    (X25 => 19, "X25")
    (ISDN => 20, "ISDN")
    (RT => 21, "RT")
    (NSAP => 22, "NSAP")
    (NSAPPTR => 23, "NSAP-PTR")

    /// The original signature record, superseded by RRSIG.
    (SIG => 24, "SIG")

    /// The original key record, superseded by DNSKEY.
    (KEY => 25, "KEY")

    (PX => 26, "PX")
    (GPOS => 27, "GPOS")

    /// IPv6 address.
    (AAAA => 28, "AAAA")

    /// Location information.
    (LOC => 29, "LOC")

    /// The original next domain record, superseded by NSEC.
    (NXT => 30, "NXT")

    (EID => 31, "EID")
    (NIMLOC => 32, "NIMLOC")

    /// Server selection.
    (SRV => 33, "SRV")

    (ATMA => 34, "ATMA")

    /// Naming authority pointer.
    (NAPTR => 35, "NAPTR")

    (KX => 36, "KX")
    (CERT => 37, "CERT")
    (A6 => 38, "A6")

    /// Delegation name.
    (DNAME => 39, "DNAME")

    (SINK => 40, "SINK")

    /// The EDNS OPT pseudo-record.
    (OPT => 41, "OPT")

    /// Address prefix list.
    (APL => 42, "APL")

    /// Delegation signer.
    (DS => 43, "DS")

    (SSHFP => 44, "SSHFP")
    (IPSECKEY => 45, "IPSECKEY")

    /// DNSSEC signature.
    (RRSIG => 46, "RRSIG")

    /// Next secure record.
    (NSEC => 47, "NSEC")

    /// DNS key.
    (DNSKEY => 48, "DNSKEY")

    (DHCID => 49, "DHCID")

    /// Hashed next secure record.
    (NSEC3 => 50, "NSEC3")

    /// NSEC3 parameters.
    (NSEC3PARAM => 51, "NSEC3PARAM")

    /// TLSA certificate association.
    (TLSA => 52, "TLSA")

    (SMIMEA => 53, "SMIMEA")
    (HIP => 55, "HIP")
    (NINFO => 56, "NINFO")
    (RKEY => 57, "RKEY")
    (TALINK => 58, "TALINK")
    (CDS => 59, "CDS")
    (CDNSKEY => 60, "CDNSKEY")
    (OPENPGPKEY => 61, "OPENPGPKEY")
    (CSYNC => 62, "CSYNC")
    (ZONEMD => 63, "ZONEMD")
    (SVCB => 64, "SVCB")
    (HTTPS => 65, "HTTPS")

    /// Sender policy framework, shaped like TXT.
    (SPF => 99, "SPF")

    (UINFO => 100, "UINFO")
    (UID => 101, "UID")
    (GID => 102, "GID")
    (UNSPEC => 103, "UNSPEC")
    (NID => 104, "NID")
    (L32 => 105, "L32")
    (L64 => 106, "L64")
    (LP => 107, "LP")
    (EUI48 => 108, "EUI48")
    (EUI64 => 109, "EUI64")

    /// Transaction key.
    (TKEY => 249, "TKEY")

    /// Transaction signature.
    (TSIG => 250, "TSIG")

    /// Incremental transfer.
    (IXFR => 251, "IXFR")

    /// Transfer of an entire zone.
    (AXFR => 252, "AXFR")

    (MAILB => 253, "MAILB")
    (MAILA => 254, "MAILA")

    /// A request for all records the server has available.
    (ANY => 255, "ANY")

    (URI => 256, "URI")

    /// Certification authority authorization.
    (CAA => 257, "CAA")

    (AVC => 258, "AVC")
    (DOA => 259, "DOA")
    (AMTRELAY => 260, "AMTRELAY")
    (TA => 32768, "TA")
    (DLV => 32769, "DLV")
}

int_enum_str_with_prefix!(Rtype, "TYPE", u16, "unknown record type");

impl Rtype {
    /// Returns whether the type is a pseudo type.
    ///
    /// Pseudo types only ever appear in messages and never in zones. These
    /// are OPT, TKEY, TSIG, and the query types IXFR through ANY.
    #[must_use]
    pub fn is_pseudo(self) -> bool {
        self == Rtype::OPT || (self.0 >= Rtype::TKEY.0 && self.0 <= Rtype::ANY.0)
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_and_parse() {
        assert_eq!(Rtype::NSEC3PARAM.to_string(), "NSEC3PARAM");
        assert_eq!(Rtype::from_int(65280).to_string(), "TYPE65280");
        assert_eq!("type1".parse::<Rtype>().unwrap(), Rtype::A);
        assert_eq!("aaaa".parse::<Rtype>().unwrap(), Rtype::AAAA);
        assert!("bogus".parse::<Rtype>().is_err());
    }

    #[test]
    fn pseudo() {
        assert!(Rtype::OPT.is_pseudo());
        assert!(Rtype::TSIG.is_pseudo());
        assert!(!Rtype::CAA.is_pseudo());
        assert!(!Rtype::A.is_pseudo());
    }
}
