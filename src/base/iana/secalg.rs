//! DNSSEC Algorithm Numbers

//------------ SecAlg -------------------------------------------------------

int_enum! {
    /// Security Algorithm Numbers.
    ///
    /// These numbers are used in various security related record types.
    ///
    /// For the currently registered values see the [IANA registration].
    ///
    /// [IANA registration]: http://www.iana.org/assignments/dns-sec-alg-numbers/dns-sec-alg-numbers.xhtml#dns-sec-alg-numbers-1
    =>
    SecAlg, u8, parse_u8;

    /// Delete DS, see RFC 8078. Not an actual algorithm.
    (DELETE => 0, "DELETE")

    /// RSA/MD5, deprecated by RFC 3110.
    (RSAMD5 => 1, "RSAMD5")

    /// Diffie-Hellman, RFC 2539.
    (DH => 2, "DH")

    /// DSA/SHA1, RFC 2536.
    (DSA => 3, "DSA")

    /// RSA/SHA-1, RFC 3110.
    (RSASHA1 => 5, "RSASHA1")

    /// DSA-NSEC3-SHA1, an alias of DSA for use with NSEC3.
    (DSA_NSEC3_SHA1 => 6, "DSA-NSEC3-SHA1")

    /// RSASHA1-NSEC3-SHA1, an alias of RSASHA1 for use with NSEC3.
    (RSASHA1_NSEC3_SHA1 => 7, "RSASHA1-NSEC3-SHA1")

    /// RSA/SHA-256, RFC 5702.
    (RSASHA256 => 8, "RSASHA256")

    /// RSA/SHA-512, RFC 5702.
    (RSASHA512 => 10, "RSASHA512")

    /// GOST R 34.10-2001, RFC 5933.
    (ECC_GOST => 12, "ECC-GOST")

    /// ECDSA Curve P-256 with SHA-256, RFC 6605.
    (ECDSAP256SHA256 => 13, "ECDSAP256SHA256")

    /// ECDSA Curve P-384 with SHA-384, RFC 6605.
    (ECDSAP384SHA384 => 14, "ECDSAP384SHA384")

    /// Ed25519, RFC 8080.
    (ED25519 => 15, "ED25519")

    /// Ed448, RFC 8080.
    (ED448 => 16, "ED448")

    /// Reserved for Indirect Keys.
    (INDIRECT => 252, "INDIRECT")

    /// A private algorithm identified by a domain name.
    (PRIVATEDNS => 253, "PRIVATEDNS")

    /// A private algorithm identified by an ISO OID.
    (PRIVATEOID => 254, "PRIVATEOID")
}

int_enum_str_with_decimal!(SecAlg, u8, "unknown algorithm");

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mnemonics() {
        assert_eq!(SecAlg::from_bytes(b"rsasha256"), Some(SecAlg::RSASHA256));
        assert_eq!(SecAlg::from_bytes(b"13"), Some(SecAlg::ECDSAP256SHA256));
        assert_eq!(SecAlg::from_int(200).to_string(), "200");
        assert_eq!(SecAlg::ECDSAP384SHA384.to_string(), "ECDSAP384SHA384");
    }
}
