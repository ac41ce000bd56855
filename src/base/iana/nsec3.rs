//! NSEC3 hash algorithms.

//------------ Nsec3HashAlg --------------------------------------------------

int_enum! {
    /// NSEC3 hash algorithm numbers.
    ///
    /// See [RFC 5155] and the [IANA registry].
    ///
    /// [RFC 5155]: https://tools.ietf.org/html/rfc5155
    /// [IANA registry]: https://www.iana.org/assignments/dnssec-nsec3-parameters/dnssec-nsec3-parameters.xhtml#dnssec-nsec3-parameters-3
    =>
    Nsec3HashAlg, u8, parse_u8;

    /// SHA-1.
    (SHA1 => 1, "SHA-1")
}

int_enum_str_with_decimal!(Nsec3HashAlg, u8, "unknown NSEC3 hash algorithm");
