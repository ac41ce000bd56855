//! Delegation signer digest algorithm numbers.

//------------ DigestAlg -----------------------------------------------------

int_enum! {
    /// Delegation signer digest algorithm numbers.
    ///
    /// These numbers are used in the DS resource record to specify how the
    /// key digest in the record has been generated.
    ///
    /// See the [IANA registration].
    ///
    /// [IANA registration]: https://www.iana.org/assignments/ds-rr-types/ds-rr-types.xhtml#ds-rr-types-1
    =>
    DigestAlg, u8, parse_u8;

    /// SHA-1, see RFC 3658.
    (SHA1 => 1, "SHA-1")

    /// SHA-256, see RFC 4509.
    (SHA256 => 2, "SHA-256")

    /// GOST R 34.11-94, see RFC 5933. Not supported for creating digests.
    (GOST => 3, "GOST")

    /// SHA-384, see RFC 6605.
    (SHA384 => 4, "SHA-384")
}

int_enum_str_with_decimal!(DigestAlg, u8, "unknown digest algorithm");
