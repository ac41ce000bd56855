//! Extended DNS Error

//------------ ExtendedErrorCode ---------------------------------------------

int_enum! {
    /// Extended DNS error codes.
    ///
    /// Carried in the EDNS option of the same name to provide additional
    /// information about the cause of an error. Defined in [RFC 8914].
    ///
    /// [RFC 8914]: https://tools.ietf.org/html/rfc8914
    =>
    ExtendedErrorCode, u16, parse_u16_be;

    (OTHER => 0, "Other Error")
    (UNSUPPORTED_DNSKEY_ALGORITHM => 1, "Unsupported DNSKEY Algorithm")
    (UNSUPPORTED_DS_DIGEST_TYPE => 2, "Unsupported DS Digest Type")
    (STALE_ANSWER => 3, "Stale Answer")
    (FORGED_ANSWER => 4, "Forged Answer")
    (DNSSEC_INDETERMINATE => 5, "DNSSEC Indeterminate")
    (DNSSEC_BOGUS => 6, "DNSSEC Bogus")
    (SIGNATURE_EXPIRED => 7, "Signature Expired")
    (SIGNATURE_NOT_YET_VALID => 8, "Signature Not Yet Valid")
    (DNSKEY_MISSING => 9, "DNSKEY Missing")
    (RRSIGS_MISSING => 10, "RRSIGs Missing")
    (NO_ZONE_KEY_BIT_SET => 11, "No Zone Key Bit Set")
    (NSEC_MISSING => 12, "NSEC Missing")
    (CACHED_ERROR => 13, "Cached Error")
    (NOT_READY => 14, "Not Ready")
    (BLOCKED => 15, "Blocked")
    (CENSORED => 16, "Censored")
    (FILTERED => 17, "Filtered")
    (PROHIBITED => 18, "Prohibited")
    (STALE_NXDOMAIN_ANSWER => 19, "Stale NXDomain Answer")
    (NOT_AUTHORITATIVE => 20, "Not Authoritative")
    (NOT_SUPPORTED => 21, "Not Supported")
    (NO_REACHABLE_AUTHORITY => 22, "No Reachable Authority")
    (NETWORK_ERROR => 23, "Network Error")
    (INVALID_DATA => 24, "Invalid Data")
}

int_enum_str_with_decimal!(ExtendedErrorCode, u16, "unknown extended error code");

impl ExtendedErrorCode {
    /// Returns whether the code is in the private use range.
    #[must_use]
    pub fn is_private(self) -> bool {
        self.0 >= 49152
    }
}
