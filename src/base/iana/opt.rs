//! EDNS Option Codes

//------------ OptionCode ----------------------------------------------------

int_enum! {
    /// DNS EDNS0 Option Codes (OPT).
    ///
    /// The record data of OPT records is a sequence of options. The type of
    /// each of these options is given through a 16 bit value called the
    /// option code.
    ///
    /// See the [IANA registry].
    ///
    /// [IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-11
    =>
    OptionCode, u16, parse_u16_be;

    (LLQ => 1, "LLQ")
    (UL => 2, "UL")

    /// Name server identifier, RFC 5001.
    (NSID => 3, "NSID")

    (DAU => 5, "DAU")
    (DHU => 6, "DHU")
    (N3U => 7, "N3U")

    /// Client subnet, RFC 7871.
    (CLIENT_SUBNET => 8, "edns-client-subnet")

    (EXPIRE => 9, "EDNS EXPIRE")

    /// DNS cookies, RFC 7873.
    (COOKIE => 10, "COOKIE")

    /// TCP keepalive, RFC 7828.
    (TCP_KEEPALIVE => 11, "edns-tcp-keepalive")

    (PADDING => 12, "Padding")
    (CHAIN => 13, "CHAIN")

    /// Key tags of trust anchors, RFC 8145.
    (KEY_TAG => 14, "edns-key-tag")

    /// Extended DNS errors, RFC 8914.
    (EXTENDED_ERROR => 15, "Extended DNS Error")

    (CLIENT_TAG => 16, "EDNS-Client-Tag")
    (SERVER_TAG => 17, "EDNS-Server-Tag")

    /// DNS error reporting agent domain, RFC 9567.
    (REPORT_CHANNEL => 18, "Report-Channel")
}

int_enum_str_with_decimal!(OptionCode, u16, "unknown option code");
