//! DNS OpCodes.

//------------ Opcode --------------------------------------------------------

int_enum! {
    /// DNS OpCodes.
    ///
    /// The opcode specifies the kind of query to be performed. It lives in
    /// four bits of the message header, so only values up to 15 can appear
    /// on the wire.
    ///
    /// See the [DNS OpCodes IANA registry].
    ///
    /// [DNS OpCodes IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-5
    =>
    Opcode, u8, parse_u8;

    /// A standard query (0).
    (QUERY => 0, "QUERY")

    /// An inverse query (IQUERY) (1, obsolete).
    (IQUERY => 1, "IQUERY")

    /// A server status request (2).
    (STATUS => 2, "STATUS")

    /// A NOTIFY query (4), see RFC 1996.
    (NOTIFY => 4, "NOTIFY")

    /// An UPDATE query (5), see RFC 2136.
    (UPDATE => 5, "UPDATE")

    /// DNS Stateful Operations (6), see RFC 8490.
    (DSO => 6, "DSO")
}

int_enum_str_with_decimal!(Opcode, u8, "unknown opcode");
