//! DNS CLASSes.

//------------ Class ---------------------------------------------------------

int_enum! {
    /// DNS CLASSes.
    ///
    /// The domain name space is partitioned into separate classes for
    /// different network types. In practice, only IN is relevant. NONE and
    /// ANY are query classes only. TSIG records always use ANY.
    ///
    /// See [RFC 1034] and the [DNS CLASSes IANA registry].
    ///
    /// [RFC 1034]: https://tools.ietf.org/html/rfc1034
    /// [DNS CLASSes IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-2
    =>
    Class, u16, parse_u16_be;

    /// Internet (IN).
    (IN => 1, "IN")

    /// Chaosnet (CH).
    (CH => 3, "CH")

    /// Hesiod (HS).
    (HS => 4, "HS")

    /// Query class None.
    ///
    /// Used in UPDATE queries to require that an RRset does not exist.
    (NONE => 0xFE, "NONE")

    /// Query class * (ANY).
    (ANY => 0xFF, "ANY")
}

int_enum_str_with_prefix!(Class, "CLASS", u16, "unknown class");

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", Class::IN), "Class::IN");
        assert_eq!(format!("{:?}", Class(69)), "Class(69)");
    }

    #[test]
    fn from_str() {
        assert_eq!("in".parse::<Class>().unwrap(), Class::IN);
        assert_eq!("CLASS254".parse::<Class>().unwrap(), Class::NONE);
        assert_eq!(Class::from_int(7).to_string(), "CLASS7");
        assert!("CLASS".parse::<Class>().is_err());
    }
}
