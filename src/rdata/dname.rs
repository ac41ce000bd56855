//! Record data from [RFC 6672]: DNAME records.
//!
//! [RFC 6672]: https://tools.ietf.org/html/rfc6672

//------------ Dname --------------------------------------------------------

name_type! {
    /// DNAME record data.
    ///
    /// The DNAME record provides redirection for a subtree of the domain
    /// name tree in the DNS. Its target is never compressed on output.
    ///
    /// The DNAME type is defined in RFC 6672.
    (Dname, DNAME, target, false)
}

//============ Testing ======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::name::{Name, NameCompressor};
    use crate::base::rdata::test::{test_compose_len, test_compose_parse};
    use crate::base::rdata::ComposeRecordData;
    use crate::base::wire::Composer;
    use core::str::FromStr;

    #[test]
    fn dname_compose_parse() {
        let rdata = Dname::from_str("www.example.com").unwrap();
        test_compose_len(rdata.clone());
        test_compose_parse(&rdata, Dname::parse);
    }

    #[test]
    fn dname_not_compressed() {
        let name = Name::from_str("Example.com").unwrap();
        let rdata = Dname::new(name.clone());
        let mut target = NameCompressor::new(Vec::new());
        target.append_compressed_name(&name).unwrap();
        rdata.compose_rdata(&mut target).unwrap();
        let buf = target.into_target();
        assert_eq!(&buf[..13], &buf[13..]);

        let mut canonical = Vec::new();
        rdata.compose_canonical_rdata(&mut canonical).unwrap();
        assert_eq!(canonical, b"\x07example\x03com\x00");
    }
}
