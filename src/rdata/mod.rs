//! Record data implementations.
//!
//! This module contains one type for the record data of each supported
//! record type. The types are named after the record type they implement.
//! Some are grouped into submodules for the RFC they are defined in while
//! others live in modules of their own. All types are re-exported at the
//! top level here, i.e., for the AAAA record type you can simply
//! `use dnscore::rdata::Aaaa`.
//!
//! The [`AllRecordData`] enum is a closed sum over all these types plus an
//! opaque fallback for any other record type. It is the record data type to
//! use when parsing complete messages.
//!
//! A handful of record types are historical predecessors of newer types
//! with an identical wire format. These reuse the newer type’s data:
//! KEY uses [`Dnskey`], SIG uses [`Rrsig`], NXT uses [`Nsec`], and SPF uses
//! [`Txt`]. The variant of [`AllRecordData`] keeps track of the actual
//! record type.

#[macro_use]
mod macros;

pub mod apl;
pub mod caa;
pub mod dname;
pub mod dnssec;
pub mod naptr;
pub mod nsec3;
pub mod rfc1035;
pub mod srv;
pub mod tkey;
pub mod tlsa;
pub mod tsig;

mod aaaa;

pub use self::aaaa::Aaaa;
pub use self::apl::{Apl, AplItem};
pub use self::caa::Caa;
pub use self::dname::Dname;
pub use self::dnssec::{
    Dnskey, Ds, Nsec, ProtoRrsig, Rrsig, RtypeBitmap, RtypeBitmapBuilder,
    Timestamp,
};
pub use self::naptr::Naptr;
pub use self::nsec3::{Nsec3, Nsec3param};
pub use self::rfc1035::{Cname, Mx, Ns, Ptr, Soa, Txt, TxtError, Wks, A};
pub use self::srv::Srv;
pub use self::tkey::Tkey;
pub use self::tlsa::Tlsa;
pub use self::tsig::{Time48, Tsig};

use crate::base::opt::Opt;
use crate::base::rdata::{ComposeRecordData, RecordData};

rdata_types! {
    A(A) => A,
    Ns(Ns) => NS,
    Cname(Cname) => CNAME,
    Soa(Soa) => SOA,
    Wks(Wks) => WKS,
    Ptr(Ptr) => PTR,
    Mx(Mx) => MX,
    Txt(Txt) => TXT,
    Aaaa(Aaaa) => AAAA,
    Srv(Srv) => SRV,
    Naptr(Naptr) => NAPTR,
    Dname(Dname) => DNAME,
    Opt(Opt) => OPT,
    Apl(Apl) => APL,
    Ds(Ds) => DS,
    Rrsig(Rrsig) => RRSIG,
    Nsec(Nsec) => NSEC,
    Dnskey(Dnskey) => DNSKEY,
    Nsec3(Nsec3) => NSEC3,
    Nsec3param(Nsec3param) => NSEC3PARAM,
    Tlsa(Tlsa) => TLSA,
    Caa(Caa) => CAA,
    Tkey(Tkey) => TKEY,
    Tsig(Tsig) => TSIG,

    /// KEY record data in the format of DNSKEY.
    Key(Dnskey) => KEY,

    /// SIG record data in the format of RRSIG.
    Sig(Rrsig) => SIG,

    /// NXT record data in the format of NSEC.
    Nxt(Nsec) => NXT,

    /// SPF record data in the format of TXT.
    Spf(Txt) => SPF,
}

//--- From

macro_rules! from_rdata {
    ( $( $variant:ident, )* ) => {
        $(
            impl From<$variant> for AllRecordData {
                fn from(data: $variant) -> Self {
                    AllRecordData::$variant(data)
                }
            }
        )*
    }
}

from_rdata! {
    A, Ns, Cname, Soa, Wks, Ptr, Mx, Txt, Aaaa, Srv, Naptr, Dname, Opt, Apl,
    Ds, Rrsig, Nsec, Dnskey, Nsec3, Nsec3param, Tlsa, Caa, Tkey, Tsig,
}

impl From<crate::base::rdata::UnknownRecordData> for AllRecordData {
    fn from(data: crate::base::rdata::UnknownRecordData) -> Self {
        AllRecordData::Unknown(data)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::{Rtype, SecAlg};
    use crate::base::rdata::{ParseRecordData, UnknownRecordData};
    use crate::base::wire::{ComposeError, WireParser};
    use std::net::Ipv4Addr;

    fn parse(rtype: Rtype, data: &[u8]) -> AllRecordData {
        let mut parser = WireParser::from_ref(data);
        let res = AllRecordData::parse_rdata(rtype, &mut parser)
            .unwrap()
            .unwrap();
        assert_eq!(parser.remaining(), 0);
        res
    }

    #[test]
    fn alias_types_keep_rtype() {
        let key = Dnskey::new(256, 3, SecAlg::ED25519, vec![1, 2, 3]).unwrap();
        let mut buf = Vec::new();
        key.compose_rdata(&mut buf).unwrap();

        let data = parse(Rtype::KEY, &buf);
        assert_eq!(data, AllRecordData::Key(key.clone()));
        assert_eq!(data.rtype(), Rtype::KEY);

        let data = parse(Rtype::DNSKEY, &buf);
        assert_eq!(data, AllRecordData::Dnskey(key));
        assert_eq!(data.rtype(), Rtype::DNSKEY);

        let data = parse(Rtype::SPF, b"\x05v=spf");
        assert_eq!(data.rtype(), Rtype::SPF);
        assert_eq!(data.to_string(), "\"v=spf\"");
    }

    #[test]
    fn unknown_fallback() {
        let data = parse(Rtype::from_int(4711), b"\x01\x02");
        assert_eq!(
            data,
            AllRecordData::Unknown(
                UnknownRecordData::from_octets(
                    Rtype::from_int(4711),
                    &b"\x01\x02"[..]
                )
                .unwrap()
            )
        );
        assert_eq!(
            data.canonical_len(),
            Err(ComposeError::UnsupportedType(Rtype::from_int(4711)))
        );
    }

    #[test]
    fn dispatch_and_from() {
        let data: AllRecordData = A::new(Ipv4Addr::new(192, 0, 2, 1)).into();
        assert_eq!(data.rtype(), Rtype::A);
        assert_eq!(data.compose_len(), 4);
        assert_eq!(data.to_string(), "192.0.2.1");
        assert_eq!(parse(Rtype::A, b"\xc0\x00\x02\x01"), data);
    }
}
