//! Parsing and composing complete messages.

mod common;

use std::net::IpAddr;

use rstest::rstest;

use dnscore::base::iana::{
    Class, DigestAlg, Nsec3HashAlg, OptionCode, Rcode, Rtype, SecAlg,
    TsigRcode,
};
use dnscore::base::name::{Name, NameError};
use dnscore::base::opt::{AllOptData, ClientSubnet, Cookie, Opt, OptRecord};
use dnscore::base::{
    CharStr, Message, ParseError, Question, Record, RecordData, Ttl,
    UnknownRecordData,
};
use dnscore::rdata::{
    AllRecordData, Aaaa, Apl, AplItem, Caa, Cname, Dname, Dnskey, Ds, Mx,
    Naptr, Ns, Nsec, Nsec3, Nsec3param, Ptr, Rrsig, RtypeBitmap, Soa, Srv,
    Time48, Tkey, Tlsa, Tsig, Txt, Wks, A,
};

fn name(s: &str) -> Name {
    s.parse().unwrap()
}

fn header(qdcount: u8, ancount: u8) -> Vec<u8> {
    vec![
        0x00, 0x01, 0x01, 0x00, 0x00, qdcount, 0x00, ancount, 0x00, 0x00,
        0x00, 0x00,
    ]
}

#[test]
fn parse_query() {
    common::init_logging();
    let mut data = header(1, 0);
    data.extend_from_slice(b"\x07example\x03com\x00\x00\x01\x00\x01");
    let msg = Message::parse(&data).unwrap();
    assert_eq!(msg.header().id(), 1);
    assert!(msg.header().rd());
    assert_eq!(msg.header().rcode(), Rcode::NOERROR);
    assert_eq!(
        msg.questions(),
        [Question::new(name("example.com"), Rtype::A, Class::IN)]
    );
    assert!(msg.answer().is_empty());
    assert!(msg.authority().is_empty());
    assert!(msg.additional().is_empty());
}

#[test]
fn response_round_trip() {
    common::init_logging();
    let mut msg = Message::query(
        0xbeef,
        Question::new_in(name("example.com"), Rtype::MX),
    );
    msg.header_mut().set_qr(true);
    msg.header_mut().set_aa(true);
    msg.answer_mut().push(Record::new(
        name("example.com"),
        Class::IN,
        Ttl::HOUR,
        Mx::new(10, name("mail.example.com")).into(),
    ));
    msg.authority_mut().push(Record::new(
        name("example.com"),
        Class::IN,
        Ttl::DAY,
        Ns::new(name("ns1.example.com")).into(),
    ));
    msg.additional_mut().push(Record::new(
        name("mail.example.com"),
        Class::IN,
        Ttl::HOUR,
        A::from_octets(192, 0, 2, 25).into(),
    ));
    let wire = msg.to_vec().unwrap();
    let parsed = Message::parse(&wire).unwrap();
    assert_eq!(parsed, msg);
    assert_eq!(parsed.counts().ancount(), 1);
    assert_eq!(parsed.counts().nscount(), 1);
    assert_eq!(parsed.counts().arcount(), 1);
}

#[test]
fn shared_suffixes_are_compressed() {
    let mut msg = Message::new();
    for host in ["www.example.com", "ftp.example.com"] {
        msg.answer_mut().push(Record::new(
            name(host),
            Class::IN,
            Ttl::HOUR,
            A::from_octets(192, 0, 2, 1).into(),
        ));
    }
    let wire = msg.to_vec().unwrap();

    // The second owner is “ftp” followed by a pointer to “example.com” in
    // the first owner at offset 12 + 4.
    let second = 12 + 17 + 10 + 4;
    assert_eq!(&wire[second..second + 6], b"\x03ftp\xc0\x10");

    let parsed = Message::parse(&wire).unwrap();
    assert_eq!(parsed.answer()[0].owner(), &name("www.example.com"));
    assert_eq!(parsed.answer()[1].owner(), &name("ftp.example.com"));
    assert_eq!(parsed, msg);
}

#[rstest]
#[case::self_reference(b"\xc0\x0c")]
#[case::forward(b"\xc0\x0e\x00")]
#[case::loop_via_label(b"\x03www\xc0\x0c")]
fn pointer_loops_fail(#[case] qname: &[u8]) {
    let mut data = header(1, 0);
    data.extend_from_slice(qname);
    data.extend_from_slice(b"\x00\x01\x00\x01");
    assert_eq!(
        Message::parse(&data),
        Err(ParseError::MalformedName(NameError::BadPointer))
    );
}

fn long_name(last_label: usize) -> Vec<u8> {
    let mut res = Vec::new();
    for _ in 0..3 {
        res.push(63);
        res.extend_from_slice(&[b'a'; 63]);
    }
    res.push(last_label as u8);
    res.extend(std::iter::repeat(b'b').take(last_label));
    res.push(0);
    res
}

#[test]
fn name_length_limit() {
    let longest = long_name(61);
    assert_eq!(longest.len(), 255);
    assert!(Name::from_slice(&longest).is_ok());
    assert_eq!(
        Name::from_slice(&long_name(62)),
        Err(NameError::LongName)
    );

    let mut data = header(1, 0);
    data.extend_from_slice(&longest);
    data.extend_from_slice(b"\x00\x01\x00\x01");
    assert!(Message::parse(&data).is_ok());

    let mut data = header(1, 0);
    data.extend_from_slice(&long_name(62));
    data.extend_from_slice(b"\x00\x01\x00\x01");
    assert_eq!(
        Message::parse(&data),
        Err(ParseError::MalformedName(NameError::LongName))
    );
}

#[rstest]
#[case(&[1, 2, 15, 65535])]
#[case(&[1])]
#[case(&[46, 47, 48, 250, 256, 1234])]
fn nsec_bitmaps(#[case] types: &[u16]) {
    let bitmap =
        RtypeBitmap::from_rtypes(types.iter().copied().map(Rtype::from_int));
    let mut msg = Message::new();
    msg.authority_mut().push(Record::new(
        name("a.example.com"),
        Class::IN,
        Ttl::HOUR,
        Nsec::new(name("b.example.com"), bitmap).into(),
    ));
    let parsed = Message::parse(&msg.to_vec().unwrap()).unwrap();
    match parsed.authority()[0].data() {
        AllRecordData::Nsec(nsec) => {
            assert_eq!(
                nsec.types().iter().map(Rtype::to_int).collect::<Vec<_>>(),
                types
            );
        }
        other => panic!("unexpected record data {:?}", other),
    }
}

#[test]
fn bitmap_windows_are_sized() {
    let bitmap = RtypeBitmap::from_rtypes(
        [1, 2, 15, 65535].into_iter().map(Rtype::from_int),
    );
    let octets = bitmap.as_slice();
    assert_eq!(&octets[..5], b"\x00\x02\x60\x01\xff");
    assert_eq!(octets[5], 32);
    assert_eq!(octets.len(), 2 + 2 + 2 + 32);
}

#[test]
fn edns_options() {
    common::init_logging();
    let mut msg =
        Message::query(7, Question::new_in(name("example.com"), Rtype::AAAA));
    let mut opt = OptRecord::new();
    opt.set_udp_payload_size(1232);
    opt.set_dnssec_ok(true);
    opt.push(ClientSubnet::new(
        24,
        0,
        "192.0.2.77".parse::<IpAddr>().unwrap(),
    ))
    .unwrap();
    opt.push(Cookie::create_initial(&mut rand::thread_rng()))
        .unwrap();
    msg.set_opt(Some(opt));

    let parsed = Message::parse(&msg.to_vec().unwrap()).unwrap();
    assert!(parsed.is_edns0());
    assert!(parsed.additional().is_empty());
    let opt = parsed.opt().unwrap();
    assert_eq!(opt.udp_payload_size(), 1232);
    assert!(opt.dnssec_ok());
    let subnet = opt.opt().client_subnet().unwrap();
    assert_eq!(subnet.source_prefix_len(), 24);
    assert_eq!(subnet.addr(), "192.0.2.0".parse::<IpAddr>().unwrap());
    assert!(opt.opt().cookie().unwrap().server().is_none());
    assert_eq!(parsed, msg);
}

#[test]
fn truncated_messages() {
    let mut data = header(1, 1);
    data.extend_from_slice(b"\x07example\x03com\x00\x00\x01\x00\x01");
    data.extend_from_slice(
        b"\xc0\x0c\x00\x01\x00\x01\x00\x00\x0e\x10\x00\x04",
    );
    data.extend_from_slice(b"\xc0\x00\x02");
    let err = Message::parse(&data).unwrap_err();
    assert_eq!(err, ParseError::TruncatedRecordData);
    assert!(err.is_truncated());
    for len in 12..data.len() - 1 {
        assert!(Message::parse(&data[..len]).is_err());
    }
}

#[test]
fn edns_options_keep_their_octets() {
    common::init_logging();
    let mut data =
        b"\x12\x34\x81\x20\x00\x01\x00\x00\x00\x00\x00\x01".to_vec();
    data.extend_from_slice(b"\x07example\x03com\x00\x00\x1c\x00\x01");
    // OPT: payload size 1232, DO bit, 38 octets of options.
    data.extend_from_slice(b"\x00\x00\x29\x04\xd0\x00\x00\x80\x00\x00\x26");
    // Client subnet 192.0.2.0/24, scope 0.
    data.extend_from_slice(b"\x00\x08\x00\x07\x00\x01\x18\x00\xc0\x00\x02");
    // Cookie with client and server cookie.
    data.extend_from_slice(b"\x00\x0a\x00\x10");
    data.extend_from_slice(b"\x01\x02\x03\x04\x05\x06\x07\x08");
    data.extend_from_slice(b"\xa1\xa2\xa3\xa4\xa5\xa6\xa7\xa8");
    // Option code 65001 is unassigned.
    data.extend_from_slice(b"\xfd\xe9\x00\x03\x01\x02\x03");

    let msg = Message::parse(&data).unwrap();
    let opt = msg.opt().unwrap();
    assert_eq!(opt.udp_payload_size(), 1232);
    assert!(opt.dnssec_ok());
    assert_eq!(opt.opt().iter().count(), 3);
    assert_eq!(
        opt.opt().client_subnet().unwrap().addr(),
        "192.0.2.0".parse::<IpAddr>().unwrap()
    );
    assert!(opt.opt().cookie().unwrap().server().is_some());
    match opt.opt().get(OptionCode::from_int(65001)) {
        Some(AllOptData::Other(unknown)) => {
            assert_eq!(unknown.data(), b"\x01\x02\x03")
        }
        other => panic!("unexpected option {:?}", other),
    }

    assert_eq!(msg.to_vec().unwrap(), data);
}

fn bitmap() -> RtypeBitmap {
    RtypeBitmap::from_rtypes([Rtype::A, Rtype::MX, Rtype::RRSIG])
}

fn dnskey() -> Dnskey {
    Dnskey::new(257, 3, SecAlg::ECDSAP256SHA256, vec![0x2a; 64]).unwrap()
}

fn rrsig() -> Rrsig {
    Rrsig::new(
        Rtype::A,
        SecAlg::ECDSAP256SHA256,
        3,
        Ttl::HOUR,
        1_800_000_000u32.into(),
        1_700_000_000u32.into(),
        12345,
        name("example.com"),
        vec![0x42; 64],
    )
    .unwrap()
}

fn nsec() -> Nsec {
    Nsec::new(name("mail.example.com"), bitmap())
}

fn txt() -> Txt {
    Txt::build_from_slice(b"v=spf1 -all").unwrap()
}

fn charstr(s: &[u8]) -> CharStr {
    CharStr::from_slice(s).unwrap()
}

#[rstest]
#[case::a(A::from_octets(192, 0, 2, 1).into())]
#[case::ns(Ns::new(name("ns1.example.com")).into())]
#[case::cname(Cname::new(name("www.example.com")).into())]
#[case::soa(Soa::new(
    name("ns1.example.com"),
    name("hostmaster.example.com"),
    2024010101,
    Ttl::from_secs(7200),
    Ttl::HOUR,
    Ttl::from_secs(1209600),
    Ttl::HOUR,
).into())]
#[case::wks(Wks::new(
    "192.0.2.1".parse().unwrap(), 6, vec![0x00, 0x00, 0x02]
).unwrap().into())]
#[case::ptr(Ptr::new(name("host.example.com")).into())]
#[case::mx(Mx::new(10, name("mail.example.com")).into())]
#[case::txt(txt().into())]
#[case::aaaa(Aaaa::new("2001:db8::1".parse().unwrap()).into())]
#[case::srv(Srv::new(10, 60, 5060, name("sip.example.com")).into())]
#[case::naptr(Naptr::new(
    100,
    10,
    charstr(b"S"),
    charstr(b"SIP+D2U"),
    charstr(b""),
    name("_sip._udp.example.com"),
).into())]
#[case::dname(Dname::new(name("example.net")).into())]
#[case::opt(Opt::from_options(vec![
    ClientSubnet::new(24, 0, "192.0.2.0".parse().unwrap()).into(),
]).unwrap().into())]
#[case::apl(Apl::new(vec![
    AplItem::new(1, 24, false, &[192, 0, 2]).unwrap(),
    AplItem::new(2, 32, true, &[0x20, 0x01, 0x0d, 0xb8]).unwrap(),
]).unwrap().into())]
#[case::ds(Ds::new(
    60485, SecAlg::RSASHA256, DigestAlg::SHA256, vec![0x7f; 32]
).unwrap().into())]
#[case::rrsig(rrsig().into())]
#[case::nsec(nsec().into())]
#[case::dnskey(dnskey().into())]
#[case::nsec3(Nsec3::new(
    Nsec3HashAlg::SHA1, 1, 10, vec![0xaa, 0xbb], vec![0x11; 20], bitmap()
).unwrap().into())]
#[case::nsec3param(Nsec3param::new(
    Nsec3HashAlg::SHA1, 0, 10, vec![0xaa, 0xbb]
).unwrap().into())]
#[case::tlsa(Tlsa::new(3, 1, 1, vec![0xab; 32]).unwrap().into())]
#[case::caa(Caa::new(0, b"issue", &b"ca.example.net"[..]).unwrap().into())]
#[case::tkey(Tkey::new(
    name("hmac-sha256"),
    1_700_000_000,
    1_700_003_600,
    3,
    TsigRcode::NOERROR,
    vec![0x01; 16],
    &b""[..],
).unwrap().into())]
#[case::tsig(Tsig::new(
    name("hmac-sha256"),
    Time48::from_u64(1_700_000_000),
    300,
    vec![0x5a; 32],
    0x1234,
    TsigRcode::NOERROR,
    &b""[..],
).unwrap().into())]
#[case::key(AllRecordData::Key(dnskey()))]
#[case::sig(AllRecordData::Sig(rrsig()))]
#[case::nxt(AllRecordData::Nxt(nsec()))]
#[case::spf(AllRecordData::Spf(txt()))]
#[case::unknown(
    UnknownRecordData::from_octets(Rtype::from_int(4711), vec![1, 2, 3])
        .unwrap()
        .into()
)]
fn record_data_in_messages(#[case] data: AllRecordData) {
    let rtype = data.rtype();
    let mut msg =
        Message::query(42, Question::new_in(name("example.com"), rtype));
    msg.header_mut().set_qr(true);
    msg.answer_mut().push(Record::new(
        name("host.example.com"),
        Class::IN,
        Ttl::HOUR,
        data,
    ));
    let wire = msg.to_vec().unwrap();

    // The owner points back to the question name.
    assert_eq!(&wire[29..35], b"\x04host\xc0\x0c");

    let parsed = Message::parse(&wire).unwrap();
    assert_eq!(parsed.answer()[0].rtype(), rtype);
    assert_eq!(parsed, msg);
}
