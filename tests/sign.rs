//! Signing a zone with keys loaded from a key configuration.
#![cfg(feature = "sign")]

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use ring::digest;
use ring::signature::{self, RsaPublicKeyComponents};

use dnscore::base::iana::{Class, DigestAlg, Rtype, SecAlg};
use dnscore::base::{Name, Ttl};
use dnscore::rdata::{Rrsig, Soa, Timestamp};
use dnscore::sign::{
    signed_data, KeyConfig, KeyConfigError, KeyError, Rrset, ZoneSigner,
};

type Verification = &'static signature::RsaParameters;

const FIXTURE: &str = "test-data/rsa2048.pem";

fn name(s: &str) -> Name {
    s.parse().unwrap()
}

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(FIXTURE)
}

fn entry(role: &str, key_file: &Path, algorithm: &str) -> String {
    format!(
        "- type: {}\n  key_file: {}\n  algorithm: {}\n  \
         not_before: 1700000000\n  not_after: 1800000000\n  \
         domain: example.com\n",
        role,
        key_file.display(),
        algorithm
    )
}

/// Writes a KSK and a ZSK configuration into `dir`.
///
/// The KSK refers to the fixture by absolute path, the ZSK to a copy of
/// it next to the configuration.
fn write_configs(dir: &Path) -> (PathBuf, PathBuf) {
    let ksk = dir.join("ksk.yaml");
    fs::write(&ksk, entry("ksk", &fixture(), "RSASHA256")).unwrap();
    fs::copy(fixture(), dir.join("zsk.pem")).unwrap();
    let zsk = dir.join("zsk.yaml");
    fs::write(&zsk, entry("zsk", Path::new("zsk.pem"), "8")).unwrap();
    (ksk, zsk)
}

fn signer() -> ZoneSigner {
    common::init_logging();
    let dir = tempfile::tempdir().unwrap();
    let (ksk, zsk) = write_configs(dir.path());
    ZoneSigner::from_config_files(name("example.com"), ksk, zsk).unwrap()
}

fn verify_rsa(public_key: &[u8], rrset: &Rrset, rrsig: &Rrsig) {
    verify_with(
        &signature::RSA_PKCS1_2048_8192_SHA256,
        public_key,
        rrset,
        rrsig,
    )
}

fn verify_with(
    params: Verification,
    public_key: &[u8],
    rrset: &Rrset,
    rrsig: &Rrsig,
) {
    // RFC 3110 format with a one octet exponent length.
    let exp_len = usize::from(public_key[0]);
    let (e, n) = public_key[1..].split_at(exp_len);
    RsaPublicKeyComponents { n, e }
        .verify(
            params,
            &signed_data(rrsig.proto(), rrset).unwrap(),
            rrsig.signature(),
        )
        .unwrap();
}

fn soa_rrset() -> Rrset {
    let mut rrset =
        Rrset::new(name("example.com"), Class::IN, Rtype::SOA, Ttl::HOUR);
    rrset
        .push(Soa::new(
            name("ns1.example.com"),
            name("hostmaster.example.com"),
            2024010101,
            Ttl::from_secs(7200),
            Ttl::HOUR,
            Ttl::from_secs(1209600),
            Ttl::HOUR,
        ))
        .unwrap();
    rrset
}

#[test]
fn keys_from_config() {
    let signer = signer();
    assert_eq!(signer.ksks().len(), 1);
    assert_eq!(signer.zsks().len(), 1);

    let ksk = &signer.ksks()[0];
    assert_eq!(ksk.algorithm(), SecAlg::RSASHA256);
    assert_eq!(ksk.dnskey().flags(), 257);
    assert_eq!(ksk.key_tag(), 54059);
    assert_eq!(ksk.domain(), &name("example.com"));
    assert_eq!(ksk.inception(), Timestamp::from(1_700_000_000u32));
    assert_eq!(ksk.expiration(), Timestamp::from(1_800_000_000u32));

    // 2048 bit modulus with exponent 65537 in RFC 3110 format.
    let public_key = ksk.public_key();
    assert_eq!(public_key.len(), 260);
    assert_eq!(&public_key[..4], b"\x03\x01\x00\x01");

    let zsk = &signer.zsks()[0];
    assert_eq!(zsk.dnskey().flags(), 256);
    assert_eq!(zsk.key_tag(), 54058);
    assert_eq!(zsk.public_key(), public_key);
}

#[test]
fn sign_rrset() {
    let signer = signer();
    let rrset = soa_rrset();
    let rrsigs = signer.sign_rrset(&rrset).unwrap();
    assert_eq!(rrsigs.len(), 1);
    let rrsig = rrsigs[0].data();
    assert_eq!(rrsig.type_covered(), Rtype::SOA);
    assert_eq!(rrsig.algorithm(), SecAlg::RSASHA256);
    assert_eq!(rrsig.labels(), 2);
    assert_eq!(rrsig.key_tag(), 54058);
    assert_eq!(rrsig.signature().len(), 256);
    verify_rsa(signer.zsks()[0].public_key(), &rrset, rrsig);

    // Everything but the signature stays the same between runs.
    let again = signer.sign_rrset(&rrset).unwrap();
    assert_eq!(again[0].data().proto(), rrsig.proto());
}

#[test]
fn sign_dnskey() {
    let signer = signer();
    let rrsigs = signer.sign_dnskey(Ttl::DAY).unwrap();
    assert_eq!(rrsigs.len(), 2);
    let rrset = signer.dnskey_rrset(Ttl::DAY);
    for (rrsig, tag) in rrsigs.iter().zip([54059, 54058]) {
        assert_eq!(rrsig.owner(), &name("example.com"));
        assert_eq!(rrsig.class(), Class::IN);
        assert_eq!(rrsig.data().type_covered(), Rtype::DNSKEY);
        assert_eq!(rrsig.data().key_tag(), tag);
        verify_rsa(signer.ksks()[0].public_key(), &rrset, rrsig.data());
    }
}

#[test]
fn ds_records() {
    let signer = signer();
    let ds = signer.ds_records().unwrap();
    assert_eq!(ds.len(), 3);

    let mut buf = b"\x07example\x03com\x00\x01\x01\x03\x08".to_vec();
    buf.extend_from_slice(signer.ksks()[0].public_key());
    for (ds, (digest_type, alg)) in ds.iter().zip([
        (DigestAlg::SHA1, &digest::SHA1_FOR_LEGACY_USE_ONLY),
        (DigestAlg::SHA256, &digest::SHA256),
        (DigestAlg::SHA384, &digest::SHA384),
    ]) {
        assert_eq!(ds.key_tag(), 54059);
        assert_eq!(ds.algorithm(), SecAlg::RSASHA256);
        assert_eq!(ds.digest_type(), digest_type);
        assert_eq!(ds.digest(), digest::digest(alg, &buf).as_ref());
    }
}

#[test]
fn rsasha1_signing() {
    common::init_logging();
    let dir = tempfile::tempdir().unwrap();
    let ksk = dir.path().join("ksk.yaml");
    fs::write(&ksk, entry("ksk", &fixture(), "RSASHA1")).unwrap();
    let zsk = dir.path().join("zsk.yaml");
    fs::write(&zsk, entry("zsk", &fixture(), "5")).unwrap();
    let signer =
        ZoneSigner::from_config_files(name("example.com"), ksk, zsk).unwrap();

    assert_eq!(signer.ksks()[0].algorithm(), SecAlg::RSASHA1);
    assert_eq!(signer.ksks()[0].key_tag(), 54056);
    assert_eq!(signer.zsks()[0].key_tag(), 54055);
    assert_eq!(signer.zsks()[0].public_key().len(), 260);

    let rrset = soa_rrset();
    let rrsigs = signer.sign_rrset(&rrset).unwrap();
    assert_eq!(rrsigs.len(), 1);
    let rrsig = rrsigs[0].data();
    assert_eq!(rrsig.algorithm(), SecAlg::RSASHA1);
    assert_eq!(rrsig.key_tag(), 54055);
    assert_eq!(rrsig.signature().len(), 256);
    verify_with(
        &signature::RSA_PKCS1_2048_8192_SHA1_FOR_LEGACY_USE_ONLY,
        signer.zsks()[0].public_key(),
        &rrset,
        rrsig,
    );

    // PKCS#1 v1.5 is deterministic.
    let again = signer.sign_rrset(&rrset).unwrap();
    assert_eq!(again[0].data(), rrsig);
}

#[test]
fn unsupported_algorithm() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keys.yaml");
    fs::write(&path, entry("ksk", &fixture(), "ED25519")).unwrap();
    let config = KeyConfig::from_file(&path).unwrap();
    assert!(matches!(
        config.load_keys(&ring::rand::SystemRandom::new()),
        Err(KeyConfigError::Key(
            _,
            KeyError::UnsupportedAlgorithm(SecAlg::ED25519)
        ))
    ));
}

#[test]
fn missing_key_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keys.yaml");
    fs::write(&path, entry("zsk", Path::new("missing.pem"), "RSASHA256"))
        .unwrap();
    let err = ZoneSigner::from_config_files(name("example.com"), &path, &path)
        .unwrap_err();
    assert!(matches!(err, KeyConfigError::Io(..)));
    assert!(err.to_string().contains("missing.pem"));
}

#[test]
fn not_a_key() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("empty.pem"), "no key in here\n").unwrap();
    let path = dir.path().join("keys.yaml");
    fs::write(&path, entry("zsk", Path::new("empty.pem"), "RSASHA256"))
        .unwrap();
    assert!(matches!(
        ZoneSigner::from_config_files(name("example.com"), &path, &path),
        Err(KeyConfigError::NoKey(_))
    ));
}
