//! Signing the record sets of a zone.

use super::config::{KeyConfig, KeyConfigError};
use super::key::{KeyRole, SigningKey};
use super::rrset::Rrset;
use crate::base::iana::{Class, DigestAlg};
use crate::base::name::Name;
use crate::base::rdata::ComposeRecordData;
use crate::base::record::{Record, Ttl};
use crate::base::wire::ComposeError;
use crate::rdata::dnssec::{Dnskey, Ds, ProtoRrsig, Rrsig};
use core::convert::Infallible;
use core::fmt;
use ring::digest;
use ring::rand::SystemRandom;
use std::path::Path;
use tracing::{debug, trace};

/// The digest algorithms DS records are created for.
const DS_DIGESTS: [DigestAlg; 3] =
    [DigestAlg::SHA1, DigestAlg::SHA256, DigestAlg::SHA384];

//------------ ZoneSigner ----------------------------------------------------

/// Creates the DNSSEC records for a zone.
///
/// The signer holds the key signing keys and zone signing keys of a zone.
/// The keys are given at construction time and never change. All record
/// sets except the apex DNSKEY set are signed with the zone signing keys,
/// the DNSKEY set is signed with all keys.
#[derive(Debug)]
pub struct ZoneSigner {
    apex: Name,
    ksks: Vec<SigningKey>,
    zsks: Vec<SigningKey>,
    rng: SystemRandom,
}

impl ZoneSigner {
    /// Creates a signer for the zone at `apex` from a set of keys.
    ///
    /// The keys are sorted into KSKs and ZSKs by their role.
    pub fn new(
        apex: Name,
        keys: impl IntoIterator<Item = SigningKey>,
    ) -> Self {
        let (ksks, zsks) = keys.into_iter().partition(SigningKey::is_ksk);
        ZoneSigner {
            apex,
            ksks,
            zsks,
            rng: SystemRandom::new(),
        }
    }

    /// Creates a signer from key configurations.
    pub fn from_configs<'a>(
        apex: Name,
        configs: impl IntoIterator<Item = &'a KeyConfig>,
    ) -> Result<Self, KeyConfigError> {
        let rng = SystemRandom::new();
        let mut keys = Vec::new();
        for config in configs {
            keys.extend(config.load_keys(&rng)?);
        }
        let res = Self::new(apex, keys);
        debug!(
            "zone signer for {} with {} KSKs and {} ZSKs",
            res.apex,
            res.ksks.len(),
            res.zsks.len()
        );
        Ok(res)
    }

    /// Creates a signer from a KSK and a ZSK configuration file.
    ///
    /// The role of each key is taken from its entry, so both files may in
    /// fact contain keys of either role.
    pub fn from_config_files(
        apex: Name,
        ksk_config: impl AsRef<Path>,
        zsk_config: impl AsRef<Path>,
    ) -> Result<Self, KeyConfigError> {
        let ksk_config = KeyConfig::from_file(ksk_config)?;
        let zsk_config = KeyConfig::from_file(zsk_config)?;
        Self::from_configs(apex, [&ksk_config, &zsk_config])
    }

    #[must_use]
    pub fn apex(&self) -> &Name {
        &self.apex
    }

    #[must_use]
    pub fn ksks(&self) -> &[SigningKey] {
        &self.ksks
    }

    #[must_use]
    pub fn zsks(&self) -> &[SigningKey] {
        &self.zsks
    }

    /// Signs a record set with all zone signing keys.
    ///
    /// Returns one RRSIG record per key.
    pub fn sign_rrset(
        &self,
        rrset: &Rrset,
    ) -> Result<Vec<Record<Rrsig>>, SignError> {
        self.sign_with(rrset, self.zsks.iter())
    }

    /// Signs the apex DNSKEY record set with all keys.
    ///
    /// The record set contains the DNSKEY records of all keys and uses the
    /// given TTL.
    pub fn sign_dnskey(
        &self,
        ttl: Ttl,
    ) -> Result<Vec<Record<Rrsig>>, SignError> {
        let rrset = self.dnskey_rrset(ttl);
        self.sign_with(&rrset, self.ksks.iter().chain(self.zsks.iter()))
    }

    /// Returns the apex DNSKEY record set.
    #[must_use]
    pub fn dnskey_rrset(&self, ttl: Ttl) -> Rrset {
        Rrset::from_dnskeys(
            self.apex.clone(),
            Class::IN,
            ttl,
            self.dnskey_records(),
        )
    }

    /// Returns the DNSKEY record data of all keys, KSKs first.
    #[must_use]
    pub fn dnskey_records(&self) -> Vec<Dnskey> {
        self.ksks
            .iter()
            .chain(self.zsks.iter())
            .map(|key| key.dnskey().clone())
            .collect()
    }

    /// Returns the public keys of the KSKs in DNSKEY format.
    pub fn ksk_public_keys(&self) -> impl Iterator<Item = &[u8]> {
        self.ksks.iter().map(SigningKey::public_key)
    }

    /// Returns the public keys of the ZSKs in DNSKEY format.
    pub fn zsk_public_keys(&self) -> impl Iterator<Item = &[u8]> {
        self.zsks.iter().map(SigningKey::public_key)
    }

    /// Returns the DS record data for all KSKs.
    ///
    /// There are three records for each key, using SHA-1, SHA-256, and
    /// SHA-384 in this order.
    pub fn ds_records(&self) -> Result<Vec<Ds>, SignError> {
        let mut res = Vec::with_capacity(self.ksks.len() * DS_DIGESTS.len());
        for ksk in &self.ksks {
            for digest_type in DS_DIGESTS {
                res.push(ds_for_key(ksk, digest_type)?);
            }
        }
        Ok(res)
    }

    fn sign_with<'a>(
        &self,
        rrset: &Rrset,
        keys: impl Iterator<Item = &'a SigningKey>,
    ) -> Result<Vec<Record<Rrsig>>, SignError> {
        if rrset.is_empty() {
            return Err(SignError::EmptyRrset);
        }
        let mut res = Vec::new();
        for key in keys {
            let proto = ProtoRrsig::new(
                rrset.rtype(),
                key.algorithm(),
                rrset.owner().rrsig_label_count(),
                rrset.ttl(),
                key.expiration(),
                key.inception(),
                key.key_tag(),
                key.domain().clone(),
            );
            let data = signed_data(&proto, rrset)?;
            let signature = key.sign(&data, &self.rng).map_err(|_| {
                SignError::SigningFailed(key.role(), key.key_tag())
            })?;
            trace!(
                "signed {} {} with key tag {}",
                rrset.owner(),
                rrset.rtype(),
                key.key_tag()
            );
            res.push(Record::new(
                rrset.owner().clone(),
                rrset.class(),
                rrset.ttl(),
                proto.into_rrsig(signature)?,
            ));
        }
        Ok(res)
    }
}

/// Produces the data a signature over a record set is calculated from.
///
/// This is the canonical RRSIG record data without the signature followed
/// by the records of the set in canonical form, ordered by their canonical
/// record data. Each record uses the TTL of the set. Duplicate records are
/// kept.
pub fn signed_data(
    proto: &ProtoRrsig,
    rrset: &Rrset,
) -> Result<Vec<u8>, ComposeError> {
    let mut rdatas = Vec::with_capacity(rrset.len());
    for data in rrset.data() {
        let mut rdata = Vec::new();
        data.compose_canonical_rdata(&mut rdata)?;
        if rdata.len() > usize::from(u16::MAX) {
            return Err(ComposeError::LongData);
        }
        rdatas.push(rdata);
    }
    rdatas.sort();

    let mut res = Vec::new();
    proto.compose_canonical(&mut res)?;
    for rdata in &rdatas {
        rrset.owner().compose_canonical(&mut res)?;
        rrset.rtype().compose(&mut res)?;
        rrset.class().compose(&mut res)?;
        rrset.ttl().compose(&mut res)?;
        res.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        res.extend_from_slice(rdata);
    }
    Ok(res)
}

/// Creates the DS record data for a key with the given digest.
fn ds_for_key(
    key: &SigningKey,
    digest_type: DigestAlg,
) -> Result<Ds, SignError> {
    let alg = match digest_type {
        DigestAlg::SHA1 => &digest::SHA1_FOR_LEGACY_USE_ONLY,
        DigestAlg::SHA256 => &digest::SHA256,
        DigestAlg::SHA384 => &digest::SHA384,
        _ => return Err(SignError::UnsupportedDigest(digest_type)),
    };
    let mut buf = Vec::new();
    key.domain().compose_canonical(&mut buf)?;
    key.dnskey().compose_canonical_rdata(&mut buf)?;
    let digest = digest::digest(alg, &buf);
    Ok(Ds::new(
        key.key_tag(),
        key.algorithm(),
        digest_type,
        bytes::Bytes::copy_from_slice(digest.as_ref()),
    )?)
}

//============ Error Types ===================================================

//------------ SignError -----------------------------------------------------

/// Signing a record set failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SignError {
    /// The record set is empty.
    EmptyRrset,

    /// The records could not be assembled.
    Compose(ComposeError),

    /// The crypto library failed to sign with the key.
    SigningFailed(KeyRole, u16),

    /// The digest algorithm is not supported.
    UnsupportedDigest(DigestAlg),
}

impl From<ComposeError> for SignError {
    fn from(err: ComposeError) -> Self {
        SignError::Compose(err)
    }
}

impl From<Infallible> for SignError {
    fn from(err: Infallible) -> Self {
        match err {}
    }
}

impl fmt::Display for SignError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SignError::EmptyRrset => f.write_str("empty record set"),
            SignError::Compose(ref err) => fmt::Display::fmt(err, f),
            SignError::SigningFailed(role, tag) => {
                write!(f, "signing with {} {} failed", role, tag)
            }
            SignError::UnsupportedDigest(alg) => {
                write!(f, "unsupported digest algorithm {}", alg)
            }
        }
    }
}

impl std::error::Error for SignError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::{Rtype, SecAlg};
    use crate::rdata::dnssec::Timestamp;
    use crate::rdata::{Mx, A};
    use ring::signature;

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    fn key(role: KeyRole) -> SigningKey {
        SigningKey::generate(
            SecAlg::ECDSAP256SHA256,
            role,
            name("example.com"),
            Timestamp::from(1_700_000_000u32),
            Timestamp::from(1_800_000_000u32),
            &SystemRandom::new(),
        )
        .unwrap()
        .0
    }

    fn signer() -> ZoneSigner {
        ZoneSigner::new(
            name("example.com"),
            [key(KeyRole::Ksk), key(KeyRole::Zsk)],
        )
    }

    fn a_rrset(owner: &str, addrs: &[u8]) -> Rrset {
        let mut res = Rrset::new(name(owner), Class::IN, Rtype::A, Ttl::HOUR);
        for &addr in addrs {
            res.push(A::from_octets(192, 0, 2, addr)).unwrap();
        }
        res
    }

    fn verify(key: &SigningKey, rrset: &Rrset, rrsig: &Rrsig) {
        let mut public_key = vec![4];
        public_key.extend_from_slice(key.public_key());
        let data = signed_data(rrsig.proto(), rrset).unwrap();
        signature::UnparsedPublicKey::new(
            &signature::ECDSA_P256_SHA256_FIXED,
            public_key,
        )
        .verify(&data, rrsig.signature())
        .unwrap();
    }

    #[test]
    fn sign_rrset() {
        let signer = signer();
        let rrset = a_rrset("www.example.com", &[2, 1]);
        let rrsigs = signer.sign_rrset(&rrset).unwrap();
        assert_eq!(rrsigs.len(), 1);
        let rrsig = &rrsigs[0];
        let zsk = &signer.zsks()[0];
        assert_eq!(rrsig.owner(), rrset.owner());
        assert_eq!(rrsig.ttl(), Ttl::HOUR);
        let data = rrsig.data();
        assert_eq!(data.type_covered(), Rtype::A);
        assert_eq!(data.algorithm(), SecAlg::ECDSAP256SHA256);
        assert_eq!(data.labels(), 3);
        assert_eq!(data.original_ttl(), Ttl::HOUR);
        assert_eq!(data.inception(), Timestamp::from(1_700_000_000u32));
        assert_eq!(data.expiration(), Timestamp::from(1_800_000_000u32));
        assert_eq!(data.key_tag(), zsk.key_tag());
        assert_eq!(data.signer_name(), &name("example.com"));
        assert_eq!(data.signature().len(), 64);
        verify(zsk, &rrset, data);
    }

    #[test]
    fn signed_data_is_canonical() {
        let signer = signer();
        let zsk = &signer.zsks()[0];
        let rrsig =
            signer.sign_rrset(&a_rrset("example.com", &[1, 2])).unwrap();
        let proto = rrsig[0].data().proto();

        // Record order and owner case don’t matter.
        let data =
            signed_data(proto, &a_rrset("example.com", &[1, 2])).unwrap();
        assert_eq!(
            data,
            signed_data(proto, &a_rrset("EXAMPLE.com", &[2, 1])).unwrap()
        );
        verify(zsk, &a_rrset("Example.COM", &[2, 1]), rrsig[0].data());

        // Duplicates are kept.
        assert_ne!(
            data,
            signed_data(proto, &a_rrset("example.com", &[1, 2, 2])).unwrap()
        );

        // The records follow the RRSIG data, starting with the owner.
        let mut head = Vec::new();
        proto.compose_canonical(&mut head).unwrap();
        assert!(data.starts_with(&head));
        assert_eq!(
            &data[head.len()..],
            b"\x07example\x03com\x00\x00\x01\x00\x01\x00\x00\x0e\x10\
              \x00\x04\xc0\x00\x02\x01\
              \x07example\x03com\x00\x00\x01\x00\x01\x00\x00\x0e\x10\
              \x00\x04\xc0\x00\x02\x02"
        );
    }

    #[test]
    fn wildcard_labels() {
        let rrsigs = signer()
            .sign_rrset(&a_rrset("*.example.com", &[1]))
            .unwrap();
        assert_eq!(rrsigs[0].data().labels(), 2);
    }

    #[test]
    fn names_in_rdata_are_lowercased() {
        let signer = signer();
        let mut upper =
            Rrset::new(name("example.com"), Class::IN, Rtype::MX, Ttl::HOUR);
        upper.push(Mx::new(10, name("MAIL.Example.com"))).unwrap();
        let mut lower =
            Rrset::new(name("example.com"), Class::IN, Rtype::MX, Ttl::HOUR);
        lower.push(Mx::new(10, name("mail.example.com"))).unwrap();
        let rrsig = signer.sign_rrset(&upper).unwrap();
        let proto = rrsig[0].data().proto();
        assert_eq!(
            signed_data(proto, &upper).unwrap(),
            signed_data(proto, &lower).unwrap()
        );
    }

    #[test]
    fn empty_rrset() {
        assert_eq!(
            signer().sign_rrset(&a_rrset("example.com", &[])),
            Err(SignError::EmptyRrset)
        );
    }

    #[test]
    fn sign_dnskey() {
        let signer = signer();
        let rrsigs = signer.sign_dnskey(Ttl::DAY).unwrap();
        assert_eq!(rrsigs.len(), 2);
        let rrset = signer.dnskey_rrset(Ttl::DAY);
        assert_eq!(rrset.len(), 2);
        assert_eq!(rrsigs[0].data().key_tag(), signer.ksks()[0].key_tag());
        assert_eq!(rrsigs[1].data().key_tag(), signer.zsks()[0].key_tag());
        for rrsig in &rrsigs {
            assert_eq!(rrsig.owner(), &name("example.com"));
            assert_eq!(rrsig.data().type_covered(), Rtype::DNSKEY);
            assert_eq!(rrsig.data().original_ttl(), Ttl::DAY);
        }
        verify(&signer.ksks()[0], &rrset, rrsigs[0].data());
        verify(&signer.zsks()[0], &rrset, rrsigs[1].data());
    }

    #[test]
    fn dnskeys_and_public_keys() {
        let signer = signer();
        let dnskeys = signer.dnskey_records();
        assert_eq!(dnskeys.len(), 2);
        assert_eq!(dnskeys[0].flags(), 257);
        assert_eq!(dnskeys[1].flags(), 256);
        assert_eq!(
            signer.ksk_public_keys().collect::<Vec<_>>(),
            vec![dnskeys[0].public_key()]
        );
        assert_eq!(
            signer.zsk_public_keys().collect::<Vec<_>>(),
            vec![dnskeys[1].public_key()]
        );
    }

    #[test]
    fn ds_records() {
        let signer = signer();
        let ksk = &signer.ksks()[0];
        let ds = signer.ds_records().unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.iter().map(Ds::digest_type).collect::<Vec<_>>(),
            DS_DIGESTS
        );
        assert_eq!(
            ds.iter().map(|ds| ds.digest().len()).collect::<Vec<_>>(),
            [20, 32, 48]
        );
        let mut buf = b"\x07example\x03com\x00".to_vec();
        buf.extend_from_slice(&[0x01, 0x01, 0x03, 0x0d]);
        buf.extend_from_slice(ksk.public_key());
        assert_eq!(
            ds[1].digest(),
            digest::digest(&digest::SHA256, &buf).as_ref()
        );
        for item in &ds {
            assert_eq!(item.key_tag(), ksk.key_tag());
            assert_eq!(item.algorithm(), SecAlg::ECDSAP256SHA256);
        }
    }
}
