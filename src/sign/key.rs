//! Private keys for zone signing.

use crate::base::iana::SecAlg;
use crate::base::name::Name;
use crate::base::wire::ComposeError;
use crate::rdata::dnssec::{Dnskey, Timestamp};
use bytes::Bytes;
use core::fmt;
use ring::error::{KeyRejected, Unspecified};
use ring::rand::SecureRandom;
use ring::signature::{
    EcdsaKeyPair, EcdsaSigningAlgorithm, KeyPair, RsaEncoding, RsaKeyPair,
};
use ring::{rsa, signature};
use ::rsa::pkcs1v15;
use ::rsa::pkcs8::DecodePrivateKey;
use ::rsa::signature::{SignatureEncoding, Signer};
use ::rsa::traits::PublicKeyParts;
use ::rsa::RsaPrivateKey;
use sha1::Sha1;

/// The value of the protocol field of all DNSKEY records.
const DNSKEY_PROTOCOL: u8 = 3;

//------------ KeyRole -------------------------------------------------------

/// The role a key plays in a zone.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyRole {
    /// A key signing key.
    ///
    /// It signs the apex DNSKEY record set and is referenced by the DS
    /// records in the parent zone.
    Ksk,

    /// A zone signing key.
    ///
    /// It signs all other record sets of the zone.
    Zsk,
}

impl KeyRole {
    /// Returns the flags value of a DNSKEY record for a key of this role.
    #[must_use]
    pub fn flags(self) -> u16 {
        match self {
            KeyRole::Ksk => Dnskey::KSK_FLAGS,
            KeyRole::Zsk => Dnskey::ZSK_FLAGS,
        }
    }
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            KeyRole::Ksk => "KSK",
            KeyRole::Zsk => "ZSK",
        })
    }
}

//------------ SigningKey ----------------------------------------------------

/// A private key used for signing the records of a zone.
///
/// Next to the key pair itself, the key knows its role, the domain name it
/// signs as, and the validity period given to the signatures it creates.
/// The DNSKEY record data and key tag are derived once when the key is
/// created.
pub struct SigningKey {
    key: PrivateKey,
    algorithm: SecAlg,
    role: KeyRole,
    domain: Name,
    inception: Timestamp,
    expiration: Timestamp,
    dnskey: Dnskey,
    key_tag: u16,
}

#[allow(clippy::large_enum_variant)]
enum PrivateKey {
    Ecdsa(EcdsaKeyPair),
    Rsa(RsaKeyPair, &'static dyn RsaEncoding),

    /// RSA with SHA-1, which `ring` only offers for verification.
    RsaSha1(pkcs1v15::SigningKey<Sha1>),
}

impl SigningKey {
    /// Creates a signing key from a private key in PKCS#8 DER format.
    ///
    /// Supported algorithms are RSASHA1, RSASHA256, RSASHA512,
    /// ECDSAP256SHA256, and ECDSAP384SHA384. The `rng` is only needed by
    /// `ring` to validate ECDSA keys.
    #[allow(clippy::too_many_arguments)]
    pub fn from_pkcs8(
        algorithm: SecAlg,
        role: KeyRole,
        pkcs8: &[u8],
        domain: Name,
        inception: Timestamp,
        expiration: Timestamp,
        rng: &dyn SecureRandom,
    ) -> Result<Self, KeyError> {
        let (key, public_key) = match algorithm {
            SecAlg::RSASHA1 => rsa_sha1_key(pkcs8)?,
            SecAlg::RSASHA256 => {
                rsa_key(pkcs8, &signature::RSA_PKCS1_SHA256)?
            }
            SecAlg::RSASHA512 => {
                rsa_key(pkcs8, &signature::RSA_PKCS1_SHA512)?
            }
            SecAlg::ECDSAP256SHA256 => ecdsa_key(
                pkcs8,
                &signature::ECDSA_P256_SHA256_FIXED_SIGNING,
                rng,
            )?,
            SecAlg::ECDSAP384SHA384 => ecdsa_key(
                pkcs8,
                &signature::ECDSA_P384_SHA384_FIXED_SIGNING,
                rng,
            )?,
            _ => return Err(KeyError::UnsupportedAlgorithm(algorithm)),
        };
        let dnskey = Dnskey::new(
            role.flags(),
            DNSKEY_PROTOCOL,
            algorithm,
            public_key,
        )?;
        let key_tag = dnskey.key_tag();
        Ok(SigningKey {
            key,
            algorithm,
            role,
            domain,
            inception,
            expiration,
            dnskey,
            key_tag,
        })
    }

    /// Generates a new random ECDSA key.
    ///
    /// Returns the key and its PKCS#8 DER encoding for storage. Since
    /// `ring` cannot generate RSA keys, only the ECDSA algorithms are
    /// supported.
    pub fn generate(
        algorithm: SecAlg,
        role: KeyRole,
        domain: Name,
        inception: Timestamp,
        expiration: Timestamp,
        rng: &dyn SecureRandom,
    ) -> Result<(Self, Bytes), KeyError> {
        let alg = match algorithm {
            SecAlg::ECDSAP256SHA256 => {
                &signature::ECDSA_P256_SHA256_FIXED_SIGNING
            }
            SecAlg::ECDSAP384SHA384 => {
                &signature::ECDSA_P384_SHA384_FIXED_SIGNING
            }
            _ => return Err(KeyError::UnsupportedAlgorithm(algorithm)),
        };
        let pkcs8 = EcdsaKeyPair::generate_pkcs8(alg, rng)?;
        let key = Self::from_pkcs8(
            algorithm,
            role,
            pkcs8.as_ref(),
            domain,
            inception,
            expiration,
            rng,
        )?;
        Ok((key, Bytes::copy_from_slice(pkcs8.as_ref())))
    }

    #[must_use]
    pub fn algorithm(&self) -> SecAlg {
        self.algorithm
    }

    #[must_use]
    pub fn role(&self) -> KeyRole {
        self.role
    }

    #[must_use]
    pub fn is_ksk(&self) -> bool {
        self.role == KeyRole::Ksk
    }

    /// Returns the domain name used as the signer name.
    #[must_use]
    pub fn domain(&self) -> &Name {
        &self.domain
    }

    /// Returns the time signatures start being valid.
    #[must_use]
    pub fn inception(&self) -> Timestamp {
        self.inception
    }

    /// Returns the time signatures stop being valid.
    #[must_use]
    pub fn expiration(&self) -> Timestamp {
        self.expiration
    }

    /// Returns the DNSKEY record data for the public key.
    #[must_use]
    pub fn dnskey(&self) -> &Dnskey {
        &self.dnskey
    }

    /// Returns the public key in the format used in DNSKEY records.
    #[must_use]
    pub fn public_key(&self) -> &[u8] {
        self.dnskey.public_key()
    }

    #[must_use]
    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    /// Signs `data`.
    ///
    /// ECDSA signatures are returned as the concatenation of the two
    /// integers r and s, RSA signatures have the length of the modulus.
    pub fn sign(
        &self,
        data: &[u8],
        rng: &dyn SecureRandom,
    ) -> Result<Bytes, Unspecified> {
        match self.key {
            PrivateKey::Ecdsa(ref key) => {
                let sig = key.sign(rng, data)?;
                Ok(Bytes::copy_from_slice(sig.as_ref()))
            }
            PrivateKey::Rsa(ref key, encoding) => {
                let mut sig = vec![0; key.public().modulus_len()];
                key.sign(encoding, rng, data, &mut sig)?;
                Ok(sig.into())
            }
            PrivateKey::RsaSha1(ref key) => {
                let sig = key.try_sign(data).map_err(|_| Unspecified)?;
                Ok(sig.to_vec().into())
            }
        }
    }
}

fn rsa_key(
    pkcs8: &[u8],
    encoding: &'static dyn RsaEncoding,
) -> Result<(PrivateKey, Vec<u8>), KeyError> {
    let key = RsaKeyPair::from_pkcs8(pkcs8)?;
    let components: rsa::PublicKeyComponents<Vec<u8>> = key.public().into();
    let public_key = rsa_encode(&components.e, &components.n);
    Ok((PrivateKey::Rsa(key, encoding), public_key))
}

fn rsa_sha1_key(pkcs8: &[u8]) -> Result<(PrivateKey, Vec<u8>), KeyError> {
    let key =
        RsaPrivateKey::from_pkcs8_der(pkcs8).map_err(KeyError::Pkcs8)?;
    let (e, n) = (key.e().to_bytes_be(), key.n().to_bytes_be());
    let public_key = rsa_encode(&e, &n);
    Ok((PrivateKey::RsaSha1(pkcs1v15::SigningKey::new(key)), public_key))
}

fn ecdsa_key(
    pkcs8: &[u8],
    alg: &'static EcdsaSigningAlgorithm,
    rng: &dyn SecureRandom,
) -> Result<(PrivateKey, Vec<u8>), KeyError> {
    let key = EcdsaKeyPair::from_pkcs8(alg, pkcs8, rng)?;
    // Drop the leading 0x04 of the uncompressed point.
    let public_key = key.public_key().as_ref()[1..].to_vec();
    Ok((PrivateKey::Ecdsa(key), public_key))
}

/// Encodes an RSA public key as described in RFC 3110, section 2.
///
/// Exponent and modulus are given as big-endian integers.
#[must_use]
pub fn rsa_encode(exponent: &[u8], modulus: &[u8]) -> Vec<u8> {
    let exponent = trim_leading_zeros(exponent);
    let modulus = trim_leading_zeros(modulus);
    let mut res = Vec::with_capacity(3 + exponent.len() + modulus.len());
    match u8::try_from(exponent.len()) {
        Ok(len) if len > 0 => res.push(len),
        _ => {
            res.push(0);
            res.extend_from_slice(&(exponent.len() as u16).to_be_bytes());
        }
    }
    res.extend_from_slice(exponent);
    res.extend_from_slice(modulus);
    res
}

fn trim_leading_zeros(int: &[u8]) -> &[u8] {
    let start = int.iter().position(|&b| b != 0).unwrap_or(int.len());
    &int[start..]
}

//--- Debug

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &self.algorithm)
            .field("role", &self.role)
            .field("domain", &self.domain)
            .field("inception", &self.inception)
            .field("expiration", &self.expiration)
            .field("key_tag", &self.key_tag)
            .finish_non_exhaustive()
    }
}

//============ Error Types ===================================================

//------------ KeyError ------------------------------------------------------

/// A signing key could not be created.
#[derive(Debug)]
pub enum KeyError {
    /// The algorithm is not supported for signing.
    UnsupportedAlgorithm(SecAlg),

    /// The private key was rejected.
    Rejected(KeyRejected),

    /// The PKCS#8 document of an RSASHA1 key couldn’t be decoded.
    Pkcs8(::rsa::pkcs8::Error),

    /// Key generation failed.
    GenerationFailed,

    /// The public key is too long for a DNSKEY record.
    LongKey,
}

impl From<KeyRejected> for KeyError {
    fn from(err: KeyRejected) -> Self {
        KeyError::Rejected(err)
    }
}

impl From<Unspecified> for KeyError {
    fn from(_: Unspecified) -> Self {
        KeyError::GenerationFailed
    }
}

impl From<ComposeError> for KeyError {
    fn from(_: ComposeError) -> Self {
        KeyError::LongKey
    }
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KeyError::UnsupportedAlgorithm(alg) => {
                write!(f, "unsupported signing algorithm {}", alg)
            }
            KeyError::Rejected(ref err) => {
                write!(f, "invalid private key: {}", err)
            }
            KeyError::Pkcs8(ref err) => {
                write!(f, "invalid private key: {}", err)
            }
            KeyError::GenerationFailed => {
                f.write_str("generating key failed")
            }
            KeyError::LongKey => f.write_str("public key too long"),
        }
    }
}

impl std::error::Error for KeyError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use ring::rand::SystemRandom;

    fn apex() -> Name {
        "example.com".parse().unwrap()
    }

    #[test]
    fn rfc3110_encoding() {
        assert_eq!(
            rsa_encode(b"\x00\x01\x00\x01", b"\x00\xc3\x55"),
            b"\x03\x01\x00\x01\xc3\x55"
        );
        let long_exp = [1u8; 300];
        let encoded = rsa_encode(&long_exp, b"\x01");
        assert_eq!(&encoded[..3], b"\x00\x01\x2c");
        assert_eq!(encoded.len(), 3 + 300 + 1);
    }

    #[test]
    fn generated_ecdsa_keys() {
        let rng = SystemRandom::new();
        for (alg, len) in [
            (SecAlg::ECDSAP256SHA256, 64),
            (SecAlg::ECDSAP384SHA384, 96),
        ] {
            let (key, _) = SigningKey::generate(
                alg,
                KeyRole::Zsk,
                apex(),
                0u32.into(),
                100u32.into(),
                &rng,
            )
            .unwrap();
            assert_eq!(key.algorithm(), alg);
            assert_eq!(key.public_key().len(), len);
            assert_eq!(key.dnskey().flags(), 256);
            assert_eq!(key.dnskey().protocol(), 3);
            assert_eq!(key.key_tag(), key.dnskey().key_tag());
            assert_eq!(key.sign(b"data", &rng).unwrap().len(), len);
        }
    }

    #[test]
    fn pkcs8_roundtrip() {
        let rng = SystemRandom::new();
        let (key, pkcs8) = SigningKey::generate(
            SecAlg::ECDSAP256SHA256,
            KeyRole::Ksk,
            apex(),
            0u32.into(),
            100u32.into(),
            &rng,
        )
        .unwrap();
        let loaded = SigningKey::from_pkcs8(
            SecAlg::ECDSAP256SHA256,
            KeyRole::Ksk,
            &pkcs8,
            apex(),
            0u32.into(),
            100u32.into(),
            &rng,
        )
        .unwrap();
        assert!(loaded.is_ksk());
        assert_eq!(loaded.dnskey(), key.dnskey());
        assert_eq!(loaded.dnskey().flags(), 257);
    }

    #[test]
    fn rsasha1_bad_pkcs8() {
        let err = SigningKey::from_pkcs8(
            SecAlg::RSASHA1,
            KeyRole::Zsk,
            b"\x30\x03\x02\x01\x00",
            apex(),
            0u32.into(),
            100u32.into(),
            &SystemRandom::new(),
        )
        .unwrap_err();
        assert!(matches!(err, KeyError::Pkcs8(_)));
        assert!(err.to_string().starts_with("invalid private key"));
    }

    #[test]
    fn unsupported_algorithms() {
        let rng = SystemRandom::new();
        assert!(matches!(
            SigningKey::generate(
                SecAlg::RSASHA256,
                KeyRole::Zsk,
                apex(),
                0u32.into(),
                100u32.into(),
                &rng,
            ),
            Err(KeyError::UnsupportedAlgorithm(SecAlg::RSASHA256))
        ));
        assert!(matches!(
            SigningKey::from_pkcs8(
                SecAlg::ED25519,
                KeyRole::Zsk,
                b"",
                apex(),
                0u32.into(),
                100u32.into(),
                &rng,
            ),
            Err(KeyError::UnsupportedAlgorithm(SecAlg::ED25519))
        ));
        assert!(matches!(
            SigningKey::from_pkcs8(
                SecAlg::ECDSAP256SHA256,
                KeyRole::Zsk,
                b"not a key",
                apex(),
                0u32.into(),
                100u32.into(),
                &rng,
            ),
            Err(KeyError::Rejected(_))
        ));
    }
}
