//! DNSSEC signing.
//!
//! This module creates the DNSSEC records of a zone: RRSIG records over
//! the zone’s record sets, the apex DNSKEY record set and its signatures,
//! and the DS records to be placed in the parent zone.
//!
//! The keys of a zone are [`SigningKey`]s. Each key is either a key signing
//! key (KSK) or a zone signing key (ZSK) as given by its [`KeyRole`]. Keys
//! are created from PKCS#8 private keys, either directly or by reading a
//! YAML [`KeyConfig`] which refers to PEM files. The following algorithms
//! are supported: RSASHA1, RSASHA256, RSASHA512, ECDSAP256SHA256, and
//! ECDSAP384SHA384.
//!
//! A [`ZoneSigner`] holds all keys of a zone. Its
//! [`sign_rrset`][ZoneSigner::sign_rrset] signs an [`Rrset`] with every
//! ZSK, [`sign_dnskey`][ZoneSigner::sign_dnskey] signs the apex DNSKEY
//! set with all keys, and [`ds_records`][ZoneSigner::ds_records] produces
//! the DS records for the KSKs.
//!
//! Cryptography is done by `ring`, except for RSASHA1 signatures which
//! `ring` only verifies. These are made with the `rsa` crate.

pub use self::config::{KeyConfig, KeyConfigError, KeyEntry};
pub use self::key::{rsa_encode, KeyError, KeyRole, SigningKey};
pub use self::rrset::Rrset;
pub use self::signer::{signed_data, SignError, ZoneSigner};

pub mod config;
pub mod key;
pub mod rrset;
pub mod signer;
