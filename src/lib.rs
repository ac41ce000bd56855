//! A DNS protocol engine.
//!
//! This crate provides the building blocks at the core of an authoritative
//! name server: encoding and decoding DNS messages in wire format, a model
//! of the resource record type space including DNSSEC and transaction
//! security records, message authentication with TSIG, and signing of zone
//! data for DNSSEC.
//!
//! # Modules
//!
//! * [base] contains the fundamental types: the wire format primitives,
//!   domain names and their compression, the message header, questions,
//!   records, EDNS options, and complete messages,
//! * [rdata] contains one type for each supported record type and the
//!   closed [`AllRecordData`][rdata::AllRecordData] enum over all of them.
#![cfg_attr(feature = "tsig", doc = "* [tsig]:")]
#![cfg_attr(not(feature = "tsig"), doc = "* tsig:")]
//!   Signing and verifying messages with TSIG.
#![cfg_attr(feature = "sign", doc = "* [sign]:")]
#![cfg_attr(not(feature = "sign"), doc = "* sign:")]
//!   Producing RRSIG, DNSKEY, and DS records for a zone.
//!
//! # Reference of Feature Flags
//!
//! * `serde`: `Serialize` and `Deserialize` for the IANA code point types.
//! * `sign`: DNSSEC zone signing. This pulls in `serde` and `serde_yaml`
//!   for the key configuration, `rustls-pemfile` for reading private
//!   keys, and `rsa` with `sha1` for RSASHA1 signatures.
//! * `tsig`: support for signing and validating messages via TSIG. This
//!   pulls in `hmac` and `md-5` for HMAC-MD5.
//!
//! `sign` and `tsig` are enabled by default.
//!
//! # Concurrency
//!
//! All codec operations work on values and buffers owned by the caller.
//! The only long-lived state, TSIG key stores and a [`ZoneSigner`]'s keys,
//! is immutable after construction and can be shared between threads.
//!
#![cfg_attr(feature = "sign", doc = "[`ZoneSigner`]: sign::ZoneSigner")]
#![cfg_attr(not(feature = "sign"), doc = "[`ZoneSigner`]: index.html")]
#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
pub mod rdata;
#[cfg(feature = "sign")]
#[cfg_attr(docsrs, doc(cfg(feature = "sign")))]
pub mod sign;
#[cfg(feature = "tsig")]
#[cfg_attr(docsrs, doc(cfg(feature = "tsig")))]
pub mod tsig;
