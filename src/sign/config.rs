//! Loading signing keys from a YAML key configuration.
//!
//! A key configuration is a YAML list with one entry per key:
//!
//! ```yaml
//! - type: ksk
//!   key_file: ksk.pem
//!   algorithm: ECDSAP256SHA256
//!   not_before: 1700000000
//!   not_after: 1800000000
//!   domain: example.com
//! ```
//!
//! The `type` is either `ksk` or `zsk`. The key file contains the private
//! key in PKCS#8 PEM format. A relative path is taken relative to the
//! directory of the configuration file. The algorithm is given by its
//! mnemonic or number. `not_before` and `not_after` are the inception and
//! expiration times of signatures made with the key in seconds since the
//! Unix epoch.

use super::key::{KeyError, KeyRole, SigningKey};
use crate::base::iana::SecAlg;
use crate::base::name::{Name, NameError};
use crate::rdata::dnssec::Timestamp;
use core::fmt;
use ring::rand::SecureRandom;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};
use tracing::debug;

//------------ KeyConfig -----------------------------------------------------

/// The list of keys of a zone signing key configuration.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(transparent)]
pub struct KeyConfig {
    entries: Vec<KeyEntry>,
}

impl KeyConfig {
    /// Parses a key configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, KeyConfigError> {
        serde_yaml::from_str(yaml).map_err(KeyConfigError::Yaml)
    }

    /// Reads a key configuration file.
    ///
    /// Relative key file paths are resolved against the directory the
    /// configuration file lives in.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, KeyConfigError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .map_err(|err| KeyConfigError::Io(path.into(), err))?;
        let mut res = Self::from_yaml(&yaml)?;
        if let Some(base) = path.parent() {
            for entry in &mut res.entries {
                if entry.key_file.is_relative() {
                    entry.key_file = base.join(&entry.key_file);
                }
            }
        }
        Ok(res)
    }

    #[must_use]
    pub fn entries(&self) -> &[KeyEntry] {
        &self.entries
    }

    /// Loads all keys of the configuration.
    pub fn load_keys(
        &self,
        rng: &dyn SecureRandom,
    ) -> Result<Vec<SigningKey>, KeyConfigError> {
        self.entries.iter().map(|entry| entry.load_key(rng)).collect()
    }
}

//------------ KeyEntry ------------------------------------------------------

/// A single key of a key configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct KeyEntry {
    #[serde(rename = "type")]
    pub role: KeyRole,
    pub key_file: PathBuf,
    pub algorithm: SecAlg,
    pub not_before: Timestamp,
    pub not_after: Timestamp,
    pub domain: String,
}

impl KeyEntry {
    /// Reads the key file and creates the signing key.
    pub fn load_key(
        &self,
        rng: &dyn SecureRandom,
    ) -> Result<SigningKey, KeyConfigError> {
        let domain: Name = self
            .domain
            .parse()
            .map_err(|err| KeyConfigError::Domain(self.domain.clone(), err))?;
        let pkcs8 = read_pkcs8_pem(&self.key_file)?;
        let key = SigningKey::from_pkcs8(
            self.algorithm,
            self.role,
            &pkcs8,
            domain,
            self.not_before,
            self.not_after,
            rng,
        )
        .map_err(|err| KeyConfigError::Key(self.key_file.clone(), err))?;
        debug!(
            "loaded {} {} with key tag {} from {}",
            key.role(),
            key.algorithm(),
            key.key_tag(),
            self.key_file.display()
        );
        Ok(key)
    }
}

/// Reads the first PKCS#8 private key from a PEM file.
pub fn read_pkcs8_pem(path: &Path) -> Result<Vec<u8>, KeyConfigError> {
    let file = fs::File::open(path)
        .map_err(|err| KeyConfigError::Io(path.into(), err))?;
    let mut reader = io::BufReader::new(file);
    let first = rustls_pemfile::pkcs8_private_keys(&mut reader).next();
    match first {
        Some(Ok(key)) => Ok(key.secret_pkcs8_der().to_vec()),
        Some(Err(err)) => Err(KeyConfigError::Io(path.into(), err)),
        None => Err(KeyConfigError::NoKey(path.into())),
    }
}

//============ Error Types ===================================================

//------------ KeyConfigError ------------------------------------------------

/// A key configuration could not be loaded.
#[derive(Debug)]
pub enum KeyConfigError {
    /// Reading a file failed.
    Io(PathBuf, io::Error),

    /// The configuration is not valid YAML or lacks fields.
    Yaml(serde_yaml::Error),

    /// The domain of an entry is not a valid domain name.
    Domain(String, NameError),

    /// A key file contains no PKCS#8 private key.
    NoKey(PathBuf),

    /// A private key was rejected.
    Key(PathBuf, KeyError),
}

impl fmt::Display for KeyConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KeyConfigError::Io(ref path, ref err) => {
                write!(f, "{}: {}", path.display(), err)
            }
            KeyConfigError::Yaml(ref err) => {
                write!(f, "invalid key configuration: {}", err)
            }
            KeyConfigError::Domain(ref name, ref err) => {
                write!(f, "invalid domain '{}': {}", name, err)
            }
            KeyConfigError::NoKey(ref path) => {
                write!(f, "{}: no PKCS#8 private key found", path.display())
            }
            KeyConfigError::Key(ref path, ref err) => {
                write!(f, "{}: {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for KeyConfigError {}

//============ Testing =======================================================
