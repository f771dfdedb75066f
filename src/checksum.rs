// src/checksum.rs

//! Checksums for source archive integrity
//!
//! Checksums are written as `algorithm:hexdigest` strings (`sha256:ab12...`),
//! the same notation upstream projects publish next to their release
//! tarballs. Verification happens once per fetched archive, before any
//! build step runs.

use crate::error::{Error, Result};
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// Hash algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// SHA-256, the digest most upstreams publish
    #[default]
    Sha256,

    /// SHA-512, for upstreams that publish longer digests
    Sha512,
}

impl HashAlgorithm {
    /// Digest length in bytes
    #[inline]
    pub const fn output_len(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    /// Digest length as a hex string
    #[inline]
    pub const fn hex_len(&self) -> usize {
        self.output_len() * 2
    }

    /// Algorithm name as written in checksum strings
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    fn digest(&self, data: &[u8]) -> String {
        match self {
            Self::Sha256 => hex::encode(Sha256::digest(data)),
            Self::Sha512 => hex::encode(Sha512::digest(data)),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            _ => Err(Error::Parse(format!("unknown hash algorithm: {}", s))),
        }
    }
}

/// A declared checksum: algorithm plus lowercase hex digest
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum {
    pub algorithm: HashAlgorithm,
    pub value: String,
}

impl Checksum {
    /// Create a checksum, validating digest length and hex content
    pub fn new(algorithm: HashAlgorithm, value: impl Into<String>) -> Result<Self> {
        let value = value.into().to_lowercase();

        let expected = algorithm.hex_len();
        if value.len() != expected {
            return Err(Error::Parse(format!(
                "invalid {} digest length: expected {}, got {}",
                algorithm,
                expected,
                value.len()
            )));
        }
        if !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::Parse(format!("invalid hex in digest: {}", value)));
        }

        Ok(Self { algorithm, value })
    }

    /// Parse an `algorithm:hexdigest` string
    pub fn parse(s: &str) -> Result<Self> {
        let (algo, digest) = s
            .split_once(':')
            .ok_or_else(|| Error::Parse(format!("invalid checksum format: {}", s)))?;

        Self::new(algo.parse()?, digest)
    }

    /// Compute the checksum of a byte slice
    pub fn of_bytes(algorithm: HashAlgorithm, data: &[u8]) -> Self {
        Self {
            algorithm,
            value: algorithm.digest(data),
        }
    }

    /// Check a byte slice against this checksum
    pub fn matches(&self, data: &[u8]) -> bool {
        self.algorithm.digest(data) == self.value
    }

    /// Verify a file on disk against this checksum
    ///
    /// Returns `Error::ChecksumMismatch` when the digest differs.
    pub fn verify_file(&self, path: &Path) -> Result<()> {
        debug!("Verifying {} against {}", path.display(), self);
        let content = std::fs::read(path)?;
        let actual = self.algorithm.digest(&content);

        if actual != self.value {
            warn!("Checksum mismatch for {}", path.display());
            return Err(Error::ChecksumMismatch {
                expected: self.to_string(),
                actual: format!("{}:{}", self.algorithm, actual),
            });
        }

        Ok(())
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.value)
    }
}

impl FromStr for Checksum {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
