// src/version.rs

//! Package versions and the per-descriptor version table
//!
//! Versions are compared numerically where possible (semver with a
//! graceful fallback for two-component versions like "4.3") so that
//! `latest()` picks the highest declared release, not the
//! lexicographically largest string.

use crate::checksum::Checksum;
use crate::error::{Error, Result};
use semver::Version;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A package version string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PkgVersion {
    raw: String,
}

impl PkgVersion {
    /// Parse a version string
    ///
    /// Any non-empty, whitespace-free string is accepted; comparison
    /// falls back to lexicographic ordering when the string is not
    /// numeric.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::Parse("empty version string".to_string()));
        }
        if s.chars().any(|c| c.is_whitespace()) {
            return Err(Error::Parse(format!("invalid version string: {:?}", s)));
        }

        Ok(Self { raw: s.to_string() })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Normalize to a semver::Version for comparison
    ///
    /// Upstream versions are often not strict semver ("4.3"), so missing
    /// components default to zero.
    fn to_semver(&self) -> Option<Version> {
        if let Ok(v) = Version::parse(&self.raw) {
            return Some(v);
        }

        let parts: Vec<&str> = self.raw.split('.').collect();
        let major = parts.first().and_then(|s| s.parse::<u64>().ok())?;
        let minor = parts.get(1).and_then(|s| s.parse::<u64>().ok()).unwrap_or(0);
        let patch = parts.get(2).and_then(|s| s.parse::<u64>().ok()).unwrap_or(0);

        Some(Version::new(major, minor, patch))
    }

    /// Compare two versions
    pub fn compare(&self, other: &PkgVersion) -> Ordering {
        match (self.to_semver(), other.to_semver()) {
            (Some(a), Some(b)) => match a.cmp(&b) {
                // Same numeric value, distinct strings ("4.3" vs "4.3.0"):
                // fall through to the raw tiebreak
                Ordering::Equal => self.raw.cmp(&other.raw),
                ord => ord,
            },
            _ => self.raw.cmp(&other.raw),
        }
    }
}

impl fmt::Display for PkgVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl FromStr for PkgVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// One declared version: the version string and its archive checksum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    pub version: PkgVersion,
    pub checksum: Checksum,
}

impl VersionEntry {
    pub fn new(version: PkgVersion, checksum: Checksum) -> Self {
        Self { version, checksum }
    }
}

/// The ordered set of versions a descriptor declares
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionTable {
    entries: Vec<VersionEntry>,
}

impl VersionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a version, rejecting duplicates
    pub fn insert(&mut self, entry: VersionEntry) -> Result<()> {
        if self.get(entry.version.as_str()).is_some() {
            return Err(Error::Parse(format!(
                "duplicate version declaration: {}",
                entry.version
            )));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Look up a version by its string form
    pub fn get(&self, version: &str) -> Option<&VersionEntry> {
        self.entries.iter().find(|e| e.version.as_str() == version)
    }

    /// The highest declared version
    pub fn latest(&self) -> Option<&VersionEntry> {
        self.entries
            .iter()
            .max_by(|a, b| a.version.compare(&b.version))
    }

    pub fn iter(&self) -> impl Iterator<Item = &VersionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
