// src/error.rs

//! Crate-wide error type

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed manifest, spec string, checksum, or version
    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Source archive digest did not match the declared checksum
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    /// Variant name not declared by the descriptor
    #[error("unknown variant: {0}")]
    UnknownVariant(String),

    /// Version not present in the descriptor's version table
    #[error("unknown version: {0}")]
    UnknownVersion(String),

    /// Dependency name not declared by the descriptor
    #[error("unknown dependency: {0}")]
    UnknownDependency(String),

    /// Link-phase dependency resolved without an installed prefix
    #[error("missing dependency prefix: {0}")]
    MissingDependency(String),

    /// A conflict rule rejected the variant selection
    #[error("conflict: {0}")]
    Conflict(String),

    /// Post-build library search found nothing under the prefix
    #[error("no matching artifact: {0}")]
    ArtifactNotFound(String),
}
