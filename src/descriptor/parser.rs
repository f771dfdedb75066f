// src/descriptor/parser.rs

//! Descriptor manifest parsing

use crate::descriptor::format::DescriptorManifest;
use crate::descriptor::PackageDescriptor;
use crate::error::{Error, Result};
use std::path::Path;
use tracing::warn;

/// Parse a descriptor from a TOML string
pub fn parse_descriptor(content: &str) -> Result<PackageDescriptor> {
    let manifest: DescriptorManifest = toml::from_str(content)
        .map_err(|e| Error::Parse(format!("invalid descriptor: {}", e)))?;

    PackageDescriptor::from_manifest(manifest)
}

/// Parse a descriptor from a file
pub fn parse_descriptor_file(path: &Path) -> Result<PackageDescriptor> {
    let content = std::fs::read_to_string(path)?;
    parse_descriptor(&content)
}

/// Check a descriptor for non-fatal omissions
///
/// Structural problems are already rejected while building the
/// descriptor; this reports the things a repository reviewer would ask
/// about.
pub fn validate_descriptor(descriptor: &PackageDescriptor) -> Vec<String> {
    let mut warnings = Vec::new();

    if descriptor.versions().is_empty() {
        warnings.push("no versions declared, nothing can be fetched".to_string());
    }
    if descriptor.homepage().is_none() {
        warnings.push("missing homepage".to_string());
    }
    if descriptor.maintainers().is_empty() {
        warnings.push("no maintainers listed".to_string());
    }
    for variant in descriptor.variants() {
        if variant.description.is_empty() {
            warnings.push(format!("variant {} has no description", variant.name));
        }
    }

    for warning in &warnings {
        warn!("{}: {}", descriptor.name(), warning);
    }

    warnings
}
