// src/descriptor/format.rs

//! Descriptor manifest file format
//!
//! Descriptors are TOML files describing how a package is fetched and
//! configured: versions with checksums, variants with defaults,
//! dependencies with phase kinds, conflict rules, and the configure
//! toggle table.

use crate::configure::FlagStyle;
use crate::depend::DepKind;
use serde::{Deserialize, Serialize};

/// A complete descriptor manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptorManifest {
    /// Package metadata
    pub package: PackageSection,

    /// Declared versions, newest first by convention
    #[serde(default)]
    pub versions: Vec<VersionRow>,

    /// Declared build variants
    #[serde(default)]
    pub variants: Vec<VariantRow>,

    /// Declared dependencies
    #[serde(default)]
    pub dependencies: Vec<DependencyRow>,

    /// Conflict rules between variant selections
    #[serde(default)]
    pub conflicts: Vec<ConflictRow>,

    /// Configure toggle table, in emission order
    #[serde(default)]
    pub configure: Vec<ToggleRow>,

    /// Autotools-specific settings
    #[serde(default)]
    pub autotools: AutotoolsSection,
}

/// Package metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    /// Package name
    pub name: String,

    /// Source archive URL template
    ///
    /// Supports `%(version)s` and `%(name)s` substitution.
    pub url: String,

    /// Homepage URL
    #[serde(default)]
    pub homepage: Option<String>,

    /// Short description
    #[serde(default)]
    pub summary: Option<String>,

    /// Upstream maintainer handles
    #[serde(default)]
    pub maintainers: Vec<String>,
}

/// One declared version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionRow {
    pub version: String,
    /// Checksum string (`sha256:...`)
    pub checksum: String,
}

/// One declared variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantRow {
    pub name: String,

    /// Value used when a build does not select the variant either way
    #[serde(default)]
    pub default: bool,

    #[serde(default)]
    pub description: String,
}

/// One declared dependency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyRow {
    pub name: String,

    /// Build phases the dependency is needed for
    #[serde(default)]
    pub kind: DepKind,
}

/// One conflict rule
///
/// The rule fires when the resolved selection satisfies both `when` and
/// `fragment`; an absent `when` means the fragment is always forbidden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictRow {
    /// Forbidden selection fragment, e.g. `~shared`
    pub fragment: String,

    /// Condition under which the fragment is forbidden, e.g. `~static`
    #[serde(default)]
    pub when: Option<String>,

    /// Optional human-readable explanation
    #[serde(default)]
    pub message: Option<String>,
}

/// One configure toggle row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleRow {
    /// Variant the toggle reads
    pub variant: String,

    /// Configure flag text; defaults to the variant name
    #[serde(default)]
    pub flag: Option<String>,

    /// `enable` or `with`
    #[serde(default)]
    pub style: FlagStyle,
}

/// Autotools-specific settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutotoolsSection {
    /// Regenerate the configure script via autoreconf on every build
    #[serde(default)]
    pub force_autoreconf: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[package]
name = "netcdf-cxx4"
url = "ftp://ftp.unidata.ucar.edu/pub/netcdf/netcdf-cxx4-%(version)s.tar.gz"
homepage = "https://www.unidata.ucar.edu/software/netcdf"
maintainers = ["WardF"]

[[versions]]
version = "4.3.1"
checksum = "sha256:6a1189a181eed043b5859e15d5c080c30d0e107406fbb212c8fb9814e90f3445"

[[variants]]
name = "pic"
default = true
description = "Produce position-independent code (for shared libs)"

[[variants]]
name = "dap"
description = "Enable DAP support"

[[dependencies]]
name = "netcdf-c"

[[dependencies]]
name = "m4"
kind = "build"

[[conflicts]]
fragment = "~shared"
when = "~static"

[[configure]]
variant = "pic"
style = "with"

[[configure]]
variant = "netcdf4"
flag = "netcdf-4"

[autotools]
force_autoreconf = true
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest: DescriptorManifest = toml::from_str(SAMPLE).unwrap();

        assert_eq!(manifest.package.name, "netcdf-cxx4");
        assert!(manifest.package.url.contains("%(version)s"));
        assert_eq!(manifest.package.maintainers, vec!["WardF"]);

        assert_eq!(manifest.versions.len(), 1);
        assert!(manifest.versions[0].checksum.starts_with("sha256:"));

        assert_eq!(manifest.variants.len(), 2);
        assert!(manifest.variants[0].default);
        assert!(!manifest.variants[1].default);

        assert_eq!(manifest.dependencies[0].kind, DepKind::BuildLink);
        assert_eq!(manifest.dependencies[1].kind, DepKind::Build);

        assert_eq!(manifest.conflicts[0].fragment, "~shared");
        assert_eq!(manifest.conflicts[0].when.as_deref(), Some("~static"));

        assert_eq!(manifest.configure[0].style, FlagStyle::WithWithout);
        assert!(manifest.configure[0].flag.is_none());
        assert_eq!(manifest.configure[1].flag.as_deref(), Some("netcdf-4"));
        assert_eq!(manifest.configure[1].style, FlagStyle::EnableDisable);

        assert!(manifest.autotools.force_autoreconf);
    }

    #[test]
    fn test_minimal_manifest() {
        let minimal = r#"
[package]
name = "hello"
url = "https://example.com/hello-%(version)s.tar.gz"
"#;
        let manifest: DescriptorManifest = toml::from_str(minimal).unwrap();
        assert!(manifest.versions.is_empty());
        assert!(manifest.variants.is_empty());
        assert!(!manifest.autotools.force_autoreconf);
    }
}
