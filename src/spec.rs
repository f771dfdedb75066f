// src/spec.rs

//! Resolved specs: one concrete selection per build
//!
//! The orchestrator turns a descriptor into a `ResolvedSpec` before any
//! build step runs: pick a version (latest by default), settle every
//! variant (explicit selection or declared default), and attach the
//! installed prefixes of already-built dependencies. `finish()` is the
//! single validation gate; everything after it reads immutable data.

use crate::checksum::Checksum;
use crate::descriptor::PackageDescriptor;
use crate::error::{Error, Result};
use crate::variant::VariantSpec;
use crate::version::{PkgVersion, VersionEntry};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Builder for a [`ResolvedSpec`]
#[derive(Debug, Clone)]
pub struct SpecBuilder<'a> {
    descriptor: &'a PackageDescriptor,
    version: Option<String>,
    variants: BTreeMap<String, bool>,
    prefixes: BTreeMap<String, PathBuf>,
}

impl<'a> SpecBuilder<'a> {
    pub(crate) fn new(descriptor: &'a PackageDescriptor) -> Self {
        Self {
            descriptor,
            version: None,
            variants: BTreeMap::new(),
            prefixes: BTreeMap::new(),
        }
    }

    /// Pick a version from the descriptor's table
    pub fn version(mut self, version: &str) -> Result<Self> {
        if self.descriptor.versions().get(version).is_none() {
            return Err(Error::UnknownVersion(format!(
                "{}@{}",
                self.descriptor.name(),
                version
            )));
        }
        self.version = Some(version.to_string());
        Ok(self)
    }

    /// Select one variant explicitly
    pub fn variant(mut self, name: &str, enabled: bool) -> Result<Self> {
        if self.descriptor.variant(name).is_none() {
            return Err(Error::UnknownVariant(name.to_string()));
        }
        self.variants.insert(name.to_string(), enabled);
        Ok(self)
    }

    /// Apply a parsed selection string like `+pic~dap`
    pub fn variants(mut self, spec: &VariantSpec) -> Result<Self> {
        for item in spec.iter() {
            self = self.variant(&item.name, item.enabled)?;
        }
        Ok(self)
    }

    /// Attach the installed prefix of a resolved dependency
    pub fn dependency(mut self, name: &str, prefix: impl Into<PathBuf>) -> Result<Self> {
        if self.descriptor.dependency(name).is_none() {
            return Err(Error::UnknownDependency(name.to_string()));
        }
        self.prefixes.insert(name.to_string(), prefix.into());
        Ok(self)
    }

    /// Validate and produce the immutable spec
    ///
    /// Fills unselected variants from their defaults, requires an
    /// installed prefix for every link-phase dependency, and evaluates
    /// every conflict rule.
    pub fn finish(self) -> Result<ResolvedSpec<'a>> {
        let descriptor = self.descriptor;

        let version = match &self.version {
            Some(v) => descriptor
                .versions()
                .get(v)
                .ok_or_else(|| Error::UnknownVersion(v.clone()))?,
            None => descriptor.versions().latest().ok_or_else(|| {
                Error::UnknownVersion(format!("{} declares no versions", descriptor.name()))
            })?,
        };

        let mut variants = self.variants;
        for declared in descriptor.variants() {
            variants
                .entry(declared.name.clone())
                .or_insert(declared.default);
        }

        for dep in descriptor.dependencies() {
            if dep.kind.needs_link() && !self.prefixes.contains_key(&dep.name) {
                return Err(Error::MissingDependency(dep.name.clone()));
            }
        }

        for rule in descriptor.conflicts() {
            if rule.applies(|name| variants.get(name).copied()) {
                let detail = rule
                    .message
                    .clone()
                    .unwrap_or_else(|| rule.to_string());
                return Err(Error::Conflict(format!(
                    "{}: {}",
                    descriptor.name(),
                    detail
                )));
            }
        }

        let spec = ResolvedSpec {
            descriptor,
            version,
            variants,
            prefixes: self.prefixes,
        };
        info!("Resolved {}", spec);
        Ok(spec)
    }
}

/// A validated, concrete build selection
#[derive(Debug, Clone)]
pub struct ResolvedSpec<'a> {
    descriptor: &'a PackageDescriptor,
    version: &'a VersionEntry,
    variants: BTreeMap<String, bool>,
    prefixes: BTreeMap<String, PathBuf>,
}

impl<'a> ResolvedSpec<'a> {
    pub fn descriptor(&self) -> &'a PackageDescriptor {
        self.descriptor
    }

    pub fn version(&self) -> &PkgVersion {
        &self.version.version
    }

    /// Checksum of the selected version's source archive
    pub fn checksum(&self) -> &Checksum {
        &self.version.checksum
    }

    /// Fetch URL for the selected version
    pub fn archive_url(&self) -> String {
        self.descriptor.url_for(self.version())
    }

    /// The settled value of a declared variant
    pub fn variant(&self, name: &str) -> Option<bool> {
        self.variants.get(name).copied()
    }

    /// Whether a variant is enabled; unknown names read as disabled
    pub fn enabled(&self, name: &str) -> bool {
        self.variant(name).unwrap_or(false)
    }

    /// Installed prefix of a resolved dependency
    pub fn dep_prefix(&self, name: &str) -> Result<&Path> {
        if self.descriptor.dependency(name).is_none() {
            return Err(Error::UnknownDependency(name.to_string()));
        }
        self.prefixes
            .get(name)
            .map(PathBuf::as_path)
            .ok_or_else(|| Error::MissingDependency(name.to_string()))
    }

    /// Include directory under a dependency's installed prefix
    pub fn dep_include(&self, name: &str) -> Result<PathBuf> {
        Ok(self.dep_prefix(name)?.join("include"))
    }
}

impl fmt::Display for ResolvedSpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.descriptor.name(), self.version())?;
        // Variants render in declaration order
        for declared in self.descriptor.variants() {
            if let Some(enabled) = self.variant(&declared.name) {
                write!(f, "{}{}", if enabled { '+' } else { '~' }, declared.name)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configure::FlagStyle;
    use crate::depend::DepKind;

    const SHA_A: &str = "6a1189a181eed043b5859e15d5c080c30d0e107406fbb212c8fb9814e90f3445";
    const SHA_B: &str = "e34fbc6aba243ec82c23e9ee99db2430555ada849c54c1f3ab081b0ddd0f5f30";

    fn descriptor() -> PackageDescriptor {
        PackageDescriptor::builder("demo", "https://example.com/demo-%(version)s.tar.gz")
            .version("2.1.0", format!("sha256:{}", SHA_A))
            .version("2.0.0", format!("sha256:{}", SHA_B))
            .variant("static", true, "static libs")
            .variant("shared", true, "shared libs")
            .variant("ssl", false, "TLS support")
            .dependency("zlib", DepKind::BuildLink)
            .dependency("m4", DepKind::Build)
            .conflict("~shared", "~static")
            .toggle("static", FlagStyle::EnableDisable)
            .toggle("shared", FlagStyle::EnableDisable)
            .toggle("ssl", FlagStyle::EnableDisable)
            .build()
            .unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let desc = descriptor();
        let spec = desc
            .resolve()
            .dependency("zlib", "/opt/zlib")
            .unwrap()
            .finish()
            .unwrap();

        assert_eq!(spec.variant("static"), Some(true));
        assert_eq!(spec.variant("shared"), Some(true));
        assert_eq!(spec.variant("ssl"), Some(false));
    }

    #[test]
    fn test_latest_version_default() {
        let desc = descriptor();
        let spec = desc
            .resolve()
            .dependency("zlib", "/opt/zlib")
            .unwrap()
            .finish()
            .unwrap();
        assert_eq!(spec.version().as_str(), "2.1.0");
        assert_eq!(spec.checksum().value, SHA_A);
    }

    #[test]
    fn test_explicit_version() {
        let desc = descriptor();
        let spec = desc
            .resolve()
            .version("2.0.0")
            .unwrap()
            .dependency("zlib", "/opt/zlib")
            .unwrap()
            .finish()
            .unwrap();
        assert_eq!(spec.version().as_str(), "2.0.0");
        assert_eq!(spec.archive_url(), "https://example.com/demo-2.0.0.tar.gz");
    }

    #[test]
    fn test_unknown_version_rejected() {
        let desc = descriptor();
        assert!(matches!(
            desc.resolve().version("9.9.9"),
            Err(Error::UnknownVersion(_))
        ));
    }

    #[test]
    fn test_variant_override() {
        let desc = descriptor();
        let spec = desc
            .resolve()
            .variant("ssl", true)
            .unwrap()
            .dependency("zlib", "/opt/zlib")
            .unwrap()
            .finish()
            .unwrap();
        assert!(spec.enabled("ssl"));
    }

    #[test]
    fn test_variant_spec_string() {
        let desc = descriptor();
        let selection = VariantSpec::parse("+ssl~static").unwrap();
        let spec = desc
            .resolve()
            .variants(&selection)
            .unwrap()
            .dependency("zlib", "/opt/zlib")
            .unwrap()
            .finish()
            .unwrap();
        assert!(spec.enabled("ssl"));
        assert!(!spec.enabled("static"));
        assert!(spec.enabled("shared"));
    }

    #[test]
    fn test_unknown_variant_rejected() {
        let desc = descriptor();
        assert!(matches!(
            desc.resolve().variant("lasers", true),
            Err(Error::UnknownVariant(_))
        ));
    }

    #[test]
    fn test_conflict_rejected() {
        let desc = descriptor();
        let result = desc
            .resolve()
            .variant("shared", false)
            .unwrap()
            .variant("static", false)
            .unwrap()
            .dependency("zlib", "/opt/zlib")
            .unwrap()
            .finish();
        match result {
            Err(Error::Conflict(msg)) => {
                assert!(msg.contains("~shared"));
                assert!(msg.contains("~static"));
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_one_of_shared_static_is_enough() {
        let desc = descriptor();
        assert!(
            desc.resolve()
                .variant("shared", false)
                .unwrap()
                .dependency("zlib", "/opt/zlib")
                .unwrap()
                .finish()
                .is_ok()
        );
        assert!(
            desc.resolve()
                .variant("static", false)
                .unwrap()
                .dependency("zlib", "/opt/zlib")
                .unwrap()
                .finish()
                .is_ok()
        );
    }

    #[test]
    fn test_missing_link_dependency_rejected() {
        let desc = descriptor();
        assert!(matches!(
            desc.resolve().finish(),
            Err(Error::MissingDependency(name)) if name == "zlib"
        ));
    }

    #[test]
    fn test_build_only_dependency_prefix_optional() {
        // m4 is build-only; resolution succeeds without its prefix
        let desc = descriptor();
        let spec = desc
            .resolve()
            .dependency("zlib", "/opt/zlib")
            .unwrap()
            .finish()
            .unwrap();
        assert!(matches!(
            spec.dep_prefix("m4"),
            Err(Error::MissingDependency(_))
        ));
    }

    #[test]
    fn test_unknown_dependency_rejected() {
        let desc = descriptor();
        assert!(matches!(
            desc.resolve().dependency("libpng", "/opt/libpng"),
            Err(Error::UnknownDependency(_))
        ));
    }

    #[test]
    fn test_dep_prefix_and_include() {
        let desc = descriptor();
        let spec = desc
            .resolve()
            .dependency("zlib", "/opt/zlib")
            .unwrap()
            .finish()
            .unwrap();

        assert_eq!(spec.dep_prefix("zlib").unwrap(), Path::new("/opt/zlib"));
        assert_eq!(
            spec.dep_include("zlib").unwrap(),
            PathBuf::from("/opt/zlib/include")
        );
        assert!(matches!(
            spec.dep_prefix("libpng"),
            Err(Error::UnknownDependency(_))
        ));
    }

    #[test]
    fn test_display() {
        let desc = descriptor();
        let spec = desc
            .resolve()
            .variant("ssl", true)
            .unwrap()
            .dependency("zlib", "/opt/zlib")
            .unwrap()
            .finish()
            .unwrap();
        assert_eq!(spec.to_string(), "demo@2.1.0+static+shared+ssl");
    }

    #[test]
    fn test_no_versions_rejected() {
        let desc = PackageDescriptor::builder("empty", "https://example.com/x.tar.gz")
            .build()
            .unwrap();
        assert!(matches!(
            desc.resolve().finish(),
            Err(Error::UnknownVersion(_))
        ));
    }
}
