// src/descriptor/mod.rs

//! Package descriptors
//!
//! A descriptor is the static, declarative half of a package: which
//! versions exist and their checksums, which build variants exist and
//! their defaults, what the package depends on and in which build
//! phases, which variant selections conflict, and how selected variants
//! render on the configure command line. The dynamic half, one concrete
//! selection per build, is [`crate::spec::ResolvedSpec`].

pub mod format;
pub mod parser;

use crate::configure::ConfigureToggle;
use crate::depend::{DepKind, Dependency};
use crate::error::{Error, Result};
use crate::spec::SpecBuilder;
use crate::variant::{Variant, VariantSpec};
use crate::version::{PkgVersion, VersionEntry, VersionTable};
use format::{
    ConflictRow, DependencyRow, DescriptorManifest, PackageSection, ToggleRow, VariantRow,
    VersionRow,
};
use std::fmt;

/// A conflict rule between variant selections
///
/// The rule fires when a resolved selection satisfies both `when` and
/// `fragment`. An empty `when` is always satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub fragment: VariantSpec,
    pub when: VariantSpec,
    pub message: Option<String>,
}

impl Conflict {
    pub fn new(fragment: VariantSpec, when: VariantSpec) -> Self {
        Self {
            fragment,
            when,
            message: None,
        }
    }

    /// Check the rule against a resolved selection
    pub fn applies<F>(&self, lookup: F) -> bool
    where
        F: Fn(&str) -> Option<bool>,
    {
        satisfied(&self.when, &lookup) && satisfied(&self.fragment, &lookup)
    }
}

fn satisfied<F>(spec: &VariantSpec, lookup: &F) -> bool
where
    F: Fn(&str) -> Option<bool>,
{
    spec.iter().all(|item| lookup(&item.name) == Some(item.enabled))
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.when.is_empty() {
            write!(f, "{}", self.fragment)
        } else {
            write!(f, "{} when {}", self.fragment, self.when)
        }
    }
}

/// The static declaration of one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    name: String,
    url: String,
    homepage: Option<String>,
    summary: Option<String>,
    maintainers: Vec<String>,
    versions: VersionTable,
    variants: Vec<Variant>,
    dependencies: Vec<Dependency>,
    conflicts: Vec<Conflict>,
    toggles: Vec<ConfigureToggle>,
    force_autoreconf: bool,
}

impl PackageDescriptor {
    /// Start building a descriptor in code
    pub fn builder(name: impl Into<String>, url: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder::new(name, url)
    }

    /// Build the runtime model from a parsed manifest
    pub fn from_manifest(manifest: DescriptorManifest) -> Result<Self> {
        let DescriptorManifest {
            package,
            versions,
            variants,
            dependencies,
            conflicts,
            configure,
            autotools,
        } = manifest;

        if package.name.trim().is_empty() {
            return Err(Error::Parse("descriptor package name cannot be empty".to_string()));
        }
        if package.url.trim().is_empty() {
            return Err(Error::Parse("descriptor url cannot be empty".to_string()));
        }

        let mut table = VersionTable::new();
        for row in versions {
            table.insert(VersionEntry::new(
                PkgVersion::parse(&row.version)?,
                row.checksum.parse()?,
            ))?;
        }

        let mut declared: Vec<Variant> = Vec::with_capacity(variants.len());
        for row in variants {
            if row.name.trim().is_empty() {
                return Err(Error::Parse("variant name cannot be empty".to_string()));
            }
            if declared.iter().any(|v| v.name == row.name) {
                return Err(Error::Parse(format!(
                    "duplicate variant declaration: {}",
                    row.name
                )));
            }
            declared.push(Variant::new(row.name, row.default, row.description));
        }

        let mut deps: Vec<Dependency> = Vec::with_capacity(dependencies.len());
        for row in dependencies {
            if deps.iter().any(|d| d.name == row.name) {
                return Err(Error::Parse(format!(
                    "duplicate dependency declaration: {}",
                    row.name
                )));
            }
            deps.push(Dependency::new(row.name, row.kind));
        }

        let mut rules: Vec<Conflict> = Vec::with_capacity(conflicts.len());
        for row in conflicts {
            let fragment = VariantSpec::parse(&row.fragment)?;
            let when = match &row.when {
                Some(s) => VariantSpec::parse(s)?,
                None => VariantSpec::empty(),
            };
            for item in fragment.iter().chain(when.iter()) {
                if !declared.iter().any(|v| v.name == item.name) {
                    return Err(Error::UnknownVariant(format!(
                        "conflict rule references undeclared variant: {}",
                        item.name
                    )));
                }
            }
            rules.push(Conflict {
                fragment,
                when,
                message: row.message,
            });
        }

        let mut toggles: Vec<ConfigureToggle> = Vec::with_capacity(configure.len());
        for row in configure {
            if !declared.iter().any(|v| v.name == row.variant) {
                return Err(Error::UnknownVariant(format!(
                    "configure toggle references undeclared variant: {}",
                    row.variant
                )));
            }
            if toggles.iter().any(|t| t.variant == row.variant) {
                return Err(Error::Parse(format!(
                    "duplicate configure toggle: {}",
                    row.variant
                )));
            }
            let flag = row.flag.unwrap_or_else(|| row.variant.clone());
            toggles.push(ConfigureToggle::new(row.variant, flag, row.style));
        }

        Ok(Self {
            name: package.name,
            url: package.url,
            homepage: package.homepage,
            summary: package.summary,
            maintainers: package.maintainers,
            versions: table,
            variants: declared,
            dependencies: deps,
            conflicts: rules,
            toggles,
            force_autoreconf: autotools.force_autoreconf,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn homepage(&self) -> Option<&str> {
        self.homepage.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn maintainers(&self) -> &[String] {
        &self.maintainers
    }

    pub fn versions(&self) -> &VersionTable {
        &self.versions
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Look up a declared variant by name
    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Look up a declared dependency by name
    pub fn dependency(&self, name: &str) -> Option<&Dependency> {
        self.dependencies.iter().find(|d| d.name == name)
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn toggles(&self) -> &[ConfigureToggle] {
        &self.toggles
    }

    /// Whether configure must be regenerated via autoreconf every build
    pub fn force_autoreconf(&self) -> bool {
        self.force_autoreconf
    }

    /// The fetch URL for a concrete version
    ///
    /// Substitutes `%(version)s` and `%(name)s` in the URL template.
    pub fn url_for(&self, version: &PkgVersion) -> String {
        self.url
            .replace("%(version)s", version.as_str())
            .replace("%(name)s", &self.name)
    }

    /// Start resolving this descriptor into a concrete spec
    pub fn resolve(&self) -> SpecBuilder<'_> {
        SpecBuilder::new(self)
    }
}

/// Builder for declaring descriptors in code
///
/// Collects the same rows the TOML manifest carries; `build()` runs the
/// full manifest validation, so code-declared and file-declared
/// descriptors cannot drift apart.
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    manifest: DescriptorManifest,
}

impl DescriptorBuilder {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            manifest: DescriptorManifest {
                package: PackageSection {
                    name: name.into(),
                    url: url.into(),
                    homepage: None,
                    summary: None,
                    maintainers: Vec::new(),
                },
                versions: Vec::new(),
                variants: Vec::new(),
                dependencies: Vec::new(),
                conflicts: Vec::new(),
                configure: Vec::new(),
                autotools: Default::default(),
            },
        }
    }

    pub fn homepage(mut self, url: impl Into<String>) -> Self {
        self.manifest.package.homepage = Some(url.into());
        self
    }

    pub fn summary(mut self, text: impl Into<String>) -> Self {
        self.manifest.package.summary = Some(text.into());
        self
    }

    pub fn maintainer(mut self, handle: impl Into<String>) -> Self {
        self.manifest.package.maintainers.push(handle.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>, checksum: impl Into<String>) -> Self {
        self.manifest.versions.push(VersionRow {
            version: version.into(),
            checksum: checksum.into(),
        });
        self
    }

    pub fn variant(
        mut self,
        name: impl Into<String>,
        default: bool,
        description: impl Into<String>,
    ) -> Self {
        self.manifest.variants.push(VariantRow {
            name: name.into(),
            default,
            description: description.into(),
        });
        self
    }

    pub fn dependency(mut self, name: impl Into<String>, kind: DepKind) -> Self {
        self.manifest.dependencies.push(DependencyRow {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn conflict(mut self, fragment: impl Into<String>, when: impl Into<String>) -> Self {
        self.manifest.conflicts.push(ConflictRow {
            fragment: fragment.into(),
            when: Some(when.into()),
            message: None,
        });
        self
    }

    /// Add a toggle whose flag text equals the variant name
    pub fn toggle(mut self, variant: impl Into<String>, style: crate::configure::FlagStyle) -> Self {
        self.manifest.configure.push(ToggleRow {
            variant: variant.into(),
            flag: None,
            style,
        });
        self
    }

    /// Add a toggle with explicit flag text
    pub fn toggle_as(
        mut self,
        variant: impl Into<String>,
        flag: impl Into<String>,
        style: crate::configure::FlagStyle,
    ) -> Self {
        self.manifest.configure.push(ToggleRow {
            variant: variant.into(),
            flag: Some(flag.into()),
            style,
        });
        self
    }

    pub fn force_autoreconf(mut self, value: bool) -> Self {
        self.manifest.autotools.force_autoreconf = value;
        self
    }

    /// Validate and produce the descriptor
    pub fn build(self) -> Result<PackageDescriptor> {
        PackageDescriptor::from_manifest(self.manifest)
    }
}
