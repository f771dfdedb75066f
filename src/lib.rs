// src/lib.rs

//! Cookbook: declarative build descriptors for autotools packages
//!
//! A descriptor is the static half of a package build: versions with
//! archive checksums, boolean build variants with defaults, dependencies
//! tagged by build phase, conflict rules, and a table mapping variants to
//! configure-script arguments. The dynamic half is a resolved spec, one
//! concrete selection per build, produced and consumed by an external
//! orchestrator that owns fetching, building, and installing.
//!
//! # Architecture
//!
//! - Descriptor-first: all package knowledge is declarative data,
//!   expressible as a TOML manifest or built in code
//! - Resolution is the single validation gate: defaults, dependency
//!   prefixes, and conflict rules are settled before any build step
//! - Operations are pure: configure arguments and flag handling are
//!   total functions of a validated spec

pub mod artifacts;
pub mod autotools;
pub mod checksum;
pub mod configure;
pub mod depend;
pub mod descriptor;
mod error;
pub mod flags;
pub mod packages;
pub mod spec;
pub mod variant;
pub mod version;

pub use autotools::AutotoolsPackage;
pub use checksum::{Checksum, HashAlgorithm};
pub use configure::{ConfigureToggle, FlagStyle};
pub use depend::{DepKind, Dependency};
pub use descriptor::{Conflict, DescriptorBuilder, PackageDescriptor};
pub use error::{Error, Result};
pub use flags::{Compiler, FlagCategory, GnuToolchain, HandledFlags};
pub use packages::NetcdfCxx4;
pub use spec::{ResolvedSpec, SpecBuilder};
pub use variant::{Variant, VariantItem, VariantSpec};
pub use version::{PkgVersion, VersionEntry, VersionTable};
