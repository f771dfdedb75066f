// src/depend.rs

//! Dependency declarations with build-phase kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which build phases a dependency is needed for
///
/// Build tools (automake, m4) are `Build`; libraries the produced
/// binaries link against are `Link` or, when their headers are also
/// consumed at compile time, `BuildLink`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepKind {
    /// Needed only while building
    Build,

    /// Needed only when linking the produced artifacts
    Link,

    /// Needed both at build and link time (the usual case for libraries)
    #[default]
    BuildLink,
}

impl DepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Link => "link",
            Self::BuildLink => "build-link",
        }
    }

    /// Whether the dependency participates in the link phase
    pub fn needs_link(&self) -> bool {
        matches!(self, Self::Link | Self::BuildLink)
    }

    /// Whether the dependency participates in the build phase
    pub fn needs_build(&self) -> bool {
        matches!(self, Self::Build | Self::BuildLink)
    }
}

impl fmt::Display for DepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A declared dependency edge: package name plus phase kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub kind: DepKind,
}

impl Dependency {
    pub fn new(name: impl Into<String>, kind: DepKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}
