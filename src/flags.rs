// src/flags.rs

//! Compiler flag categories and the flag-handler contract
//!
//! The orchestrator hands each flag category to the package once before
//! invoking configure. A handler may extend the list; the result carries
//! three slots because the host contract routes flags either into the
//! build environment, injected wrapper flags, or the configure command
//! line. Descriptors here only ever use the build-system slot; the other
//! two stay `None`.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// The flag categories an autotools build distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagCategory {
    /// C compiler flags
    CFlags,
    /// C++ compiler flags
    CxxFlags,
    /// Preprocessor flags
    CppFlags,
    /// Fortran compiler flags
    FFlags,
    /// Linker flags
    LdFlags,
    /// Extra libraries appended at link time
    LdLibs,
}

impl FlagCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CFlags => "cflags",
            Self::CxxFlags => "cxxflags",
            Self::CppFlags => "cppflags",
            Self::FFlags => "fflags",
            Self::LdFlags => "ldflags",
            Self::LdLibs => "ldlibs",
        }
    }

    /// All categories, in the order the orchestrator visits them
    pub fn all() -> [FlagCategory; 6] {
        [
            Self::CFlags,
            Self::CxxFlags,
            Self::CppFlags,
            Self::FFlags,
            Self::LdFlags,
            Self::LdLibs,
        ]
    }
}

impl fmt::Display for FlagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FlagCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "cflags" | "c-flags" => Ok(Self::CFlags),
            "cxxflags" | "cxx-flags" => Ok(Self::CxxFlags),
            "cppflags" | "cpp-flags" => Ok(Self::CppFlags),
            "fflags" | "f-flags" => Ok(Self::FFlags),
            "ldflags" | "ld-flags" => Ok(Self::LdFlags),
            "ldlibs" | "ld-libs" => Ok(Self::LdLibs),
            _ => Err(Error::Parse(format!("unknown flag category: {}", s))),
        }
    }
}

/// The compiler the orchestrator selected for the build
///
/// Descriptors only consume toolchain facts through this seam; the
/// position-independent-code flag is the one fact the shipped
/// descriptors need.
pub trait Compiler {
    /// The flag that makes this compiler emit position-independent code
    fn pic_flag(&self) -> &str;
}

/// GCC-compatible toolchain (also matches clang)
#[derive(Debug, Clone, Copy, Default)]
pub struct GnuToolchain;

impl Compiler for GnuToolchain {
    fn pic_flag(&self) -> &str {
        "-fPIC"
    }
}

/// A handled flag list, split across the host contract's three slots
///
/// `injected` and `env` are placeholders the host contract requires;
/// descriptors in this crate always leave them `None` and route
/// everything through `build_system`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandledFlags {
    /// Flags injected via compiler wrappers (unused here)
    pub injected: Option<Vec<String>>,
    /// Flags exported into the build environment (unused here)
    pub env: Option<Vec<String>>,
    /// Flags passed to the build system on the configure line
    pub build_system: Vec<String>,
}

impl HandledFlags {
    /// Route all flags through the build-system slot
    pub fn build_system(flags: Vec<String>) -> Self {
        Self {
            injected: None,
            env: None,
            build_system: flags,
        }
    }
}
