// src/configure.rs

//! Variant-to-configure-argument mapping
//!
//! Each descriptor carries a toggle table: one row per variant that is
//! surfaced to the configure script, in the exact order the arguments
//! must be emitted. Rendering is a total function of the resolved spec;
//! every variant has a value once resolution fills in defaults.

use crate::spec::ResolvedSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// How a toggle renders on the configure command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlagStyle {
    /// `--enable-<flag>` / `--disable-<flag>`
    #[default]
    #[serde(rename = "enable")]
    EnableDisable,

    /// `--with-<flag>` / `--without-<flag>`
    #[serde(rename = "with")]
    WithWithout,
}

impl FlagStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnableDisable => "enable",
            Self::WithWithout => "with",
        }
    }

    /// Render one configure argument for a flag at the given value
    pub fn render(&self, flag: &str, enabled: bool) -> String {
        match (self, enabled) {
            (Self::EnableDisable, true) => format!("--enable-{}", flag),
            (Self::EnableDisable, false) => format!("--disable-{}", flag),
            (Self::WithWithout, true) => format!("--with-{}", flag),
            (Self::WithWithout, false) => format!("--without-{}", flag),
        }
    }
}

impl fmt::Display for FlagStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of a descriptor's toggle table
///
/// `flag` is the text on the configure command line, which may differ
/// from the variant name (variant `netcdf4` renders as `netcdf-4`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureToggle {
    pub variant: String,
    pub flag: String,
    pub style: FlagStyle,
}

impl ConfigureToggle {
    pub fn new(
        variant: impl Into<String>,
        flag: impl Into<String>,
        style: FlagStyle,
    ) -> Self {
        Self {
            variant: variant.into(),
            flag: flag.into(),
            style,
        }
    }

    /// A toggle whose flag text equals the variant name
    pub fn named(variant: impl Into<String>, style: FlagStyle) -> Self {
        let variant = variant.into();
        let flag = variant.clone();
        Self {
            variant,
            flag,
            style,
        }
    }
}

/// Render the configure arguments for a resolved spec
///
/// Emits one argument per toggle-table row, in table order.
pub fn args_for(spec: &ResolvedSpec<'_>) -> Vec<String> {
    let toggles = spec.descriptor().toggles();
    let mut args = Vec::with_capacity(toggles.len());

    for toggle in toggles {
        // Resolution fills every declared variant; skip anything unresolved
        let Some(enabled) = spec.variant(&toggle.variant) else {
            debug!("Toggle references unresolved variant: {}", toggle.variant);
            continue;
        };
        args.push(toggle.style.render(&toggle.flag, enabled));
    }

    debug!("Rendered {} configure arguments", args.len());
    args
}
