// src/variant.rs

//! Build variants and variant-selection spec strings
//!
//! A variant is a named boolean build option with a default. Selections
//! are written with sigils: `+name` turns a variant on, `~name` (or
//! `-name`) turns it off. Compact (`+static~dap`) and separated
//! (`+static, ~dap`) forms are both accepted.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A variant declaration: name, default value, description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub default: bool,
    pub description: String,
}

impl Variant {
    pub fn new(name: impl Into<String>, default: bool, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default,
            description: description.into(),
        }
    }
}

/// One parsed selection: a variant name and the requested value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantItem {
    pub name: String,
    pub enabled: bool,
}

impl VariantItem {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
        }
    }

    /// Parse a single sigil-prefixed item like "+pic" or "~dap"
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::Parse("empty variant item".to_string()));
        }

        let (enabled, name) = if let Some(rest) = s.strip_prefix('+') {
            (true, rest.trim())
        } else if let Some(rest) = s.strip_prefix('~').or_else(|| s.strip_prefix('-')) {
            (false, rest.trim())
        } else {
            return Err(Error::Parse(format!(
                "variant item must start with '+' or '~': {}",
                s
            )));
        };

        if name.is_empty() {
            return Err(Error::Parse(format!("missing variant name in: {}", s)));
        }
        if name.contains(['+', '~', '-']) {
            return Err(Error::Parse(format!("invalid variant name: {}", name)));
        }

        Ok(Self::new(name, enabled))
    }

    fn sigil(&self) -> char {
        if self.enabled { '+' } else { '~' }
    }
}

impl fmt::Display for VariantItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sigil(), self.name)
    }
}

/// A parsed variant selection string like `+static+shared~dap`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantSpec {
    items: Vec<VariantItem>,
}

impl VariantSpec {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(items: Vec<VariantItem>) -> Self {
        Self { items }
    }

    /// Parse a selection string
    ///
    /// Examples:
    /// - `+static~dap` (compact)
    /// - `+static, ~dap` (comma-separated)
    /// - `+static ~dap` (whitespace-separated)
    /// - `` (empty selection)
    pub fn parse(s: &str) -> Result<Self> {
        let mut items = Vec::new();

        for chunk in s.split([',', ' ', '\t']) {
            let chunk = chunk.trim();
            if chunk.is_empty() {
                continue;
            }

            // A chunk may still be compact: split at each sigil
            let mut start = 0;
            for (idx, c) in chunk.char_indices().skip(1) {
                if matches!(c, '+' | '~' | '-') {
                    items.push(VariantItem::parse(&chunk[start..idx])?);
                    start = idx;
                }
            }
            items.push(VariantItem::parse(&chunk[start..])?);
        }

        Ok(Self { items })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[VariantItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariantItem> {
        self.items.iter()
    }

    /// The requested value for a variant, if this spec mentions it
    ///
    /// When a name appears more than once the last mention wins.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.items
            .iter()
            .rev()
            .find(|item| item.name == name)
            .map(|item| item.enabled)
    }
}

impl fmt::Display for VariantSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

impl FromStr for VariantSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === VariantItem tests ===

    #[test]
    fn test_item_parse_enabled() {
        let item = VariantItem::parse("+pic").unwrap();
        assert_eq!(item.name, "pic");
        assert!(item.enabled);
    }

    #[test]
    fn test_item_parse_disabled() {
        let item = VariantItem::parse("~dap").unwrap();
        assert_eq!(item.name, "dap");
        assert!(!item.enabled);
    }

    #[test]
    fn test_item_parse_dash_synonym() {
        let item = VariantItem::parse("-dap").unwrap();
        assert_eq!(item.name, "dap");
        assert!(!item.enabled);
    }

    #[test]
    fn test_item_parse_missing_sigil() {
        assert!(VariantItem::parse("static").is_err());
    }

    #[test]
    fn test_item_parse_missing_name() {
        assert!(VariantItem::parse("+").is_err());
        assert!(VariantItem::parse("~").is_err());
        assert!(VariantItem::parse("").is_err());
    }

    #[test]
    fn test_item_display() {
        assert_eq!(VariantItem::new("pic", true).to_string(), "+pic");
        assert_eq!(VariantItem::new("dap", false).to_string(), "~dap");
        // Canonical form of '-' is '~'
        assert_eq!(VariantItem::parse("-dap").unwrap().to_string(), "~dap");
    }

    // === VariantSpec tests ===

    #[test]
    fn test_spec_parse_compact() {
        let spec = VariantSpec::parse("+static~dap+pic").unwrap();
        assert_eq!(spec.items().len(), 3);
        assert_eq!(spec.get("static"), Some(true));
        assert_eq!(spec.get("dap"), Some(false));
        assert_eq!(spec.get("pic"), Some(true));
    }

    #[test]
    fn test_spec_parse_separated() {
        let comma = VariantSpec::parse("+static, ~dap").unwrap();
        let space = VariantSpec::parse("+static ~dap").unwrap();
        assert_eq!(comma, space);
        assert_eq!(comma.items().len(), 2);
    }

    #[test]
    fn test_spec_parse_empty() {
        assert!(VariantSpec::parse("").unwrap().is_empty());
        assert!(VariantSpec::parse("  ,  ").unwrap().is_empty());
    }

    #[test]
    fn test_spec_parse_bare_name_error() {
        assert!(VariantSpec::parse("static").is_err());
        assert!(VariantSpec::parse("+pic static").is_err());
    }

    #[test]
    fn test_spec_get_unknown() {
        let spec = VariantSpec::parse("+pic").unwrap();
        assert_eq!(spec.get("dap"), None);
    }

    #[test]
    fn test_spec_get_last_wins() {
        let spec = VariantSpec::parse("+pic~pic").unwrap();
        assert_eq!(spec.get("pic"), Some(false));
    }

    #[test]
    fn test_spec_display_roundtrip() {
        let spec = VariantSpec::parse("+static ~dap +pic").unwrap();
        assert_eq!(spec.to_string(), "+static~dap+pic");
        let reparsed = VariantSpec::parse(&spec.to_string()).unwrap();
        assert_eq!(spec, reparsed);
    }
}
