//! Raw Value Set
//!
//! Intermediate representation between the sources and the resolved
//! configuration. Every entry carries the value and the source that last
//! supplied it; a later write replaces both, values are never merged.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use super::schema::{OptionRegistry, OptionValue};
use crate::types::RawValueError;

/// Which source last supplied an option's current value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    Default,
    ConfigFile,
    CommandLine,
    /// Forced by an implication rule after validation
    Implied,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::ConfigFile => write!(f, "config-file"),
            Self::CommandLine => write!(f, "command-line"),
            Self::Implied => write!(f, "implied"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawEntry {
    pub value: OptionValue,
    pub provenance: Provenance,
}

/// Option name to value-plus-provenance, keyed by canonical name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValueSet {
    registry: OptionRegistry,
    entries: BTreeMap<&'static str, RawEntry>,
}

impl RawValueSet {
    /// Seed one entry per defaulted option, provenance `Default`
    pub fn from_defaults(registry: OptionRegistry) -> Self {
        let entries = registry
            .iter()
            .filter_map(|d| {
                d.default.clone().map(|value| {
                    (
                        d.name,
                        RawEntry {
                            value,
                            provenance: Provenance::Default,
                        },
                    )
                })
            })
            .collect();

        Self { registry, entries }
    }

    /// Overwrite an option's value and provenance.
    ///
    /// `name` may be an alias; the entry is stored under the canonical name.
    pub fn set(
        &mut self,
        name: &str,
        value: OptionValue,
        provenance: Provenance,
    ) -> Result<(), RawValueError> {
        let descriptor = self
            .registry
            .lookup(name)
            .ok_or_else(|| RawValueError::UnknownOption(name.to_string()))?;

        if !value.fits(descriptor.kind) {
            return Err(RawValueError::KindMismatch {
                option: descriptor.name,
                expected: descriptor.kind.label(),
            });
        }

        self.entries
            .insert(descriptor.name, RawEntry { value, provenance });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RawEntry> {
        let canonical = self.registry.lookup(name)?.name;
        self.entries.get(canonical)
    }

    pub fn provenance(&self, name: &str) -> Option<Provenance> {
        self.get(name).map(|e| e.provenance)
    }

    /// Boolean value, `false` when absent
    pub fn flag(&self, name: &str) -> bool {
        matches!(
            self.get(name),
            Some(RawEntry {
                value: OptionValue::Bool(true),
                ..
            })
        )
    }

    /// Unsigned value, if present
    pub fn unsigned(&self, name: &str) -> Option<u32> {
        match self.get(name)?.value {
            OptionValue::Unsigned(n) => Some(n),
            _ => None,
        }
    }

    /// Path value, if present
    pub fn path(&self, name: &str) -> Option<&Path> {
        match &self.get(name)?.value {
            OptionValue::Path(p) => Some(p.as_path()),
            _ => None,
        }
    }

    /// Entries in canonical-name order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &RawEntry)> {
        self.entries.iter().map(|(name, entry)| (*name, entry))
    }

    pub fn registry(&self) -> OptionRegistry {
        self.registry
    }
}

// =============================================================================
// Tests
// =============================================================================
