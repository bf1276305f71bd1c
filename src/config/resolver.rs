//! Configuration Resolver
//!
//! Produces one [`ResolvedConfiguration`] from raw inputs:
//! 1. Registry defaults
//! 2. Config file overlay (optional, best effort)
//! 3. Command-line overlay (always wins)
//! 4. Bound validation
//! 5. Implication cascade
//!
//! The resolver never touches the environment or terminates the process;
//! help/version requests come back as [`Resolution::Informational`].

use std::ffi::OsString;

use tracing::debug;

use super::command_line::{self, CommandLine, InformationalRequest};
use super::loader::ConfigLoader;
use super::raw::{Provenance, RawValueSet};
use super::schema::{OptionRegistry, OptionValue, names};
use super::types::ResolvedConfiguration;
use crate::types::{ResolutionError, Result};

/// Successful outcome of resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Run the viewer with this configuration
    Configured(ResolvedConfiguration),
    /// Display this text instead of running
    Informational(InformationalRequest),
}

// =============================================================================
// Implication Cascade
// =============================================================================

/// When `when` holds `is`, force every option in `force` to `to`
#[derive(Debug, Clone, Copy)]
pub struct Implication {
    pub when: &'static str,
    pub is: bool,
    pub force: &'static [&'static str],
    pub to: bool,
}

/// Applied in order; later rules see the effects of earlier ones.
pub const IMPLICATIONS: &[Implication] = &[
    Implication {
        when: names::USE_SECOND_SCREEN,
        is: false,
        force: &[names::PRESENTER_AREA],
        to: false,
    },
    Implication {
        when: names::PRESENTER_AREA,
        is: false,
        force: &[
            names::PRESENTATION_CLOCK,
            names::WALL_CLOCK,
            names::SLIDE_CLOCK,
            names::THUMBNAILS,
        ],
        to: false,
    },
];

/// Apply [`IMPLICATIONS`] to a raw value set.
///
/// Only values that actually change are rewritten (with `Implied`
/// provenance), so applying the cascade again is a no-op.
pub fn apply_implications(raw: &mut RawValueSet) {
    for rule in IMPLICATIONS {
        if raw.flag(rule.when) != rule.is {
            continue;
        }
        for &target in rule.force {
            if raw.flag(target) == rule.to {
                continue;
            }
            debug!("{} forced to {} by {}={}", target, rule.to, rule.when, rule.is);
            if let Err(e) = raw.set(target, OptionValue::Bool(rule.to), Provenance::Implied) {
                debug!("Implication target rejected: {}", e);
            }
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Check every bounded option against its inclusive bounds
pub fn validate(raw: &RawValueSet) -> Result<()> {
    for descriptor in raw.registry().iter() {
        let (Some((min, max)), Some(entry)) = (descriptor.bounds, raw.get(descriptor.name)) else {
            continue;
        };
        let value = match entry.value {
            OptionValue::Unsigned(n) if (min..=max).contains(&n) => continue,
            OptionValue::Unsigned(n) => i64::from(n),
            OptionValue::Integer(n) => n,
            _ => continue,
        };
        return Err(ResolutionError::OutOfRange {
            option: descriptor.name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Resolver
// =============================================================================

/// Configuration resolver over an option registry
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    registry: OptionRegistry,
}

impl Resolver {
    pub fn new(registry: OptionRegistry) -> Self {
        Self { registry }
    }

    /// Resolve command-line tokens (without the program name) and optional
    /// config-file bytes into a configuration.
    pub fn resolve<I, T>(&self, tokens: I, config_file: Option<&[u8]>) -> Result<Resolution>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let command_line = match command_line::parse(self.registry, tokens)? {
            CommandLine::Informational(request) => {
                debug!("Informational request: {:?}", request.kind);
                return Ok(Resolution::Informational(request));
            }
            CommandLine::Values(values) => values,
        };

        let mut raw = RawValueSet::from_defaults(self.registry);

        if let Some(bytes) = config_file {
            ConfigLoader::overlay(&mut raw, bytes);
        }

        for (name, value) in command_line.options {
            raw.set(name, value, Provenance::CommandLine)
                .map_err(|e| ResolutionError::malformed(e.to_string()))?;
        }
        if let Some(path) = command_line.document_path {
            raw.set(
                names::DOCUMENT_PATH,
                OptionValue::Path(path),
                Provenance::CommandLine,
            )
            .map_err(|e| ResolutionError::malformed(e.to_string()))?;
        }

        validate(&raw)?;
        apply_implications(&mut raw);

        for (name, entry) in raw.iter() {
            debug!("{} = {} ({})", name, entry.value, entry.provenance);
        }

        Ok(Resolution::Configured(ResolvedConfiguration::from_raw(&raw)))
    }
}

/// Resolve with the standard registry
pub fn resolve<I, T>(tokens: I, config_file: Option<&[u8]>) -> Result<Resolution>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Resolver::default().resolve(tokens, config_file)
}

// =============================================================================
// Tests
// =============================================================================
