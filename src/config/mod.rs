//! Configuration Management
//!
//! Runtime configuration resolution with fixed precedence:
//! 1. Built-in defaults (option registry)
//! 2. User config file (~/.config/dspdfviewer.ini)
//! 3. Command-line arguments (highest priority)
//!
//! followed by bound validation and the implication cascade.

pub mod command_line;
mod loader;
pub mod raw;
mod resolver;
pub mod schema;
mod types;

pub use command_line::{InformationalKind, InformationalRequest};
pub use loader::{ConfigEntry, ConfigLoader};
pub use raw::{Provenance, RawEntry, RawValueSet};
pub use resolver::{
    IMPLICATIONS, Implication, Resolution, Resolver, apply_implications, resolve, validate,
};
pub use schema::{
    OptionDescriptor, OptionKind, OptionRegistry, OptionSources, OptionValue, Section, names,
};
pub use types::ResolvedConfiguration;
