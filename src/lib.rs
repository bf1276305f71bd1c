//! dspdfviewer - Dual Screen PDF Viewer Configuration
//!
//! Resolves the presenter's effective runtime configuration from the command
//! line and the per-user config file, so the rest of the viewer can query a
//! single, internally consistent settings object.
//!
//! ## Resolution Pipeline
//!
//! - **Defaults**: every option declared in the [`OptionRegistry`]
//! - **Config file**: `~/.config/dspdfviewer.ini`, best effort
//! - **Command line**: always wins over the config file
//! - **Validation**: bounded options checked (bottom pane 1-99 percent)
//! - **Cascade**: no second screen hides the presenter area, which in turn
//!   hides the clocks and thumbnails
//!
//! ## Quick Start
//!
//! ```no_run
//! use dspdfviewer::{ConfigLoader, Resolution, resolve};
//!
//! let home = std::env::var_os("HOME");
//! let file = ConfigLoader::read_user_config(home.as_deref());
//! match resolve(std::env::args_os().skip(1), file.as_deref())? {
//!     Resolution::Configured(config) => println!("{:?}", config.document_path()),
//!     Resolution::Informational(request) => println!("{}", request.text),
//! }
//! # Ok::<(), dspdfviewer::ResolutionError>(())
//! ```

pub mod config;
pub mod constants;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use config::{
    ConfigLoader, InformationalKind, InformationalRequest, OptionDescriptor, OptionKind,
    OptionRegistry, OptionSources, OptionValue, Provenance, RawValueSet, Resolution,
    ResolvedConfiguration, Resolver, resolve,
};

pub use types::error::{RawValueError, ResolutionError, Result, UndefinedDocumentPath};
