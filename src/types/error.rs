//! Unified Error Type System
//!
//! Error types for configuration resolution.
//!
//! ## Error Kinds
//!
//! - **OutOfRange**: a bounded numeric option violates its bounds, including
//!   integers that do not fit its type at all (fatal)
//! - **MalformedInput**: a command-line token matches no known shape (fatal)
//! - **UndefinedDocumentPath**: deferred, raised only when the path is queried
//!
//! A missing or unreadable config file is not an error at all; it simply
//! contributes no values.

use thiserror::Error;

use crate::constants::exit;

// =============================================================================
// Resolution Error
// =============================================================================

/// Fatal outcome of resolving the runtime configuration.
///
/// No partial configuration is ever produced alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("Invalid value {value} for '{option}': must be between {min} and {max}")]
    OutOfRange {
        option: &'static str,
        value: i64,
        min: u32,
        max: u32,
    },

    #[error("Malformed command line: {message}")]
    MalformedInput { message: String },
}

impl ResolutionError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Exit code the entry point should terminate with
    pub fn exit_code(&self) -> u8 {
        exit::RESOLUTION_FAILED
    }
}

impl From<clap::Error> for ResolutionError {
    fn from(err: clap::Error) -> Self {
        let rendered = err.render().to_string();
        let message = rendered
            .lines()
            .next()
            .unwrap_or_default()
            .trim_start_matches("error: ")
            .to_string();
        Self::MalformedInput { message }
    }
}

// =============================================================================
// Document Path Error
// =============================================================================

/// The document path was queried before it was ever supplied or injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("You did not specify a PDF-File to display.")]
pub struct UndefinedDocumentPath;

// =============================================================================
// Raw Value Error
// =============================================================================

/// Rejected write into a raw value set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RawValueError {
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Option '{option}' expects a {expected} value")]
    KindMismatch {
        option: &'static str,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ResolutionError>;

// =============================================================================
// Tests
// =============================================================================
