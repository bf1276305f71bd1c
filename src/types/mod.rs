pub mod error;

pub use error::{RawValueError, ResolutionError, Result, UndefinedDocumentPath};
