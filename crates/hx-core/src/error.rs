//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` where they
//! need to surface a core failure.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `hx-core`.
pub type CoreResult<T> = Result<T, CoreError>;
