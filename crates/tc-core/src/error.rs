//! Core error type.
//!
//! Sub-crates define their own error enums and convert `CoreError` into them
//! via `From` impls.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `tc-core`.
pub type CoreResult<T> = Result<T, CoreError>;
