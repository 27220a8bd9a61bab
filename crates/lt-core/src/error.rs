//! Base error type.
//!
//! Sub-crates define their own error enums and wrap the layer below with a
//! `#[from]` variant, so `?` works across crate boundaries.

use thiserror::Error;

/// Errors raised by `lt-core` itself (configuration validation).
#[derive(Debug, Error)]
pub enum LtError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `lt-core`.
pub type LtResult<T> = Result<T, LtError>;
