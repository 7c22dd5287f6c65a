//! Core error type.
//!
//! Higher crates wrap `CoreError` as one variant of their own enums via
//! `#[from]`, so `?` works across crate boundaries.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A trajectory entry was not strictly later than the previous one.
    #[error("non-chronological history entry: t={next} is not after t={last}")]
    NonChronological { last: f64, next: f64 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ado-core`.
pub type CoreResult<T> = Result<T, CoreError>;
