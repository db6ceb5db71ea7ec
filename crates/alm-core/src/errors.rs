//! Cross-cutting error types for Almanac.
//!
//! This module defines errors that can originate from any crate in the system.
//! Storage errors (`StoreError`) and the service taxonomy (`ServiceError`) are
//! defined in their respective crates.

use thiserror::Error;

/// Errors that can be raised by any Almanac crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (empty identifiers, malformed values).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
