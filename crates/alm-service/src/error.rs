//! Service error taxonomy.
//!
//! Not-found conditions get their own variants so callers can tell them
//! apart from validation failures and from wrapped storage failures.

use std::error::Error as StdError;

use alm_config::ConfigError;
use alm_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Research '{0}' not found")]
    ResearchNotFound(String),

    #[error("Entry '{entry_id}' not found in research '{research_id}'")]
    EntryNotFound {
        research_id: String,
        entry_id: String,
    },

    #[error("Template '{0}' not found")]
    TemplateNotFound(String),

    /// One message per failed check. Nothing was written.
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// A storage or parse failure the operation could not degrade around.
    #[error("{context}: {source}")]
    Domain {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Storage driver '{0}' is not supported")]
    UnsupportedDriver(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ServiceError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    pub(crate) fn domain(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Domain {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// `Err(Validation)` when `errors` is non-empty.
    pub(crate) fn check(errors: Vec<String>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::Validation(errors))
        }
    }
}

impl From<CoreError> for ServiceError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::Validation(vec![message]),
            other @ CoreError::Other(_) => Self::domain("Unexpected failure", other),
        }
    }
}
