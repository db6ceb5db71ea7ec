//! Identifier value objects.
//!
//! Research ids are directory names, entry ids live in entry frontmatter, and
//! template keys come from the `key` field of a template file. All three are
//! plain non-blank strings; construction rejects blank input.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Prefix for generated entry ids.
pub const PREFIX_ENTRY: &str = "entry";

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Build from a string, rejecting blank values.
            ///
            /// # Errors
            ///
            /// Returns `CoreError::Validation` if `value` is empty after trimming.
            pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(CoreError::Validation(concat!($label, " cannot be empty").to_string()));
                }
                Ok(Self(value))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<&str> for $name {
            type Error = CoreError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

string_id!(
    /// Research identifier. Equal to the research's directory name.
    ResearchId,
    "Research ID"
);

string_id!(
    /// Entry identifier, unique within one research.
    EntryId,
    "Entry ID"
);

string_id!(
    /// Template key, unique across the templates directory.
    TemplateKey,
    "Template key"
);

impl EntryId {
    /// Generate a fresh id: `entry_` followed by 12 hex chars of OS randomness.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Other` if the OS random source is unavailable.
    pub fn generate() -> Result<Self, CoreError> {
        let mut bytes = [0u8; 6];
        getrandom::fill(&mut bytes)
            .map_err(|e| CoreError::Other(anyhow::anyhow!("random source unavailable: {e}")))?;
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        Ok(Self(format!("{PREFIX_ENTRY}_{hex}")))
    }
}
