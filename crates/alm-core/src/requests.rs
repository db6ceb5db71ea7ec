//! Create and update requests accepted by the services.
//!
//! Each request validates its own fields and returns a list of human-readable
//! messages rather than failing on the first problem. Category, entry type,
//! and status fields accept either internal keys or display names until the
//! service resolves them against the research's template.

use std::path::{Component, Path};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{EntryChanges, ResearchChanges};
use crate::text::{self, MAX_DESCRIPTION_CHARS};

const TAGS_BLANK: &str = "All tags must be non-empty strings";
const DESCRIPTION_TOO_LONG: &str = "Description must not exceed 200 characters";

fn tags_are_blank(tags: &[String]) -> bool {
    tags.iter().any(|t| t.trim().is_empty())
}

fn description_too_long(description: Option<&String>) -> bool {
    description.is_some_and(|d| d.trim().chars().count() > MAX_DESCRIPTION_CHARS)
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Whether `name` is exactly one ordinary path segment: no separators, no
/// `.` or `..`, not absolute.
#[must_use]
pub fn is_plain_dir_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn entry_dir_errors(dirs: &[String]) -> Vec<String> {
    dirs.iter()
        .filter(|dir| !is_plain_dir_name(dir))
        .map(|dir| format!("Entry directory '{dir}' must be a single directory name"))
        .collect()
}

// ---------------------------------------------------------------------------
// Research
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResearchCreateRequest {
    pub template_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Entry subdirectories. Empty means one directory per template category.
    #[serde(default)]
    pub entry_dirs: Vec<String>,
    #[serde(default)]
    pub memory: Vec<String>,
}

impl ResearchCreateRequest {
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.template_id.trim().is_empty() {
            errors.push("Template ID cannot be empty".to_string());
        }
        if self.title.trim().is_empty() {
            errors.push("Research title cannot be empty".to_string());
        }
        errors.extend(entry_dir_errors(&self.entry_dirs));
        errors
    }
}

/// One memory note in a research update.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResearchMemory {
    pub record: String,
}

/// Partial research update. Absent fields are left unchanged; `memory`
/// replaces the whole list when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResearchUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub entry_dirs: Option<Vec<String>>,
    pub memory: Option<Vec<ResearchMemory>>,
}

impl ResearchUpdateRequest {
    #[must_use]
    pub const fn has_updates(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.status.is_some()
            || self.tags.is_some()
            || self.entry_dirs.is_some()
            || self.memory.is_some()
    }

    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.tags.as_deref().is_some_and(tags_are_blank) {
            errors.push(TAGS_BLANK.to_string());
        }
        if self
            .status
            .as_deref()
            .is_some_and(|s| s.trim().is_empty())
        {
            errors.push("Status cannot be empty when provided".to_string());
        }
        if let Some(dirs) = &self.entry_dirs {
            errors.extend(entry_dir_errors(dirs));
        }
        errors
    }

    /// Field overrides for [`crate::entities::Research::with_updates`].
    #[must_use]
    pub fn changes(&self) -> ResearchChanges {
        ResearchChanges {
            name: self.title.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            tags: self.tags.clone(),
            entry_dirs: self.entry_dirs.clone(),
            memory: self
                .memory
                .as_ref()
                .map(|records| records.iter().map(|m| m.record.clone()).collect()),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EntryCreateRequest {
    /// Category name or display name.
    pub category: String,
    /// Entry type key or display name.
    pub entry_type: String,
    pub content: String,
    /// Derived from the first content line when absent.
    pub title: Option<String>,
    /// Derived from the lines after the title when absent.
    pub description: Option<String>,
    /// Status value or display name. Defaults to the entry type's default status.
    pub status: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl EntryCreateRequest {
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.category.trim().is_empty() {
            errors.push("Category cannot be empty".to_string());
        }
        if self.entry_type.trim().is_empty() {
            errors.push("Entry type cannot be empty".to_string());
        }
        if self.content.trim().is_empty() {
            errors.push("Content cannot be empty".to_string());
        }
        if tags_are_blank(&self.tags) {
            errors.push(TAGS_BLANK.to_string());
        }
        if description_too_long(self.description.as_ref()) {
            errors.push(DESCRIPTION_TOO_LONG.to_string());
        }
        errors
    }

    /// Explicit title if non-blank, else one derived from the content.
    #[must_use]
    pub fn processed_title(&self) -> String {
        non_blank(self.title.as_ref())
            .map_or_else(|| text::derive_title(&self.content), str::to_string)
    }

    /// Explicit description if non-blank (cut to 200 chars), else one derived
    /// from the content.
    #[must_use]
    pub fn processed_description(&self) -> String {
        non_blank(self.description.as_ref()).map_or_else(
            || text::derive_description(&self.content),
            text::truncate_description,
        )
    }

    /// Copy with category, entry type, and status replaced by internal keys.
    #[must_use]
    pub fn with_resolved_keys(
        &self,
        category: impl Into<String>,
        entry_type: impl Into<String>,
        status: Option<String>,
    ) -> Self {
        Self {
            category: category.into(),
            entry_type: entry_type.into(),
            status: status.or_else(|| self.status.clone()),
            ..self.clone()
        }
    }
}

/// Find-and-replace applied to entry content.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TextReplace {
    pub find: String,
    /// May be empty to delete every occurrence of `find`.
    pub replace: String,
}

impl TextReplace {
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        if self.find.is_empty() {
            vec!["Find text cannot be empty for text replacement".to_string()]
        } else {
            Vec::new()
        }
    }

    #[must_use]
    pub fn apply(&self, content: &str) -> String {
        content.replace(&self.find, &self.replace)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EntryUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    /// Status value or display name, resolved against the entry's type.
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub text_replace: Option<TextReplace>,
}

impl EntryUpdateRequest {
    #[must_use]
    pub const fn has_updates(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.content.is_some()
            || self.status.is_some()
            || self.tags.is_some()
            || self.text_replace.is_some()
    }

    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            errors.push("Title cannot be empty when provided".to_string());
        }
        if self.tags.as_deref().is_some_and(tags_are_blank) {
            errors.push(TAGS_BLANK.to_string());
        }
        if description_too_long(self.description.as_ref()) {
            errors.push(DESCRIPTION_TOO_LONG.to_string());
        }
        if let Some(replace) = &self.text_replace {
            errors.extend(replace.validate());
        }
        errors
    }

    /// Content to persist, or `None` to keep the existing content.
    ///
    /// New content, when given, is the base; otherwise `existing` is. A text
    /// replacement is applied on top of whichever base was chosen.
    #[must_use]
    pub fn final_content(&self, existing: &str) -> Option<String> {
        match &self.text_replace {
            Some(replace) => {
                let base = self.content.as_deref().unwrap_or(existing);
                Some(replace.apply(base))
            }
            None => self.content.clone(),
        }
    }

    /// Copy with the status replaced by its internal value.
    #[must_use]
    pub fn with_resolved_status(&self, status: Option<String>) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Field overrides for [`crate::entities::Entry::with_updates`].
    #[must_use]
    pub fn changes(&self, existing_content: &str) -> EntryChanges {
        EntryChanges {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            tags: self.tags.clone(),
            content: self.final_content(existing_content),
        }
    }
}
