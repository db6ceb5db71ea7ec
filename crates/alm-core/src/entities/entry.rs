use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// A single markdown document belonging to a research.
///
/// `entry_type`, `category`, and `status` hold internal template keys. The
/// category/entry-type combination is checked against the template when the
/// entry is created, never on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub entry_id: String,
    pub title: String,
    /// Short summary for LLM consumers, at most 200 chars.
    pub description: String,
    pub entry_type: String,
    pub category: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<String>,
    /// Markdown body.
    pub content: String,
    /// Location of the backing markdown file, set once loaded or persisted.
    pub file_path: Option<PathBuf>,
}

/// Field overrides for [`Entry::with_updates`]. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub content: Option<String>,
}

impl Entry {
    /// Copy this entry with `changes` applied and `updated_at` refreshed.
    ///
    /// Identity, classification, `created_at`, and `file_path` are preserved.
    #[must_use]
    pub fn with_updates(&self, changes: EntryChanges) -> Self {
        Self {
            entry_id: self.entry_id.clone(),
            title: changes.title.unwrap_or_else(|| self.title.clone()),
            description: changes
                .description
                .unwrap_or_else(|| self.description.clone()),
            entry_type: self.entry_type.clone(),
            category: self.category.clone(),
            status: changes.status.unwrap_or_else(|| self.status.clone()),
            created_at: self.created_at,
            updated_at: Utc::now(),
            tags: changes.tags.unwrap_or_else(|| self.tags.clone()),
            content: changes.content.unwrap_or_else(|| self.content.clone()),
            file_path: self.file_path.clone(),
        }
    }

    /// Copy this entry with its backing file location set.
    #[must_use]
    pub fn with_file_path(&self, path: PathBuf) -> Self {
        Self {
            file_path: Some(path),
            ..self.clone()
        }
    }
}
