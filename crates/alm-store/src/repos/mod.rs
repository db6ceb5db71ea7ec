//! Repository traits and their file-backed implementations.
//!
//! Reads degrade instead of failing: a corrupt file is logged and skipped, a
//! missing one reads as `None`. Writes and deletes return `StoreError` so the
//! service layer can report them.

mod entry;
mod research;
mod template;

pub use entry::FileEntryRepository;
pub use research::FileResearchRepository;
pub use template::FileTemplateRepository;

use std::path::{Path, PathBuf};

use alm_core::entities::{Entry, Research, Template};
use alm_core::filters::{EntryFilters, ResearchFilters};
use alm_core::ids::{EntryId, ResearchId, TemplateKey};
use alm_core::requests::is_plain_dir_name;

use crate::error::StoreError;

/// Template definitions. Every call reads the templates directory afresh.
pub trait TemplateRepository: Send + Sync {
    fn find_all(&self) -> Vec<Template>;

    fn find_by_key(&self, key: &TemplateKey) -> Option<Template>;

    fn exists(&self, key: &TemplateKey) -> bool {
        self.find_by_key(key).is_some()
    }

    /// Drop any cached state. File-backed repositories hold none.
    fn refresh(&self);
}

pub trait ResearchRepository: Send + Sync {
    fn find_all(&self, filters: &ResearchFilters) -> Vec<Research>;

    fn find_by_id(&self, id: &ResearchId) -> Option<Research>;

    /// Persist `research`, returning it with its location set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a directory or the config file cannot be written.
    fn save(&self, research: &Research) -> Result<Research, StoreError>;

    /// Remove the research and everything under it. `Ok(false)` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if removal fails part-way. Files that were
    /// not yet removed stay on disk.
    fn delete(&self, id: &ResearchId) -> Result<bool, StoreError>;

    fn exists(&self, id: &ResearchId) -> bool;
}

pub trait EntryRepository: Send + Sync {
    fn find_by_research(&self, research_id: &ResearchId, filters: &EntryFilters) -> Vec<Entry>;

    fn find_by_id(&self, research_id: &ResearchId, entry_id: &EntryId) -> Option<Entry>;

    /// Persist `entry`, returning it with its file location set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ResearchDirMissing` if the research directory is
    /// gone, or another `StoreError` if the file cannot be written.
    fn save(&self, research_id: &ResearchId, entry: &Entry) -> Result<Entry, StoreError>;

    /// Remove the entry's file. `Ok(false)` if no file carries the id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be removed.
    fn delete(&self, research_id: &ResearchId, entry_id: &EntryId) -> Result<bool, StoreError>;

    fn exists(&self, research_id: &ResearchId, entry_id: &EntryId) -> bool;
}

/// Directory of research `id` under `root`, or `None` when the id is not a
/// single plain path segment (`..`, `a/b`, absolute paths).
pub(crate) fn research_dir(root: &Path, id: &ResearchId) -> Option<PathBuf> {
    if is_plain_dir_name(id.as_str()) {
        Some(root.join(id.as_str()))
    } else {
        tracing::warn!(research_id = %id, "rejecting research id that is not a plain directory name");
        None
    }
}
