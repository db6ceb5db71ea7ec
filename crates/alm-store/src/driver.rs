//! Storage driver: turns already-validated requests into persisted entities.
//!
//! The service layer checks existence, looks up the template, and resolves
//! display names before calling a driver. A driver only builds the entity
//! (ids, timestamps, defaults) and hands it to the repositories.

use std::sync::Arc;

use chrono::Utc;

use alm_core::entities::{Entry, Research, Template};
use alm_core::ids::{EntryId, ResearchId};
use alm_core::requests::{
    EntryCreateRequest, EntryUpdateRequest, ResearchCreateRequest, ResearchUpdateRequest,
};

use crate::error::StoreError;
use crate::helpers::slugify;
use crate::repos::{EntryRepository, ResearchRepository};

const FALLBACK_RESEARCH_SLUG: &str = "research";

/// Persistence backend for researches and entries.
pub trait StorageDriver: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this driver handles the configured driver `kind`.
    fn supports(&self, kind: &str) -> bool;

    /// Create a research bound to `template`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the research cannot be written.
    fn create_research(
        &self,
        request: &ResearchCreateRequest,
        template: &Template,
    ) -> Result<Research, StoreError>;

    /// Apply `request` to `research` and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the research cannot be written.
    fn update_research(
        &self,
        research: &Research,
        request: &ResearchUpdateRequest,
    ) -> Result<Research, StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError` if removal fails.
    fn delete_research(&self, id: &ResearchId) -> Result<bool, StoreError>;

    /// Create an entry from a request whose category, entry type, and status
    /// already hold internal keys.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if no id can be generated or the file cannot be
    /// written.
    fn create_entry(
        &self,
        research_id: &ResearchId,
        request: &EntryCreateRequest,
    ) -> Result<Entry, StoreError>;

    /// Apply `request` (status already resolved) to `entry` and persist it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be written.
    fn update_entry(
        &self,
        research_id: &ResearchId,
        entry: &Entry,
        request: &EntryUpdateRequest,
    ) -> Result<Entry, StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be removed.
    fn delete_entry(
        &self,
        research_id: &ResearchId,
        entry_id: &EntryId,
    ) -> Result<bool, StoreError>;
}

/// Markdown-on-disk driver over the file repositories.
pub struct FileStorageDriver {
    default_entry_status: String,
    research_repo: Arc<dyn ResearchRepository>,
    entry_repo: Arc<dyn EntryRepository>,
}

impl FileStorageDriver {
    /// `default_entry_status` is the status of new researches and of entries
    /// created without one.
    #[must_use]
    pub fn new(
        default_entry_status: impl Into<String>,
        research_repo: Arc<dyn ResearchRepository>,
        entry_repo: Arc<dyn EntryRepository>,
    ) -> Self {
        Self {
            default_entry_status: default_entry_status.into(),
            research_repo,
            entry_repo,
        }
    }

    fn is_taken(&self, candidate: &str) -> Result<bool, StoreError> {
        Ok(self.research_repo.exists(&ResearchId::new(candidate)?))
    }

    /// `slug(title)`, then `slug-YYYYMMDDHHMMSS`, then that plus `-2`, `-3`, ...
    fn unique_research_id(&self, title: &str) -> Result<ResearchId, StoreError> {
        let mut base = slugify(title);
        if base.is_empty() {
            base = FALLBACK_RESEARCH_SLUG.to_string();
        }
        if !self.is_taken(&base)? {
            return Ok(ResearchId::new(base)?);
        }

        let stamped = format!("{base}-{}", Utc::now().format("%Y%m%d%H%M%S"));
        let mut candidate = stamped.clone();
        let mut counter = 2;
        while self.is_taken(&candidate)? {
            candidate = format!("{stamped}-{counter}");
            counter += 1;
        }
        tracing::debug!(title, id = %candidate, "research slug taken, using suffixed id");
        Ok(ResearchId::new(candidate)?)
    }

    fn unique_entry_id(&self, research_id: &ResearchId) -> Result<EntryId, StoreError> {
        loop {
            let id = EntryId::generate()?;
            if !self.entry_repo.exists(research_id, &id) {
                return Ok(id);
            }
            tracing::warn!(entry_id = %id, "generated entry id already in use, regenerating");
        }
    }
}

impl StorageDriver for FileStorageDriver {
    fn name(&self) -> &'static str {
        "file_storage"
    }

    fn supports(&self, kind: &str) -> bool {
        matches!(kind, "markdown" | "file")
    }

    fn create_research(
        &self,
        request: &ResearchCreateRequest,
        template: &Template,
    ) -> Result<Research, StoreError> {
        let id = self.unique_research_id(&request.title)?;
        let entry_dirs = if request.entry_dirs.is_empty() {
            template.category_names()
        } else {
            request.entry_dirs.clone()
        };

        let research = Research {
            id: id.into_inner(),
            name: request.title.clone(),
            description: request.description.clone(),
            template: template.key.clone(),
            status: self.default_entry_status.clone(),
            tags: request.tags.clone(),
            entry_dirs,
            memory: request.memory.clone(),
            path: None,
        };
        let saved = self.research_repo.save(&research)?;
        tracing::debug!(research_id = %saved.id, name = %saved.name, "created research");
        Ok(saved)
    }

    fn update_research(
        &self,
        research: &Research,
        request: &ResearchUpdateRequest,
    ) -> Result<Research, StoreError> {
        if !request.has_updates() {
            return Ok(research.clone());
        }
        let saved = self
            .research_repo
            .save(&research.with_updates(request.changes()))?;
        tracing::debug!(research_id = %saved.id, "updated research");
        Ok(saved)
    }

    fn delete_research(&self, id: &ResearchId) -> Result<bool, StoreError> {
        if !self.research_repo.exists(id) {
            return Ok(false);
        }
        self.research_repo.delete(id)
    }

    fn create_entry(
        &self,
        research_id: &ResearchId,
        request: &EntryCreateRequest,
    ) -> Result<Entry, StoreError> {
        let entry_id = self.unique_entry_id(research_id)?;
        let now = Utc::now();

        let entry = Entry {
            entry_id: entry_id.into_inner(),
            title: request.processed_title(),
            description: request.processed_description(),
            entry_type: request.entry_type.clone(),
            category: request.category.clone(),
            status: request
                .status
                .clone()
                .unwrap_or_else(|| self.default_entry_status.clone()),
            created_at: now,
            updated_at: now,
            tags: request.tags.clone(),
            content: request.content.clone(),
            file_path: None,
        };
        let saved = self.entry_repo.save(research_id, &entry)?;
        tracing::debug!(
            research_id = %research_id,
            entry_id = %saved.entry_id,
            title = %saved.title,
            "created entry"
        );
        Ok(saved)
    }

    fn update_entry(
        &self,
        research_id: &ResearchId,
        entry: &Entry,
        request: &EntryUpdateRequest,
    ) -> Result<Entry, StoreError> {
        if !request.has_updates() {
            return Ok(entry.clone());
        }
        let updated = entry.with_updates(request.changes(&entry.content));
        let saved = self.entry_repo.save(research_id, &updated)?;
        tracing::debug!(research_id = %research_id, entry_id = %saved.entry_id, "updated entry");
        Ok(saved)
    }

    fn delete_entry(
        &self,
        research_id: &ResearchId,
        entry_id: &EntryId,
    ) -> Result<bool, StoreError> {
        if !self.entry_repo.exists(research_id, entry_id) {
            return Ok(false);
        }
        self.entry_repo.delete(research_id, entry_id)
    }
}
