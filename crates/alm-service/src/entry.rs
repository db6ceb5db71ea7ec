//! Entry lifecycle with template validation.
//!
//! Callers may name categories, entry types, and statuses by key or by
//! display name. Everything is resolved to internal keys and checked against
//! the research's template before the driver writes anything.

use std::sync::Arc;

use alm_core::entities::{Entry, Research, Template};
use alm_core::filters::EntryFilters;
use alm_core::ids::{EntryId, ResearchId, TemplateKey};
use alm_core::pagination::{Page, Pagination};
use alm_core::requests::{EntryCreateRequest, EntryUpdateRequest};
use alm_store::{EntryRepository, ResearchRepository, StorageDriver};

use crate::error::ServiceError;
use crate::template::TemplateService;

#[derive(Clone)]
pub struct EntryService {
    entries: Arc<dyn EntryRepository>,
    researches: Arc<dyn ResearchRepository>,
    templates: TemplateService,
    driver: Arc<dyn StorageDriver>,
}

impl EntryService {
    #[must_use]
    pub fn new(
        entries: Arc<dyn EntryRepository>,
        researches: Arc<dyn ResearchRepository>,
        templates: TemplateService,
        driver: Arc<dyn StorageDriver>,
    ) -> Self {
        Self {
            entries,
            researches,
            templates,
            driver,
        }
    }

    /// Create an entry in `research_id`.
    ///
    /// Status defaults to the entry type's default status when the request
    /// carries none.
    ///
    /// # Errors
    ///
    /// `Validation` for a bad request or an unresolvable or disallowed
    /// category/entry type/status, `ResearchNotFound`, `TemplateNotFound`,
    /// or `Domain` if the file cannot be written.
    pub fn create_entry(
        &self,
        research_id: &ResearchId,
        request: &EntryCreateRequest,
    ) -> Result<Entry, ServiceError> {
        ServiceError::check(request.validate())?;
        tracing::info!(
            research_id = %research_id,
            category = %request.category,
            entry_type = %request.entry_type,
            "creating entry"
        );

        let research = self.require_research(research_id)?;
        let template = self.template_for(&research)?;

        let category = self
            .templates
            .resolve_category_key(&template, &request.category)
            .ok_or_else(|| {
                ServiceError::validation(format!(
                    "Category '{}' not found in template '{}'",
                    request.category, template.key
                ))
            })?;
        let entry_type = self
            .templates
            .resolve_entry_type_key(&template, &request.entry_type)
            .ok_or_else(|| {
                ServiceError::validation(format!(
                    "Entry type '{}' not found in template '{}'",
                    request.entry_type, template.key
                ))
            })?;

        if !template.validate_entry_in_category(&category, &entry_type) {
            tracing::error!(
                research_id = %research_id,
                category = %category,
                entry_type = %entry_type,
                "entry type not allowed in category"
            );
            return Err(ServiceError::validation(format!(
                "Entry type '{}' is not allowed in category '{}'",
                request.entry_type, request.category
            )));
        }

        let status = match &request.status {
            Some(input) => Some(self.resolve_status(&template, &entry_type, input)?),
            None => template
                .entry_type(&entry_type)
                .map(|t| t.default_status.clone()),
        };

        let resolved = request.with_resolved_keys(category, entry_type, status);
        let entry = self
            .driver
            .create_entry(research_id, &resolved)
            .map_err(|e| {
                tracing::error!(error = %e, research_id = %research_id, "failed to create entry");
                ServiceError::domain("Failed to create entry", e)
            })?;

        tracing::info!(
            research_id = %research_id,
            entry_id = %entry.entry_id,
            title = %entry.title,
            category = %entry.category,
            entry_type = %entry.entry_type,
            "entry created"
        );
        Ok(entry)
    }

    /// Update an entry. A status is resolved against the entry's own type.
    ///
    /// # Errors
    ///
    /// `Validation`, `ResearchNotFound`, `EntryNotFound`, `TemplateNotFound`
    /// (only when a status must be resolved), or `Domain` on a write failure.
    pub fn update_entry(
        &self,
        research_id: &ResearchId,
        entry_id: &EntryId,
        request: &EntryUpdateRequest,
    ) -> Result<Entry, ServiceError> {
        ServiceError::check(request.validate())?;
        tracing::info!(
            research_id = %research_id,
            entry_id = %entry_id,
            has_title = request.title.is_some(),
            has_content = request.content.is_some(),
            has_status = request.status.is_some(),
            has_text_replace = request.text_replace.is_some(),
            "updating entry"
        );

        let research = self.require_research(research_id)?;
        let existing = self.entries.find_by_id(research_id, entry_id).ok_or_else(|| {
            tracing::error!(research_id = %research_id, entry_id = %entry_id, "entry not found");
            ServiceError::EntryNotFound {
                research_id: research_id.to_string(),
                entry_id: entry_id.to_string(),
            }
        })?;

        let resolved = match &request.status {
            Some(input) => {
                let template = self.template_for(&research)?;
                let status = self.resolve_status(&template, &existing.entry_type, input)?;
                request.with_resolved_status(Some(status))
            }
            None => request.clone(),
        };

        let updated = self
            .driver
            .update_entry(research_id, &existing, &resolved)
            .map_err(|e| {
                tracing::error!(error = %e, research_id = %research_id, entry_id = %entry_id, "failed to update entry");
                ServiceError::domain("Failed to update entry", e)
            })?;

        tracing::info!(research_id = %research_id, entry_id = %entry_id, title = %updated.title, "entry updated");
        Ok(updated)
    }

    pub fn entry_exists(&self, research_id: &ResearchId, entry_id: &EntryId) -> bool {
        let exists = self.entries.exists(research_id, entry_id);
        tracing::debug!(research_id = %research_id, entry_id = %entry_id, exists, "checked entry existence");
        exists
    }

    /// # Errors
    ///
    /// `ResearchNotFound` if the research does not exist. A missing entry is
    /// `Ok(None)`.
    pub fn get_entry(
        &self,
        research_id: &ResearchId,
        entry_id: &EntryId,
    ) -> Result<Option<Entry>, ServiceError> {
        if !self.researches.exists(research_id) {
            tracing::error!(research_id = %research_id, "research not found");
            return Err(ServiceError::ResearchNotFound(research_id.to_string()));
        }
        let entry = self.entries.find_by_id(research_id, entry_id);
        tracing::info!(research_id = %research_id, entry_id = %entry_id, found = entry.is_some(), "entry lookup");
        Ok(entry)
    }

    /// Entries of a research matching `filters`. An unknown research has no
    /// entries.
    ///
    /// # Errors
    ///
    /// `Validation` if the filters are malformed.
    pub fn find_all(
        &self,
        research_id: &ResearchId,
        filters: &EntryFilters,
    ) -> Result<Vec<Entry>, ServiceError> {
        ServiceError::check(filters.validate())?;
        if !self.researches.exists(research_id) {
            tracing::warn!(research_id = %research_id, "listing entries of non-existent research");
            return Ok(Vec::new());
        }
        let entries = self.entries.find_by_research(research_id, filters);
        tracing::info!(
            research_id = %research_id,
            count = entries.len(),
            filtered = filters.has_filters(),
            "retrieved entries"
        );
        Ok(entries)
    }

    /// # Errors
    ///
    /// `Validation` if the filters or pagination are malformed.
    pub fn list(
        &self,
        research_id: &ResearchId,
        filters: &EntryFilters,
        pagination: &Pagination,
    ) -> Result<Page<Entry>, ServiceError> {
        ServiceError::check(pagination.validate())?;
        Ok(pagination.paginate(self.find_all(research_id, filters)?))
    }

    /// `Ok(false)` if no such entry exists.
    ///
    /// # Errors
    ///
    /// `Domain` if the file cannot be removed.
    pub fn delete_entry(
        &self,
        research_id: &ResearchId,
        entry_id: &EntryId,
    ) -> Result<bool, ServiceError> {
        if !self.entries.exists(research_id, entry_id) {
            tracing::warn!(research_id = %research_id, entry_id = %entry_id, "attempted to delete non-existent entry");
            return Ok(false);
        }
        let deleted = self.driver.delete_entry(research_id, entry_id).map_err(|e| {
            tracing::error!(error = %e, research_id = %research_id, entry_id = %entry_id, "failed to delete entry");
            ServiceError::domain("Failed to delete entry", e)
        })?;
        if deleted {
            tracing::info!(research_id = %research_id, entry_id = %entry_id, "entry deleted");
        }
        Ok(deleted)
    }

    fn require_research(&self, id: &ResearchId) -> Result<Research, ServiceError> {
        self.researches.find_by_id(id).ok_or_else(|| {
            tracing::error!(research_id = %id, "research not found");
            ServiceError::ResearchNotFound(id.to_string())
        })
    }

    fn template_for(&self, research: &Research) -> Result<Template, ServiceError> {
        let missing = || ServiceError::TemplateNotFound(research.template.clone());
        let key = TemplateKey::new(research.template.as_str()).map_err(|_| missing())?;
        self.templates.get_template(&key).ok_or_else(|| {
            tracing::error!(research_id = %research.id, template = %research.template, "template not found");
            missing()
        })
    }

    fn resolve_status(
        &self,
        template: &Template,
        entry_type: &str,
        input: &str,
    ) -> Result<String, ServiceError> {
        self.templates
            .resolve_status_value(template, entry_type, input)
            .ok_or_else(|| {
                ServiceError::validation(format!(
                    "Status '{input}' not found for entry type '{entry_type}'"
                ))
            })
    }
}
