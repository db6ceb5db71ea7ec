//! Research lifecycle.

use std::sync::Arc;

use alm_core::entities::Research;
use alm_core::filters::ResearchFilters;
use alm_core::ids::{ResearchId, TemplateKey};
use alm_core::pagination::{Page, Pagination};
use alm_core::requests::{ResearchCreateRequest, ResearchUpdateRequest};
use alm_store::{ResearchRepository, StorageDriver};

use crate::error::ServiceError;
use crate::template::TemplateService;

#[derive(Clone)]
pub struct ResearchService {
    researches: Arc<dyn ResearchRepository>,
    templates: TemplateService,
    driver: Arc<dyn StorageDriver>,
}

impl ResearchService {
    #[must_use]
    pub fn new(
        researches: Arc<dyn ResearchRepository>,
        templates: TemplateService,
        driver: Arc<dyn StorageDriver>,
    ) -> Self {
        Self {
            researches,
            templates,
            driver,
        }
    }

    /// Create a research from a template.
    ///
    /// # Errors
    ///
    /// `Validation` for a bad request, `TemplateNotFound` for an unknown
    /// template, `Domain` if the research cannot be written.
    pub fn create(&self, request: &ResearchCreateRequest) -> Result<Research, ServiceError> {
        ServiceError::check(request.validate())?;
        tracing::info!(template = %request.template_id, title = %request.title, "creating research");

        let key = TemplateKey::new(request.template_id.as_str())?;
        let template = self
            .templates
            .get_template(&key)
            .ok_or_else(|| ServiceError::TemplateNotFound(request.template_id.clone()))?;

        let research = self
            .driver
            .create_research(request, &template)
            .map_err(|e| {
                tracing::error!(error = %e, template = %key, "failed to create research");
                ServiceError::domain("Failed to create research", e)
            })?;

        tracing::info!(research_id = %research.id, name = %research.name, "research created");
        Ok(research)
    }

    /// Apply `request` to an existing research. A request without changes
    /// returns the research as stored.
    ///
    /// # Errors
    ///
    /// `Validation`, `ResearchNotFound`, or `Domain` on a write failure.
    pub fn update(
        &self,
        id: &ResearchId,
        request: &ResearchUpdateRequest,
    ) -> Result<Research, ServiceError> {
        ServiceError::check(request.validate())?;
        let research = self.require(id)?;

        let updated = self
            .driver
            .update_research(&research, request)
            .map_err(|e| {
                tracing::error!(error = %e, research_id = %id, "failed to update research");
                ServiceError::domain("Failed to update research", e)
            })?;

        tracing::info!(research_id = %id, has_updates = request.has_updates(), "research updated");
        Ok(updated)
    }

    pub fn exists(&self, id: &ResearchId) -> bool {
        self.researches.exists(id)
    }

    pub fn get(&self, id: &ResearchId) -> Option<Research> {
        self.researches.find_by_id(id)
    }

    /// # Errors
    ///
    /// `Validation` if the filters are malformed.
    pub fn find_all(&self, filters: &ResearchFilters) -> Result<Vec<Research>, ServiceError> {
        ServiceError::check(filters.validate())?;
        let researches = self.researches.find_all(filters);
        tracing::info!(
            count = researches.len(),
            filtered = filters.has_filters(),
            "retrieved researches"
        );
        Ok(researches)
    }

    /// # Errors
    ///
    /// `Validation` if the filters or pagination are malformed.
    pub fn list(
        &self,
        filters: &ResearchFilters,
        pagination: &Pagination,
    ) -> Result<Page<Research>, ServiceError> {
        ServiceError::check(pagination.validate())?;
        Ok(pagination.paginate(self.find_all(filters)?))
    }

    /// Remove a research and its whole directory tree. `Ok(false)` if it
    /// does not exist.
    ///
    /// # Errors
    ///
    /// `Domain` if removal fails. Whatever was not yet removed stays on disk.
    pub fn delete(&self, id: &ResearchId) -> Result<bool, ServiceError> {
        if !self.researches.exists(id) {
            tracing::warn!(research_id = %id, "attempted to delete non-existent research");
            return Ok(false);
        }

        let deleted = self.driver.delete_research(id).map_err(|e| {
            tracing::error!(error = %e, research_id = %id, "failed to delete research");
            ServiceError::domain("Failed to delete research", e)
        })?;
        if deleted {
            tracing::info!(research_id = %id, "research deleted");
        }
        Ok(deleted)
    }

    /// Append one memory note and persist.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank note, `ResearchNotFound`, or `Domain`.
    pub fn add_memory(&self, id: &ResearchId, note: &str) -> Result<Research, ServiceError> {
        if note.trim().is_empty() {
            return Err(ServiceError::validation("Memory note cannot be empty"));
        }
        let research = self.require(id)?;
        let saved = self
            .researches
            .save(&research.with_added_memory(note))
            .map_err(|e| ServiceError::domain("Failed to add research memory", e))?;
        tracing::info!(research_id = %id, memory_count = saved.memory.len(), "memory added");
        Ok(saved)
    }

    fn require(&self, id: &ResearchId) -> Result<Research, ServiceError> {
        self.researches.find_by_id(id).ok_or_else(|| {
            tracing::error!(research_id = %id, "research not found");
            ServiceError::ResearchNotFound(id.to_string())
        })
    }
}
