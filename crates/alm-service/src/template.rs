//! Template lookup and display-name resolution.

use std::sync::Arc;

use alm_core::entities::Template;
use alm_core::ids::TemplateKey;
use alm_core::resolve;
use alm_store::TemplateRepository;

/// Read access to templates plus the resolution engine, with logging.
#[derive(Clone)]
pub struct TemplateService {
    repo: Arc<dyn TemplateRepository>,
}

impl TemplateService {
    #[must_use]
    pub fn new(repo: Arc<dyn TemplateRepository>) -> Self {
        Self { repo }
    }

    pub fn find_all(&self) -> Vec<Template> {
        let templates = self.repo.find_all();
        tracing::info!(count = templates.len(), "retrieved templates");
        templates
    }

    pub fn get_template(&self, key: &TemplateKey) -> Option<Template> {
        let template = self.repo.find_by_key(key);
        if template.is_none() {
            tracing::warn!(template = %key, "template not found");
        }
        template
    }

    pub fn template_exists(&self, key: &TemplateKey) -> bool {
        self.repo.exists(key)
    }

    /// Canonical category name for a name or display name.
    pub fn resolve_category_key(&self, template: &Template, input: &str) -> Option<String> {
        let resolved = resolve::resolve_category_key(template, input);
        match resolved {
            Some(key) => tracing::debug!(template = %template.key, input, key, "resolved category"),
            None => tracing::warn!(
                template = %template.key,
                input,
                available = ?template.category_names(),
                "could not resolve category"
            ),
        }
        resolved.map(str::to_string)
    }

    /// Canonical entry type key for a key or display name.
    pub fn resolve_entry_type_key(&self, template: &Template, input: &str) -> Option<String> {
        let resolved = resolve::resolve_entry_type_key(template, input);
        match resolved {
            Some(key) => {
                tracing::debug!(template = %template.key, input, key, "resolved entry type");
            }
            None => {
                let available: Vec<&str> =
                    template.entry_types.iter().map(|t| t.key.as_str()).collect();
                tracing::warn!(
                    template = %template.key,
                    input,
                    ?available,
                    "could not resolve entry type"
                );
            }
        }
        resolved.map(str::to_string)
    }

    /// Canonical status value for a value or display name, scoped to one
    /// entry type.
    pub fn resolve_status_value(
        &self,
        template: &Template,
        entry_type_key: &str,
        input: &str,
    ) -> Option<String> {
        let resolved = resolve::resolve_status_value(template, entry_type_key, input);
        match resolved {
            Some(value) => tracing::debug!(
                template = %template.key,
                entry_type = entry_type_key,
                input,
                value,
                "resolved status"
            ),
            None => tracing::warn!(
                template = %template.key,
                entry_type = entry_type_key,
                input,
                available = ?self.available_statuses(template, entry_type_key),
                "could not resolve status"
            ),
        }
        resolved.map(str::to_string)
    }

    /// Status values of `entry_type_key`, empty if the entry type is unknown.
    pub fn available_statuses(&self, template: &Template, entry_type_key: &str) -> Vec<String> {
        template
            .entry_type(entry_type_key)
            .map(|t| t.statuses.iter().map(|s| s.value.clone()).collect())
            .unwrap_or_default()
    }

    pub fn refresh_templates(&self) {
        self.repo.refresh();
        tracing::info!("templates refreshed");
    }
}
