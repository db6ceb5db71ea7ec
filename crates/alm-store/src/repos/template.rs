//! Template repository backed by one YAML file per template.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use alm_core::entities::{Category, EntryType, Status, Template};
use alm_core::ids::TemplateKey;

use super::TemplateRepository;
use crate::error::StoreError;
use crate::helpers::read_yaml_file;

fn default_content_type() -> String {
    "markdown".to_string()
}

fn default_status() -> String {
    "draft".to_string()
}

/// On-disk template layout. Entry types are a mapping keyed by entry type key.
#[derive(Debug, Deserialize)]
struct TemplateFile {
    key: String,
    name: String,
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    entry_types: Mapping,
    #[serde(default)]
    prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EntryTypeFile {
    display_name: String,
    #[serde(default = "default_content_type")]
    content_type: String,
    #[serde(default = "default_status")]
    default_status: String,
    #[serde(default)]
    statuses: Vec<Status>,
}

/// Reads `*.yaml` / `*.yml` files directly inside the templates directory.
///
/// Nothing is cached: every query re-reads the directory so hand edits are
/// visible immediately.
#[derive(Debug, Clone)]
pub struct FileTemplateRepository {
    templates_dir: PathBuf,
}

impl FileTemplateRepository {
    #[must_use]
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    #[must_use]
    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    fn template_files(&self) -> Vec<PathBuf> {
        let read_dir = match fs::read_dir(&self.templates_dir) {
            Ok(read_dir) => read_dir,
            Err(error) => {
                tracing::warn!(
                    %error,
                    path = %self.templates_dir.display(),
                    "templates directory not readable"
                );
                return Vec::new();
            }
        };

        let mut files: Vec<PathBuf> = read_dir
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(error) => {
                    tracing::warn!(
                        %error,
                        path = %self.templates_dir.display(),
                        "skipping unreadable templates directory entry"
                    );
                    None
                }
            })
            .filter(|path| path.is_file())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
            })
            .collect();
        files.sort();
        files
    }

    fn load_templates(&self) -> Vec<Template> {
        let files = self.template_files();
        let templates: Vec<Template> = files
            .iter()
            .filter_map(|path| match load_template(path) {
                Ok(template) => Some(template),
                Err(error) => {
                    tracing::error!(%error, file = %path.display(), "failed to load template");
                    None
                }
            })
            .collect();

        tracing::debug!(
            count = templates.len(),
            scanned = files.len(),
            path = %self.templates_dir.display(),
            "loaded templates from filesystem"
        );
        templates
    }
}

impl TemplateRepository for FileTemplateRepository {
    fn find_all(&self) -> Vec<Template> {
        self.load_templates()
    }

    fn find_by_key(&self, key: &TemplateKey) -> Option<Template> {
        self.load_templates()
            .into_iter()
            .find(|t| t.key == key.as_str())
    }

    fn refresh(&self) {
        tracing::debug!("template refresh requested; templates are never cached");
    }
}

fn load_template(path: &Path) -> Result<Template, StoreError> {
    let file: TemplateFile = read_yaml_file(path)?;

    let mut seen = HashSet::new();
    if let Some(dup) = file.categories.iter().find(|c| !seen.insert(c.name.as_str())) {
        return Err(StoreError::invalid(
            path,
            format!("duplicate category '{}'", dup.name),
        ));
    }

    let entry_types = file
        .entry_types
        .into_iter()
        .map(|(key, value)| entry_type_from_yaml(path, key, value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Template {
        key: file.key,
        name: file.name,
        description: file.description,
        tags: file.tags,
        categories: file.categories,
        entry_types,
        prompt: file.prompt,
    })
}

fn entry_type_from_yaml(path: &Path, key: Value, value: Value) -> Result<EntryType, StoreError> {
    let Value::String(key) = key else {
        return Err(StoreError::invalid(path, "entry type keys must be strings"));
    };
    let file: EntryTypeFile =
        serde_yaml::from_value(value).map_err(|e| StoreError::yaml(path, e))?;
    Ok(EntryType {
        key,
        display_name: file.display_name,
        content_type: file.content_type,
        default_status: file.default_status,
        statuses: file.statuses,
    })
}
