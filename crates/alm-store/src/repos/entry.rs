//! Entry repository: markdown files with YAML frontmatter under a research.
//!
//! There is no index. Lookups by id scan every `.md` file below the research
//! directory and compare the `entry_id` frontmatter field.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use alm_core::entities::Entry;
use alm_core::filters::EntryFilters;
use alm_core::ids::{EntryId, ResearchId};

use super::{EntryRepository, research_dir};
use crate::error::StoreError;
use crate::frontmatter;
use crate::helpers::{parse_datetime, read_file, slugify, write_file};
use crate::scanner::scan_entries;

const UNTITLED_SLUG: &str = "untitled";

/// Frontmatter fields in the order they are written.
#[derive(Debug, Default, Serialize, Deserialize)]
struct EntryFrontmatter {
    #[serde(default)]
    entry_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    entry_type: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

impl EntryFrontmatter {
    fn from_entry(entry: &Entry) -> Self {
        Self {
            entry_id: Some(entry.entry_id.clone()),
            title: Some(entry.title.clone()),
            description: Some(entry.description.clone()),
            entry_type: Some(entry.entry_type.clone()),
            category: Some(entry.category.clone()),
            status: Some(entry.status.clone()),
            created_at: Some(entry.created_at.to_rfc3339()),
            updated_at: Some(entry.updated_at.to_rfc3339()),
            tags: Some(entry.tags.clone()),
        }
    }

    fn into_entry(self, path: &Path, content: String) -> Result<Entry, StoreError> {
        // Presence is enough; a hand-edited empty value still loads.
        let required = |value: Option<String>, field: &str| {
            value.ok_or_else(|| StoreError::invalid(path, format!("missing '{field}' in frontmatter")))
        };
        let timestamp = |value: Option<String>, field: &str| -> Result<DateTime<Utc>, StoreError> {
            value.map_or_else(
                || Ok(Utc::now()),
                |raw| {
                    parse_datetime(&raw).map_err(|e| {
                        StoreError::invalid(path, format!("bad '{field}' timestamp '{raw}': {e}"))
                    })
                },
            )
        };

        Ok(Entry {
            entry_id: required(self.entry_id, "entry_id")?,
            title: required(self.title, "title")?,
            description: self.description.unwrap_or_default(),
            entry_type: required(self.entry_type, "entry_type")?,
            category: required(self.category, "category")?,
            status: required(self.status, "status")?,
            created_at: timestamp(self.created_at, "created_at")?,
            updated_at: timestamp(self.updated_at, "updated_at")?,
            tags: self.tags.unwrap_or_default(),
            content,
            file_path: Some(path.to_path_buf()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct FileEntryRepository {
    researches_dir: PathBuf,
}

impl FileEntryRepository {
    #[must_use]
    pub fn new(researches_dir: impl Into<PathBuf>) -> Self {
        Self {
            researches_dir: researches_dir.into(),
        }
    }

    /// Parse one entry file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be read, its frontmatter is
    /// malformed, or a required field is missing.
    pub fn load(path: &Path) -> Result<Entry, StoreError> {
        let content = read_file(path)?;
        let (map, body) = frontmatter::parse(&content)?;
        let fields: EntryFrontmatter =
            serde_yaml::from_value(Value::Mapping(map)).map_err(|e| StoreError::yaml(path, e))?;
        fields.into_entry(path, body)
    }

    fn research_path(&self, research_id: &ResearchId) -> Option<PathBuf> {
        research_dir(&self.researches_dir, research_id)
    }

    /// Path of the file whose frontmatter carries `entry_id`.
    fn find_entry_file(&self, research_id: &ResearchId, entry_id: &EntryId) -> Option<PathBuf> {
        let research_path = self.research_path(research_id)?;
        scan_entries(&research_path).into_iter().find(|path| {
            read_file(path)
                .and_then(|content| frontmatter::extract_frontmatter(&content))
                .is_ok_and(|map| {
                    map.get("entry_id")
                        .and_then(Value::as_str)
                        .is_some_and(|id| id == entry_id.as_str())
                })
        })
    }

    /// Target path for a new entry. Never an existing file.
    fn new_entry_path(research_path: &Path, entry: &Entry) -> PathBuf {
        let dir = research_path.join(&entry.category).join(&entry.entry_type);
        let mut slug = slugify(&entry.title);
        if slug.is_empty() {
            slug = UNTITLED_SLUG.to_string();
        }
        let candidate = dir.join(format!("{slug}.md"));
        if candidate.exists() {
            dir.join(format!("{slug}-{}.md", entry.entry_id))
        } else {
            candidate
        }
    }
}

impl EntryRepository for FileEntryRepository {
    fn find_by_research(&self, research_id: &ResearchId, filters: &EntryFilters) -> Vec<Entry> {
        let Some(research_path) = self.research_path(research_id) else {
            return Vec::new();
        };
        let paths = scan_entries(&research_path);
        let entries: Vec<Entry> = paths
            .iter()
            .filter_map(|path| match Self::load(path) {
                Ok(entry) => Some(entry),
                Err(error) => {
                    tracing::error!(%error, file = %path.display(), "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| filters.matches(entry))
            .collect();

        tracing::info!(
            research_id = %research_id,
            count = entries.len(),
            total_scanned = paths.len(),
            "found entries"
        );
        entries
    }

    fn find_by_id(&self, research_id: &ResearchId, entry_id: &EntryId) -> Option<Entry> {
        let path = self.find_entry_file(research_id, entry_id)?;
        match Self::load(&path) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::error!(%error, %entry_id, file = %path.display(), "failed to load entry");
                None
            }
        }
    }

    fn save(&self, research_id: &ResearchId, entry: &Entry) -> Result<Entry, StoreError> {
        let research_path = self.research_path(research_id).ok_or_else(|| {
            StoreError::invalid(&self.researches_dir, format!("invalid research id '{research_id}'"))
        })?;
        if !research_path.is_dir() {
            return Err(StoreError::ResearchDirMissing(research_path));
        }

        let path = match &entry.file_path {
            Some(existing) => existing.clone(),
            None => Self::new_entry_path(&research_path, entry),
        };

        let map: Mapping = match serde_yaml::to_value(EntryFrontmatter::from_entry(entry)) {
            Ok(Value::Mapping(map)) => map,
            Ok(_) => return Err(StoreError::Frontmatter("entry fields did not serialize to a mapping".into())),
            Err(e) => return Err(StoreError::yaml(&path, e)),
        };
        write_file(&path, &frontmatter::combine(&map, &entry.content)?)?;

        tracing::info!(
            research_id = %research_id,
            entry_id = %entry.entry_id,
            file = %path.display(),
            "saved entry"
        );
        Ok(entry.with_file_path(path))
    }

    fn delete(&self, research_id: &ResearchId, entry_id: &EntryId) -> Result<bool, StoreError> {
        let Some(path) = self.find_entry_file(research_id, entry_id) else {
            return Ok(false);
        };
        fs::remove_file(&path).map_err(|e| StoreError::io(&path, e))?;
        tracing::info!(research_id = %research_id, %entry_id, file = %path.display(), "deleted entry");
        Ok(true)
    }

    fn exists(&self, research_id: &ResearchId, entry_id: &EntryId) -> bool {
        self.find_entry_file(research_id, entry_id).is_some()
    }
}
