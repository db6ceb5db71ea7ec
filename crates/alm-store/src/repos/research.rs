//! Research repository: one directory per research with a `research.yaml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use alm_core::entities::Research;
use alm_core::filters::ResearchFilters;
use alm_core::ids::ResearchId;
use alm_core::requests::is_plain_dir_name;

use super::{ResearchRepository, research_dir};
use crate::error::StoreError;
use crate::helpers::{ensure_dir, read_yaml_file, write_yaml_file};
use crate::scanner::{RESEARCH_CONFIG_FILE, scan_researches};

const DEFAULT_STATUS: &str = "draft";

/// `research.yaml` layout. Every field is optional on read.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ResearchFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    template: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    memory: Option<Vec<String>>,
    #[serde(default)]
    entries: Option<EntriesSection>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct EntriesSection {
    #[serde(default)]
    dirs: Option<Vec<String>>,
}

impl ResearchFile {
    fn into_research(self, id: String, path: PathBuf) -> Research {
        Research {
            name: self.name.unwrap_or_else(|| id.clone()),
            description: self.description.unwrap_or_default(),
            template: self.template.unwrap_or_default(),
            status: self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            tags: self.tags.unwrap_or_default(),
            entry_dirs: self.entries.and_then(|e| e.dirs).unwrap_or_default(),
            memory: self.memory.unwrap_or_default(),
            path: Some(path),
            id,
        }
    }

    fn from_research(research: &Research) -> Self {
        Self {
            name: Some(research.name.clone()),
            description: Some(research.description.clone()),
            template: Some(research.template.clone()),
            status: Some(research.status.clone()),
            tags: Some(research.tags.clone()),
            memory: Some(research.memory.clone()),
            entries: Some(EntriesSection {
                dirs: Some(research.entry_dirs.clone()),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileResearchRepository {
    researches_dir: PathBuf,
}

impl FileResearchRepository {
    #[must_use]
    pub fn new(researches_dir: impl Into<PathBuf>) -> Self {
        Self {
            researches_dir: researches_dir.into(),
        }
    }

    #[must_use]
    pub fn researches_dir(&self) -> &Path {
        &self.researches_dir
    }

    fn load(path: &Path) -> Result<Research, StoreError> {
        let id = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| StoreError::invalid(path, "research directory name is not UTF-8"))?
            .to_string();
        let file: ResearchFile = read_yaml_file(&path.join(RESEARCH_CONFIG_FILE))?;
        Ok(file.into_research(id, path.to_path_buf()))
    }
}

impl ResearchRepository for FileResearchRepository {
    fn find_all(&self, filters: &ResearchFilters) -> Vec<Research> {
        let paths = scan_researches(&self.researches_dir);
        let researches: Vec<Research> = paths
            .iter()
            .filter_map(|path| match Self::load(path) {
                Ok(research) => Some(research),
                Err(error) => {
                    tracing::error!(%error, path = %path.display(), "failed to load research");
                    None
                }
            })
            .filter(|research| filters.matches(research))
            .collect();

        tracing::debug!(
            count = researches.len(),
            scanned = paths.len(),
            "loaded researches"
        );
        researches
    }

    fn find_by_id(&self, id: &ResearchId) -> Option<Research> {
        let path = research_dir(&self.researches_dir, id)?;
        if !path.is_dir() {
            return None;
        }
        match Self::load(&path) {
            Ok(research) => Some(research),
            Err(error) => {
                tracing::error!(%error, research_id = %id, "failed to load research by id");
                None
            }
        }
    }

    fn save(&self, research: &Research) -> Result<Research, StoreError> {
        let id = ResearchId::new(research.id.as_str())
            .map_err(|e| StoreError::invalid(&self.researches_dir, e.to_string()))?;
        let path = research_dir(&self.researches_dir, &id).ok_or_else(|| {
            StoreError::invalid(&self.researches_dir, format!("invalid research id '{id}'"))
        })?;

        if let Some(bad) = research.entry_dirs.iter().find(|d| !is_plain_dir_name(d)) {
            return Err(StoreError::invalid(
                &path,
                format!("entry directory '{bad}' is not a plain directory name"),
            ));
        }

        ensure_dir(&path)?;
        for dir in &research.entry_dirs {
            ensure_dir(&path.join(dir))?;
        }
        write_yaml_file(
            &path.join(RESEARCH_CONFIG_FILE),
            &ResearchFile::from_research(research),
        )?;

        tracing::info!(research_id = %id, name = %research.name, path = %path.display(), "saved research");
        Ok(research.with_path(path))
    }

    fn delete(&self, id: &ResearchId) -> Result<bool, StoreError> {
        let Some(path) = research_dir(&self.researches_dir, id) else {
            return Ok(false);
        };
        if !path.exists() {
            return Ok(false);
        }

        fs::remove_dir_all(&path).map_err(|e| StoreError::io(&path, e))?;
        tracing::info!(research_id = %id, path = %path.display(), "deleted research");
        Ok(true)
    }

    fn exists(&self, id: &ResearchId) -> bool {
        research_dir(&self.researches_dir, id)
            .is_some_and(|path| path.join(RESEARCH_CONFIG_FILE).is_file())
    }
}
