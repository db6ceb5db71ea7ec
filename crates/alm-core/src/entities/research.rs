use std::path::PathBuf;

/// A research project bound to one template.
///
/// `template` is a foreign key to `Template::key` and is not checked when the
/// research is loaded. `status` is a free-form string: templates define entry
/// statuses only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Research {
    /// Directory name under the researches root.
    pub id: String,
    pub name: String,
    pub description: String,
    pub template: String,
    pub status: String,
    pub tags: Vec<String>,
    /// Subdirectories created alongside `research.yaml`.
    pub entry_dirs: Vec<String>,
    /// Free-text notes kept for LLM context.
    pub memory: Vec<String>,
    /// Filesystem location, set once loaded or persisted.
    pub path: Option<PathBuf>,
}

/// Field overrides for [`Research::with_updates`]. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResearchChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub entry_dirs: Option<Vec<String>>,
    pub memory: Option<Vec<String>>,
}

impl Research {
    /// Copy this research, overriding the fields set in `changes`.
    #[must_use]
    pub fn with_updates(&self, changes: ResearchChanges) -> Self {
        Self {
            id: self.id.clone(),
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            description: changes
                .description
                .unwrap_or_else(|| self.description.clone()),
            template: self.template.clone(),
            status: changes.status.unwrap_or_else(|| self.status.clone()),
            tags: changes.tags.unwrap_or_else(|| self.tags.clone()),
            entry_dirs: changes.entry_dirs.unwrap_or_else(|| self.entry_dirs.clone()),
            memory: changes.memory.unwrap_or_else(|| self.memory.clone()),
            path: self.path.clone(),
        }
    }

    /// Copy this research with one more memory note appended.
    #[must_use]
    pub fn with_added_memory(&self, note: impl Into<String>) -> Self {
        let mut memory = self.memory.clone();
        memory.push(note.into());
        Self {
            memory,
            ..self.clone()
        }
    }

    /// Copy this research with its filesystem location set.
    #[must_use]
    pub fn with_path(&self, path: PathBuf) -> Self {
        Self {
            path: Some(path),
            ..self.clone()
        }
    }
}
