//! Directory scanning for research directories and entry files.
//!
//! Uses the `ignore` crate's walker with every ignore-file filter disabled:
//! a `.gitignore` inside a research must not hide entries. Hidden files and
//! directories (`.git`, editor state) are skipped. Scan failures never
//! propagate; unreadable paths are logged and left out of the result.

use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};

/// Name of the per-research config file.
pub const RESEARCH_CONFIG_FILE: &str = "research.yaml";

/// Subdirectory names never reported as entry directories.
pub const RESERVED_DIRS: [&str; 5] = [".research", "resources", ".git", ".idea", "node_modules"];

const ENTRY_EXTENSION: &str = "md";

fn walker(root: &Path, max_depth: Option<usize>) -> ignore::Walk {
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.hidden(true);
    builder.max_depth(max_depth);
    builder.sort_by_file_name(|a, b| a.cmp(b));
    builder.build()
}

fn entries(root: &Path, max_depth: Option<usize>) -> impl Iterator<Item = DirEntry> {
    walker(root, max_depth).filter_map(move |result| match result {
        Ok(entry) => Some(entry),
        Err(error) => {
            tracing::warn!(%error, root = %root.display(), "skipping unreadable path during scan");
            None
        }
    })
}

fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_dir())
}

/// Immediate subdirectories of `root` that contain a `research.yaml`.
///
/// Empty if `root` is missing or not a directory.
#[must_use]
pub fn scan_researches(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }
    entries(root, Some(1))
        .filter(|entry| entry.depth() == 1 && is_dir(entry))
        .map(DirEntry::into_path)
        .filter(|path| path.join(RESEARCH_CONFIG_FILE).is_file())
        .collect()
}

/// Every `.md` file below `research_path`, at any depth.
///
/// Empty if `research_path` is missing or not a directory.
#[must_use]
pub fn scan_entries(research_path: &Path) -> Vec<PathBuf> {
    if !research_path.is_dir() {
        return Vec::new();
    }
    entries(research_path, None)
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(DirEntry::into_path)
        .filter(|path| path.extension().is_some_and(|ext| ext == ENTRY_EXTENSION))
        .collect()
}

/// Names of the immediate subdirectories of `research_path`, minus
/// [`RESERVED_DIRS`].
#[must_use]
pub fn entry_directories(research_path: &Path) -> Vec<String> {
    if !research_path.is_dir() {
        return Vec::new();
    }
    entries(research_path, Some(1))
        .filter(|entry| entry.depth() == 1 && is_dir(entry))
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| !RESERVED_DIRS.contains(&name.as_str()))
        .collect()
}
