//! File and value helpers shared by the repositories.
//!
//! Every repository reads and writes YAML documents, creates directories on
//! demand, and stores timestamps as text. These helpers map `std::io` and
//! `serde_yaml` failures to `StoreError` with the offending path attached.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// Parse a stored timestamp as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and the plain
/// `"2026-02-09 14:30:00"` form found in hand-written files.
///
/// # Errors
///
/// Returns the chrono parse error if neither format matches.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|naive| naive.and_utc())
}

/// Lowercase `text`, keep ASCII letters, digits, spaces, and dashes, then
/// collapse runs of spaces and dashes into a single `-`.
///
/// Returns an empty string when nothing survives.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.to_ascii_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if c == '-' || c.is_whitespace() {
            pending_dash = true;
        }
    }
    slug
}

/// Create `path` and any missing parents.
///
/// # Errors
///
/// Returns `StoreError::Io` if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    if !path.is_dir() {
        fs::create_dir_all(path).map_err(|e| StoreError::io(path, e))?;
        tracing::debug!(path = %path.display(), "created directory");
    }
    Ok(())
}

/// Read a whole file as UTF-8.
///
/// # Errors
///
/// Returns `StoreError::Io` if the file cannot be read.
pub fn read_file(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|e| StoreError::io(path, e))
}

/// Write `contents` to `path`, creating parent directories first.
///
/// # Errors
///
/// Returns `StoreError::Io` if a directory or the file cannot be written.
pub fn write_file(path: &Path, contents: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).map_err(|e| StoreError::io(path, e))
}

/// Read and deserialize a YAML file.
///
/// # Errors
///
/// Returns `StoreError::Io` if the file cannot be read and `StoreError::Yaml`
/// if it does not deserialize into `T`.
pub fn read_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = read_file(path)?;
    serde_yaml::from_str(&content).map_err(|e| StoreError::yaml(path, e))
}

/// Serialize `value` as YAML and write it to `path`.
///
/// # Errors
///
/// Returns `StoreError::Yaml` if serialization fails and `StoreError::Io` if
/// the write fails.
pub fn write_yaml_file<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let yaml = serde_yaml::to_string(value).map_err(|e| StoreError::yaml(path, e))?;
    write_file(path, &yaml)?;
    tracing::debug!(path = %path.display(), "wrote YAML file");
    Ok(())
}
