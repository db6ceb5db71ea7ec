//! Entry and research filters.
//!
//! All set filters are AND-combined; an unset filter imposes no constraint.
//! Tag filters pass when the item carries ANY of the requested tags.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Entry, Research};

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn any_tag(have: &[String], wanted: Option<&Vec<String>>) -> bool {
    match wanted {
        Some(wanted) if !wanted.is_empty() => wanted.iter().any(|t| have.contains(t)),
        _ => true,
    }
}

fn validate_tags(tags: Option<&Vec<String>>, errors: &mut Vec<String>) {
    if let Some(tags) = tags {
        if tags.is_empty() {
            errors.push("Tags array cannot be empty when provided".to_string());
        } else if tags.iter().any(|t| t.trim().is_empty()) {
            errors.push("All tags must be non-empty strings".to_string());
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EntryFilters {
    pub category: Option<String>,
    pub entry_type: Option<String>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub title_contains: Option<String>,
    pub description_contains: Option<String>,
    pub content_contains: Option<String>,
}

impl EntryFilters {
    #[must_use]
    pub fn has_filters(&self) -> bool {
        self.category.is_some()
            || self.entry_type.is_some()
            || self.status.is_some()
            || self.tags.as_ref().is_some_and(|t| !t.is_empty())
            || self.title_contains.is_some()
            || self.description_contains.is_some()
            || self.content_contains.is_some()
    }

    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        validate_tags(self.tags.as_ref(), &mut errors);
        for (field, value) in [
            ("title_contains", &self.title_contains),
            ("description_contains", &self.description_contains),
            ("content_contains", &self.content_contains),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                errors.push(format!("{field} filter cannot be empty when provided"));
            }
        }
        errors
    }

    #[must_use]
    pub fn matches(&self, entry: &Entry) -> bool {
        self.category.as_ref().is_none_or(|c| *c == entry.category)
            && self.entry_type.as_ref().is_none_or(|t| *t == entry.entry_type)
            && self.status.as_ref().is_none_or(|s| *s == entry.status)
            && any_tag(&entry.tags, self.tags.as_ref())
            && self
                .title_contains
                .as_ref()
                .is_none_or(|q| contains_ci(&entry.title, q))
            && self
                .description_contains
                .as_ref()
                .is_none_or(|q| contains_ci(&entry.description, q))
            && self
                .content_contains
                .as_ref()
                .is_none_or(|q| contains_ci(&entry.content, q))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResearchFilters {
    pub status: Option<String>,
    pub template: Option<String>,
    pub tags: Option<Vec<String>>,
    pub name_contains: Option<String>,
}

impl ResearchFilters {
    #[must_use]
    pub fn has_filters(&self) -> bool {
        self.status.is_some()
            || self.template.is_some()
            || self.tags.as_ref().is_some_and(|t| !t.is_empty())
            || self.name_contains.is_some()
    }

    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        validate_tags(self.tags.as_ref(), &mut errors);
        if self
            .name_contains
            .as_deref()
            .is_some_and(|v| v.trim().is_empty())
        {
            errors.push("Name filter cannot be empty when provided".to_string());
        }
        errors
    }

    #[must_use]
    pub fn matches(&self, research: &Research) -> bool {
        self.status.as_ref().is_none_or(|s| *s == research.status)
            && self.template.as_ref().is_none_or(|t| *t == research.template)
            && any_tag(&research.tags, self.tags.as_ref())
            && self
                .name_contains
                .as_ref()
                .is_none_or(|q| contains_ci(&research.name, q))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    fn entry(tags: &[&str]) -> Entry {
        Entry {
            entry_id: "entry_1".into(),
            title: "Async Runtimes".into(),
            description: "Tokio versus smol".into(),
            entry_type: "article".into(),
            category: "posts".into(),
            status: "draft".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            content: "Body mentioning Executors".into(),
            file_path: None,
        }
    }

    #[rstest]
    #[case(&["x"], true)]
    #[case(&["x", "y"], true)]
    #[case(&["y", "z"], false)]
    #[case(&[], false)]
    fn tag_filter_matches_any(#[case] tags: &[&str], #[case] expected: bool) {
        let filters = EntryFilters {
            tags: Some(vec!["x".into()]),
            ..Default::default()
        };
        assert_eq!(filters.matches(&entry(tags)), expected);
    }

    #[test]
    fn text_filters_are_case_insensitive() {
        let filters = EntryFilters {
            title_contains: Some("runtimes".into()),
            description_contains: Some("TOKIO".into()),
            content_contains: Some("executors".into()),
            ..Default::default()
        };
        assert!(filters.matches(&entry(&[])));
    }

    #[test]
    fn filters_are_and_combined() {
        let filters = EntryFilters {
            category: Some("posts".into()),
            status: Some("published".into()),
            ..Default::default()
        };
        assert!(!filters.matches(&entry(&[])));
        assert!(EntryFilters::default().matches(&entry(&[])));
        assert!(!EntryFilters::default().has_filters());
    }

    #[test]
    fn entry_filter_validation() {
        let filters = EntryFilters {
            tags: Some(vec![]),
            content_contains: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(
            filters.validate(),
            vec![
                "Tags array cannot be empty when provided",
                "content_contains filter cannot be empty when provided",
            ]
        );
    }

    #[test]
    fn research_name_filter_is_case_insensitive() {
        let research = Research {
            id: "r".into(),
            name: "Rust Async".into(),
            description: String::new(),
            template: "blog".into(),
            status: "draft".into(),
            tags: vec!["rust".into()],
            entry_dirs: vec![],
            memory: vec![],
            path: None,
        };
        let filters = ResearchFilters {
            name_contains: Some("async".into()),
            template: Some("blog".into()),
            tags: Some(vec!["go".into(), "rust".into()]),
            ..Default::default()
        };
        assert!(filters.matches(&research));

        let filters = ResearchFilters {
            status: Some("active".into()),
            ..Default::default()
        };
        assert!(!filters.matches(&research));
    }
}
