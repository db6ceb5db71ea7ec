//! JSON projections returned to API clients.
//!
//! These rename domain fields to the keys clients expect: a research's `name`
//! is its `title`, its `template` is its `research_type`, and a template's
//! `key` is its `template_id`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Category, Entry, EntryType, Research, Template};

/// Descriptive research fields grouped under `metadata`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResearchMetadata {
    pub description: String,
    pub tags: Vec<String>,
    pub memory: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResearchView {
    pub research_id: String,
    pub title: String,
    pub status: String,
    pub research_type: String,
    pub metadata: ResearchMetadata,
}

impl From<&Research> for ResearchView {
    fn from(research: &Research) -> Self {
        Self {
            research_id: research.id.clone(),
            title: research.name.clone(),
            status: research.status.clone(),
            research_type: research.template.clone(),
            metadata: ResearchMetadata {
                description: research.description.clone(),
                tags: research.tags.clone(),
                memory: research.memory.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EntryView {
    pub entry_id: String,
    pub title: String,
    pub description: String,
    pub entry_type: String,
    pub category: String,
    pub status: String,
    pub tags: Vec<String>,
    /// Omitted from list summaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl EntryView {
    /// Full projection including the markdown body.
    #[must_use]
    pub fn full(entry: &Entry) -> Self {
        Self {
            content: Some(entry.content.clone()),
            ..Self::summary(entry)
        }
    }

    /// Projection without the markdown body.
    #[must_use]
    pub fn summary(entry: &Entry) -> Self {
        Self {
            entry_id: entry.entry_id.clone(),
            title: entry.title.clone(),
            description: entry.description.clone(),
            entry_type: entry.entry_type.clone(),
            category: entry.category.clone(),
            status: entry.status.clone(),
            tags: entry.tags.clone(),
            content: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CategoryView {
    pub name: String,
    pub display_name: String,
    pub allowed_entry_types: Vec<String>,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            display_name: category.display_name.clone(),
            allowed_entry_types: category.entry_types.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EntryTypeView {
    pub key: String,
    pub display_name: String,
    pub default_status: String,
    /// Internal status values in template order.
    pub statuses: Vec<String>,
}

impl From<&EntryType> for EntryTypeView {
    fn from(entry_type: &EntryType) -> Self {
        Self {
            key: entry_type.key.clone(),
            display_name: entry_type.display_name.clone(),
            default_status: entry_type.default_status.clone(),
            statuses: entry_type
                .statuses
                .iter()
                .map(|s| s.value.clone())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TemplateView {
    pub template_id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub categories: Vec<CategoryView>,
    pub entry_types: Vec<EntryTypeView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl From<&Template> for TemplateView {
    fn from(template: &Template) -> Self {
        Self {
            template_id: template.key.clone(),
            name: template.name.clone(),
            description: template.description.clone(),
            tags: template.tags.clone(),
            categories: template.categories.iter().map(CategoryView::from).collect(),
            entry_types: template.entry_types.iter().map(EntryTypeView::from).collect(),
            prompt: template.prompt.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::entities::fixtures::blog_template;

    #[test]
    fn template_view_renames_keys() {
        let view = TemplateView::from(&blog_template());
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["template_id"], "blog");
        assert_eq!(
            value["categories"][1],
            json!({
                "name": "notes",
                "display_name": "Field Notes",
                "allowed_entry_types": ["note", "article"],
            })
        );
        assert_eq!(value["entry_types"][0]["statuses"], json!(["draft", "published"]));
        assert!(value.get("prompt").is_none());
    }
}
