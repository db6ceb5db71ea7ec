use serde::{Deserialize, Serialize};

/// A lifecycle value scoped to one entry type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Status {
    pub value: String,
    pub display_name: String,
}

/// A content classification with its own status vocabulary.
///
/// `default_status` should name one of `statuses`, but this is only checked
/// when an entry is created, not when the template is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryType {
    pub key: String,
    pub display_name: String,
    pub content_type: String,
    pub default_status: String,
    pub statuses: Vec<Status>,
}

impl EntryType {
    #[must_use]
    pub fn status(&self, value: &str) -> Option<&Status> {
        self.statuses.iter().find(|s| s.value == value)
    }

    #[must_use]
    pub fn has_status(&self, value: &str) -> bool {
        self.status(value).is_some()
    }

    /// Internal status values in template order.
    #[must_use]
    pub fn status_values(&self) -> Vec<&str> {
        self.statuses.iter().map(|s| s.value.as_str()).collect()
    }
}

/// A grouping within a template that restricts which entry types may be used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Internal key.
    pub name: String,
    pub display_name: String,
    /// Keys of the entry types allowed in this category.
    pub entry_types: Vec<String>,
}

impl Category {
    #[must_use]
    pub fn allows_entry_type(&self, entry_type: &str) -> bool {
        self.entry_types.iter().any(|t| t == entry_type)
    }
}

/// A reusable schema of categories, entry types, and statuses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    pub key: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub categories: Vec<Category>,
    pub entry_types: Vec<EntryType>,
    pub prompt: Option<String>,
}

impl Template {
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn entry_type(&self, key: &str) -> Option<&EntryType> {
        self.entry_types.iter().find(|t| t.key == key)
    }

    #[must_use]
    pub fn has_category(&self, name: &str) -> bool {
        self.category(name).is_some()
    }

    #[must_use]
    pub fn has_entry_type(&self, key: &str) -> bool {
        self.entry_type(key).is_some()
    }

    /// Whether `entry_type` may be used in `category`.
    ///
    /// False when the category itself is unknown.
    #[must_use]
    pub fn validate_entry_in_category(&self, category: &str, entry_type: &str) -> bool {
        self.category(category)
            .is_some_and(|c| c.allows_entry_type(entry_type))
    }

    /// Category names in template order. Used as default entry directories.
    #[must_use]
    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }
}
