//! Display-name to internal-key resolution against a template.
//!
//! API clients usually see display names ("Field Notes") while storage uses
//! internal keys ("notes"). Each resolver tries an exact internal-key match
//! across the whole list first, and only then a display-name match, so callers
//! that already pass keys always get them back unchanged.

use crate::entities::Template;

/// Resolve a category name or display name to the category's internal name.
#[must_use]
pub fn resolve_category_key<'t>(template: &'t Template, input: &str) -> Option<&'t str> {
    let categories = &template.categories;
    categories
        .iter()
        .find(|c| c.name == input)
        .or_else(|| categories.iter().find(|c| c.display_name == input))
        .map(|c| c.name.as_str())
}

/// Resolve an entry type key or display name to the entry type's key.
#[must_use]
pub fn resolve_entry_type_key<'t>(template: &'t Template, input: &str) -> Option<&'t str> {
    let entry_types = &template.entry_types;
    entry_types
        .iter()
        .find(|t| t.key == input)
        .or_else(|| entry_types.iter().find(|t| t.display_name == input))
        .map(|t| t.key.as_str())
}

/// Resolve a status value or display name within one entry type.
///
/// `entry_type_key` must be an internal key; `None` if it names no entry type.
#[must_use]
pub fn resolve_status_value<'t>(
    template: &'t Template,
    entry_type_key: &str,
    input: &str,
) -> Option<&'t str> {
    let statuses = &template.entry_type(entry_type_key)?.statuses;
    statuses
        .iter()
        .find(|s| s.value == input)
        .or_else(|| statuses.iter().find(|s| s.display_name == input))
        .map(|s| s.value.as_str())
}
