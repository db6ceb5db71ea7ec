//! Entity structs for all Almanac domain objects.
//!
//! Templates are loaded from one YAML file each, researches from a
//! `research.yaml` per research directory, and entries from markdown files with
//! YAML frontmatter. All entities are immutable values; updates produce a new
//! value through `with_*` constructors.

mod entry;
mod research;
mod template;

pub use entry::{Entry, EntryChanges};
pub use research::{Research, ResearchChanges};
pub use template::{Category, EntryType, Status, Template};

#[cfg(test)]
pub(crate) use template::fixtures;
