//! # alm-store
//!
//! File storage for Almanac state.
//!
//! Every research is a directory under the researches root holding a
//! `research.yaml` and any number of markdown entries with YAML frontmatter.
//! Templates are YAML files in a separate directory. Nothing is cached or
//! indexed: the filesystem is the source of truth and is re-read on every
//! query, so files edited by hand are picked up immediately.

pub mod driver;
pub mod error;
pub mod frontmatter;
pub mod helpers;
pub mod repos;
pub mod scanner;

mod test_support;

pub use driver::{FileStorageDriver, StorageDriver};
pub use error::StoreError;
pub use repos::{
    EntryRepository, FileEntryRepository, FileResearchRepository, FileTemplateRepository,
    ResearchRepository, TemplateRepository,
};
