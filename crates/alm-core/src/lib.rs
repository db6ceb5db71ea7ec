//! # alm-core
//!
//! Core types, key resolution, and error types for Almanac.
//!
//! This crate provides the foundational types shared across all Almanac crates:
//! - Entity structs for templates, researches, and entries
//! - Id value objects (`ResearchId`, `EntryId`, `TemplateKey`)
//! - Display-name to internal-key resolution against a template
//! - Create/update request types with field validation
//! - Entry and research filters plus pagination
//! - JSON projections returned to API clients
//! - Cross-cutting error types

pub mod entities;
pub mod errors;
pub mod filters;
pub mod ids;
pub mod pagination;
pub mod requests;
pub mod resolve;
pub mod responses;
pub mod text;
