//! # Data Sources
//!
//! The directory's record set comes from a [`DataSource`]. It is read once per
//! session; the core never writes back.
//!
//! ## Implementations
//!
//! - [`fs::FileSource`]: a JSON document on disk
//! - [`memory::InMemorySource`]: a fixed record list, for tests and embedding
//!
//! ## Accepted Shapes
//!
//! Whatever the source, raw JSON goes through [`normalize::parse_document`],
//! which accepts:
//!
//! ```text
//! [ {record}, ... ]                              flat list
//! { "ngos": [ {record}, ... ] }                  wrapped list
//! { "ngos": { "<region>": [ {record}, ... ] } }  keyed by region
//! ```
//!
//! plus an optional `"metadata": { "serviceTypes": [...] }` block. Records come
//! out in the canonical [`Record`](crate::model::Record) shape; unknown fields
//! are ignored and missing optional ones take empty defaults.
//!
//! When loading fails the caller decides what to show instead;
//! [`sample::sample_records`] is the built-in fallback.

use crate::error::Result;
use crate::model::Record;

pub mod fs;
pub mod memory;
pub mod normalize;
pub mod sample;

/// A normalized record set plus any vocabulary the source declared up front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceData {
    pub records: Vec<Record>,
    pub declared_services: Vec<String>,
}

impl SourceData {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records,
            declared_services: Vec::new(),
        }
    }
}

/// Provider of the initial record set.
pub trait DataSource {
    /// Reads and normalizes the full record set.
    fn load(&self) -> Result<SourceData>;

    /// Human readable origin, used in log lines and load reports.
    fn describe(&self) -> String;
}
