//! # ngodir Architecture
//!
//! ngodir is a **UI-agnostic directory query library**: a fixed set of
//! organization records, narrowed by free-text search and facet filters,
//! ordered by a sort key and cut into pages. The bundled CLI is one client of
//! it; a TUI or a web backend would drive the same API.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders cards, reads browse commands   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Loads the record set once, with a fallback               │
//! │  - One UserEvent → one FilterState mutation → recompute     │
//! │  - Debounces typed search text                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (directory.rs, state.rs, query/)                      │
//! │  - filter → sort → paginate, always from the full set       │
//! │  - Pure functions over Rust values, no I/O                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Source Layer (source/)                                     │
//! │  - Abstract DataSource trait                                │
//! │  - FileSource (production), InMemorySource (testing)        │
//! │  - Normalization of the accepted JSON shapes                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Views Are Derived
//!
//! A [`state::ViewResult`] is never edited in place. Every change to the
//! [`state::FilterState`] recomputes the view from the full record set, so
//! clearing a filter brings back records a previous filter removed, and the
//! same state always produces the same page.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`directory`]: Record set lifecycle and recompute
//! - [`state`]: Filter state, facet selections and view results
//! - [`query`]: Filter, sort, paginate and the category table
//! - [`source`]: Data sources and document normalization
//! - [`debounce`]: Trailing debounce for search text
//! - [`model`]: Core data types (`Record`, `Facet`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and rendering for the binary (not part of the lib API)

pub mod api;
pub mod config;
pub mod debounce;
pub mod directory;
pub mod error;
pub mod model;
pub mod query;
pub mod source;
pub mod state;
