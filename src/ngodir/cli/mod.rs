//! # CLI Behavior
//!
//! This is **one possible UI client** for the directory, not the application itself.
//! Everything it shows comes from [`ngodir::api::DirectoryApi`].
//!
//! ## Naked Execution (`ngodir`)
//!
//! Running `ngodir` with no arguments lists the first page with default filters.
//!
//! ## Where Records Come From
//!
//! 1. `--data <FILE>`
//! 2. `data-file` in `config.json`
//! 3. The built-in sample directory
//!
//! A file that cannot be read or parsed is reported on stderr and the sample
//! directory is shown instead. The process still exits 0.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `browse`: Line commands for the interactive session
//! - `render`: Output formatting (cards, lists, colors)
//! - `setup`: Argument parsing via clap

mod browse;
mod commands;
mod render;
pub mod setup;

pub use commands::run;
