//! # ngodir
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/ngodir/cli/)                                │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + handlers (commands.rs, browse.rs)       │
//! │  - Terminal rendering (render.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Loads once, maps user events, debounces search           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Set `RUST_LOG` (or pass `--verbose`) to see what the pipeline is doing.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
