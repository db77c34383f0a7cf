//! # Spritestate CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file only invokes
//! `cli::run()` and handles process termination. Everything the CLI does goes through
//! [`spritestate::api::SpriteApi`] backed by a [`spritestate::channel::fs::FileChannel`], so a
//! shell session behaves like a browser tab whose address bar is the `hash` file in the state
//! directory.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/spritestate/cli/)                           │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Coloured terminal output (print.rs)                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (src/spritestate/api.rs)                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
