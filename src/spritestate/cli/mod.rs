//! # CLI Behavior
//!
//! This is **one possible UI client** for spritestate, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## State Directory
//!
//! Everything lives in one directory: `--dir`, else `$SPRITESTATE_HOME`, else the platform data
//! directory. It holds the `hash` file (the current build), `config.json`, and by default the
//! catalog `item-metadata.json`.
//!
//! ### Naked Execution (`spritestate`)
//!
//! Running `spritestate` with no arguments defaults to `spritestate show`.
//!
//! ### Every run starts with a load
//!
//! The stored fragment is decoded first, exactly like a page load, so a hand-edited `hash`
//! file is normalized on the next invocation. `decode` is the exception: it replaces the
//! build outright.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `print`: Output formatting (colors, tables, messages)
//! - `setup`: Argument parsing via clap

mod commands;
mod print;
pub mod setup;

pub use commands::run;
