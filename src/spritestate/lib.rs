//! # Spritestate Architecture
//!
//! Spritestate keeps a composite sprite character (body, head, hair, clothing, ...) in a URL
//! fragment, so a build can be shared or bookmarked with nothing stored server-side. It is a
//! **library that happens to have a CLI client**: the same core serves a browser front end, a
//! test harness, or the bundled `spritestate` binary.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, owns the exit code     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns catalog, config, filter engine, store, channel      │
//! │  - Writes the canonical hash after every mutation           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Select, deselect, reset, prune, check, load              │
//! │  - Operates on a SelectionStore passed in by reference      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (codec/, filters.rs, state.rs, listener.rs)           │
//! │  - Hash codec, compatibility filters, selection store       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Channel Layer (channel/)                                   │
//! │  - HashChannel trait                                        │
//! │  - FileChannel (CLI), MemoryChannel (testing)               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Selection groups
//!
//! Every catalog item belongs to one selection group, its `type_name`. A build holds at most
//! one selection per group, so choosing a new hairstyle replaces the old one.
//!
//! ## No I/O in the core
//!
//! From `api.rs` inward, code never prints and never exits. Diagnostics go through `tracing`;
//! results come back as [`api::CmdResult`] values.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Operations on the selection store
//! - [`codec`]: Hash encoding and the decode disambiguation search
//! - [`filters`]: License and animation compatibility
//! - [`state`]: The selection store
//! - [`listener`]: Reaction to external channel changes
//! - [`channel`]: Where the hash lives
//! - [`catalog`]: Read-only item metadata
//! - [`config`]: License/animation tables and defaults
//! - [`model`]: `Selection`, `Selections`, `BodyType`
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod channel;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod filters;
pub mod listener;
pub mod model;
pub mod state;
