//! # Hash Channel
//!
//! The channel is wherever the encoded selection string lives between sessions: the address
//! bar in a browser, a file for the CLI, a plain string in tests. The [`HashChannel`] trait
//! gives the rest of the crate get/set access without knowing which.
//!
//! ## Semantics
//!
//! Channels behave like a URL fragment:
//! - `set("a=1")` stores `#a=1`; `set("")` stores the empty string.
//! - `get()` returns what is stored, including the leading `#`.
//!
//! ## Implementations
//!
//! - [`memory::MemoryChannel`]: in-process string, counts writes. Used by tests and embedders.
//! - [`fs::FileChannel`]: a single file holding the fragment. Used by the CLI.

use crate::error::Result;

pub mod fs;
pub mod memory;

pub trait HashChannel {
    /// Current fragment, including its leading `#` (empty when unset).
    fn get(&self) -> Result<String>;

    /// Replace the fragment. `params` is the encoded string without `#`.
    fn set(&mut self, params: &str) -> Result<()>;
}

/// Stored form of `params`: prefixed with `#` unless empty.
pub(crate) fn as_fragment(params: &str) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("#{}", params.strip_prefix('#').unwrap_or(params))
    }
}
