use crate::config::SpriteConfig;
use crate::filters::FilterKind;
use crate::model::{BodyType, Selections};
use crate::state::SelectionStore;

pub mod body_type;
pub mod check;
pub mod deselect;
pub mod load;
pub mod prune;
pub mod reset;
pub mod select;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Filter verdicts for one catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCheck {
    pub item_id: String,
    pub known: bool,
    pub license_ok: bool,
    pub animation_ok: bool,
}

/// Selections failing one filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompatibleReport {
    pub kind: FilterKind,
    pub groups: Vec<String>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub selections: Option<Selections>,
    pub body_type: Option<BodyType>,
    pub hash: Option<String>,
    pub checks: Vec<ItemCheck>,
    pub incompatible: Vec<IncompatibleReport>,
    pub config: Option<SpriteConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    /// Attach a snapshot of the store.
    pub fn with_state(mut self, store: &SelectionStore) -> Self {
        self.selections = Some(store.selections().clone());
        self.body_type = Some(store.body_type());
        self
    }

    pub fn with_hash(mut self, hash: String) -> Self {
        self.hash = Some(hash);
        self
    }

    pub fn with_checks(mut self, checks: Vec<ItemCheck>) -> Self {
        self.checks = checks;
        self
    }

    pub fn with_config(mut self, config: SpriteConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// "1 item" / "3 items".
pub(crate) fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
