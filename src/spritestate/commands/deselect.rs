use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::state::SelectionStore;

pub fn run(store: &mut SelectionStore, groups: &[String]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for group in groups {
        match store.remove(group) {
            Some(selection) => result.add_message(CmdMessage::success(format!(
                "Removed {} ({})",
                selection.name, group
            ))),
            None => result.add_message(CmdMessage::info(format!(
                "Nothing selected in {}",
                group
            ))),
        }
    }

    Ok(result.with_state(store))
}
