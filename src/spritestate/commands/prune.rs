use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filters::{FilterEngine, FilterKind, RemovalOutcome};
use crate::state::SelectionStore;

/// Remove every selection that fails the `kind` filter.
pub fn run(
    engine: &FilterEngine,
    catalog: &Catalog,
    store: &mut SelectionStore,
    kind: FilterKind,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match engine.remove_incompatible(kind, catalog, store) {
        RemovalOutcome::Removed(groups) => {
            result.add_message(CmdMessage::success(format!(
                "Removed {} incompatible item(s)",
                groups.len()
            )));
            for group in groups {
                result.add_message(CmdMessage::info(format!("  - {}", group)));
            }
        }
        RemovalOutcome::NothingToRemove => {
            result.add_message(CmdMessage::info("No incompatible items found"));
        }
    }

    Ok(result.with_state(store))
}
