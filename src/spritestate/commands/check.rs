use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult, IncompatibleReport, ItemCheck};
use crate::error::Result;
use crate::filters::{FilterEngine, FilterKind};
use crate::state::SelectionStore;

/// Filter verdicts for the given catalog items. Unknown ids pass both filters.
pub fn items<I: AsRef<str>>(engine: &FilterEngine, catalog: &Catalog, item_ids: &[I]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let checks: Vec<ItemCheck> = item_ids
        .iter()
        .map(|id| {
            let id = id.as_ref();
            ItemCheck {
                item_id: id.to_string(),
                known: catalog.get(id).is_some(),
                license_ok: engine.is_item_license_compatible(catalog, id),
                animation_ok: engine.is_item_animation_compatible(catalog, id),
            }
        })
        .collect();

    for check in checks.iter().filter(|c| !c.known) {
        result.add_message(CmdMessage::warning(format!(
            "{} is not in the catalog; assuming compatible",
            check.item_id
        )));
    }

    Ok(result.with_checks(checks))
}

/// Current selections that fail either filter, without removing them.
pub fn selections(engine: &FilterEngine, catalog: &Catalog, store: &SelectionStore) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for kind in [FilterKind::License, FilterKind::Animation] {
        let groups = engine.incompatible_groups(kind, catalog, store.selections());
        if groups.is_empty() {
            continue;
        }
        let verb = if groups.len() == 1 { "is" } else { "are" };
        result.add_message(CmdMessage::warning(format!(
            "{} {} incompatible with your current {} selection",
            super::pluralize(groups.len(), "selected item"),
            verb,
            kind
        )));
        result.incompatible.push(IncompatibleReport { kind, groups });
    }

    if result.incompatible.is_empty() {
        result.add_message(CmdMessage::info("All selected items are compatible"));
    }

    Ok(result.with_state(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::memory::fixtures::SpriteFixture;
    use crate::filters::Enablement;

    #[test]
    fn checks_report_both_filters() {
        let fx = SpriteFixture::new();
        let mut engine = fx.engine();
        engine.enabled_animations = Enablement::from_keys(["slash"]);

        let result = items(&engine, &fx.catalog, &["hair_long", "wings_bat", "ghost"]).unwrap();

        assert_eq!(
            result.checks[0],
            ItemCheck {
                item_id: "hair_long".into(),
                known: true,
                license_ok: true,
                animation_ok: true,
            }
        );
        assert!(!result.checks[1].license_ok);
        assert!(!result.checks[1].animation_ok);
        assert!(result.checks[2].license_ok && result.checks[2].animation_ok);
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn reports_incompatible_selections_per_filter() {
        let fx = SpriteFixture::new()
            .with_selected("body", None)
            .with_selected("wings_bat", None)
            .with_selected("tiara", None);
        let mut engine = fx.engine();
        engine.enabled_animations = Enablement::from_keys(["run"]);

        let result = selections(&engine, &fx.catalog, &fx.store).unwrap();

        assert_eq!(
            result.incompatible,
            vec![
                IncompatibleReport {
                    kind: FilterKind::License,
                    groups: vec!["wings".into()],
                },
                IncompatibleReport {
                    kind: FilterKind::Animation,
                    groups: vec!["wings".into(), "hat".into()],
                },
            ]
        );
        assert_eq!(
            result.messages[0].content,
            "1 selected item is incompatible with your current license selection"
        );
        assert_eq!(
            result.messages[1].content,
            "2 selected items are incompatible with your current animation selection"
        );
    }
}
