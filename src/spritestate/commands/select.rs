use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::SpriteConfig;
use crate::error::Result;
use crate::state::SelectionStore;

/// Select `item_id` into its group, replacing the previous choice there.
///
/// Picking a skin variant on a body-coloured part propagates it to the other body-coloured
/// parts when `match_body_color` is on.
pub fn run(
    store: &mut SelectionStore,
    catalog: &Catalog,
    config: &SpriteConfig,
    item_id: &str,
    variant: Option<&str>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let group = store.select_item(catalog, item_id, variant)?;
    let selection = store.selections()[group.as_str()].clone();
    result.add_message(CmdMessage::success(format!(
        "Selected {} ({})",
        selection.name, group
    )));

    let body_coloured = catalog
        .get(item_id)
        .is_some_and(|meta| meta.match_body_color);
    if config.match_body_color && body_coloured {
        let changed = store.apply_match_body_color(catalog, &selection.variant);
        if changed > 0 {
            result.add_message(CmdMessage::info(format!(
                "Matched body color on {}",
                super::pluralize(changed, "item")
            )));
        }
    }

    Ok(result.with_state(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::memory::fixtures::SpriteFixture;
    use crate::error::SpriteError;

    #[test]
    fn select_replaces_group_member() {
        let mut fx = SpriteFixture::new().with_selected("tiara", Some("tiara_gold"));
        run(&mut fx.store, &fx.catalog, &fx.config, "tiara", Some("tiara_silver")).unwrap();
        assert_eq!(fx.store.selections().len(), 1);
        assert_eq!(fx.store.selections()["hat"].name, "Tiara (tiara_silver)");
    }

    #[test]
    fn body_colour_propagates() {
        let mut fx = SpriteFixture::new()
            .with_selected("body", Some("light"))
            .with_selected("heads_human_male", Some("light"))
            .with_selected("hair_long", Some("blonde"));

        let result = run(&mut fx.store, &fx.catalog, &fx.config, "body", Some("olive")).unwrap();

        assert_eq!(fx.store.selections()["heads"].variant, "olive");
        assert_eq!(fx.store.selections()["hair"].variant, "blonde");
        assert!(result
            .messages
            .iter()
            .any(|m| m.content == "Matched body color on 1 item"));
    }

    #[test]
    fn body_colour_matching_can_be_disabled() {
        let mut fx = SpriteFixture::new().with_selected("heads_human_male", Some("light"));
        fx.config.match_body_color = false;
        run(&mut fx.store, &fx.catalog, &fx.config, "body", Some("brown")).unwrap();
        assert_eq!(fx.store.selections()["heads"].variant, "light");
    }

    #[test]
    fn unknown_variant_is_an_error() {
        let mut fx = SpriteFixture::new();
        let err = run(&mut fx.store, &fx.catalog, &fx.config, "body", Some("blue")).unwrap_err();
        assert!(matches!(err, SpriteError::UnknownVariant { .. }));
        assert!(fx.store.is_empty());
    }
}
