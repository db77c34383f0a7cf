use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::SpriteConfig;
use crate::error::Result;
use crate::state::SelectionStore;

/// Clear every selection and apply the default build. The body type is kept.
pub fn run(store: &mut SelectionStore, catalog: &Catalog, config: &SpriteConfig) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    store.clear();
    let applied = store.select_defaults(catalog, &config.default_selections);
    result.add_message(CmdMessage::success(format!(
        "Reset to defaults ({})",
        super::pluralize(applied, "item")
    )));

    Ok(result.with_state(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::memory::fixtures::SpriteFixture;
    use crate::model::BodyType;

    #[test]
    fn reset_replaces_selections_with_defaults() {
        let mut fx = SpriteFixture::new()
            .with_selected("wings_bat", None)
            .with_selected("body", Some("brown"));
        fx.store.set_body_type(BodyType::Child);

        run(&mut fx.store, &fx.catalog, &fx.config).unwrap();

        let groups: Vec<&str> = fx.store.selections().keys().map(String::as_str).collect();
        assert_eq!(groups, vec!["body", "heads", "expression"]);
        assert_eq!(fx.store.selections()["body"].variant, "light");
        assert_eq!(fx.store.body_type(), BodyType::Child);
    }
}
