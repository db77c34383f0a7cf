use crate::catalog::Catalog;
use crate::channel::HashChannel;
use crate::codec;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::SpriteConfig;
use crate::error::Result;
use crate::state::SelectionStore;

/// Initial load: read the channel into the store, falling back to the default build when the
/// channel selects nothing.
pub fn run<C: HashChannel>(
    channel: &mut C,
    store: &mut SelectionStore,
    catalog: &Catalog,
    config: &SpriteConfig,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    codec::load_from_channel(channel, store, catalog)?;
    if store.is_empty() {
        let applied = store.select_defaults(catalog, &config.default_selections);
        codec::sync_to_channel(channel, store, catalog)?;
        if applied > 0 {
            result.add_message(CmdMessage::info("Nothing selected, using the default character."));
        }
    }

    Ok(result.with_state(store))
}

/// Load an explicit fragment, e.g. a pasted share link, replacing the current build.
pub fn from_hash<C: HashChannel>(
    channel: &mut C,
    store: &mut SelectionStore,
    catalog: &Catalog,
    hash: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let requested = codec::parse_params(hash)
        .iter()
        .filter(|(k, v)| {
            k.as_str() != codec::SEX_KEY
                && k.as_str() != codec::BODY_TYPE_KEY
                && v.as_str() != codec::NONE_VALUE
        })
        .count();

    codec::apply(hash, catalog, store);
    let written = codec::sync_to_channel(channel, store, catalog)?;

    let dropped = requested.saturating_sub(store.selections().len());
    if dropped > 0 {
        result.add_message(CmdMessage::warning(format!(
            "Dropped {} with no catalog match.",
            super::pluralize(dropped, "value")
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Loaded {}.",
        super::pluralize(store.selections().len(), "selection")
    )));

    Ok(result.with_state(store).with_hash(written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::memory::fixtures::SpriteFixture;
    use crate::model::BodyType;

    #[test]
    fn empty_channel_gets_defaults() {
        let mut fx = SpriteFixture::new();
        let result = run(&mut fx.channel, &mut fx.store, &fx.catalog, &fx.config).unwrap();

        assert_eq!(result.selections.unwrap().len(), 3);
        assert_eq!(
            fx.channel.get().unwrap(),
            "#sex=male&body=Body_color_light&heads=Human_male_light&expression=Neutral_light"
        );
    }

    #[test]
    fn shared_link_is_loaded_and_normalized() {
        let mut fx = SpriteFixture::new().with_hash("#?bodyType=teen&hair=long_DARK_BROWN");
        let result = run(&mut fx.channel, &mut fx.store, &fx.catalog, &fx.config).unwrap();

        assert_eq!(result.body_type, Some(BodyType::Teen));
        assert_eq!(fx.store.selections()["hair"].name, "Long (dark_brown)");
        assert_eq!(fx.channel.get().unwrap(), "#sex=teen&hair=Long_dark_brown");
        assert_eq!(fx.channel.writes(), 1);
    }

    #[test]
    fn from_hash_reports_dropped_entries() {
        let mut fx = SpriteFixture::new().with_selected("body", None);
        let result = from_hash(
            &mut fx.channel,
            &mut fx.store,
            &fx.catalog,
            "hat=Crown_gold&sash=Waistband&cape=none",
        )
        .unwrap();

        assert_eq!(result.hash.as_deref(), Some("sex=male&sash=Waistband"));
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("Dropped 1 value")));
        assert!(!fx.store.selections().contains_key("body"));
    }
}
