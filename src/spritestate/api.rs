//! # API Facade
//!
//! `SpriteApi` is the single entry point for UI clients. It owns the catalog, configuration,
//! filter engine, selection store and channel, dispatches to the command layer, and writes the
//! canonical hash back to the channel after every mutation.
//!
//! The facade does no business logic of its own and never prints; results come back as
//! [`CmdResult`] values for the client to present.
//!
//! ## Generic Over HashChannel
//!
//! - Production CLI: `SpriteApi<FileChannel>`
//! - Tests and embedders: `SpriteApi<MemoryChannel>`

use crate::catalog::Catalog;
use crate::channel::HashChannel;
use crate::codec;
use crate::commands;
use crate::config::SpriteConfig;
use crate::error::Result;
use crate::filters::{Enablement, FilterEngine, FilterKind};
use crate::listener::{ChannelEvent, ChannelListener};
use crate::state::SelectionStore;

pub struct SpriteApi<C: HashChannel> {
    catalog: Catalog,
    config: SpriteConfig,
    engine: FilterEngine,
    store: SelectionStore,
    channel: C,
    listener: ChannelListener,
}

impl<C: HashChannel> SpriteApi<C> {
    pub fn new(catalog: Catalog, config: SpriteConfig, channel: C) -> Result<Self> {
        let engine = FilterEngine::from_config(&config);
        let store = SelectionStore::new(config.default_body_type);
        let listener = ChannelListener::attach(&channel)?;
        Ok(Self {
            catalog,
            config,
            engine,
            store,
            channel,
            listener,
        })
    }

    /// Swap in a differently configured engine (e.g. a custom base extractor).
    pub fn with_engine(mut self, engine: FilterEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Initial load from the channel, with defaults when it selects nothing.
    pub fn load(&mut self) -> Result<commands::CmdResult> {
        let result =
            commands::load::run(&mut self.channel, &mut self.store, &self.catalog, &self.config)?;
        self.listener = ChannelListener::attach(&self.channel)?;
        Ok(result)
    }

    /// Replace the build with the one described by `hash`.
    pub fn load_from(&mut self, hash: &str) -> Result<commands::CmdResult> {
        let result =
            commands::load::from_hash(&mut self.channel, &mut self.store, &self.catalog, hash)?;
        self.listener.record(self.channel.get()?);
        Ok(result)
    }

    pub fn encode(&self) -> String {
        codec::encode(&self.store, &self.catalog)
    }

    /// Write the canonical encoding of the current state to the channel.
    pub fn sync(&mut self) -> Result<String> {
        codec::sync_to_channel(&mut self.channel, &self.store, &self.catalog)
    }

    pub fn show(&self) -> commands::CmdResult {
        commands::CmdResult::default()
            .with_state(&self.store)
            .with_hash(self.encode())
    }

    pub fn select(&mut self, item_id: &str, variant: Option<&str>) -> Result<commands::CmdResult> {
        let result = commands::select::run(
            &mut self.store,
            &self.catalog,
            &self.config,
            item_id,
            variant,
        )?;
        self.finish(result)
    }

    pub fn deselect(&mut self, groups: &[String]) -> Result<commands::CmdResult> {
        let result = commands::deselect::run(&mut self.store, groups)?;
        self.finish(result)
    }

    pub fn set_body_type(&mut self, tag: &str) -> Result<commands::CmdResult> {
        let result = commands::body_type::run(&mut self.store, tag)?;
        self.finish(result)
    }

    pub fn reset(&mut self) -> Result<commands::CmdResult> {
        let result = commands::reset::run(&mut self.store, &self.catalog, &self.config)?;
        self.finish(result)
    }

    pub fn check_items<I: AsRef<str>>(&self, item_ids: &[I]) -> Result<commands::CmdResult> {
        commands::check::items(&self.engine, &self.catalog, item_ids)
    }

    pub fn incompatible(&self) -> Result<commands::CmdResult> {
        commands::check::selections(&self.engine, &self.catalog, &self.store)
    }

    pub fn remove_incompatible(&mut self, kind: FilterKind) -> Result<commands::CmdResult> {
        let result = commands::prune::run(&self.engine, &self.catalog, &mut self.store, kind)?;
        self.finish(result)
    }

    pub fn set_enabled_licenses<I, K>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.engine.enabled_licenses = Enablement::from_keys(keys);
    }

    pub fn set_enabled_animations<I, K>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.engine.enabled_animations = Enablement::from_keys(keys);
    }

    /// Handle a change event on the channel. `notify` runs when the store was reloaded.
    pub fn on_channel_change<F>(&mut self, notify: F) -> Result<ChannelEvent>
    where
        F: FnOnce(&SelectionStore),
    {
        self.listener.on_change(
            &mut self.channel,
            &mut self.store,
            &self.catalog,
            &self.config.default_selections,
            notify,
        )
    }

    pub fn config(&self) -> commands::CmdResult {
        commands::CmdResult::default().with_config(self.config.clone())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    fn finish(&mut self, result: commands::CmdResult) -> Result<commands::CmdResult> {
        let hash = self.sync()?;
        self.listener.record(self.channel.get()?);
        Ok(result.with_hash(hash))
    }
}

pub use crate::commands::{CmdMessage, CmdResult, IncompatibleReport, ItemCheck, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::memory::fixtures::SpriteFixture;
    use crate::channel::memory::MemoryChannel;
    use crate::model::BodyType;

    fn api(hash: &str) -> SpriteApi<MemoryChannel> {
        let fx = SpriteFixture::new().with_hash(hash);
        SpriteApi::new(fx.catalog, fx.config, fx.channel).unwrap()
    }

    #[test]
    fn mutations_write_the_channel() {
        let mut api = api("");
        api.load().unwrap();
        api.channel_mut().reset_writes();

        let result = api.select("tiara", Some("tiara_gold")).unwrap();
        assert_eq!(
            result.hash.as_deref(),
            Some("sex=male&body=Body_color_light&heads=Human_male_light&expression=Neutral_light&hat=Tiara_tiara_gold")
        );

        api.deselect(&["hat".to_string()]).unwrap();
        api.set_body_type("female").unwrap();
        assert_eq!(api.channel().writes(), 3);
        assert_eq!(api.store().body_type(), BodyType::Female);
        assert!(api.channel().get().unwrap().starts_with("#sex=female&body="));
    }

    #[test]
    fn read_only_calls_do_not_write() {
        let mut api = api("#hat=Tiara_tiara_silver");
        api.load().unwrap();
        api.channel_mut().reset_writes();

        api.show();
        api.incompatible().unwrap();
        api.check_items(&["tiara"]).unwrap();
        assert_eq!(api.channel().writes(), 0);
    }

    #[test]
    fn remove_incompatible_by_animation() {
        let mut api = api("#hat=Tiara_tiara_silver&sash=Waistband&wings=Bat_wings_black");
        api.load().unwrap();
        api.set_enabled_animations(["run"]);

        let result = api.remove_incompatible(FilterKind::Animation).unwrap();
        assert_eq!(result.messages[0].content, "Removed 2 incompatible item(s)");
        assert_eq!(result.hash.as_deref(), Some("sex=male&sash=Waistband"));
    }

    #[test]
    fn empty_license_enablement_rejects_credited_items() {
        let mut api = api("#sash=Waistband");
        api.load().unwrap();
        api.set_enabled_licenses(Vec::<String>::new());

        let result = api.check_items(&["waistband"]).unwrap();
        assert!(!result.checks[0].license_ok);
    }

    #[test]
    fn back_navigation_reloads_state() {
        let mut api = api("#hat=Tiara_tiara_silver");
        api.load().unwrap();
        api.select("waistband", None).unwrap();

        api.channel_mut().navigate("#sex=child&hat=Tiara_tiara_silver");
        let mut redraws = 0;
        let event = api.on_channel_change(|_| redraws += 1).unwrap();

        assert_eq!(
            event,
            ChannelEvent::Reloaded {
                defaults_applied: false
            }
        );
        assert_eq!(redraws, 1);
        assert_eq!(api.store().body_type(), BodyType::Child);
        assert!(!api.store().selections().contains_key("sash"));

        let event = api.on_channel_change(|_| redraws += 1).unwrap();
        assert_eq!(event, ChannelEvent::Ignored);
        assert_eq!(redraws, 1);
    }

    #[test]
    fn back_to_the_loaded_fragment_reloads_state() {
        let mut api = api("#hat=Tiara_tiara_silver");
        api.load().unwrap();
        let loaded = api.channel().get().unwrap();
        assert_eq!(loaded, "#sex=male&hat=Tiara_tiara_silver");

        api.select("waistband", None).unwrap();
        assert_eq!(
            api.listener.last_known(),
            "#sex=male&hat=Tiara_tiara_silver&sash=Waistband"
        );

        api.channel_mut().navigate(&loaded);
        let event = api.on_channel_change(|_| {}).unwrap();

        assert_eq!(
            event,
            ChannelEvent::Reloaded {
                defaults_applied: false
            }
        );
        assert!(!api.store().selections().contains_key("sash"));
        assert_eq!(api.channel().get().unwrap(), loaded);
    }

    #[test]
    fn own_mutation_event_is_ignored() {
        let mut api = api("");
        api.load().unwrap();
        api.select("tiara", None).unwrap();

        let mut redraws = 0;
        let event = api.on_channel_change(|_| redraws += 1).unwrap();
        assert_eq!(event, ChannelEvent::Ignored);
        assert_eq!(redraws, 0);
        assert!(api.store().selections().contains_key("hat"));
    }
}
