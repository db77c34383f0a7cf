//! # Channel Listener
//!
//! Reacts to the channel being changed from outside (back/forward navigation, a pasted link,
//! a hand-edited hash file). Our own writes also trigger change events, so each event is
//! compared with the fragment the current state encodes to: if they are equal, the change was
//! ours and is ignored. Nothing else counts as ours; going back to an earlier fragment
//! always reloads. Anything else is decoded into the store, the defaults are applied if the
//! fragment selected nothing, and the caller is notified so it can re-render.
//!
//! Each event runs to completion before the next one is handled; the listener keeps no queue.

use crate::catalog::Catalog;
use crate::channel::{as_fragment, HashChannel};
use crate::codec;
use crate::config::DefaultSelection;
use crate::error::Result;
use crate::state::SelectionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEvent {
    /// The fragment is what the current state encodes to; nothing was done.
    Ignored,
    /// The fragment was decoded into the store.
    Reloaded { defaults_applied: bool },
}

#[derive(Debug, Default)]
pub struct ChannelListener {
    last_known: String,
}

impl ChannelListener {
    /// Start listening from the channel's current fragment.
    pub fn attach<C: HashChannel>(channel: &C) -> Result<Self> {
        Ok(Self {
            last_known: channel.get()?,
        })
    }

    /// The fragment most recently seen on or written to the channel.
    pub fn last_known(&self) -> &str {
        &self.last_known
    }

    /// Note a fragment we wrote ourselves.
    pub fn record(&mut self, fragment: impl Into<String>) {
        self.last_known = fragment.into();
    }

    /// The fragment a self-originated write of `store` would have produced.
    pub fn expected_hash(store: &SelectionStore, catalog: &Catalog) -> String {
        as_fragment(&codec::encode(store, catalog))
    }

    /// Handle one change event. `notify` runs only when the store was reloaded.
    pub fn on_change<C, F>(
        &mut self,
        channel: &mut C,
        store: &mut SelectionStore,
        catalog: &Catalog,
        defaults: &[DefaultSelection],
        notify: F,
    ) -> Result<ChannelEvent>
    where
        C: HashChannel,
        F: FnOnce(&SelectionStore),
    {
        let current = channel.get()?;

        if current == Self::expected_hash(store, catalog) {
            self.last_known = current;
            return Ok(ChannelEvent::Ignored);
        }

        tracing::debug!(hash = %current, "External hash change, reloading selections");
        codec::load_from_channel(channel, store, catalog)?;

        let defaults_applied = store.is_empty();
        if defaults_applied {
            store.select_defaults(catalog, defaults);
            codec::sync_to_channel(channel, store, catalog)?;
        }

        notify(store);
        self.last_known = channel.get()?;
        Ok(ChannelEvent::Reloaded { defaults_applied })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::memory::fixtures::SpriteFixture;
    use crate::model::BodyType;

    #[test]
    fn own_write_is_ignored() {
        let mut fx = SpriteFixture::new().with_selected("body", Some("olive"));
        codec::sync_to_channel(&mut fx.channel, &fx.store, &fx.catalog).unwrap();
        let mut listener = ChannelListener::default();

        let mut notified = false;
        let event = listener
            .on_change(
                &mut fx.channel,
                &mut fx.store,
                &fx.catalog,
                &fx.config.default_selections,
                |_| notified = true,
            )
            .unwrap();

        assert_eq!(event, ChannelEvent::Ignored);
        assert!(!notified);
        assert_eq!(listener.last_known(), "#sex=male&body=Body_color_olive");
    }

    #[test]
    fn external_change_reloads_and_notifies() {
        let mut fx = SpriteFixture::new().with_selected("body", Some("olive"));
        let mut listener = ChannelListener::attach(&fx.channel).unwrap();
        fx.channel.navigate("#sex=female&hat=Tiara_tiara_gold");
        fx.channel.reset_writes();

        let mut seen = None;
        let event = listener
            .on_change(
                &mut fx.channel,
                &mut fx.store,
                &fx.catalog,
                &fx.config.default_selections,
                |store| seen = Some(store.selections().len()),
            )
            .unwrap();

        assert_eq!(
            event,
            ChannelEvent::Reloaded {
                defaults_applied: false
            }
        );
        assert_eq!(seen, Some(1));
        assert_eq!(fx.store.body_type(), BodyType::Female);
        assert_eq!(fx.store.selections()["hat"].variant, "tiara_gold");
        assert_eq!(fx.channel.writes(), 1);
        assert_eq!(listener.last_known(), "#sex=female&hat=Tiara_tiara_gold");
    }

    #[test]
    fn empty_result_falls_back_to_defaults() {
        let mut fx = SpriteFixture::new().with_selected("tiara", None);
        let mut listener = ChannelListener::attach(&fx.channel).unwrap();
        fx.channel.navigate("#hat=Crown_gold");

        let event = listener
            .on_change(
                &mut fx.channel,
                &mut fx.store,
                &fx.catalog,
                &fx.config.default_selections,
                |_| {},
            )
            .unwrap();

        assert_eq!(
            event,
            ChannelEvent::Reloaded {
                defaults_applied: true
            }
        );
        let groups: Vec<&str> = fx.store.selections().keys().map(String::as_str).collect();
        assert_eq!(groups, vec!["body", "heads", "expression"]);
        assert_eq!(
            fx.channel.get().unwrap(),
            "#sex=male&body=Body_color_light&heads=Human_male_light&expression=Neutral_light"
        );
    }

    #[test]
    fn fragment_matching_state_is_ignored() {
        let mut fx = SpriteFixture::new().with_hash("#hat=Tiara_tiara_silver");
        codec::load_from_channel(&mut fx.channel, &mut fx.store, &fx.catalog).unwrap();
        let mut listener = ChannelListener::attach(&fx.channel).unwrap();
        fx.channel.reset_writes();

        let event = listener
            .on_change(
                &mut fx.channel,
                &mut fx.store,
                &fx.catalog,
                &fx.config.default_selections,
                |_| {},
            )
            .unwrap();
        assert_eq!(event, ChannelEvent::Ignored);
        assert_eq!(fx.store.selections()["hat"].variant, "tiara_silver");
        assert_eq!(fx.channel.writes(), 0);
    }

    #[test]
    fn stale_attach_fragment_does_not_hide_external_change() {
        let mut fx = SpriteFixture::new().with_hash("#hat=Tiara_tiara_silver");
        let mut listener = ChannelListener::attach(&fx.channel).unwrap();

        let event = listener
            .on_change(
                &mut fx.channel,
                &mut fx.store,
                &fx.catalog,
                &fx.config.default_selections,
                |_| {},
            )
            .unwrap();
        assert_eq!(
            event,
            ChannelEvent::Reloaded {
                defaults_applied: false
            }
        );
        assert_eq!(fx.store.selections()["hat"].variant, "tiara_silver");
    }

    #[test]
    fn returning_to_an_earlier_fragment_reloads() {
        let mut fx = SpriteFixture::new().with_selected("tiara", None);
        codec::sync_to_channel(&mut fx.channel, &fx.store, &fx.catalog).unwrap();
        let earlier = fx.channel.get().unwrap();
        let mut listener = ChannelListener::attach(&fx.channel).unwrap();

        // The store moves on and writes the channel without the listener seeing it.
        fx.store.select_item(&fx.catalog, "waistband", None).unwrap();
        codec::sync_to_channel(&mut fx.channel, &fx.store, &fx.catalog).unwrap();
        listener.record(fx.channel.get().unwrap());

        fx.channel.navigate(&earlier);
        let mut notified = false;
        let event = listener
            .on_change(
                &mut fx.channel,
                &mut fx.store,
                &fx.catalog,
                &fx.config.default_selections,
                |_| notified = true,
            )
            .unwrap();

        assert_eq!(
            event,
            ChannelEvent::Reloaded {
                defaults_applied: false
            }
        );
        assert!(notified);
        assert!(!fx.store.selections().contains_key("sash"));
        assert_eq!(listener.last_known(), earlier);
    }
}
