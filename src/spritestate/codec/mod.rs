//! # Hash Codec
//!
//! Maps a [`SelectionStore`] to a URL fragment and back.
//!
//! ## Wire format
//!
//! ```text
//! #sex=female&body=Body_color_light&hair=Long_straight_blonde&sash=Waistband
//! ```
//!
//! - `sex` carries the body type and is always written first. `bodyType` is accepted on
//!   decode and wins over `sex` when both are present.
//! - Every other key is a selection group (the item's `type_name`). The value is the item
//!   name with spaces turned into underscores, followed by `_variant` when one is selected.
//! - `none` as a value means "nothing selected" and is skipped.
//!
//! Encoding loses the item id, so decoding has to search the catalog for it; see
//! [`disambiguate`].
//!
//! ## Normalization
//!
//! Loading from a channel always writes the canonical encoding back. A fragment that used a
//! legacy form, an unknown item, or odd casing is replaced by what the current state encodes to.

pub mod disambiguate;
pub mod params;

use crate::catalog::Catalog;
use crate::channel::HashChannel;
use crate::error::Result;
use crate::model::{display_name, BodyType, Selection, Selections};
use crate::state::SelectionStore;

pub use disambiguate::{disambiguate, Match};
pub use params::{format_params, parse_params, Params};

/// Legacy key for the body type, kept so old share links keep working.
pub const SEX_KEY: &str = "sex";
pub const BODY_TYPE_KEY: &str = "bodyType";
pub const NONE_VALUE: &str = "none";

/// Result of decoding a fragment, before it is applied to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub selections: Selections,
    /// `None` when the fragment carries no usable body type.
    pub body_type: Option<BodyType>,
}

/// Params for the current state: `sex` first, then one entry per selection.
///
/// Selections whose item is missing from the catalog, or has no `type_name`, are skipped.
pub fn encode_params(store: &SelectionStore, catalog: &Catalog) -> Params {
    let mut params = Params::new();
    params.insert(SEX_KEY.to_string(), store.body_type().to_string());

    for (group, selection) in store.selections() {
        let Some(meta) = catalog.get(&selection.item_id) else {
            tracing::debug!(%group, item = %selection.item_id, "Not encoding selection missing from catalog");
            continue;
        };
        let Some(type_name) = &meta.type_name else {
            continue;
        };

        let mut value = meta.hash_name();
        if !selection.variant.is_empty() {
            value.push('_');
            value.push_str(&selection.variant);
        }
        params.insert(type_name.clone(), value);
    }

    params
}

/// Wire string for the current state, without the leading `#`.
pub fn encode(store: &SelectionStore, catalog: &Catalog) -> String {
    format_params(&encode_params(store, catalog))
}

/// Resolve parsed params against the catalog. Unresolvable entries are dropped.
pub fn decode_params(params: &Params, catalog: &Catalog) -> Decoded {
    let mut selections = Selections::new();
    let mut from_sex = None;
    let mut from_body_type = None;

    for (type_name, raw) in params {
        if type_name == SEX_KEY || type_name == BODY_TYPE_KEY {
            match raw.parse::<BodyType>() {
                Ok(bt) if type_name == SEX_KEY => from_sex = Some(bt),
                Ok(bt) => from_body_type = Some(bt),
                Err(_) => tracing::warn!(key = %type_name, value = %raw, "Ignoring unknown body type"),
            }
            continue;
        }

        if raw == NONE_VALUE {
            continue;
        }

        let candidates = catalog.group(type_name);
        let Some(found) = disambiguate(type_name, raw, &candidates) else {
            tracing::warn!(%type_name, value = %raw, "No catalog item matches hash entry");
            continue;
        };

        let matched = found.variant.unwrap_or_default();
        let variant = match found.variant {
            Some(v) => v.to_string(),
            None => found.meta.variants.first().cloned().unwrap_or_default(),
        };
        selections.insert(
            type_name.clone(),
            Selection {
                item_id: found.item_id.to_string(),
                variant,
                name: display_name(&found.meta.name, matched),
            },
        );
    }

    Decoded {
        selections,
        body_type: from_body_type.or(from_sex),
    }
}

pub fn decode(raw: &str, catalog: &Catalog) -> Decoded {
    decode_params(&parse_params(raw), catalog)
}

/// Decode `raw` and apply it to `store` in one assignment. The body type is left alone when
/// the fragment does not set one.
pub fn apply(raw: &str, catalog: &Catalog, store: &mut SelectionStore) {
    let decoded = decode(raw, catalog);
    store.replace(decoded.selections);
    if let Some(bt) = decoded.body_type {
        store.set_body_type(bt);
    }
}

/// Write the canonical encoding of `store` to the channel. Returns what was written.
pub fn sync_to_channel<C: HashChannel>(
    channel: &mut C,
    store: &SelectionStore,
    catalog: &Catalog,
) -> Result<String> {
    let encoded = encode(store, catalog);
    channel.set(&encoded)?;
    Ok(encoded)
}

/// Read the channel into `store`, then rewrite the channel in canonical form.
pub fn load_from_channel<C: HashChannel>(
    channel: &mut C,
    store: &mut SelectionStore,
    catalog: &Catalog,
) -> Result<()> {
    let raw = channel.get()?;
    apply(&raw, catalog, store);
    sync_to_channel(channel, store, catalog)?;
    Ok(())
}
