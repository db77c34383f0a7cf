//! # Compatibility Filters
//!
//! Two predicates decide whether a catalog item may be shown or kept:
//!
//! - **License**: at least one of the item's credited licenses is in the allow-list built from
//!   the enabled license categories.
//! - **Animation**: the item supports at least one enabled animation, directly or through a
//!   custom animation whose base animation is enabled.
//!
//! Both fail open on missing metadata (unknown item, no credits, no animations). They differ on
//! an empty enablement map: no enabled animations means the animation filter is switched off and
//! everything passes, while no enabled licenses means the allow-list is empty and every credited
//! item fails. The "no credits" check runs before the allow-list check, so uncredited items
//! still pass an empty license filter.
//!
//! The engine holds its configuration tables and the two enablement maps and nothing else;
//! the catalog and the selection store are passed in by the caller.

use crate::catalog::{Catalog, CategoryNode, ItemMetadata};
use crate::config::{AnimationOption, CustomAnimation, LicenseCategory, SpriteConfig};
use crate::model::Selections;
use crate::state::SelectionStore;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Extracts the base animation name from a custom animation definition.
pub type BaseExtractor = Box<dyn Fn(&CustomAnimation) -> Option<String>>;

/// Key to enabled flag. A missing key is disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enablement(HashMap<String, bool>);

impl Enablement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every listed key enabled, everything else disabled.
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self(keys.into_iter().map(|k| (k.into(), true)).collect())
    }

    pub fn set(&mut self, key: impl Into<String>, enabled: bool) {
        self.0.insert(key.into(), enabled);
    }

    pub fn is_enabled(&self, key: &str) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }
}

/// Anything carrying a list of supported animations: items and category-tree nodes.
pub trait AnimationSubject {
    fn animations(&self) -> &[String];
}

impl AnimationSubject for ItemMetadata {
    fn animations(&self) -> &[String] {
        &self.animations
    }
}

impl AnimationSubject for CategoryNode {
    fn animations(&self) -> &[String] {
        &self.animations
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    License,
    Animation,
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterKind::License => f.write_str("license"),
            FilterKind::Animation => f.write_str("animation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed(Vec<String>),
    NothingToRemove,
}

pub struct FilterEngine {
    licenses: Vec<LicenseCategory>,
    animations: Vec<AnimationOption>,
    custom_animations: IndexMap<String, CustomAnimation>,
    base_of: BaseExtractor,
    pub enabled_licenses: Enablement,
    pub enabled_animations: Enablement,
}

fn configured_base(custom: &CustomAnimation) -> Option<String> {
    custom.base.clone()
}

impl FilterEngine {
    /// Engine with nothing enabled: the license filter rejects every credited item and the
    /// animation filter is off.
    pub fn new(
        licenses: Vec<LicenseCategory>,
        animations: Vec<AnimationOption>,
        custom_animations: IndexMap<String, CustomAnimation>,
    ) -> Self {
        Self {
            licenses,
            animations,
            custom_animations,
            base_of: Box::new(configured_base),
            enabled_licenses: Enablement::new(),
            enabled_animations: Enablement::new(),
        }
    }

    /// Engine with application defaults: every license category enabled, no animation enabled.
    pub fn from_config(config: &SpriteConfig) -> Self {
        let mut engine = Self::new(
            config.licenses.clone(),
            config.animations.clone(),
            config.custom_animations.clone(),
        );
        engine.enabled_licenses = Enablement::from_keys(config.license_keys());
        engine
    }

    pub fn with_base_extractor<F>(mut self, base_of: F) -> Self
    where
        F: Fn(&CustomAnimation) -> Option<String> + 'static,
    {
        self.base_of = Box::new(base_of);
        self
    }

    pub fn licenses(&self) -> &[LicenseCategory] {
        &self.licenses
    }

    pub fn animations(&self) -> &[AnimationOption] {
        &self.animations
    }

    /// Concrete license strings of every enabled category, in configuration order.
    pub fn allowed_licenses(&self) -> Vec<&str> {
        self.licenses
            .iter()
            .filter(|lic| self.enabled_licenses.is_enabled(&lic.key))
            .flat_map(|lic| lic.versions.iter().map(String::as_str))
            .collect()
    }

    /// Enabled animation values, restricted to the configured animation list.
    pub fn enabled_animations(&self) -> HashSet<&str> {
        self.animations
            .iter()
            .filter(|anim| self.enabled_animations.is_enabled(&anim.value))
            .map(|anim| anim.value.as_str())
            .collect()
    }

    pub fn is_animation_filter_active(&self) -> bool {
        !self.enabled_animations().is_empty()
    }

    pub fn is_item_license_compatible(&self, catalog: &Catalog, item_id: &str) -> bool {
        let Some(meta) = catalog.get(item_id) else {
            return true;
        };
        if meta.credits.is_empty() {
            return true;
        }

        let allowed: HashSet<&str> = self.allowed_licenses().into_iter().map(str::trim).collect();
        if allowed.is_empty() {
            return false;
        }

        meta.credits.iter().any(|credit| {
            credit
                .licenses
                .iter()
                .any(|license| allowed.contains(license.trim()))
        })
    }

    pub fn is_item_animation_compatible(&self, catalog: &Catalog, item_id: &str) -> bool {
        self.is_node_animation_compatible(catalog.get(item_id))
    }

    pub fn is_node_animation_compatible<N>(&self, node: Option<&N>) -> bool
    where
        N: AnimationSubject + ?Sized,
    {
        let enabled = self.enabled_animations();
        if enabled.is_empty() {
            return true;
        }

        let Some(node) = node else {
            return true;
        };
        let animations = node.animations();
        if animations.is_empty() {
            return true;
        }

        animations.iter().any(|anim| {
            if enabled.contains(anim.as_str()) {
                return true;
            }
            self.custom_animations
                .get(anim)
                .and_then(|custom| (self.base_of)(custom))
                .is_some_and(|base| enabled.contains(base.as_str()))
        })
    }

    pub fn is_compatible(&self, kind: FilterKind, catalog: &Catalog, item_id: &str) -> bool {
        match kind {
            FilterKind::License => self.is_item_license_compatible(catalog, item_id),
            FilterKind::Animation => self.is_item_animation_compatible(catalog, item_id),
        }
    }

    /// Selection groups whose selected item fails the `kind` filter, in selection order.
    pub fn incompatible_groups(
        &self,
        kind: FilterKind,
        catalog: &Catalog,
        selections: &Selections,
    ) -> Vec<String> {
        selections
            .iter()
            .filter(|(_, sel)| !self.is_compatible(kind, catalog, &sel.item_id))
            .map(|(group, _)| group.clone())
            .collect()
    }

    /// Drop every selection that fails the `kind` filter, in one pass over the store.
    pub fn remove_incompatible(
        &self,
        kind: FilterKind,
        catalog: &Catalog,
        store: &mut SelectionStore,
    ) -> RemovalOutcome {
        let doomed = self.incompatible_groups(kind, catalog, store.selections());
        if doomed.is_empty() {
            return RemovalOutcome::NothingToRemove;
        }

        store.remove_groups(&doomed);
        tracing::info!(filter = %kind, removed = doomed.len(), "Removed incompatible selections");
        RemovalOutcome::Removed(doomed)
    }
}
