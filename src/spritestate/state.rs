use crate::catalog::Catalog;
use crate::config::DefaultSelection;
use crate::error::{Result, SpriteError};
use crate::model::{display_name, BodyType, Selection, Selections};

/// The current character build: one selection per group plus the body type.
///
/// The store is owned by the application and handed to the codec and filter engine by
/// reference. Its only durable form is the hash string the codec produces from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    selections: Selections,
    body_type: BodyType,
}

impl SelectionStore {
    pub fn new(body_type: BodyType) -> Self {
        Self {
            selections: Selections::new(),
            body_type,
        }
    }

    pub fn with_selections(selections: Selections) -> Self {
        Self {
            selections,
            body_type: BodyType::default(),
        }
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    pub fn set_body_type(&mut self, body_type: BodyType) {
        self.body_type = body_type;
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Swap in a complete selection map at once.
    pub fn replace(&mut self, selections: Selections) {
        self.selections = selections;
    }

    /// Put `selection` into `group`, replacing whatever was selected there.
    pub fn upsert(&mut self, group: impl Into<String>, selection: Selection) -> Option<Selection> {
        self.selections.insert(group.into(), selection)
    }

    pub fn remove(&mut self, group: &str) -> Option<Selection> {
        self.selections.shift_remove(group)
    }

    pub fn remove_groups(&mut self, groups: &[String]) -> usize {
        let before = self.selections.len();
        self.selections.retain(|group, _| !groups.contains(group));
        before - self.selections.len()
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    /// Select a catalog item into its selection group.
    ///
    /// Without an explicit variant, items that declare variants get their first one.
    /// Returns the group the item landed in.
    pub fn select_item(
        &mut self,
        catalog: &Catalog,
        item_id: &str,
        variant: Option<&str>,
    ) -> Result<String> {
        let meta = catalog
            .get(item_id)
            .ok_or_else(|| SpriteError::UnknownItem(item_id.to_string()))?;

        let variant = match variant {
            Some(v) if !meta.has_variant(v) => {
                return Err(SpriteError::UnknownVariant {
                    item: item_id.to_string(),
                    variant: v.to_string(),
                })
            }
            Some(v) => v.to_string(),
            None => meta.variants.first().cloned().unwrap_or_default(),
        };

        let group = catalog.selection_group(item_id);
        self.upsert(group.clone(), Selection::new(item_id, &meta.name, variant));
        Ok(group)
    }

    /// Apply the configured default build. Items the catalog does not know are skipped.
    pub fn select_defaults(&mut self, catalog: &Catalog, defaults: &[DefaultSelection]) -> usize {
        let mut applied = 0;
        for default in defaults {
            let variant = (!default.variant.is_empty()).then_some(default.variant.as_str());
            match self.select_item(catalog, &default.item_id, variant) {
                Ok(_) => applied += 1,
                Err(e) => tracing::debug!(item = %default.item_id, error = %e, "Skipping default selection"),
            }
        }
        applied
    }

    /// Switch every selected item flagged `matchBodyColor` to `variant`, where it has one.
    pub fn apply_match_body_color(&mut self, catalog: &Catalog, variant: &str) -> usize {
        if variant.is_empty() {
            return 0;
        }

        let mut changed = 0;
        for selection in self.selections.values_mut() {
            let Some(meta) = catalog.get(&selection.item_id) else {
                continue;
            };
            if !meta.match_body_color || !meta.has_variant(variant) {
                continue;
            }
            if selection.variant != variant {
                changed += 1;
            }
            selection.variant = variant.to_string();
            selection.name = display_name(&meta.name, variant);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemMetadata;

    fn item(name: &str, group: &str, variants: &[&str], match_body: bool) -> ItemMetadata {
        ItemMetadata {
            name: name.into(),
            type_name: Some(group.into()),
            variants: variants.iter().map(|v| v.to_string()).collect(),
            match_body_color: match_body,
            ..ItemMetadata::default()
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            [
                ("body", item("Body color", "body", &["light", "olive"], true)),
                ("body_zombie", item("Zombie", "body", &["green"], false)),
                ("heads_human_male", item("Human male", "heads", &["light", "olive"], true)),
                ("hat_cap", item("Cap", "hat", &["red", "blue"], false)),
                ("waistband", item("Waistband", "sash", &[], false)),
            ]
            .into_iter()
            .map(|(id, m)| (id.to_string(), m))
            .collect(),
        )
    }

    #[test]
    fn select_item_replaces_within_group() {
        let cat = catalog();
        let mut store = SelectionStore::default();
        store.select_item(&cat, "body", Some("olive")).unwrap();
        let group = store.select_item(&cat, "body_zombie", None).unwrap();

        assert_eq!(group, "body");
        assert_eq!(store.selections().len(), 1);
        let sel = &store.selections()["body"];
        assert_eq!(sel.item_id, "body_zombie");
        assert_eq!(sel.variant, "green");
        assert_eq!(sel.name, "Zombie (green)");
    }

    #[test]
    fn select_item_without_variants() {
        let cat = catalog();
        let mut store = SelectionStore::default();
        store.select_item(&cat, "waistband", None).unwrap();
        assert_eq!(store.selections()["sash"].name, "Waistband");
        assert_eq!(store.selections()["sash"].variant, "");
    }

    #[test]
    fn select_item_rejects_unknown_item_and_variant() {
        let cat = catalog();
        let mut store = SelectionStore::default();
        assert!(matches!(
            store.select_item(&cat, "cape", None),
            Err(SpriteError::UnknownItem(_))
        ));
        assert!(matches!(
            store.select_item(&cat, "hat_cap", Some("green")),
            Err(SpriteError::UnknownVariant { .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let cat = catalog();
        let mut store = SelectionStore::default();
        store.select_item(&cat, "body", None).unwrap();
        store.select_item(&cat, "hat_cap", None).unwrap();
        store.select_item(&cat, "waistband", None).unwrap();

        assert!(store.remove("hat").is_some());
        assert!(store.remove("hat").is_none());
        let groups: Vec<&str> = store.selections().keys().map(String::as_str).collect();
        assert_eq!(groups, vec!["body", "sash"]);
    }

    #[test]
    fn select_defaults_skips_missing_items() {
        let cat = catalog();
        let mut store = SelectionStore::default();
        let defaults = vec![
            DefaultSelection {
                item_id: "body".into(),
                variant: "light".into(),
            },
            DefaultSelection {
                item_id: "face_neutral".into(),
                variant: "light".into(),
            },
        ];
        assert_eq!(store.select_defaults(&cat, &defaults), 1);
        assert_eq!(store.selections()["body"].name, "Body color (light)");
    }

    #[test]
    fn match_body_color_updates_flagged_items() {
        let cat = catalog();
        let mut store = SelectionStore::default();
        store.select_item(&cat, "body", Some("light")).unwrap();
        store.select_item(&cat, "heads_human_male", Some("light")).unwrap();
        store.select_item(&cat, "hat_cap", Some("red")).unwrap();

        let changed = store.apply_match_body_color(&cat, "olive");
        assert_eq!(changed, 2);
        assert_eq!(store.selections()["heads"].name, "Human male (olive)");
        assert_eq!(store.selections()["hat"].variant, "red");
        assert_eq!(store.apply_match_body_color(&cat, ""), 0);
    }
}
