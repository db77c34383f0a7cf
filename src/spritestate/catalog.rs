//! # Item Catalog
//!
//! The catalog is the read-only table of sprite items produced by the offline generation
//! pipeline (`item-metadata.json`). This crate never writes it; it only looks items up.
//!
//! Every field of [`ItemMetadata`] is optional on the wire. A missing field deserializes to
//! its empty value, and every consumer treats "empty" as "no constraint", so a sparse catalog
//! degrades to permissive behavior instead of failing.
//!
//! The catalog also keeps a by-group index (selection group → item ids, in catalog order) so
//! the hash decoder only scans the slice of items that can belong to a given key.

use crate::error::{Result, SpriteError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub licenses: Vec<String>,
    #[serde(default)]
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(default)]
    pub name: String,
    /// Selection group. Items without one cannot be encoded.
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub animations: Vec<String>,
    #[serde(default)]
    pub credits: Vec<Credit>,
    #[serde(default, rename = "matchBodyColor", alias = "match_body_color")]
    pub match_body_color: bool,
}

impl ItemMetadata {
    /// The name as it appears in a hash value: spaces become underscores.
    pub fn hash_name(&self) -> String {
        self.name.replace(' ', "_")
    }

    pub fn has_variant(&self, variant: &str) -> bool {
        self.variants.iter().any(|v| v == variant)
    }
}

/// A node of the category tree shown by the item browser.
///
/// `animations` is the aggregate of the animations supported below this node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub animations: Vec<String>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub children: IndexMap<String, CategoryNode>,
}

impl CategoryNode {
    /// Walk `path` down through `children`.
    pub fn node_at<I: AsRef<str>>(&self, path: &[I]) -> Option<&CategoryNode> {
        path.iter()
            .try_fold(self, |node, segment| node.children.get(segment.as_ref()))
    }
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default, alias = "itemMetadata")]
    items: IndexMap<String, ItemMetadata>,
    #[serde(default, alias = "categoryTree")]
    category_tree: Option<CategoryNode>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: IndexMap<String, ItemMetadata>,
    category_tree: Option<CategoryNode>,
    by_group: HashMap<String, Vec<String>>,
}

impl Catalog {
    pub fn new(items: IndexMap<String, ItemMetadata>) -> Self {
        let mut by_group: HashMap<String, Vec<String>> = HashMap::new();
        for (id, meta) in &items {
            if let Some(group) = &meta.type_name {
                by_group.entry(group.clone()).or_default().push(id.clone());
            }
        }
        Self {
            items,
            category_tree: None,
            by_group,
        }
    }

    pub fn with_category_tree(mut self, tree: CategoryNode) -> Self {
        self.category_tree = Some(tree);
        self
    }

    /// Parse a catalog document: `{"items": {...}, "category_tree": {...}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json).map_err(SpriteError::Serialization)?;
        let catalog = Self::new(file.items);
        Ok(match file.category_tree {
            Some(tree) => catalog.with_category_tree(tree),
            None => catalog,
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SpriteError::Catalog(format!(
                "catalog file not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path).map_err(SpriteError::Io)?;
        let catalog = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), items = catalog.len(), "Loaded item catalog");
        Ok(catalog)
    }

    pub fn get(&self, item_id: &str) -> Option<&ItemMetadata> {
        self.items.get(item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ItemMetadata)> {
        self.items.iter().map(|(id, meta)| (id.as_str(), meta))
    }

    /// Items whose `type_name` is `group`, in catalog order.
    pub fn group(&self, group: &str) -> Vec<(&str, &ItemMetadata)> {
        self.by_group
            .get(group)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.items.get_key_value(id))
                    .map(|(id, meta)| (id.as_str(), meta))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The selection group an item belongs to. Falls back to the id itself so that
    /// items without a group still occupy a slot of their own.
    pub fn selection_group(&self, item_id: &str) -> String {
        self.get(item_id)
            .and_then(|meta| meta.type_name.clone())
            .unwrap_or_else(|| item_id.to_string())
    }

    pub fn category_tree(&self) -> Option<&CategoryNode> {
        self.category_tree.as_ref()
    }
}
