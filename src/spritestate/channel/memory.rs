use super::{as_fragment, HashChannel};
use crate::error::Result;

/// In-memory channel for testing and embedding.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct MemoryChannel {
    hash: String,
    writes: usize,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channel already holding `hash`, as when a page is opened from a shared link.
    pub fn with_hash(hash: &str) -> Self {
        Self {
            hash: hash.to_string(),
            writes: 0,
        }
    }

    /// Replace the stored fragment from outside, like back/forward navigation.
    /// Not counted as a write.
    pub fn navigate(&mut self, hash: &str) {
        self.hash = hash.to_string();
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn reset_writes(&mut self) {
        self.writes = 0;
    }
}

impl HashChannel for MemoryChannel {
    fn get(&self) -> Result<String> {
        Ok(self.hash.clone())
    }

    fn set(&mut self, params: &str) -> Result<()> {
        self.hash = as_fragment(params);
        self.writes += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::catalog::{Catalog, CategoryNode, Credit, ItemMetadata};
    use crate::config::SpriteConfig;
    use crate::filters::FilterEngine;
    use crate::state::SelectionStore;

    /// A small catalog modelled on the real sprite set, plus a channel and store to go with it.
    pub struct SpriteFixture {
        pub catalog: Catalog,
        pub channel: MemoryChannel,
        pub store: SelectionStore,
        pub config: SpriteConfig,
    }

    impl Default for SpriteFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    pub fn item(
        name: &str,
        group: &str,
        variants: &[&str],
        animations: &[&str],
        licenses: &[&str],
    ) -> ItemMetadata {
        ItemMetadata {
            name: name.to_string(),
            type_name: Some(group.to_string()),
            variants: variants.iter().map(|v| v.to_string()).collect(),
            animations: animations.iter().map(|a| a.to_string()).collect(),
            credits: if licenses.is_empty() {
                Vec::new()
            } else {
                vec![Credit {
                    authors: vec!["Test Author".to_string()],
                    licenses: licenses.iter().map(|l| l.to_string()).collect(),
                    ..Credit::default()
                }]
            },
            match_body_color: false,
        }
    }

    pub fn sample_catalog() -> Catalog {
        let mut body = item(
            "Body color",
            "body",
            &["light", "olive", "brown"],
            &["walk", "slash", "run"],
            &["CC-BY-SA 3.0", "GPL 3.0"],
        );
        body.match_body_color = true;
        let mut head = item(
            "Human male",
            "heads",
            &["light", "olive", "brown"],
            &["walk", "slash", "run"],
            &["OGA-BY 3.0"],
        );
        head.match_body_color = true;
        let mut face = item(
            "Neutral",
            "expression",
            &["light", "olive"],
            &["walk"],
            &["CC0"],
        );
        face.match_body_color = true;

        let items = vec![
            ("body", body),
            ("heads_human_male", head),
            ("face_neutral", face),
            (
                "hair_long",
                item("Long", "hair", &["blonde", "dark_brown"], &["walk", "slash_oversize"], &["CC-BY 4.0"]),
            ),
            (
                "tiara",
                item("Tiara", "hat", &["tiara_silver", "tiara_gold"], &["walk"], &["CC0"]),
            ),
            (
                "waistband",
                item("Waistband", "sash", &[], &["walk", "run"], &["OGA-BY 4.0"]),
            ),
            (
                "wings_bat",
                item("Bat wings", "wings", &["black"], &["fly"], &["Proprietary"]),
            ),
        ];

        let tree = CategoryNode {
            label: Some("All".to_string()),
            animations: vec!["walk".into(), "slash".into(), "run".into(), "fly".into()],
            items: Vec::new(),
            children: [
                (
                    "body".to_string(),
                    CategoryNode {
                        label: Some("Body".to_string()),
                        animations: vec!["walk".into(), "slash".into(), "run".into()],
                        items: vec!["body".into()],
                        ..CategoryNode::default()
                    },
                ),
                (
                    "wings".to_string(),
                    CategoryNode {
                        label: Some("Wings".to_string()),
                        animations: vec!["fly".into()],
                        items: vec!["wings_bat".into()],
                        ..CategoryNode::default()
                    },
                ),
            ]
            .into_iter()
            .collect(),
        };

        Catalog::new(
            items
                .into_iter()
                .map(|(id, meta)| (id.to_string(), meta))
                .collect(),
        )
        .with_category_tree(tree)
    }

    impl SpriteFixture {
        pub fn new() -> Self {
            let mut config = SpriteConfig::default();
            config.custom_animations.insert(
                "slash_oversize".to_string(),
                crate::config::CustomAnimation {
                    base: Some("slash".to_string()),
                    frame_size: Some(192),
                    frames: Vec::new(),
                },
            );
            Self {
                catalog: sample_catalog(),
                channel: MemoryChannel::new(),
                store: SelectionStore::default(),
                config,
            }
        }

        pub fn with_hash(mut self, hash: &str) -> Self {
            self.channel = MemoryChannel::with_hash(hash);
            self
        }

        pub fn with_selected(mut self, item_id: &str, variant: Option<&str>) -> Self {
            self.store
                .select_item(&self.catalog, item_id, variant)
                .unwrap();
            self
        }

        pub fn engine(&self) -> FilterEngine {
            FilterEngine::from_config(&self.config)
        }
    }
}
