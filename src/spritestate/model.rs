use crate::error::SpriteError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The base body a character is built on. Stored apart from the selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    #[default]
    Male,
    Female,
    Teen,
    Child,
    Muscular,
    Pregnant,
}

impl BodyType {
    pub const ALL: [BodyType; 6] = [
        BodyType::Male,
        BodyType::Female,
        BodyType::Teen,
        BodyType::Child,
        BodyType::Muscular,
        BodyType::Pregnant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyType::Male => "male",
            BodyType::Female => "female",
            BodyType::Teen => "teen",
            BodyType::Child => "child",
            BodyType::Muscular => "muscular",
            BodyType::Pregnant => "pregnant",
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyType {
    type Err = SpriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BodyType::ALL
            .into_iter()
            .find(|bt| bt.as_str() == s)
            .ok_or_else(|| SpriteError::InvalidBodyType(s.to_string()))
    }
}

/// One user choice within a selection group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub item_id: String,
    /// Empty when the item declares no variants.
    pub variant: String,
    /// Display label, derived from the catalog name and the variant.
    pub name: String,
}

impl Selection {
    pub fn new(item_id: impl Into<String>, base_name: &str, variant: impl Into<String>) -> Self {
        let variant = variant.into();
        Self {
            item_id: item_id.into(),
            name: display_name(base_name, &variant),
            variant,
        }
    }
}

/// `baseName (variant)` when a variant is set, else `baseName`.
pub fn display_name(base_name: &str, variant: &str) -> String {
    if variant.is_empty() {
        base_name.to_string()
    } else {
        format!("{} ({})", base_name, variant)
    }
}

/// Selection group (catalog `type_name`) to the single selection made in it.
///
/// Insertion ordered, so encoding is stable across runs.
pub type Selections = IndexMap<String, Selection>;
