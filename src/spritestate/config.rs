use crate::error::{Result, SpriteError};
use crate::model::BodyType;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// A license category the user can toggle, expanded to concrete license strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseCategory {
    pub key: String,
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationOption {
    pub value: String,
    pub label: String,
}

/// A derived animation (e.g. an oversized slash) that renders on top of a base animation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAnimation {
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default, rename = "frameSize", alias = "frame_size")]
    pub frame_size: Option<u32>,
    #[serde(default)]
    pub frames: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSelection {
    pub item_id: String,
    #[serde(default)]
    pub variant: String,
}

static DEFAULT_LICENSES: Lazy<Vec<LicenseCategory>> = Lazy::new(|| {
    [
        ("CC0", &["CC0"][..]),
        ("CC-BY-SA", &["CC-BY-SA 3.0", "CC-BY-SA 4.0"][..]),
        ("CC-BY", &["CC-BY 3.0", "CC-BY 4.0"][..]),
        ("OGA-BY", &["OGA-BY 3.0", "OGA-BY 4.0"][..]),
        ("GPL", &["GPL 2.0", "GPL 3.0"][..]),
    ]
    .into_iter()
    .map(|(key, versions)| LicenseCategory {
        key: key.to_string(),
        versions: versions.iter().map(|v| v.to_string()).collect(),
    })
    .collect()
});

static DEFAULT_ANIMATIONS: Lazy<Vec<AnimationOption>> = Lazy::new(|| {
    [
        ("spellcast", "Spellcast"),
        ("thrust", "Thrust"),
        ("walk", "Walk"),
        ("slash", "Slash"),
        ("shoot", "Shoot"),
        ("hurt", "Hurt"),
        ("watering", "Watering"),
        ("idle", "Idle"),
        ("jump", "Jump"),
        ("run", "Run"),
        ("sit", "Sit"),
        ("emote", "Emote"),
        ("climb", "Climb"),
        ("combat", "Combat Idle"),
        ("1h_slash", "1-Handed Slash"),
        ("1h_backslash", "1-Handed Backslash"),
        ("1h_halfslash", "1-Handed Halfslash"),
    ]
    .into_iter()
    .map(|(value, label)| AnimationOption {
        value: value.to_string(),
        label: label.to_string(),
    })
    .collect()
});

fn default_licenses() -> Vec<LicenseCategory> {
    DEFAULT_LICENSES.clone()
}

fn default_animations() -> Vec<AnimationOption> {
    DEFAULT_ANIMATIONS.clone()
}

fn default_selections() -> Vec<DefaultSelection> {
    [
        ("body", "light"),
        ("heads_human_male", "light"),
        ("face_neutral", "light"),
    ]
    .into_iter()
    .map(|(item_id, variant)| DefaultSelection {
        item_id: item_id.to_string(),
        variant: variant.to_string(),
    })
    .collect()
}

fn default_true() -> bool {
    true
}

/// Configuration for spritestate, stored in `<dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpriteConfig {
    #[serde(default = "default_licenses")]
    pub licenses: Vec<LicenseCategory>,

    #[serde(default = "default_animations")]
    pub animations: Vec<AnimationOption>,

    /// Alias table from a derived animation name to its definition.
    #[serde(default)]
    pub custom_animations: IndexMap<String, CustomAnimation>,

    /// Selections applied when a load yields nothing.
    #[serde(default = "default_selections")]
    pub default_selections: Vec<DefaultSelection>,

    #[serde(default)]
    pub default_body_type: BodyType,

    /// Propagate a newly chosen skin variant to every item flagged `matchBodyColor`.
    #[serde(default = "default_true")]
    pub match_body_color: bool,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            licenses: default_licenses(),
            animations: default_animations(),
            custom_animations: IndexMap::new(),
            default_selections: default_selections(),
            default_body_type: BodyType::default(),
            match_body_color: true,
        }
    }
}

impl SpriteConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(SpriteError::Io)?;
        let config: SpriteConfig =
            serde_json::from_str(&content).map_err(SpriteError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(SpriteError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(SpriteError::Serialization)?;
        fs::write(config_path, content).map_err(SpriteError::Io)?;
        Ok(())
    }

    /// License keys must be unique; duplicate keys would make enablement ambiguous.
    fn validate(&self) -> Result<()> {
        for (i, lic) in self.licenses.iter().enumerate() {
            if self.licenses[..i].iter().any(|other| other.key == lic.key) {
                return Err(SpriteError::Config(format!(
                    "duplicate license key: {}",
                    lic.key
                )));
            }
        }
        Ok(())
    }

    pub fn license_keys(&self) -> impl Iterator<Item = &str> {
        self.licenses.iter().map(|l| l.key.as_str())
    }
}
