use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpriteError {
    #[error("Item not found in catalog: {0}")]
    UnknownItem(String),

    #[error("Item {item} has no variant named {variant:?}")]
    UnknownVariant { item: String, variant: String },

    #[error("Unknown body type: {0}")]
    InvalidBodyType(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpriteError>;
