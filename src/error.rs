use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Store transport failed on '{collection}': {message}")]
    Transport { collection: String, message: String },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResolverError {
    pub fn transport(collection: impl Into<String>, message: impl Into<String>) -> Self {
        ResolverError::Transport {
            collection: collection.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolverError>;
