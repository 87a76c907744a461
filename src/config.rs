use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::*;
use crate::error::{ResolverError, Result};

pub const CONFIG_ENV_VAR: &str = "HOTEL_RESOLVER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "resolver.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResolverConfig {
    pub classifier: ClassifierRules,
    pub review_limit: usize,
    pub collections: CollectionNames,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierRules::default(),
            review_limit: DEFAULT_REVIEW_LIMIT,
            collections: CollectionNames::default(),
        }
    }
}

/// Shape rules used to decide which source owns an identifier
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierRules {
    pub external_prefix: String,
    pub max_demo_id: u32,
    pub max_record_id_len: usize,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            external_prefix: EXTERNAL_PLACE_PREFIX.to_string(),
            max_demo_id: MAX_DEMO_ID,
            max_record_id_len: MAX_RECORD_ID_LEN,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CollectionNames {
    pub hotels: String,
    pub room_types: String,
    pub hotel_images: String,
    pub cities: String,
    pub hotel_reviews: String,
    pub tour_packages: String,
    pub tours: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            hotels: HOTELS_COLLECTION.to_string(),
            room_types: ROOM_TYPES_COLLECTION.to_string(),
            hotel_images: HOTEL_IMAGES_COLLECTION.to_string(),
            cities: CITIES_COLLECTION.to_string(),
            hotel_reviews: HOTEL_REVIEWS_COLLECTION.to_string(),
            tour_packages: TOUR_PACKAGES_COLLECTION.to_string(),
            tours: TOURS_COLLECTION.to_string(),
        }
    }
}

impl ResolverConfig {
    /// Load from `$HOTEL_RESOLVER_CONFIG`, else `resolver.toml`, else defaults.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_file(&path),
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ResolverError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ResolverConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.classifier.external_prefix.is_empty() {
            return Err(ResolverError::Config("classifier.external_prefix must not be empty".into()));
        }
        if self.review_limit == 0 {
            return Err(ResolverError::Config("review_limit must be at least 1".into()));
        }
        Ok(())
    }
}
