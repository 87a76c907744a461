//! Backing sources for hotel entities.
//!
//! Each source fetches from exactly one backing store and yields the canonical
//! entity. "Not found" is `Ok(None)`; `Err` means the transport failed.

pub mod curated_demo;
pub mod external_place;
pub mod persistent_store;
pub mod sub_entities;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::{CanonicalHotel, SourceTag};
use crate::error::Result;
use crate::observability::metrics;

#[async_trait]
pub trait HotelSource: Send + Sync {
    fn source_tag(&self) -> SourceTag;

    async fn fetch(&self, id: &str) -> Result<Option<CanonicalHotel>>;
}

/// Sub-collections fetched alongside a hotel; failures here are contained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubEntity {
    RoomTypes,
    Images,
    City,
    Reviews,
    CrossSell,
    Tour,
}

impl SubEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubEntity::RoomTypes => "room_types",
            SubEntity::Images => "images",
            SubEntity::City => "city",
            SubEntity::Reviews => "reviews",
            SubEntity::CrossSell => "cross_sell",
            SubEntity::Tour => "tour",
        }
    }
}

/// Swap a failed sub-fetch for its default so siblings still count
pub(crate) fn contain<T: Default>(kind: SubEntity, hotel_id: &str, result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(hotel_id, sub_entity = kind.as_str(), error = %e, "Sub-fetch failed, using default");
            metrics::resolution::sub_fetch_failed(kind.as_str());
            T::default()
        }
    }
}
