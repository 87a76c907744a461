use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{contain, HotelSource, SubEntity};
use crate::app::ports::{DocumentStore, Query, SortDirection};
use crate::config::CollectionNames;
use crate::domain::{CanonicalHotel, SourceTag};
use crate::error::Result;
use crate::normalize::{coerce, normalize, AdapterShape, StoredHotel};

/// Point lookup against the document store, assembled with its room types,
/// ordered images and city.
pub struct PersistentStoreSource {
    store: Arc<dyn DocumentStore>,
    collections: CollectionNames,
}

impl PersistentStoreSource {
    pub fn new(store: Arc<dyn DocumentStore>, collections: CollectionNames) -> Self {
        Self { store, collections }
    }
}

#[async_trait]
impl HotelSource for PersistentStoreSource {
    fn source_tag(&self) -> SourceTag {
        SourceTag::Persistent
    }

    #[instrument(skip(self))]
    async fn fetch(&self, id: &str) -> Result<Option<CanonicalHotel>> {
        // Only this lookup may fail the fetch
        let Some(hotel) = self.store.get(&self.collections.hotels, id).await? else {
            debug!("No hotel document");
            return Ok(None);
        };

        let city_id = coerce::text(hotel.field("city_id"));
        let rooms_query = Query::collection(&self.collections.room_types).where_eq("hotel_id", id);
        let images_query = Query::collection(&self.collections.hotel_images)
            .where_eq("hotel_id", id)
            .order_by("sort_order", SortDirection::Ascending);

        let city = async {
            match city_id.as_deref() {
                Some(city_id) => self.store.get(&self.collections.cities, city_id).await,
                None => Ok(None),
            }
        };
        let (room_types, images, city) = tokio::join!(
            self.store.query(&rooms_query),
            self.store.query(&images_query),
            city,
        );

        let stored = StoredHotel {
            hotel: Some(hotel),
            room_types: contain(SubEntity::RoomTypes, id, room_types),
            images: contain(SubEntity::Images, id, images),
            city: contain(SubEntity::City, id, city),
        };
        debug!(
            rooms = stored.room_types.len(),
            images = stored.images.len(),
            has_city = stored.city.is_some(),
            "Assembled stored hotel"
        );
        Ok(Some(normalize(id, AdapterShape::Stored(stored))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolverError;
    use crate::infra::in_memory_store::InMemoryDocumentStore;
    use serde_json::json;

    fn store() -> InMemoryDocumentStore {
        InMemoryDocumentStore::from_json(&json!({
            "hotels": [
                { "id": "hotel-9f3a7c", "name": "Lagoon Lodge", "hotel_type": "boutique", "city_id": "c1",
                  "base_price_per_night": 120, "amenities": ["Pool"] }
            ],
            "room_types": [
                { "id": "r1", "hotel_id": "hotel-9f3a7c", "name": "Lagoon Room", "price_per_night": 120, "max_occupancy": 2 },
                { "id": "r2", "hotel_id": "other", "name": "Elsewhere" }
            ],
            "hotel_images": [
                { "id": "i2", "hotel_id": "hotel-9f3a7c", "image_url": "second.jpg", "sort_order": 2 },
                { "id": "i1", "hotel_id": "hotel-9f3a7c", "image_url": "first.jpg", "sort_order": 1 }
            ],
            "cities": [ { "id": "c1", "name": "Negombo", "country": "Sri Lanka" } ]
        }))
        .unwrap()
    }

    fn source(store: &InMemoryDocumentStore) -> PersistentStoreSource {
        PersistentStoreSource::new(Arc::new(store.clone()), CollectionNames::default())
    }

    #[tokio::test]
    async fn test_hit_assembles_sub_collections() {
        let store = store();
        let hotel = source(&store).fetch("hotel-9f3a7c").await.unwrap().unwrap();
        assert_eq!(hotel.name, "Lagoon Lodge");
        assert_eq!(hotel.room_types.len(), 1);
        assert_eq!(hotel.images[0].url, "first.jpg");
        assert!(hotel.images[0].is_primary);
        assert_eq!(hotel.city.map(|c| c.name), Some("Negombo".to_string()));
    }

    #[tokio::test]
    async fn test_miss_skips_sub_queries() {
        let store = store();
        assert!(source(&store).fetch("hotel-missing").await.unwrap().is_none());
        assert_eq!(store.call_count("room_types"), 0);
        assert_eq!(store.call_count("hotel_images"), 0);
    }

    #[tokio::test]
    async fn test_sub_query_failures_are_contained() {
        let store = store();
        store.fail_collection("room_types");
        store.fail_collection("cities");
        let hotel = source(&store).fetch("hotel-9f3a7c").await.unwrap().unwrap();
        assert!(hotel.room_types.is_empty());
        assert!(hotel.city.is_none());
        assert_eq!(hotel.images.len(), 2);
    }

    #[tokio::test]
    async fn test_image_query_failure_leaves_rooms_and_city() {
        let store = store();
        store.fail_collection("hotel_images");
        let hotel = source(&store).fetch("hotel-9f3a7c").await.unwrap().unwrap();
        assert!(hotel.images.is_empty());
        assert_eq!(hotel.room_types.len(), 1);
        assert_eq!(hotel.city.map(|c| c.name), Some("Negombo".to_string()));
        assert_eq!(store.call_count("hotel_images"), 1);
    }

    #[tokio::test]
    async fn test_document_failure_propagates() {
        let store = store();
        store.fail_collection("hotels");
        let err = source(&store).fetch("hotel-9f3a7c").await.unwrap_err();
        assert!(matches!(err, ResolverError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_city_lookup_skipped_without_foreign_key() {
        let store = InMemoryDocumentStore::from_json(&json!({
            "hotels": [ { "id": "h2", "name": "No City" } ]
        }))
        .unwrap();
        let hotel = source(&store).fetch("h2").await.unwrap().unwrap();
        assert!(hotel.city.is_none());
        assert_eq!(store.call_count("cities"), 0);
    }
}
