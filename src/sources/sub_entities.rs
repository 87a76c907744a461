use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{contain, SubEntity};
use crate::app::ports::{DocumentStore, Query, SortDirection};
use crate::config::CollectionNames;
use crate::domain::{HotelReview, TourPackageCrossSell};
use crate::error::Result;
use crate::normalize::{coerce, normalize_cross_sell, normalize_review};

/// Reviews and tour cross-sells for a stored hotel
pub struct SubEntityFetcher {
    store: Arc<dyn DocumentStore>,
    collections: CollectionNames,
    review_limit: usize,
}

impl SubEntityFetcher {
    pub fn new(store: Arc<dyn DocumentStore>, collections: CollectionNames, review_limit: usize) -> Self {
        Self {
            store,
            collections,
            review_limit,
        }
    }

    /// Verified reviews, newest first, capped at the review limit
    #[instrument(skip(self))]
    pub async fn fetch_reviews(&self, hotel_id: &str) -> Result<Vec<HotelReview>> {
        let query = Query::collection(&self.collections.hotel_reviews)
            .where_eq("hotel_id", hotel_id)
            .where_eq("is_verified", true)
            .order_by("created_at", SortDirection::Descending)
            .limit(self.review_limit);
        // The store orders by instant whatever the timestamp shape, then caps
        let docs = self.store.query(&query).await?;

        let reviews: Vec<HotelReview> = docs.iter().map(|doc| normalize_review(hotel_id, doc)).collect();
        debug!(count = reviews.len(), "Fetched reviews");
        Ok(reviews)
    }

    /// Active packages, each joined with its tour. A failed tour lookup
    /// keeps the package with no tour summary.
    #[instrument(skip(self))]
    pub async fn fetch_cross_sell(&self, hotel_id: &str) -> Result<Vec<TourPackageCrossSell>> {
        let query = Query::collection(&self.collections.tour_packages)
            .where_eq("hotel_id", hotel_id)
            .where_eq("is_active", true);
        let packages = self.store.query(&query).await?;

        let expansions = packages.iter().map(|package| async move {
            let tour = match coerce::text(package.field("tour_id")) {
                Some(tour_id) => contain(
                    SubEntity::Tour,
                    hotel_id,
                    self.store.get(&self.collections.tours, &tour_id).await,
                ),
                None => None,
            };
            normalize_cross_sell(package, tour.as_ref())
        });
        let cross_sells = join_all(expansions).await;
        debug!(count = cross_sells.len(), "Fetched cross-sell packages");
        Ok(cross_sells)
    }
}
