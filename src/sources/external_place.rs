use async_trait::async_trait;
use tracing::{debug, instrument};

use super::HotelSource;
use crate::domain::{CanonicalHotel, SourceTag};
use crate::error::Result;
use crate::normalize::{normalize, AdapterShape};

const PLACEHOLDER_NAME: &str = "Loading hotel details";
const PLACEHOLDER_DESCRIPTION: &str =
    "Property details for this place are being retrieved from the external listing provider.";
const PLACEHOLDER_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=1200&h=800&fit=crop",
    "https://images.unsplash.com/photo-1582719478250-c89cae4dc85b?w=1200&h=800&fit=crop",
    "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb?w=1200&h=800&fit=crop",
];

/// Fixed interim content shown while external place details load out of band
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderHotel {
    pub name: String,
    pub description: String,
    pub star_rating: u8,
    pub base_price_per_night: f64,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub room_id: String,
    pub room_name: String,
    pub room_amenities: Vec<String>,
    pub room_available_count: u32,
}

impl Default for PlaceholderHotel {
    fn default() -> Self {
        Self {
            name: PLACEHOLDER_NAME.to_string(),
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            star_rating: 4,
            base_price_per_night: 100.0,
            amenities: vec!["Free WiFi".into(), "Air Conditioning".into(), "Restaurant".into()],
            images: PLACEHOLDER_IMAGES.iter().map(|s| s.to_string()).collect(),
            room_id: "standard-room".into(),
            room_name: "Standard Room".into(),
            room_amenities: vec!["Air Conditioning".into(), "WiFi".into(), "Private Bathroom".into()],
            room_available_count: 1,
        }
    }
}

/// Placeholder source for ids owned by the external places provider.
/// Never reports not-found.
#[derive(Default)]
pub struct ExternalPlaceSource {
    template: PlaceholderHotel,
}

impl ExternalPlaceSource {
    pub fn new(template: PlaceholderHotel) -> Self {
        Self { template }
    }
}

#[async_trait]
impl HotelSource for ExternalPlaceSource {
    fn source_tag(&self) -> SourceTag {
        SourceTag::External
    }

    #[instrument(skip(self))]
    async fn fetch(&self, id: &str) -> Result<Option<CanonicalHotel>> {
        debug!("Serving placeholder for external place");
        Ok(Some(normalize(id, AdapterShape::Placeholder(self.template.clone()))))
    }
}
