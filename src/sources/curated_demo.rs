use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::HotelSource;
use crate::catalog::{CompactDemoHotel, DemoCatalog, DemoEntry, DemoRoom, DetailedDemoHotel};
use crate::constants::DEFAULT_COUNTRY;
use crate::domain::{CanonicalHotel, CityRef, HotelPolicies, SourceTag};
use crate::error::Result;
use crate::normalize::{normalize, AdapterShape};
use crate::synthesizer::seed_from_text;

const DELUXE_PRICE_FACTOR: f64 = 1.3;
const STANDARD_ROOM_IMAGE: &str = "https://images.unsplash.com/photo-1590490360182-c33d57733427?w=800&h=600&fit=crop";
const DELUXE_ROOM_IMAGE: &str = "https://images.unsplash.com/photo-1582719478250-c89cae4dc85b?w=800&h=600&fit=crop";
const COMPACT_HOTEL_IMAGES: [&str; 2] = [
    "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=1200&h=800&fit=crop",
    "https://images.unsplash.com/photo-1571003123894-1f0594d2b5d9?w=1200&h=800&fit=crop",
];

/// Serves the hand-authored demo catalog. Never partially fails.
pub struct CuratedDemoSource {
    catalog: Arc<DemoCatalog>,
}

impl Default for CuratedDemoSource {
    fn default() -> Self {
        Self::new(DemoCatalog::builtin())
    }
}

impl CuratedDemoSource {
    pub fn new(catalog: Arc<DemoCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &DemoCatalog {
        &self.catalog
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fill a compact entry out to the detailed shape with fixed defaults
pub fn expand_compact(hotel: &CompactDemoHotel) -> DetailedDemoHotel {
    // Stable per id so repeated lookups agree
    let mut rng = StdRng::seed_from_u64(seed_from_text(&hotel.id));
    let review_count = rng.gen_range(100..600);

    let standard = DemoRoom {
        id: "standard-room".into(),
        name: "Standard Room".into(),
        description: "Comfortable room with all essential amenities.".into(),
        price_per_night: hotel.price,
        max_occupancy: 2,
        bed_type: "King or Twin Beds".into(),
        size_sqm: 28.0,
        amenities: strings(&["Air Conditioning", "WiFi", "TV", "Private Bathroom"]),
        images: vec![STANDARD_ROOM_IMAGE.to_string()],
        available_count: 20,
    };
    let deluxe = DemoRoom {
        id: "deluxe-room".into(),
        name: "Deluxe Room".into(),
        description: "Spacious room with premium amenities and better views.".into(),
        price_per_night: (hotel.price * DELUXE_PRICE_FACTOR).round(),
        max_occupancy: 2,
        bed_type: "King Bed".into(),
        size_sqm: 35.0,
        amenities: strings(&["Better View", "Bathtub", "Mini Bar", "Work Desk"]),
        images: vec![DELUXE_ROOM_IMAGE.to_string()],
        available_count: 10,
    };

    DetailedDemoHotel {
        id: hotel.id.clone(),
        name: hotel.name.clone(),
        description: hotel.description.clone(),
        star_rating: hotel.rating.round().clamp(1.0, 5.0) as u8,
        hotel_type: hotel.hotel_type.clone(),
        base_price_per_night: hotel.price,
        address: format!("{}, {}", hotel.city, DEFAULT_COUNTRY),
        city: CityRef {
            name: hotel.city.clone(),
            country: DEFAULT_COUNTRY.to_string(),
        },
        amenities: strings(&["Free WiFi", "Air Conditioning", "Restaurant", "Room Service", "24/7 Front Desk"]),
        average_rating: hotel.rating,
        review_count,
        images: COMPACT_HOTEL_IMAGES.iter().map(|s| s.to_string()).collect(),
        room_types: vec![standard, deluxe],
        policies: HotelPolicies {
            check_in: "2:00 PM".into(),
            check_out: "12:00 PM".into(),
            cancellation: "Free cancellation up to 24 hours before check-in".into(),
            children: "Children welcome".into(),
            pets: "Pets are not allowed".into(),
            smoking: "Non-smoking rooms available".into(),
        },
        highlights: strings(&["Great Location", "Friendly Staff", "Clean Rooms", "Good Value"]),
        nearby: strings(&["Local attractions nearby", "Restaurants within walking distance"]),
    }
}

#[async_trait]
impl HotelSource for CuratedDemoSource {
    fn source_tag(&self) -> SourceTag {
        SourceTag::Demo
    }

    #[instrument(skip(self))]
    async fn fetch(&self, id: &str) -> Result<Option<CanonicalHotel>> {
        let raw = match self.catalog.lookup(id) {
            Some(DemoEntry::Detailed(hotel)) => hotel.clone(),
            Some(DemoEntry::Compact(hotel)) => expand_compact(hotel),
            None => {
                debug!("Not in demo catalog");
                return Ok(None);
            }
        };
        Ok(Some(normalize(id, AdapterShape::Demo(raw))))
    }
}
