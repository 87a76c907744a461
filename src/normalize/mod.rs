//! Maps each source's raw shape into the canonical hotel model.
//!
//! This is the only place untyped store documents are read. Every function
//! here is total: malformed input degrades to defaults, nothing errors.

pub mod coerce;

use serde_json::Value;

use crate::app::ports::Document;
use crate::catalog::{DemoRoom, DetailedDemoHotel};
use crate::constants::DEFAULT_COUNTRY;
use crate::domain::{
    CanonicalHotel, CityRef, GeoPoint, HotelImage, HotelPolicies, HotelReview, HotelType, RoomType,
    TourPackageCrossSell, TourSummary,
};
use crate::sources::external_place::PlaceholderHotel;
use coerce::{amount, boolean, count, field, number, number_opt, string_list, text, timestamp};

const DEFAULT_STAR_RATING: u8 = 3;
const DEFAULT_MAX_OCCUPANCY: u32 = 2;
const UNTITLED_HOTEL: &str = "Untitled Hotel";

/// A stored hotel document plus whatever its sub-queries returned
#[derive(Debug, Clone, Default)]
pub struct StoredHotel {
    pub hotel: Option<Document>,
    pub room_types: Vec<Document>,
    pub images: Vec<Document>,
    pub city: Option<Document>,
}

/// Raw input, discriminated by the source that produced it
#[derive(Debug, Clone)]
pub enum AdapterShape {
    Demo(DetailedDemoHotel),
    Placeholder(PlaceholderHotel),
    Stored(StoredHotel),
}

/// Produce the canonical entity for `id` from any source's raw shape.
pub fn normalize(id: &str, raw: AdapterShape) -> CanonicalHotel {
    match raw {
        AdapterShape::Demo(hotel) => normalize_demo(id, hotel),
        AdapterShape::Placeholder(hotel) => normalize_placeholder(id, hotel),
        AdapterShape::Stored(stored) => normalize_stored(id, stored),
    }
}

fn clamp_stars(raw: Option<f64>) -> u8 {
    raw.map(|n| n.round().clamp(1.0, 5.0) as u8)
        .unwrap_or(DEFAULT_STAR_RATING)
}

fn non_negative(n: f64) -> f64 {
    if n.is_finite() {
        n.max(0.0)
    } else {
        0.0
    }
}

/// Only the first image is primary
fn images_from_urls(urls: Vec<String>) -> Vec<HotelImage> {
    urls.into_iter()
        .enumerate()
        .map(|(i, url)| HotelImage {
            url,
            alt_text: None,
            is_primary: i == 0,
        })
        .collect()
}

fn normalize_demo(id: &str, hotel: DetailedDemoHotel) -> CanonicalHotel {
    CanonicalHotel {
        id: id.to_string(),
        name: hotel.name,
        description: hotel.description,
        star_rating: clamp_stars(Some(f64::from(hotel.star_rating))),
        hotel_type: HotelType::from_raw(&hotel.hotel_type),
        base_price_per_night: non_negative(hotel.base_price_per_night),
        amenities: hotel.amenities,
        images: images_from_urls(hotel.images),
        room_types: hotel.room_types.into_iter().map(demo_room).collect(),
        city: Some(hotel.city),
        location: None,
        address: Some(hotel.address),
        average_rating: Some(hotel.average_rating),
        review_count: Some(hotel.review_count),
        policies: Some(hotel.policies),
        highlights: hotel.highlights,
        nearby: hotel.nearby,
    }
}

fn demo_room(room: DemoRoom) -> RoomType {
    RoomType {
        id: room.id,
        name: room.name,
        description: Some(room.description),
        price_per_night: non_negative(room.price_per_night),
        max_occupancy: room.max_occupancy.max(1),
        bed_type: Some(room.bed_type),
        size_sqm: Some(non_negative(room.size_sqm)),
        amenities: room.amenities,
        images: room.images,
        available_count: room.available_count,
    }
}

fn normalize_placeholder(id: &str, hotel: PlaceholderHotel) -> CanonicalHotel {
    let room = RoomType {
        id: hotel.room_id,
        name: hotel.room_name,
        description: None,
        price_per_night: non_negative(hotel.base_price_per_night),
        max_occupancy: DEFAULT_MAX_OCCUPANCY,
        bed_type: None,
        size_sqm: None,
        amenities: hotel.room_amenities,
        images: hotel.images.iter().take(1).cloned().collect(),
        available_count: hotel.room_available_count,
    };
    CanonicalHotel {
        id: id.to_string(),
        name: hotel.name,
        description: hotel.description,
        star_rating: clamp_stars(Some(f64::from(hotel.star_rating))),
        hotel_type: HotelType::MiddleRange,
        base_price_per_night: non_negative(hotel.base_price_per_night),
        amenities: hotel.amenities,
        images: images_from_urls(hotel.images),
        room_types: vec![room],
        city: None,
        location: None,
        address: None,
        average_rating: None,
        review_count: None,
        policies: None,
        highlights: Vec::new(),
        nearby: Vec::new(),
    }
}

fn normalize_stored(id: &str, stored: StoredHotel) -> CanonicalHotel {
    let empty = Value::Null;
    let data = stored.hotel.as_ref().map(|d| &d.data).unwrap_or(&empty);

    // Queried sub-collections win; embedded arrays are the fallback
    let mut images = stored_images(&stored.images);
    if images.is_empty() {
        images = images_from_urls(string_list(field(data, &["images", "image_urls"])));
    }
    let mut room_types: Vec<RoomType> = stored
        .room_types
        .iter()
        .map(|doc| stored_room(&doc.id, &doc.data))
        .collect();
    if room_types.is_empty() {
        if let Some(Value::Array(embedded)) = field(data, &["room_types", "rooms"]) {
            room_types = embedded
                .iter()
                .enumerate()
                .map(|(i, room)| {
                    let room_id = text(room.get("id")).unwrap_or_else(|| format!("room-{}", i + 1));
                    stored_room(&room_id, room)
                })
                .collect();
        }
    }

    let city = stored
        .city
        .as_ref()
        .and_then(|doc| city_ref(&doc.data))
        .or_else(|| field(data, &["city"]).and_then(city_ref));

    CanonicalHotel {
        id: id.to_string(),
        name: text(field(data, &["name", "title"])).unwrap_or_else(|| UNTITLED_HOTEL.to_string()),
        description: text(field(data, &["description"])).unwrap_or_default(),
        star_rating: clamp_stars(number_opt(field(data, &["star_rating", "stars"]))),
        hotel_type: text(field(data, &["hotel_type", "type"]))
            .map(|t| HotelType::from_raw(&t))
            .unwrap_or_default(),
        base_price_per_night: amount(field(data, &["base_price_per_night", "price"])),
        amenities: string_list(field(data, &["amenities"])),
        images,
        room_types,
        city,
        location: location(data),
        address: text(field(data, &["address"])),
        average_rating: number_opt(field(data, &["average_rating", "rating"])).map(|r| r.clamp(0.0, 5.0)),
        review_count: field(data, &["review_count"]).map(|v| count(Some(v))),
        policies: field(data, &["policies"]).and_then(policies),
        highlights: string_list(field(data, &["highlights"])),
        nearby: string_list(field(data, &["nearby"])),
    }
}

fn stored_images(docs: &[Document]) -> Vec<HotelImage> {
    docs.iter()
        .filter_map(|doc| text(field(&doc.data, &["image_url", "url"])).map(|url| (url, &doc.data)))
        .enumerate()
        .map(|(i, (url, data))| HotelImage {
            url,
            alt_text: text(field(data, &["alt_text", "caption"])),
            is_primary: i == 0,
        })
        .collect()
}

fn stored_room(id: &str, data: &Value) -> RoomType {
    let occupancy = number_opt(field(data, &["max_occupancy", "capacity"]))
        .map(|n| (n.floor().max(1.0)).min(f64::from(u32::MAX)) as u32)
        .unwrap_or(DEFAULT_MAX_OCCUPANCY);
    RoomType {
        id: id.to_string(),
        name: text(field(data, &["name", "room_name"])).unwrap_or_else(|| "Room".to_string()),
        description: text(field(data, &["description"])),
        price_per_night: amount(field(data, &["price_per_night", "base_price"])),
        max_occupancy: occupancy,
        bed_type: text(field(data, &["bed_type"])),
        size_sqm: number_opt(field(data, &["size_sqm"])).map(non_negative),
        amenities: string_list(field(data, &["amenities"])),
        images: string_list(field(data, &["images"])),
        available_count: count(field(data, &["available_count", "available_rooms"])),
    }
}

fn city_ref(data: &Value) -> Option<CityRef> {
    match data {
        Value::String(name) if !name.trim().is_empty() => Some(CityRef {
            name: name.clone(),
            country: DEFAULT_COUNTRY.to_string(),
        }),
        Value::Object(_) => Some(CityRef {
            name: text(field(data, &["name"]))?,
            country: text(field(data, &["country"])).unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
        }),
        _ => None,
    }
}

fn location(data: &Value) -> Option<GeoPoint> {
    let source = field(data, &["location", "coordinates"])
        .filter(|v| v.is_object())
        .unwrap_or(data);
    let latitude = number_opt(field(source, &["latitude", "lat"]))?;
    let longitude = number_opt(field(source, &["longitude", "lng", "lon"]))?;
    Some(GeoPoint { latitude, longitude })
}

fn policies(data: &Value) -> Option<HotelPolicies> {
    if !data.is_object() {
        return None;
    }
    let get = |names: &[&str]| text(field(data, names)).unwrap_or_default();
    Some(HotelPolicies {
        check_in: get(&["check_in", "checkIn"]),
        check_out: get(&["check_out", "checkOut"]),
        cancellation: get(&["cancellation"]),
        children: get(&["children"]),
        pets: get(&["pets"]),
        smoking: get(&["smoking"]),
    })
}

/// Canonical review from a stored review document
pub fn normalize_review(hotel_id: &str, doc: &Document) -> HotelReview {
    let data = &doc.data;
    HotelReview {
        id: doc.id.clone(),
        hotel_id: hotel_id.to_string(),
        author_name: text(field(data, &["user_name", "author_name", "userName", "guest_name"]))
            .unwrap_or_else(|| "Guest".to_string()),
        author_country: text(field(data, &["user_country", "author_country", "country"])),
        rating: number(field(data, &["rating"])).clamp(0.0, 5.0) as f32,
        comment: text(field(data, &["comment", "review_text", "text"])).unwrap_or_default(),
        created_at: timestamp(field(data, &["created_at", "createdAt", "date"])).unwrap_or_default(),
        verified: boolean(field(data, &["is_verified", "verified"])),
        helpful_count: count(field(data, &["helpful_count", "helpful"])),
    }
}

/// Canonical cross-sell from a package document and its (optional) linked tour
pub fn normalize_cross_sell(package: &Document, tour: Option<&Document>) -> TourPackageCrossSell {
    let data = &package.data;
    TourPackageCrossSell {
        id: package.id.clone(),
        package_name: text(field(data, &["package_name", "name", "title"]))
            .unwrap_or_else(|| "Tour Package".to_string()),
        discount_percentage: amount(field(data, &["discount_percentage", "discount"])).min(100.0),
        package_price: number_opt(field(data, &["package_price", "price"])).map(non_negative),
        tour: tour.map(|t| TourSummary {
            title: text(field(&t.data, &["title", "name"])).unwrap_or_default(),
            duration_days: count(field(&t.data, &["duration_days", "duration"])),
            difficulty: text(field(&t.data, &["difficulty", "difficulty_level"])),
        }),
    }
}
