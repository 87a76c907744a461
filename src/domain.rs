use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{SOURCE_DEMO, SOURCE_EXTERNAL, SOURCE_NONE, SOURCE_PERSISTENT};

/// Which backing source an identifier belongs to, judged purely by its shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceCategory {
    CuratedDemo,
    ExternalPlace,
    PersistentRecord,
}

/// Provenance of the entity in a resolution result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    Demo,
    External,
    Persistent,
    None,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Demo => SOURCE_DEMO,
            SourceTag::External => SOURCE_EXTERNAL,
            SourceTag::Persistent => SOURCE_PERSISTENT,
            SourceTag::None => SOURCE_NONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HotelType {
    Budget,
    #[default]
    MiddleRange,
    LuxuryResort,
    Boutique,
    Cabana,
}

impl HotelType {
    /// Lenient parse: any unrecognized value becomes `MiddleRange`.
    pub fn from_raw(raw: &str) -> Self {
        let key: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "budget" => HotelType::Budget,
            "luxuryresort" | "luxury" => HotelType::LuxuryResort,
            "boutique" => HotelType::Boutique,
            "cabana" => HotelType::Cabana,
            _ => HotelType::MiddleRange,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price_per_night: f64,
    pub max_occupancy: u32,
    pub bed_type: Option<String>,
    pub size_sqm: Option<f64>,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub available_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelImage {
    pub url: String,
    pub alt_text: Option<String>,
    pub is_primary: bool,
}

/// Weak reference to the city a hotel sits in; never owned by the hotel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRef {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelPolicies {
    pub check_in: String,
    pub check_out: String,
    pub cancellation: String,
    pub children: String,
    pub pets: String,
    pub smoking: String,
}

/// The single normalized hotel shape every source produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalHotel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub star_rating: u8,
    pub hotel_type: HotelType,
    pub base_price_per_night: f64,
    pub amenities: Vec<String>,
    pub images: Vec<HotelImage>,
    pub room_types: Vec<RoomType>,
    pub city: Option<CityRef>,
    pub location: Option<GeoPoint>,
    pub address: Option<String>,
    pub average_rating: Option<f64>,
    pub review_count: Option<u32>,
    pub policies: Option<HotelPolicies>,
    pub highlights: Vec<String>,
    pub nearby: Vec<String>,
}

impl CanonicalHotel {
    pub fn primary_image(&self) -> Option<&HotelImage> {
        self.images.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelReview {
    pub id: String,
    pub hotel_id: String,
    pub author_name: String,
    pub author_country: Option<String>,
    pub rating: f32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub verified: bool,
    pub helpful_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourSummary {
    pub title: String,
    pub duration_days: u32,
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPackageCrossSell {
    pub id: String,
    pub package_name: String,
    pub discount_percentage: f64,
    pub package_price: Option<f64>,
    pub tour: Option<TourSummary>,
}

/// Terminal state reached by a single resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionOutcome {
    Demo,
    External,
    PersistentHit,
    PersistentMissFallback,
    NotFound,
    Failed,
    Cancelled,
}

impl ResolutionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionOutcome::Demo => "demo",
            ResolutionOutcome::External => "external",
            ResolutionOutcome::PersistentHit => "persistent_hit",
            ResolutionOutcome::PersistentMissFallback => "persistent_miss_fallback",
            ResolutionOutcome::NotFound => "not_found",
            ResolutionOutcome::Failed => "failed",
            ResolutionOutcome::Cancelled => "cancelled",
        }
    }
}

/// Everything the view layer needs for one hotel id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub entity: Option<CanonicalHotel>,
    pub reviews: Vec<HotelReview>,
    pub cross_sell_packages: Vec<TourPackageCrossSell>,
    pub source_tag: SourceTag,
    pub failed: bool,
    pub used_fallback_source: bool,
    pub outcome: ResolutionOutcome,
}

impl ResolutionResult {
    pub fn empty(outcome: ResolutionOutcome) -> Self {
        Self {
            entity: None,
            reviews: Vec::new(),
            cross_sell_packages: Vec::new(),
            source_tag: SourceTag::None,
            failed: outcome == ResolutionOutcome::Failed,
            used_fallback_source: false,
            outcome,
        }
    }

    /// A missing entity is "not found" for the user, never a generic error
    pub fn is_not_found(&self) -> bool {
        self.entity.is_none() && !self.failed
    }
}
