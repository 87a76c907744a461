//! Hand-authored demo hotels, served as an immutable injected data source.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::{CityRef, HotelPolicies};
use crate::error::Result;

const BUILTIN_CATALOG: &str = include_str!("../../data/demo_catalog.json");

static BUILTIN: Lazy<Arc<DemoCatalog>> = Lazy::new(|| {
    Arc::new(DemoCatalog::from_json_str(BUILTIN_CATALOG).expect("built-in demo catalog is valid JSON"))
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoRoom {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_per_night: f64,
    pub max_occupancy: u32,
    pub bed_type: String,
    pub size_sqm: f64,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub available_count: u32,
}

/// Fully detailed entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedDemoHotel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub star_rating: u8,
    pub hotel_type: String,
    pub base_price_per_night: f64,
    pub address: String,
    pub city: CityRef,
    pub amenities: Vec<String>,
    pub average_rating: f64,
    pub review_count: u32,
    pub images: Vec<String>,
    pub room_types: Vec<DemoRoom>,
    pub policies: HotelPolicies,
    pub highlights: Vec<String>,
    pub nearby: Vec<String>,
}

/// Lightly detailed entry; expanded with fixed defaults on lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactDemoHotel {
    pub id: String,
    pub name: String,
    pub city: String,
    pub price: f64,
    pub rating: f64,
    #[serde(rename = "type")]
    pub hotel_type: String,
    pub description: String,
}

/// Either shape of catalog entry, as found
#[derive(Debug, Clone, PartialEq)]
pub enum DemoEntry<'a> {
    Detailed(&'a DetailedDemoHotel),
    Compact(&'a CompactDemoHotel),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemoCatalog {
    pub detailed: Vec<DetailedDemoHotel>,
    pub compact: Vec<CompactDemoHotel>,
}

impl DemoCatalog {
    pub fn new(detailed: Vec<DetailedDemoHotel>, compact: Vec<CompactDemoHotel>) -> Self {
        Self { detailed, compact }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The catalog compiled into the binary
    pub fn builtin() -> Arc<DemoCatalog> {
        Arc::clone(&BUILTIN)
    }

    /// Detailed entries shadow compact ones with the same id.
    pub fn lookup(&self, id: &str) -> Option<DemoEntry<'_>> {
        if let Some(hotel) = self.detailed.iter().find(|h| h.id == id) {
            return Some(DemoEntry::Detailed(hotel));
        }
        self.compact
            .iter()
            .find(|h| h.id == id)
            .map(DemoEntry::Compact)
    }

    pub fn len(&self) -> usize {
        self.detailed.len() + self.compact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
