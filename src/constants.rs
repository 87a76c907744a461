/// Identifier-shape constants used by the classifier defaults
// Place ids handed out by the external places provider start with this
pub const EXTERNAL_PLACE_PREFIX: &str = "ChIJ";
pub const MAX_DEMO_ID: u32 = 20;
// Store record keys are at most a UUID long
pub const MAX_RECORD_ID_LEN: usize = 36;

pub const DEFAULT_REVIEW_LIMIT: usize = 10;

// Collection names in the document store
pub const HOTELS_COLLECTION: &str = "hotels";
pub const ROOM_TYPES_COLLECTION: &str = "room_types";
pub const HOTEL_IMAGES_COLLECTION: &str = "hotel_images";
pub const CITIES_COLLECTION: &str = "cities";
pub const HOTEL_REVIEWS_COLLECTION: &str = "hotel_reviews";
pub const TOUR_PACKAGES_COLLECTION: &str = "hotel_tour_packages";
pub const TOURS_COLLECTION: &str = "tours";

// Source tags (consistent across logs, metrics and serialized results)
pub const SOURCE_DEMO: &str = "demo";
pub const SOURCE_EXTERNAL: &str = "external";
pub const SOURCE_PERSISTENT: &str = "persistent";
pub const SOURCE_NONE: &str = "none";

pub const DEFAULT_COUNTRY: &str = "Sri Lanka";
