pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

pub const LOCATION_KEYS: [&str; 2] = [LATITUDE, LONGITUDE];

// Comma-joined form used in upstream query strings
pub const LOCATION_KEYS_PARAM: &str = "latitude,longitude";
