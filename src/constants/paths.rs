pub const LOGIN: &[&str] = &["api", "auth", "login"];

pub const TELEMETRY_DEVICE_PREFIX: &[&str] = &["api", "plugins", "telemetry", "DEVICE"];
pub const TIMESERIES_VALUES: &[&str] = &["values", "timeseries"];
pub const SHARED_ATTRIBUTES: &[&str] = &["values", "attributes", "SHARED_SCOPE"];
pub const TIMESERIES_DELETE: &[&str] = &["timeseries", "delete"];

pub const GATEWAY: &str = "/api/tb";
pub const HEALTH: &str = "/health";
