use std::time::Duration;

pub const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
pub const LOG_LEVEL: &str = "info";
pub const TB_HOST: &str = "https://thingsboard.cloud";
pub const PROXY_ADDR: &str = "0.0.0.0:8080";

// Upstream does not report token lifetime; the proxy assumes one hour
pub const TOKEN_TTL: Duration = Duration::from_secs(3600);
pub const TIMESERIES_LIMIT: u32 = 10000;
