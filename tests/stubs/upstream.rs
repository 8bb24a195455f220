#![allow(dead_code)]
// Each test binary only uses some of these fixtures

pub const USERNAME: &str = "tenant@example.com";
pub const PASSWORD: &str = "s3cret-pass";
pub const TOKEN: &str = "tok-integration";
pub const DEVICE_ID: &str = "0f1e2d3c-device";

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const TIMESERIES_PATH: &str =
    r"^/api/plugins/telemetry/DEVICE/0f1e2d3c-device/values/timeseries";
pub const ATTRIBUTES_PATH: &str =
    r"^/api/plugins/telemetry/DEVICE/0f1e2d3c-device/values/attributes/SHARED_SCOPE";
pub const DELETE_PATH: &str = r"^/api/plugins/telemetry/DEVICE/0f1e2d3c-device/timeseries/delete";

pub const LOGIN_RESPONSE: &str = r#"{"token":"tok-integration","refreshToken":"refresh-integration"}"#;

pub const ATTRIBUTES_RESPONSE: &str = r#"[
    {"key": "latitude", "value": 52.3676, "lastUpdateTs": 1700000000000},
    {"key": "longitude", "value": 4.9041, "lastUpdateTs": 1700000000500}
]"#;

pub const TIMESERIES_RESPONSE: &str = r#"{
    "latitude": [{"ts": 1700000000000, "value": "52.3676"}],
    "longitude": [{"ts": 1700000000000, "value": "4.9041"}]
}"#;
