use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::proxy_mgmt::ProxyError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Telemetry,
    Attrs,
    Flush,
}

impl Action {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "telemetry" => Some(Action::Telemetry),
            "attrs" => Some(Action::Attrs),
            "flush" => Some(Action::Flush),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Telemetry => "telemetry",
            Action::Attrs => "attrs",
            Action::Flush => "flush",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound request body. Fields other than `action` and `deviceId` are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub action: Option<String>,
    pub device_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub action: Action,
    pub device_id: String,
}

impl ActionRequest {
    pub fn new(action: impl Into<String>, device_id: impl Into<String>) -> Self {
        ActionRequest {
            action: Some(action.into()),
            device_id: Some(device_id.into()),
        }
    }

    /// Parses a raw body. An empty body or JSON `null` is an empty request.
    pub fn from_slice(body: &[u8]) -> Result<Self, ProxyError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ActionRequest::default());
        }
        serde_json::from_slice::<Option<ActionRequest>>(body)
            .map(Option::unwrap_or_default)
            .map_err(|_| ProxyError::Validation("Invalid request body"))
    }

    pub fn validate(&self) -> Result<ValidatedRequest, ProxyError> {
        let raw_action = self
            .action
            .as_deref()
            .filter(|a| !a.is_empty())
            .ok_or(ProxyError::Validation("Missing action"))?;
        let action = Action::parse(raw_action).ok_or(ProxyError::Validation("Unknown action"))?;
        let device_id = self
            .device_id
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or(ProxyError::Validation("Missing deviceId"))?;
        // Dot segments would be dropped from the upstream path
        if matches!(device_id, "." | "..") {
            return Err(ProxyError::Validation("Invalid deviceId"));
        }

        Ok(ValidatedRequest {
            action,
            device_id: device_id.to_string(),
        })
    }
}

/// Attribute record as returned by the upstream platform.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryPoint {
    pub key: String,
    #[serde(default, deserialize_with = "present")]
    pub value: Option<Value>,
    #[serde(default)]
    pub last_update_ts: Option<i64>,
}

/// Fields absent upstream are left out of the reshaped map.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct AttributeValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
}

// Keeps an explicit `null` value distinct from a missing one
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

pub type AttributeMap = BTreeMap<String, AttributeValue>;
