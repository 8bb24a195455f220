use std::fmt;

use serde_json::{json, Value};
use thiserror::Error;

/// Upstream action that produced a failed call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Telemetry,
    Attributes,
    Flush,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Telemetry => "Telemetry fetch",
            Stage::Attributes => "Attr fetch",
            Stage::Flush => "Flush",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    Validation(&'static str),
    #[error("Server misconfigured: TB_USER or TB_PASS not set in environment variables")]
    MissingCredentials,
    #[error("Login error: upstream auth failed ({status}): {detail}")]
    UpstreamAuth { status: u16, detail: String },
    #[error("{stage} failed")]
    UpstreamCall { stage: Stage, status: u16 },
    #[error("Network error: {0}")]
    Network(String),
    #[error("{0}")]
    Internal(String),
}

impl ProxyError {
    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::MethodNotAllowed => 405,
            ProxyError::Validation(_) => 400,
            ProxyError::UpstreamCall { status, .. } => *status,
            ProxyError::MissingCredentials
            | ProxyError::UpstreamAuth { .. }
            | ProxyError::Network(_)
            | ProxyError::Internal(_) => 500,
        }
    }

    pub fn to_body(&self) -> Value {
        match self {
            ProxyError::UpstreamCall { status, .. } => {
                json!({ "error": self.to_string(), "status": status })
            }
            _ => json!({ "error": self.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_call_relays_status() {
        let err = ProxyError::UpstreamCall {
            stage: Stage::Telemetry,
            status: 404,
        };
        assert_eq!(err.status_code(), 404);
        assert_eq!(
            err.to_body(),
            json!({"error": "Telemetry fetch failed", "status": 404})
        );
    }

    #[test]
    fn test_stage_messages() {
        let attrs = ProxyError::UpstreamCall {
            stage: Stage::Attributes,
            status: 500,
        };
        let flush = ProxyError::UpstreamCall {
            stage: Stage::Flush,
            status: 403,
        };
        assert_eq!(attrs.to_string(), "Attr fetch failed");
        assert_eq!(flush.to_string(), "Flush failed");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ProxyError::MethodNotAllowed.status_code(), 405);
        assert_eq!(ProxyError::Validation("Missing action").status_code(), 400);
        assert_eq!(ProxyError::MissingCredentials.status_code(), 500);
        assert_eq!(ProxyError::Network("reset".into()).status_code(), 500);
        let auth = ProxyError::UpstreamAuth {
            status: 401,
            detail: "Check credentials".into(),
        };
        assert_eq!(auth.status_code(), 500);
        assert_eq!(
            auth.to_body(),
            json!({"error": "Login error: upstream auth failed (401): Check credentials"})
        );
    }
}
