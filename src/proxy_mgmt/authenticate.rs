use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Deserialize;
use sessioncache::SessionCache;

use crate::constants::defaults;
use crate::interfaces::http_api::UpstreamClient;

use super::config::Credentials;
use super::ProxyError;

const EMPTY_AUTH_BODY_HINT: &str = "Check credentials";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Hands out a usable upstream token, logging in only when the cache is stale.
///
/// Refreshes are single-flight: callers that find the cache stale queue on
/// `refresh_guard`, and whoever gets it after a successful login picks the new
/// token up from the cache instead of logging in again.
pub struct Authenticator {
    cache: Arc<SessionCache>,
    client: UpstreamClient,
    credentials: Option<Credentials>,
    token_ttl: Duration,
    refresh_guard: Mutex<()>,
}

impl Authenticator {
    pub fn new(
        cache: Arc<SessionCache>,
        client: UpstreamClient,
        credentials: Option<Credentials>,
    ) -> Self {
        Authenticator {
            cache,
            client,
            credentials,
            token_ttl: defaults::TOKEN_TTL,
            refresh_guard: Mutex::new(()),
        }
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub fn ensure_token(&self) -> Result<String, ProxyError> {
        if let Some(token) = self.cache.get() {
            log::debug!("Using cached session token");
            return Ok(token);
        }

        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ProxyError::MissingCredentials)?;

        let _guard = self
            .refresh_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another caller may have refreshed while we waited
        if let Some(token) = self.cache.get() {
            log::debug!("Session token refreshed by concurrent request");
            return Ok(token);
        }

        let token = self.login(credentials)?;
        self.cache.set(token.clone(), self.token_ttl);
        Ok(token)
    }

    fn login(&self, credentials: &Credentials) -> Result<String, ProxyError> {
        log::info!("Logging in to {}", self.client.host());
        let mut resp = self.client.post_login(credentials)?;
        let status = resp.status();

        if !status.is_success() {
            // A failure to read the body must not hide the status
            let body = resp.body_mut().read_to_string().unwrap_or_default();
            let detail = match body.trim() {
                "" => EMPTY_AUTH_BODY_HINT.to_string(),
                text => text.to_string(),
            };
            log::warn!("Upstream rejected login with status {}", status.as_u16());
            return Err(ProxyError::UpstreamAuth {
                status: status.as_u16(),
                detail,
            });
        }

        let login: LoginResponse = resp.body_mut().read_json().map_err(|e| {
            ProxyError::Internal(format!("Login error: unexpected login response: {e}"))
        })?;
        if login.token.is_empty() {
            return Err(ProxyError::Internal(
                "Login error: upstream returned an empty token".to_string(),
            ));
        }

        log::info!("Obtained new session token");
        Ok(login.token)
    }
}
