use serde::Serialize;
use ureq::http::Response;
use ureq::tls::{TlsConfig, TlsProvider};
use ureq::Body;
use url::Url;

use crate::constants::{defaults, keys, paths};
use crate::proxy_mgmt::config::Credentials;
use crate::proxy_mgmt::ProxyError;

pub const AUTH_HEADER: &str = "X-Authorization";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    Get,
    Delete,
}

/// Blocking client for the upstream telemetry platform.
///
/// Non-success statuses are returned as regular responses so that callers can
/// decide how to report them.
#[derive(Clone)]
pub struct UpstreamClient {
    agent: ureq::Agent,
    host: Url,
}

fn get_ureq_agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .tls_config(
            TlsConfig::builder()
                .provider(TlsProvider::NativeTls)
                .build(),
        )
        .timeout_global(Some(defaults::API_REQUEST_TIMEOUT))
        .http_status_as_error(false)
        .build()
        .into()
}

impl UpstreamClient {
    pub fn new(host: Url) -> Self {
        UpstreamClient {
            agent: get_ureq_agent(),
            host,
        }
    }

    pub fn host(&self) -> &Url {
        &self.host
    }

    fn endpoint(&self, segments: &[&[&str]]) -> Result<Url, ProxyError> {
        let mut url = self.host.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ProxyError::Internal(format!("upstream host {} is not a base URL", self.host))
            })?;
            path.pop_if_empty();
            for group in segments {
                path.extend(group.iter());
            }
        }
        Ok(url)
    }

    pub fn login_url(&self) -> Result<Url, ProxyError> {
        self.endpoint(&[paths::LOGIN])
    }

    pub fn timeseries_url(&self, device_id: &str, end_ts: i64) -> Result<Url, ProxyError> {
        let mut url = self.endpoint(&[
            paths::TELEMETRY_DEVICE_PREFIX,
            &[device_id],
            paths::TIMESERIES_VALUES,
        ])?;
        url.set_query(Some(&format!(
            "keys={}&startTs=0&endTs={end_ts}&limit={}&agg=NONE&orderBy=ASC",
            keys::LOCATION_KEYS_PARAM,
            defaults::TIMESERIES_LIMIT
        )));
        Ok(url)
    }

    pub fn attributes_url(&self, device_id: &str) -> Result<Url, ProxyError> {
        let mut url = self.endpoint(&[
            paths::TELEMETRY_DEVICE_PREFIX,
            &[device_id],
            paths::SHARED_ATTRIBUTES,
        ])?;
        url.set_query(Some(&format!("keys={}", keys::LOCATION_KEYS_PARAM)));
        Ok(url)
    }

    pub fn delete_timeseries_url(&self, device_id: &str) -> Result<Url, ProxyError> {
        let mut url = self.endpoint(&[
            paths::TELEMETRY_DEVICE_PREFIX,
            &[device_id],
            paths::TIMESERIES_DELETE,
        ])?;
        url.set_query(Some(&format!(
            "keys={}&deleteAllDataForKeys=true",
            keys::LOCATION_KEYS_PARAM
        )));
        Ok(url)
    }

    pub fn post_login(&self, credentials: &Credentials) -> Result<Response<Body>, ProxyError> {
        let url = self.login_url()?;
        log::debug!("POST {url}");
        self.agent
            .post(url.as_str())
            .send_json(LoginRequest {
                username: &credentials.username,
                password: &credentials.password,
            })
            .map_err(|e| ProxyError::Network(format!("login request failed: {e}")))
    }

    pub fn send_authorized(
        &self,
        verb: Verb,
        url: &Url,
        token: &str,
    ) -> Result<Response<Body>, ProxyError> {
        log::debug!("{verb:?} {}", url.path());
        let request = match verb {
            Verb::Get => self.agent.get(url.as_str()),
            Verb::Delete => self.agent.delete(url.as_str()),
        };
        request
            .header(AUTH_HEADER, format!("Bearer {token}"))
            .call()
            .map_err(|e| ProxyError::Network(e.to_string()))
    }
}
