use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use sessioncache::SessionCache;
use ureq::http::Response;
use ureq::Body;
use url::Url;

use crate::data_mgmt::attributes_to_map;
use crate::data_mgmt::models::{Action, ActionRequest, TelemetryPoint, ValidatedRequest};
use crate::helpers::now_epoch_ms;
use crate::interfaces::http_api::{UpstreamClient, Verb};

use super::config::Config;
use super::{Authenticator, ProxyError, Stage};

/// Runs one action request: validate, authenticate, call upstream, reshape.
pub struct Dispatcher {
    auth: Authenticator,
    client: UpstreamClient,
}

impl Dispatcher {
    pub fn new(config: &Config, cache: Arc<SessionCache>) -> Self {
        let client = UpstreamClient::new(config.host.clone());
        let auth = Authenticator::new(cache, client.clone(), config.credentials.clone());
        Dispatcher { auth, client }
    }

    pub fn handle_body(&self, body: &[u8]) -> Result<Value, ProxyError> {
        let request = ActionRequest::from_slice(body)?;
        self.dispatch(&request)
    }

    pub fn dispatch(&self, request: &ActionRequest) -> Result<Value, ProxyError> {
        // Validation happens before any login attempt
        let ValidatedRequest { action, device_id } = request.validate()?;
        let token = self.auth.ensure_token()?;

        log::debug!("Dispatching '{action}' for device {device_id}");
        match action {
            Action::Telemetry => self.fetch_telemetry(&token, &device_id),
            Action::Attrs => self.fetch_attributes(&token, &device_id),
            Action::Flush => self.flush(&token, &device_id),
        }
    }

    fn fetch_telemetry(&self, token: &str, device_id: &str) -> Result<Value, ProxyError> {
        let url = self.client.timeseries_url(device_id, now_epoch_ms())?;
        let mut resp = self.call(Stage::Telemetry, Verb::Get, &url, token)?;
        read_json(&mut resp, Stage::Telemetry)
    }

    fn fetch_attributes(&self, token: &str, device_id: &str) -> Result<Value, ProxyError> {
        let url = self.client.attributes_url(device_id)?;
        let mut resp = self.call(Stage::Attributes, Verb::Get, &url, token)?;
        let records: Vec<TelemetryPoint> = read_json(&mut resp, Stage::Attributes)?;
        serde_json::to_value(attributes_to_map(records))
            .map_err(|e| ProxyError::Internal(e.to_string()))
    }

    fn flush(&self, token: &str, device_id: &str) -> Result<Value, ProxyError> {
        let url = self.client.delete_timeseries_url(device_id)?;
        self.call(Stage::Flush, Verb::Delete, &url, token)?;
        log::info!("Flushed location time-series for device {device_id}");
        Ok(json!({ "ok": true }))
    }

    fn call(
        &self,
        stage: Stage,
        verb: Verb,
        url: &Url,
        token: &str,
    ) -> Result<Response<Body>, ProxyError> {
        let resp = self.client.send_authorized(verb, url, token)?;
        let status = resp.status();
        if !status.is_success() {
            log::warn!("{stage} failed with upstream status {}", status.as_u16());
            return Err(ProxyError::UpstreamCall {
                stage,
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }
}

fn read_json<T: DeserializeOwned>(resp: &mut Response<Body>, stage: Stage) -> Result<T, ProxyError> {
    resp.body_mut()
        .read_json::<T>()
        .map_err(|e| ProxyError::Internal(format!("{stage}: unexpected upstream response: {e}")))
}
