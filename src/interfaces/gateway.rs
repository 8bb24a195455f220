//! Inbound HTTP surface of the proxy.
//!
//! A single route accepts action requests as JSON `POST`s and answers CORS
//! preflights. Dispatching is blocking, so each request runs on tokio's
//! blocking pool.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{middleware, Json, Router};
use tokio::net::TcpListener;

use crate::constants::paths;
use crate::proxy_mgmt::{Dispatcher, ProxyError};

#[derive(Clone)]
pub struct GatewayState {
    dispatcher: Arc<Dispatcher>,
}

pub fn build_router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route(paths::HEALTH, get(|| async { "ok" }))
        .route(paths::GATEWAY, any(handle_action))
        .with_state(GatewayState { dispatcher })
        .layer(middleware::map_response(add_cors_headers))
}

pub async fn serve(addr: SocketAddr, dispatcher: Arc<Dispatcher>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{addr}{}", paths::GATEWAY);
    axum::serve(listener, build_router(dispatcher)).await?;
    Ok(())
}

async fn handle_action(
    State(state): State<GatewayState>,
    method: Method,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    if method != Method::POST {
        return error_response(&ProxyError::MethodNotAllowed);
    }

    let dispatcher = state.dispatcher.clone();
    let result = tokio::task::spawn_blocking(move || dispatcher.handle_body(&body))
        .await
        .unwrap_or_else(|e| Err(ProxyError::Internal(format!("dispatch task failed: {e}"))));

    match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(err) => error_response(&err),
    }
}

fn error_response(err: &ProxyError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        log::error!("Request failed ({}): {}", status.as_u16(), err);
    } else {
        log::warn!("Request failed ({}): {}", status.as_u16(), err);
    }
    (status, Json(err.to_body())).into_response()
}

async fn add_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}
