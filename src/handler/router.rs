//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for probes, size checks,
//! route resolution, body collection, dispatch and the access log.

use super::{files, items, ml_models, respond, RequestInput};
use crate::config::{AppState, HealthConfig};
use crate::error::ApiError;
use crate::http::{self, HttpResponse, QueryParams};
use crate::logger::{self, AccessLogEntry};
use crate::routing::{allow_header, Resolution, RouteId};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
use hyper::http::request::Parts;
use hyper::{HeaderMap, Method, Request};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<HttpResponse, Infallible>
where
    B: Body<Data = Bytes> + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let entry = state
        .config
        .logging
        .access_log
        .then(|| AccessLogEntry::from_request(peer_addr, &parts));

    let response = route_request(&parts, body, &state).await;

    let http_config = &state.config.http;
    let response = http::finalize_response(
        response,
        &http_config.server_name,
        http_config.enable_cors,
        parts.method == Method::HEAD,
    );

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = http::body_len(response.body());
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path and method
async fn route_request<B>(parts: &Parts, body: B, state: &AppState) -> HttpResponse
where
    B: Body<Data = Bytes> + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let path = parts.uri.path();
    let config = &state.config;

    // 0. Health check endpoints (highest priority, always fast)
    if let Some(resp) = check_health(&parts.method, path, &config.health) {
        return resp;
    }

    // 1. Declared body size
    if let Some(resp) = check_body_size(&parts.headers, config.http.max_body_size) {
        return resp;
    }

    // 2. Preflight
    if parts.method == Method::OPTIONS {
        let allowed = state.routes.allowed_methods(path);
        if allowed.is_empty() {
            return http::build_404_response();
        }
        return http::build_options_response(&allow_header(&allowed), config.http.enable_cors);
    }

    // 3. Resolve route
    let (route_id, params) = match state.routes.resolve(&parts.method, path) {
        Resolution::Found { route, params } => {
            tracing::trace!(pattern = route.pattern, "Route matched");
            (route.id, params)
        }
        Resolution::MethodNotAllowed { allow } => {
            tracing::debug!(method = %parts.method, path, "Method not allowed");
            return http::build_405_response(&allow_header(&allow));
        }
        Resolution::Redirect { path: target } => {
            let location = match parts.uri.query() {
                Some(query) => format!("{target}?{query}"),
                None => target,
            };
            return http::build_redirect_response(&location);
        }
        Resolution::NotFound => return http::build_404_response(),
    };

    // 4. Collect body, enforcing the size limit for bodies without Content-Length
    let limit = usize::try_from(config.http.max_body_size).unwrap_or(usize::MAX);
    let body = match Limited::new(body, limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            tracing::warn!(path, limit, "Request body exceeded limit");
            return http::build_413_response();
        }
        Err(e) => {
            return ApiError::BadRequest(format!("failed to read request body: {e}"))
                .into_response();
        }
    };

    let input = RequestInput {
        params,
        query: QueryParams::parse(parts.uri.query()),
        content_type: parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
        body,
    };

    // 5. Dispatch
    dispatch(route_id, &input, state).await.unwrap_or_else(|err| {
        log_api_error(&parts.method, path, &err);
        err.into_response()
    })
}

async fn dispatch(
    route: RouteId,
    input: &RequestInput,
    state: &AppState,
) -> Result<HttpResponse, ApiError> {
    match route {
        RouteId::Predict => files::upload(input).await,
        RouteId::CreateItem => items::create_item(input),
        RouteId::UpdateItem => items::update_item(input),
        RouteId::UpdateModel => ml_models::update_model(input),
        RouteId::Root => respond(&serde_json::json!({ "message": "Hello World" })),
        RouteId::GetItem => items::get_item(input),
        RouteId::GetModel => ml_models::get_model_info(input),
        RouteId::ReadFile => files::read_file(input, &state.config.data.base_dir).await,
        RouteId::ListItems => items::list_item_names(input),
    }
}

/// Liveness and readiness probes answer GET/HEAD before any route
fn check_health(method: &Method, path: &str, health: &HealthConfig) -> Option<HttpResponse> {
    if !health.enabled || !(*method == Method::GET || *method == Method::HEAD) {
        return None;
    }
    if path == health.liveness_path || path == health.readiness_path {
        return Some(http::build_health_response("ok"));
    }
    None
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Option<HttpResponse> {
    let content_length = headers.get(CONTENT_LENGTH)?;
    content_length.to_str().map_or_else(
        |_| {
            tracing::warn!("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                tracing::warn!(size, max_body_size, "Request body too large");
                Some(http::build_413_response())
            }
            Err(_) => {
                tracing::warn!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                );
                None
            }
            _ => None,
        },
    )
}

fn log_api_error(method: &Method, path: &str, err: &ApiError) {
    if err.status().is_server_error() {
        tracing::error!(%method, path, "{err}");
    } else {
        tracing::debug!(%method, path, status = err.status().as_u16(), "{err}");
    }
}
