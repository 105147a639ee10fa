//! Request handler module
//!
//! Responsible for request routing dispatch and the per-route business logic.
//! Every handler validates its inputs first and returns `Result<HttpResponse, ApiError>`.

mod body;
mod files;
mod items;
mod ml_models;
pub mod router;

use crate::error::ApiError;
use crate::http::{self, HttpResponse, QueryParams};
use crate::routing::PathParams;
use hyper::body::Bytes;
use hyper::StatusCode;
use serde::Serialize;

// Re-export main entry point
pub use router::handle_request;

/// Everything a route handler may read from the request
pub struct RequestInput {
    pub params: PathParams,
    pub query: QueryParams,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Serialize a handler result into a 200 JSON response
fn respond<T: Serialize>(body: &T) -> Result<HttpResponse, ApiError> {
    let value = serde_json::to_value(body)
        .map_err(|e| ApiError::Server(format!("failed to serialize response: {e}")))?;
    Ok(http::json_response(StatusCode::OK, &value))
}
