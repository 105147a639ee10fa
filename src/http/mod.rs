//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! individual endpoints: response builders and query string decoding.

pub mod query;
pub mod response;

// Re-export commonly used types
pub use query::QueryParams;
pub use response::{
    body_len, build_404_response, build_405_response, build_413_response,
    build_detail_response, build_health_response, build_options_response,
    build_redirect_response, finalize_response, json_response, HttpResponse,
};
