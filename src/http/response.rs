//! HTTP response building module
//!
//! Provides builders for the JSON responses and status codes the service emits.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_LENGTH, SERVER};
use hyper::{Response, StatusCode};
use serde::Serialize;

pub type HttpResponse = Response<Full<Bytes>>;

const JSON: &str = "application/json";

/// Build JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize response");
            return build_detail_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            );
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", JSON)
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// `{"detail": "..."}` error body
pub fn build_detail_response(status: StatusCode, detail: &str) -> HttpResponse {
    let body = serde_json::json!({ "detail": detail }).to_string();
    Response::builder()
        .status(status)
        .header("Content-Type", JSON)
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> HttpResponse {
    build_detail_response(StatusCode::NOT_FOUND, "Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(allow: &str) -> HttpResponse {
    let mut response = build_detail_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    if let Ok(value) = HeaderValue::from_str(allow) {
        response.headers_mut().insert("Allow", value);
    }
    response
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> HttpResponse {
    build_detail_response(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(allow: &str, enable_cors: bool) -> HttpResponse {
    let mut builder = Response::builder().status(204).header("Allow", allow);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Methods", allow)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 307 redirect response, preserving method and body
pub fn build_redirect_response(target: &str) -> HttpResponse {
    Response::builder()
        .status(307)
        .header("Location", target)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("307", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build health check response
pub fn build_health_response(status: &str) -> HttpResponse {
    json_response(StatusCode::OK, &serde_json::json!({ "status": status }))
}

/// Add the headers every response carries and drop the body for HEAD
pub fn finalize_response(
    mut response: HttpResponse,
    server_name: &str,
    enable_cors: bool,
    is_head: bool,
) -> HttpResponse {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(server_name) {
        headers.insert(SERVER, value);
    }
    if enable_cors {
        headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    }

    if is_head {
        let (mut parts, body) = response.into_parts();
        let length = body_len(&body);
        parts.headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
        return Response::from_parts(parts, Full::new(Bytes::new()));
    }
    response
}

/// Exact size of a buffered body
pub fn body_len(body: &Full<Bytes>) -> u64 {
    use hyper::body::Body;
    body.size_hint().exact().unwrap_or(0)
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    tracing::error!(error = %error, "failed to build {status} response");
}
