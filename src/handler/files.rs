//! File endpoints: reading the bundled JSON document and multipart upload

use super::{respond, RequestInput};
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::models::FileReference;
use crate::validation::{params, ErrorKind, FieldError, Location, TextEnum, ValidationErrors};
use hyper::body::Bytes;
use serde_json::{json, Value};
use std::path::Path;
use std::time::Instant;

/// Form field carrying the uploaded file
const UPLOAD_FIELD: &str = "data";

/// `GET /readfile/{file_path:path}`
///
/// The reference is resolved against `base_dir` and the file parsed as JSON.
pub async fn read_file(input: &RequestInput, base_dir: &Path) -> Result<HttpResponse, ApiError> {
    let reference: FileReference = params::required_enum(
        Location::Path,
        "file_path",
        input.params.get("file_path"),
    )
    .map_err(ValidationErrors::from)?;

    let relative = reference.as_str();
    let path = base_dir.join(relative);
    let raw = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::NotFound(relative.to_string())
        } else {
            ApiError::Io {
                path: path.display().to_string(),
                source: e,
            }
        }
    })?;

    let content: Value = serde_json::from_slice(&raw).map_err(|e| ApiError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;

    respond(&json!({ "File content": content }))
}

/// `POST /predict/` with a multipart `data` file part
///
/// File content is read to the end and discarded. When `data` is sent more
/// than once the last part is the one answered.
pub async fn upload(input: &RequestInput) -> Result<HttpResponse, ApiError> {
    let boundary = input
        .content_type
        .as_deref()
        .and_then(|ct| multer::parse_boundary(ct).ok())
        .ok_or_else(|| upload_error(ErrorKind::Missing))?;

    let body = input.body.clone();
    let stream = futures::stream::once(async move { Ok::<Bytes, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let started = Instant::now();
    // Outer `None`: no `data` part; inner `None`: the part was plain text
    let mut upload: Option<Option<String>> = None;
    while let Some(mut field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(ToString::to_string);

        let mut size: usize = 0;
        while let Some(chunk) = field.chunk().await.map_err(bad_multipart)? {
            size += chunk.len();
        }
        tracing::debug!(
            file_name = file_name.as_deref().unwrap_or("-"),
            size,
            elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
            "Upload part read"
        );
        upload = Some(file_name);
    }

    match upload {
        Some(Some(file_name)) => respond(&json!({ "file name": file_name })),
        Some(None) => Err(upload_error(ErrorKind::NotUpload)),
        None => Err(upload_error(ErrorKind::Missing)),
    }
}

fn upload_error(kind: ErrorKind) -> ApiError {
    ValidationErrors::from(FieldError::new(Location::Body, UPLOAD_FIELD, kind)).into()
}

fn bad_multipart(err: multer::Error) -> ApiError {
    ApiError::BadRequest(format!("invalid multipart body: {err}"))
}
