//! Request error taxonomy and its mapping to HTTP responses

use crate::http::{self, HttpResponse};
use crate::validation::ValidationErrors;
use hyper::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("{path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal server error: {0}")]
    Server(String),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Parse { .. } | Self::Io { .. } | Self::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn into_response(self) -> HttpResponse {
        let status = self.status();
        let message = self.to_string();
        match self {
            Self::Validation(errors) => http::json_response(status, &errors),
            Self::NotFound(_) | Self::BadRequest(_) => {
                http::build_detail_response(status, &message)
            }
            // Server-side detail stays in the log
            Self::Parse { .. } | Self::Io { .. } | Self::Server(_) => {
                http::build_detail_response(status, "Internal Server Error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{ErrorKind, FieldError, Location};
    use http_body_util::BodyExt;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_422_detail_list() {
        let err = ApiError::from(ValidationErrors::from(FieldError::new(
            Location::Path,
            "model_id",
            ErrorKind::Lt(10),
        )));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["detail"][0]["loc"], serde_json::json!(["path", "model_id"]));
        assert_eq!(body["detail"][0]["type"], "value_error.number.not_lt");
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let response = ApiError::NotFound("files/models.json".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await["detail"],
            "file not found: files/models.json"
        );
    }

    #[tokio::test]
    async fn test_parse_error_hides_detail() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::Parse {
            path: "files/models.json".to_string(),
            source,
        };
        assert!(err.to_string().contains("not valid JSON"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["detail"], "Internal Server Error");
    }

    #[tokio::test]
    async fn test_server_error_maps_to_500() {
        let err = ApiError::Server("failed to serialize response".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(err.into_response()).await["detail"], "Internal Server Error");
    }
}
