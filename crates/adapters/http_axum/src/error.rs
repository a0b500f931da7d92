//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use doorbridge_domain::error::BridgeError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    guidance: Option<&'static str>,
}

/// Maps [`BridgeError`] to an HTTP response with appropriate status code.
pub struct ApiError(BridgeError);

impl<E: Into<BridgeError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            BridgeError::Validation(err) => (StatusCode::BAD_REQUEST, plain(err.to_string())),
            BridgeError::NotFound(err) => (StatusCode::NOT_FOUND, plain(err.to_string())),
            BridgeError::Setup(err) => (StatusCode::UNPROCESSABLE_ENTITY, plain(err.to_string())),
            BridgeError::Discovery(err) => {
                tracing::error!(kind = err.kind(), detail = %err.detail(), "discovery failed");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody {
                        error: format!("{err}: {}", err.detail()),
                        kind: Some(err.kind()),
                        guidance: Some(err.guidance()),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

fn plain(error: String) -> ErrorBody {
    ErrorBody {
        error,
        kind: None,
        guidance: None,
    }
}
