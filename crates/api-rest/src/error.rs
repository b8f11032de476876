//! HTTP error mapping.
//!
//! Every failure leaves the service as `{"error": "..."}` JSON. Validation messages are shown to
//! the user verbatim; internal causes are logged and replaced with a generic message.

use api_shared::ErrorRes;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use receita_core::CoreError;

/// Message returned for malformed request bodies.
pub const BAD_REQUEST_MESSAGE: &str = "Requisição inválida";

/// Message returned for any server-side failure.
pub const RENDER_FAILED_MESSAGE: &str = "Erro ao gerar PDF";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Validation(CoreError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        if err.is_validation() {
            ApiError::Validation(err)
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    // The rejection text quotes the offending value, which may be a patient name or CPF, so
    // only its kind is kept.
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::JsonDataError(_) => "body does not match the request shape",
            JsonRejection::JsonSyntaxError(_) => "body is not valid JSON",
            JsonRejection::MissingJsonContentType(_) => "missing JSON content type",
            JsonRejection::BytesRejection(_) => "body could not be read",
            _ => "unreadable body",
        };
        ApiError::BadRequest(format!("{} ({})", kind, rejection.status()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(detail) => {
                tracing::warn!("Rejected request body: {}", detail);
                (StatusCode::BAD_REQUEST, BAD_REQUEST_MESSAGE.to_string())
            }
            ApiError::Validation(err) => {
                tracing::warn!("Validation failed: {}", err);
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    RENDER_FAILED_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorRes::new(message))).into_response()
    }
}
