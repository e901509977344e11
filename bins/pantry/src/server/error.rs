//! JSON error responses

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pantry_core::Error;
use pantry_inventory::InventoryError;
use serde::Serialize;
use tracing::error;

/// Handler error rendered as `{ code, message, suggestion? }`
#[derive(Debug)]
pub struct AppError(pub Error);

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: pantry_core::ErrorCode,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<&'a str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(code = %self.0.code, error = %self.0, "Request failed");
        }
        let body = ErrorBody {
            code: self.0.code,
            message: &self.0.message,
            suggestion: self.0.suggestion.as_deref(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        Self(err.into())
    }
}

/// Handler result
pub type AppResult<T> = Result<T, AppError>;
