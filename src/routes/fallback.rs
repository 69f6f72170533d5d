//! Fallback route.

use crate::error::{AppError, ErrorResponse};
use axum::{http::StatusCode, Json};

/// 404 handler, in the JSON API error response format.
pub async fn notfound_404() -> (StatusCode, Json<ErrorResponse>) {
    let err = AppError::new(StatusCode::NOT_FOUND, Some("Route not found"));
    (StatusCode::NOT_FOUND, Json(err.into()))
}
