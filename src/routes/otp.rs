//! Email OTP routes.

use crate::{
    app_state::AppState,
    error::{AppError, AppResult},
    models::email_otp,
    setups::{CodeSender, ServerSetup},
};
use axum::{
    self,
    extract::{Json, State},
    http::StatusCode,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for [`send_otp`]
#[derive(Deserialize, Serialize, Clone, Debug, ToSchema)]
pub struct SendOtpRequest {
    /// Address the passcode is delivered to
    pub email: Option<String>,
}

/// Request body for [`verify_otp`]
#[derive(Deserialize, Serialize, Clone, Debug, ToSchema)]
pub struct VerifyOtpRequest {
    /// Address a passcode was issued for
    pub email: Option<String>,
    /// The passcode the user entered
    pub code: Option<String>,
}

/// Response for [`send_otp`]
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SendOtpResponse {
    /// Whether the passcode was delivered
    pub success: bool,
}

/// Response for [`verify_otp`]
///
/// Negative verdicts are ordinary successful responses carrying a
/// message, not errors. Callers branch on `success`.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct VerifyOtpResponse {
    /// Whether the passcode matched
    pub success: bool,
    /// Why the passcode didn't match, if it didn't
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Reject missing or empty required fields with an invalid-argument error.
fn require<'a>(field: &'a Option<String>, description: &str) -> Result<&'a str, AppError> {
    match field.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::new(StatusCode::BAD_REQUEST, Some(description))),
    }
}

/// POST handler for issuing a new passcode and emailing it
#[utoipa::path(
    post,
    path = "/api/v0/otp/send",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "Successfully sent passcode", body=SendOtpResponse),
        (status = 400, description = "Invalid request", body=AppError),
        (status = 500, description = "Email delivery failed", body=AppError)
    )
)]
pub async fn send_otp<S: ServerSetup>(
    State(state): State<AppState<S>>,
    Json(request): Json<SendOtpRequest>,
) -> AppResult<(StatusCode, Json<SendOtpResponse>)> {
    let email = require(&request.email, "Email is required")?;

    let ttl = Duration::seconds(state.otp_settings.code_ttl_seconds as i64);
    let record = email_otp::issue(&state.otp_store, email, ttl, Utc::now()).await?;

    // The record is stored before delivery is attempted and stays in
    // place if delivery fails, matching the issuance contract.
    state
        .code_sender
        .send_code(email, &record.code)
        .await
        .map_err(|err| {
            tracing::error!(%err, email, "failed to deliver passcode email");
            AppError::new(StatusCode::INTERNAL_SERVER_ERROR, Some("Failed to send email"))
        })?;

    tracing::info!(email, "passcode issued");

    Ok((StatusCode::OK, Json(SendOtpResponse { success: true })))
}

/// POST handler for checking a user-entered passcode
#[utoipa::path(
    post,
    path = "/api/v0/otp/verify",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Verdict on the submitted passcode", body=VerifyOtpResponse),
        (status = 400, description = "Invalid request", body=AppError)
    )
)]
pub async fn verify_otp<S: ServerSetup>(
    State(state): State<AppState<S>>,
    Json(request): Json<VerifyOtpRequest>,
) -> AppResult<(StatusCode, Json<VerifyOtpResponse>)> {
    let email = require(&request.email, "Email and code are required")?;
    let code = require(&request.code, "Email and code are required")?;

    let outcome = email_otp::verify(&state.otp_store, email, code, Utc::now()).await?;

    tracing::debug!(email, ?outcome, "verification attempt");

    Ok((
        StatusCode::OK,
        Json(VerifyOtpResponse {
            success: outcome.is_success(),
            message: outcome.message().map(String::from),
        }),
    ))
}
