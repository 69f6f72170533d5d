//! OpenAPI doc generation.

use crate::{
    error::AppError,
    routes::{health, otp, ping},
};
use utoipa::OpenApi;

/// API documentation generator.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck,
        ping::get,
        otp::send_otp,
        otp::verify_otp,
    ),
    components(
        schemas(
            AppError,
            otp::SendOtpRequest,
            otp::VerifyOtpRequest,
            otp::SendOtpResponse,
            otp::VerifyOtpResponse,
            health::HealthcheckResponse
        )
    )
)]

/// Tied to OpenAPI documentation.
#[derive(Debug)]
pub struct ApiDoc;
