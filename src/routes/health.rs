//! Healthcheck route.

use crate::{
    app_state::AppState,
    error::AppResult,
    setups::{OtpStore, ServerSetup},
};
use axum::{self, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

/// A healthcheck response containing diagnostic information for the service
#[derive(ToSchema, Eq, PartialEq, Debug, Deserialize, Serialize)]
pub struct HealthcheckResponse {
    otp_store_reachable: bool,
}

impl HealthcheckResponse {
    /// Whether the service is healthy
    pub fn is_healthy(&self) -> bool {
        self.otp_store_reachable
    }

    /// The status code for the healthcheck response
    pub fn status_code(&self) -> StatusCode {
        if self.is_healthy() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// GET handler for checking service health.
#[utoipa::path(
    get,
    path = "/healthcheck",
    responses(
        (status = 200, description = "otp-server healthy", body=HealthcheckResponse),
        (status = 503, description = "otp-server not healthy", body=HealthcheckResponse)
    )
)]
pub async fn healthcheck<S: ServerSetup>(
    State(state): State<AppState<S>>,
) -> AppResult<(StatusCode, axum::Json<serde_json::Value>)> {
    // a read on a reserved key exercises the whole store path
    let otp_store_reachable = state.otp_store.get("healthcheck@invalid").await.is_ok();

    let response = HealthcheckResponse {
        otp_store_reachable,
    };

    Ok((response.status_code(), axum::Json(json! { response })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{route_builder::RouteBuilder, test_context::TestContext};
    use http::Method;
    use testresult::TestResult;

    #[test_log::test(tokio::test)]
    async fn test_healthcheck_ok() -> TestResult {
        let ctx = TestContext::new();

        let (status, body) = RouteBuilder::new(ctx.app(), Method::GET, "/healthcheck")
            .into_json_response::<HealthcheckResponse>()
            .await?;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_healthy());

        Ok(())
    }
}
