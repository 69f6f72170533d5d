//! Main [axum::Router] interface for webserver.

use crate::{
    app_state::AppState,
    routes::{fallback::notfound_404, health, otp, ping},
    setups::ServerSetup,
};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Setup main router for application.
pub fn setup_app_router<S: ServerSetup + 'static>(app_state: AppState<S>) -> Router {
    let mut router = Router::new()
        .route("/ping", get(ping::get))
        .fallback(notfound_404)
        .with_state(app_state.clone());

    let cors = CorsLayer::new()
        .allow_methods([http::Method::GET, http::Method::POST])
        .allow_headers([http::header::CONTENT_TYPE, http::header::ACCEPT])
        // allow requests from any origin
        .allow_origin(Any);

    let api_router = Router::new()
        .route("/otp/send", post(otp::send_otp::<S>))
        .route("/otp/verify", post(otp::verify_otp::<S>))
        .layer(cors)
        .with_state(app_state.clone())
        .fallback(notfound_404);

    router = router.nest("/api/v0", api_router);

    let healthcheck_router = Router::new()
        .route("/healthcheck", get(health::healthcheck::<S>))
        .with_state(app_state);

    Router::merge(router, healthcheck_router)
}
