//! otp-server

use anyhow::Result;
use axum::Router;
use axum_server::Handle;
use otp_server::{
    app_state::AppStateBuilder,
    docs::ApiDoc,
    router,
    settings::Settings,
    setups::prod::{InMemoryOtpStore, MailgunCodeSender, ProdSetup},
};
use std::{
    io,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    process::exit,
    time::Duration,
};
use tokio::signal::{
    self,
    unix::{signal, SignalKind},
};
use tokio_util::sync::CancellationToken;
use tower_http::{
    catch_panic::CatchPanicLayer, sensitive_headers::SetSensitiveHeadersLayer,
    timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, prelude::*};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<()> {
    let (stdout_writer, _stdout_guard) = tracing_appender::non_blocking(io::stdout());

    let settings = Settings::load(None)?;

    setup_tracing(stdout_writer);

    info!(
        subject = "app_settings",
        category = "init",
        "starting with settings: {:?}",
        settings,
    );

    let cancellation_token = CancellationToken::new();

    let app_server = tokio::spawn(serve_app(settings, cancellation_token.clone()));

    tokio::spawn(async move {
        capture_sigterm().await;

        cancellation_token.cancel();
        println!("\nCtrl+C received, shutting down. Press Ctrl+C again to force shutdown.");

        capture_sigterm().await;

        exit(130)
    });

    app_server.await??;

    Ok(())
}

async fn serve_app(settings: Settings, token: CancellationToken) -> Result<()> {
    let app_state = AppStateBuilder::<ProdSetup>::default()
        .with_otp_settings(settings.otp.clone())
        .with_otp_store(InMemoryOtpStore::default())
        .with_code_sender(MailgunCodeSender::new(settings.mailgun.clone()))
        .finalize()?;

    let router = router::setup_app_router(app_state)
        // Request/response logging.
        .layer(TraceLayer::new_for_http())
        // Applies the `tower_http::timeout::Timeout` middleware which
        // applies a timeout to requests.
        .layer(TimeoutLayer::new(Duration::from_millis(
            settings.server.timeout_ms,
        )))
        // Catches runtime panics and converts them into
        // `500 Internal Server` responses.
        .layer(CatchPanicLayer::new())
        // Mark headers as sensitive on both requests and responses.
        .layer(SetSensitiveHeadersLayer::new([http::header::AUTHORIZATION]))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    let (server, _addr) = serve("Application", router, settings.server.port).await;

    token.cancelled().await;
    server.graceful_shutdown(None);

    Ok(())
}

async fn serve(name: &str, app: Router, port: u16) -> (Handle, SocketAddr) {
    let bind_addr: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
    info!(
        subject = "app_start",
        category = "init",
        "{} server listening on {}",
        name,
        bind_addr
    );

    let handle = Handle::new();

    tokio::spawn({
        let handle = handle.clone();
        async move {
            axum_server::bind(bind_addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
        }
    });

    let addr = handle.listening().await.unwrap();

    (handle, addr)
}

/// Captures and waits for system signals.
async fn capture_sigterm() {
    #[cfg(unix)]
    let term = async {
        signal(SignalKind::terminate())
            .expect("Failed to listen for SIGTERM")
            .recv()
            .await
    };

    #[cfg(not(unix))]
    let term = std::future::pending::<()>();

    tokio::select! {
        _ = signal::ctrl_c() => {},
        _ = term => {}
    };
}

/// Setup the [tracing][tracing] subscriber for logging.
fn setup_tracing(writer: tracing_appender::non_blocking::NonBlocking) {
    tracing_subscriber::Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    EnvFilter::new("otp_server=info,tower_http=info")
                })),
        )
        .init();
}
