//! Helpers for running isolated webserver instances
use crate::{
    app_state::{AppState, AppStateBuilder},
    router::setup_app_router,
    settings,
    setups::{
        prod::InMemoryOtpStore,
        test::{TestCodeSender, TestSetup},
    },
};
use axum::Router;

/// A reference to a running otp-server in an isolated test environment
#[derive(Debug)]
pub(crate) struct TestContext {
    app: Router,
    app_state: AppState<TestSetup>,
}

impl TestContext {
    /// Create a new test context
    pub(crate) fn new() -> Self {
        Self::new_with_state(|builder| builder)
    }

    pub(crate) fn new_with_state<F>(f: F) -> Self
    where
        F: FnOnce(AppStateBuilder<TestSetup>) -> AppStateBuilder<TestSetup>,
    {
        let builder = AppStateBuilder::default()
            .with_otp_settings(settings::Otp {
                code_ttl_seconds: 300,
            })
            .with_otp_store(InMemoryOtpStore::default())
            .with_code_sender(TestCodeSender::default());

        let app_state = f(builder).finalize().unwrap();

        let app = setup_app_router(app_state.clone());

        Self { app, app_state }
    }

    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    pub(crate) fn otp_store(&self) -> &InMemoryOtpStore {
        &self.app_state.otp_store
    }

    pub(crate) fn code_sender(&self) -> &TestCodeSender {
        &self.app_state.code_sender
    }
}
