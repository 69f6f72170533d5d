//! The Axum Application State

use crate::{settings, setups::ServerSetup};
use anyhow::{anyhow, Result};
use std::{fmt::Debug, sync::Arc};

#[derive(Clone)]
/// Global application route state.
pub struct AppState<S: ServerSetup> {
    /// Passcode issuance settings loaded from env variables & the settings.toml file
    pub otp_settings: Arc<settings::Otp>,
    /// Storage for outstanding passcodes
    pub otp_store: S::OtpStore,
    /// The service that delivers passcodes
    pub code_sender: S::CodeSender,
}

/// Builder for [`AppState`]
pub struct AppStateBuilder<S: ServerSetup> {
    otp_settings: Option<settings::Otp>,
    otp_store: Option<S::OtpStore>,
    code_sender: Option<S::CodeSender>,
}

impl<S: ServerSetup> Default for AppStateBuilder<S> {
    fn default() -> Self {
        Self {
            otp_settings: None,
            otp_store: None,
            code_sender: None,
        }
    }
}

impl<S: ServerSetup> AppStateBuilder<S> {
    /// Finalize the builder and return the [`AppState`]
    pub fn finalize(self) -> Result<AppState<S>> {
        let otp_settings = Arc::new(
            self.otp_settings
                .ok_or_else(|| anyhow!("otp settings are required"))?,
        );

        let otp_store = self
            .otp_store
            .ok_or_else(|| anyhow!("otp_store is required"))?;

        let code_sender = self
            .code_sender
            .ok_or_else(|| anyhow!("code_sender is required"))?;

        Ok(AppState {
            otp_settings,
            otp_store,
            code_sender,
        })
    }

    /// Set the passcode issuance settings
    pub fn with_otp_settings(mut self, otp_settings: settings::Otp) -> Self {
        self.otp_settings = Some(otp_settings);
        self
    }

    /// Set the passcode store
    pub fn with_otp_store(mut self, otp_store: S::OtpStore) -> Self {
        self.otp_store = Some(otp_store);
        self
    }

    /// Set the service that delivers passcodes
    pub fn with_code_sender(mut self, code_sender: S::CodeSender) -> Self {
        self.code_sender = Some(code_sender);
        self
    }
}

impl<S> Debug for AppState<S>
where
    S: ServerSetup,
    S::OtpStore: Debug,
    S::CodeSender: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("otp_settings", &self.otp_settings)
            .field("otp_store", &self.otp_store)
            .field("code_sender", &self.code_sender)
            .finish()
    }
}

impl<S> Debug for AppStateBuilder<S>
where
    S: ServerSetup,
    S::OtpStore: Debug,
    S::CodeSender: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStateBuilder")
            .field("otp_settings", &self.otp_settings)
            .field("otp_store", &self.otp_store)
            .field("code_sender", &self.code_sender)
            .finish()
    }
}
