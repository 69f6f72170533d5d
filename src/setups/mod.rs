//! This abstracts the server's side-effects into "setups".
//!
//! This module defines the traits, submodules define test & production
//! collections of implementations.
use crate::models::email_otp::OtpRecord;
use anyhow::Result;
use async_trait::async_trait;

pub mod prod;

/// This trait groups type parameters to the server's `AppState` struct.
///
/// It captures the setup of the server, distinguishing between e.g.
/// unit testing & production setups.
pub trait ServerSetup: Clone + Send + Sync {
    /// Which implementation backs the passcode store
    type OtpStore: OtpStore;
    /// Which implementation to use to deliver passcodes
    type CodeSender: CodeSender;
}

/// Keyed storage for outstanding passcodes.
///
/// The production implementation is process-local: under multi-instance
/// deployment, issuance and verification may land on instances holding
/// different copies of the map, yielding false not-found verdicts. A
/// durable backend would plug in at this boundary.
#[async_trait]
pub trait OtpStore: Clone + Send + Sync {
    /// Store a record under `email`, replacing any existing one.
    async fn put(&self, email: &str, record: OtpRecord) -> Result<()>;

    /// Fetch the record stored under `email`, if any.
    async fn get(&self, email: &str) -> Result<Option<OtpRecord>>;

    /// Drop the record stored under `email`.
    /// Removing a missing key is not an error.
    async fn remove(&self, email: &str) -> Result<()>;
}

/// The service that delivers passcodes to users.
#[async_trait]
pub trait CodeSender: Clone + Send + Sync {
    /// Send the code associated with the email
    async fn send_code(&self, email: &str, code: &str) -> Result<()>;
}
