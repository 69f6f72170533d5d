//! Email OTP issuance and verification.

use crate::setups::OtpStore;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single outstanding passcode for an email address.
///
/// At most one record is live per email; issuing again replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// The 6-digit passcode
    pub code: String,
    /// Moment after which the code no longer verifies
    pub expires_at: DateTime<Utc>,
}

/// Outcome of a verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The code matched and the record was consumed
    Verified,
    /// Nothing is stored for this email
    NotFound,
    /// A record existed but its expiry had passed (it has been removed)
    Expired,
    /// The stored code differs from the submitted one
    Mismatch,
}

impl VerifyOutcome {
    /// Whether the attempt succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, VerifyOutcome::Verified)
    }

    /// The message reported to the caller for negative outcomes.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            VerifyOutcome::Verified => None,
            VerifyOutcome::NotFound => Some("No OTP found for this email"),
            VerifyOutcome::Expired => Some("OTP has expired"),
            VerifyOutcome::Mismatch => Some("Invalid OTP code"),
        }
    }
}

/// Issue a fresh passcode for `email`, replacing any outstanding record.
pub async fn issue(
    store: &impl OtpStore,
    email: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<OtpRecord> {
    let record = OtpRecord {
        code: generate_code(),
        expires_at: now + ttl,
    };

    tracing::debug!(email, expires_at = %record.expires_at, "storing new OTP record");

    store.put(email, record.clone()).await?;

    Ok(record)
}

/// Check a submitted code against whatever is stored for `email`.
///
/// Expired and matched records are removed. A mismatch keeps the record,
/// so the user may retry until the code expires.
pub async fn verify(
    store: &impl OtpStore,
    email: &str,
    code: &str,
    now: DateTime<Utc>,
) -> Result<VerifyOutcome> {
    let Some(record) = store.get(email).await? else {
        return Ok(VerifyOutcome::NotFound);
    };

    if now > record.expires_at {
        store.remove(email).await?;
        return Ok(VerifyOutcome::Expired);
    }

    if record.code != code {
        return Ok(VerifyOutcome::Mismatch);
    }

    store.remove(email).await?;

    Ok(VerifyOutcome::Verified)
}

/// Generate a code that can be sent to the user.
fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    // 6 digits, never 0-prefixed
    let code: u32 = rng.gen_range(100_000..=999_999);
    code.to_string()
}
