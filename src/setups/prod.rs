//! Production server setup code

use crate::{
    models::email_otp::OtpRecord,
    settings,
    setups::{CodeSender, OtpStore, ServerSetup},
};
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use mailgun_rs::{EmailAddress, Mailgun, MailgunRegion, Message};
use std::{collections::HashMap, sync::Arc};

/// Production implementation of `ServerSetup`.
/// Keeps passcodes in process memory and delivers them through Mailgun,
/// configured in `settings.toml`.
#[derive(Clone, Debug, Default)]
pub struct ProdSetup;

impl ServerSetup for ProdSetup {
    type OtpStore = InMemoryOtpStore;
    type CodeSender = MailgunCodeSender;
}

/// An `OtpStore` backed by a shared in-process map.
///
/// Lives only as long as the instance does; a restart loses all
/// in-flight codes. Expired records linger until a verification
/// attempt touches them, there is no background sweep.
#[derive(Clone, Debug, Default)]
pub struct InMemoryOtpStore {
    records: Arc<DashMap<String, OtpRecord>>,
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put(&self, email: &str, record: OtpRecord) -> Result<()> {
        self.records.insert(email.to_string(), record);
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<OtpRecord>> {
        Ok(self.records.get(email).map(|entry| entry.value().clone()))
    }

    async fn remove(&self, email: &str) -> Result<()> {
        self.records.remove(email);
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Sends passcodes over email
pub struct MailgunCodeSender {
    settings: settings::Mailgun,
}

impl MailgunCodeSender {
    /// Create a new MailgunCodeSender
    pub fn new(settings: settings::Mailgun) -> Self {
        Self { settings }
    }

    fn sender(&self) -> EmailAddress {
        EmailAddress::name_address(&self.settings.from_name, &self.settings.from_address)
    }

    fn message(&self, email: &str, code: &str) -> Message {
        let delivery_address = EmailAddress::address(email);
        let template_vars = HashMap::from_iter([("code".to_string(), code.to_string())]);

        Message {
            to: vec![delivery_address],
            subject: self.settings.subject.clone(),
            template: self.settings.template.clone(),
            template_vars,
            ..Default::default()
        }
    }
}

#[async_trait]
impl CodeSender for MailgunCodeSender {
    /// Sends the code to the user
    async fn send_code(&self, email: &str, code: &str) -> Result<()> {
        let message = self.message(email, code);

        tracing::debug!(
            to = email,
            subject = %message.subject,
            template = %message.template,
            "sending passcode email"
        );

        let client = Mailgun {
            message,
            api_key: self.settings.api_key.clone(),
            domain: self.settings.domain.clone(),
        };

        client.async_send(MailgunRegion::US, &self.sender()).await?;

        Ok(())
    }
}
