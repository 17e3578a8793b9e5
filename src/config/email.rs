use serde::Deserialize;
use validator::{Validate, ValidateError};

use crate::util::Sensitive;

/// Outbound SMTP settings. When this whole section is absent, the server
/// falls back to logging outbound messages instead of delivering them.
#[derive(Debug, Deserialize)]
pub struct Email {
    /// SMTP relay host, e.g. `smtp.example.com`.
    ///
    /// **Environment variables**:
    /// - `HUDDLE_EMAIL_SMTP_RELAY`
    pub smtp_relay: String,
    /// **Environment variables**:
    /// - `HUDDLE_EMAIL_USERNAME`
    pub username: Sensitive<String>,
    /// **Environment variables**:
    /// - `HUDDLE_EMAIL_PASSWORD`
    pub password: Sensitive<String>,
    /// Mailbox shown as the sender, e.g. `Huddle <no-reply@example.com>`.
    ///
    /// **Environment variables**:
    /// - `HUDDLE_EMAIL_FROM_ADDRESS`
    pub from_address: String,
}

impl Validate for Email {
    fn validate(&self) -> Result<(), ValidateError> {
        let mut fields = ValidateError::field_builder();

        fields.insert("smtp_relay", {
            let mut error = ValidateError::msg_builder();
            if self.smtp_relay.trim().is_empty() {
                error.insert("SMTP relay must not be empty");
            }
            error.build()
        });

        fields.insert("from_address", {
            let mut error = ValidateError::msg_builder();
            if self.from_address.trim().is_empty() {
                error.insert("Sender mailbox must not be empty");
            }
            error.build()
        });

        fields.build().into_result()
    }
}
