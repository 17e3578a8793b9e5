use async_trait::async_trait;
use thiserror::Error;

mod smtp;

pub use smtp::SmtpMailer;

pub type Result<T> = error_stack::Result<T, DispatchError>;

#[derive(Debug, Error)]
#[error("Could not dispatch email")]
pub struct DispatchError;

/// Narrow outbound-email contract consumed by the identity flows.
#[async_trait]
pub trait Mailer: Send + Sync {
  async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Fallback dispatcher used when no SMTP relay is configured. Messages are
/// recorded on the log stream and reported as sent.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
  async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
    tracing::info!(%to, %subject, %body, "no SMTP relay configured, logging email instead");
    Ok(())
  }
}

pub fn verification_email(public_url: &str, token: &str) -> (String, String) {
  let link = format!("{public_url}/auth/verify-email?token={token}");
  (
    "Verify Your Email".to_string(),
    format!("Please click on the link to verify your email: {link}"),
  )
}

pub fn reset_email(otp: &str) -> (String, String) {
  (
    "Reset Your Password".to_string(),
    format!("Your OTP for password reset is: {otp}"),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn verification_email_embeds_the_link() {
    let (subject, body) = verification_email("https://huddle.example.org", "tok123");
    assert_eq!(subject, "Verify Your Email");
    assert!(body.contains("https://huddle.example.org/auth/verify-email?token=tok123"));
  }

  #[test]
  fn reset_email_embeds_the_otp() {
    let (subject, body) = reset_email("428117");
    assert_eq!(subject, "Reset Your Password");
    assert!(body.contains("428117"));
  }
}
