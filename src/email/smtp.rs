use async_trait::async_trait;
use error_stack::ResultExt;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use super::{DispatchError, Mailer};
use crate::config;

#[derive(Debug, Error)]
#[error("Could not build SMTP mailer")]
pub struct BuildError;

pub struct SmtpMailer {
  transport: AsyncSmtpTransport<Tokio1Executor>,
  from: Mailbox,
}

impl SmtpMailer {
  pub fn new(config: &config::Email) -> error_stack::Result<Self, BuildError> {
    let from = config
      .from_address
      .parse::<Mailbox>()
      .change_context(BuildError)
      .attach_printable("invalid sender mailbox")?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_relay)
      .change_context(BuildError)?
      .credentials(Credentials::new(
        config.username.as_str().to_owned(),
        config.password.as_str().to_owned(),
      ))
      .build();

    Ok(Self { transport, from })
  }
}

#[async_trait]
impl Mailer for SmtpMailer {
  #[tracing::instrument(skip_all, fields(to = "<hidden>"))]
  async fn send(&self, to: &str, subject: &str, body: &str) -> super::Result<()> {
    let message = Message::builder()
      .from(self.from.clone())
      .to(to.parse::<Mailbox>().change_context(DispatchError)?)
      .subject(subject)
      .body(body.to_owned())
      .change_context(DispatchError)?;

    self
      .transport
      .send(message)
      .await
      .change_context(DispatchError)?;

    Ok(())
  }
}
