use chrono::{Duration, NaiveDateTime, Utc};
use thiserror::Error;
use tracing::info;

use super::is_expired;
use crate::database::Connection;
use crate::email::{self, Mailer};
use crate::http;
use crate::schema::User;
use crate::types;

const TOKEN_LENGTH: usize = 32;
const TOKEN_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const TOKEN_TTL_HOURS: i64 = 24;

/// Opaque single-use token proving control of an email address. 32 chars
/// over a 62-symbol alphabet is ~190 bits, far past enumeration range.
#[must_use]
pub fn generate_token() -> String {
  random_string::generate(TOKEN_LENGTH, TOKEN_CHARSET)
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RedeemError {
  #[error("No account matches the verification token")]
  NotFound,
  #[error("The verification token has expired")]
  Expired,
}

/// Decides whether a loaded account can still redeem its pending token.
/// Expired tokens stay on the row so a later issue can overwrite them.
pub fn redeem_check(user: &User, now: NaiveDateTime) -> Result<(), RedeemError> {
  if user.email_verification_token.is_none() {
    return Err(RedeemError::NotFound);
  }
  if is_expired(user.email_verification_expires_at, now) {
    return Err(RedeemError::Expired);
  }
  Ok(())
}

/// Stores a fresh verification token on the account, then emails the
/// verification link. The token stays persisted even when the send fails,
/// so the caller may retry the dispatch without invalidating the link.
#[tracing::instrument(skip_all, fields(user.id = %user.id))]
pub async fn issue(
  conn: &mut Connection,
  mailer: &dyn Mailer,
  public_url: &str,
  user: &User,
) -> Result<(), http::Error> {
  let token = generate_token();
  let expires_at = Utc::now().naive_utc() + Duration::hours(TOKEN_TTL_HOURS);
  let user = User::store_verification_token(conn, user.id, &token, expires_at).await?;

  let (subject, body) = email::verification_email(public_url, &token);
  mailer.send(&user.email, &subject, &body).await.map_err(|report| {
    http::Error::from_report(
      types::Error::DispatchFailed {
        message: "Failed to send verification email.".into(),
      },
      report,
    )
  })?;

  info!("verification email sent for user {}", user.id);
  Ok(())
}

/// Redeems a verification token. The final consumption is a conditional
/// update, so of two concurrent redemptions exactly one succeeds and the
/// other observes the token as gone.
#[tracing::instrument(skip_all)]
pub async fn redeem(conn: &mut Connection, token: &str) -> Result<User, http::Error> {
  let now = Utc::now().naive_utc();

  let Some(user) = User::by_verification_token(conn, token).await? else {
    return Err(invalid_link(RedeemError::NotFound));
  };
  redeem_check(&user, now).map_err(invalid_link)?;

  let Some(user) = User::redeem_verification_token(conn, token).await? else {
    return Err(invalid_link(RedeemError::NotFound));
  };

  info!("user {} verified email successfully", user.id);
  Ok(user)
}

fn invalid_link(error: RedeemError) -> http::Error {
  http::Error::from_context(
    types::Error::InvalidToken {
      message: "Verification link is invalid or expired".into(),
    },
    error,
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::schema::user::AccountType;
  use crate::types::id::UserId;
  use chrono::Duration;

  fn pending_user(expires_at: Option<NaiveDateTime>, token: Option<&str>) -> User {
    let now = Utc::now().naive_utc();
    User {
      id: UserId(1),
      created_at: now,
      name: "Alice".to_string(),
      email: "a@x.com".to_string(),
      password: "pw1_longenough".to_string(),
      contact_number: None,
      account_type: AccountType::Player,
      verified: false,
      last_login_at: None,
      email_verification_token: token.map(ToOwned::to_owned),
      email_verification_expires_at: expires_at,
      password_reset_token: None,
      password_reset_expires_at: None,
    }
  }

  #[test]
  fn token_shape() {
    let token = generate_token();
    assert_eq!(token.len(), 32);
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));

    // opaque tokens must not repeat
    assert_ne!(generate_token(), token);
  }

  #[test]
  fn redeemable_before_expiry() {
    let now = Utc::now().naive_utc();
    let user = pending_user(Some(now + Duration::hours(24)), Some("tok"));
    assert_eq!(redeem_check(&user, now), Ok(()));
  }

  #[test]
  fn expired_at_and_after_the_deadline() {
    let issued = Utc::now().naive_utc();
    let expiry = issued + Duration::hours(24);
    let user = pending_user(Some(expiry), Some("tok"));

    assert_eq!(redeem_check(&user, expiry), Err(RedeemError::Expired));
    assert_eq!(
      redeem_check(&user, issued + Duration::hours(25)),
      Err(RedeemError::Expired)
    );
  }

  #[test]
  fn cleared_token_is_not_found() {
    let now = Utc::now().naive_utc();
    let user = pending_user(None, None);
    assert_eq!(redeem_check(&user, now), Err(RedeemError::NotFound));
  }
}
