use chrono::{Duration, NaiveDateTime, Utc};
use rand::Rng;
use thiserror::Error;
use tracing::info;

use super::is_expired;
use crate::database::Connection;
use crate::email::{self, Mailer};
use crate::http;
use crate::schema::User;
use crate::types;

pub const OTP_TTL_DAYS: i64 = 7;

/// Uniformly drawn 6-digit one-time passcode.
#[must_use]
pub fn generate_otp() -> String {
  rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CompleteError {
  #[error("No account matches the reset email and code")]
  NotFound,
  #[error("The reset code has expired")]
  Expired,
}

pub fn complete_check(user: &User, now: NaiveDateTime) -> Result<(), CompleteError> {
  if user.password_reset_token.is_none() {
    return Err(CompleteError::NotFound);
  }
  if is_expired(user.password_reset_expires_at, now) {
    return Err(CompleteError::Expired);
  }
  Ok(())
}

/// Generates a reset code for the account behind `email_addr` and emails
/// it. A request while another code is pending overwrites the old one. The
/// code stays persisted when the send fails.
#[tracing::instrument(skip_all)]
pub async fn request(
  conn: &mut Connection,
  mailer: &dyn Mailer,
  email_addr: &str,
) -> Result<(), http::Error> {
  #[derive(Debug, Error)]
  #[error("No account matches the reset request")]
  struct UnknownEmail;

  let Some(user) = User::by_email(conn, email_addr).await? else {
    return Err(http::Error::from_context(
      types::Error::NotFound {
        message: "User email not found!".into(),
      },
      UnknownEmail,
    ));
  };

  let otp = generate_otp();
  let expires_at = Utc::now().naive_utc() + Duration::days(OTP_TTL_DAYS);
  let user = User::store_reset_token(conn, user.id, &otp, expires_at).await?;

  let (subject, body) = email::reset_email(&otp);
  mailer.send(&user.email, &subject, &body).await.map_err(|report| {
    http::Error::from_report(
      types::Error::DispatchFailed {
        message: "Failed to send reset password OTP.".into(),
      },
      report,
    )
  })?;

  info!("password reset OTP sent for user {}", user.id);
  Ok(())
}

/// Completes a pending reset: checks the (email, code) pair and its expiry,
/// then swaps the credential secret and clears the code in one conditional
/// update. A second concurrent completion observes the code as gone.
#[tracing::instrument(skip_all)]
pub async fn complete(
  conn: &mut Connection,
  email_addr: &str,
  otp: &str,
  new_password: &str,
) -> Result<User, http::Error> {
  let now = Utc::now().naive_utc();

  let Some(user) = User::by_email_and_reset_token(conn, email_addr, otp).await? else {
    return Err(invalid_code(CompleteError::NotFound));
  };
  complete_check(&user, now).map_err(invalid_code)?;

  let Some(user) = User::apply_password_reset(conn, email_addr, otp, new_password).await? else {
    return Err(invalid_code(CompleteError::NotFound));
  };

  info!("password reset successfully for user {}", user.id);
  Ok(user)
}

fn invalid_code(error: CompleteError) -> http::Error {
  http::Error::from_context(
    types::Error::NotFound {
      message: "Invalid OTP or expired.".into(),
    },
    error,
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::schema::user::AccountType;
  use crate::types::id::UserId;

  fn resetting_user(expires_at: Option<NaiveDateTime>, otp: Option<&str>) -> User {
    let now = Utc::now().naive_utc();
    User {
      id: UserId(7),
      created_at: now,
      name: "Bob".to_string(),
      email: "b@x.com".to_string(),
      password: "old_password_1".to_string(),
      contact_number: None,
      account_type: AccountType::Coach,
      verified: true,
      last_login_at: None,
      email_verification_token: None,
      email_verification_expires_at: None,
      password_reset_token: otp.map(ToOwned::to_owned),
      password_reset_expires_at: expires_at,
    }
  }

  #[test]
  fn otp_is_six_digits_in_range() {
    for _ in 0..1000 {
      let otp = generate_otp();
      assert_eq!(otp.len(), 6);
      assert!(otp.chars().all(|c| c.is_ascii_digit()));

      let value = otp.parse::<u32>().unwrap();
      assert!((100_000..=999_999).contains(&value), "{value} out of range");
    }
  }

  #[test]
  fn completion_respects_expiry() {
    let now = Utc::now().naive_utc();

    let fresh = resetting_user(Some(now + Duration::days(7)), Some("428117"));
    assert_eq!(complete_check(&fresh, now), Ok(()));

    let stale = resetting_user(Some(now - Duration::seconds(1)), Some("428117"));
    assert_eq!(complete_check(&stale, now), Err(CompleteError::Expired));
  }

  #[test]
  fn completion_needs_a_pending_code() {
    let now = Utc::now().naive_utc();
    let user = resetting_user(None, None);
    assert_eq!(complete_check(&user, now), Err(CompleteError::NotFound));
  }
}
