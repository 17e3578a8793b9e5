use chrono::Utc;
use thiserror::Error;
use tracing::info;

use super::{jwt::LoginClaims, verification};
use crate::http;
use crate::schema::user::NewUser;
use crate::schema::User;
use crate::types::form::auth::{signin, signup};
use crate::types;
use crate::App;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SignInDenied {
  #[error("Account has not verified its email")]
  Unverified,
  #[error("Credential secret does not match")]
  WrongPassword,
}

/// Credential gate for sign-in. Unverified accounts are rejected before the
/// secret is compared, so the outcome for them is independent of whether
/// the supplied secret was correct.
pub fn check_credentials(user: &User, password: &str) -> Result<(), SignInDenied> {
  if !user.verified {
    return Err(SignInDenied::Unverified);
  }
  if user.password != password {
    return Err(SignInDenied::WrongPassword);
  }
  Ok(())
}

/// Registers a new account and kicks off email verification. The insert
/// itself settles the uniqueness question; a lost race surfaces exactly
/// like a plain duplicate. When only the verification email fails, the
/// account still stands and the response says the send did not happen.
#[tracing::instrument(skip_all)]
pub async fn signup(app: &App, form: &signup::Request) -> Result<signup::Response, http::Error> {
  #[derive(Debug, Error)]
  #[error("Attempt to sign up with an email that is already registered")]
  struct EmailTaken;

  let mut conn = app.db_write().await?;

  let entry = NewUser {
    name: &form.name,
    email: form.email.as_str(),
    password: form.password.as_str(),
    contact_number: form.contact_number.as_deref(),
    account_type: form.account_type,
  };

  let Some(user) = User::insert(&mut conn, entry).await? else {
    return Err(http::Error::from_context(
      types::Error::Conflict {
        message: format!("User with email {} already exists.", form.email.as_str()),
      },
      EmailTaken,
    ));
  };

  info!("registered account for user {}", user.id);

  let sent = match verification::issue(
    &mut conn,
    app.mailer.as_ref(),
    &app.config.public_url,
    &user,
  )
  .await
  {
    Ok(()) => true,
    Err(error) if matches!(error.as_type(), types::Error::DispatchFailed { .. }) => false,
    Err(error) => return Err(error),
  };

  Ok(signup::Response {
    message: "User signed up successfully".to_string(),
    verification_email_sent: sent,
  })
}

/// Authenticates an account and issues a bearer token for it. A token is
/// returned exactly when every gate passed.
#[tracing::instrument(skip_all)]
pub async fn sign_in(app: &App, form: &signin::Request) -> Result<(User, String), http::Error> {
  #[derive(Debug, Error)]
  #[error("No account matches the sign-in email")]
  struct UnknownEmail;

  // We need to get the latest credential state as soon as possible
  let mut conn = app.db_read_prefer_primary().await?;
  let Some(user) = User::by_email(&mut conn, form.email.as_str()).await? else {
    return Err(http::Error::from_context(
      types::Error::NotFound {
        message: "User not found".into(),
      },
      UnknownEmail,
    ));
  };
  drop(conn);

  if let Err(denied) = check_credentials(&user, form.password.as_str()) {
    let message = match denied {
      SignInDenied::Unverified => "Email not verified",
      SignInDenied::WrongPassword => "Invalid credentials",
    };
    return Err(http::Error::from_context(
      types::Error::Unauthorized {
        message: message.into(),
      },
      denied,
    ));
  }

  let mut conn = app.db_write().await?;
  let user = User::record_login(&mut conn, user.id, Utc::now().naive_utc()).await?;
  drop(conn);

  let claims = LoginClaims::issue(&user.email, user.account_type, app.config.auth.token_ttl());
  let token = claims
    .encode(&app.config.auth)
    .map_err(|report| http::Error::from_report(types::Error::Internal, report))?;

  info!("user {} authenticated successfully", user.id);
  Ok((user, token))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::schema::user::AccountType;
  use crate::types::id::UserId;

  fn account(verified: bool, password: &str) -> User {
    let now = Utc::now().naive_utc();
    User {
      id: UserId(3),
      created_at: now,
      name: "Carol".to_string(),
      email: "c@x.com".to_string(),
      password: password.to_string(),
      contact_number: None,
      account_type: AccountType::Player,
      verified,
      last_login_at: None,
      email_verification_token: None,
      email_verification_expires_at: None,
      password_reset_token: None,
      password_reset_expires_at: None,
    }
  }

  #[test]
  fn unverified_accounts_are_locked_out() {
    let user = account(false, "correct_password");

    // even the correct secret does not get through
    assert_eq!(
      check_credentials(&user, "correct_password"),
      Err(SignInDenied::Unverified)
    );
    assert_eq!(
      check_credentials(&user, "wrong_password"),
      Err(SignInDenied::Unverified)
    );
  }

  #[test]
  fn wrong_secret_is_rejected() {
    let user = account(true, "correct_password");
    assert_eq!(
      check_credentials(&user, "wrong_password"),
      Err(SignInDenied::WrongPassword)
    );
  }

  #[test]
  fn verified_account_with_matching_secret_passes() {
    let user = account(true, "correct_password");
    assert_eq!(check_credentials(&user, "correct_password"), Ok(()));
  }
}
