use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::{Connection, ErrorExt, Result};
use crate::types::id::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_type")]
pub enum AccountType {
  Coach,
  Player,
}

impl AccountType {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Coach => "Coach",
      Self::Player => "Player",
    }
  }
}

impl std::fmt::Display for AccountType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One account row. The verification and reset token columns come and go in
/// pairs: a token is present exactly when its expiry is.
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct User {
  pub id: UserId,
  pub created_at: NaiveDateTime,
  pub name: String,
  pub email: String,
  pub password: String,
  pub contact_number: Option<String>,
  pub account_type: AccountType,
  pub verified: bool,
  pub last_login_at: Option<NaiveDateTime>,
  pub email_verification_token: Option<String>,
  pub email_verification_expires_at: Option<NaiveDateTime>,
  pub password_reset_token: Option<String>,
  pub password_reset_expires_at: Option<NaiveDateTime>,
}

#[derive(Debug)]
pub struct NewUser<'a> {
  pub name: &'a str,
  pub email: &'a str,
  pub password: &'a str,
  pub contact_number: Option<&'a str>,
  pub account_type: AccountType,
}

impl User {
  #[tracing::instrument(skip(id), fields(id = "<hidden>"))]
  pub async fn by_id(conn: &mut Connection, id: UserId) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" WHERE id = $1"#)
      .bind(id)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  #[tracing::instrument(skip(email), fields(email = "<hidden>"))]
  pub async fn by_email(conn: &mut Connection, email: &str) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" WHERE email = $1"#)
      .bind(email)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  #[tracing::instrument(skip(token), fields(token = "<hidden>"))]
  pub async fn by_verification_token(conn: &mut Connection, token: &str) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" WHERE email_verification_token = $1"#)
      .bind(token)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  #[tracing::instrument(skip(email, token), fields(email = "<hidden>", token = "<hidden>"))]
  pub async fn by_email_and_reset_token(
    conn: &mut Connection,
    email: &str,
    token: &str,
  ) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"SELECT * FROM "users" WHERE email = $1 AND password_reset_token = $2"#,
    )
    .bind(email)
    .bind(token)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }

  /// Inserts a new account. Returns `None` when the email is already taken;
  /// the uniqueness check and the write are one statement, so two racing
  /// signups can never both succeed.
  #[tracing::instrument(skip_all)]
  pub async fn insert(conn: &mut Connection, entry: NewUser<'_>) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "users" (name, email, password, contact_number, account_type)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (email) DO NOTHING
         RETURNING *"#,
    )
    .bind(entry.name)
    .bind(entry.email)
    .bind(entry.password)
    .bind(entry.contact_number)
    .bind(entry.account_type)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(token, expires_at), fields(token = "<hidden>"))]
  pub async fn store_verification_token(
    conn: &mut Connection,
    id: UserId,
    token: &str,
    expires_at: NaiveDateTime,
  ) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"UPDATE "users"
         SET email_verification_token = $2, email_verification_expires_at = $3
         WHERE id = $1
         RETURNING *"#,
    )
    .bind(id)
    .bind(token)
    .bind(expires_at)
    .fetch_one(conn)
    .await
    .into_db_error()
  }

  /// Consumes a verification token: flips `verified` and clears the token
  /// pair in one statement. Returns `None` when no unverified account holds
  /// the token anymore, which is what a racing second redemption observes.
  #[tracing::instrument(skip(token), fields(token = "<hidden>"))]
  pub async fn redeem_verification_token(
    conn: &mut Connection,
    token: &str,
  ) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"UPDATE "users"
         SET verified = TRUE,
             email_verification_token = NULL,
             email_verification_expires_at = NULL
         WHERE email_verification_token = $1 AND NOT verified
         RETURNING *"#,
    )
    .bind(token)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(at))]
  pub async fn record_login(conn: &mut Connection, id: UserId, at: NaiveDateTime) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"UPDATE "users" SET last_login_at = $2 WHERE id = $1 RETURNING *"#,
    )
    .bind(id)
    .bind(at)
    .fetch_one(conn)
    .await
    .into_db_error()
  }

  /// A re-request simply overwrites any reset code still pending.
  #[tracing::instrument(skip(otp, expires_at), fields(otp = "<hidden>"))]
  pub async fn store_reset_token(
    conn: &mut Connection,
    id: UserId,
    otp: &str,
    expires_at: NaiveDateTime,
  ) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"UPDATE "users"
         SET password_reset_token = $2, password_reset_expires_at = $3
         WHERE id = $1
         RETURNING *"#,
    )
    .bind(id)
    .bind(otp)
    .bind(expires_at)
    .fetch_one(conn)
    .await
    .into_db_error()
  }

  /// Consumes a reset code: replaces the credential secret and clears the
  /// token pair in one statement. Returns `None` when the (email, otp) pair
  /// no longer matches.
  #[tracing::instrument(skip_all)]
  pub async fn apply_password_reset(
    conn: &mut Connection,
    email: &str,
    otp: &str,
    new_password: &str,
  ) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"UPDATE "users"
         SET password = $3,
             password_reset_token = NULL,
             password_reset_expires_at = NULL
         WHERE email = $1 AND password_reset_token = $2
         RETURNING *"#,
    )
    .bind(email)
    .bind(otp)
    .bind(new_password)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(name, contact_number))]
  pub async fn update_profile(
    conn: &mut Connection,
    id: UserId,
    name: &str,
    contact_number: Option<&str>,
  ) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"UPDATE "users" SET name = $2, contact_number = $3 WHERE id = $1 RETURNING *"#,
    )
    .bind(id)
    .bind(name)
    .bind(contact_number)
    .fetch_one(conn)
    .await
    .into_db_error()
  }
}
