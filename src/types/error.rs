use serde::Serialize;
use std::borrow::Cow;
use validator::ValidateError;

/// Client-facing error payload. Serialized bodies look like
/// `{"code": "conflict", "message": "..."}`.
#[derive(Debug, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Error {
  Internal,
  NotFound { message: Cow<'static, str> },
  Conflict { message: String },
  Unauthorized { message: Cow<'static, str> },
  Forbidden { message: Cow<'static, str> },
  InvalidToken { message: Cow<'static, str> },
  DispatchFailed { message: Cow<'static, str> },
  ReadonlyMode,
  InvalidFormBody { errors: ValidateError },
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Internal => f.write_str("internal error"),
      Self::NotFound { message } => write!(f, "not found: {message}"),
      Self::Conflict { message } => write!(f, "conflict: {message}"),
      Self::Unauthorized { message } => write!(f, "unauthorized: {message}"),
      Self::Forbidden { message } => write!(f, "forbidden: {message}"),
      Self::InvalidToken { message } => write!(f, "invalid token: {message}"),
      Self::DispatchFailed { message } => write!(f, "dispatch failed: {message}"),
      Self::ReadonlyMode => f.write_str("readonly mode"),
      Self::InvalidFormBody { .. } => f.write_str("invalid form body"),
    }
  }
}
