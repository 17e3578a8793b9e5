use actix_web::{body::BoxBody, http::StatusCode, HttpResponse};
use error_stack::Report;

use super::Error;
use crate::auth::jwt::TokenError;
use crate::{database, types::Error as ErrorType};

impl actix_web::ResponseError for Error {
  fn status_code(&self) -> StatusCode {
    match self.error_type {
      ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
      ErrorType::NotFound { .. } => StatusCode::NOT_FOUND,
      ErrorType::Conflict { .. } => StatusCode::BAD_REQUEST,
      ErrorType::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
      ErrorType::Forbidden { .. } => StatusCode::FORBIDDEN,
      ErrorType::InvalidToken { .. } => StatusCode::BAD_REQUEST,
      ErrorType::DispatchFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
      ErrorType::ReadonlyMode => StatusCode::SERVICE_UNAVAILABLE,
      ErrorType::InvalidFormBody { .. } => StatusCode::BAD_REQUEST,
    }
  }

  fn error_response(&self) -> HttpResponse<BoxBody> {
    HttpResponse::build(self.status_code()).json(&self.error_type)
  }
}

impl From<Report<database::Error>> for Error {
  fn from(value: Report<database::Error>) -> Self {
    match value.current_context() {
      database::Error::Readonly => Error::from_report(ErrorType::ReadonlyMode, value),
      _ => Error::from_report(ErrorType::Internal, value),
    }
  }
}

impl From<validator::ValidateError> for Error {
  fn from(value: validator::ValidateError) -> Self {
    #[derive(Debug, thiserror::Error)]
    #[error("Validation error occurred")]
    struct FormError;
    Error::from_context(ErrorType::InvalidFormBody { errors: value }, FormError)
  }
}

impl From<TokenError> for Error {
  fn from(value: TokenError) -> Self {
    Error::from_context(
      ErrorType::Unauthorized {
        message: "Authentication required".into(),
      },
      value,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::ResponseError;
  use thiserror::Error as ThisError;

  #[derive(Debug, ThisError)]
  #[error("test context")]
  struct TestContext;

  fn error_with(error_type: ErrorType) -> Error {
    Error::from_context(error_type, TestContext)
  }

  #[test]
  fn status_codes_follow_the_error_taxonomy() {
    let cases = [
      (ErrorType::Internal, StatusCode::INTERNAL_SERVER_ERROR),
      (
        ErrorType::NotFound {
          message: "User not found".into(),
        },
        StatusCode::NOT_FOUND,
      ),
      (
        ErrorType::Conflict {
          message: "User with email a@x.com already exists.".to_string(),
        },
        StatusCode::BAD_REQUEST,
      ),
      (
        ErrorType::Unauthorized {
          message: "Invalid credentials".into(),
        },
        StatusCode::UNAUTHORIZED,
      ),
      (
        ErrorType::Forbidden {
          message: "Only coaches can create events".into(),
        },
        StatusCode::FORBIDDEN,
      ),
      (
        ErrorType::InvalidToken {
          message: "Verification link is invalid or expired".into(),
        },
        StatusCode::BAD_REQUEST,
      ),
      (
        ErrorType::DispatchFailed {
          message: "Failed to send reset password OTP.".into(),
        },
        StatusCode::INTERNAL_SERVER_ERROR,
      ),
      (ErrorType::ReadonlyMode, StatusCode::SERVICE_UNAVAILABLE),
    ];

    for (error_type, status) in cases {
      assert_eq!(error_with(error_type).status_code(), status);
    }
  }

  #[test]
  fn bodies_carry_code_and_message() {
    let error = error_with(ErrorType::Conflict {
      message: "User with email a@x.com already exists.".to_string(),
    });

    let body = serde_json::to_value(error.as_type()).unwrap();
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "User with email a@x.com already exists.");
  }
}
