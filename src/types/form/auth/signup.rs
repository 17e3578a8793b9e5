use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateError};

use crate::schema::user::AccountType;
use crate::types::validation::{self, is_valid_email};
use crate::util::Sensitive;

#[derive(Debug, Deserialize, Serialize)]
pub struct Request {
  pub name: String,
  pub email: Sensitive<String>,
  pub password: Sensitive<String>,
  pub contact_number: Option<String>,
  pub account_type: AccountType,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();

    fields.insert("name", {
      let mut error = ValidateError::msg_builder();
      if self.name.trim().is_empty() {
        error.insert("Name must not be empty");
      } else if self.name.len() > validation::NAME_MAX {
        error.insert("Name is too long");
      }
      error.build()
    });

    fields.insert("email", {
      let mut error = ValidateError::msg_builder();
      if !is_valid_email(self.email.as_str()) {
        error.insert("Invalid e-mail address");
      }
      error.build()
    });

    fields.insert("password", {
      // All passwords must have no trailing or leading whitespaces
      let mut error = ValidateError::msg_builder();
      let password = self.password.as_str().trim();
      if self.password.len() != password.len() {
        error.insert("Passwords must not start or end with spaces");
      } else if self.password.len() > validation::PASSWORD_MAX {
        error.insert("Passwords must not be too big");
      } else if self.password.len() < validation::PASSWORD_MIN {
        error.insert("Passwords must not be too short");
      }
      error.build()
    });

    fields.build().into_result()
  }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Response {
  pub message: String,
  // Signup still succeeds when the verification email could not
  // be dispatched; the flag tells the client which case happened.
  pub verification_email_sent: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn form(name: &str, email: &str, password: &str) -> Request {
    Request {
      name: name.to_string(),
      email: email.to_string().into(),
      password: password.to_string().into(),
      contact_number: None,
      account_type: AccountType::Player,
    }
  }

  #[test]
  fn rejects_empty_name() {
    assert!(form("", "a@x.com", "long_enough_pw").validate().is_err());
    assert!(form("   ", "a@x.com", "long_enough_pw").validate().is_err());
  }

  #[test]
  fn rejects_bad_emails() {
    assert!(form("Alice", "not-an-email", "long_enough_pw").validate().is_err());
    assert!(form("Alice", "", "long_enough_pw").validate().is_err());
  }

  #[test]
  fn rejects_bad_passwords() {
    assert!(form("Alice", "a@x.com", "short").validate().is_err());
    assert!(form("Alice", "a@x.com", " padded_password ").validate().is_err());
  }

  #[test]
  fn accepts_a_valid_form() {
    assert!(form("Alice", "a@x.com", "long_enough_pw").validate().is_ok());
  }
}
