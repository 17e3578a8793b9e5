use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateError};

use crate::types::validation::{self, is_valid_otp};
use crate::util::Sensitive;

#[derive(Debug, Deserialize)]
pub struct Query {
  #[serde(rename = "userEmail")]
  pub user_email: String,
  pub otp: String,
  #[serde(rename = "newPassword")]
  pub new_password: Sensitive<String>,
}

impl Validate for Query {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();

    fields.insert("otp", {
      let mut error = ValidateError::msg_builder();
      if !is_valid_otp(&self.otp) {
        error.insert("OTP must be exactly 6 digits");
      }
      error.build()
    });

    fields.insert("newPassword", {
      let mut error = ValidateError::msg_builder();
      if self.new_password.len() < validation::PASSWORD_MIN {
        error.insert("Passwords must not be too short");
      } else if self.new_password.len() > validation::PASSWORD_MAX {
        error.insert("Passwords must not be too big");
      }
      error.build()
    });

    fields.build().into_result()
  }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Response {
  pub message: String,
  pub success: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn query(otp: &str, new_password: &str) -> Query {
    Query {
      user_email: "b@x.com".to_string(),
      otp: otp.to_string(),
      new_password: new_password.to_string().into(),
    }
  }

  #[test]
  fn rejects_malformed_otps() {
    assert!(query("12345", "long_enough_pw").validate().is_err());
    assert!(query("1234567", "long_enough_pw").validate().is_err());
    assert!(query("abcdef", "long_enough_pw").validate().is_err());
  }

  #[test]
  fn accepts_a_six_digit_otp() {
    assert!(query("123456", "long_enough_pw").validate().is_ok());
    assert!(query("000000", "long_enough_pw").validate().is_ok());
  }

  #[test]
  fn rejects_short_replacement_passwords() {
    assert!(query("123456", "short").validate().is_err());
  }
}
