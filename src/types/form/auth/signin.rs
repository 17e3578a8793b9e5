use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateError};

use crate::types::validation::is_valid_email;
use crate::util::Sensitive;

#[derive(Debug, Deserialize, Serialize)]
pub struct Request {
  pub email: Sensitive<String>,
  pub password: Sensitive<String>,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();

    fields.insert("email", {
      let mut error = ValidateError::msg_builder();
      if !is_valid_email(self.email.as_str()) {
        error.insert("Invalid e-mail address");
      }
      error.build()
    });

    fields.insert("password", {
      let mut error = ValidateError::msg_builder();
      if self.password.is_empty() {
        error.insert("Password must not be empty");
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
