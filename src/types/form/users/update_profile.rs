use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateError};

use crate::types::validation;

#[derive(Debug, Deserialize, Serialize)]
pub struct Request {
  pub name: String,
  pub contact_number: Option<String>,
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

    fields.build().into_result()
  }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Response {
  pub message: String,
  pub success: bool,
}
