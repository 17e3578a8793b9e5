use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateError};

#[derive(Debug, Deserialize, Serialize)]
pub struct Request {
  pub title: String,
  pub description: Option<String>,
  pub location: Option<String>,
  pub starts_at: NaiveDateTime,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();

    fields.insert("title", {
      let mut error = ValidateError::msg_builder();
      if self.title.trim().is_empty() {
        error.insert("Title must not be empty");
      }
      error.build()
    });

    fields.build().into_result()
  }
}
