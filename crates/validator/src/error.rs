use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::Serialize;
use std::borrow::Cow;

pub struct MessageBuilder(Option<Vec<Cow<'static, str>>>);

// The inner option only becomes `None` once `build` consumed it
#[allow(clippy::unwrap_used)]
impl MessageBuilder {
  #[must_use]
  pub const fn new() -> Self {
    Self(Some(Vec::new()))
  }

  pub fn insert(&mut self, message: impl Into<Cow<'static, str>>) -> &mut Self {
    self.0.as_mut().unwrap().push(message.into());
    self
  }

  #[must_use]
  pub fn build(&mut self) -> ValidateError {
    ValidateError::Messages(self.0.take().unwrap())
  }
}

pub struct FieldBuilder(Option<IndexMap<Cow<'static, str>, ValidateError>>);

#[allow(clippy::new_without_default)]
#[allow(clippy::unwrap_used)]
impl FieldBuilder {
  #[must_use]
  pub fn new() -> Self {
    Self(Some(IndexMap::default()))
  }

  pub fn insert(
    &mut self,
    key: impl Into<Cow<'static, str>>,
    value: ValidateError,
  ) -> &mut Self {
    if !value.is_empty() {
      self.0.as_mut().unwrap().insert(key.into(), value);
    }
    self
  }

  #[must_use]
  pub fn build(&mut self) -> ValidateError {
    ValidateError::Fields(self.0.take().unwrap())
  }
}

// ---------------------------------------------------- //

#[derive(PartialEq, Eq)]
pub enum ValidateError {
  Fields(IndexMap<Cow<'static, str>, ValidateError>),
  Messages(Vec<Cow<'static, str>>),
}

impl std::fmt::Display for ValidateError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("Invalid data occurred")
  }
}

impl std::error::Error for ValidateError {}

impl std::fmt::Debug for ValidateError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ValidateError::Fields(n) => n.fmt(f),
      ValidateError::Messages(n) => f.debug_map().entry(&"_errors", &n).finish(),
    }
  }
}

impl ValidateError {
  #[must_use]
  pub fn field_builder() -> FieldBuilder {
    FieldBuilder::new()
  }

  #[must_use]
  pub fn msg_builder() -> MessageBuilder {
    MessageBuilder::new()
  }

  #[must_use]
  pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
    MessageBuilder::new().insert(message.into()).build()
  }
}

impl ValidateError {
  #[must_use]
  pub fn is_empty(&self) -> bool {
    match self {
      ValidateError::Fields(n) => n.is_empty(),
      ValidateError::Messages(n) => n.is_empty(),
    }
  }

  pub fn into_result(self) -> Result<(), Self> {
    if self.is_empty() {
      Ok(())
    } else {
      Err(self)
    }
  }
}

impl Serialize for ValidateError {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      ValidateError::Fields(fields) => {
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (key, value) in fields {
          map.serialize_entry(key, value)?;
        }
        map.end()
      }
      ValidateError::Messages(messages) => {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("_errors", messages)?;
        map.end()
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn field_builder_skips_empty_entries() {
    let mut fields = ValidateError::field_builder();
    fields.insert("email", ValidateError::msg_builder().build());
    fields.insert("password", ValidateError::message("too short"));

    let error = fields.build();
    match &error {
      ValidateError::Fields(map) => {
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("password"));
      }
      ValidateError::Messages(..) => panic!("expected field map"),
    }
  }

  #[test]
  fn into_result_reflects_emptiness() {
    assert!(ValidateError::field_builder().build().into_result().is_ok());
    assert!(ValidateError::message("nope").into_result().is_err());
  }

  #[test]
  fn serializes_messages_under_errors_key() {
    let error = ValidateError::message("Invalid e-mail address");
    let json = serde_json::to_value(&error).unwrap();
    assert_eq!(json["_errors"][0], "Invalid e-mail address");
  }

  #[test]
  fn serializes_fields_as_object() {
    let mut fields = ValidateError::field_builder();
    fields.insert("otp", ValidateError::message("must be 6 digits"));

    let json = serde_json::to_value(&fields.build()).unwrap();
    assert_eq!(json["otp"]["_errors"][0], "must be 6 digits");
  }
}
