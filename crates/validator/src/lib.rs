mod error;

pub mod extras;

pub use error::{FieldBuilder, MessageBuilder, ValidateError};

/// Checks a value against its own validation rules.
///
/// Implementors are expected to collect every failure into one
/// [`ValidateError`] instead of bailing out at the first offending field.
pub trait Validate {
  fn validate(&self) -> Result<(), ValidateError>;
}

impl<'a, T: Validate> Validate for &'a T {
  fn validate(&self) -> Result<(), ValidateError> {
    T::validate(self)
  }
}

impl<T: Validate> Validate for Option<T> {
  fn validate(&self) -> Result<(), ValidateError> {
    match self {
      Some(value) => value.validate(),
      None => Ok(()),
    }
  }
}

impl<T: Validate> Validate for Box<T> {
  fn validate(&self) -> Result<(), ValidateError> {
    T::validate(self)
  }
}
