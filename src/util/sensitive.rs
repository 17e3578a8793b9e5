use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// Holds values that must not leak into logs, traces or debug dumps.
///
/// The wrapper is transparent for serde so request forms and configuration
/// files keep their natural shape, but its [`Debug`] output is redacted.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> T {
        self.0
    }

    pub const fn value(&self) -> &T {
        &self.0
    }
}

impl Sensitive<String> {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Deref for Sensitive<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Sensitive<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> std::fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Sensitive(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn serde_is_transparent() {
        let value = Sensitive::new("hunter2".to_string());
        assert_tokens(&value, &[Token::Str("hunter2")]);
    }

    #[test]
    fn debug_is_redacted() {
        let value = Sensitive::new("hunter2".to_string());
        assert_eq!(format!("{value:?}"), "Sensitive(<redacted>)");
    }
}
