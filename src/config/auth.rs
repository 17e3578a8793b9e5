use serde::Deserialize;
use std::num::NonZeroU64;
use validator::{Validate, ValidateError};

use crate::util::Sensitive;

#[derive(Debug, Deserialize)]
pub struct Auth {
    /// Symmetric secret used to sign and check bearer tokens. It must be
    /// provided through configuration; there is no built-in default.
    ///
    /// **Environment variables**:
    /// - `HUDDLE_AUTH_JWT_SECRET`
    pub jwt_secret: Sensitive<String>,
    /// Lifetime of issued bearer tokens, in seconds.
    ///
    /// **Environment variables**:
    /// - `HUDDLE_AUTH_TOKEN_TTL_SECS`
    #[serde(default = "Auth::default_token_ttl_secs")]
    pub token_ttl_secs: NonZeroU64,
}

impl Auth {
    const DEFAULT_TOKEN_TTL_SECS: u64 = 60 * 60;

    // Required by serde
    const fn default_token_ttl_secs() -> NonZeroU64 {
        match NonZeroU64::new(Self::DEFAULT_TOKEN_TTL_SECS) {
            Some(n) => n,
            None => panic!("DEFAULT_TOKEN_TTL_SECS is accidentally set to 0"),
        }
    }

    #[must_use]
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.token_ttl_secs.get()).unwrap_or(i64::MAX))
    }
}

impl Validate for Auth {
    fn validate(&self) -> Result<(), ValidateError> {
        let mut fields = ValidateError::field_builder();

        fields.insert("jwt_secret", {
            let mut error = ValidateError::msg_builder();
            if !(12..=1024).contains(&self.jwt_secret.len()) {
                error.insert("Invalid JWT secret key");
            }
            error.build()
        });

        fields.build().into_result()
    }
}
