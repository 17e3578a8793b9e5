use chrono::{Duration, Utc};
use error_stack::ResultExt;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use crate::schema::user::AccountType;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims carried by a signed bearer token. The token itself is stateless:
/// there is no revocation list, it simply stops validating once `exp` has
/// passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginClaims {
  /// Account email.
  pub sub: String,
  pub role: AccountType,
  pub iat: i64,
  pub exp: i64,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
  #[error("Bearer token failed the signature check")]
  Signature,
  #[error("Bearer token has expired")]
  Expired,
  #[error("Bearer token is malformed")]
  Malformed,
}

#[derive(Debug, Error)]
#[error("Could not sign bearer token")]
pub struct EncodeError;

impl LoginClaims {
  #[must_use]
  pub fn issue(subject: &str, role: AccountType, ttl: Duration) -> Self {
    let now = Utc::now();
    Self {
      sub: subject.to_owned(),
      role,
      iat: now.timestamp(),
      exp: (now + ttl).timestamp(),
    }
  }

  #[tracing::instrument(skip_all)]
  pub fn encode(&self, auth: &config::Auth) -> error_stack::Result<String, EncodeError> {
    let header = Header::new(ALGORITHM);
    let key = EncodingKey::from_secret(auth.jwt_secret.as_str().as_bytes());
    jsonwebtoken::encode(&header, self, &key).change_context(EncodeError)
  }

  /// Checks the signature before anything else; expiry is only consulted on
  /// an authentic token, with zero leeway.
  #[tracing::instrument(skip_all)]
  pub fn decode(auth: &config::Auth, token: &str) -> Result<Self, TokenError> {
    let key = DecodingKey::from_secret(auth.jwt_secret.as_str().as_bytes());
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    match jsonwebtoken::decode::<Self>(token, &key, &validation) {
      Ok(data) => Ok(data.claims),
      Err(error) => Err(match error.kind() {
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::Signature,
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
      }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::num::NonZeroU64;

  fn auth_config(secret: &str) -> config::Auth {
    config::Auth {
      jwt_secret: secret.to_string().into(),
      token_ttl_secs: NonZeroU64::new(3600).unwrap(),
    }
  }

  #[test]
  fn round_trip_preserves_subject_and_role() {
    let auth = auth_config("round-trip-signing-secret");
    let claims = LoginClaims::issue("b@x.com", AccountType::Coach, Duration::hours(1));
    let token = claims.encode(&auth).unwrap();

    assert_eq!(token.split('.').count(), 3);

    let decoded = LoginClaims::decode(&auth, &token).unwrap();
    assert_eq!(decoded.sub, "b@x.com");
    assert_eq!(decoded.role, AccountType::Coach);
    assert_eq!(decoded, claims);
  }

  #[test]
  fn rejects_foreign_signatures() {
    let ours = auth_config("our-signing-secret-key");
    let theirs = auth_config("their-signing-secret-key");

    let claims = LoginClaims::issue("b@x.com", AccountType::Player, Duration::hours(1));
    let token = claims.encode(&theirs).unwrap();

    assert_eq!(
      LoginClaims::decode(&ours, &token),
      Err(TokenError::Signature)
    );
  }

  #[test]
  fn rejects_spliced_signatures() {
    let auth = auth_config("splice-signing-secret");
    let other = auth_config("other-signing-secret");

    let token = LoginClaims::issue("b@x.com", AccountType::Player, Duration::hours(1))
      .encode(&auth)
      .unwrap();
    let donor = LoginClaims::issue("b@x.com", AccountType::Player, Duration::hours(2))
      .encode(&other)
      .unwrap();

    let mut parts = token.split('.').collect::<Vec<_>>();
    let donor_sig = donor.split('.').last().unwrap();
    parts[2] = donor_sig;

    let forged = parts.join(".");
    assert_eq!(
      LoginClaims::decode(&auth, &forged),
      Err(TokenError::Signature)
    );
  }

  #[test]
  fn rejects_expired_tokens() {
    let auth = auth_config("expired-signing-secret");
    let claims = LoginClaims::issue("b@x.com", AccountType::Player, Duration::seconds(-30));
    let token = claims.encode(&auth).unwrap();

    assert_eq!(LoginClaims::decode(&auth, &token), Err(TokenError::Expired));
  }

  #[test]
  fn rejects_garbage_tokens() {
    let auth = auth_config("garbage-signing-secret");

    assert_eq!(
      LoginClaims::decode(&auth, "definitely.not.a-token"),
      Err(TokenError::Malformed)
    );
    assert_eq!(LoginClaims::decode(&auth, ""), Err(TokenError::Malformed));
  }
}
