use chrono::NaiveDateTime;

pub mod jwt;
pub mod reset;
pub mod service;
pub mod verification;

/// Whether something expiring at `expires_at` is still usable at `now`.
///
/// The expiry instant itself already counts as expired, and no clock-skew
/// allowance is applied. A missing expiry is treated as expired since token
/// and expiry columns are only ever written as a pair.
#[must_use]
pub fn is_expired(expires_at: Option<NaiveDateTime>, now: NaiveDateTime) -> bool {
  expires_at.map_or(true, |at| now >= at)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, Utc};

  #[test]
  fn expiry_boundary() {
    let expiry = Utc::now().naive_utc();

    assert!(!is_expired(Some(expiry), expiry - Duration::seconds(1)));
    assert!(is_expired(Some(expiry), expiry));
    assert!(is_expired(Some(expiry), expiry + Duration::seconds(1)));
  }

  #[test]
  fn missing_expiry_counts_as_expired() {
    assert!(is_expired(None, Utc::now().naive_utc()));
  }
}
