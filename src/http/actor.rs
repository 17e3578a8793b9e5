use actix_web::{http::header, web, FromRequest};
use futures::future::{ready, LocalBoxFuture};
use thiserror::Error;

use crate::auth::jwt::LoginClaims;
use crate::schema::User;
use crate::{types, App};

use super::Error;

/// Identity established for one inbound call. Built here, passed down as a
/// handler argument; there is no ambient security context anywhere else.
#[derive(Debug)]
pub enum Actor {
  Anonymous,
  User(User),
}

impl Actor {
  /// Hands out the signed-in account. Whether anonymous callers are
  /// acceptable is each route's own decision, made by calling this or not.
  pub fn user(self) -> Result<User, Error> {
    #[derive(Debug, Error)]
    #[error("Attempt to access a signed-in-only route")]
    struct Unauthorized;

    match self {
      Self::User(user) => Ok(user),
      Self::Anonymous => Err(Error::from_context(
        types::Error::Unauthorized {
          message: "Authentication required".into(),
        },
        Unauthorized,
      )),
    }
  }
}

impl FromRequest for Actor {
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(
    req: &actix_web::HttpRequest,
    _payload: &mut actix_web::dev::Payload,
  ) -> Self::Future {
    // A missing or non-bearer Authorization value is not an error: the call
    // proceeds anonymously. Anything bearer-shaped must check out though.
    let token = req
      .headers()
      .get(header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
      .and_then(|v| v.strip_prefix("Bearer "))
      .map(|v| v.trim().to_owned());

    let Some(token) = token else {
      return Box::pin(ready(Ok(Actor::Anonymous)));
    };

    let Some(app) = req.app_data::<web::Data<App>>() else {
      #[derive(Debug, Error)]
      #[error("The web app has no available configuration")]
      struct NoConfig;
      return Box::pin(ready(Err(Error::from_context(
        types::Error::Internal,
        NoConfig,
      ))));
    };

    let app = app.clone();
    Box::pin(async move {
      #[derive(Debug, Error)]
      #[error("Bearer token subject does not resolve to an account")]
      struct UnknownSubject;

      let claims = LoginClaims::decode(&app.config.auth, &token)?;

      let mut conn = app.db_read_prefer_primary().await?;
      let Some(user) = User::by_email(&mut conn, &claims.sub).await? else {
        return Err(Error::from_context(
          types::Error::Unauthorized {
            message: "Authentication required".into(),
          },
          UnknownSubject,
        ));
      };

      Ok(Actor::User(user))
    })
  }
}
