use actix_web::{web, HttpResponse};

use crate::auth::verification;
use crate::http::Error;
use crate::types::form::auth::verify_email;
use crate::App;

#[tracing::instrument(skip(query))]
pub async fn verify_email(
  app: web::Data<App>,
  query: web::Query<verify_email::Query>,
) -> Result<HttpResponse, Error> {
  let mut conn = app.db_write().await?;
  let _user = verification::redeem(&mut conn, &query.token).await?;
  drop(conn);

  Ok(HttpResponse::Ok().json(verify_email::Response {
    message: "Email verified successfully".to_string(),
    success: true,
  }))
}
