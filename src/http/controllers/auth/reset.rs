use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::auth::reset;
use crate::http::Error;
use crate::types::form::auth::{request_reset, reset_password};
use crate::App;

#[tracing::instrument(skip(query))]
pub async fn request_reset_password(
  app: web::Data<App>,
  query: web::Query<request_reset::Query>,
) -> Result<HttpResponse, Error> {
  let mut conn = app.db_write().await?;
  reset::request(&mut conn, app.mailer.as_ref(), &query.user_email).await?;
  drop(conn);

  Ok(HttpResponse::Ok().json(request_reset::Response {
    message: "Reset password OTP sent successfully.".to_string(),
    success: true,
  }))
}

#[tracing::instrument(skip(query))]
pub async fn reset_password(
  app: web::Data<App>,
  query: web::Query<reset_password::Query>,
) -> Result<HttpResponse, Error> {
  let query = query.into_inner();
  query.validate()?;

  let mut conn = app.db_write().await?;
  let _user = reset::complete(
    &mut conn,
    &query.user_email,
    &query.otp,
    query.new_password.as_str(),
  )
  .await?;
  drop(conn);

  Ok(HttpResponse::Ok().json(reset_password::Response {
    message: "Password reset successfully".to_string(),
    success: true,
  }))
}
