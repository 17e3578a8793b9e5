use actix_web::{
  http::header,
  web::{self, Json},
  HttpResponse,
};
use validator::Validate;

use crate::auth::service;
use crate::http::Error;
use crate::types::form::auth::signin;
use crate::App;

#[tracing::instrument]
pub async fn signin(
  app: web::Data<App>,
  form: Json<signin::Request>,
) -> Result<HttpResponse, Error> {
  let form = form.into_inner();
  form.validate()?;

  let (_user, token) = service::sign_in(app.get_ref(), &form).await?;

  // The bearer credential travels in the response header; the body only
  // carries the outcome indicator.
  Ok(
    HttpResponse::Ok()
      .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
      .json(signin::Response {
        message: "User authenticated successfully".to_string(),
        success: true,
      }),
  )
}
