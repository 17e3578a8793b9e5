use actix_web::{
  web::{self, Json},
  HttpResponse,
};
use validator::Validate;

use crate::auth::service;
use crate::http::Error;
use crate::types::form::auth::signup;
use crate::App;

#[tracing::instrument]
pub async fn signup(
  app: web::Data<App>,
  form: Json<signup::Request>,
) -> Result<HttpResponse, Error> {
  let form = form.into_inner();
  form.validate()?;

  let response = service::signup(app.get_ref(), &form).await?;
  Ok(HttpResponse::Ok().json(response))
}
