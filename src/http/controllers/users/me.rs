use actix_web::{
  web::{self, Json},
  HttpResponse,
};
use serde_json::json;
use validator::Validate;

use crate::http::{Actor, Error};
use crate::schema::User;
use crate::types::form::users::update_profile;
use crate::App;

#[tracing::instrument(skip_all)]
pub async fn me(actor: Actor) -> Result<HttpResponse, Error> {
  let user = actor.user()?;

  Ok(HttpResponse::Ok().json(json!({
    "id": user.id,
    "created_at": user.created_at,
    "name": user.name,
    "email": user.email,
    "contact_number": user.contact_number,
    "account_type": user.account_type,
    "last_login_at": user.last_login_at,
  })))
}

#[tracing::instrument(skip_all)]
pub async fn update_me(
  app: web::Data<App>,
  actor: Actor,
  form: Json<update_profile::Request>,
) -> Result<HttpResponse, Error> {
  let user = actor.user()?;
  let form = form.into_inner();
  form.validate()?;

  let mut conn = app.db_write().await?;
  let _user =
    User::update_profile(&mut conn, user.id, &form.name, form.contact_number.as_deref()).await?;
  drop(conn);

  Ok(HttpResponse::Ok().json(update_profile::Response {
    message: "User details updated successfully".to_string(),
    success: true,
  }))
}
