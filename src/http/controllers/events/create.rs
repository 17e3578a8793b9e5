use actix_web::{
  web::{self, Json},
  HttpResponse,
};
use thiserror::Error as ThisError;
use validator::Validate;

use crate::http::{Actor, Error};
use crate::schema::event::NewEvent;
use crate::schema::user::AccountType;
use crate::schema::Event;
use crate::types;
use crate::types::form::events::create as create_form;
use crate::App;

#[tracing::instrument(skip_all)]
pub async fn create(
  app: web::Data<App>,
  actor: Actor,
  form: Json<create_form::Request>,
) -> Result<HttpResponse, Error> {
  #[derive(Debug, ThisError)]
  #[error("Attempt to create an event without the Coach role")]
  struct NotACoach;

  let user = actor.user()?;
  if user.account_type != AccountType::Coach {
    return Err(Error::from_context(
      types::Error::Forbidden {
        message: "Only coaches can create events".into(),
      },
      NotACoach,
    ));
  }

  let form = form.into_inner();
  form.validate()?;

  let mut conn = app.db_write().await?;
  let event = Event::insert(
    &mut conn,
    NewEvent {
      title: &form.title,
      description: form.description.as_deref(),
      location: form.location.as_deref(),
      starts_at: form.starts_at,
      created_by: user.id,
    },
  )
  .await?;
  drop(conn);

  Ok(HttpResponse::Created().json(event))
}
