use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::http::{Actor, Error};
use crate::schema::Event;
use crate::App;

#[tracing::instrument(skip_all)]
pub async fn list(app: web::Data<App>, actor: Actor) -> Result<HttpResponse, Error> {
  let _user = actor.user()?;

  let mut conn = app.db_read().await?;
  let events = Event::upcoming(&mut conn, Utc::now().naive_utc()).await?;
  drop(conn);

  Ok(HttpResponse::Ok().json(events))
}
