use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::database::{Connection, ErrorExt, Result};
use crate::types::id::{EventId, UserId};

#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct Event {
  pub id: EventId,
  pub created_at: NaiveDateTime,
  pub title: String,
  pub description: Option<String>,
  pub location: Option<String>,
  pub starts_at: NaiveDateTime,
  pub created_by: UserId,
}

#[derive(Debug)]
pub struct NewEvent<'a> {
  pub title: &'a str,
  pub description: Option<&'a str>,
  pub location: Option<&'a str>,
  pub starts_at: NaiveDateTime,
  pub created_by: UserId,
}

impl Event {
  #[tracing::instrument(skip_all)]
  pub async fn insert(conn: &mut Connection, entry: NewEvent<'_>) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "events" (title, description, location, starts_at, created_by)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *"#,
    )
    .bind(entry.title)
    .bind(entry.description)
    .bind(entry.location)
    .bind(entry.starts_at)
    .bind(entry.created_by)
    .fetch_one(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(after))]
  pub async fn upcoming(conn: &mut Connection, after: NaiveDateTime) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(
      r#"SELECT * FROM "events" WHERE starts_at >= $1 ORDER BY starts_at ASC"#,
    )
    .bind(after)
    .fetch_all(conn)
    .await
    .into_db_error()
  }
}
