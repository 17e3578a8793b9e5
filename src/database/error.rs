use error_stack::Report;

pub type Result<T> = std::result::Result<T, Report<Error>>;

// SQLSTATE raised when a write hits a read-only replica.
const READ_ONLY_SQLSTATE: &str = "25006";

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Invalid Postgres connection URL")]
  InvalidUrl,
  #[error("Database pool is unhealthy")]
  UnhealthyPool,
  #[error("Database is in read-only mode")]
  Readonly,
  #[error("Failed to perform database migrations")]
  Migrate(#[source] sqlx::migrate::MigrateError),
  #[error("Internal database error")]
  Internal(#[source] sqlx::Error),
}

impl Error {
  fn from_sqlx(error: sqlx::Error) -> Self {
    if let sqlx::Error::Database(ref db_error) = error {
      if db_error.code().as_deref() == Some(READ_ONLY_SQLSTATE) {
        return Self::Readonly;
      }
    }
    Self::Internal(error)
  }
}

pub trait ErrorExt<T> {
  fn into_db_error(self) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, sqlx::Error> {
  fn into_db_error(self) -> Result<T> {
    self.map_err(|e| Report::new(Error::from_sqlx(e)))
  }
}

pub trait ErrorExt2 {
  fn is_unhealthy(&self) -> bool;
}

impl ErrorExt2 for Report<Error> {
  fn is_unhealthy(&self) -> bool {
    matches!(self.current_context(), Error::UnhealthyPool)
  }
}
