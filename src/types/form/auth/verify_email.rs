use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct Query {
  pub token: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Response {
  pub message: String,
  pub success: bool,
}
