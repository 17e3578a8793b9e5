use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct Query {
  #[serde(rename = "userEmail")]
  pub user_email: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Response {
  pub message: String,
  pub success: bool,
}
