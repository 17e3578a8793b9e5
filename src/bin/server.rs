use actix_web::{middleware::ErrorHandlers, web, App, HttpServer};
use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing::info;
use tracing_actix_web::TracingLogger;

use huddle::config;

#[derive(Debug, Error)]
#[error("Could not start the Huddle HTTP server")]
struct StartError;

#[tokio::main]
async fn main() -> Result<(), StartError> {
  tracing_subscriber::fmt()
    .pretty()
    .with_max_level(tracing::Level::DEBUG)
    .init();

  let config = config::Server::load().change_context(StartError)?;
  let addr = (config.ip, config.port);

  let app = huddle::App::new(config).await.change_context(StartError)?;
  app
    .primary_db
    .migrate()
    .await
    .change_context(StartError)
    .attach_printable("could not run database migrations")?;

  info!("Huddle HTTP server is listening at http://{}:{}", addr.0, addr.1);

  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(app.clone()))
      .wrap(TracingLogger::<huddle::http::util::QuieterRootSpanBuilder>::new())
      .wrap(ErrorHandlers::new().default_handler(huddle::http::util::handle_actix_web_error))
      .configure(huddle::http::controllers::configure)
  })
  .bind(addr)
  .change_context(StartError)
  .attach_printable("could not bind server with address and port")?
  .run()
  .await
  .change_context(StartError)?;

  Ok(())
}
