use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::HttpResponse;
use serde_json::json;
use tracing::Span;
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder};

/// Root span builder without the default noisy HTTP metadata fields.
pub struct QuieterRootSpanBuilder;

impl RootSpanBuilder for QuieterRootSpanBuilder {
  fn on_request_start(request: &ServiceRequest) -> Span {
    tracing_actix_web::root_span!(request)
  }

  fn on_request_end<B: MessageBody>(
    span: Span,
    outcome: &Result<ServiceResponse<B>, actix_web::Error>,
  ) {
    DefaultRootSpanBuilder::on_request_end(span, outcome);
  }
}

/// Renders framework-level failures (unroutable paths, broken payloads and
/// the like) with the same JSON shape application errors use.
pub fn handle_actix_web_error<B>(
  res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
  let (req, res) = res.into_parts();
  let status = res.status();
  let message = status.canonical_reason().unwrap_or("Unknown error");

  let res = HttpResponse::build(status).json(json!({
    "code": "http_error",
    "message": message,
  }));

  let res = ServiceResponse::new(req, res).map_into_right_body();
  Ok(ErrorHandlerResponse::Response(res))
}
