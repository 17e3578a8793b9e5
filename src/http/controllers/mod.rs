use actix_web::web;

pub mod auth;
pub mod events;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
  cfg
    .service(
      web::scope("/auth")
        .route("/signup", web::post().to(auth::signup))
        .route("/signin", web::post().to(auth::signin))
        .route("/verify-email", web::get().to(auth::verify_email))
        .route(
          "/request-reset-password",
          web::post().to(auth::request_reset_password),
        )
        .route("/reset-password", web::post().to(auth::reset_password)),
    )
    .service(
      web::scope("/users")
        .route("/me", web::get().to(users::me))
        .route("/me", web::put().to(users::update_me)),
    )
    .service(
      web::scope("/events")
        .route("", web::post().to(events::create))
        .route("", web::get().to(events::list)),
    );
}
