// verdant/app/src/web/routes.rs

use actix_web::{error, web, HttpResponse};
use verdant::VerdantError;

use crate::errors::AppError;
use crate::web::handlers::plant_handlers;

async fn banner_handler() -> HttpResponse {
  HttpResponse::Ok()
    .content_type("text/plain; charset=utf-8")
    .body("Verdant plant store backend is running.")
}

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Malformed request bodies and query strings are reported like any other
/// validation failure.
fn rejection(message: String) -> error::Error {
  AppError::Domain(VerdantError::Validation(message)).into()
}

// This function will be called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/", web::get().to(banner_handler))
    .service(
      web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(|err, _req| rejection(err.to_string())))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| rejection(err.to_string())))
        .route("/health", web::get().to(health_check_handler))
        .service(
          web::scope("/plants")
            .route("", web::get().to(plant_handlers::list_plants_handler))
            .route("", web::post().to(plant_handlers::create_plant_handler))
            .route("/{plant_id}", web::get().to(plant_handlers::get_plant_handler)),
        ),
    );
}
