// verdant/app/src/main.rs

use actix_web::{web as actix_data, App, HttpServer}; // Renamed web to actix_data
use std::sync::Arc;
use verdant_app::config::AppConfig;
use verdant_app::db::{self, PgCatalogStore};
use verdant_app::state::AppState;
use verdant_app::{telemetry, web};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      telemetry::init_tracing(verdant_app::config::LogFormat::Pretty, "info");
      tracing::error!(error = %e, "Failed to load application configuration.");
      std::process::exit(1);
    }
  };
  telemetry::init_tracing(app_config.log_format, "info");
  tracing::info!("Starting Verdant catalog server...");

  // Initialize Database Pool
  let db_pool = match db::connect(&app_config.database_url, app_config.database_max_connections).await {
    Ok(pool) => {
      tracing::info!("Successfully connected to the database.");
      pool
    }
    Err(e) => {
      tracing::error!(error = %e, "Failed to connect to the database.");
      std::process::exit(1);
    }
  };

  if let Err(e) = db::ensure_schema(&db_pool).await {
    tracing::error!(error = %e, "Failed to prepare the catalog schema.");
    std::process::exit(1);
  }

  let app_state = AppState::new(Arc::new(PgCatalogStore::new(db_pool)));

  // Configure and Start Actix Web Server
  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
