// verdant/app/src/bin/scrape.rs

//! Refreshes the catalog from the third-party storefront API.

use std::sync::Arc;
use std::time::Duration;
use verdant::IngestionJob;
use verdant_app::config::{LogFormat, ScrapeConfig};
use verdant_app::db::{self, PgCatalogStore};
use verdant_app::services::StorefrontApiSource;
use verdant_app::telemetry;

#[tokio::main]
async fn main() {
  telemetry::init_tracing(LogFormat::Pretty, "info");

  let config = match ScrapeConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load scrape configuration.");
      std::process::exit(1);
    }
  };

  let pool = match db::connect(&config.database_url, 2).await {
    Ok(pool) => {
      tracing::info!("Database connected.");
      pool
    }
    Err(e) => {
      tracing::error!(error = %e, "Failed to connect to the database.");
      std::process::exit(1);
    }
  };
  if let Err(e) = db::ensure_schema(&pool).await {
    tracing::error!(error = %e, "Failed to prepare the catalog schema.");
    std::process::exit(1);
  }

  let source = match StorefrontApiSource::new(config.source_base_url.clone(), Duration::from_secs(config.timeout_secs)) {
    Ok(source) => source,
    Err(e) => {
      tracing::error!(error = %e, "Failed to build the product source client.");
      std::process::exit(1);
    }
  };

  tracing::info!(source = %config.source_base_url, page_size = config.page_size, "Starting catalog ingestion.");
  let job = IngestionJob::new(Arc::new(source), Arc::new(PgCatalogStore::new(pool.clone()))).with_page_size(config.page_size);
  let report = job.run().await;

  if !report.failed_categories.is_empty() {
    tracing::warn!(categories = ?report.failed_categories, "Some categories were only partially scraped.");
  }
  tracing::info!(?report, "Catalog ingestion finished.");
  pool.close().await;
}
