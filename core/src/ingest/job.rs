// verdant/core/src/ingest/job.rs

use crate::catalog::store::CatalogStore;
use crate::ingest::source::{ProductPage, ProductSource};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Outcome of one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
  pub categories: usize,
  pub fetched: usize,
  pub upserted: usize,
  pub skipped: usize,
  pub failed_upserts: usize,
  /// Categories whose page loop ended on an error.
  pub failed_categories: Vec<String>,
}

/// Non-empty pages fetched for one category.
struct CategoryHarvest {
  pages: Vec<ProductPage>,
  failed: bool,
}

impl CategoryHarvest {
  fn records(&self) -> usize {
    self.pages.iter().map(ProductPage::len).sum()
  }
}

/// Refreshes the catalog from a product source, one category at a time.
pub struct IngestionJob {
  source: Arc<dyn ProductSource>,
  store: Arc<dyn CatalogStore>,
  page_size: usize,
}

impl IngestionJob {
  pub fn new(source: Arc<dyn ProductSource>, store: Arc<dyn CatalogStore>) -> Self {
    Self {
      source,
      store,
      page_size: DEFAULT_PAGE_SIZE,
    }
  }

  pub fn with_page_size(mut self, page_size: usize) -> Self {
    self.page_size = page_size.max(1);
    self
  }

  /// Runs the whole refresh. Failures are logged and counted in the report;
  /// none of them abort the job.
  #[instrument(name = "ingest::run", skip(self), fields(page_size = self.page_size))]
  pub async fn run(&self) -> IngestReport {
    let mut report = IngestReport::default();

    let categories = match self.source.categories().await {
      Ok(categories) => categories,
      Err(e) => {
        error!(error = %e, "Error fetching categories.");
        Vec::new()
      }
    };
    info!("Found {} categories: {:?}", categories.len(), categories);
    report.categories = categories.len();

    for category in &categories {
      let harvest = self.scrape_category(category).await;
      report.fetched += harvest.records();
      if harvest.failed {
        report.failed_categories.push(category.clone());
      }

      for page in &harvest.pages {
        let base_url = page.file_base_url.as_deref().unwrap_or_default();
        for record in page.products() {
          let draft = match record.and_then(|product| product.to_draft(category, base_url)) {
            Ok(draft) => draft,
            Err(reason) => {
              warn!(category = %category, "Skipping product: {}.", reason);
              report.skipped += 1;
              continue;
            }
          };
          let name = draft.name.clone();
          match self.store.upsert_by_name(draft).await {
            Ok(_) => report.upserted += 1,
            Err(e) => {
              error!(category = %category, plant = %name, error = %e, "Failed to upsert plant.");
              report.failed_upserts += 1;
            }
          }
        }
      }
    }

    info!(
      fetched = report.fetched,
      upserted = report.upserted,
      skipped = report.skipped,
      failed_upserts = report.failed_upserts,
      failed_categories = report.failed_categories.len(),
      "Total plants scraped: {}.",
      report.fetched
    );
    report
  }

  /// Pages through one category until an empty page. A failed page ends the
  /// loop but keeps what was already fetched.
  async fn scrape_category(&self, category: &str) -> CategoryHarvest {
    let mut harvest = CategoryHarvest {
      pages: Vec::new(),
      failed: false,
    };
    let mut start = 0;

    loop {
      match self.source.fetch_page(category, start, self.page_size).await {
        Ok(page) => {
          if page.is_empty() {
            return harvest;
          }
          let fetched = page.len();
          harvest.pages.push(page);
          info!(
            "[{}] Fetched {} (total so far: {}).",
            category,
            fetched,
            harvest.records()
          );
          start += self.page_size;
        }
        Err(e) => {
          error!(category = %category, start, error = %e, "Error scraping category.");
          harvest.failed = true;
          return harvest;
        }
      }
    }
  }
}
