// verdant/app/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

impl FromStr for LogFormat {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "pretty" | "text" => Ok(LogFormat::Pretty),
      "json" => Ok(LogFormat::Json),
      other => Err(AppError::Config(format!("Invalid LOG_FORMAT '{}': expected 'pretty' or 'json'", other))),
    }
  }
}

fn get_env(var_name: &str) -> Result<String> {
  env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
}

/// Optional variable parsed into `T`; absent means `default`, unparsable is an error.
fn parse_env_or<T>(var_name: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match env::var(var_name) {
    Ok(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {}: {}", var_name, e))),
    Err(_) => Ok(default),
  }
}

fn parse_url(var_name: &str, raw: &str) -> Result<Url> {
  Url::parse(raw).map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", var_name, raw, e)))
}

/// Settings for the REST server.
#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub database_max_connections: u32,
  pub log_format: LogFormat,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = parse_env_or("SERVER_PORT", 8080u16)?;
    let database_url = get_env("DATABASE_URL")?;
    let database_max_connections = parse_env_or("DATABASE_MAX_CONNECTIONS", 5u32)?;
    let log_format = match env::var("LOG_FORMAT") {
      Ok(raw) => raw.parse::<LogFormat>()?,
      Err(_) => LogFormat::Pretty,
    };

    tracing::info!("Application configuration loaded successfully.");
    // The database URL carries credentials; keep it out of the logs.
    tracing::debug!(server_host = %server_host, server_port, database_max_connections, "Loaded config details");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

/// Settings for the catalog ingestion job.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
  pub database_url: String,
  pub source_base_url: Url,
  pub page_size: usize,
  pub timeout_secs: u64,
}

impl ScrapeConfig {
  pub const DEFAULT_SOURCE_BASE_URL: &'static str = "https://www.urvann.com";

  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let database_url = get_env("DATABASE_URL")?;
    let raw_base = get_env("SCRAPE_BASE_URL").unwrap_or_else(|_| Self::DEFAULT_SOURCE_BASE_URL.to_string());
    let source_base_url = parse_url("SCRAPE_BASE_URL", &raw_base)?;
    let page_size = parse_env_or("SCRAPE_PAGE_SIZE", verdant::ingest::DEFAULT_PAGE_SIZE)?;
    if page_size == 0 {
      return Err(AppError::Config("SCRAPE_PAGE_SIZE must be at least 1".to_string()));
    }
    let timeout_secs = parse_env_or("SCRAPE_TIMEOUT_SECS", 10u64)?;

    Ok(Self {
      database_url,
      source_base_url,
      page_size,
      timeout_secs,
    })
  }
}

/// Settings for the terminal storefront. Command-line flags override these.
#[derive(Debug, Clone)]
pub struct ShopConfig {
  pub api_url: Url,
  pub data_dir: PathBuf,
  pub timeout_secs: u64,
}

impl ShopConfig {
  pub const DEFAULT_API_URL: &'static str = "http://127.0.0.1:8080/api";
  pub const DEFAULT_DATA_DIR: &'static str = ".verdant";

  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let raw_api = get_env("VERDANT_API_URL").unwrap_or_else(|_| Self::DEFAULT_API_URL.to_string());
    let api_url = parse_url("VERDANT_API_URL", &raw_api)?;
    let data_dir = get_env("VERDANT_DATA_DIR")
      .map(PathBuf::from)
      .unwrap_or_else(|_| PathBuf::from(Self::DEFAULT_DATA_DIR));
    let timeout_secs = parse_env_or("VERDANT_HTTP_TIMEOUT_SECS", 10u64)?;

    Ok(Self {
      api_url,
      data_dir,
      timeout_secs,
    })
  }
}
