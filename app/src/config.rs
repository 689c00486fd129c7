// app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  /// Base of every public object URL handed back by blob storage.
  pub storage_public_url: String,
  pub product_bucket: String,
  pub coop_bucket: String,

  /// Seeds an HQ account and a demo store on startup.
  pub seed_demo_data: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let get_env = |var_name: &str, default: &str| env::var(var_name).unwrap_or_else(|_| default.to_string());

    let server_host = get_env("SERVER_HOST", "127.0.0.1");
    let server_port = get_env("SERVER_PORT", "8080")
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let storage_public_url = get_env("STORAGE_PUBLIC_URL", "http://localhost:8080/storage")
      .trim_end_matches('/')
      .to_string();
    let product_bucket = get_env("PRODUCT_BUCKET", "products");
    let coop_bucket = get_env("COOP_BUCKET", "coops");
    if product_bucket.is_empty() || coop_bucket.is_empty() {
      return Err(AppError::Config("Bucket names must not be empty".to_string()));
    }
    if product_bucket == coop_bucket {
      return Err(AppError::Config(format!(
        "PRODUCT_BUCKET and COOP_BUCKET must differ (both are '{}')",
        product_bucket
      )));
    }

    let seed_demo_data = get_env("SEED_DEMO_DATA", "false")
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DEMO_DATA value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      storage_public_url,
      product_bucket,
      coop_bucket,
      seed_demo_data,
    })
  }

  pub fn server_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      storage_public_url: "http://localhost:8080/storage".to_string(),
      product_bucket: "products".to_string(),
      coop_bucket: "coops".to_string(),
      seed_demo_data: false,
    }
  }
}
