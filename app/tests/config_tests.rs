// tests/config_tests.rs
use coop_app::config::AppConfig;
use coop_app::errors::AppError;
use serial_test::serial;
use std::env;

const VARS: [&str; 6] = [
  "SERVER_HOST",
  "SERVER_PORT",
  "STORAGE_PUBLIC_URL",
  "PRODUCT_BUCKET",
  "COOP_BUCKET",
  "SEED_DEMO_DATA",
];

fn clear_env() {
  for var in VARS {
    env::remove_var(var);
  }
}

#[test]
#[serial]
fn defaults_apply_when_nothing_is_set() {
  clear_env();
  let config = AppConfig::from_env().expect("config");

  assert_eq!(config.server_address(), "127.0.0.1:8080");
  assert_eq!(config.product_bucket, "products");
  assert_eq!(config.coop_bucket, "coops");
  assert!(!config.seed_demo_data);
}

#[test]
#[serial]
fn environment_overrides_defaults() {
  clear_env();
  env::set_var("SERVER_PORT", "9090");
  env::set_var("STORAGE_PUBLIC_URL", "https://cdn.example.com/");
  env::set_var("COOP_BUCKET", "group-buys");
  env::set_var("SEED_DEMO_DATA", "true");

  let config = AppConfig::from_env().expect("config");
  clear_env();

  assert_eq!(config.server_port, 9090);
  assert_eq!(config.storage_public_url, "https://cdn.example.com");
  assert_eq!(config.coop_bucket, "group-buys");
  assert!(config.seed_demo_data);
}

#[test]
#[serial]
fn invalid_port_is_a_config_error() {
  clear_env();
  env::set_var("SERVER_PORT", "eighty");

  let err = AppConfig::from_env().unwrap_err();
  clear_env();

  assert!(matches!(err, AppError::Config(ref msg) if msg.contains("SERVER_PORT")));
}

#[test]
#[serial]
fn buckets_must_differ() {
  clear_env();
  env::set_var("PRODUCT_BUCKET", "images");
  env::set_var("COOP_BUCKET", "images");

  let err = AppConfig::from_env().unwrap_err();
  clear_env();

  assert!(matches!(err, AppError::Config(_)));
}
