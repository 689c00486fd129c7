// app/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use coop_app::config::AppConfig;
use coop_app::services::seed::seed_demo_data;
use coop_app::state::AppState;
use coop_app::web::configure_app_routes;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting co-op application server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  let app_state = AppState::in_memory(app_config.clone());

  if app_config.seed_demo_data {
    if let Err(e) = seed_demo_data(&app_state.backend).await {
      tracing::error!(error = %e, "Failed to seed demo data.");
    }
  }

  let server_address = app_config.server_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
