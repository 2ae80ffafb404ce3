mod config;
mod error;
mod gemini;
mod image;
mod logger;
mod models;
mod prompts;
mod router;

use std::sync::Arc;

use config::AppConfig;
use gemini::GeminiClient;
use logger::Logger;
use router::{run_router, RouterState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // .env is optional; the process environment alone works too.
  let _ = dotenvy::dotenv();

  let config = AppConfig::from_env()?;
  let logger = Arc::new(Logger::new(config.log_file.as_deref())?);
  logger.log(
    "INFO",
    &format!(
      "canvas-gateway listening on port {} (model: {})",
      config.port, config.model
    ),
  );

  let model = Arc::new(GeminiClient::new(&config));
  let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

  let state = RouterState {
    config,
    model,
    logger,
  };
  run_router(listener, state).await
}
