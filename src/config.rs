use std::env;
use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Clone)]
pub struct AppConfig {
  pub port: u16,
  pub gemini_api_key: String,
  pub model: String,
  pub allowed_origins: Vec<String>,
  pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      port: DEFAULT_PORT,
      gemini_api_key: String::new(),
      model: DEFAULT_MODEL.to_string(),
      allowed_origins: default_origins(),
      log_file: None,
    }
  }
}

impl AppConfig {
  /// Built once at startup and handed to the router by value; the process
  /// refuses to start without a credential rather than serving guaranteed
  /// upstream failures.
  pub fn from_env() -> anyhow::Result<Self> {
    let gemini_api_key = env::var("GEMINI_API_KEY")
      .ok()
      .filter(|key| !key.trim().is_empty())
      .context("GEMINI_API_KEY is not set")?;

    let port = env::var("PORT")
      .ok()
      .and_then(|p| p.parse().ok())
      .unwrap_or(DEFAULT_PORT);

    let model = env::var("GEMINI_MODEL")
      .ok()
      .filter(|m| !m.trim().is_empty())
      .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let allowed_origins = env::var("CORS_ALLOW_ORIGINS")
      .map(|raw| parse_origins(&raw))
      .unwrap_or_else(|_| default_origins());

    let log_file = env::var("GATEWAY_LOG").ok().map(PathBuf::from);

    Ok(Self {
      port,
      gemini_api_key,
      model,
      allowed_origins,
      log_file,
    })
  }

  pub fn allows_any_origin(&self) -> bool {
    self.allowed_origins.iter().any(|origin| origin == "*")
  }
}

fn default_origins() -> Vec<String> {
  vec!["http://localhost:5173".to_string(), "*".to_string()]
}

pub fn parse_origins(raw: &str) -> Vec<String> {
  let origins: Vec<String> = raw
    .split(',')
    .map(str::trim)
    .filter(|origin| !origin.is_empty())
    .map(str::to_string)
    .collect();

  if origins.is_empty() {
    default_origins()
  } else {
    origins
  }
}
