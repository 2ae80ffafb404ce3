use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;

/// Line logger shared through the router state. Always writes to stderr;
/// also appends to a file when one is configured.
pub struct Logger {
  file: Option<Mutex<std::fs::File>>,
}

impl Logger {
  pub fn new(path: Option<&Path>) -> anyhow::Result<Self> {
    let file = match path {
      Some(path) => {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Some(Mutex::new(file))
      }
      None => None,
    };
    Ok(Self { file })
  }

  pub fn log(&self, level: &str, message: &str) {
    let ts = Utc::now().to_rfc3339();
    let line = format!("[{ts}] {level}: {message}");
    eprintln!("{line}");
    if let Some(file) = &self.file {
      if let Ok(mut file) = file.lock() {
        let _ = writeln!(file, "{line}");
      }
    }
  }
}
