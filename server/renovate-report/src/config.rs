//! Report configuration with sane defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ReportError;

/// Error message Renovate emits for every repository with a stale branch; never actionable.
pub const DEFAULT_EXCLUDED_MESSAGE: &str = "isBranchConflicted: cleanup error";

/// Default size of the noisy-project view.
pub const DEFAULT_NOISY_TOP_N: usize = 16;

/// Tunables consumed by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Error records whose `msg` equals one of these (exact, case-sensitive) are dropped.
  pub excluded_messages: Vec<String>,
  /// How many repositories the noisy-project ranking aims to show.
  pub noisy_top_n: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      excluded_messages: vec![DEFAULT_EXCLUDED_MESSAGE.to_string()],
      noisy_top_n: DEFAULT_NOISY_TOP_N,
    }
  }
}

impl Config {
  /// Load a JSON config file. Missing keys fall back to the defaults.
  pub fn from_file(path: &Path) -> Result<Self, ReportError> {
    let raw = fs::read_to_string(path).map_err(|e| ReportError::config(path, e.to_string()))?;
    let config: Config =
      serde_json::from_str(&raw).map_err(|e| ReportError::config(path, e.to_string()))?;
    debug!(path = %path.display(), ?config, "loaded config file");
    Ok(config)
  }

  /// Append extra exclusions (e.g. from the command line), skipping duplicates.
  pub fn exclude<I, S>(&mut self, messages: I)
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    for msg in messages {
      let msg = msg.into();
      if !self.excluded_messages.contains(&msg) {
        self.excluded_messages.push(msg);
      }
    }
  }
}
