//! Structured error types for the report engine.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
  #[error("input file '{}' not found", path.display())]
  InputNotFound { path: PathBuf },

  #[error("read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("line {line}: malformed record: {source}")]
  MalformedRecord {
    line: usize,
    #[source]
    source: serde_json::Error,
  },

  #[error("line {line}: malformed record: expected a JSON object")]
  NotAnObject { line: usize },

  #[error("config {}: {reason}", path.display())]
  Config { path: PathBuf, reason: String },

  #[error("io: {0}")]
  Io(#[from] std::io::Error),
}

impl ReportError {
  pub fn input_not_found(path: &Path) -> Self {
    Self::InputNotFound {
      path: path.to_path_buf(),
    }
  }

  pub fn read(path: &Path, source: std::io::Error) -> Self {
    Self::Read {
      path: path.to_path_buf(),
      source,
    }
  }

  pub fn config(path: &Path, reason: impl Into<String>) -> Self {
    Self::Config {
      path: path.to_path_buf(),
      reason: reason.into(),
    }
  }
}
