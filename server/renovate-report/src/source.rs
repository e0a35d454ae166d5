//! Line source: read an NDJSON log into normalized records.
//!
//! The whole input is buffered before any reducer runs. A single malformed
//! line aborts the read; there is no per-line recovery.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::ReportError;
use crate::normalize::normalize;
use crate::types::NormalizedRecord;

/// A fully-read log.
#[derive(Debug, Clone, Default)]
pub struct LogInput {
  pub records: Vec<NormalizedRecord>,
  /// Non-blank lines consumed.
  pub line_count: usize,
  /// blake3 hex digest over the non-blank lines.
  pub digest: String,
}

impl LogInput {
  /// Stable identifier of the report built from this input.
  pub fn report_id(&self) -> String {
    format!("rpt-{}", &self.digest[..16.min(self.digest.len())])
  }
}

/// Read and normalize every record of the log at `path`.
pub fn read_log(path: &Path) -> Result<LogInput, ReportError> {
  if !path.exists() {
    return Err(ReportError::input_not_found(path));
  }
  let file = File::open(path).map_err(|e| ReportError::read(path, e))?;
  let input = parse_log(BufReader::new(file)).map_err(|e| match e {
    ReportError::Io(source) => ReportError::read(path, source),
    other => other,
  })?;
  info!(
    path = %path.display(),
    lines = input.line_count,
    records = input.records.len(),
    "log read"
  );
  Ok(input)
}

/// Parse NDJSON from any buffered reader. Blank lines are skipped.
pub fn parse_log<R: BufRead>(reader: R) -> Result<LogInput, ReportError> {
  let mut hasher = blake3::Hasher::new();
  let mut records = Vec::new();
  let mut line_count = 0;

  for (idx, line) in reader.lines().enumerate() {
    let line = line?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }
    line_count += 1;
    hasher.update(trimmed.as_bytes());
    hasher.update(b"\n");

    let value: Value = serde_json::from_str(trimmed).map_err(|source| {
      ReportError::MalformedRecord {
        line: idx + 1,
        source,
      }
    })?;
    match value {
      Value::Object(raw) => records.push(normalize(raw)),
      _ => return Err(ReportError::NotAnObject { line: idx + 1 }),
    }
  }

  let digest = hasher.finalize().to_hex().to_string();
  debug!(records = records.len(), %digest, "parsed log");
  Ok(LogInput {
    records,
    line_count,
    digest,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::{Cursor, Write};

  #[test]
  fn parses_and_normalizes_lines() {
    let data = concat!(
      r#"{"name":"renovate","level":30,"msg":"Repository started","repository":"org/a"}"#,
      "\n\n",
      r#"{"msg":"done"}"#,
      "\n"
    );
    let input = parse_log(Cursor::new(data)).unwrap();
    assert_eq!(input.line_count, 2);
    assert_eq!(input.records.len(), 2);
    assert!(!input.records[0].contains_key("name"));
    assert_eq!(input.records[1].msg(), Some("done"));
  }

  #[test]
  fn malformed_line_aborts_with_line_number() {
    let data = "{\"msg\":\"ok\"}\n{not json\n{\"msg\":\"never\"}\n";
    let err = parse_log(Cursor::new(data)).unwrap_err();
    assert!(matches!(err, ReportError::MalformedRecord { line: 2, .. }));
    assert!(err.to_string().starts_with("line 2: malformed record"));
  }

  #[test]
  fn non_object_line_is_malformed() {
    let err = parse_log(Cursor::new("[1,2]\n")).unwrap_err();
    assert!(matches!(err, ReportError::NotAnObject { line: 1 }));
  }

  #[test]
  fn digest_is_stable_and_ignores_blank_lines() {
    let a = parse_log(Cursor::new("{\"msg\":\"x\"}\n")).unwrap();
    let b = parse_log(Cursor::new("\n{\"msg\":\"x\"}\n\n")).unwrap();
    let c = parse_log(Cursor::new("{\"msg\":\"y\"}\n")).unwrap();
    assert_eq!(a.digest, b.digest);
    assert_ne!(a.digest, c.digest);
    assert_eq!(a.digest.len(), 64);
    assert!(a.report_id().starts_with("rpt-"));
    assert_eq!(a.report_id().len(), 20);
  }

  #[test]
  fn missing_file_is_input_not_found() {
    let err = read_log(Path::new("/definitely/not/here.ndjson")).unwrap_err();
    assert!(matches!(err, ReportError::InputNotFound { .. }));
  }

  #[test]
  fn reads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"repository":"org/a","msg":"hello","pid":1}}"#).unwrap();
    let input = read_log(file.path()).unwrap();
    assert_eq!(input.records.len(), 1);
    assert!(!input.records[0].contains_key("pid"));
  }
}
