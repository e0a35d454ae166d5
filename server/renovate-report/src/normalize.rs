//! Strip logger transport metadata from raw records.

use crate::types::{NormalizedRecord, RawRecord};

/// Fields added by the bunyan-style logger rather than by Renovate itself.
pub const METADATA_FIELDS: [&str; 7] = ["name", "hostname", "pid", "level", "logContext", "time", "v"];

/// Remove the metadata fields; everything else passes through in order.
pub fn normalize(mut raw: RawRecord) -> NormalizedRecord {
  for field in METADATA_FIELDS {
    raw.shift_remove(field);
  }
  NormalizedRecord::from_map(raw)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn raw(value: serde_json::Value) -> RawRecord {
    match value {
      serde_json::Value::Object(map) => map,
      _ => unreachable!("fixture must be an object"),
    }
  }

  #[test]
  fn strips_all_metadata_fields() {
    let record = normalize(raw(json!({
      "name": "renovate",
      "hostname": "runner-1",
      "pid": 42,
      "level": 30,
      "logContext": "abc",
      "time": "2025-01-15T10:30:00.000Z",
      "v": 0,
      "msg": "Repository started",
      "repository": "org/app"
    })));
    for field in METADATA_FIELDS {
      assert!(!record.contains_key(field), "{} should be stripped", field);
    }
    assert_eq!(record.msg(), Some("Repository started"));
    assert_eq!(record.repository(), Some("org/app"));
  }

  #[test]
  fn keeps_other_fields_in_order() {
    let record = normalize(raw(json!({
      "repository": "org/app",
      "time": "x",
      "msg": "m",
      "err": {"message": "boom"}
    })));
    let keys: Vec<_> = record.fields().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["repository", "msg", "err"]);
  }

  #[test]
  fn missing_fields_are_fine() {
    let record = normalize(RawRecord::new());
    assert!(record.fields().is_empty());
    assert_eq!(record.repository(), None);
  }
}
