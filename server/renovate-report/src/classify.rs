//! Classify failure records and reduce them to one summary per repository.
//!
//! A record is a candidate failure if it carries a non-empty `err`, or if its
//! `msg` starts with [`LOOKUP_FAILURE_PREFIX`]. The first candidate seen for a
//! repository is kept; later candidates for the same repository are ignored,
//! even when they are more complete.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::types::{ErrorDetail, ErrorKind, ErrorSummary, NormalizedRecord};

/// Renovate's message prefix for datasource lookups that failed without an `err` object.
pub const LOOKUP_FAILURE_PREFIX: &str = "Failed to look up";

/// True if the record should be reported as a failure.
pub fn is_candidate(record: &NormalizedRecord) -> bool {
  record.has_err() || record.msg().is_some_and(|m| m.starts_with(LOOKUP_FAILURE_PREFIX))
}

/// Build the summary for a candidate record, synthesizing `err` for lookup failures.
///
/// Returns `None` when the record cannot be attributed to a repository.
pub fn summarize(record: &NormalizedRecord) -> Option<ErrorSummary> {
  let repository = record.repository()?.to_string();

  let mut fields = record.fields().clone();
  fields.shift_remove("repository");
  let mut kind = fields
    .shift_remove("type")
    .and_then(|v| v.as_str().and_then(ErrorKind::from_str_loose));
  let err = if record.has_err() {
    fields.shift_remove("err").map(error_detail)
  } else {
    fields.shift_remove("err");
    None
  };
  let msg = take_string(&mut fields, "msg");
  let dependency = take_string(&mut fields, "dependency");
  let package_file = take_string(&mut fields, "packageFile");
  let url = take_string(&mut fields, "url");

  let mut summary = ErrorSummary {
    repository,
    kind: None,
    err,
    msg,
    dependency,
    package_file,
    url,
    extra: fields,
  };

  if summary.err.is_none() {
    if let Some(msg) = summary.msg.as_deref().filter(|m| m.starts_with(LOOKUP_FAILURE_PREFIX)) {
      summary.err = Some(ErrorDetail {
        message: lookup_failure_message(
          msg,
          summary.dependency.as_deref(),
          summary.package_file.as_deref(),
        ),
        extra: Map::new(),
      });
      if let Some(inferred) = infer_kind(msg) {
        kind = Some(inferred);
      }
    }
  }
  summary.kind = kind;
  Some(summary)
}

/// `msg` + `": " + dependency` + `" in " + packageFile`, each suffix only if present.
pub fn lookup_failure_message(msg: &str, dependency: Option<&str>, package_file: Option<&str>) -> String {
  let mut message = msg.to_string();
  if let Some(dep) = dependency {
    message.push_str(": ");
    message.push_str(dep);
  }
  if let Some(file) = package_file {
    message.push_str(" in ");
    message.push_str(file);
  }
  message
}

/// Only npm and docker lookups are recognized from the message text.
pub fn infer_kind(msg: &str) -> Option<ErrorKind> {
  if msg.contains("npm package") {
    Some(ErrorKind::Npm)
  } else if msg.contains("docker package") {
    Some(ErrorKind::Docker)
  } else {
    None
  }
}

fn error_detail(value: Value) -> ErrorDetail {
  match value {
    Value::Object(mut extra) => {
      let message = match extra.shift_remove("message") {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
      };
      ErrorDetail { message, extra }
    }
    Value::String(message) => ErrorDetail {
      message,
      extra: Map::new(),
    },
    other => ErrorDetail {
      message: other.to_string(),
      extra: Map::new(),
    },
  }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
  if !fields.get(key).is_some_and(Value::is_string) {
    return None;
  }
  match fields.shift_remove(key) {
    Some(Value::String(s)) => Some(s),
    _ => None,
  }
}

/// Accumulates failure summaries keyed by repository, first-seen-wins.
#[derive(Debug, Default)]
pub struct Deduplicator {
  summaries: IndexMap<String, ErrorSummary>,
}

impl Deduplicator {
  pub fn new() -> Self {
    Self::default()
  }

  /// Offer one record. Returns true if it became the summary for its repository.
  pub fn push(&mut self, record: &NormalizedRecord) -> bool {
    if !is_candidate(record) {
      return false;
    }
    let Some(repository) = record.repository() else {
      trace!(msg = ?record.msg(), "failure without repository skipped");
      return false;
    };
    if self.summaries.contains_key(repository) {
      trace!(repository, "repository already has a failure summary");
      return false;
    }
    match summarize(record) {
      Some(summary) => match self.summaries.entry(summary.repository.clone()) {
        Entry::Vacant(slot) => {
          slot.insert(summary);
          true
        }
        Entry::Occupied(_) => false,
      },
      None => false,
    }
  }

  pub fn len(&self) -> usize {
    self.summaries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.summaries.is_empty()
  }

  /// Repository -> summary, in first-seen order.
  pub fn into_map(self) -> IndexMap<String, ErrorSummary> {
    self.summaries
  }
}

/// Reduce a record stream to at most one failure summary per repository.
pub fn dedup_errors<'a, I>(records: I) -> IndexMap<String, ErrorSummary>
where
  I: IntoIterator<Item = &'a NormalizedRecord>,
{
  let mut dedup = Deduplicator::new();
  for record in records {
    dedup.push(record);
  }
  debug!(repositories = dedup.len(), "failures deduplicated");
  dedup.into_map()
}
