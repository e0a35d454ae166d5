//! Core types for the report engine (JSON contracts + internal models).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Records (one per log line)
// ---------------------------------------------------------------------------

/// One parsed log line. No schema beyond optional `msg` and `repository`.
pub type RawRecord = Map<String, Value>;

/// A log record with the logger's transport fields removed.
/// Every other field passes through unchanged, in its original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedRecord(Map<String, Value>);

impl NormalizedRecord {
  pub(crate) fn from_map(fields: Map<String, Value>) -> Self {
    Self(fields)
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.0.contains_key(key)
  }

  /// String value of `key`, if present and a string.
  pub fn str_field(&self, key: &str) -> Option<&str> {
    self.0.get(key).and_then(Value::as_str)
  }

  pub fn repository(&self) -> Option<&str> {
    self.str_field("repository").filter(|r| !r.is_empty())
  }

  pub fn msg(&self) -> Option<&str> {
    self.str_field("msg")
  }

  /// True if the record carries an `err` that is not null or empty.
  pub fn has_err(&self) -> bool {
    self.0.get("err").is_some_and(is_non_empty)
  }

  pub fn fields(&self) -> &Map<String, Value> {
    &self.0
  }
}

fn is_non_empty(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::String(s) => !s.is_empty(),
    Value::Array(a) => !a.is_empty(),
    Value::Object(o) => !o.is_empty(),
    _ => true,
  }
}

// ---------------------------------------------------------------------------
// Error summaries
// ---------------------------------------------------------------------------

/// Package ecosystem a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
  Npm,
  Docker,
  Maven,
}

impl ErrorKind {
  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s {
      "npm" => Some(Self::Npm),
      "docker" => Some(Self::Docker),
      "maven" => Some(Self::Maven),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Npm => "npm",
      Self::Docker => "docker",
      Self::Maven => "maven",
    }
  }
}

/// The `err` object of a failure. Unknown keys (stack, statusCode, ...) are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
  #[serde(default)]
  pub message: String,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// At most one per repository: the reduced representation of a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSummary {
  pub repository: String,
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub kind: Option<ErrorKind>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub err: Option<ErrorDetail>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub msg: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dependency: Option<String>,
  #[serde(
    rename = "packageFile",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub package_file: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
  /// Remaining record fields, passed through untouched.
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl ErrorSummary {
  /// Last `/`-separated segment of the repository path ("org/team/app" -> "app").
  pub fn short_repository(&self) -> &str {
    short_name(&self.repository)
  }

  pub fn err_message(&self) -> Option<&str> {
    self.err.as_ref().map(|e| e.message.as_str())
  }
}

pub(crate) fn short_name(repository: &str) -> &str {
  repository.rsplit('/').next().unwrap_or(repository)
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoisyProject {
  pub repository: String,
  pub count: usize,
}

/// Noisy-project view: the selected repositories plus the global average.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoisyProjects {
  pub entries: Vec<NoisyProject>,
  /// floor(total records / repositories); 0 when no repository logged anything.
  pub average: usize,
  pub repository_count: usize,
}

/// Running totals for one package manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ManagerUsageStat {
  pub repository_count: usize,
  pub total_files: u64,
}

/// One display row of the manager-usage table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerUsage {
  pub manager: String,
  pub repository_count: usize,
  /// Share of repositories with manager data, one decimal place.
  pub percent_of_repositories: f64,
  pub total_files: u64,
  /// One decimal place.
  pub average_files: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ManagerUsageStats {
  /// Sorted by repository count, descending.
  pub managers: Vec<ManagerUsage>,
  pub repositories_with_managers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyNotFound {
  pub repository: String,
  pub dependency: String,
  pub version: String,
  pub url: String,
  pub message: String,
}

/// Merge-request activity across the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeRequestActivity {
  /// repository -> latest branch or PR title (last-write-wins).
  pub branches: IndexMap<String, String>,
  pub pr_created: usize,
  pub pr_updated: usize,
}

impl MergeRequestActivity {
  /// Repositories with prepared commits, reported as created merge requests.
  pub fn created_count(&self) -> usize {
    self.branches.len()
  }
}

// ---------------------------------------------------------------------------
// Output types (JSON contract handed to the renderer)
// ---------------------------------------------------------------------------

/// Everything the renderer needs for one report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportData {
  pub report_id: String,
  pub analyzed_repositories: Vec<String>,
  pub merge_requests: MergeRequestActivity,
  pub noisy_projects: NoisyProjects,
  pub manager_usage: ManagerUsageStats,
  pub missing_dependencies: Vec<DependencyNotFound>,
  /// Deduplicated, filtered and ordered failures.
  pub errors: Vec<ErrorSummary>,
}

impl ReportData {
  /// Number of distinct `msg` values among the final errors.
  pub fn distinct_error_messages(&self) -> usize {
    let mut seen: Vec<&str> = self
      .errors
      .iter()
      .map(|e| e.msg.as_deref().unwrap_or_default())
      .collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
  }
}

/// One-line run summary printed after the report is written.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
  pub report_id: String,
  pub analyzed_repos_count: usize,
  pub created_merge_requests: usize,
  pub output_file: String,
  pub errors: usize,
  pub managers_count: usize,
  pub missing_dependencies_count: usize,
  pub generated_at: String,
}

impl ReportSummary {
  pub fn new(report: &ReportData, output_file: impl Into<String>, generated_at: String) -> Self {
    Self {
      report_id: report.report_id.clone(),
      analyzed_repos_count: report.analyzed_repositories.len(),
      created_merge_requests: report.merge_requests.created_count(),
      output_file: output_file.into(),
      errors: report.errors.len(),
      managers_count: report.manager_usage.managers.len(),
      missing_dependencies_count: report.missing_dependencies.len(),
      generated_at,
    }
  }
}
