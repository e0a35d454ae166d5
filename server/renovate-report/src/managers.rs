//! Package manager usage across repositories.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::types::{ManagerUsage, ManagerUsageStat, ManagerUsageStats, NormalizedRecord};

/// Logged once per repository after extraction, with `managers: {name: files}`.
pub const MANAGER_EXTRACT: &str = "manager extract durations (ms)";

/// Per-manager totals plus the number of repositories that reported managers.
pub fn accumulate(records: &[NormalizedRecord]) -> (IndexMap<String, ManagerUsageStat>, usize) {
  let mut usage: IndexMap<String, ManagerUsageStat> = IndexMap::new();
  let mut repositories = 0;

  for record in records.iter().filter(|r| r.msg() == Some(MANAGER_EXTRACT)) {
    let Some(managers) = record.get("managers").and_then(Value::as_object) else {
      continue;
    };
    if managers.is_empty() || record.repository().is_none() {
      trace!(repository = ?record.repository(), "manager record skipped");
      continue;
    }
    repositories += 1;
    for (manager, files) in managers {
      let stat = usage.entry(manager.clone()).or_default();
      stat.repository_count += 1;
      stat.total_files = stat.total_files.saturating_add(file_count(files));
    }
  }
  (usage, repositories)
}

/// Display rows, sorted by repository count descending (ties keep first-seen order).
pub fn manager_usage_stats(records: &[NormalizedRecord]) -> ManagerUsageStats {
  let (usage, repositories_with_managers) = accumulate(records);
  let mut managers: Vec<ManagerUsage> = usage
    .into_iter()
    .map(|(manager, stat)| ManagerUsage {
      manager,
      repository_count: stat.repository_count,
      percent_of_repositories: round1(
        stat.repository_count as f64 / repositories_with_managers as f64 * 100.0,
      ),
      total_files: stat.total_files,
      average_files: round1(stat.total_files as f64 / stat.repository_count as f64),
    })
    .collect();
  managers.sort_by(|a, b| b.repository_count.cmp(&a.repository_count));

  debug!(
    managers = managers.len(),
    repositories = repositories_with_managers,
    "manager usage summarized"
  );
  ManagerUsageStats {
    managers,
    repositories_with_managers,
  }
}

/// Whole number of files; fractions are truncated.
fn file_count(value: &Value) -> u64 {
  value
    .as_u64()
    .or_else(|| value.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
    .unwrap_or(0)
}

fn round1(value: f64) -> f64 {
  (value * 10.0).round() / 10.0
}
