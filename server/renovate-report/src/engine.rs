//! Core engine: runs every reducer over the buffered log and assembles the report.

use tracing::info;

use crate::classify;
use crate::compare;
use crate::config::Config;
use crate::filter;
use crate::managers;
use crate::merge_requests;
use crate::missing_deps;
use crate::noisy;
use crate::repositories;
use crate::source::LogInput;
use crate::types::*;

/// The report engine. Stateless between runs; each call works on one buffered log.
pub struct Engine {
  config: Config,
}

impl Engine {
  pub fn new(config: Config) -> Self {
    Self { config }
  }

  pub fn with_defaults() -> Self {
    Self::new(Config::default())
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Build the report bundle for a fully-read log.
  pub fn process(&self, input: &LogInput) -> ReportData {
    let mut report = self.process_records(&input.records);
    report.report_id = input.report_id();
    report
  }

  /// Build the report bundle from normalized records. `report_id` is left empty.
  pub fn process_records(&self, records: &[NormalizedRecord]) -> ReportData {
    // Failures: dedup -> exclusion filter -> report order.
    let deduped = classify::dedup_errors(records).into_values().collect();
    let mut errors = filter::filter_excluded(deduped, &self.config.excluded_messages);
    compare::sort_errors(&mut errors);

    // Independent reducers over the full stream.
    let analyzed_repositories = repositories::analyzed_repositories(records);
    let merge_requests = merge_requests::merge_request_activity(records);
    let noisy_projects = noisy::rank_noisy_projects(records, self.config.noisy_top_n);
    let manager_usage = managers::manager_usage_stats(records);
    let missing_dependencies = missing_deps::dependencies_not_found(records);

    info!(
      records = records.len(),
      errors = errors.len(),
      analyzed = analyzed_repositories.len(),
      merge_requests = merge_requests.created_count(),
      missing = missing_dependencies.len(),
      "report assembled"
    );

    ReportData {
      report_id: String::new(),
      analyzed_repositories,
      merge_requests,
      noisy_projects,
      manager_usage,
      missing_dependencies,
      errors,
    }
  }
}
