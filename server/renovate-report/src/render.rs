//! HTML rendering of a [`ReportData`] bundle. Presentation only.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::ReportError;
use crate::types::*;

const STYLE: &str = "table, th, td {border: 1.5px solid black;font-size: 12px; padding: 4px;}
    tr:nth-child(even) { background: AliceBlue; }
    body {background-color: Azure; padding: 12px;}";

/// Render the full report page.
pub fn render_html(report: &ReportData, generated_at: DateTime<Utc>) -> String {
  let mut html = String::with_capacity(16 * 1024);
  html.push_str(&format!(
    "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <title>Renovate Errors</title>\n  <style>\n    {}\n  </style>\n</head>\n<body>\n",
    STYLE
  ));
  html.push_str(&analyzed_repositories(&report.analyzed_repositories));
  html.push_str("\n<br>\n");
  html.push_str(&merge_requests(&report.merge_requests));
  html.push_str("\n<br>\n<h1><b>Noisy Projects</b></h1>\n");
  html.push_str(&noisy_projects(&report.noisy_projects));
  html.push_str("\n<br>\n");
  html.push_str(&manager_usage(&report.manager_usage));
  html.push_str("\n<br>\n<h1><b>Dependencies Not Found</b></h1>\n");
  html.push_str(&missing_dependencies(&report.missing_dependencies));
  html.push_str("\n<br>\n");
  html.push_str(&errors(report));
  html.push_str(&format!(
    "\n<p style=\"font-size: 10px;\">Report {} generated {}</p>\n</body>\n</html>\n",
    escape(&report.report_id),
    generated_at.to_rfc3339()
  ));
  html
}

/// Render and write the report to `path`.
pub fn write_html(path: &Path, report: &ReportData, generated_at: DateTime<Utc>) -> Result<(), ReportError> {
  let html = render_html(report, generated_at);
  fs::write(path, html)?;
  info!(path = %path.display(), "html report written");
  Ok(())
}

/// Minimal HTML escaping for text and attribute content.
pub fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(ch),
    }
  }
  out
}

fn analyzed_repositories(repos: &[String]) -> String {
  format!(
    "<div>\n  <h1><b>Analyzed Repositories ({})</b></h1>\n  <p style=\"font-size: 12px;\">{}</p>\n</div>",
    repos.len(),
    escape(&repos.join(", "))
  )
}

fn merge_requests(activity: &MergeRequestActivity) -> String {
  let mut table = String::from("<table>\n  <tr><th>Repo</th><th>Branch</th></tr>\n");
  for (repo, branch) in activity.branches.iter() {
    table.push_str(&format!(
      "  <tr><td>{}</td><td>{}</td></tr>\n",
      escape(repo),
      escape(branch)
    ));
  }
  table.push_str("</table>");
  format!(
    "<div>\n  <h1><b>Created Merge Requests ({})</b></h1>\n  <p>PRs created: {}, PRs updated: {}</p>\n  {}\n</div>",
    activity.created_count(),
    activity.pr_created,
    activity.pr_updated,
    table
  )
}

fn noisy_projects(view: &NoisyProjects) -> String {
  let mut table = String::from("<table>\n");
  for entry in &view.entries {
    table.push_str(&format!(
      "  <tr><td>{}</td><td>{} log entries</td></tr>\n",
      escape(&entry.repository),
      entry.count
    ));
  }
  table.push_str(&format!(
    "  <tr><td><b>Average of {} projects</b></td><td>{} log entries</td></tr>\n</table>",
    view.repository_count, view.average
  ));
  table
}

fn manager_usage(stats: &ManagerUsageStats) -> String {
  let mut table = String::from(
    "<table>\n  <tr><th>Manager</th><th>Repositories</th><th>% of Repos</th><th>Total Files</th><th>Avg Files per Repo</th></tr>\n",
  );
  for row in &stats.managers {
    table.push_str(&format!(
      "  <tr><td>{}</td><td>{}</td><td>{:.1}%</td><td>{}</td><td>{:.1}</td></tr>\n",
      escape(&row.manager),
      row.repository_count,
      row.percent_of_repositories,
      row.total_files,
      row.average_files
    ));
  }
  table.push_str("</table>");
  format!(
    "<div>\n  <h1><b>Package Managers Usage ({} different managers)</b></h1>\n  <p>Data collected from {} repositories</p>\n  {}\n</div>",
    stats.managers.len(),
    stats.repositories_with_managers,
    table
  )
}

fn missing_dependencies(deps: &[DependencyNotFound]) -> String {
  if deps.is_empty() {
    return "<p>No missing dependencies detected.</p>".to_string();
  }
  let mut table = String::from(
    "<table>\n  <tr><th>#</th><th>Repository</th><th>Dependency</th><th>URL/Details</th></tr>\n",
  );
  for (i, dep) in deps.iter().enumerate() {
    let details = if dep.url.is_empty() { &dep.message } else { &dep.url };
    table.push_str(&format!(
      "  <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
      i + 1,
      escape(&dep.repository),
      escape(&dep.dependency),
      escape(details)
    ));
  }
  table.push_str("</table>");
  table
}

fn errors(report: &ReportData) -> String {
  let mut html = format!(
    "<h1><b>Oh no: {} errors ({} different types)</b></h1>\n<table>\n  <tr><th>#</th><th>Repository</th><th>Error Type</th><th>Details</th><th>Package Info</th></tr>\n",
    report.errors.len(),
    report.distinct_error_messages()
  );
  let mut index = 1;
  for row in &report.errors {
    if row.repository.is_empty() {
      warn!(?row, "invalid row without repository");
      continue;
    }
    let mut package_info = String::new();
    if let Some(dep) = &row.dependency {
      package_info.push_str(&format!("<b>Dependency:</b> {}", escape(dep)));
      if let Some(file) = &row.package_file {
        package_info.push_str(&format!("<br><b>File:</b> {}", escape(file)));
      }
    }
    html.push_str(&format!(
      "  <tr><td>{}</td><td>{}</td><td>{}</td><td>{}<br><pre>{}</pre></td><td>{}</td></tr>\n",
      index,
      escape(row.short_repository()),
      row.kind.map(ErrorKind::as_str).unwrap_or("unknown"),
      escape(row.msg.as_deref().unwrap_or_default()),
      escape(row.err_message().unwrap_or_default()),
      package_info
    ));
    index += 1;
  }
  html.push_str("</table>");
  html
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use serde_json::Map;

  fn ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap()
  }

  fn summary(repository: &str, msg: &str) -> ErrorSummary {
    ErrorSummary {
      repository: repository.into(),
      kind: Some(ErrorKind::Npm),
      err: Some(ErrorDetail {
        message: "<boom>".into(),
        extra: Map::new(),
      }),
      msg: Some(msg.into()),
      dependency: Some("left-pad".into()),
      package_file: Some("package.json".into()),
      url: None,
      extra: Map::new(),
    }
  }

  #[test]
  fn escape_special_characters() {
    assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
  }

  #[test]
  fn empty_report_renders_all_sections() {
    let html = render_html(&ReportData::default(), ts());
    assert!(html.contains("Analyzed Repositories (0)"));
    assert!(html.contains("Created Merge Requests (0)"));
    assert!(html.contains("Average of 0 projects"));
    assert!(html.contains("Package Managers Usage (0 different managers)"));
    assert!(html.contains("No missing dependencies detected."));
    assert!(html.contains("Oh no: 0 errors (0 different types)"));
    assert!(html.contains("2025-01-15T10:30:00+00:00"));
  }

  #[test]
  fn error_rows_use_short_name_and_escape() {
    let report = ReportData {
      errors: vec![summary("org/team/app", "Failed to look up npm package left-pad")],
      ..ReportData::default()
    };
    let html = render_html(&report, ts());
    assert!(html.contains("<td>1</td><td>app</td><td>npm</td>"));
    assert!(html.contains("<pre>&lt;boom&gt;</pre>"));
    assert!(html.contains("<b>Dependency:</b> left-pad<br><b>File:</b> package.json"));
    assert!(html.contains("Oh no: 1 errors (1 different types)"));
  }

  #[test]
  fn missing_dependency_falls_back_to_message() {
    let report = ReportData {
      missing_dependencies: vec![DependencyNotFound {
        repository: "org/a".into(),
        dependency: "com/acme".into(),
        version: "1.0".into(),
        url: String::new(),
        message: "Content is not found".into(),
      }],
      ..ReportData::default()
    };
    let html = render_html(&report, ts());
    assert!(html.contains("<td>1</td><td>org/a</td><td>com/acme</td><td>Content is not found</td>"));
  }

  #[test]
  fn manager_rows_show_one_decimal() {
    let report = ReportData {
      manager_usage: ManagerUsageStats {
        managers: vec![ManagerUsage {
          manager: "npm".into(),
          repository_count: 2,
          percent_of_repositories: 66.7,
          total_files: 5,
          average_files: 2.5,
        }],
        repositories_with_managers: 3,
      },
      ..ReportData::default()
    };
    let html = render_html(&report, ts());
    assert!(html.contains("<td>npm</td><td>2</td><td>66.7%</td><td>5</td><td>2.5</td>"));
    assert!(html.contains("Data collected from 3 repositories"));
  }
}
