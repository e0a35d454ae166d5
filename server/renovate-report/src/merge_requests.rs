//! Merge-request activity: branches prepared per repository, PRs created/updated.

use indexmap::IndexMap;
use tracing::debug;

use crate::types::{MergeRequestActivity, NormalizedRecord};

/// Logged once per branch before Renovate commits files to it.
pub const BRANCH_PREPARATION: &str = "Preparing files for committing to branch";
pub const PR_CREATED: &str = "PR created";
pub const PR_UPDATED: &str = "PR updated";

/// repository -> `value(record)` for every record with a repository; later records overwrite earlier ones.
pub fn unique_repos_map<'a, I, F>(records: I, value: F) -> IndexMap<String, String>
where
  I: IntoIterator<Item = &'a NormalizedRecord>,
  F: Fn(&NormalizedRecord) -> String,
{
  let mut map = IndexMap::new();
  for record in records {
    if let Some(repository) = record.repository() {
      map.insert(repository.to_string(), value(record));
    }
  }
  map
}

/// Branch or PR title a preparation record refers to.
pub fn branch_or_title(record: &NormalizedRecord) -> String {
  ["prTitle", "branch", "branchName"]
    .iter()
    .find_map(|key| record.str_field(key))
    .or_else(|| {
      record
        .msg()
        .and_then(|m| m.split_once("to branch "))
        .map(|(_, branch)| branch.trim())
    })
    .or_else(|| record.msg())
    .unwrap_or_default()
    .to_string()
}

/// Count PR creations and updates and map each repository to its latest prepared branch.
pub fn merge_request_activity(records: &[NormalizedRecord]) -> MergeRequestActivity {
  let branches = unique_repos_map(
    records
      .iter()
      .filter(|r| r.msg().is_some_and(|m| m.contains(BRANCH_PREPARATION))),
    branch_or_title,
  );
  let (pr_created, pr_updated) = merge_request_stats(records);
  debug!(
    repositories = branches.len(),
    pr_created,
    pr_updated,
    "merge request activity counted"
  );
  MergeRequestActivity {
    branches,
    pr_created,
    pr_updated,
  }
}

/// `(created, updated)` PR event counts.
pub fn merge_request_stats(records: &[NormalizedRecord]) -> (usize, usize) {
  records
    .iter()
    .filter_map(NormalizedRecord::msg)
    .fold((0, 0), |(created, updated), msg| {
      if msg.starts_with(PR_CREATED) {
        (created + 1, updated)
      } else if msg.starts_with(PR_UPDATED) {
        (created, updated + 1)
      } else {
        (created, updated)
      }
    })
}
