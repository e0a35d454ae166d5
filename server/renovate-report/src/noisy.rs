//! Noisy-project ranking: which repositories log the most records.

use indexmap::IndexMap;
use tracing::debug;

use crate::types::{NoisyProject, NoisyProjects, NormalizedRecord};

/// Group records by repository, keeping input order within and across groups.
/// Records without a repository (system messages) are left out.
pub fn group_by_repository<'a, I>(records: I) -> IndexMap<String, Vec<&'a NormalizedRecord>>
where
  I: IntoIterator<Item = &'a NormalizedRecord>,
{
  let mut groups: IndexMap<String, Vec<&'a NormalizedRecord>> = IndexMap::new();
  for record in records {
    if let Some(repository) = record.repository() {
      groups.entry(repository.to_string()).or_default().push(record);
    }
  }
  groups
}

/// Rank repositories by record count.
///
/// - `cutoff` is the `top_n`-th highest count, or 0 when fewer repositories exist.
/// - Repositories strictly above the cutoff are selected, so ties at the
///   cutoff can make the view shorter than `top_n`.
/// - With an empty selection, or at most `top_n` repositories, every
///   repository is shown.
/// - Order is count descending; ties keep first-seen order.
pub fn rank_noisy_projects<'a, I>(records: I, top_n: usize) -> NoisyProjects
where
  I: IntoIterator<Item = &'a NormalizedRecord>,
{
  let counts: Vec<(String, usize)> = group_by_repository(records)
    .into_iter()
    .map(|(repository, group)| (repository, group.len()))
    .collect();
  rank_counts(counts, top_n)
}

/// Ranking over precomputed `(repository, count)` pairs in first-seen order.
pub fn rank_counts(counts: Vec<(String, usize)>, top_n: usize) -> NoisyProjects {
  let repository_count = counts.len();
  let total: usize = counts.iter().map(|(_, c)| c).sum();
  let average = total.checked_div(repository_count).unwrap_or(0);

  let mut sorted: Vec<usize> = counts.iter().map(|(_, c)| *c).collect();
  sorted.sort_unstable_by(|a, b| b.cmp(a));
  let cutoff = match top_n {
    0 => None,
    n if sorted.len() >= n => Some(sorted[n - 1]),
    _ => Some(0),
  };

  let selected: Vec<&(String, usize)> = match cutoff {
    Some(cutoff) => counts.iter().filter(|(_, c)| *c > cutoff).collect(),
    None => Vec::new(),
  };

  let mut entries: Vec<NoisyProject> = if selected.is_empty() || repository_count <= top_n {
    counts.iter().map(to_entry).collect()
  } else {
    selected.into_iter().map(to_entry).collect()
  };
  entries.sort_by(|a, b| b.count.cmp(&a.count));

  debug!(
    repositories = repository_count,
    shown = entries.len(),
    average,
    "noisy projects ranked"
  );
  NoisyProjects {
    entries,
    average,
    repository_count,
  }
}

fn to_entry(pair: &(String, usize)) -> NoisyProject {
  NoisyProject {
    repository: pair.0.clone(),
    count: pair.1,
  }
}
