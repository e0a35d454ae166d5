//! Dependencies a registry reported as not found.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use tracing::{debug, trace};

use crate::types::{DependencyNotFound, NormalizedRecord};

pub const MAVEN_NOT_FOUND: &str = "Content is not found for Maven url";
const CONTENT_NOT_FOUND: &str = "Content is not found";
const MAVEN_METADATA: &str = "maven-metadata.xml";

static URL_IN_MESSAGE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"https?://[^\s=]+").expect("static regex"));

/// True if the record reports missing registry content.
pub fn is_not_found(msg: &str) -> bool {
  msg == MAVEN_NOT_FOUND
    || msg.contains(CONTENT_NOT_FOUND)
    || (msg.contains("http") && msg.contains("statusCode=404"))
}

/// `(org/name, version)` from the last three path segments of a registry URL.
///
/// A trailing `maven-metadata.xml` is dropped first, together with any
/// hyphen or slash left in front of it.
pub fn parse_dependency_url(url: &str) -> Option<(String, String)> {
  let trimmed = url
    .strip_suffix(MAVEN_METADATA)
    .map(|rest| rest.trim_end_matches(['-', '/']))
    .unwrap_or(url);
  let segments: Vec<&str> = trimmed.split('/').collect();
  if segments.len() < 3 {
    return None;
  }
  let n = segments.len();
  let (org, name, version) = (segments[n - 3], segments[n - 2], segments[n - 1]);
  if org.is_empty() || name.is_empty() {
    return None;
  }
  Some((format!("{}/{}", org, name), version.to_string()))
}

/// Same heuristic applied to the first whitespace-separated token starting with `http`.
pub fn parse_dependency_message(msg: &str) -> Option<(String, String)> {
  msg
    .split(' ')
    .find(|token| token.starts_with("http"))
    .and_then(parse_dependency_url)
}

/// Missing dependencies, one per `(repository, dependency)`; first occurrence wins.
pub fn dependencies_not_found(records: &[NormalizedRecord]) -> Vec<DependencyNotFound> {
  let mut found: IndexMap<(String, String), DependencyNotFound> = IndexMap::new();

  for record in records {
    let Some(msg) = record.msg().filter(|m| is_not_found(m)) else {
      continue;
    };
    let Some(repository) = record.repository() else {
      continue;
    };
    // An empty `url` is treated as absent.
    let url_field = record.str_field("url").filter(|u| !u.is_empty());
    let parsed = match url_field {
      Some(url) => parse_dependency_url(url),
      None if msg.contains("http") => parse_dependency_message(msg),
      None => None,
    };
    let Some((dependency, version)) = parsed else {
      trace!(repository, msg, "no dependency extractable");
      continue;
    };

    let url = url_field
      .map(str::to_string)
      .or_else(|| URL_IN_MESSAGE.find(msg).map(|m| m.as_str().to_string()))
      .unwrap_or_default();
    let key = (repository.to_string(), dependency.clone());
    found.entry(key).or_insert_with(|| DependencyNotFound {
      repository: repository.to_string(),
      dependency,
      version,
      url,
      message: msg.to_string(),
    });
  }

  debug!(count = found.len(), "missing dependencies extracted");
  found.into_values().collect()
}
