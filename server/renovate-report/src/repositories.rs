//! Which repositories the run analyzed.

use indexmap::IndexSet;
use serde_json::Value;

use crate::types::NormalizedRecord;

const AUTODISCOVERED: &str = "Autodiscovered repositories";
const CONFIG_MESSAGES: [&str; 2] = ["Combined config", "File config"];

/// Repositories from the first autodiscovery record, else from the first
/// global config record listing `config.repositories`, else empty.
pub fn analyzed_repositories(records: &[NormalizedRecord]) -> Vec<String> {
  let autodiscovered = records
    .iter()
    .filter(|r| r.msg() == Some(AUTODISCOVERED))
    .find_map(|r| r.get("repositories").and_then(repository_list));
  if let Some(list) = autodiscovered {
    return list;
  }

  records
    .iter()
    .filter(|r| r.msg().is_some_and(|m| CONFIG_MESSAGES.contains(&m)))
    .find_map(|r| {
      r.get("config")
        .and_then(|c| c.get("repositories"))
        .and_then(repository_list)
    })
    .unwrap_or_default()
}

/// Distinct `repository` values in first-seen order.
pub fn unique_repositories<'a, I>(records: I) -> Vec<String>
where
  I: IntoIterator<Item = &'a NormalizedRecord>,
{
  records
    .into_iter()
    .filter_map(NormalizedRecord::repository)
    .map(str::to_string)
    .collect::<IndexSet<String>>()
    .into_iter()
    .collect()
}

/// Repository lists hold plain names, or objects with a `repository` key
/// when the config came from a file.
fn repository_list(value: &Value) -> Option<Vec<String>> {
  let items = value.as_array()?;
  Some(
    items
      .iter()
      .filter_map(|item| match item {
        Value::String(s) => Some(s.clone()),
        Value::Object(o) => o.get("repository").and_then(Value::as_str).map(str::to_string),
        _ => None,
      })
      .collect(),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn recs(values: Vec<Value>) -> Vec<NormalizedRecord> {
    values
      .into_iter()
      .map(|v| serde_json::from_value(v).unwrap())
      .collect()
  }

  #[test]
  fn autodiscovery_wins_over_config() {
    let records = recs(vec![
      json!({"msg": "File config", "config": {"repositories": ["cfg/one"]}}),
      json!({"msg": "Autodiscovered repositories", "repositories": ["org/a", "org/b"]}),
      json!({"msg": "Autodiscovered repositories", "repositories": ["org/c"]}),
    ]);
    assert_eq!(analyzed_repositories(&records), vec!["org/a", "org/b"]);
  }

  #[test]
  fn falls_back_to_first_config_record() {
    let records = recs(vec![
      json!({"msg": "Combined config", "config": {"onboarding": false}}),
      json!({"msg": "Combined config", "config": {"repositories": ["org/x", {"repository": "org/y"}]}}),
      json!({"msg": "File config", "config": {"repositories": ["org/z"]}}),
    ]);
    assert_eq!(analyzed_repositories(&records), vec!["org/x", "org/y"]);
  }

  #[test]
  fn nothing_found_is_empty() {
    let records = recs(vec![json!({"msg": "Repository started", "repository": "org/a"})]);
    assert!(analyzed_repositories(&records).is_empty());
  }

  #[test]
  fn unique_repositories_keeps_first_seen_order() {
    let records = recs(vec![
      json!({"repository": "b"}),
      json!({"repository": "a"}),
      json!({"msg": "no repo"}),
      json!({"repository": "b"}),
    ]);
    assert_eq!(unique_repositories(&records), vec!["b", "a"]);
  }
}
