//! Drop failures whose message is on the exclusion list.

use crate::types::ErrorSummary;

/// Keep summaries whose `msg` is not exactly equal to any excluded message.
/// Relative order is preserved. Summaries without `msg` are always kept.
pub fn filter_excluded<S: AsRef<str>>(errors: Vec<ErrorSummary>, excluded: &[S]) -> Vec<ErrorSummary> {
  errors
    .into_iter()
    .filter(|e| !is_excluded(e, excluded))
    .collect()
}

fn is_excluded<S: AsRef<str>>(error: &ErrorSummary, excluded: &[S]) -> bool {
  match error.msg.as_deref() {
    Some(msg) => excluded.iter().any(|x| x.as_ref() == msg),
    None => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::Map;

  fn summary(msg: Option<&str>, repository: &str) -> ErrorSummary {
    ErrorSummary {
      repository: repository.into(),
      kind: None,
      err: None,
      msg: msg.map(Into::into),
      dependency: None,
      package_file: None,
      url: None,
      extra: Map::new(),
    }
  }

  #[test]
  fn removes_exact_matches_and_keeps_order() {
    let errors = vec![
      summary(Some("Error 1"), "repo1"),
      summary(Some("Excluded Error"), "repo2"),
      summary(Some("Error 2"), "repo3"),
    ];
    let result = filter_excluded(errors, &["Excluded Error"]);
    let msgs: Vec<_> = result.iter().map(|e| e.msg.as_deref().unwrap()).collect();
    assert_eq!(msgs, vec!["Error 1", "Error 2"]);
  }

  #[test]
  fn match_is_case_sensitive_and_full() {
    let errors = vec![
      summary(Some("excluded error"), "a"),
      summary(Some("Excluded Error!"), "b"),
      summary(None, "c"),
    ];
    let result = filter_excluded(errors, &["Excluded Error".to_string()]);
    assert_eq!(result.len(), 3);
  }

  #[test]
  fn empty_exclusion_list_keeps_everything() {
    let errors = vec![summary(Some("x"), "a"), summary(Some("x"), "b")];
    let none: [&str; 0] = [];
    assert_eq!(filter_excluded(errors, &none).len(), 2);
  }
}
