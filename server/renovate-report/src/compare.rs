//! Report ordering for failure summaries.

use std::cmp::Ordering;

use crate::collate;
use crate::types::ErrorSummary;

/// Same message: by short repository name, ascending.
/// Different messages: by message, descending.
pub fn compare(a: &ErrorSummary, b: &ErrorSummary) -> Ordering {
  let msg_a = a.msg.as_deref().unwrap_or_default();
  let msg_b = b.msg.as_deref().unwrap_or_default();
  if msg_a == msg_b {
    collate::compare(a.short_repository(), b.short_repository())
  } else {
    collate::compare(msg_b, msg_a)
  }
}

/// Stable sort into report order.
pub fn sort_errors(errors: &mut [ErrorSummary]) {
  errors.sort_by(compare);
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::Map;

  fn summary(msg: &str, repository: &str) -> ErrorSummary {
    ErrorSummary {
      repository: repository.into(),
      kind: None,
      err: None,
      msg: Some(msg.into()),
      dependency: None,
      package_file: None,
      url: None,
      extra: Map::new(),
    }
  }

  #[test]
  fn same_message_orders_by_short_repository() {
    let a = summary("Z", "org/repo-a");
    let b = summary("Z", "org/repo-b");
    assert_eq!(compare(&a, &b), Ordering::Less);
    assert_eq!(compare(&b, &a), Ordering::Greater);
  }

  #[test]
  fn short_name_ignores_owner() {
    let a = summary("Z", "zzz/alpha");
    let b = summary("Z", "aaa/beta");
    assert_eq!(compare(&a, &b), Ordering::Less);
  }

  #[test]
  fn messages_sort_descending() {
    let a = summary("A", "org/x");
    let b = summary("B", "org/x");
    assert_eq!(compare(&b, &a), Ordering::Less);
  }

  #[test]
  fn sort_groups_messages_and_orders_repos() {
    let mut errors = vec![
      summary("A", "org/b"),
      summary("B", "org/z"),
      summary("A", "org/a"),
      summary("B", "team/c"),
    ];
    sort_errors(&mut errors);
    let order: Vec<_> = errors
      .iter()
      .map(|e| format!("{}:{}", e.msg.as_deref().unwrap(), e.short_repository()))
      .collect();
    assert_eq!(order, vec!["B:c", "B:z", "A:a", "A:b"]);
  }

  #[test]
  fn missing_message_compares_as_empty() {
    let mut none = summary("", "org/a");
    none.msg = None;
    let some = summary("x", "org/a");
    assert_eq!(compare(&some, &none), Ordering::Less);
  }
}
