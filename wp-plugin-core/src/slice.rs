//! Slice helpers.

use std::collections::HashSet;
use std::hash::Hash;

/// The distinct elements of `items` in order of first appearance.
pub fn unique<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
  let mut seen = HashSet::with_capacity(items.len());
  items.iter().filter(|item| seen.insert(*item)).cloned().collect()
}

/// Elements of `a` that do not appear in `b`, in the order of `a`.
///
/// With `unique` set, duplicates in `a` are dropped first.
///
/// ```
/// use wp_plugin_core::slice::set_difference;
///
/// assert_eq!(set_difference(&[1, 2, 2, 3], &[3], false), vec![1, 2, 2]);
/// assert_eq!(set_difference(&[1, 2, 2, 3], &[3], true), vec![1, 2]);
/// ```
pub fn set_difference<T: Eq + Hash + Clone>(a: &[T], b: &[T], unique: bool) -> Vec<T> {
  let excluded: HashSet<&T> = b.iter().collect();
  let candidates = if unique { self::unique(a) } else { a.to_vec() };

  candidates.into_iter().filter(|item| !excluded.contains(item)).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unique_keeps_first_occurrence() {
    assert_eq!(unique(&["b", "a", "b", "c", "a"]), vec!["b", "a", "c"]);
    assert!(unique::<i32>(&[]).is_empty());
  }

  #[test]
  fn set_difference_without_unique() {
    assert_eq!(set_difference(&[1, 2, 3, 4], &[2, 4], false), vec![1, 3]);
    assert_eq!(set_difference(&[1, 1, 2], &[2], false), vec![1, 1]);
  }

  #[test]
  fn set_difference_with_unique() {
    assert_eq!(set_difference(&[1, 1, 2, 3, 3], &[2], true), vec![1, 3]);
  }

  #[test]
  fn set_difference_edge_cases() {
    assert!(set_difference::<i32>(&[], &[1, 2], false).is_empty());
    assert_eq!(set_difference(&["a", "b"], &[], false), vec!["a", "b"]);
    assert!(set_difference(&["a", "b"], &["a", "b"], true).is_empty());
  }

  #[test]
  fn works_with_owned_strings() {
    let a = vec!["x".to_string(), "y".to_string(), "x".to_string()];
    let b = vec!["y".to_string()];
    assert_eq!(set_difference(&a, &b, true), vec!["x".to_string()]);
  }
}
