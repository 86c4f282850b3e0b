//! Diffing of arbitrary element sequences.
//!
//! Hunk values are vectors holding the elements of the run.
//!
//! ```rust
//! use canondiff::array::diff_arrays;
//!
//! let hunks = diff_arrays(&[1, 2, 3], &[1, 3]);
//! assert!(hunks[1].removed());
//! assert_eq!(hunks[1].value(), &vec![2]);
//! ```
use crate::hunks::{diff_hunks, diff_hunks_by};
use crate::types::Hunk;

/// Diffs two slices comparing the elements with `==`.
pub fn diff_arrays<T>(old: &[T], new: &[T]) -> Vec<Hunk<Vec<T>>>
where
    T: PartialEq + Clone,
{
    diff_hunks(old, new)
}

/// Diffs two slices with a custom comparator.
///
/// Unchanged runs carry the elements of `new`.
pub fn diff_arrays_by<T, F>(old: &[T], new: &[T], eq: F) -> Vec<Hunk<Vec<T>>>
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    diff_hunks_by(old, new, eq)
}

#[test]
fn test_diff_arrays() {
    let a = vec!["a", "b", "c"];
    let b = vec!["a", "c", "d"];
    let hunks = diff_arrays(&a, &b);
    assert_eq!(hunks.len(), 4);
    assert_eq!(hunks[1].value(), &vec!["b"]);
    assert!(hunks[3].added());
}

#[test]
fn test_diff_arrays_by_key() {
    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: u32,
        label: &'static str,
    }
    let old = vec![
        Row { id: 1, label: "one" },
        Row { id: 2, label: "two" },
    ];
    let new = vec![
        Row { id: 1, label: "uno" },
        Row { id: 3, label: "tres" },
    ];
    let hunks = diff_arrays_by(&old, &new, |a, b| a.id == b.id);
    assert_eq!(hunks.len(), 3);
    assert_eq!(hunks[0].value()[0].label, "uno");
    assert_eq!(hunks[1].value(), &vec![Row { id: 2, label: "two" }]);
    assert_eq!(hunks[2].value(), &vec![Row { id: 3, label: "tres" }]);
}
