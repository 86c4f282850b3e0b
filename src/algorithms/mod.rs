//! The shortest edit script search.
//!
//! The implementation in this module is relatively low level and exposes
//! the most generic bounds possible for the algorithm.  To use it you would
//! typically go through [`diff_hunks`](crate::diff_hunks) or one of the
//! typed front-ends ([`text`](crate::text), [`array`](crate::array),
//! [`json`](crate::json)) but direct access can be useful in some cases.
//!
//! The search is driven through a [`DiffHook`].  As the edit script is
//! generated the hook is invoked with index ranges only; it never gets
//! access to the actual values.  This is why the hook is mostly useful to
//! build other representations on top of, such as the captured [`DiffOp`]s
//! or [`Hunk`](crate::Hunk)s.

mod capture;
mod hook;
pub mod myers;

use std::ops::{Index, Range};

pub use capture::*;
pub use hook::*;

/// Creates a diff between old and new capturing the ops.
///
/// Diffs `old`, between indices `old_range` and `new` between indices
/// `new_range`.  Adjacent operations are merged via [`Compact`].
pub fn capture_diff<Old, New>(
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
) -> Vec<DiffOp>
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    New::Output: PartialEq<Old::Output>,
{
    let mut d = Compact::new(Capture::new());
    match myers::diff(&mut d, old, old_range, new, new_range) {
        Ok(()) => d.into_inner().into_ops(),
        Err(never) => match never {},
    }
}

/// Creates a diff between two slices capturing the ops.
pub fn capture_diff_slices<T>(old: &[T], new: &[T]) -> Vec<DiffOp>
where
    T: PartialEq,
{
    capture_diff(old, 0..old.len(), new, 0..new.len())
}

/// Creates a diff between two slices with a custom equality predicate
/// capturing the ops.
pub fn capture_diff_slices_by<T, F>(old: &[T], new: &[T], eq: F) -> Vec<DiffOp>
where
    F: FnMut(&T, &T) -> bool,
{
    let mut d = Compact::new(Capture::new());
    match myers::diff_slices_by(&mut d, old, new, eq) {
        Ok(()) => d.into_inner().into_ops(),
        Err(never) => match never {},
    }
}

/// Returns the number of inserted and removed tokens of an edit script.
pub fn edit_distance(ops: &[DiffOp]) -> usize {
    ops.iter()
        .filter(|op| op.tag() != DiffTag::Equal)
        .map(|op| op.len())
        .sum()
}

#[test]
fn test_capture_diff_slices() {
    let ops = capture_diff_slices(&["a", "b", "c", "d"], &["a", "x", "y", "d", "e"]);
    insta::assert_debug_snapshot!(ops, @r###"
    [
        Equal {
            old_index: 0,
            new_index: 0,
            len: 1,
        },
        Delete {
            old_index: 1,
            old_len: 2,
            new_index: 1,
        },
        Insert {
            old_index: 3,
            new_index: 1,
            new_len: 2,
        },
        Equal {
            old_index: 3,
            new_index: 3,
            len: 1,
        },
        Insert {
            old_index: 4,
            new_index: 4,
            new_len: 1,
        },
    ]
    "###);
    assert_eq!(edit_distance(&ops), 5);
}

#[test]
fn test_single_substitution_is_minimal() {
    let old: Vec<char> = "abcdefgh".chars().collect();
    let new: Vec<char> = "abcdXfgh".chars().collect();
    let ops = capture_diff_slices(&old, &new);
    assert_eq!(edit_distance(&ops), 2);
    assert_eq!(
        ops.iter().map(|op| op.tag()).collect::<Vec<_>>(),
        vec![DiffTag::Equal, DiffTag::Delete, DiffTag::Insert, DiffTag::Equal]
    );
    assert_eq!(ops[1].old_range(), 4..5);
    assert_eq!(ops[2].new_range(), 4..5);
}
