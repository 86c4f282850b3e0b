//! Myers' diff algorithm.
//!
//! * time: `O((N+M)D)`
//! * space `O((N+M)D)`
//!
//! See [the original article by Eugene W. Myers](http://www.xmailserver.org/diff2.pdf)
//! describing it.
//!
//! This is the greedy forward variant: the search extends every reachable
//! diagonal of the edit graph by one edit per round and keeps the frontier
//! of each round so that the path can be walked back once the end is
//! reached.  Nothing in here recurses, so the stack depth does not depend
//! on the input.
//!
//! When a diagonal can be reached both by an insertion (coming from the
//! diagonal above) and by a deletion (coming from the diagonal below), the
//! deletion wins unless the insertion reaches strictly further into the old
//! sequence.  Diagonals are always scanned from the lowest to the highest, so
//! the produced edit script is fully deterministic.

use std::ops::{Index, Range};

use crate::algorithms::DiffHook;

/// Marks a diagonal that was not reached in a round.
const UNREACHED: isize = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Insert,
    Delete,
}

/// The furthest reaching `x` per diagonal of one search round.
///
/// Round `d` covers the diagonals `-d..=d`.
struct Frontier<'a> {
    d: isize,
    xs: &'a [isize],
}

impl<'a> Frontier<'a> {
    fn get(&self, k: isize) -> isize {
        if k < -self.d || k > self.d {
            UNREACHED
        } else {
            self.xs[(k + self.d) as usize]
        }
    }

    /// Picks the edit that leads onto diagonal `k` in the following round.
    fn step_onto(&self, k: isize, n: usize, m: usize) -> Option<(Step, isize)> {
        let down = self.get(k + 1);
        let right = self.get(k - 1);
        let can_insert = down != UNREACHED && down - (k + 1) < m as isize;
        let can_delete = right != UNREACHED && right < n as isize;
        match (can_insert, can_delete) {
            (true, true) if right < down => Some((Step::Insert, k + 1)),
            (_, true) => Some((Step::Delete, k - 1)),
            (true, false) => Some((Step::Insert, k + 1)),
            (false, false) => None,
        }
    }
}

/// Myers' diff algorithm.
///
/// Diff `old`, between indices `old_range` and `new` between indices `new_range`.
pub fn diff<Old, New, D>(
    d: &mut D,
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
) -> Result<(), D::Error>
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    D: DiffHook,
    New::Output: PartialEq<Old::Output>,
{
    diff_by(d, old, old_range, new, new_range, |o, n| n == o)
}

/// Myers' diff algorithm with a custom equality predicate.
///
/// The predicate is invoked with one token of the old and one token of the
/// new sequence.  It must be reflexive and symmetric and should be cheap as
/// it is invoked for every step along a diagonal.
pub fn diff_by<Old, New, D, F>(
    d: &mut D,
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
    mut eq: F,
) -> Result<(), D::Error>
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    D: DiffHook,
    F: FnMut(&Old::Output, &New::Output) -> bool,
{
    let n = old_range.len();
    let m = new_range.len();
    let trace = search(n, m, |x, y| {
        eq(&old[old_range.start + x], &new[new_range.start + y])
    });
    tracing::trace!(
        old_len = n,
        new_len = m,
        edit_distance = trace.len() - 1,
        "myers search finished"
    );
    let steps = backtrack(&trace, n, m);
    for run in steps.iter().rev() {
        match *run {
            Run::Equal { x, y, len } => {
                d.equal(old_range.start + x, new_range.start + y, len)?
            }
            Run::Delete { x, y, len } => {
                d.delete(old_range.start + x, len, new_range.start + y)?
            }
            Run::Insert { x, y, len } => {
                d.insert(old_range.start + x, new_range.start + y, len)?
            }
        }
    }
    d.finish()
}

/// Shortcut for diffing slices.
pub fn diff_slices<D, T>(d: &mut D, old: &[T], new: &[T]) -> Result<(), D::Error>
where
    D: DiffHook,
    T: PartialEq,
{
    diff(d, old, 0..old.len(), new, 0..new.len())
}

/// Shortcut for diffing slices with a custom equality predicate.
pub fn diff_slices_by<D, T, F>(d: &mut D, old: &[T], new: &[T], eq: F) -> Result<(), D::Error>
where
    D: DiffHook,
    F: FnMut(&T, &T) -> bool,
{
    diff_by(d, old, 0..old.len(), new, 0..new.len(), eq)
}

/// Runs the forward search and returns the frontier of every round.
///
/// The last frontier is the one in which `(n, m)` was reached, so the edit
/// distance is the number of rounds minus one.
fn search<F>(n: usize, m: usize, mut eq: F) -> Vec<Vec<isize>>
where
    F: FnMut(usize, usize) -> bool,
{
    let mut trace: Vec<Vec<isize>> = Vec::new();
    for d in 0..=(n + m) as isize {
        let mut xs = vec![UNREACHED; (2 * d + 1) as usize];
        let mut done = false;
        {
            let prev = Frontier {
                d: d - 1,
                xs: trace.last().map_or(&[][..], |xs| &xs[..]),
            };
            for k in (-d..=d).step_by(2) {
                let start = if d == 0 {
                    0
                } else {
                    match prev.step_onto(k, n, m) {
                        Some((Step::Insert, from)) => prev.get(from),
                        Some((Step::Delete, from)) => prev.get(from) + 1,
                        None => continue,
                    }
                };
                let mut x = start as usize;
                let mut y = (start - k) as usize;
                while x < n && y < m && eq(x, y) {
                    x += 1;
                    y += 1;
                }
                xs[(k + d) as usize] = x as isize;
                if x >= n && y >= m {
                    done = true;
                    break;
                }
            }
        }
        trace.push(xs);
        if done {
            break;
        }
    }
    trace
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
    Equal { x: usize, y: usize, len: usize },
    Delete { x: usize, y: usize, len: usize },
    Insert { x: usize, y: usize, len: usize },
}

/// Walks the trace back from `(n, m)` and returns merged runs in reverse
/// document order.
fn backtrack(trace: &[Vec<isize>], n: usize, m: usize) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    let mut push = |run: Run| {
        let merged = match (runs.last_mut(), run) {
            (Some(Run::Equal { x, y, len }), Run::Equal { x: x2, len: l, .. }) if x2 + l == *x => {
                *x -= l;
                *y -= l;
                *len += l;
                true
            }
            (Some(Run::Delete { x, len, .. }), Run::Delete { x: x2, .. }) if x2 + 1 == *x => {
                *x = x2;
                *len += 1;
                true
            }
            (Some(Run::Insert { y, len, .. }), Run::Insert { y: y2, .. }) if y2 + 1 == *y => {
                *y = y2;
                *len += 1;
                true
            }
            _ => false,
        };
        if !merged {
            runs.push(run);
        }
    };

    let (mut x, mut y) = (n, m);
    for d in (1..trace.len()).rev() {
        let prev = Frontier {
            d: d as isize - 1,
            xs: &trace[d - 1],
        };
        let k = x as isize - y as isize;
        let (step, from) = match prev.step_onto(k, n, m) {
            Some(rv) => rv,
            None => unreachable!("diagonal {} reached without a predecessor", k),
        };
        let prev_x = prev.get(from) as usize;
        let prev_y = (prev.get(from) - from) as usize;
        let (mid_x, mid_y) = match step {
            Step::Insert => (prev_x, prev_y + 1),
            Step::Delete => (prev_x + 1, prev_y),
        };
        if x > mid_x {
            push(Run::Equal {
                x: mid_x,
                y: mid_y,
                len: x - mid_x,
            });
        }
        push(match step {
            Step::Insert => Run::Insert {
                x: prev_x,
                y: prev_y,
                len: 1,
            },
            Step::Delete => Run::Delete {
                x: prev_x,
                y: prev_y,
                len: 1,
            },
        });
        x = prev_x;
        y = prev_y;
    }
    if x > 0 {
        push(Run::Equal { x: 0, y: 0, len: x });
    }
    runs
}

#[cfg(test)]
struct Recorder(Vec<String>);

#[cfg(test)]
impl DiffHook for Recorder {
    type Error = ();
    fn equal(&mut self, o: usize, n: usize, len: usize) -> Result<(), ()> {
        self.0.push(format!("equal {:?} {:?} {:?}", o, n, len));
        Ok(())
    }
    fn delete(&mut self, o: usize, len: usize, new: usize) -> Result<(), ()> {
        self.0.push(format!("delete {:?} {:?} {:?}", o, len, new));
        Ok(())
    }
    fn insert(&mut self, o: usize, n: usize, len: usize) -> Result<(), ()> {
        self.0.push(format!("insert {:?} {:?} {:?}", o, n, len));
        Ok(())
    }
}

#[test]
fn test_diff() {
    let a: &[usize] = &[0, 1, 2, 3, 4];
    let b: &[usize] = &[0, 1, 2, 9, 4];

    let mut d = Recorder(Vec::new());
    diff(&mut d, a, 0..a.len(), b, 0..b.len()).unwrap();
    assert_eq!(
        d.0,
        vec!["equal 0 0 3", "delete 3 1 3", "insert 4 3 1", "equal 4 4 1"]
    );
}

#[test]
fn test_empty_sides() {
    let empty: &[usize] = &[];
    let a: &[usize] = &[1, 2, 3];

    let mut d = Recorder(Vec::new());
    diff_slices(&mut d, empty, empty).unwrap();
    assert!(d.0.is_empty());

    let mut d = Recorder(Vec::new());
    diff_slices(&mut d, empty, a).unwrap();
    assert_eq!(d.0, vec!["insert 0 0 3"]);

    let mut d = Recorder(Vec::new());
    diff_slices(&mut d, a, empty).unwrap();
    assert_eq!(d.0, vec!["delete 0 3 0"]);
}

#[test]
fn test_ranges() {
    let a: &[usize] = &[7, 7, 0, 1, 2, 7];
    let b: &[usize] = &[8, 0, 2, 8];

    let mut d = Recorder(Vec::new());
    diff(&mut d, a, 2..5, b, 1..3).unwrap();
    assert_eq!(d.0, vec!["equal 2 1 1", "delete 3 1 2", "equal 4 2 1"]);
}

#[test]
fn test_custom_equality() {
    let a: &[&str] = &["Foo", "bar", "BAZ"];
    let b: &[&str] = &["foo", "BAR", "baz", "qux"];

    let mut d = Recorder(Vec::new());
    diff_slices_by(&mut d, a, b, |x, y| x.eq_ignore_ascii_case(y)).unwrap();
    assert_eq!(d.0, vec!["equal 0 0 3", "insert 3 3 1"]);
}

#[test]
fn test_pat() {
    let a: &[usize] = &[0, 1, 3, 4, 5];
    let b: &[usize] = &[0, 1, 4, 5, 8, 9];

    let mut d = Recorder(Vec::new());
    diff(&mut d, a, 0..a.len(), b, 0..b.len()).unwrap();
    assert_eq!(
        d.0,
        vec![
            "equal 0 0 2",
            "delete 2 1 2",
            "equal 3 2 2",
            "insert 5 4 2"
        ]
    );
}

#[test]
fn test_long_input_does_not_recurse() {
    let a: Vec<usize> = (0..20_000).collect();
    let b: Vec<usize> = (0..20_000).filter(|x| x % 1000 != 0).collect();

    let mut d = crate::algorithms::Compact::new(crate::algorithms::Capture::new());
    diff_slices(&mut d, &a, &b).unwrap();
    let ops = d.into_inner().into_ops();
    let deleted: usize = ops
        .iter()
        .filter(|op| op.tag() == crate::algorithms::DiffTag::Delete)
        .map(|op| op.len())
        .sum();
    assert_eq!(deleted, 20);
    assert_eq!(ops.len(), 40);
}
