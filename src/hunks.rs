//! Turning edit scripts into [`Hunk`] lists.
//!
//! This is the generic entry point of the crate: two token sequences and an
//! equality predicate go in, an ordered list of unchanged, removed and added
//! runs comes out.  Every typed front-end of the crate (text, arrays and
//! structured values) tokenizes its input and ends up here.
//!
//! ```rust
//! use canondiff::{diff_hunks, Hunk, ChangeTag};
//!
//! let hunks: Vec<Hunk<String>> = diff_hunks(&["a", "b", "c"], &["a", "c"]);
//! assert_eq!(hunks.len(), 3);
//! assert_eq!(hunks[1].tag(), ChangeTag::Delete);
//! assert_eq!(hunks[1].value(), "b");
//! ```
use std::convert::Infallible;

use crate::algorithms::{myers, Compact, DiffHook, DiffOp};
use crate::types::{ChangeTag, Hunk};

/// Collects the tokens of a hunk into its value.
///
/// Implemented for [`String`] (tokens are concatenated) and [`Vec`]
/// (tokens are cloned into the vector).
pub trait HunkValue<T>: Default {
    /// Appends a single token.
    fn push_token(&mut self, token: &T);

    /// The weight used to pick between an old and a new token when the
    /// longest token is requested for unchanged runs.
    fn token_weight(token: &T) -> usize {
        let _ = token;
        0
    }
}

impl<T: AsRef<str>> HunkValue<T> for String {
    fn push_token(&mut self, token: &T) {
        self.push_str(token.as_ref());
    }

    fn token_weight(token: &T) -> usize {
        token.as_ref().len()
    }
}

impl<T: Clone> HunkValue<T> for Vec<T> {
    fn push_token(&mut self, token: &T) {
        self.push(token.clone());
    }
}

/// A [`DiffHook`] that builds hunks from the tokens it is pointed at.
///
/// Removed tokens are taken from the old sequence, added and unchanged
/// tokens from the new one.  With [`use_longest_token`](Self::use_longest_token)
/// an unchanged token is taken from whichever side has the heavier form.
pub struct HunkBuilder<'s, T, V> {
    old: &'s [T],
    new: &'s [T],
    use_longest_token: bool,
    hunks: Vec<Hunk<V>>,
}

impl<'s, T, V: HunkValue<T>> HunkBuilder<'s, T, V> {
    /// Creates a builder for the two token sequences.
    pub fn new(old: &'s [T], new: &'s [T]) -> HunkBuilder<'s, T, V> {
        HunkBuilder {
            old,
            new,
            use_longest_token: false,
            hunks: Vec::new(),
        }
    }

    /// Picks the longer of the old and new form for unchanged tokens.
    pub fn use_longest_token(mut self, yes: bool) -> Self {
        self.use_longest_token = yes;
        self
    }

    /// Returns the built hunks.
    pub fn into_hunks(self) -> Vec<Hunk<V>> {
        self.hunks
    }

    fn push_tokens<'t, I>(&mut self, tag: ChangeTag, tokens: I)
    where
        I: Iterator<Item = &'t T>,
        T: 't,
    {
        if !matches!(self.hunks.last(), Some(last) if last.tag() == tag) {
            self.hunks.push(Hunk::new(tag, 0, V::default()));
        }
        if let Some(hunk) = self.hunks.last_mut() {
            let mut count = 0;
            for token in tokens {
                hunk.value_mut().push_token(token);
                count += 1;
            }
            hunk.grow(count);
        }
    }
}

impl<'s, T, V: HunkValue<T>> DiffHook for HunkBuilder<'s, T, V> {
    type Error = Infallible;

    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), Self::Error> {
        let (old, new) = (self.old, self.new);
        let old_tokens = &old[old_index..old_index + len];
        let new_tokens = &new[new_index..new_index + len];
        if self.use_longest_token {
            let tokens = old_tokens.iter().zip(new_tokens).map(|(o, n)| {
                if V::token_weight(o) > V::token_weight(n) {
                    o
                } else {
                    n
                }
            });
            self.push_tokens(ChangeTag::Equal, tokens);
        } else {
            self.push_tokens(ChangeTag::Equal, new_tokens.iter());
        }
        Ok(())
    }

    fn delete(
        &mut self,
        old_index: usize,
        old_len: usize,
        _new_index: usize,
    ) -> Result<(), Self::Error> {
        let old = self.old;
        self.push_tokens(ChangeTag::Delete, old[old_index..old_index + old_len].iter());
        Ok(())
    }

    fn insert(
        &mut self,
        _old_index: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        let new = self.new;
        self.push_tokens(ChangeTag::Insert, new[new_index..new_index + new_len].iter());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        tracing::trace!(hunks = self.hunks.len(), "hunks built");
        Ok(())
    }
}

/// Builder for hunk diffs.
///
/// The default configuration takes unchanged tokens from the new sequence.
#[derive(Clone, Debug, Default)]
pub struct HunkDiffConfig {
    use_longest_token: bool,
}

impl HunkDiffConfig {
    /// Makes unchanged runs carry the longer form of every token.
    ///
    /// This only matters when the equality predicate considers tokens
    /// equal that are not identical.
    pub fn use_longest_token(&mut self, yes: bool) -> &mut Self {
        self.use_longest_token = yes;
        self
    }

    /// Diffs two token sequences with exact equality.
    pub fn diff<T, V>(&self, old: &[T], new: &[T]) -> Vec<Hunk<V>>
    where
        T: PartialEq,
        V: HunkValue<T>,
    {
        self.diff_by(old, new, |a, b| a == b)
    }

    /// Diffs two token sequences with a custom equality predicate.
    pub fn diff_by<T, V, F>(&self, old: &[T], new: &[T], eq: F) -> Vec<Hunk<V>>
    where
        V: HunkValue<T>,
        F: FnMut(&T, &T) -> bool,
    {
        let builder = HunkBuilder::new(old, new).use_longest_token(self.use_longest_token);
        let mut d = Compact::new(builder);
        match myers::diff_slices_by(&mut d, old, new, eq) {
            Ok(()) => d.into_inner().into_hunks(),
            Err(never) => match never {},
        }
    }
}

/// Diffs two token sequences into hunks.
///
/// Equivalent to `HunkDiffConfig::default().diff(old, new)`.
pub fn diff_hunks<T, V>(old: &[T], new: &[T]) -> Vec<Hunk<V>>
where
    T: PartialEq,
    V: HunkValue<T>,
{
    HunkDiffConfig::default().diff(old, new)
}

/// Diffs two token sequences into hunks with a custom equality predicate.
///
/// Equivalent to `HunkDiffConfig::default().diff_by(old, new, eq)`.
pub fn diff_hunks_by<T, V, F>(old: &[T], new: &[T], eq: F) -> Vec<Hunk<V>>
where
    V: HunkValue<T>,
    F: FnMut(&T, &T) -> bool,
{
    HunkDiffConfig::default().diff_by(old, new, eq)
}

/// Builds hunks from already captured ops.
///
/// The ops are expected to cover both sequences in document order, as
/// produced by [`capture_diff_slices`](crate::algorithms::capture_diff_slices).
/// Empty ops are skipped and adjacent ops of the same kind are merged.
pub fn hunks_from_ops<T, V>(ops: &[DiffOp], old: &[T], new: &[T]) -> Vec<Hunk<V>>
where
    V: HunkValue<T>,
{
    let mut d = Compact::new(HunkBuilder::new(old, new));
    for op in ops {
        if let Err(never) = op.apply_to_hook(&mut d) {
            match never {}
        }
    }
    if let Err(never) = d.finish() {
        match never {}
    }
    d.into_inner().into_hunks()
}

#[test]
fn test_hunks_merge_runs() {
    let old: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
    let new: Vec<String> = ["a", "x", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
    let hunks: Vec<Hunk<String>> = diff_hunks(&old, &new);
    let rendered = hunks.iter().map(|h| h.to_string()).collect::<Vec<_>>();
    assert_eq!(rendered, vec![" a", "-b", "+x", " cd", "+e"]);
    assert_eq!(hunks[3].count(), 2);
}

#[test]
fn test_empty_inputs() {
    let empty: &[&str] = &[];
    let hunks: Vec<Hunk<String>> = diff_hunks(empty, empty);
    assert!(hunks.is_empty());

    let hunks: Vec<Hunk<String>> = diff_hunks(empty, &["a", "b"]);
    assert_eq!(hunks, vec![Hunk::new(ChangeTag::Insert, 2, "ab".to_string())]);

    let hunks: Vec<Hunk<String>> = diff_hunks(&["a", "b"], empty);
    assert_eq!(hunks, vec![Hunk::new(ChangeTag::Delete, 2, "ab".to_string())]);
}

#[test]
fn test_equal_tokens_come_from_new() {
    let hunks: Vec<Hunk<String>> =
        diff_hunks_by(&["Foo ", "bar"], &["foo ", "BAR"], |a, b| {
            a.eq_ignore_ascii_case(b)
        });
    assert_eq!(hunks, vec![Hunk::new(ChangeTag::Equal, 2, "foo BAR".to_string())]);
}

#[test]
fn test_longest_token() {
    let old = ["a,\n", "b\n"];
    let new = ["a\n", "b,\n"];
    let hunks: Vec<Hunk<String>> = HunkDiffConfig::default()
        .use_longest_token(true)
        .diff_by(&old, &new, |a, b| a.replace(',', "") == b.replace(',', ""));
    assert_eq!(
        hunks,
        vec![Hunk::new(ChangeTag::Equal, 2, "a,\nb,\n".to_string())]
    );
}

#[test]
fn test_vec_values() {
    let hunks: Vec<Hunk<Vec<i32>>> = diff_hunks(&[1, 2, 3], &[1, 3, 4]);
    insta::assert_debug_snapshot!(hunks, @r###"
    [
        Hunk {
            tag: Equal,
            count: 1,
            value: [
                1,
            ],
        },
        Hunk {
            tag: Delete,
            count: 1,
            value: [
                2,
            ],
        },
        Hunk {
            tag: Equal,
            count: 1,
            value: [
                3,
            ],
        },
        Hunk {
            tag: Insert,
            count: 1,
            value: [
                4,
            ],
        },
    ]
    "###);
}

#[test]
fn test_hunks_from_ops() {
    let old = ["a", "b"];
    let new = ["b", "c"];
    let ops = crate::algorithms::capture_diff_slices(&old, &new);
    let hunks: Vec<Hunk<String>> = hunks_from_ops(&ops, &old, &new);
    assert_eq!(hunks, diff_hunks::<_, String>(&old, &new));
}

#[test]
fn test_hunks_from_split_ops() {
    let old = ["a", "b", "c"];
    let new = ["a", "b", "x"];
    let ops = [
        DiffOp::Equal {
            old_index: 0,
            new_index: 0,
            len: 1,
        },
        DiffOp::Equal {
            old_index: 1,
            new_index: 1,
            len: 1,
        },
        DiffOp::Insert {
            old_index: 2,
            new_index: 2,
            new_len: 0,
        },
        DiffOp::Delete {
            old_index: 2,
            old_len: 1,
            new_index: 2,
        },
        DiffOp::Insert {
            old_index: 3,
            new_index: 2,
            new_len: 1,
        },
    ];
    let hunks: Vec<Hunk<String>> = hunks_from_ops(&ops, &old, &new);
    assert_eq!(
        hunks,
        vec![
            Hunk::new(ChangeTag::Equal, 2, "ab".to_string()),
            Hunk::new(ChangeTag::Delete, 1, "c".to_string()),
            Hunk::new(ChangeTag::Insert, 1, "x".to_string()),
        ]
    );
    assert!(hunks.iter().all(|h| h.count() > 0));
}
