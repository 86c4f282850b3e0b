//! Text diffing utilities.
//!
//! This tokenizes text into characters, words or lines and diffs the token
//! sequences into [`Hunk`]s whose values are the joined text of the run.
//!
//! ```rust
//! use canondiff::text::TextDiffConfig;
//!
//! let hunks = TextDiffConfig::default()
//!     .ignore_case(true)
//!     .diff_words("Hello World", "hello there world");
//! let rendered = hunks.iter().map(|h| h.to_string()).collect::<Vec<_>>();
//! assert_eq!(rendered, vec![" hello ", "+there ", " world"]);
//! ```
//!
//! # Equality policies
//!
//! Case and whitespace insensitivity are implemented as equality predicates
//! handed to the engine.  The tokens themselves are never rewritten, so the
//! hunks always reproduce the input text.  Unchanged runs carry the text of
//! the new input.
mod split;

pub use self::split::*;

use crate::hunks::HunkDiffConfig;
use crate::types::Hunk;

/// A builder type config for text diffs.
#[derive(Clone, Debug, Default)]
pub struct TextDiffConfig {
    ignore_case: bool,
    ignore_whitespace: bool,
    newline_is_token: bool,
}

impl TextDiffConfig {
    /// Compares tokens case insensitively.
    pub fn ignore_case(&mut self, yes: bool) -> &mut Self {
        self.ignore_case = yes;
        self
    }

    /// Ignores leading and trailing whitespace when comparing lines.
    ///
    /// This only affects the line diffs.  Word diffs always treat two
    /// whitespace runs as equal, see [`diff_words`](Self::diff_words).
    pub fn ignore_whitespace(&mut self, yes: bool) -> &mut Self {
        self.ignore_whitespace = yes;
        self
    }

    /// Treats newline sequences as separate tokens in line diffs.
    pub fn newline_is_token(&mut self, yes: bool) -> &mut Self {
        self.newline_is_token = yes;
        self
    }

    /// Creates a diff of characters.
    pub fn diff_chars(&self, old: &str, new: &str) -> Vec<Hunk<String>> {
        let old: Vec<&str> = split_chars(old).collect();
        let new: Vec<&str> = split_chars(new).collect();
        self.diff_slices(&old, &new)
    }

    /// Creates a diff of words.
    ///
    /// Any two whitespace runs compare equal so that only changes to the
    /// actual words are reported.
    pub fn diff_words(&self, old: &str, new: &str) -> Vec<Hunk<String>> {
        let old: Vec<&str> = split_words(old).collect();
        let new: Vec<&str> = split_words(new).collect();
        HunkDiffConfig::default().diff_by(&old, &new, |a, b| {
            (is_whitespace(a) && is_whitespace(b)) || self.tokens_equal(a, b)
        })
    }

    /// Creates a diff of words where whitespace is significant.
    pub fn diff_words_with_space(&self, old: &str, new: &str) -> Vec<Hunk<String>> {
        let old: Vec<&str> = split_words(old).collect();
        let new: Vec<&str> = split_words(new).collect();
        self.diff_slices(&old, &new)
    }

    /// Creates a diff of lines.
    pub fn diff_lines(&self, old: &str, new: &str) -> Vec<Hunk<String>> {
        let (old, new): (Vec<&str>, Vec<&str>) = if self.newline_is_token {
            (
                split_lines_and_newlines(old).collect(),
                split_lines_and_newlines(new).collect(),
            )
        } else {
            (split_lines(old).collect(), split_lines(new).collect())
        };
        if self.ignore_whitespace {
            HunkDiffConfig::default().diff_by(&old, &new, |a, b| {
                self.tokens_equal(a.trim(), b.trim())
            })
        } else {
            self.diff_slices(&old, &new)
        }
    }

    /// Creates a diff of lines ignoring leading and trailing whitespace.
    pub fn diff_trimmed_lines(&self, old: &str, new: &str) -> Vec<Hunk<String>> {
        let mut config = self.clone();
        config.ignore_whitespace(true);
        config.diff_lines(old, new)
    }

    /// Creates a diff of graphemes.
    ///
    /// This requires the `unicode` feature.
    #[cfg(feature = "unicode")]
    pub fn diff_graphemes(&self, old: &str, new: &str) -> Vec<Hunk<String>> {
        let old: Vec<&str> = split_graphemes(old).collect();
        let new: Vec<&str> = split_graphemes(new).collect();
        self.diff_slices(&old, &new)
    }

    /// Creates a diff of unicode words.
    ///
    /// This requires the `unicode` feature.
    #[cfg(feature = "unicode")]
    pub fn diff_unicode_words(&self, old: &str, new: &str) -> Vec<Hunk<String>> {
        let old: Vec<&str> = split_unicode_words(old).collect();
        let new: Vec<&str> = split_unicode_words(new).collect();
        self.diff_slices(&old, &new)
    }

    /// Creates a diff of already tokenized text.
    pub fn diff_slices(&self, old: &[&str], new: &[&str]) -> Vec<Hunk<String>> {
        HunkDiffConfig::default().diff_by(old, new, |a, b| self.tokens_equal(a, b))
    }

    fn tokens_equal(&self, a: &str, b: &str) -> bool {
        if self.ignore_case {
            a.chars()
                .flat_map(char::to_lowercase)
                .eq(b.chars().flat_map(char::to_lowercase))
        } else {
            a == b
        }
    }
}

/// Creates a diff of characters.
///
/// Equivalent to `TextDiffConfig::default().diff_chars(old, new)`.
pub fn diff_chars(old: &str, new: &str) -> Vec<Hunk<String>> {
    TextDiffConfig::default().diff_chars(old, new)
}

/// Creates a diff of words.
///
/// Equivalent to `TextDiffConfig::default().diff_words(old, new)`.
pub fn diff_words(old: &str, new: &str) -> Vec<Hunk<String>> {
    TextDiffConfig::default().diff_words(old, new)
}

/// Creates a diff of lines.
///
/// Equivalent to `TextDiffConfig::default().diff_lines(old, new)`.
pub fn diff_lines(old: &str, new: &str) -> Vec<Hunk<String>> {
    TextDiffConfig::default().diff_lines(old, new)
}

#[cfg(test)]
fn render(hunks: &[Hunk<String>]) -> Vec<String> {
    hunks.iter().map(|h| h.to_string()).collect()
}

#[test]
fn test_char_diff() {
    let hunks = diff_chars("Hello World", "Hallo Welt");
    assert_eq!(
        render(&hunks),
        vec![" H", "-e", "+a", " llo W", "-or", "+e", " l", "-d", "+t"]
    );
}

#[test]
fn test_word_diff() {
    let hunks = diff_words("New Value", "New  ValueMoreData");
    assert_eq!(render(&hunks), vec![" New  ", "-Value", "+ValueMoreData"]);
}

#[test]
fn test_word_diff_with_space() {
    let hunks = TextDiffConfig::default().diff_words_with_space("New Value", "New  Value");
    assert_eq!(render(&hunks), vec![" New", "- ", "+  ", " Value"]);
}

#[test]
fn test_line_diff() {
    let hunks = diff_lines("foo\nbar\nbaz", "foo\nblah\nbaz");
    insta::assert_debug_snapshot!(hunks, @r###"
    [
        Hunk {
            tag: Equal,
            count: 1,
            value: "foo\n",
        },
        Hunk {
            tag: Delete,
            count: 1,
            value: "bar\n",
        },
        Hunk {
            tag: Insert,
            count: 1,
            value: "blah\n",
        },
        Hunk {
            tag: Equal,
            count: 1,
            value: "baz",
        },
    ]
    "###);
}

#[test]
fn test_trimmed_lines() {
    let hunks = TextDiffConfig::default().diff_trimmed_lines("a\n  b\nc\n", "a\nb  \nc\n");
    assert_eq!(render(&hunks), vec![" a\nb  \nc\n"]);
}

#[test]
fn test_newline_is_token() {
    let hunks = TextDiffConfig::default()
        .newline_is_token(true)
        .diff_lines("a\nb\n", "a\r\nb\n");
    assert_eq!(render(&hunks), vec![" a", "-\n", "+\r\n", " b\n"]);
    assert_eq!(hunks[3].count(), 2);
}

#[test]
fn test_ignore_case() {
    let hunks = TextDiffConfig::default()
        .ignore_case(true)
        .diff_chars("ÄbC", "äBcd");
    assert_eq!(render(&hunks), vec![" äBc", "+d"]);
}
