//! Structural diffs of JSON-like values.
//!
//! Values are first brought into canonical form (object keys sorted at every
//! level), then serialized to pretty printed JSON and finally diffed line by
//! line.  Because of the canonical form two values that only differ in the
//! insertion order of their keys serialize identically.
//!
//! ```rust
//! use canondiff::json::{diff_json, Value};
//!
//! let old: Value = r#"{"a": 123, "b": 456, "c": 789}"#.parse().unwrap();
//! let new: Value = r#"{"b": 456, "a": 123}"#.parse().unwrap();
//! let hunks = diff_json(&old, &new).unwrap();
//! assert_eq!(hunks.len(), 3);
//! assert_eq!(hunks[0].value(), "{\n  \"a\": 123,\n  \"b\": 456,\n");
//! assert!(hunks[1].removed());
//! assert_eq!(hunks[1].value(), "  \"c\": 789\n");
//! assert_eq!(hunks[2].value(), "}");
//! ```
//!
//! # Trailing separators
//!
//! Removing the last field of an object also removes the comma of the field
//! before it.  To not report that as a change of its own, lines are compared
//! with a separator right before their line terminator stripped, and
//! unchanged lines are reported in their longer form.  The separator is
//! configurable through [`JsonDiffConfig::separator`] for serializations that
//! use a different one.
mod canonical;
mod ser;
mod value;

pub use self::canonical::{canonicalize, Canonicalizer};
pub use self::ser::{to_serde, to_string_pretty};
pub use self::value::{Array, Object, Value};

use crate::error::Error;
use crate::hunks::HunkDiffConfig;
use crate::text::{split_lines, split_terminator};
use crate::types::Hunk;

/// A builder type config for structural diffs.
#[derive(Clone, Debug)]
pub struct JsonDiffConfig {
    separator: String,
    use_longest_token: bool,
}

impl Default for JsonDiffConfig {
    fn default() -> JsonDiffConfig {
        JsonDiffConfig {
            separator: ",".into(),
            use_longest_token: true,
        }
    }
}

impl JsonDiffConfig {
    /// Changes the trailing separator that is ignored when comparing lines.
    ///
    /// The default is `,`.  An empty separator compares lines exactly.
    pub fn separator(&mut self, separator: &str) -> &mut Self {
        self.separator = separator.into();
        self
    }

    /// Controls if unchanged lines are reported in their longer form.
    ///
    /// This is enabled by default so that unchanged lines keep the
    /// separator whichever side had it.
    pub fn use_longest_token(&mut self, yes: bool) -> &mut Self {
        self.use_longest_token = yes;
        self
    }

    /// Diffs two values.
    ///
    /// Both values are canonicalized and serialized independently.  A
    /// value with a circular structure fails with
    /// [`Error::CircularStructure`].
    pub fn diff(&self, old: &Value, new: &Value) -> Result<Vec<Hunk<String>>, Error> {
        let old = to_string_pretty(&canonicalize(old))?;
        let new = to_string_pretty(&canonicalize(new))?;
        Ok(self.diff_str(&old, &new))
    }

    /// Diffs two already serialized documents line by line.
    ///
    /// The texts are used as they are, they are neither parsed nor
    /// canonicalized.
    pub fn diff_str(&self, old: &str, new: &str) -> Vec<Hunk<String>> {
        let old: Vec<&str> = split_lines(old).collect();
        let new: Vec<&str> = split_lines(new).collect();
        let hunks = HunkDiffConfig::default()
            .use_longest_token(self.use_longest_token)
            .diff_by(&old, &new, |a, b| self.lines_equal(a, b));
        tracing::debug!(
            old_lines = old.len(),
            new_lines = new.len(),
            hunks = hunks.len(),
            "structural diff finished"
        );
        hunks
    }

    /// Compares two lines ignoring a separator right before the line
    /// terminator.
    pub fn lines_equal(&self, a: &str, b: &str) -> bool {
        let (a_body, a_term) = split_terminator(a);
        let (b_body, b_term) = split_terminator(b);
        a_term == b_term
            && self.strip_separator(a_body, a_term) == self.strip_separator(b_body, b_term)
    }

    fn strip_separator<'a>(&self, body: &'a str, terminator: &str) -> &'a str {
        if terminator.is_empty() || self.separator.is_empty() {
            body
        } else {
            body.strip_suffix(self.separator.as_str()).unwrap_or(body)
        }
    }
}

/// Diffs two values through their canonical serialization.
///
/// Equivalent to `JsonDiffConfig::default().diff(old, new)`.
pub fn diff_json(old: &Value, new: &Value) -> Result<Vec<Hunk<String>>, Error> {
    JsonDiffConfig::default().diff(old, new)
}

/// Diffs two already serialized JSON documents.
///
/// Equivalent to `JsonDiffConfig::default().diff_str(old, new)`.
pub fn diff_json_str(old: &str, new: &str) -> Vec<Hunk<String>> {
    JsonDiffConfig::default().diff_str(old, new)
}

#[test]
fn test_lines_equal() {
    let config = JsonDiffConfig::default();
    assert!(config.lines_equal("  \"b\": 456,\n", "  \"b\": 456\n"));
    assert!(config.lines_equal("  },\r\n", "  }\r\n"));
    assert!(!config.lines_equal("  \"b\": 456,\n", "  \"b\": 456\r\n"));
    assert!(!config.lines_equal("  \"b\": 456,", "  \"b\": 456"));
    assert!(!config.lines_equal("  \"b\": 45,\n", "  \"b\": 456\n"));

    let mut config = JsonDiffConfig::default();
    config.separator("");
    assert!(!config.lines_equal("  \"b\": 456,\n", "  \"b\": 456\n"));
}
