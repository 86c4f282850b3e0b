//! This crate computes minimal differences between two sequences and reports
//! them as an ordered list of unchanged, removed and added [`Hunk`]s.  It also
//! knows how to bring nested, possibly cyclic, data into a canonical form so
//! that it can be diffed as if it was text.
//!
//! The crate is split into a few levels:
//!
//! * [`algorithms`]: Myers' shortest edit script search over anything that
//!   can be indexed, with a pluggable equality predicate.  Results are
//!   reported to a [`DiffHook`](algorithms::DiffHook).
//! * [`diff_hunks`] / [`HunkDiffConfig`]: the generic entry point that
//!   turns two token sequences into hunks.
//! * [`text`], [`array`] and [`json`]: thin front-ends that tokenize their
//!   input (characters, words, lines, elements, canonically serialized
//!   values) and diff the tokens.
//! * [`render`]: turns hunks into markup.
//!
//! ```rust
//! use canondiff::text::diff_chars;
//!
//! let hunks = diff_chars("kitten", "sitting");
//! let rendered = hunks.iter().map(|h| h.to_string()).collect::<Vec<_>>();
//! assert_eq!(rendered, vec!["-k", "+s", " itt", "-e", "+i", " n", "+g"]);
//! ```
//!
//! # Determinism
//!
//! Several shortest edit scripts usually exist for the same pair of inputs.
//! The search always scans diagonals in the same order and prefers a
//! removal over an insertion unless the insertion gets further, and within
//! a block of changes the removed run is reported before the added one.
//! The output is therefore reproducible byte for byte.
//!
//! # Optional Features
//!
//! * `unicode`: adds grapheme and unicode word tokenizers to [`text`].
//! * `serde`: implements `Serialize` for [`Hunk`] and [`ChangeTag`].
pub mod algorithms;
pub mod array;
pub mod json;
pub mod render;
pub mod text;

mod error;
mod hunks;
mod types;

pub use self::error::Error;
pub use self::hunks::{
    diff_hunks, diff_hunks_by, hunks_from_ops, HunkBuilder, HunkDiffConfig, HunkValue,
};
pub use self::types::{ChangeTag, Hunk};
