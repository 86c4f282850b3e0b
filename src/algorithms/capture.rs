use std::convert::Infallible;
use std::ops::Range;

use crate::algorithms::hook::DiffHook;

/// The kind of a [`DiffOp`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd)]
pub enum DiffTag {
    /// The ranges are equal.
    Equal,
    /// Tokens were removed from the old sequence.
    Delete,
    /// Tokens were inserted from the new sequence.
    Insert,
}

/// Utility enum to capture a diff operation.
///
/// This is used by [`Capture`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum DiffOp {
    /// A segment is equal (see [`DiffHook::equal`])
    Equal {
        old_index: usize,
        new_index: usize,
        len: usize,
    },
    /// A segment was deleted (see [`DiffHook::delete`])
    Delete {
        old_index: usize,
        old_len: usize,
        new_index: usize,
    },
    /// A segment was inserted (see [`DiffHook::insert`])
    Insert {
        old_index: usize,
        new_index: usize,
        new_len: usize,
    },
}

impl DiffOp {
    /// Returns the tag of the operation.
    pub fn tag(&self) -> DiffTag {
        match *self {
            DiffOp::Equal { .. } => DiffTag::Equal,
            DiffOp::Delete { .. } => DiffTag::Delete,
            DiffOp::Insert { .. } => DiffTag::Insert,
        }
    }

    /// Returns the range of the operation in the old sequence.
    ///
    /// Insertions yield an empty range at their insertion point.
    pub fn old_range(&self) -> Range<usize> {
        match *self {
            DiffOp::Equal { old_index, len, .. } => old_index..old_index + len,
            DiffOp::Delete {
                old_index, old_len, ..
            } => old_index..old_index + old_len,
            DiffOp::Insert { old_index, .. } => old_index..old_index,
        }
    }

    /// Returns the range of the operation in the new sequence.
    ///
    /// Deletions yield an empty range at the position they happened.
    pub fn new_range(&self) -> Range<usize> {
        match *self {
            DiffOp::Equal { new_index, len, .. } => new_index..new_index + len,
            DiffOp::Delete { new_index, .. } => new_index..new_index,
            DiffOp::Insert {
                new_index, new_len, ..
            } => new_index..new_index + new_len,
        }
    }

    /// Returns the number of tokens the operation covers.
    pub fn len(&self) -> usize {
        match *self {
            DiffOp::Equal { len, .. } => len,
            DiffOp::Delete { old_len, .. } => old_len,
            DiffOp::Insert { new_len, .. } => new_len,
        }
    }

    /// Returns `true` if the operation covers no tokens.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Transform the op into a tuple of diff tag and ranges.
    pub fn as_tag_tuple(&self) -> (DiffTag, Range<usize>, Range<usize>) {
        (self.tag(), self.old_range(), self.new_range())
    }

    /// Applies the operation to a [`DiffHook`].
    pub fn apply_to_hook<D: DiffHook>(&self, d: &mut D) -> Result<(), D::Error> {
        match *self {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => d.equal(old_index, new_index, len),
            DiffOp::Delete {
                old_index,
                old_len,
                new_index,
            } => d.delete(old_index, old_len, new_index),
            DiffOp::Insert {
                old_index,
                new_index,
                new_len,
            } => d.insert(old_index, new_index, new_len),
        }
    }
}

/// A [`DiffHook`] that captures all diff operations.
#[derive(Default, Clone)]
pub struct Capture(Vec<DiffOp>);

impl Capture {
    /// Creates a new capture hook.
    pub fn new() -> Capture {
        Capture::default()
    }

    /// Converts the capture hook into a vector of ops.
    pub fn into_ops(self) -> Vec<DiffOp> {
        self.0
    }

    /// Accesses the captured operations.
    pub fn ops(&self) -> &[DiffOp] {
        &self.0
    }
}

impl DiffHook for Capture {
    type Error = Infallible;

    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), Self::Error> {
        self.0.push(DiffOp::Equal {
            old_index,
            new_index,
            len,
        });
        Ok(())
    }

    fn delete(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
    ) -> Result<(), Self::Error> {
        self.0.push(DiffOp::Delete {
            old_index,
            old_len,
            new_index,
        });
        Ok(())
    }

    fn insert(
        &mut self,
        old_index: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        self.0.push(DiffOp::Insert {
            old_index,
            new_index,
            new_len,
        });
        Ok(())
    }
}

#[test]
fn test_op_ranges() {
    let op = DiffOp::Delete {
        old_index: 3,
        old_len: 2,
        new_index: 1,
    };
    assert_eq!(op.as_tag_tuple(), (DiffTag::Delete, 3..5, 1..1));
    let op = DiffOp::Insert {
        old_index: 5,
        new_index: 1,
        new_len: 4,
    };
    assert_eq!(op.as_tag_tuple(), (DiffTag::Insert, 5..5, 1..5));
    assert_eq!(op.len(), 4);
}
