use std::fmt;

/// The classification of a [`Hunk`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChangeTag {
    /// The tokens are present in both sequences.
    Equal,
    /// The tokens were removed from the old sequence.
    Delete,
    /// The tokens were inserted by the new sequence.
    Insert,
}

impl fmt::Display for ChangeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match &self {
                ChangeTag::Equal => ' ',
                ChangeTag::Delete => '-',
                ChangeTag::Insert => '+',
            }
        )
    }
}

/// A merged run of tokens sharing the same classification.
///
/// `count` is the number of tokens in the run and `value` their
/// concatenation.  What "concatenation" means depends on the value type:
/// text diffs join the token strings, array diffs collect the elements
/// into a vector.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Hunk<V> {
    tag: ChangeTag,
    count: usize,
    value: V,
}

impl<V> Hunk<V> {
    /// Creates a new hunk.
    pub fn new(tag: ChangeTag, count: usize, value: V) -> Hunk<V> {
        Hunk { tag, count, value }
    }

    /// Returns the change tag.
    pub fn tag(&self) -> ChangeTag {
        self.tag
    }

    /// Returns the number of tokens in this hunk.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the joined value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the hunk and returns the joined value.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Returns `true` if the tokens were inserted.
    pub fn added(&self) -> bool {
        self.tag == ChangeTag::Insert
    }

    /// Returns `true` if the tokens were removed.
    pub fn removed(&self) -> bool {
        self.tag == ChangeTag::Delete
    }

    /// Returns `true` if the tokens are unchanged.
    pub fn is_equal(&self) -> bool {
        self.tag == ChangeTag::Equal
    }

    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub(crate) fn grow(&mut self, by: usize) {
        self.count += by;
    }
}

impl<V: fmt::Display> fmt::Display for Hunk<V> {
    /// Renders the value prefixed with the change marker (`+`, `-` or a
    /// space).  This is mostly for debugging.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tag, self.value)
    }
}

#[cfg(feature = "serde")]
impl<V: serde::Serialize> serde::Serialize for Hunk<V> {
    /// Serializes as `{count, value}` with `added` or `removed` set to
    /// `true` for changed runs.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let fields = if self.is_equal() { 2 } else { 3 };
        let mut s = serializer.serialize_struct("Hunk", fields)?;
        s.serialize_field("count", &self.count)?;
        s.serialize_field("value", &self.value)?;
        match self.tag {
            ChangeTag::Insert => s.serialize_field("added", &true)?,
            ChangeTag::Delete => s.serialize_field("removed", &true)?,
            ChangeTag::Equal => {}
        }
        s.end()
    }
}

#[test]
fn test_hunk_flags() {
    let hunk = Hunk::new(ChangeTag::Delete, 2, "ab".to_string());
    assert!(hunk.removed());
    assert!(!hunk.added());
    assert!(!hunk.is_equal());
    assert_eq!(hunk.to_string(), "-ab");
    assert_eq!(hunk.count(), 2);
}

#[test]
#[cfg(feature = "serde")]
fn test_hunk_serialize() {
    let hunks = vec![
        Hunk::new(ChangeTag::Equal, 1, "a".to_string()),
        Hunk::new(ChangeTag::Insert, 1, "b".to_string()),
    ];
    assert_eq!(
        serde_json::to_string(&hunks).unwrap(),
        r#"[{"count":1,"value":"a"},{"count":1,"value":"b","added":true}]"#
    );
}
