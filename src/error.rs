//! Error types.

/// Errors raised by the structured value layer.
///
/// The diff engine itself cannot fail, errors only come out of parsing and
/// serializing [`Value`](crate::json::Value)s.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The value still contains a reference to one of its own ancestors.
    #[error("Converting circular structure to JSON")]
    CircularStructure,

    /// The input was not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[test]
fn test_messages() {
    assert_eq!(
        Error::CircularStructure.to_string(),
        "Converting circular structure to JSON"
    );
    let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(Error::from(err).to_string().starts_with("Invalid JSON: "));
}
