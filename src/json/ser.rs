use crate::error::Error;
use crate::json::value::Value;

/// Converts a value into a [`serde_json::Value`].
///
/// Shared sub-structures are copied for every occurrence.  A composite that
/// contains itself (directly or through its descendants) cannot be
/// represented and fails with [`Error::CircularStructure`].
pub fn to_serde(value: &Value) -> Result<serde_json::Value, Error> {
    let mut ancestors = Vec::new();
    convert(value, &mut ancestors)
}

/// Serializes a value to pretty printed JSON.
///
/// The output is indented with two spaces, uses `": "` between keys and
/// values and keeps the key order of the value.  There is no trailing
/// newline.
///
/// ```rust
/// use canondiff::json::{to_string_pretty, Value};
///
/// let value = Value::object(vec![("a", Value::from(1)), ("b", Value::array(vec![]))]);
/// assert_eq!(to_string_pretty(&value).unwrap(), "{\n  \"a\": 1,\n  \"b\": []\n}");
/// ```
pub fn to_string_pretty(value: &Value) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(&to_serde(value)?)?)
}

fn convert(value: &Value, ancestors: &mut Vec<usize>) -> Result<serde_json::Value, Error> {
    if let Some(id) = value.identity() {
        if ancestors.contains(&id) {
            tracing::debug!(depth = ancestors.len(), "refusing to serialize circular structure");
            return Err(Error::CircularStructure);
        }
        ancestors.push(id);
    }
    let rv = match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => serde_json::Value::Number(n.clone()),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(
            items
                .borrow()
                .iter()
                .map(|item| convert(item, ancestors))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(entries) => {
            let mut map = serde_json::Map::new();
            for (key, item) in entries.borrow().iter() {
                map.insert(key.clone(), convert(item, ancestors)?);
            }
            serde_json::Value::Object(map)
        }
    };
    if value.is_composite() {
        ancestors.pop();
    }
    Ok(rv)
}

#[test]
fn test_pretty_layout() {
    let value: Value = r#"{"b": [1, {"x": null}], "a": "s", "c": {}}"#.parse().unwrap();
    insta::assert_snapshot!(to_string_pretty(&value).unwrap(), @r###"
    {
      "b": [
        1,
        {
          "x": null
        }
      ],
      "a": "s",
      "c": {}
    }
    "###);
}

#[test]
fn test_rejects_cycles() {
    let obj = Value::object(vec![("foo", Value::from(123))]);
    obj.insert("bar", obj.clone());
    assert!(matches!(to_string_pretty(&obj), Err(Error::CircularStructure)));

    let outer = Value::array(vec![]);
    let inner = Value::array(vec![outer.clone()]);
    outer.push(inner);
    assert!(matches!(to_serde(&outer), Err(Error::CircularStructure)));
}

#[test]
fn test_accepts_shared_substructures() {
    let shared = Value::array(vec![Value::from(true)]);
    let value = Value::object(vec![("x", shared.clone()), ("y", shared)]);
    assert_eq!(
        to_serde(&value).unwrap(),
        serde_json::json!({"x": [true], "y": [true]})
    );
}
