use canondiff::json::{canonicalize, diff_json, diff_json_str, to_string_pretty, Value};
use canondiff::render::to_xml;
use canondiff::{ChangeTag, Error, Hunk};
use serde_json::json;

fn value(v: serde_json::Value) -> Value {
    Value::from(v)
}

fn hunk(tag: ChangeTag, count: usize, value: &str) -> Hunk<String> {
    Hunk::new(tag, count, value.to_string())
}

fn removed_last_field() -> Vec<Hunk<String>> {
    vec![
        hunk(ChangeTag::Equal, 3, "{\n  \"a\": 123,\n  \"b\": 456,\n"),
        hunk(ChangeTag::Delete, 1, "  \"c\": 789\n"),
        hunk(ChangeTag::Equal, 1, "}"),
    ]
}

#[test]
fn test_accepts_objects() {
    let hunks = diff_json(
        &value(json!({"a": 123, "b": 456, "c": 789})),
        &value(json!({"a": 123, "b": 456})),
    )
    .unwrap();
    assert_eq!(hunks, removed_last_field());
}

#[test]
fn test_accepts_objects_with_different_order() {
    let hunks = diff_json(
        &value(json!({"a": 123, "b": 456, "c": 789})),
        &value(json!({"b": 456, "a": 123})),
    )
    .unwrap();
    assert_eq!(hunks, removed_last_field());
}

#[test]
fn test_accepts_nested_structures() {
    let hunks = diff_json(
        &value(json!({"a": 123, "b": 456, "c": [1, 2, {"foo": "bar"}, 4]})),
        &value(json!({"a": 123, "b": 456, "c": [1, {"foo": "bar"}, 4]})),
    )
    .unwrap();
    assert_eq!(
        hunks,
        vec![
            hunk(
                ChangeTag::Equal,
                5,
                "{\n  \"a\": 123,\n  \"b\": 456,\n  \"c\": [\n    1,\n"
            ),
            hunk(ChangeTag::Delete, 1, "    2,\n"),
            hunk(
                ChangeTag::Equal,
                6,
                "    {\n      \"foo\": \"bar\"\n    },\n    4\n  ]\n}"
            ),
        ]
    );
}

#[test]
fn test_accepts_already_stringified_json() {
    let old = serde_json::to_string_pretty(&json!({"a": 123, "b": 456, "c": 789})).unwrap();
    let new = serde_json::to_string_pretty(&json!({"a": 123, "b": 456})).unwrap();
    assert_eq!(diff_json_str(&old, &new), removed_last_field());
}

#[test]
fn test_ignores_trailing_comma_of_removed_property() {
    let hunks = diff_json(
        &value(json!({"a": 123, "b": 456, "c": 789})),
        &value(json!({"a": 123, "b": 456})),
    )
    .unwrap();
    assert_eq!(
        to_xml(&hunks),
        "{\n  &quot;a&quot;: 123,\n  &quot;b&quot;: 456,\n<del>  &quot;c&quot;: 789\n</del>}"
    );
}

#[test]
fn test_ignores_missing_trailing_comma_of_added_property() {
    let hunks = diff_json(
        &value(json!({"a": 123, "b": 456})),
        &value(json!({"a": 123, "b": 456, "c": 789})),
    )
    .unwrap();
    assert_eq!(
        to_xml(&hunks),
        "{\n  &quot;a&quot;: 123,\n  &quot;b&quot;: 456,\n<ins>  &quot;c&quot;: 789\n</ins>}"
    );
}

#[test]
fn test_rejects_circular_references() {
    let circular = Value::object(vec![("foo", Value::from(123))]);
    circular.insert("bar", circular.clone());
    let err = diff_json(&circular, &value(json!({"foo": 123, "bar": {}}))).unwrap_err();
    assert!(matches!(err, Error::CircularStructure));
    assert_eq!(err.to_string(), "Converting circular structure to JSON");

    // the other side is checked as well
    let err = diff_json(&value(json!({"foo": 123, "bar": {}})), &circular).unwrap_err();
    assert!(matches!(err, Error::CircularStructure));
}

#[test]
fn test_shared_values_are_not_circular() {
    let shared = value(json!({"y": 1, "x": 2}));
    let old = Value::array(vec![shared.clone(), shared]);
    let new = value(json!([{"x": 2, "y": 1}, {"x": 2, "y": 3}]));
    let hunks = diff_json(&old, &new).unwrap();
    insta::assert_snapshot!(to_xml(&hunks), @r###"
    [
      {
        &quot;x&quot;: 2,
        &quot;y&quot;: 1
      },
      {
        &quot;x&quot;: 2,
    <del>    &quot;y&quot;: 1
    </del><ins>    &quot;y&quot;: 3
    </ins>  }
    ]
    "###);
}

#[test]
fn test_changed_value_and_appended_item() {
    let hunks = diff_json(
        &value(json!({"z": [1, 2], "a": 1})),
        &value(json!({"a": 2, "z": [1, 2, 3]})),
    )
    .unwrap();
    let rendered = hunks.iter().map(|h| h.to_string()).collect::<Vec<_>>();
    assert_eq!(
        rendered,
        vec![
            " {\n",
            "-  \"a\": 1,\n",
            "+  \"a\": 2,\n",
            "   \"z\": [\n    1,\n    2,\n",
            "+    3\n",
            "   ]\n}",
        ]
    );
}

#[test]
fn test_canonical_serialization_is_order_independent() {
    let a = value(json!({"b": {"y": [3, {"q": 1, "p": 2}], "x": null}, "a": true}));
    let b = value(json!({"a": true, "b": {"x": null, "y": [3, {"p": 2, "q": 1}]}}));
    let a = to_string_pretty(&canonicalize(&a)).unwrap();
    let b = to_string_pretty(&canonicalize(&b)).unwrap();
    assert_eq!(a, b);
}
