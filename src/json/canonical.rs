use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::json::value::Value;

/// Restates values with their object keys in ascending order.
///
/// The canonicalizer remembers every composite it has visited, keyed by
/// identity, together with the canonical value produced for it.  The
/// canonical composite is registered before its children are visited, so a
/// reference back to an ancestor resolves to the (eventually complete)
/// canonical ancestor instead of recursing forever.  Shared sub-structures
/// are restated once and shared in the output as well.
///
/// A cycle in the input therefore stays a cycle in the output.  It is the
/// serializer's job to reject it.
///
/// Every visited input is held on to next to its canonical value, so an
/// identity in the table can not be reused by another allocation while the
/// canonicalizer is alive.
#[derive(Default)]
pub struct Canonicalizer {
    seen: HashMap<usize, (Value, Value)>,
}

impl Canonicalizer {
    /// Creates a canonicalizer with an empty visited table.
    pub fn new() -> Canonicalizer {
        Canonicalizer::default()
    }

    /// Returns the number of composites visited so far.
    pub fn visited(&self) -> usize {
        self.seen.len()
    }

    /// Canonicalizes a value.
    ///
    /// Values canonicalized through the same canonicalizer share the
    /// visited table.
    pub fn canonicalize(&mut self, value: &Value) -> Value {
        let id = match value.identity() {
            Some(id) => id,
            None => return value.clone(),
        };
        if let Some((_, canonical)) = self.seen.get(&id) {
            return canonical.clone();
        }

        match value {
            Value::Array(items) => {
                let rv = Rc::new(RefCell::new(Vec::new()));
                self.seen.insert(id, (value.clone(), Value::Array(rv.clone())));
                let items = items.borrow();
                let mut canonical_items = Vec::with_capacity(items.len());
                for item in items.iter() {
                    canonical_items.push(self.canonicalize(item));
                }
                *rv.borrow_mut() = canonical_items;
                Value::Array(rv)
            }
            Value::Object(entries) => {
                let rv = Rc::new(RefCell::new(Vec::new()));
                self.seen.insert(id, (value.clone(), Value::Object(rv.clone())));
                let entries = entries.borrow();
                let mut sorted: Vec<&(String, Value)> = entries.iter().collect();
                sorted.sort_by(|a, b| a.0.cmp(&b.0));
                let mut canonical_entries = Vec::with_capacity(sorted.len());
                for (key, item) in sorted {
                    canonical_entries.push((key.clone(), self.canonicalize(item)));
                }
                *rv.borrow_mut() = canonical_entries;
                Value::Object(rv)
            }
            _ => value.clone(),
        }
    }
}

/// Restates a value with the keys of every object in ascending order.
///
/// Array order is kept, objects nested in arrays are canonicalized as well.
/// Self references are kept but point to the canonical counterpart of their
/// target, so they expose the same key order as the top level.
///
/// ```rust
/// use canondiff::json::{canonicalize, Value};
///
/// let value: Value = r#"{"b": 456, "a": {"d": 123, "c": 456}}"#.parse().unwrap();
/// let canonical = canonicalize(&value);
/// assert_eq!(canonical.keys(), vec!["a", "b"]);
/// assert_eq!(canonical.get("a").unwrap().keys(), vec!["c", "d"]);
/// ```
pub fn canonicalize(value: &Value) -> Value {
    let mut canonicalizer = Canonicalizer::new();
    let rv = canonicalizer.canonicalize(value);
    tracing::trace!(visited = canonicalizer.visited(), "value canonicalized");
    rv
}

#[test]
fn test_sorts_keys() {
    let value: Value = r#"{"b": 456, "a": 123}"#.parse().unwrap();
    assert_eq!(canonicalize(&value).keys(), vec!["a", "b"]);
}

#[test]
fn test_dives_into_nested_arrays() {
    let value: Value = r#"{"b": 456, "a": [789, {"d": 123, "c": 456}]}"#.parse().unwrap();
    let canonical = canonicalize(&value);
    let nested = canonical.get("a").unwrap().get_index(1).unwrap();
    assert_eq!(nested.keys(), vec!["c", "d"]);
    assert_eq!(canonical.get("a").unwrap().len(), 2);
}

#[test]
fn test_circular_references() {
    let obj = Value::object(vec![("b", Value::from(456))]);
    obj.insert("a", obj.clone());
    let canonical = canonicalize(&obj);
    assert_eq!(canonical.keys(), vec!["a", "b"]);
    let inner = canonical.get("a").unwrap();
    assert_eq!(inner.keys(), vec!["a", "b"]);
    assert!(inner.same_handle(&canonical));
    assert!(!canonical.same_handle(&obj));
    // the input is left alone
    assert_eq!(obj.keys(), vec!["b", "a"]);
}

#[test]
fn test_shared_substructure() {
    let shared = Value::object(vec![("y", Value::from(1)), ("x", Value::from(2))]);
    let value = Value::array(vec![shared.clone(), shared]);
    let canonical = canonicalize(&value);
    let first = canonical.get_index(0).unwrap();
    let second = canonical.get_index(1).unwrap();
    assert!(first.same_handle(&second));
    assert_eq!(second.keys(), vec!["x", "y"]);
}

#[test]
fn test_reused_canonicalizer_shares_values() {
    let shared = Value::object(vec![("b", Value::from(1)), ("a", Value::from(2))]);
    let first = Value::array(vec![shared.clone()]);
    let second = Value::object(vec![("x", shared)]);

    let mut canonicalizer = Canonicalizer::new();
    let first = canonicalizer.canonicalize(&first);
    let second = canonicalizer.canonicalize(&second);
    let from_first = first.get_index(0).unwrap();
    let from_second = second.get("x").unwrap();
    assert!(from_first.same_handle(&from_second));
    assert_eq!(from_second.keys(), vec!["a", "b"]);
    assert_eq!(canonicalizer.visited(), 3);
}

#[test]
fn test_reused_canonicalizer_after_drop() {
    let mut canonicalizer = Canonicalizer::new();
    for round in 0..64 {
        let object = Value::object(vec![("round", Value::from(round))]);
        let canonical = canonicalizer.canonicalize(&object);
        assert_eq!(canonical.keys(), vec!["round"]);
        drop(object);

        let array = Value::array(vec![Value::from(round)]);
        let canonical = canonicalizer.canonicalize(&array);
        assert!(matches!(canonical, Value::Array(_)));
        assert_eq!(canonical.len(), 1);
    }
    assert_eq!(canonicalizer.visited(), 128);
}

#[test]
fn test_scalars_pass_through() {
    let canonical = canonicalize(&Value::from("abc"));
    assert_eq!(canonical.as_str(), Some("abc"));
    assert!(!canonicalize(&Value::Null).is_composite());
}
