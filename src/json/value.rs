use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde_json::Number;

use crate::error::Error;

/// Shared handle to the elements of an array.
pub type Array = Rc<RefCell<Vec<Value>>>;

/// Shared handle to the entries of an object, in insertion order.
pub type Object = Rc<RefCell<Vec<(String, Value)>>>;

/// A JSON-like value whose arrays and objects are shared handles.
///
/// Cloning a composite value clones the handle, not the contents, so a value
/// can be stored inside itself to form a cycle or appear at several places
/// of a tree.  Object keys keep their insertion order.
///
/// ```rust
/// use canondiff::json::Value;
///
/// let obj = Value::object(vec![("foo", Value::from(123))]);
/// obj.insert("bar", obj.clone());
/// assert_eq!(obj.keys(), vec!["foo", "bar"]);
/// assert!(obj.get("bar").unwrap().same_handle(&obj));
/// ```
#[derive(Clone)]
pub enum Value {
    /// The `null` value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number, stored the way `serde_json` stores it.
    Number(Number),
    /// A string.
    String(String),
    /// A shared handle to an array.
    Array(Array),
    /// A shared handle to an object.
    Object(Object),
}

impl Value {
    /// Creates an array value.
    pub fn array(items: Vec<Value>) -> Value {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    /// Creates an object value.
    ///
    /// Later duplicates of a key replace the earlier value but keep its
    /// position.
    pub fn object<K: Into<String>>(entries: Vec<(K, Value)>) -> Value {
        let rv = Value::Object(Rc::new(RefCell::new(Vec::with_capacity(entries.len()))));
        for (key, value) in entries {
            rv.insert(key, value);
        }
        rv
    }

    /// Sets a key on an object value.
    ///
    /// Existing keys are replaced in place, new keys are appended.  Returns
    /// `false` if the value is not an object.
    pub fn insert<K: Into<String>>(&self, key: K, value: Value) -> bool {
        let entries = match self {
            Value::Object(entries) => entries,
            _ => return false,
        };
        let key = key.into();
        let mut entries = entries.borrow_mut();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
        true
    }

    /// Appends an item to an array value.
    ///
    /// Returns `false` if the value is not an array.
    pub fn push(&self, value: Value) -> bool {
        match self {
            Value::Array(items) => {
                items.borrow_mut().push(value);
                true
            }
            _ => false,
        }
    }

    /// Looks up a key of an object value.
    pub fn get(&self, key: &str) -> Option<Value> {
        match self {
            Value::Object(entries) => entries
                .borrow()
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone()),
            _ => None,
        }
    }

    /// Looks up an item of an array value.
    pub fn get_index(&self, index: usize) -> Option<Value> {
        match self {
            Value::Array(items) => items.borrow().get(index).cloned(),
            _ => None,
        }
    }

    /// Returns the keys of an object value in their current order.
    ///
    /// Non-objects have no keys.
    pub fn keys(&self) -> Vec<String> {
        match self {
            Value::Object(entries) => entries.borrow().iter().map(|(k, _)| k.clone()).collect(),
            _ => Vec::new(),
        }
    }

    /// Returns the number of items or entries of a composite value.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.borrow().len(),
            Value::Object(entries) => entries.borrow().len(),
            _ => 0,
        }
    }

    /// Returns `true` for empty composites and for all scalars.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` for arrays and objects.
    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Returns the identity of a composite value.
    ///
    /// Two values share an identity if they are handles to the same array
    /// or object.  Scalars have no identity.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Array(items) => Some(Rc::as_ptr(items) as *const () as usize),
            Value::Object(entries) => Some(Rc::as_ptr(entries) as *const () as usize),
            _ => None,
        }
    }

    /// Returns `true` if both values are handles to the same composite.
    pub fn same_handle(&self, other: &Value) -> bool {
        match (self.identity(), other.identity()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Returns the string of a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Value {
        Value::Null
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Value {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(Rc::new(RefCell::new(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Value {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Value {
        Value::Number(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Value {
        Value::Number(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Value {
        Value::Number(value.into())
    }
}

impl From<f64> for Value {
    /// Non-finite numbers become `null`, like they do in JSON.
    fn from(value: f64) -> Value {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Value {
        value.map_or(Value::Null, Into::into)
    }
}

impl FromStr for Value {
    type Err = Error;

    /// Parses JSON text, keeping the key order of the document.
    fn from_str(s: &str) -> Result<Value, Error> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        Ok(value.into())
    }
}

struct DebugValue<'a> {
    value: &'a Value,
    ancestors: &'a RefCell<Vec<usize>>,
}

impl<'a> fmt::Debug for DebugValue<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self.value.identity() {
            Some(id) => id,
            None => return fmt::Debug::fmt(self.value, f),
        };
        if self.ancestors.borrow().contains(&id) {
            return f.write_str("[Circular]");
        }
        self.ancestors.borrow_mut().push(id);
        let rv = match self.value {
            Value::Array(items) => f
                .debug_list()
                .entries(items.borrow().iter().map(|value| DebugValue {
                    value,
                    ancestors: self.ancestors,
                }))
                .finish(),
            Value::Object(entries) => f
                .debug_map()
                .entries(entries.borrow().iter().map(|(k, value)| {
                    (
                        k,
                        DebugValue {
                            value,
                            ancestors: self.ancestors,
                        },
                    )
                }))
                .finish(),
            _ => Ok(()),
        };
        self.ancestors.borrow_mut().pop();
        rv
    }
}

impl fmt::Debug for Value {
    /// Formats the value.  References to an ancestor print as `[Circular]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({:?})", b),
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Array(_) | Value::Object(_) => {
                let ancestors = RefCell::new(Vec::new());
                fmt::Debug::fmt(
                    &DebugValue {
                        value: self,
                        ancestors: &ancestors,
                    },
                    f,
                )
            }
        }
    }
}

#[test]
fn test_object_insert_keeps_position() {
    let obj = Value::object(vec![("b", Value::from(1)), ("a", Value::from(2))]);
    obj.insert("b", Value::from(3));
    assert_eq!(obj.keys(), vec!["b", "a"]);
    assert_eq!(obj.get("b").map(|v| format!("{:?}", v)), Some("Number(3)".into()));
    assert!(!Value::Null.insert("x", Value::Null));
}

#[test]
fn test_from_serde_keeps_order() {
    let value: Value = r#"{"z": 1, "a": [true, null, "x"]}"#.parse().unwrap();
    assert_eq!(value.keys(), vec!["z", "a"]);
    assert_eq!(value.get("a").unwrap().len(), 3);
    assert!(matches!(
        "{".parse::<Value>(),
        Err(Error::Json(_))
    ));
}

#[test]
fn test_debug_cycle() {
    let obj = Value::object(vec![("foo", Value::from(123))]);
    obj.insert("bar", obj.clone());
    assert_eq!(
        format!("{:?}", obj),
        r#"{"foo": Number(123), "bar": [Circular]}"#
    );
}

#[test]
fn test_shared_identity() {
    let shared = Value::array(vec![]);
    let outer = Value::array(vec![shared.clone(), shared.clone()]);
    assert!(outer.get_index(0).unwrap().same_handle(&outer.get_index(1).unwrap()));
    assert!(!Value::from(1).same_handle(&Value::from(1)));
    assert!(shared.push(Value::Null));
    assert_eq!(outer.get_index(1).unwrap().len(), 1);
}
