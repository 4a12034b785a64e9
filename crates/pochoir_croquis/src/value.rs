//! Data values held by observed objects.

use std::rc::Rc;

use pochoir_carton::{format_number, String};

use crate::object::{ObjectRef, ReactiveObject};

/// A value stored in a data object.
///
/// Objects are shared handles: cloning a `Value::Object` clones the handle,
/// not the object.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Result of reading a missing property
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(ObjectRef),
}

impl Value {
    /// Build a plain (not yet observed) object from key/value pairs.
    pub fn object<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(ReactiveObject::from_entries(entries))
    }

    /// Strict equality: primitives by value, objects by identity.
    ///
    /// `NaN` is never strictly equal to itself.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Text shown when the value is rendered into the tree.
    ///
    /// Missing and null values render empty; objects render as compact JSON
    /// without registering any dependency.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Undefined | Value::Null => String::default(),
            Value::Bool(b) => String::const_new(if *b { "true" } else { "false" }),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Object(obj) => String::from(obj.to_json().to_string()),
        }
    }

    /// Snapshot as JSON without registering dependencies.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Undefined | Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 => {
                serde_json::Value::from(*n as i64)
            }
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.to_string()),
            Value::Object(obj) => obj.to_json(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(String::from(s))
    }
}

impl From<std::string::String> for Value {
    fn from(s: std::string::String) -> Self {
        Value::String(String::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::from(s),
            // Arrays are carried as index-keyed objects; mutation of them is not intercepted.
            serde_json::Value::Array(items) => Value::object(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| (i.to_string(), Value::from(item))),
            ),
            serde_json::Value::Object(map) => {
                Value::object(map.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_eq_primitives() {
        assert!(Value::from("a").strict_eq(&Value::from("a")));
        assert!(!Value::from("a").strict_eq(&Value::from("b")));
        assert!(Value::from(1).strict_eq(&Value::from(1.0)));
        assert!(!Value::from(1).strict_eq(&Value::from("1")));
        assert!(Value::Undefined.strict_eq(&Value::Undefined));
        assert!(!Value::Undefined.strict_eq(&Value::Null));
        assert!(!Value::Number(f64::NAN).strict_eq(&Value::Number(f64::NAN)));
    }

    #[test]
    fn test_strict_eq_objects_by_identity() {
        let a = Value::object([("x", 1)]);
        let b = Value::object([("x", 1)]);
        assert!(a.strict_eq(&a.clone()));
        assert!(!a.strict_eq(&b));
    }

    #[test]
    fn test_display_string() {
        assert_eq!(Value::Undefined.to_display_string(), "");
        assert_eq!(Value::Null.to_display_string(), "");
        assert_eq!(Value::from(true).to_display_string(), "true");
        assert_eq!(Value::from(42).to_display_string(), "42");
        assert_eq!(Value::from(0.5).to_display_string(), "0.5");
        assert_eq!(Value::from("hi").to_display_string(), "hi");
        assert_eq!(
            Value::object([("a", 1)]).to_display_string(),
            r#"{"a":1}"#
        );
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(serde_json::json!({
            "name": "pochoir",
            "user": { "age": 3 },
            "tags": ["a", "b"]
        }));
        let obj = value.as_object().unwrap();
        assert_eq!(obj.peek("name").as_str(), Some("pochoir"));
        let user = obj.peek("user");
        assert!(user.as_object().unwrap().peek("age").strict_eq(&Value::from(3)));
        let tags = obj.peek("tags");
        assert_eq!(tags.as_object().unwrap().peek("1").as_str(), Some("b"));
    }
}
