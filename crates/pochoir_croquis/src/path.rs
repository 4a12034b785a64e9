//! Property path lookup.
//!
//! Binding expressions are dotted property paths (`user.name`). Reads go
//! through [`ReactiveObject::get`] segment by segment, so a watcher
//! evaluating a path is collected by every property along it.

use pochoir_carton::split_path;
use pochoir_relief::Result;

use crate::{ObjectRef, ReactiveObject, Value};

/// Evaluate `path` against `data`.
///
/// Any missing segment, or a segment reached through a non-object, yields
/// [`Value::Undefined`].
pub fn get_value(data: &ReactiveObject, path: &str) -> Value {
    let segments = split_path(path);
    let Some((first, rest)) = segments.split_first() else {
        return Value::Undefined;
    };
    let mut current = data.get(first);
    for segment in rest {
        current = match current {
            Value::Object(obj) => obj.get(segment),
            _ => return Value::Undefined,
        };
    }
    current
}

/// Assign `value` at `path` in `data`.
///
/// When an intermediate segment is missing or not an object the write is
/// dropped with a warning.
pub fn set_value(data: &ObjectRef, path: &str, value: impl Into<Value>) -> Result<()> {
    let segments = split_path(path);
    let Some((last, parents)) = segments.split_last() else {
        return Ok(());
    };

    let mut target = ObjectRef::clone(data);
    for segment in parents {
        target = match target.get(segment) {
            Value::Object(obj) => obj,
            _ => {
                tracing::warn!(path, segment, "write dropped: parent is not an object");
                return Ok(());
            }
        };
    }
    target.set(last, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{observe_json, EvalScope};

    #[test]
    fn test_get_value() {
        let scope = EvalScope::new();
        let data = observe_json(
            serde_json::json!({ "name": "a", "user": { "age": 3 } }),
            &scope,
        );
        assert_eq!(get_value(&data, "name").as_str(), Some("a"));
        assert_eq!(get_value(&data, " user.age ").to_display_string(), "3");
        assert!(get_value(&data, "user.missing").is_undefined());
        assert!(get_value(&data, "name.length").is_undefined());
        assert!(get_value(&data, "").is_undefined());
    }

    #[test]
    fn test_set_value() {
        let scope = EvalScope::new();
        let data = observe_json(serde_json::json!({ "user": { "age": 3 } }), &scope);

        set_value(&data, "user.age", 4).unwrap();
        assert_eq!(get_value(&data, "user.age").to_display_string(), "4");

        set_value(&data, "top", "x").unwrap();
        assert_eq!(get_value(&data, "top").as_str(), Some("x"));
    }

    #[test]
    fn test_set_value_through_missing_parent_is_dropped() {
        let scope = EvalScope::new();
        let data = observe_json(serde_json::json!({ "n": 1 }), &scope);

        set_value(&data, "missing.child", 1).unwrap();
        set_value(&data, "n.child", 1).unwrap();
        assert!(!data.contains_key("missing"));
        assert_eq!(get_value(&data, "n").to_display_string(), "1");
    }
}
