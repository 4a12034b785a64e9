//! Observed data objects.
//!
//! A [`ReactiveObject`] starts out plain: its properties hold values and
//! nothing else. [`Observer::observe`](crate::Observer::observe) turns every
//! property into a reactive one by giving it a [`Dep`] and attaching the
//! object to an [`EvalScope`]. From then on:
//!
//! - [`ReactiveObject::get`] registers the watcher currently occupying the
//!   scope's marker with the property's `Dep`;
//! - [`ReactiveObject::set`] ignores strictly-equal writes, observes the new
//!   value, stores it and notifies the `Dep`.

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use pochoir_carton::{FxHashMap, String};
use pochoir_relief::Result;

use crate::{Dep, EvalScope, Observer, Value};

/// Shared handle to an object.
pub type ObjectRef = Rc<ReactiveObject>;

/// One property slot.
#[derive(Debug)]
pub(crate) struct Property {
    value: RefCell<Value>,
    /// Present once the property has been made reactive
    dep: Option<Rc<Dep>>,
}

#[derive(Debug, Default)]
struct Properties {
    keys: Vec<String>,
    slots: FxHashMap<String, Rc<Property>>,
}

/// An ordered map from key to property, optionally observed.
#[derive(Debug, Default)]
pub struct ReactiveObject {
    props: RefCell<Properties>,
    scope: OnceCell<Rc<EvalScope>>,
}

impl ReactiveObject {
    /// Create an empty plain object.
    pub fn new() -> ObjectRef {
        Rc::new(Self::default())
    }

    /// Create a plain object from key/value pairs.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> ObjectRef
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let obj = Self::default();
        {
            let mut props = obj.props.borrow_mut();
            for (key, value) in entries {
                props.insert(
                    key.into(),
                    Property {
                        value: RefCell::new(value.into()),
                        dep: None,
                    },
                );
            }
        }
        Rc::new(obj)
    }

    /// Intercepted read.
    ///
    /// Missing keys read as [`Value::Undefined`] and register nothing.
    pub fn get(&self, key: &str) -> Value {
        let Some(prop) = self.slot(key) else {
            return Value::Undefined;
        };
        if let (Some(dep), Some(scope)) = (&prop.dep, self.scope.get()) {
            if let Some(watcher) = scope.current() {
                tracing::trace!(key, watcher = %watcher.id(), "collect dependency");
                dep.depend(&watcher);
            }
        }
        let value = prop.value.borrow().clone();
        value
    }

    /// Read without registering any dependency.
    pub fn peek(&self, key: &str) -> Value {
        let Some(prop) = self.slot(key) else {
            return Value::Undefined;
        };
        let value = prop.value.borrow().clone();
        value
    }

    /// Intercepted write.
    ///
    /// Writing a strictly-equal value is a no-op. Otherwise the new value is
    /// observed, stored, and every watcher registered for `key` runs before
    /// this returns; the first watcher error aborts the rest and is returned.
    ///
    /// Writing a key the object does not have adds it, reactive if the
    /// object is observed. Nothing can depend on it yet, so nothing runs.
    pub fn set(self: &Rc<Self>, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let Some(prop) = self.slot(key) else {
            match self.scope.get() {
                Some(scope) => {
                    tracing::debug!(key, "define property on write");
                    Observer::new(Rc::clone(scope)).define_reactive(self, key, value);
                }
                None => self.insert_plain(key, value),
            }
            return Ok(());
        };

        if prop.value.borrow().strict_eq(&value) {
            return Ok(());
        }

        let Some(dep) = &prop.dep else {
            *prop.value.borrow_mut() = value;
            return Ok(());
        };

        if let Some(scope) = self.scope.get() {
            Observer::new(Rc::clone(scope)).observe(&value);
        }
        tracing::debug!(key, value = %value.to_display_string(), "set");
        *prop.value.borrow_mut() = value;
        dep.notify()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.props.borrow().keys.clone()
    }

    pub fn len(&self) -> usize {
        self.props.borrow().keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.props.borrow().slots.contains_key(key)
    }

    /// Whether this object has been observed.
    pub fn is_observed(&self) -> bool {
        self.scope.get().is_some()
    }

    /// Whether `key` exists and is intercepted.
    pub fn is_reactive(&self, key: &str) -> bool {
        self.slot(key).is_some_and(|prop| prop.dep.is_some())
    }

    /// The dependency registry of a reactive property.
    pub fn dep(&self, key: &str) -> Option<Rc<Dep>> {
        self.slot(key).and_then(|prop| prop.dep.clone())
    }

    /// Snapshot as a JSON object without registering dependencies.
    pub fn to_json(&self) -> serde_json::Value {
        let props = self.props.borrow();
        let map = props
            .keys
            .iter()
            .filter_map(|key| {
                let prop = props.slots.get(key)?;
                let value = prop.value.borrow().to_json();
                Some((key.to_string(), value))
            })
            .collect();
        serde_json::Value::Object(map)
    }

    /// Attach the object to `scope`. Returns `false` if it was already observed.
    pub(crate) fn attach(&self, scope: &Rc<EvalScope>) -> bool {
        self.scope.set(Rc::clone(scope)).is_ok()
    }

    /// Current (key, value) pairs, untracked.
    pub(crate) fn entries(&self) -> Vec<(String, Value)> {
        let props = self.props.borrow();
        props
            .keys
            .iter()
            .filter_map(|key| {
                let prop = props.slots.get(key)?;
                let value = prop.value.borrow().clone();
                Some((key.clone(), value))
            })
            .collect()
    }

    /// Install (or replace) a reactive property.
    pub(crate) fn install(&self, key: &str, value: Value, dep: Rc<Dep>) {
        self.props.borrow_mut().insert(
            String::from(key),
            Property {
                value: RefCell::new(value),
                dep: Some(dep),
            },
        );
    }

    fn insert_plain(&self, key: &str, value: Value) {
        self.props.borrow_mut().insert(
            String::from(key),
            Property {
                value: RefCell::new(value),
                dep: None,
            },
        );
    }

    fn slot(&self, key: &str) -> Option<Rc<Property>> {
        self.props.borrow().slots.get(key).cloned()
    }
}

impl Properties {
    fn insert(&mut self, key: String, prop: Property) {
        if self.slots.insert(key.clone(), Rc::new(prop)).is_none() {
            self.keys.push(key);
        }
    }
}
