//! Data observation.

use std::rc::Rc;

use crate::{Dep, EvalScope, ObjectRef, ReactiveObject, Value};

/// Installs intercepted properties on data objects.
///
/// Every object reached from an observed value shares the observer's
/// [`EvalScope`].
#[derive(Debug, Clone)]
pub struct Observer {
    scope: Rc<EvalScope>,
}

impl Observer {
    pub fn new(scope: Rc<EvalScope>) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> &Rc<EvalScope> {
        &self.scope
    }

    /// Make every property of `value`, at every depth, reactive.
    ///
    /// Non-object values are ignored. Objects that are already observed are
    /// left as they are, which also keeps self-referencing data from
    /// recursing forever.
    pub fn observe(&self, value: &Value) {
        let Value::Object(obj) = value else {
            return;
        };
        if !obj.attach(&self.scope) {
            return;
        }
        for (key, value) in obj.entries() {
            self.define_reactive(obj, &key, value);
        }
    }

    /// Make `container[key]` reactive with the given value.
    ///
    /// The value is observed first, then the property is installed with a
    /// fresh [`Dep`]. Calling this again for the same key replaces the
    /// property and its registry; watchers of the old registry are not
    /// carried over.
    pub fn define_reactive(&self, container: &ReactiveObject, key: &str, value: Value) {
        self.observe(&value);
        container.attach(&self.scope);
        tracing::trace!(key, "define reactive");
        container.install(key, value, Rc::new(Dep::new()));
    }
}

/// Build an observed data tree from JSON.
pub fn observe_json(json: serde_json::Value, scope: &Rc<EvalScope>) -> ObjectRef {
    let obj = match Value::from(json) {
        Value::Object(obj) => obj,
        // Non-object roots are wrapped so there is still something to bind against.
        other => ReactiveObject::from_entries([("value", other)]),
    };
    Observer::new(Rc::clone(scope)).observe(&Value::Object(Rc::clone(&obj)));
    obj
}
