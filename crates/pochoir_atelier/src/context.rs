//! The binding context a template is compiled against.

use std::fmt;
use std::rc::Rc;

use pochoir_carton::{FxHashMap, String};
use pochoir_croquis::{EvalScope, ObjectRef};
use pochoir_relief::{Event, RenderTree, Result};

/// An event handler. It receives the observed data object as its receiver,
/// so it can read and write bound properties, plus the triggering event.
pub type Method = Rc<dyn Fn(&ObjectRef, &Event) -> Result<()>>;

/// Declared event handlers by name.
pub type Methods = FxHashMap<String, Method>;

/// Everything a binding strategy needs: the observed data, the scope its
/// watchers collect under, the declared methods and the host tree.
#[derive(Clone)]
pub struct BindingContext {
    pub data: ObjectRef,
    pub scope: Rc<EvalScope>,
    pub methods: Rc<Methods>,
    pub host: Rc<dyn RenderTree>,
}

impl BindingContext {
    pub fn new(
        data: ObjectRef,
        scope: Rc<EvalScope>,
        methods: Methods,
        host: Rc<dyn RenderTree>,
    ) -> Self {
        Self {
            data,
            scope,
            methods: Rc::new(methods),
            host,
        }
    }

    pub fn method(&self, name: &str) -> Option<Method> {
        self.methods.get(name).cloned()
    }
}

impl fmt::Debug for BindingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        methods.sort_unstable();
        f.debug_struct("BindingContext")
            .field("data", &self.data.to_json())
            .field("scope", &self.scope)
            .field("methods", &methods)
            .finish_non_exhaustive()
    }
}
