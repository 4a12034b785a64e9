//! Binding subscribers.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use pochoir_carton::String;
use pochoir_relief::Result;

use crate::{get_value, Dep, EvalScope, ObjectRef, Value};

/// Lifecycle token of a [`Watcher`], unique within its [`EvalScope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct WatcherId(u32);

impl WatcherId {
    #[inline(always)]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WatcherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

type Callback = Box<dyn Fn(&Value) -> Result<()>>;

/// One live binding: a property path evaluated against a data object, the
/// last value it produced, and the callback run when that value changes.
pub struct Watcher {
    id: WatcherId,
    expression: String,
    data: ObjectRef,
    on_change: Callback,
    last_value: RefCell<Value>,
    deps: RefCell<Vec<Weak<Dep>>>,
}

impl Watcher {
    /// Create a watcher and collect its dependencies.
    ///
    /// `expression` is evaluated once while the watcher occupies `scope`'s
    /// marker; every reactive property read during that evaluation records
    /// the watcher. The result becomes the initial last value. `on_change`
    /// is not called here.
    pub fn new(
        expression: impl Into<String>,
        data: &ObjectRef,
        scope: &EvalScope,
        on_change: impl Fn(&Value) -> Result<()> + 'static,
    ) -> Rc<Self> {
        let watcher = Rc::new(Self {
            id: scope.next_watcher_id(),
            expression: expression.into(),
            data: Rc::clone(data),
            on_change: Box::new(on_change),
            last_value: RefCell::new(Value::Undefined),
            deps: RefCell::new(Vec::new()),
        });

        let value = {
            let _guard = scope.enter(Rc::clone(&watcher));
            get_value(&watcher.data, &watcher.expression)
        };
        tracing::trace!(
            watcher = %watcher.id,
            expression = %watcher.expression,
            deps = watcher.deps.borrow().len(),
            "collected"
        );
        *watcher.last_value.borrow_mut() = value;
        watcher
    }

    /// Re-evaluate and, if the value changed, run the callback.
    ///
    /// Reads here do not occupy the marker. After a successful callback the
    /// new value becomes the last value, so each later change is compared
    /// against the most recent one.
    pub fn update(&self) -> Result<()> {
        let value = get_value(&self.data, &self.expression);
        let changed = !value.strict_eq(&self.last_value.borrow());
        if changed {
            tracing::trace!(watcher = %self.id, expression = %self.expression, "changed");
            (self.on_change)(&value)?;
            *self.last_value.borrow_mut() = value;
        }
        Ok(())
    }

    /// Remove this watcher from every registry it was collected into.
    pub fn teardown(&self) {
        for dep in self.deps.take() {
            if let Some(dep) = dep.upgrade() {
                dep.remove_subscriber(self.id);
            }
        }
    }

    #[inline]
    pub fn id(&self) -> WatcherId {
        self.id
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Last value seen (initially the value at construction).
    pub fn value(&self) -> Value {
        self.last_value.borrow().clone()
    }

    /// Number of registries this watcher is collected into.
    pub fn dep_count(&self) -> usize {
        self.deps.borrow().len()
    }

    pub(crate) fn track(&self, dep: &Rc<Dep>) {
        self.deps.borrow_mut().push(Rc::downgrade(dep));
    }
}

impl fmt::Debug for Watcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watcher")
            .field("id", &self.id)
            .field("expression", &self.expression)
            .field("last_value", &self.last_value.borrow())
            .finish_non_exhaustive()
    }
}
