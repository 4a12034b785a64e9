//! The current-evaluation marker.
//!
//! Dependency collection happens as a side effect of reading properties, so
//! a property getter must know which watcher (if any) is evaluating right
//! now. Rather than a process-wide global, that slot lives in an
//! [`EvalScope`] shared by one observed data tree and the watchers created
//! against it.
//!
//! The slot is only ever filled through [`EvalScope::enter`], whose guard
//! clears it when dropped, so it is released on every exit path including
//! unwinding.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::{Watcher, WatcherId};

/// Execution context for one observed data tree.
#[derive(Default)]
pub struct EvalScope {
    current: RefCell<Option<Rc<Watcher>>>,
    next_id: Cell<u32>,
}

impl EvalScope {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// The watcher currently evaluating, if any.
    pub fn current(&self) -> Option<Rc<Watcher>> {
        self.current.borrow().clone()
    }

    #[inline]
    pub fn is_collecting(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Occupy the marker with `watcher` until the guard is dropped.
    ///
    /// Evaluation is synchronous and never nests, so the slot is expected to
    /// be empty on entry.
    pub fn enter(&self, watcher: Rc<Watcher>) -> EvalGuard<'_> {
        let previous = self.current.replace(Some(watcher));
        debug_assert!(previous.is_none(), "evaluation marker already occupied");
        EvalGuard { scope: self }
    }

    pub(crate) fn next_watcher_id(&self) -> WatcherId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        WatcherId::new(id)
    }
}

impl fmt::Debug for EvalScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalScope")
            .field("current", &self.current.borrow().as_ref().map(|w| w.id()))
            .field("next_id", &self.next_id.get())
            .finish()
    }
}

/// Releases the marker on drop.
#[must_use = "the marker is released as soon as the guard is dropped"]
pub struct EvalGuard<'a> {
    scope: &'a EvalScope,
}

impl Drop for EvalGuard<'_> {
    fn drop(&mut self) {
        self.scope.current.replace(None);
    }
}
