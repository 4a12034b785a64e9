//! Per-property dependency registry.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use pochoir_relief::Result;

use crate::{Watcher, WatcherId};

/// Watchers interested in one property, in registration order.
#[derive(Default)]
pub struct Dep {
    subscribers: RefCell<Vec<Rc<Watcher>>>,
}

impl Dep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a watcher reference.
    pub fn add_subscriber(&self, watcher: Rc<Watcher>) {
        self.subscribers.borrow_mut().push(watcher);
    }

    /// Register `watcher` here and remember this registry on the watcher so
    /// it can later tear itself down.
    ///
    /// A watcher already registered here is not added a second time.
    pub fn depend(self: &Rc<Self>, watcher: &Rc<Watcher>) {
        if self.contains(watcher.id()) {
            return;
        }
        self.add_subscriber(Rc::clone(watcher));
        watcher.track(self);
    }

    /// Remove the watcher with lifecycle token `id`.
    pub fn remove_subscriber(&self, id: WatcherId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|w| w.id() != id);
        subscribers.len() != before
    }

    /// Run `update` on every registered watcher, in order.
    ///
    /// The list is snapshotted first, so watchers registered or removed while
    /// notifying take effect on the next notification. The first failing
    /// update aborts the remaining ones and its error is returned.
    pub fn notify(&self) -> Result<()> {
        let snapshot = self.subscribers.borrow().clone();
        tracing::trace!(subscribers = snapshot.len(), "notify");
        for watcher in snapshot {
            watcher.update()?;
        }
        Ok(())
    }

    pub fn contains(&self, id: WatcherId) -> bool {
        self.subscribers.borrow().iter().any(|w| w.id() == id)
    }

    /// Lifecycle tokens of the registered watchers, in order.
    pub fn subscriber_ids(&self) -> Vec<WatcherId> {
        self.subscribers.borrow().iter().map(|w| w.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.borrow().is_empty()
    }
}

impl fmt::Debug for Dep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dep")
            .field("subscribers", &self.subscriber_ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{EvalScope, Observer, ReactiveObject, Value};
    use pochoir_relief::Error;

    fn observed(entries: &[(&str, i32)]) -> (Rc<EvalScope>, Rc<ReactiveObject>) {
        let scope = EvalScope::new();
        let data = ReactiveObject::from_entries(entries.iter().copied());
        Observer::new(Rc::clone(&scope)).observe(&Value::Object(Rc::clone(&data)));
        (scope, data)
    }

    #[test]
    fn test_notify_in_registration_order() {
        let (scope, data) = observed(&[("a", 1)]);
        let log = Rc::new(RefCell::new(Vec::new()));

        for name in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            Watcher::new("a", &data, &scope, move |_| {
                log.borrow_mut().push(name);
                Ok(())
            });
        }

        data.set("a", 2).unwrap();
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_failing_update_aborts_remaining() {
        let (scope, data) = observed(&[("a", 1)]);
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&log);
        Watcher::new("a", &data, &scope, move |_| {
            first.borrow_mut().push("first");
            Err(Error::handler("render failed"))
        });
        let second = Rc::clone(&log);
        Watcher::new("a", &data, &scope, move |_| {
            second.borrow_mut().push("second");
            Ok(())
        });

        let err = data.set("a", 2).unwrap_err();
        assert_eq!(err.to_string(), "handler failed: render failed");
        assert_eq!(*log.borrow(), vec!["first"]);
        // The value itself was still written before notification.
        assert!(data.peek("a").strict_eq(&Value::from(2)));
    }

    #[test]
    fn test_remove_subscriber_by_token() {
        let (scope, data) = observed(&[("a", 1)]);
        let w1 = Watcher::new("a", &data, &scope, |_| Ok(()));
        let w2 = Watcher::new("a", &data, &scope, |_| Ok(()));
        let dep = data.dep("a").unwrap();

        assert_eq!(dep.subscriber_ids(), vec![w1.id(), w2.id()]);
        assert!(dep.remove_subscriber(w1.id()));
        assert!(!dep.remove_subscriber(w1.id()));
        assert_eq!(dep.subscriber_ids(), vec![w2.id()]);
    }

    #[test]
    fn test_depend_does_not_duplicate() {
        let (scope, data) = observed(&[("a", 1)]);
        let watcher = Watcher::new("a", &data, &scope, |_| Ok(()));
        let dep = data.dep("a").unwrap();
        dep.depend(&watcher);
        assert_eq!(dep.len(), 1);
    }
}
