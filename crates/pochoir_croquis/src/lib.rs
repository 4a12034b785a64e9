//! # pochoir_croquis
//!
//! Croquis - The reactivity layer for Pochoir.
//!
//! ## Name Origin
//!
//! **Croquis** is a quick sketch that captures only the essential lines of a
//! subject. This crate sketches, as a side effect of evaluation, exactly which
//! data properties each template binding touched, and redraws only those
//! bindings when one of the properties changes.
//!
//! ## Architecture
//!
//! ```text
//!   Observer ── installs ──▶ ReactiveObject property ── owns ──▶ Dep
//!                                   ▲   │ get                    │ notify
//!                                   │   ▼                        ▼
//!   Watcher ── evaluates path ──────┘  EvalScope (marker)     Watcher::update
//! ```
//!
//! - [`Value`] / [`ReactiveObject`]: the observed data tree
//! - [`Observer`]: `observe` / `define_reactive`
//! - [`Dep`]: per-property subscriber registry
//! - [`Watcher`]: one live binding with its last observed value
//! - [`EvalScope`]: the current-evaluation marker shared by one data tree
//!
//! Everything is single-threaded and synchronous: a write returns only after
//! every dependent watcher has run.

mod dep;
mod object;
mod observer;
mod path;
mod scope;
mod value;
mod watcher;

pub use dep::Dep;
pub use object::{ObjectRef, ReactiveObject};
pub use observer::{observe_json, Observer};
pub use path::{get_value, set_value};
pub use scope::{EvalGuard, EvalScope};
pub use value::Value;
pub use watcher::{Watcher, WatcherId};
