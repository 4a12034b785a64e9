//! Atelier - The template compiler workshop for Pochoir.
//!
//! Walks a mounted template once and turns its directives into live
//! bindings:
//!
//! - `{{ path }}` text interpolation (`text` strategy)
//! - `v-model="path"` two-way input binding (`model` strategy)
//! - `v-on:<event>="method"` / `@<event>="method"` event binding (`on` strategy)
//!
//! `v-<name>` dispatches to the strategy called `<name>`; see
//! [`strategies`] for the fixed table.

pub mod compiler;
pub mod context;
pub mod directive;
pub mod interpolation;
pub mod strategies;

pub use compiler::{Compiler, El};
pub use context::{BindingContext, Method, Methods};
pub use directive::{classify, AttrKind};
pub use interpolation::Interpolation;
