//! Relief - The shared surface of Pochoir.
//!
//! Everything the reactivity engine, the template compiler and a render tree
//! host need to agree on lives here:
//!
//! - [`node`]: node handles, node kinds, attributes and events
//! - [`host`]: the [`RenderTree`] capability trait a host implements
//! - [`errors`]: error codes and the crate-wide [`Error`] / [`Result`]
//! - [`options`]: compiler options shared with the configuration layer

pub mod errors;
pub mod host;
pub mod node;
pub mod options;

pub use errors::*;
pub use host::*;
pub use node::*;
pub use options::*;
