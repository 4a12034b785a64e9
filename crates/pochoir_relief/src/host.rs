//! Render tree host capabilities.
//!
//! The runtime never owns nodes. It drives whatever tree the host provides
//! through [`RenderTree`], addressing nodes by [`NodeId`]. Methods take
//! `&self`: hosts use interior mutability, and must release any internal
//! borrow before invoking a [`Listener`] so that the listener can write
//! back into the tree.

use std::rc::Rc;

use pochoir_carton::String;

use crate::{Attribute, Event, HostError, NodeId, NodeKind, Result};

/// Event listener attached through [`RenderTree::add_event_listener`].
pub type Listener = Rc<dyn Fn(&Event) -> Result<()>>;

/// Capabilities the runtime consumes from a render tree.
pub trait RenderTree {
    /// Resolve a lookup expression (e.g. `#app`) to a node.
    fn query_selector(&self, selector: &str) -> Option<NodeId>;

    fn node_kind(&self, node: NodeId) -> Result<NodeKind, HostError>;

    /// Snapshot of the node's children, in order.
    fn child_nodes(&self, node: NodeId) -> Result<Vec<NodeId>, HostError>;

    fn first_child(&self, node: NodeId) -> Result<Option<NodeId>, HostError>;

    /// Move `child` to the end of `parent`'s children.
    ///
    /// Appending a fragment moves the fragment's children instead and
    /// leaves the fragment empty.
    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), HostError>;

    /// Create a detached, empty fragment.
    fn create_fragment(&self) -> NodeId;

    /// Attributes of an element in source order; empty for other nodes.
    fn attributes(&self, node: NodeId) -> Result<Vec<Attribute>, HostError>;

    fn text_content(&self, node: NodeId) -> Result<String, HostError>;

    fn set_text_content(&self, node: NodeId, text: &str) -> Result<(), HostError>;

    /// Read a live node property such as an input's `value`.
    fn property(&self, node: NodeId, name: &str) -> Result<Option<String>, HostError>;

    fn set_property(&self, node: NodeId, name: &str, value: &str) -> Result<(), HostError>;

    fn add_event_listener(
        &self,
        node: NodeId,
        event: &str,
        listener: Listener,
    ) -> Result<(), HostError>;
}
