//! Arena-backed document.

use std::cell::RefCell;
use std::rc::Rc;

use pochoir_carton::{FxHashMap, String};
use pochoir_relief::{
    Attribute, Event, HostError, Listener, NodeId, NodeKind, RenderTree, Result,
};

use crate::parse::{parse_into, ParseError};

pub(crate) struct NodeData {
    kind: NodeKind,
    pub(crate) tag: String,
    pub(crate) attrs: Vec<Attribute>,
    /// Character data of text and comment nodes
    pub(crate) text: String,
    props: FxHashMap<String, String>,
    parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    listeners: Vec<(String, Listener)>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            tag: String::default(),
            attrs: Vec::new(),
            text: String::default(),
            props: FxHashMap::default(),
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn kind(&self) -> NodeKind {
        self.kind
    }
}

/// An in-memory render tree.
///
/// Nodes are never freed; detached nodes simply have no parent. The
/// document body is a `<body>` element created with the document.
pub struct Document {
    pub(crate) nodes: RefCell<Vec<NodeData>>,
    body: NodeId,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::empty())
    }

    /// Create a document whose body holds the parsed `markup`.
    pub fn parse(markup: &str) -> Result<Rc<Self>, ParseError> {
        let doc = Self::empty();
        parse_into(&doc, doc.body, markup)?;
        Ok(Rc::new(doc))
    }

    fn empty() -> Self {
        let mut body = NodeData::new(NodeKind::Element);
        body.tag = String::const_new("body");
        Self {
            nodes: RefCell::new(vec![body]),
            body: NodeId::new(0),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn create_element(&self, tag: &str) -> NodeId {
        let mut data = NodeData::new(NodeKind::Element);
        data.tag = String::from(tag.to_ascii_lowercase());
        self.alloc(data)
    }

    pub fn create_text(&self, text: &str) -> NodeId {
        let mut data = NodeData::new(NodeKind::Text);
        data.text = String::from(text);
        self.alloc(data)
    }

    pub fn create_comment(&self, text: &str) -> NodeId {
        let mut data = NodeData::new(NodeKind::Comment);
        data.text = String::from(text);
        self.alloc(data)
    }

    /// Set (or replace) an attribute, keeping its original position.
    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<(), HostError> {
        self.with_node_mut(node, |data| {
            match data.attrs.iter_mut().find(|attr| attr.name == name) {
                Some(attr) => attr.value = String::from(value),
                None => data.attrs.push(Attribute::new(name, value)),
            }
        })
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let nodes = self.nodes.borrow();
        let data = nodes.get(node.index())?;
        data.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.clone())
    }

    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        let nodes = self.nodes.borrow();
        let data = nodes.get(node.index())?;
        data.kind().is_element().then(|| data.tag.clone())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow().get(node.index())?.parent
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find(self.body, &|data| {
            data.attrs.iter().any(|attr| attr.name == "id" && attr.value == id)
        })
    }

    /// Number of listeners attached to `node` for `event`.
    pub fn listener_count(&self, node: NodeId, event: &str) -> usize {
        let nodes = self.nodes.borrow();
        nodes.get(node.index()).map_or(0, |data| {
            data.listeners
                .iter()
                .filter(|(name, _)| name.as_str() == event)
                .count()
        })
    }

    /// Invoke every `event` listener on `node`, in attachment order.
    ///
    /// The first listener error stops dispatch and is returned.
    pub fn dispatch_event(&self, node: NodeId, event: &str) -> Result<()> {
        let listeners: Vec<Listener> = {
            let nodes = self.nodes.borrow();
            let data = nodes.get(node.index()).ok_or(HostError::UnknownNode(node))?;
            data.listeners
                .iter()
                .filter(|(name, _)| name.as_str() == event)
                .map(|(_, listener)| Rc::clone(listener))
                .collect()
        };
        tracing::trace!(%node, event, listeners = listeners.len(), "dispatch");
        let payload = Event::new(event, node);
        for listener in listeners {
            listener(&payload)?;
        }
        Ok(())
    }

    /// Simulate a user typing `value` into an input-like node.
    pub fn input(&self, node: NodeId, value: &str) -> Result<()> {
        self.set_property(node, "value", value)?;
        self.dispatch_event(node, "input")
    }

    /// Markup of the node's children.
    pub fn inner_html(&self, node: NodeId) -> std::string::String {
        let mut out = std::string::String::new();
        let nodes = self.nodes.borrow();
        if let Some(data) = nodes.get(node.index()) {
            for child in &data.children {
                crate::serialize::write_node(&nodes, *child, &mut out);
            }
        }
        out
    }

    /// Markup of the node itself.
    pub fn outer_html(&self, node: NodeId) -> std::string::String {
        let mut out = std::string::String::new();
        crate::serialize::write_node(&self.nodes.borrow(), node, &mut out);
        out
    }

    pub(crate) fn alloc(&self, data: NodeData) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId::new(nodes.len() as u32);
        nodes.push(data);
        id
    }

    fn with_node_mut<T>(
        &self,
        node: NodeId,
        f: impl FnOnce(&mut NodeData) -> T,
    ) -> Result<T, HostError> {
        let mut nodes = self.nodes.borrow_mut();
        let data = nodes
            .get_mut(node.index())
            .ok_or(HostError::UnknownNode(node))?;
        Ok(f(data))
    }

    fn with_node<T>(&self, node: NodeId, f: impl FnOnce(&NodeData) -> T) -> Result<T, HostError> {
        let nodes = self.nodes.borrow();
        let data = nodes.get(node.index()).ok_or(HostError::UnknownNode(node))?;
        Ok(f(data))
    }

    /// Depth-first, pre-order search below `root` (excluding `root`).
    fn find(&self, root: NodeId, pred: &dyn Fn(&NodeData) -> bool) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        let mut stack: Vec<NodeId> = nodes
            .get(root.index())?
            .children
            .iter()
            .rev()
            .copied()
            .collect();
        while let Some(id) = stack.pop() {
            let data = &nodes[id.index()];
            if data.kind().is_element() && pred(data) {
                return Some(id);
            }
            stack.extend(data.children.iter().rev().copied());
        }
        None
    }

    fn is_inclusive_ancestor(nodes: &[NodeData], ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match nodes[node.index()].parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn detach(nodes: &mut [NodeData], child: NodeId) {
        if let Some(parent) = nodes[child.index()].parent.take() {
            nodes[parent.index()].children.retain(|c| *c != child);
        }
    }

    fn collect_text(nodes: &[NodeData], node: NodeId, out: &mut std::string::String) {
        let data = &nodes[node.index()];
        match data.kind() {
            NodeKind::Text => out.push_str(&data.text),
            NodeKind::Comment => {}
            NodeKind::Element | NodeKind::Fragment => {
                for child in &data.children {
                    Self::collect_text(nodes, *child, out);
                }
            }
        }
    }
}

impl RenderTree for Document {
    /// Supports `#id`, `.class` and tag selectors.
    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            return self.get_element_by_id(id);
        }
        if let Some(class) = selector.strip_prefix('.') {
            return self.find(self.body, &|data| {
                data.attrs.iter().any(|attr| {
                    attr.name == "class" && attr.value.split_whitespace().any(|c| c == class)
                })
            });
        }
        let tag = selector.to_ascii_lowercase();
        self.find(self.body, &|data| data.tag == tag)
    }

    fn node_kind(&self, node: NodeId) -> Result<NodeKind, HostError> {
        self.with_node(node, NodeData::kind)
    }

    fn child_nodes(&self, node: NodeId) -> Result<Vec<NodeId>, HostError> {
        self.with_node(node, |data| data.children.clone())
    }

    fn first_child(&self, node: NodeId) -> Result<Option<NodeId>, HostError> {
        self.with_node(node, |data| data.children.first().copied())
    }

    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), HostError> {
        let mut nodes = self.nodes.borrow_mut();
        let parent_kind = nodes
            .get(parent.index())
            .ok_or(HostError::UnknownNode(parent))?
            .kind();
        let child_kind = nodes
            .get(child.index())
            .ok_or(HostError::UnknownNode(child))?
            .kind();
        if matches!(parent_kind, NodeKind::Text | NodeKind::Comment) {
            return Err(HostError::NotAParent(parent));
        }
        if Self::is_inclusive_ancestor(&nodes, child, parent) {
            return Err(HostError::HierarchyCycle { parent, child });
        }

        let moved = if child_kind == NodeKind::Fragment {
            std::mem::take(&mut nodes[child.index()].children)
        } else {
            Self::detach(&mut nodes, child);
            vec![child]
        };
        for node in moved {
            nodes[node.index()].parent = Some(parent);
            nodes[parent.index()].children.push(node);
        }
        Ok(())
    }

    fn create_fragment(&self) -> NodeId {
        self.alloc(NodeData::new(NodeKind::Fragment))
    }

    fn attributes(&self, node: NodeId) -> Result<Vec<Attribute>, HostError> {
        self.with_node(node, |data| data.attrs.clone())
    }

    fn text_content(&self, node: NodeId) -> Result<String, HostError> {
        let nodes = self.nodes.borrow();
        let data = nodes.get(node.index()).ok_or(HostError::UnknownNode(node))?;
        if data.kind() == NodeKind::Comment {
            return Ok(data.text.clone());
        }
        let mut out = std::string::String::new();
        Self::collect_text(&nodes, node, &mut out);
        Ok(String::from(out))
    }

    fn set_text_content(&self, node: NodeId, text: &str) -> Result<(), HostError> {
        let kind = self.node_kind(node)?;
        match kind {
            NodeKind::Text | NodeKind::Comment => {
                self.with_node_mut(node, |data| data.text = String::from(text))
            }
            NodeKind::Element | NodeKind::Fragment => {
                let replacement = (!text.is_empty()).then(|| self.create_text(text));
                let mut nodes = self.nodes.borrow_mut();
                for child in std::mem::take(&mut nodes[node.index()].children) {
                    nodes[child.index()].parent = None;
                }
                if let Some(text_node) = replacement {
                    nodes[text_node.index()].parent = Some(node);
                    nodes[node.index()].children.push(text_node);
                }
                Ok(())
            }
        }
    }

    /// Live properties fall back to the attribute of the same name.
    fn property(&self, node: NodeId, name: &str) -> Result<Option<String>, HostError> {
        self.with_node(node, |data| {
            data.props.get(name).cloned().or_else(|| {
                data.attrs
                    .iter()
                    .find(|attr| attr.name == name)
                    .map(|attr| attr.value.clone())
            })
        })
    }

    fn set_property(&self, node: NodeId, name: &str, value: &str) -> Result<(), HostError> {
        self.with_node_mut(node, |data| {
            data.props.insert(String::from(name), String::from(value));
        })
    }

    fn add_event_listener(
        &self,
        node: NodeId,
        event: &str,
        listener: Listener,
    ) -> Result<(), HostError> {
        self.with_node_mut(node, |data| data.listeners.push((String::from(event), listener)))
    }
}
