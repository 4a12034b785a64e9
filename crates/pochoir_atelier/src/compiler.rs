//! Template compiler.
//!
//! Compilation is a single pass over the mount target:
//!
//! 1. resolve the container ([`El`]);
//! 2. move its children into a detached fragment;
//! 3. walk the fragment, dispatching every directive and interpolation to
//!    its binding strategy;
//! 4. move the fragment's children back into the container.
//!
//! The first binding fault aborts the pass. The container is then left
//! empty: the partially bound fragment is never reattached.

use std::rc::Rc;

use pochoir_carton::{is_blank, String};
use pochoir_croquis::Watcher;
use pochoir_relief::{
    Attribute, CompilerError, CompilerOptions, ErrorCode, NodeId, NodeKind, Result,
};

use crate::strategies::{self, BindingSite};
use crate::{classify, AttrKind, BindingContext, Interpolation};

/// Mount target: a node handle or a lookup expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum El {
    Node(NodeId),
    Selector(String),
}

impl From<NodeId> for El {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl From<&str> for El {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.into())
    }
}

impl From<std::string::String> for El {
    fn from(selector: std::string::String) -> Self {
        Self::Selector(selector.into())
    }
}

/// A compiled template.
#[derive(Debug)]
pub struct Compiler {
    ctx: BindingContext,
    interpolation: Interpolation,
    watchers: Vec<Rc<Watcher>>,
    root: NodeId,
}

impl Compiler {
    /// Compile `el` against `ctx` with the default delimiters.
    pub fn new(el: impl Into<El>, ctx: BindingContext) -> Result<Self> {
        Self::with_options(el, ctx, &CompilerOptions::default())
    }

    pub fn with_options(
        el: impl Into<El>,
        ctx: BindingContext,
        options: &CompilerOptions,
    ) -> Result<Self> {
        let root = resolve(&ctx, el.into())?;
        let mut compiler = Self {
            ctx,
            interpolation: Interpolation::new(options),
            watchers: Vec::new(),
            root,
        };

        let host = Rc::clone(&compiler.ctx.host);
        let fragment = host.create_fragment();
        while let Some(child) = host.first_child(root)? {
            host.append_child(fragment, child)?;
        }

        compiler.compile_children(fragment)?;
        host.append_child(root, fragment)?;

        tracing::debug!(
            %root,
            watchers = compiler.watchers.len(),
            "compiled"
        );
        Ok(compiler)
    }

    /// Watchers created by the bindings, in creation order.
    pub fn watchers(&self) -> &[Rc<Watcher>] {
        &self.watchers
    }

    /// The resolved container.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn context(&self) -> &BindingContext {
        &self.ctx
    }

    pub fn interpolation(&self) -> &Interpolation {
        &self.interpolation
    }

    pub(crate) fn push_watcher(&mut self, watcher: Rc<Watcher>) {
        self.watchers.push(watcher);
    }

    fn compile_children(&mut self, parent: NodeId) -> Result<()> {
        // Bindings may rewrite text (and so replace children), walk a snapshot.
        let children = self.ctx.host.child_nodes(parent)?;
        for child in children {
            match self.ctx.host.node_kind(child)? {
                NodeKind::Element => self.compile_element(child)?,
                NodeKind::Text => self.compile_text(child)?,
                _ => {}
            }
            if !self.ctx.host.child_nodes(child)?.is_empty() {
                self.compile_children(child)?;
            }
        }
        Ok(())
    }

    fn compile_element(&mut self, node: NodeId) -> Result<()> {
        for attr in self.ctx.host.attributes(node)? {
            self.compile_attribute(node, &attr)?;
        }
        Ok(())
    }

    fn compile_attribute(&mut self, node: NodeId, attr: &Attribute) -> Result<()> {
        let source = attr.to_string();
        match classify(&attr.name) {
            AttrKind::Directive { name, arg } => {
                let Some(strategy) = strategies::lookup(name) else {
                    return Err(
                        CompilerError::new(ErrorCode::UnknownDirective, Some(node), source).into(),
                    );
                };
                strategy(
                    self,
                    BindingSite {
                        node,
                        value: &attr.value,
                        event: arg,
                        source: &source,
                    },
                )
            }
            AttrKind::Event { event } => strategies::on::bind_on(
                self,
                BindingSite {
                    node,
                    value: &attr.value,
                    event: Some(event),
                    source: &source,
                },
            ),
            AttrKind::Plain => Ok(()),
        }
    }

    fn compile_text(&mut self, node: NodeId) -> Result<()> {
        let text = self.ctx.host.text_content(node)?;
        if is_blank(&text) || !self.interpolation.is_match(&text) {
            return Ok(());
        }
        strategies::text::bind_text(
            self,
            BindingSite {
                node,
                value: &text,
                event: None,
                source: &text,
            },
        )
    }
}

fn resolve(ctx: &BindingContext, el: El) -> Result<NodeId> {
    match el {
        El::Node(node) => {
            // Surface an unknown handle as a host error up front.
            ctx.host.node_kind(node)?;
            Ok(node)
        }
        El::Selector(selector) => ctx.host.query_selector(&selector).ok_or_else(|| {
            CompilerError::new(ErrorCode::ContainerNotFound, None, selector).into()
        }),
    }
}
