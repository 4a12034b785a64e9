//! Error types shared across Pochoir.
//!
//! Binding faults are reported as [`CompilerError`]s carrying an
//! [`ErrorCode`], the offending node and the raw attribute source. Render
//! tree failures are [`HostError`]s. Both fold into [`Error`], which is what
//! every fallible operation in the workspace returns.

use std::fmt;

use pochoir_carton::String;
use serde::{Deserialize, Serialize};

use crate::NodeId;

/// Compiler error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ErrorCode {
    /// The mount target selector matched nothing
    ContainerNotFound = 0,
    /// `v-<name>` names a strategy that does not exist
    UnknownDirective = 1,
    /// An event binding names a method absent from the methods table
    UnknownMethod = 2,
    /// `v-on` used without an `:event` argument
    MissingEventName = 3,
}

impl ErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            Self::ContainerNotFound => "Mount target not found.",
            Self::UnknownDirective => "Unknown directive.",
            Self::UnknownMethod => "Event handler is not declared in methods.",
            Self::MissingEventName => "Event directive is missing an event name.",
        }
    }
}

/// A binding fault detected while compiling a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerError {
    pub code: ErrorCode,
    /// Offending node, when one exists
    pub node: Option<NodeId>,
    /// Raw source of the offending directive or selector
    pub source: String,
}

impl CompilerError {
    pub fn new(code: ErrorCode, node: Option<NodeId>, source: impl Into<String>) -> Self {
        Self {
            code,
            node,
            source: source.into(),
        }
    }
}

impl fmt::Display for CompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.code.message(), self.source)?;
        if let Some(node) = self.node {
            write!(f, " on node {}", node)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompilerError {}

/// Render tree failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
    #[error("node {0} cannot have children")]
    NotAParent(NodeId),
    #[error("cannot append node {child} into its own subtree {parent}")]
    HierarchyCycle { parent: NodeId, child: NodeId },
}

/// Error returned by every fallible Pochoir operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Compiler(#[from] CompilerError),
    #[error(transparent)]
    Host(#[from] HostError),
    /// Failure raised by a user event handler or update callback
    #[error("handler failed: {0}")]
    Handler(Box<dyn std::error::Error>),
}

impl Error {
    /// Wrap an arbitrary handler failure.
    pub fn handler(err: impl Into<Box<dyn std::error::Error>>) -> Self {
        Self::Handler(err.into())
    }

    /// Error code of a binding fault, if this is one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Compiler(err) => Some(err.code),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
