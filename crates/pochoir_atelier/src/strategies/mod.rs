//! Binding strategies.
//!
//! A directive `v-<name>` is dispatched to the strategy registered under
//! `<name>` in [`STRATEGIES`]. The table is fixed: `text`, `model` and `on`.

use pochoir_relief::{NodeId, Result};

use crate::Compiler;

pub mod model;
pub mod on;
pub mod text;

/// One place in the template where a strategy applies.
#[derive(Debug, Clone, Copy)]
pub struct BindingSite<'a> {
    pub node: NodeId,
    /// Attribute value, or the raw text for interpolation
    pub value: &'a str,
    /// Event argument of `v-<name>:<event>` / `@<event>`
    pub event: Option<&'a str>,
    /// Raw source, for diagnostics
    pub source: &'a str,
}

pub type Strategy = fn(&mut Compiler, BindingSite<'_>) -> Result<()>;

pub static STRATEGIES: phf::Map<&'static str, Strategy> = phf::phf_map! {
    "text" => text::bind_text as Strategy,
    "model" => model::bind_model as Strategy,
    "on" => on::bind_on as Strategy,
};

/// Look up a strategy by directive name.
#[inline]
pub fn lookup(name: &str) -> Option<Strategy> {
    STRATEGIES.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert!(lookup("text").is_some());
        assert!(lookup("model").is_some());
        assert!(lookup("on").is_some());
        assert!(lookup("show").is_none());
        assert!(lookup("").is_none());
    }
}
