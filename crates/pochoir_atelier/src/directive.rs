//! Attribute classification.

use pochoir_carton::split_once_char;

/// What an attribute name means to the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind<'a> {
    /// `v-<name>` or `v-<name>:<arg>`
    Directive { name: &'a str, arg: Option<&'a str> },
    /// `@<event>` shorthand for `v-on:<event>`
    Event { event: &'a str },
    /// Anything else; left untouched
    Plain,
}

/// Classify an attribute by name.
pub fn classify(name: &str) -> AttrKind<'_> {
    if let Some(rest) = name.strip_prefix("v-") {
        let (name, arg) = split_once_char(rest, ':');
        return AttrKind::Directive { name, arg };
    }
    if let Some(event) = name.strip_prefix('@') {
        return AttrKind::Event { event };
    }
    AttrKind::Plain
}
