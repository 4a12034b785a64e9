//! Compiler options.

use pochoir_carton::String;
use serde::{Deserialize, Serialize};

/// Template compiler options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Interpolation delimiters (default: `["{{", "}}"]`)
    pub delimiters: (String, String),
}

impl CompilerOptions {
    /// Whether the default `{{ }}` delimiters are in use
    pub fn has_default_delimiters(&self) -> bool {
        self.delimiters.0 == "{{" && self.delimiters.1 == "}}"
    }
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            delimiters: (String::const_new("{{"), String::const_new("}}")),
        }
    }
}
