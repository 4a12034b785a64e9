//! Configuration file loading for pochoir.
//!
//! Reads `pochoir.config.json` from a project directory.

use std::path::Path;

use pochoir_relief::CompilerOptions;
use serde::{Deserialize, Serialize};

/// File name looked up by [`load_config`].
pub const CONFIG_FILE: &str = "pochoir.config.json";

/// Top-level pochoir configuration.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct PochoirConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Template compiler configuration.
    #[serde(default)]
    pub compiler: CompilerConfig,
}

/// Configuration for the template compiler.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct CompilerConfig {
    /// Interpolation delimiters as `[open, close]`. Defaults to `["{{", "}}"]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiters: Option<(String, String)>,
}

impl CompilerConfig {
    pub fn to_options(&self) -> CompilerOptions {
        match &self.delimiters {
            Some((open, close)) if !open.is_empty() && !close.is_empty() => CompilerOptions {
                delimiters: (open.as_str().into(), close.as_str().into()),
            },
            Some(_) => {
                tracing::warn!("empty interpolation delimiter ignored");
                CompilerOptions::default()
            }
            None => CompilerOptions::default(),
        }
    }
}

/// Load `pochoir.config.json` from the given directory (or CWD if None).
///
/// A missing file yields the defaults. An unreadable or malformed file is
/// reported with a warning and also yields the defaults.
pub fn load_config(dir: Option<&Path>) -> PochoirConfig {
    let base = dir
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let config_path = base.join(CONFIG_FILE);

    if !config_path.exists() {
        return PochoirConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "failed to parse config");
                PochoirConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!(path = %config_path.display(), error = %e, "failed to read config");
            PochoirConfig::default()
        }
    }
}

/// JSON Schema for `pochoir.config.json`.
pub const POCHOIR_CONFIG_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Pochoir Configuration",
  "description": "Configuration file for pochoir - reactive template bindings",
  "type": "object",
  "properties": {
    "$schema": {
      "type": "string",
      "description": "JSON Schema reference for editor autocompletion"
    },
    "compiler": {
      "type": "object",
      "description": "Template compiler configuration",
      "properties": {
        "delimiters": {
          "type": "array",
          "description": "Interpolation delimiters as [open, close].",
          "items": { "type": "string", "minLength": 1 },
          "minItems": 2,
          "maxItems": 2,
          "examples": [["{{", "}}"], ["[[", "]]"]]
        }
      },
      "additionalProperties": false
    }
  },
  "additionalProperties": false
}"#;
