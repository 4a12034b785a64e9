//! Text interpolation pattern.
//!
//! A text node is interpolated when it contains `<open>…<close>`. The match
//! is greedy and only one expression is supported per node: everything
//! between the first open delimiter and the last close delimiter is the
//! expression, and literal text around the delimiters is not rendered.

use once_cell::sync::Lazy;
use regex::Regex;

use pochoir_carton::is_blank;
use pochoir_relief::CompilerOptions;

static DEFAULT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(.+)\}\}").expect("default interpolation pattern"));

/// Compiled interpolation delimiters.
#[derive(Debug, Clone)]
pub struct Interpolation {
    open: pochoir_carton::String,
    pattern: Regex,
}

impl Interpolation {
    /// Compile the delimiters of `options`.
    ///
    /// A blank delimiter would match every text node, so it falls back to
    /// the default `{{ }}` pair with a warning.
    pub fn new(options: &CompilerOptions) -> Self {
        let (open, close) = &options.delimiters;
        if is_blank(open) || is_blank(close) {
            tracing::warn!(open = %open, close = %close, "blank interpolation delimiter ignored");
            return Self::default();
        }
        let pattern = if options.has_default_delimiters() {
            DEFAULT_PATTERN.clone()
        } else {
            let source = format!("{}(.+){}", regex::escape(open), regex::escape(close));
            // Both delimiters are escaped, so the pattern is always valid.
            Regex::new(&source).unwrap_or_else(|_| DEFAULT_PATTERN.clone())
        };
        Self {
            open: open.clone(),
            pattern,
        }
    }

    /// Whether `text` contains the open delimiter at all.
    pub fn has_open_delimiter(&self, text: &str) -> bool {
        text.contains(self.open.as_str())
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// The trimmed expression captured from `text`, if it matches.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
    }
}

impl Default for Interpolation {
    fn default() -> Self {
        Self::new(&CompilerOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_single_expression() {
        let interp = Interpolation::default();
        assert_eq!(interp.capture("{{ name }}"), Some("name"));
        assert_eq!(interp.capture("Hello {{ name }}!"), Some("name"));
        assert_eq!(interp.capture("{{user.name}}"), Some("user.name"));
        assert_eq!(interp.capture("no braces"), None);
        assert_eq!(interp.capture("{{}}"), None);
    }

    #[test]
    fn test_capture_is_greedy() {
        let interp = Interpolation::default();
        assert_eq!(interp.capture("{{ a }} and {{ b }}"), Some("a }} and {{ b"));
    }

    #[test]
    fn test_does_not_span_lines() {
        let interp = Interpolation::default();
        assert!(!interp.is_match("{{\nname\n}}"));
        assert!(interp.has_open_delimiter("{{\nname\n}}"));
    }

    #[test]
    fn test_blank_delimiters_fall_back_to_default() {
        for delimiters in [("", ""), ("", "]]"), ("[[", " ")] {
            let options = CompilerOptions {
                delimiters: (delimiters.0.into(), delimiters.1.into()),
            };
            let interp = Interpolation::new(&options);
            assert!(!interp.is_match("Hello"));
            assert!(!interp.has_open_delimiter("Hello"));
            assert_eq!(interp.capture("{{ name }}"), Some("name"));
        }
    }

    #[test]
    fn test_custom_delimiters() {
        let options = CompilerOptions {
            delimiters: ("[[".into(), "]]".into()),
        };
        let interp = Interpolation::new(&options);
        assert_eq!(interp.capture("[[ count ]]"), Some("count"));
        assert_eq!(interp.capture("{{ count }}"), None);
        assert!(!interp.has_open_delimiter("{{ count }}"));
    }
}
