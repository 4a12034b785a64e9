//! General-purpose string helpers.

use compact_str::{format_compact, CompactString};
use smallvec::SmallVec;

/// Split a dotted property path (`user.address.city`) into its segments.
///
/// Surrounding whitespace is trimmed from the whole path and from each
/// segment. Empty segments are kept so that `a..b` never resolves.
pub fn split_path(path: &str) -> SmallVec<[&str; 4]> {
    path.trim().split('.').map(str::trim).collect()
}

/// Check if text is empty or whitespace only
#[inline]
pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Split `input` at the first occurrence of `sep`.
///
/// Returns the whole input and `None` when the separator is absent.
#[inline]
pub fn split_once_char(input: &str, sep: char) -> (&str, Option<&str>) {
    match input.split_once(sep) {
        Some((head, tail)) => (head, Some(tail)),
        None => (input, None),
    }
}

/// Format a number the way template text displays it.
///
/// Integral values print without a fractional part, `NaN` and the
/// infinities print by name, and negative zero prints as `0`.
pub fn format_number(n: f64) -> CompactString {
    if n.is_nan() {
        return CompactString::const_new("NaN");
    }
    if n.is_infinite() {
        return if n > 0.0 {
            CompactString::const_new("Infinity")
        } else {
            CompactString::const_new("-Infinity")
        };
    }
    if n == 0.0 {
        return CompactString::const_new("0");
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return format_compact!("{}", n as i64);
    }
    format_compact!("{}", n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("name").as_slice(), &["name"]);
        assert_eq!(split_path(" a . b ").as_slice(), &["a", "b"]);
        assert_eq!(split_path("a..b").as_slice(), &["a", "", "b"]);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \n\t"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn test_split_once_char() {
        assert_eq!(split_once_char("on:click", ':'), ("on", Some("click")));
        assert_eq!(split_once_char("model", ':'), ("model", None));
        assert_eq!(split_once_char("on:", ':'), ("on", Some("")));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }
}
