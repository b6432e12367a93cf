use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Separator Polaris uses between namespace levels in URL paths.
pub const NAMESPACE_SEPARATOR: char = '\u{1f}';

/// Percent-encoded form of [`NAMESPACE_SEPARATOR`], as users copy it from URLs
const ENCODED_SEPARATOR: &str = "%1F";

/// Parse a namespace argument into its levels.
///
/// The unit separator wins over `/`, which wins over `.`, so
/// `"a.b\x1fc"` is two levels and `"a.b/c"` is `["a.b", "c"]`.
pub fn parse_namespace(input: &str) -> Result<Vec<String>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("namespace is required"));
    }

    let split = |s: &str, sep: char| -> Vec<String> { s.split(sep).map(str::to_string).collect() };

    if trimmed.contains(NAMESPACE_SEPARATOR) {
        return Ok(split(trimmed, NAMESPACE_SEPARATOR));
    }
    if trimmed.contains(ENCODED_SEPARATOR) {
        let decoded = trimmed.replace(ENCODED_SEPARATOR, &NAMESPACE_SEPARATOR.to_string());
        return Ok(split(&decoded, NAMESPACE_SEPARATOR));
    }
    if trimmed.contains('/') {
        return Ok(split(trimmed, '/'));
    }
    Ok(split(trimmed, '.'))
}

/// Namespace levels joined for use as a single URL path segment.
pub fn namespace_path(parts: &[String]) -> String {
    parts.join(&NAMESPACE_SEPARATOR.to_string())
}

/// Namespace levels joined for display.
pub fn format_namespace(parts: &[String]) -> String {
    parts.join(".")
}

/// Parse repeated `key=value` arguments. Values may contain `=`.
pub fn parse_properties(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut props = BTreeMap::new();
    for pair in pairs {
        match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                props.insert(key.trim().to_string(), value.to_string());
            }
            _ => {
                return Err(Error::validation(format!(
                    "invalid property \"{}\" (expected key=value)",
                    pair
                )))
            }
        }
    }
    Ok(props)
}

/// Shorten a token for display, or `None` when it is too short to show
/// any of it safely.
pub fn mask_token(token: &str) -> Option<String> {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 20 {
        return None;
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 5..].iter().collect();
    Some(format!("{}...{}", head, tail))
}
