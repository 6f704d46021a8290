//! Line-level text helpers for the tab icon config format.
//!
//! These are deliberately forgiving: the config file is hand-written and a
//! bad line should contribute nothing rather than fail the load.

/// Width of a line's leading whitespace in columns (tabs count as one).
pub(crate) fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// True for lines the parser skips entirely: blank lines and lines whose
/// first non-space character is the comment marker.
pub(crate) fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Strip a trailing inline comment (a space followed by `#`) from a value.
///
/// A `#` with no preceding space is kept, so color values like
/// `ring_color: x#20` survive. Stripping runs before quote removal, so a
/// value cannot contain a literal ` #` even when quoted.
pub(crate) fn strip_inline_comment(value: &str) -> &str {
    match value.find(" #") {
        Some(pos) => &value[..pos],
        None => value,
    }
}

/// Remove one layer of matching single or double quotes, if present.
pub(crate) fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Lenient boolean parsing: `true/yes/on/1` and `false/no/off/0`,
/// case-insensitive. Anything else is not a boolean.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// True when a key should be routed to the pattern list rather than the
/// exact map.
pub(crate) fn is_wildcard(key: &str) -> bool {
    key.contains(['*', '?', '['])
}
