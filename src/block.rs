//! Indentation-scoped block parsing for the restricted config format.
//!
//! The config file is a small, hand-written subset of YAML: top-level
//! sections introduce indented blocks of `key: value` entries, and an entry
//! with no scalar value introduces a nested block of its own. This module
//! is the single place that tracks indentation; every section and nested
//! sub-block goes through the same two routines.
//!
//! Malformed lines (no colon, empty key) never fail the parse; they are
//! skipped and contribute nothing.

use crate::text::{indent_width, is_skippable, strip_inline_comment, unquote};

/// One parsed entry inside a block: a key plus either a scalar value or the
/// raw lines of its nested sub-block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry<'a> {
    /// Trimmed, lowercased, unquoted key.
    pub key: String,
    /// Scalar value, comment-stripped/trimmed/unquoted. `None` when the
    /// entry introduces a nested sub-block (or has nothing useful).
    pub value: Option<String>,
    /// Raw lines of the nested sub-block, empty for scalar entries.
    pub children: Vec<&'a str>,
}

/// Split a line into `(key, value)` per the entry grammar.
///
/// Key is everything up to the first colon. A missing colon or an empty key
/// means the line is malformed; the caller skips it. An empty value, or a
/// value opening a flow collection (`{`/`[`, which this subset does not
/// support), marks the entry as a sub-block introducer.
fn split_key_value(line: &str) -> Option<(String, Option<String>)> {
    let colon = line.find(':')?;
    let key = unquote(line[..colon].trim()).trim().to_lowercase();
    if key.is_empty() {
        return None;
    }
    let raw = strip_inline_comment(&line[colon + 1..]).trim();
    if raw.is_empty() || raw.starts_with('{') || raw.starts_with('[') {
        return Some((key, None));
    }
    let value = unquote(raw).to_string();
    if value.is_empty() {
        return Some((key, None));
    }
    Some((key, Some(value)))
}

/// Extract the indented block introduced by `label`.
///
/// The label line must sit at the minimum indent of `lines` (column 0 for
/// top-level sections). The first non-blank, non-comment line after it
/// establishes the block indent; the block runs until end of input or the
/// first line indented less than that. Returns an empty vec when the label
/// is absent or its block is empty.
pub(crate) fn section<'a>(lines: &[&'a str], label: &str) -> Vec<&'a str> {
    // Labels live at the minimum indent of the input, so a stray indented
    // line at the top of the file cannot hide the real sections below it.
    let base_indent = lines
        .iter()
        .filter(|line| !is_skippable(line))
        .map(|line| indent_width(line))
        .min();
    let Some(base) = base_indent else {
        return Vec::new();
    };

    let mut label_at: Option<(usize, usize)> = None;
    for (i, line) in lines.iter().enumerate() {
        if is_skippable(line) || indent_width(line) != base {
            continue;
        }
        if let Some((key, _)) = split_key_value(line)
            && key == label
        {
            label_at = Some((i, base));
            break;
        }
    }

    let Some((start, label_indent)) = label_at else {
        return Vec::new();
    };

    let mut block = Vec::new();
    let mut block_indent: Option<usize> = None;
    for line in &lines[start + 1..] {
        if is_skippable(line) {
            continue;
        }
        let indent = indent_width(line);
        match block_indent {
            None => {
                if indent <= label_indent {
                    break;
                }
                block_indent = Some(indent);
                block.push(*line);
            }
            Some(required) => {
                if indent < required {
                    break;
                }
                block.push(*line);
            }
        }
    }
    block
}

/// Parse the entries of a block previously extracted by [`section`].
///
/// Lines at the block's base indent start entries; deeper lines belong to
/// the preceding entry as its sub-block. Stray deeper lines with no owning
/// entry, and lines that fail the entry grammar, are skipped.
pub(crate) fn entries<'a>(block: &[&'a str]) -> Vec<Entry<'a>> {
    let mut out = Vec::new();
    let mut base_indent: Option<usize> = None;
    let mut i = 0;

    while i < block.len() {
        let line = block[i];
        if is_skippable(line) {
            i += 1;
            continue;
        }
        let indent = indent_width(line);
        let base = *base_indent.get_or_insert(indent);
        if indent > base {
            log::debug!("skipping stray indented line: {line:?}");
            i += 1;
            continue;
        }
        let Some((key, value)) = split_key_value(line) else {
            log::debug!("skipping malformed config line: {line:?}");
            i += 1;
            continue;
        };

        let mut children = Vec::new();
        let mut j = i + 1;
        while j < block.len() {
            let next = block[j];
            if is_skippable(next) {
                j += 1;
                continue;
            }
            if indent_width(next) <= base {
                break;
            }
            children.push(next);
            j += 1;
        }
        out.push(Entry {
            key,
            value,
            children,
        });
        i = j;
    }
    out
}

/// Scalar icon for an entry: either its flat value or the `icon` key of its
/// nested sub-block. Empty strings count as absent.
pub(crate) fn entry_icon(entry: &Entry<'_>) -> Option<String> {
    if let Some(value) = &entry.value {
        return Some(value.clone());
    }
    entries(&entry.children)
        .into_iter()
        .find(|child| child.key == "icon")
        .and_then(|child| child.value)
}
