//! Shell-style wildcard matching for host and title patterns.
//!
//! Patterns use glob semantics: `*` matches any run of characters
//! (including none), `?` matches exactly one character, and
//! `[...]`/`[!...]` character classes pass through. Matching is always
//! case-insensitive; host patterns must match the whole candidate while
//! title patterns match anywhere in it.
//!
//! Compiled matchers are memoized so per-render lookups against a stable
//! pattern set never recompile. The cache is cleared wholesale once it
//! exceeds a small bound; redundant recompilation after a reset is harmless.

use parking_lot::Mutex;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Cache reset bound. Tuning constant, not a contract.
const PATTERN_CACHE_BOUND: usize = 256;

/// `None` marks a pattern that failed to compile and never matches.
type PatternCache = HashMap<(String, bool), Option<Regex>>;

static PATTERN_CACHE: OnceLock<Mutex<PatternCache>> = OnceLock::new();

fn cache() -> &'static Mutex<PatternCache> {
    PATTERN_CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Whole-string, case-insensitive wildcard match (host patterns).
pub(crate) fn host_matches(pattern: &str, candidate: &str) -> bool {
    matches(pattern, candidate, true)
}

/// Unanchored, case-insensitive wildcard match (title patterns).
pub(crate) fn title_matches(pattern: &str, candidate: &str) -> bool {
    matches(pattern, candidate, false)
}

fn matches(pattern: &str, candidate: &str, anchored: bool) -> bool {
    let mut cache = cache().lock();
    if cache.len() > PATTERN_CACHE_BOUND {
        log::debug!("resetting wildcard pattern cache ({} entries)", cache.len());
        cache.clear();
    }
    let compiled = cache
        .entry((pattern.to_string(), anchored))
        .or_insert_with(|| compile(pattern, anchored));
    match compiled {
        Some(re) => re.is_match(candidate),
        None => false,
    }
}

/// Translate a wildcard pattern into a regex. Returns `None` (logged) when
/// the translation produces an invalid regex, e.g. an unterminated class.
fn compile(pattern: &str, anchored: bool) -> Option<Regex> {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push_str("(?i)");
    if anchored {
        re.push('^');
    }
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            '[' => {
                re.push('[');
                if chars.peek() == Some(&'!') {
                    chars.next();
                    re.push('^');
                }
                // Class contents pass through verbatim up to the closing
                // bracket; a missing bracket fails compilation below.
                for inner in chars.by_ref() {
                    re.push(inner);
                    if inner == ']' {
                        break;
                    }
                }
            }
            other => re.push_str(&regex::escape(&other.to_string())),
        }
    }
    if anchored {
        re.push('$');
    }
    match Regex::new(&re) {
        Ok(compiled) => Some(compiled),
        Err(e) => {
            log::warn!("invalid wildcard pattern {pattern:?}: {e}");
            None
        }
    }
}
