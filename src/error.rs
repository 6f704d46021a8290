//! Typed error for the explicit-path load API.
//!
//! Resolution itself is infallible: every malformed line, missing file, and
//! ambiguous signal degrades to a documented fallback. The only operation
//! that can fail is `ResolvedConfig::load_from_path`, which callers invoke
//! with a path they expect to exist. It returns `anyhow::Result`, so
//! `ConfigError` values coerce automatically and remain downcastable for
//! callers that want to match on the failure mode.

/// Errors produced by `ResolvedConfig::load_from_path`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error reading tab icon config: {0}")]
    Io(#[from] std::io::Error),
}
