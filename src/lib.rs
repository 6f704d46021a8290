//! Tab icon and color hint resolution for the par-term terminal emulator.
//!
//! Given what the host observes about a tab (pane title, foreground
//! process, connection domain), this crate resolves a display icon and a
//! set of color hints from a small hand-written config file plus optional
//! programmatic overrides. It includes:
//!
//! - A forgiving parser for the restricted, indentation-based config format
//! - Shell-style wildcard matching for host and title patterns
//! - SSH/Mosh host detection from command lines, titles, and domains
//! - A priority-ordered resolver that always returns a usable
//!   `(icon, colors)` pair
//!
//! The crate never renders anything and never fails a resolution call:
//! missing files, malformed lines, and absent observations all degrade to
//! documented fallbacks. The configuration is loaded lazily, once per
//! process, and is safe to read from multiple threads.

mod block;
mod config;
mod error;
mod host;
mod overrides;
mod pattern;
mod resolver;
mod text;
mod types;

// Re-export main types for convenience
pub use config::{DEFAULT_ICON, ResolvedConfig};
pub use error::ConfigError;
pub use overrides::{DetailedOverride, IconEntryOverride, IconOverrides};
pub use types::{ColorHint, ColorOverride, PaneObservation, ProcessInfo, TabObservation};

// Shared-configuration entry points for host callbacks
pub use resolver::{
    get_fallback_icon, get_global_icon_color, icon_and_colors_for_tab, icon_for_title, setup,
    shared_config,
};
