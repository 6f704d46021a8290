//! Data types exchanged with the host application.
//!
//! `TabObservation` carries the signals the host reads from a tab per
//! render; `ColorHint` carries the resolved colors back. Both are transient
//! per-call values. Color values are opaque strings (whatever the host's
//! renderer accepts, typically `#rrggbb`); this crate never interprets
//! them.

/// Sparse per-entry color override parsed from a host or app entry.
///
/// Unset fields fall through to the global defaults during color assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorOverride {
    pub ring: Option<String>,
    pub icon: Option<String>,
    pub alert: Option<String>,
}

impl ColorOverride {
    pub fn is_empty(&self) -> bool {
        self.ring.is_none() && self.icon.is_none() && self.alert.is_none()
    }
}

/// Resolved colors returned alongside an icon.
///
/// Every field is optional: a field left `None` has no configured value
/// anywhere (no entry override, no global default) and the caller applies
/// its own rendering default. `ring` comes from a per-entry override and,
/// when set, takes precedence over `ring_active`/`ring_inactive` at render
/// time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorHint {
    pub ring: Option<String>,
    pub ring_active: Option<String>,
    pub ring_inactive: Option<String>,
    pub icon: Option<String>,
    pub alert: Option<String>,
}

impl ColorHint {
    pub fn is_empty(&self) -> bool {
        self.ring.is_none()
            && self.ring_active.is_none()
            && self.ring_inactive.is_none()
            && self.icon.is_none()
            && self.alert.is_none()
    }
}

/// Foreground process of a pane, as observed by the host.
///
/// `argv` includes the command name as its first element, i.e. the vector
/// for `ssh -p 22 user@host` is `["ssh", "-p", "22", "user@host"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessInfo {
    pub executable: String,
    pub argv: Vec<String>,
}

impl ProcessInfo {
    pub fn new(executable: impl Into<String>, argv: &[&str]) -> Self {
        Self {
            executable: executable.into(),
            argv: argv.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Everything the host could observe about one pane. All fields are
/// best-effort; introspection failure on the host side shows up here as
/// `None` and is an expected state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaneObservation {
    /// Live pane title, if any.
    pub title: Option<String>,
    /// Connection/domain name the pane runs in (e.g. `local`,
    /// `ssh:user@db01:2222`).
    pub domain: Option<String>,
    /// Foreground process, if the host could read it.
    pub foreground_process: Option<ProcessInfo>,
}

/// Per-render observation of a tab, supplied by the host's title-format
/// callback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabObservation {
    /// Whether this is the active tab. Host detection only runs for active
    /// tabs.
    pub is_active: bool,
    /// User-set tab title, which wins over pane-derived titles.
    pub title_override: Option<String>,
    /// The active pane, when the host could identify one.
    pub active_pane: Option<PaneObservation>,
    /// Any other pane to fall back on when active-pane data is missing.
    pub fallback_pane: Option<PaneObservation>,
}
