//! The resolution engine: turns a [`TabObservation`] into an icon and a
//! set of color hints against a [`ResolvedConfig`].
//!
//! Priority chain, short-circuiting on first success:
//!
//! 1. Title acquisition (tab override, active pane title, process name,
//!    fallback pane).
//! 2. Host detection, active tabs only (title heuristics when enabled,
//!    SSH argv scan, domain name, `@host` fragment as a last resort).
//! 3. Host icon lookup when `prefer_host_icon` is set; a hit skips the
//!    title path entirely.
//! 4. Title icon lookup (exact, substring, per-app patterns in file
//!    declaration order, tokenized icon-map lookup).
//! 5. Color assembly: host override, then app override, then globals;
//!    fields with no value anywhere stay unset.
//!
//! Every step treats missing data as an expected state; resolution always
//! returns a `(icon, colors)` pair.

use crate::config::ResolvedConfig;
use crate::host;
use crate::overrides::IconOverrides;
use crate::pattern;
use crate::types::{ColorHint, ColorOverride, PaneObservation, TabObservation};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::OnceLock;

impl ResolvedConfig {
    /// Resolve the icon and colors for one tab render.
    pub fn icon_and_colors_for_tab(&self, tab: &TabObservation) -> (String, ColorHint) {
        let title = effective_title(tab);

        if self.prefer_host_icon
            && let Some(detected) = self.detect_host(tab)
            && let Some((icon, host_colors)) = self.host_icon(&detected)
        {
            log::debug!("tab icon {icon:?} from host {detected:?}");
            return (icon, self.assemble_colors(host_colors, None));
        }

        let lower = title.trim().to_lowercase();
        let candidates = title_candidates(&lower);
        let icon = self
            .title_icon(&lower, &candidates)
            .unwrap_or_else(|| self.fallback_icon.clone());
        let app_colors = self.app_colors(&lower, &candidates);
        (icon, self.assemble_colors(None, app_colors))
    }

    /// Deterministic title-only resolution; falls back to the fallback
    /// icon when nothing matches.
    pub fn icon_for_title(&self, title: &str) -> String {
        let lower = title.trim().to_lowercase();
        let candidates = title_candidates(&lower);
        self.title_icon(&lower, &candidates)
            .unwrap_or_else(|| self.fallback_icon.clone())
    }

    /// Best-effort remote host for a tab, when one is detectable.
    pub fn detect_host(&self, tab: &TabObservation) -> Option<String> {
        if !tab.is_active {
            return None;
        }
        let pane = tab.active_pane.as_ref()?;
        let process = pane.foreground_process.as_ref();
        let process_is_ssh = process.is_some_and(|p| host::is_ssh_client(&p.executable));
        let title = pane.title.as_deref().unwrap_or("").trim();

        if self.use_title_as_hostname && !title.is_empty() {
            if let Some(found) = host::host_from_title(title) {
                return Some(found);
            }
            if process_is_ssh && host::looks_like_hostname(title) {
                return Some(title.to_string());
            }
        }
        if process_is_ssh
            && let Some(process) = process
            && let Some(found) = host::host_from_argv(&process.argv)
        {
            return Some(found);
        }
        if let Some(domain) = pane.domain.as_deref()
            && let Some(found) = host::host_from_domain(domain)
        {
            return Some(found);
        }
        if process_is_ssh
            && let Some(found) = host::host_fragment_from_title(title)
        {
            return Some(found);
        }
        None
    }

    /// Host icon lookup: exact map first, then the pattern list in
    /// declaration order, each hit paired with that entry's color override.
    fn host_icon(&self, detected: &str) -> Option<(String, Option<&ColorOverride>)> {
        let lower = detected.to_lowercase();
        if let Some(icon) = self.host_exact_map.get(&lower) {
            return Some((icon.clone(), self.host_color_exact.get(&lower)));
        }
        for (pat, icon) in &self.host_pattern_list {
            if pattern::host_matches(pat, &lower) {
                let colors = self
                    .host_color_patterns
                    .iter()
                    .find(|(p, _)| p == pat)
                    .map(|(_, c)| c);
                return Some((icon.clone(), colors));
            }
        }
        None
    }

    /// Title-icon chain over a pre-lowercased title.
    fn title_icon(&self, lower: &str, candidates: &[String]) -> Option<String> {
        if lower.is_empty() {
            return None;
        }
        if let Some(icon) = self.title_exact_map.get(lower) {
            return Some(icon.clone());
        }
        for key in longest_first(self.title_exact_map.keys()) {
            if lower.contains(key) {
                return self.title_exact_map.get(key).cloned();
            }
        }
        for (_app, patterns) in &self.title_pattern_map {
            for (pat, icon) in patterns {
                if pattern::title_matches(pat, lower) {
                    return Some(icon.clone());
                }
            }
        }
        for candidate in candidates {
            if let Some(icon) = self.icon_map.get(candidate) {
                return Some(icon.clone());
            }
        }
        let icon_keys = longest_first(self.icon_map.keys());
        for candidate in candidates {
            for key in &icon_keys {
                if candidate.contains(key) {
                    return self.icon_map.get(*key).cloned();
                }
            }
        }
        None
    }

    /// App color override for a title, using the icon-map tokenization.
    fn app_colors(&self, lower: &str, candidates: &[String]) -> Option<&ColorOverride> {
        if lower.is_empty() || self.app_color_map.is_empty() {
            return None;
        }
        for candidate in candidates {
            if let Some(colors) = self.app_color_map.get(candidate) {
                return Some(colors);
            }
        }
        let keys = longest_first(self.app_color_map.keys());
        for candidate in candidates {
            for key in &keys {
                if candidate.contains(key) {
                    return self.app_color_map.get(*key);
                }
            }
        }
        None
    }

    /// Layer entry overrides under the global defaults. Host colors beat
    /// app colors; globals fill whatever remains; anything still unset
    /// stays unset.
    fn assemble_colors(
        &self,
        host_colors: Option<&ColorOverride>,
        app_colors: Option<&ColorOverride>,
    ) -> ColorHint {
        let mut hint = ColorHint::default();
        for over in [host_colors, app_colors].into_iter().flatten() {
            if hint.ring.is_none() {
                hint.ring = over.ring.clone();
            }
            if hint.icon.is_none() {
                hint.icon = over.icon.clone();
            }
            if hint.alert.is_none() {
                hint.alert = over.alert.clone();
            }
        }
        hint.ring_active = self.ring_color_active.clone();
        hint.ring_inactive = self.ring_color_inactive.clone();
        if hint.icon.is_none() {
            hint.icon = self.icon_color.clone();
        }
        if hint.alert.is_none() {
            hint.alert = self.alert_color.clone();
        }
        hint
    }
}

/// Title the resolver works from: the tab's own override wins, then the
/// active pane's title, then its process name, then the fallback pane.
/// An empty result is a valid terminal state.
fn effective_title(tab: &TabObservation) -> String {
    if let Some(title) = &tab.title_override
        && !title.trim().is_empty()
    {
        return title.clone();
    }
    for pane in [tab.active_pane.as_ref(), tab.fallback_pane.as_ref()]
        .into_iter()
        .flatten()
    {
        if let Some(title) = pane_title(pane) {
            return title;
        }
    }
    String::new()
}

fn pane_title(pane: &PaneObservation) -> Option<String> {
    if let Some(title) = &pane.title
        && !title.trim().is_empty()
    {
        return Some(title.clone());
    }
    let process = pane.foreground_process.as_ref()?;
    let name = Path::new(&process.executable)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())?;
    (!name.is_empty()).then_some(name)
}

/// Whitespace/punctuation-delimited lookup candidates for a lowercased
/// title, the whole title first.
fn title_candidates(lower: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    if lower.is_empty() {
        return candidates;
    }
    candidates.push(lower.to_string());
    for token in lower.split(is_token_delimiter) {
        if !token.is_empty() && !candidates.iter().any(|c| c == token) {
            candidates.push(token.to_string());
        }
    }
    candidates
}

/// Delimiters for title tokenization. `-`, `_`, and `.` stay inside
/// tokens so process names and hostnames survive as single candidates.
fn is_token_delimiter(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '/' | '\\' | ':' | ';' | ',' | '(' | ')' | '[' | ']' | '{' | '}' | '<' | '>' | '|'
                | '"' | '\''
        )
}

/// Map keys sorted longest first (then lexicographic) so overlapping keys
/// resolve deterministically in substring-containment fallbacks.
fn longest_first<'a>(keys: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut sorted: Vec<&str> = keys.map(String::as_str).collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    sorted
}

// ---------------------------------------------------------------------------
// Process-wide shared configuration
// ---------------------------------------------------------------------------

/// Built at most once per process, on first resolution (or first call to
/// [`shared_config`] after [`setup`]). There is no reload path.
static SHARED: OnceLock<ResolvedConfig> = OnceLock::new();

/// Overrides recorded by [`setup`] before the first load.
static PENDING_OVERRIDES: Mutex<Option<IconOverrides>> = Mutex::new(None);

/// Record programmatic overrides to merge into the configuration when it
/// is first loaded. The first recorded value wins; later calls are
/// ignored (with a warning), as is any call made once the configuration
/// has been built.
pub fn setup(overrides: Option<IconOverrides>) {
    if SHARED.get().is_some() {
        log::warn!("tab icon configuration already loaded; setup() ignored");
        return;
    }
    if let Some(overrides) = overrides
        && !record_overrides(&PENDING_OVERRIDES, overrides)
    {
        log::warn!("tab icon overrides already recorded; setup() ignored");
    }
}

/// Store overrides into `slot` unless one is already recorded. Returns
/// false when the slot was taken and the value was dropped.
fn record_overrides(slot: &Mutex<Option<IconOverrides>>, overrides: IconOverrides) -> bool {
    let mut pending = slot.lock();
    if pending.is_some() {
        return false;
    }
    *pending = Some(overrides);
    true
}

/// The process-wide configuration, loading it on first use. Safe to call
/// from multiple threads; exactly one performs the load.
pub fn shared_config() -> &'static ResolvedConfig {
    SHARED.get_or_init(|| {
        let overrides = PENDING_OVERRIDES.lock().take();
        ResolvedConfig::load(overrides.as_ref())
    })
}

/// Resolve the icon and colors for a tab against the shared configuration.
pub fn icon_and_colors_for_tab(tab: &TabObservation) -> (String, ColorHint) {
    shared_config().icon_and_colors_for_tab(tab)
}

/// Resolve an icon for a bare title against the shared configuration.
pub fn icon_for_title(title: &str) -> String {
    shared_config().icon_for_title(title)
}

/// The configured (or built-in) fallback icon.
pub fn get_fallback_icon() -> String {
    shared_config().fallback_icon.clone()
}

/// The global icon color, if one is configured.
pub fn get_global_icon_color() -> Option<String> {
    shared_config().icon_color.clone()
}
