//! Resolved tab icon configuration: building, merging, and loading.
//!
//! The configuration file is parsed by the bespoke block parser in
//! [`crate::block`] (the format is a restricted, hand-written subset of
//! YAML, and hostile input must degrade rather than fail, so no YAML
//! library is involved). The result is one immutable [`ResolvedConfig`]
//! snapshot; a reload would produce a new value, never mutate in place.

use crate::block::{self, Entry, entry_icon};
use crate::error::ConfigError;
use crate::overrides::IconOverrides;
use crate::text::{is_wildcard, parse_bool};
use crate::types::ColorOverride;
use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Built-in fallback glyph used when neither the file nor the overrides
/// set one (Nerd Font terminal icon).
pub const DEFAULT_ICON: &str = "\u{f120}";

const TAB_ICONS_FILE: &str = "tab_icons.yaml";

/// Environment variable holding the full config file path.
const ENV_TAB_ICONS: &str = "PAR_TERM_TAB_ICONS";
/// Environment variable holding the config directory.
const ENV_CONFIG_DIR: &str = "PAR_TERM_CONFIG_DIR";

/// Immutable, fully merged tab icon configuration.
///
/// All map keys are lowercase-normalized at build time and empty string
/// values are never stored. Pattern lists preserve file declaration order;
/// the first matching pattern wins, with no specificity ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Icon returned when nothing else matches.
    pub fallback_icon: String,
    /// When true, a detected host's icon short-circuits title resolution.
    pub prefer_host_icon: bool,
    /// When true, the pane title is tried as a hostname source first.
    pub use_title_as_hostname: bool,

    pub ring_color_active: Option<String>,
    pub ring_color_inactive: Option<String>,
    pub icon_color: Option<String>,
    pub alert_color: Option<String>,

    /// App and session icons merged into one lookup map.
    pub icon_map: HashMap<String, String>,
    /// Exact (full lowercased title) icons.
    pub title_exact_map: HashMap<String, String>,
    /// Per-app title patterns in file declaration order, scanned app by
    /// app, pattern by pattern; the first match across the whole list wins.
    pub title_pattern_map: Vec<(String, Vec<(String, String)>)>,

    pub host_exact_map: HashMap<String, String>,
    pub host_pattern_list: Vec<(String, String)>,
    pub host_color_exact: HashMap<String, ColorOverride>,
    pub host_color_patterns: Vec<(String, ColorOverride)>,

    /// Per-app color overrides, looked up with the same tokenization as
    /// the icon map.
    pub app_color_map: HashMap<String, ColorOverride>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            fallback_icon: DEFAULT_ICON.to_string(),
            prefer_host_icon: true,
            use_title_as_hostname: false,
            ring_color_active: None,
            ring_color_inactive: None,
            icon_color: None,
            alert_color: None,
            icon_map: HashMap::new(),
            title_exact_map: HashMap::new(),
            title_pattern_map: Vec::new(),
            host_exact_map: HashMap::new(),
            host_pattern_list: Vec::new(),
            host_color_exact: HashMap::new(),
            host_color_patterns: Vec::new(),
            app_color_map: HashMap::new(),
        }
    }
}

impl ResolvedConfig {
    /// Build a configuration from config file source text, then merge in
    /// programmatic overrides. Never fails: malformed lines are skipped and
    /// empty input yields defaults.
    pub fn build(source: &str, overrides: Option<&IconOverrides>) -> Self {
        let lines: Vec<&str> = source.lines().collect();
        let mut builder = Builder::default();
        builder.apply_global_section(&block::section(&lines, "config"));
        builder.apply_app_section(&block::section(&lines, "icons"));
        builder.apply_app_section(&block::section(&lines, "sessions"));
        builder.apply_title_section(&block::section(&lines, "title_icons"));
        builder.apply_host_section(&block::section(&lines, "hosts"));
        if let Some(overrides) = overrides {
            builder.apply_overrides(overrides);
        }
        builder.finish()
    }

    /// Best-effort load from the resolved config file path. A missing or
    /// unreadable file is not an error; it yields defaults plus overrides.
    pub fn load(overrides: Option<&IconOverrides>) -> Self {
        let path = Self::config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => {
                log::info!("loading tab icon config from {:?}", path);
                Self::build(&contents, overrides)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no tab icon config at {:?}, using defaults", path);
                Self::build("", overrides)
            }
            Err(e) => {
                log::warn!("failed to read tab icon config {:?}: {}", path, e);
                Self::build("", overrides)
            }
        }
    }

    /// Load from an explicit path, surfacing I/O errors. Used by callers
    /// (and tests) that point at a file they expect to exist.
    pub fn load_from_path(path: &Path, overrides: Option<&IconOverrides>) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Ok(Self::build(&contents, overrides))
    }

    /// Resolve the config file path: `PAR_TERM_TAB_ICONS` (full path), then
    /// `PAR_TERM_CONFIG_DIR` (directory), then the XDG-convention default
    /// `~/.config/par-term/tab_icons.yaml`.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(ENV_TAB_ICONS)
            && !path.is_empty()
        {
            return PathBuf::from(path);
        }
        if let Ok(dir) = std::env::var(ENV_CONFIG_DIR)
            && !dir.is_empty()
        {
            return PathBuf::from(dir).join(TAB_ICONS_FILE);
        }
        if let Some(home_dir) = dirs::home_dir() {
            home_dir
                .join(".config")
                .join("par-term")
                .join(TAB_ICONS_FILE)
        } else {
            PathBuf::from(TAB_ICONS_FILE)
        }
    }
}

/// Accumulates sections and overrides before freezing into a
/// [`ResolvedConfig`]. Globals stay `Option` here so the override merge can
/// tell "file set this" from "file was silent".
#[derive(Debug, Default)]
struct Builder {
    fallback_icon: Option<String>,
    prefer_host_icon: Option<bool>,
    use_title_as_hostname: Option<bool>,
    ring_color_active: Option<String>,
    ring_color_inactive: Option<String>,
    icon_color: Option<String>,
    alert_color: Option<String>,

    icon_map: HashMap<String, String>,
    title_exact_map: HashMap<String, String>,
    title_pattern_map: Vec<(String, Vec<(String, String)>)>,
    host_exact_map: HashMap<String, String>,
    host_pattern_list: Vec<(String, String)>,
    host_color_exact: HashMap<String, ColorOverride>,
    host_color_patterns: Vec<(String, ColorOverride)>,
    app_color_map: HashMap<String, ColorOverride>,
}

impl Builder {
    fn apply_global_section(&mut self, block: &[&str]) {
        for entry in block::entries(block) {
            let Some(value) = entry.value else { continue };
            match entry.key.as_str() {
                "default_icon" | "fallback_icon" => self.fallback_icon = Some(value),
                "prefer_host_icon" => {
                    if let Some(flag) = parse_bool(&value) {
                        self.prefer_host_icon = Some(flag);
                    }
                }
                "use_title_as_hostname" => {
                    if let Some(flag) = parse_bool(&value) {
                        self.use_title_as_hostname = Some(flag);
                    }
                }
                "ring_color_active" | "active_ring_color" => {
                    self.ring_color_active = Some(value);
                }
                "ring_color_inactive" | "inactive_ring_color" => {
                    self.ring_color_inactive = Some(value);
                }
                "icon_color" | "index_color" => self.icon_color = Some(value),
                "alert_color" | "bell_color" => self.alert_color = Some(value),
                other => log::debug!("ignoring unknown config key {other:?}"),
            }
        }
    }

    /// `icons` and `sessions` share one shape and one destination map.
    /// First writer wins, so icon entries parsed before session entries of
    /// the same key are kept.
    fn apply_app_section(&mut self, block: &[&str]) {
        for entry in block::entries(block) {
            let key = entry.key.clone();
            if let Some(icon) = entry_icon(&entry) {
                self.icon_map.entry(key.clone()).or_insert(icon);
            }
            if entry.value.is_some() {
                continue;
            }
            let nested = block::entries(&entry.children);
            if let Some(colors) = nested_colors(&nested)
                && !self.app_color_map.contains_key(&key)
            {
                self.app_color_map.insert(key.clone(), colors);
            }
            let patterns = nested_title_patterns(&nested);
            if !patterns.is_empty() && !self.title_pattern_map.iter().any(|(app, _)| *app == key) {
                self.title_pattern_map.push((key, patterns));
            }
        }
    }

    fn apply_title_section(&mut self, block: &[&str]) {
        for entry in block::entries(block) {
            if let Some(icon) = entry_icon(&entry) {
                self.title_exact_map.entry(entry.key).or_insert(icon);
            }
        }
    }

    fn apply_host_section(&mut self, block: &[&str]) {
        for entry in block::entries(block) {
            let key = entry.key.clone();
            let icon = entry_icon(&entry);
            let colors = if entry.value.is_some() {
                None
            } else {
                nested_colors(&block::entries(&entry.children))
            };
            if is_wildcard(&key) {
                if let Some(icon) = icon
                    && !self.host_pattern_list.iter().any(|(p, _)| *p == key)
                {
                    self.host_pattern_list.push((key.clone(), icon));
                }
                if let Some(colors) = colors
                    && !self.host_color_patterns.iter().any(|(p, _)| *p == key)
                {
                    self.host_color_patterns.push((key, colors));
                }
            } else {
                if let Some(icon) = icon {
                    self.host_exact_map.entry(key.clone()).or_insert(icon);
                }
                if let Some(colors) = colors {
                    self.host_color_exact.entry(key).or_insert(colors);
                }
            }
        }
    }

    /// Merge programmatic overrides. With `override_yaml` set, override
    /// values win on collision; otherwise they fill gaps only. Override map
    /// keys are visited in sorted order so pattern appends are
    /// deterministic.
    fn apply_overrides(&mut self, overrides: &IconOverrides) {
        let force = overrides.override_yaml;

        set_opt(&mut self.fallback_icon, overrides.default_icon.clone(), force);
        set_opt(&mut self.prefer_host_icon, overrides.prefer_host_icon, force);
        set_opt(
            &mut self.use_title_as_hostname,
            overrides.use_title_as_hostname,
            force,
        );
        set_opt(&mut self.ring_color_active, overrides.ring_color.clone(), force);
        set_opt(
            &mut self.ring_color_inactive,
            overrides.ring_color.clone(),
            force,
        );
        set_opt(&mut self.icon_color, overrides.icon_color.clone(), force);
        set_opt(&mut self.alert_color, overrides.alert_color.clone(), force);

        for (key, entry) in sorted(&overrides.icons).chain(sorted(&overrides.sessions)) {
            let key = key.to_lowercase();
            if let Some(icon) = entry.icon() {
                insert_map(&mut self.icon_map, &key, icon.to_string(), force);
            }
            if let Some(colors) = entry.colors() {
                insert_map(&mut self.app_color_map, &key, colors, force);
            }
        }

        for (key, icon) in sorted(&overrides.title_icons) {
            if !icon.is_empty() {
                insert_map(&mut self.title_exact_map, &key.to_lowercase(), icon.clone(), force);
            }
        }

        for (key, entry) in sorted(&overrides.hosts) {
            let key = key.to_lowercase();
            if is_wildcard(&key) {
                if let Some(icon) = entry.icon() {
                    upsert_pattern(&mut self.host_pattern_list, &key, icon.to_string(), force);
                }
                if let Some(colors) = entry.colors() {
                    upsert_pattern(&mut self.host_color_patterns, &key, colors, force);
                }
            } else {
                if let Some(icon) = entry.icon() {
                    insert_map(&mut self.host_exact_map, &key, icon.to_string(), force);
                }
                if let Some(colors) = entry.colors() {
                    insert_map(&mut self.host_color_exact, &key, colors, force);
                }
            }
        }
    }

    fn finish(self) -> ResolvedConfig {
        ResolvedConfig {
            fallback_icon: self
                .fallback_icon
                .filter(|icon| !icon.is_empty())
                .unwrap_or_else(|| DEFAULT_ICON.to_string()),
            prefer_host_icon: self.prefer_host_icon.unwrap_or(true),
            use_title_as_hostname: self.use_title_as_hostname.unwrap_or(false),
            ring_color_active: self.ring_color_active.filter(|c| !c.is_empty()),
            ring_color_inactive: self.ring_color_inactive.filter(|c| !c.is_empty()),
            icon_color: self.icon_color.filter(|c| !c.is_empty()),
            alert_color: self.alert_color.filter(|c| !c.is_empty()),
            icon_map: self.icon_map,
            title_exact_map: self.title_exact_map,
            title_pattern_map: self.title_pattern_map,
            host_exact_map: self.host_exact_map,
            host_pattern_list: self.host_pattern_list,
            host_color_exact: self.host_color_exact,
            host_color_patterns: self.host_color_patterns,
            app_color_map: self.app_color_map,
        }
    }
}

/// Color override from an entry's nested keys, if any are present.
fn nested_colors(nested: &[Entry<'_>]) -> Option<ColorOverride> {
    let mut colors = ColorOverride::default();
    for child in nested {
        let Some(value) = child.value.clone().filter(|v| !v.is_empty()) else {
            continue;
        };
        match child.key.as_str() {
            "ring_color" | "ring" => colors.ring.get_or_insert(value),
            "icon_color" | "index_color" => colors.icon.get_or_insert(value),
            "alert_color" | "bell_color" => colors.alert.get_or_insert(value),
            _ => continue,
        };
    }
    (!colors.is_empty()).then_some(colors)
}

/// `(pattern, icon)` pairs from an entry's `titles` sub-block, in
/// declaration order.
fn nested_title_patterns(nested: &[Entry<'_>]) -> Vec<(String, String)> {
    let Some(titles) = nested.iter().find(|child| child.key == "titles") else {
        return Vec::new();
    };
    block::entries(&titles.children)
        .into_iter()
        .filter_map(|child| child.value.map(|icon| (child.key, icon)))
        .filter(|(pattern, icon)| !pattern.is_empty() && !icon.is_empty())
        .collect()
}

fn set_opt<T>(slot: &mut Option<T>, value: Option<T>, force: bool) {
    if let Some(value) = value
        && (force || slot.is_none())
    {
        *slot = Some(value);
    }
}

fn insert_map<V>(map: &mut HashMap<String, V>, key: &str, value: V, force: bool) {
    if force {
        map.insert(key.to_string(), value);
    } else {
        map.entry(key.to_string()).or_insert(value);
    }
}

fn upsert_pattern<V>(list: &mut Vec<(String, V)>, pattern: &str, value: V, force: bool) {
    match list.iter_mut().find(|(p, _)| p == pattern) {
        Some((_, existing)) => {
            if force {
                *existing = value;
            }
        }
        None => list.push((pattern.to_string(), value)),
    }
}

/// Sorted iteration over an override map, for deterministic merges.
fn sorted<V>(map: &HashMap<String, V>) -> impl Iterator<Item = (&String, &V)> {
    let mut pairs: Vec<_> = map.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    pairs.into_iter()
}
