//! Programmatic override input, supplied once at setup time.
//!
//! Mirrors the config file's sections so a host application can carry tab
//! icon settings inside its own config file and hand them over as one
//! structured value. Legacy key names are accepted as serde aliases, and
//! host/icon entries deserialize from either a bare icon string or a record
//! with `icon` plus color fields.

use crate::types::ColorOverride;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Structured overrides merged into the file-derived configuration.
///
/// With `override_yaml` set, overrides win on key collision; otherwise the
/// file wins and an override only lands where the file left the key absent.
/// File-derived values are never removed either way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IconOverrides {
    /// When true, colliding override keys replace file-derived values.
    pub override_yaml: bool,

    /// Fallback icon glyph.
    #[serde(alias = "fallback_icon")]
    pub default_icon: Option<String>,

    pub prefer_host_icon: Option<bool>,
    pub use_title_as_hostname: Option<bool>,

    /// Flattened ring color, applied to both the active and inactive global
    /// ring colors.
    pub ring_color: Option<String>,

    #[serde(alias = "index_color")]
    pub icon_color: Option<String>,
    pub alert_color: Option<String>,

    /// App icon entries, merged into the icon map.
    pub icons: HashMap<String, IconEntryOverride>,
    /// Session icon entries, merged into the icon map after `icons`.
    pub sessions: HashMap<String, IconEntryOverride>,
    /// Exact-title icon entries.
    pub title_icons: HashMap<String, String>,
    /// Host icon entries; wildcard keys route to the pattern list.
    pub hosts: HashMap<String, IconEntryOverride>,
}

/// One override entry: a bare icon glyph or a record with colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IconEntryOverride {
    Icon(String),
    Detailed(DetailedOverride),
}

/// Record form of an override entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedOverride {
    pub icon: Option<String>,
    #[serde(alias = "ring")]
    pub ring_color: Option<String>,
    #[serde(alias = "index_color")]
    pub icon_color: Option<String>,
    pub alert_color: Option<String>,
}

impl IconEntryOverride {
    /// Icon glyph carried by this entry, if any. Empty strings count as
    /// absent.
    pub(crate) fn icon(&self) -> Option<&str> {
        let icon = match self {
            IconEntryOverride::Icon(icon) => Some(icon.as_str()),
            IconEntryOverride::Detailed(d) => d.icon.as_deref(),
        };
        icon.filter(|i| !i.is_empty())
    }

    /// Color override carried by this entry, if any field is set.
    pub(crate) fn colors(&self) -> Option<ColorOverride> {
        match self {
            IconEntryOverride::Icon(_) => None,
            IconEntryOverride::Detailed(d) => {
                let colors = ColorOverride {
                    ring: d.ring_color.clone().filter(|c| !c.is_empty()),
                    icon: d.icon_color.clone().filter(|c| !c.is_empty()),
                    alert: d.alert_color.clone().filter(|c| !c.is_empty()),
                };
                (!colors.is_empty()).then_some(colors)
            }
        }
    }
}
