//! Config parsing and override-merge behavior through the public API.

use par_term_tab_icons::{
    DEFAULT_ICON, IconEntryOverride, IconOverrides, ResolvedConfig,
};

#[test]
fn test_full_file_parse() {
    let src = r##"
# par-term tab icons
config:
  default_icon: "F"
  use_title_as_hostname: yes
  ring_color_active: "#80ff80"   # active tab ring

icons:
  vim: "V"
  git:
    icon: "G"
    ring_color: "#f05033"
    titles:
      "*rebase*": "R"

sessions:
  work: "W"

title_icons:
  "daily standup": "Y"

hosts:
  db01: "D"
  "*.example.com":
    icon: "E"
"##;
    let config = ResolvedConfig::build(src, None);
    assert_eq!(config.fallback_icon, "F");
    assert!(config.use_title_as_hostname);
    assert_eq!(config.ring_color_active.as_deref(), Some("#80ff80"));
    assert_eq!(config.icon_map["vim"], "V");
    assert_eq!(config.icon_map["git"], "G");
    assert_eq!(config.icon_map["work"], "W");
    assert_eq!(config.title_exact_map["daily standup"], "Y");
    assert_eq!(config.host_exact_map["db01"], "D");
    assert_eq!(config.host_pattern_list.len(), 1);
    assert_eq!(config.app_color_map["git"].ring.as_deref(), Some("#f05033"));
    assert_eq!(config.title_pattern_map[0].0, "git");
}

#[test]
fn test_malformed_lines_are_skipped() {
    let src = "\
icons:
  this line has no colon
  : no key either
  good: \"G\"
garbage garbage
hosts:
  db01: \"D\"
";
    let config = ResolvedConfig::build(src, None);
    assert_eq!(config.icon_map.len(), 1);
    assert_eq!(config.icon_map["good"], "G");
    assert_eq!(config.host_exact_map["db01"], "D");
}

#[test]
fn test_stray_indented_leading_line_does_not_hide_sections() {
    let src = "  stray: x\nicons:\n  git: \"G\"\n";
    let config = ResolvedConfig::build(src, None);
    assert_eq!(config.icon_for_title("git status"), "G");
}

#[test]
fn test_keys_are_lowercase_normalized() {
    let config = ResolvedConfig::build("icons:\n  ViM: \"V\"\nhosts:\n  DB01: \"D\"\n", None);
    assert_eq!(config.icon_map["vim"], "V");
    assert_eq!(config.host_exact_map["db01"], "D");
}

#[test]
fn test_empty_values_never_stored() {
    let src = "\
icons:
  vim: \"\"
  git: G
";
    let config = ResolvedConfig::build(src, None);
    assert!(!config.icon_map.contains_key("vim"));
    assert_eq!(config.icon_map["git"], "G");
}

#[test]
fn test_unknown_keys_ignored() {
    let src = "\
config:
  default_icon: X
  some_future_key: whatever
not_a_section:
  vim: V
";
    let config = ResolvedConfig::build(src, None);
    assert_eq!(config.fallback_icon, "X");
    assert!(config.icon_map.is_empty());
}

#[test]
fn test_overrides_without_flag_never_change_file_keys() {
    let src = "icons:\n  vim: \"V\"\ntitle_icons:\n  standup: \"S\"\n";
    let mut overrides = IconOverrides::default();
    overrides
        .icons
        .insert("vim".to_string(), IconEntryOverride::Icon("X".to_string()));
    overrides
        .title_icons
        .insert("standup".to_string(), "X".to_string());
    overrides
        .title_icons
        .insert("retro".to_string(), "R".to_string());

    let config = ResolvedConfig::build(src, Some(&overrides));
    assert_eq!(config.icon_map["vim"], "V");
    assert_eq!(config.title_exact_map["standup"], "S");
    assert_eq!(config.title_exact_map["retro"], "R");
}

#[test]
fn test_overrides_with_flag_replace_colliding_keys() {
    let src = "icons:\n  vim: \"V\"\n";
    let mut overrides = IconOverrides {
        override_yaml: true,
        ..Default::default()
    };
    overrides
        .icons
        .insert("vim".to_string(), IconEntryOverride::Icon("X".to_string()));

    let config = ResolvedConfig::build(src, Some(&overrides));
    assert_eq!(config.icon_map["vim"], "X");
}

#[test]
fn test_overrides_from_yaml_value() {
    // The override types deserialize from the host app's own config.
    let yaml = r##"
override_yaml: false
prefer_host_icon: false
hosts:
  spare: "S"
  "gpu*":
    icon: "P"
    ring: "#00ff00"
"##;
    let overrides: IconOverrides = serde_yaml_ng::from_str(yaml).unwrap();
    let config = ResolvedConfig::build("", Some(&overrides));
    assert!(!config.prefer_host_icon);
    assert_eq!(config.host_exact_map["spare"], "S");
    assert_eq!(
        config.host_pattern_list,
        vec![("gpu*".to_string(), "P".to_string())]
    );
    assert_eq!(
        config.host_color_patterns[0].1.ring.as_deref(),
        Some("#00ff00")
    );
}

#[test]
fn test_overrides_alone_build_full_config() {
    let mut overrides = IconOverrides {
        default_icon: Some("O".to_string()),
        ..Default::default()
    };
    overrides
        .icons
        .insert("git".to_string(), IconEntryOverride::Icon("G".to_string()));

    let config = ResolvedConfig::build("", Some(&overrides));
    assert_eq!(config.fallback_icon, "O");
    assert_eq!(config.icon_for_title("git status"), "G");
    assert_eq!(config.icon_for_title("unmatched"), "O");
}

#[test]
fn test_defaults_without_any_input() {
    let config = ResolvedConfig::build("", None);
    assert_eq!(config.fallback_icon, DEFAULT_ICON);
    assert!(config.prefer_host_icon);
    assert!(!config.use_title_as_hostname);
    assert!(config.icon_color.is_none());
}
