//! End-to-end resolution behavior: the priority chain, host detection,
//! short-circuiting, and color fallback rules.

use par_term_tab_icons::{
    ColorHint, DEFAULT_ICON, PaneObservation, ProcessInfo, ResolvedConfig, TabObservation,
};

fn ssh_tab(argv: &[&str]) -> TabObservation {
    TabObservation {
        is_active: true,
        active_pane: Some(PaneObservation {
            foreground_process: Some(ProcessInfo::new(argv[0], argv)),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[test]
fn test_icon_for_title_is_deterministic_and_idempotent() {
    let config = ResolvedConfig::build("icons:\n  git: \"X\"\n", None);
    let first = config.icon_for_title("git status");
    for _ in 0..10 {
        assert_eq!(config.icon_for_title("git status"), first);
    }
}

#[test]
fn test_tokenized_icon_lookup() {
    // Spec scenario: `icons: {git: "X"}`, title "git status" resolves via
    // the word token.
    let config = ResolvedConfig::build("icons:\n  git: \"X\"\n", None);
    assert_eq!(config.icon_for_title("git status"), "X");
}

#[test]
fn test_no_config_empty_title_yields_fallback_and_empty_colors() {
    let config = ResolvedConfig::build("", None);
    let (icon, colors) = config.icon_and_colors_for_tab(&TabObservation::default());
    assert_eq!(icon, DEFAULT_ICON);
    assert_eq!(colors, ColorHint::default());
    assert!(colors.is_empty());
}

#[test]
fn test_exact_host_key_matches_only_identical_hostname() {
    let config = ResolvedConfig::build("hosts:\n  db01: \"D\"\n", None);
    let detect = |host: &str| {
        let tab = ssh_tab(&["ssh", host]);
        config.icon_and_colors_for_tab(&tab).0
    };
    assert_eq!(detect("db01"), "D");
    assert_eq!(detect("DB01"), "D");
    assert_eq!(detect("db012"), DEFAULT_ICON);
    assert_eq!(detect("db01.example.com"), DEFAULT_ICON);
}

#[test]
fn test_wildcard_host_semantics() {
    let config = ResolvedConfig::build("hosts:\n  \"*.example.com\": \"H\"\n", None);
    let detect = |host: &str| {
        let tab = ssh_tab(&["ssh", host]);
        config.icon_and_colors_for_tab(&tab).0
    };
    assert_eq!(detect("a.example.com"), "H");
    assert_eq!(detect("db.rack1.example.com"), "H");
    // The dot is literal, so the apex domain does not match.
    assert_eq!(detect("example.com"), DEFAULT_ICON);
}

#[test]
fn test_exact_host_beats_pattern() {
    let src = "\
hosts:
  \"db*\": \"P\"
  db01: \"E\"
";
    let config = ResolvedConfig::build(src, None);
    let tab = ssh_tab(&["ssh", "db01"]);
    assert_eq!(config.icon_and_colors_for_tab(&tab).0, "E");
    let tab = ssh_tab(&["ssh", "db02"]);
    assert_eq!(config.icon_and_colors_for_tab(&tab).0, "P");
}

#[test]
fn test_host_icon_short_circuits_title_path() {
    let src = "\
config:
  prefer_host_icon: true
icons:
  git: \"G\"
hosts:
  myhost: \"H\"
";
    let config = ResolvedConfig::build(src, None);
    let mut tab = ssh_tab(&["ssh", "myhost"]);
    // The title would resolve to the git icon, but the host path wins.
    tab.active_pane.as_mut().unwrap().title = Some("git status".to_string());
    assert_eq!(config.icon_and_colors_for_tab(&tab).0, "H");
}

#[test]
fn test_prefer_host_icon_disabled_uses_title() {
    let src = "\
config:
  prefer_host_icon: false
icons:
  git: \"G\"
hosts:
  myhost: \"H\"
";
    let config = ResolvedConfig::build(src, None);
    let mut tab = ssh_tab(&["ssh", "myhost"]);
    tab.active_pane.as_mut().unwrap().title = Some("git status".to_string());
    assert_eq!(config.icon_and_colors_for_tab(&tab).0, "G");
}

#[test]
fn test_ssh_flag_argument_is_consumed() {
    // Spec scenario: `ssh -p 22 user@myhost` detects "myhost".
    let config = ResolvedConfig::build(
        "config:\n  use_title_as_hostname: false\nhosts:\n  myhost: \"M\"\n",
        None,
    );
    let tab = ssh_tab(&["ssh", "-p", "22", "user@myhost"]);
    assert_eq!(config.detect_host(&tab).as_deref(), Some("myhost"));
    assert_eq!(config.icon_and_colors_for_tab(&tab).0, "M");
}

#[test]
fn test_wildcard_host_resolution_end_to_end() {
    // Spec scenario: hosts `*.example.com`, detected host db.example.com.
    let config = ResolvedConfig::build(
        "config:\n  prefer_host_icon: true\nhosts:\n  \"*.example.com\": \"H\"\n",
        None,
    );
    let tab = ssh_tab(&["ssh", "db.example.com"]);
    assert_eq!(config.icon_and_colors_for_tab(&tab).0, "H");
}

#[test]
fn test_host_colors_layer_under_globals() {
    let src = "\
config:
  ring_color_active: \"#101010\"
  ring_color_inactive: \"#202020\"
  icon_color: \"#303030\"
hosts:
  db01:
    icon: \"D\"
    ring_color: \"#ff0000\"
";
    let config = ResolvedConfig::build(src, None);
    let tab = ssh_tab(&["ssh", "db01"]);
    let (icon, colors) = config.icon_and_colors_for_tab(&tab);
    assert_eq!(icon, "D");
    assert_eq!(colors.ring.as_deref(), Some("#ff0000"));
    assert_eq!(colors.ring_active.as_deref(), Some("#101010"));
    assert_eq!(colors.ring_inactive.as_deref(), Some("#202020"));
    assert_eq!(colors.icon.as_deref(), Some("#303030"));
    assert_eq!(colors.alert, None);
}

#[test]
fn test_app_colors_apply_on_title_path() {
    let src = "\
icons:
  git:
    icon: \"G\"
    icon_color: \"#f05033\"
";
    let config = ResolvedConfig::build(src, None);
    let tab = TabObservation {
        is_active: true,
        active_pane: Some(PaneObservation {
            title: Some("git status".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let (icon, colors) = config.icon_and_colors_for_tab(&tab);
    assert_eq!(icon, "G");
    assert_eq!(colors.icon.as_deref(), Some("#f05033"));
}

#[test]
fn test_unset_colors_never_hardcoded() {
    let config = ResolvedConfig::build("hosts:\n  db01: \"D\"\n", None);
    let tab = ssh_tab(&["ssh", "db01"]);
    let (_, colors) = config.icon_and_colors_for_tab(&tab);
    // No global defaults and no host colors: everything stays unset.
    assert!(colors.is_empty());
}

#[test]
fn test_inactive_tab_skips_host_detection() {
    let config = ResolvedConfig::build("hosts:\n  myhost: \"H\"\n", None);
    let mut tab = ssh_tab(&["ssh", "myhost"]);
    tab.is_active = false;
    assert_eq!(config.icon_and_colors_for_tab(&tab).0, DEFAULT_ICON);
}

#[test]
fn test_mosh_client_counts_as_ssh_family() {
    let config = ResolvedConfig::build("hosts:\n  myhost: \"H\"\n", None);
    let tab = ssh_tab(&["mosh-client", "myhost"]);
    assert_eq!(config.icon_and_colors_for_tab(&tab).0, "H");
}

#[test]
fn test_fallback_pane_supplies_title() {
    let config = ResolvedConfig::build("icons:\n  htop: \"T\"\n", None);
    let tab = TabObservation {
        is_active: true,
        fallback_pane: Some(PaneObservation {
            title: Some("htop".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert_eq!(config.icon_and_colors_for_tab(&tab).0, "T");
}

#[test]
fn test_tab_title_override_wins() {
    let config = ResolvedConfig::build("icons:\n  build: \"B\"\n  vim: \"V\"\n", None);
    let tab = TabObservation {
        is_active: true,
        title_override: Some("build".to_string()),
        active_pane: Some(PaneObservation {
            title: Some("vim notes.txt".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert_eq!(config.icon_and_colors_for_tab(&tab).0, "B");
}
