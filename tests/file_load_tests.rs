//! Loading behavior against real files.

use par_term_tab_icons::{DEFAULT_ICON, ResolvedConfig};
use std::io::Write;

#[test]
fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "config:\n  default_icon: \"L\"\nicons:\n  git: \"G\"\n"
    )
    .unwrap();
    file.flush().unwrap();

    let config = ResolvedConfig::load_from_path(file.path(), None).unwrap();
    assert_eq!(config.fallback_icon, "L");
    assert_eq!(config.icon_map["git"], "G");
}

#[test]
fn test_load_from_missing_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no_such_file.yaml");
    let err = ResolvedConfig::load_from_path(&missing, None).unwrap_err();
    // The typed error stays downcastable through anyhow.
    assert!(
        err.downcast_ref::<par_term_tab_icons::ConfigError>()
            .is_some()
    );
}

#[test]
fn test_load_from_empty_file_yields_defaults() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let config = ResolvedConfig::load_from_path(file.path(), None).unwrap();
    assert_eq!(config.fallback_icon, DEFAULT_ICON);
    assert!(config.icon_map.is_empty());
}

#[test]
fn test_best_effort_load_never_fails() {
    // Whatever the environment points at, `load` must produce a config.
    let config = ResolvedConfig::load(None);
    assert!(!config.fallback_icon.is_empty());
}
