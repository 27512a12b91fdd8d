#![allow(clippy::unwrap_used)]

use super::*;

fn argv(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_defaults() {
    let (config, rest) = Config::from_args(&argv(&["expensetui"])).unwrap();
    assert_eq!(rest, argv(&["expensetui"]));
    assert!(config.db_path.ends_with("expensetui.db"));
    assert!(config.log_dir.ends_with("logs"));
    assert_eq!(config.log_level, "info");
}

#[test]
fn test_flags_are_stripped() {
    let (config, rest) = Config::from_args(&argv(&[
        "expensetui",
        "list",
        "--db",
        "/tmp/other.db",
        "alice",
        "--log-level",
        "debug",
    ]))
    .unwrap();
    assert_eq!(rest, argv(&["expensetui", "list", "alice"]));
    assert_eq!(config.db_path, PathBuf::from("/tmp/other.db"));
    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_flag_missing_value() {
    assert!(Config::from_args(&argv(&["expensetui", "--db"])).is_err());
    assert!(Config::from_args(&argv(&["expensetui", "--log-level"])).is_err());
}
