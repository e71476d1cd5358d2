//! Tests for root folder and database path resolution
//!
//! Tests that manipulate PODLOG_ROOT_FOLDER are marked #[serial] so they do
//! not race on the process environment.

use podlog_common::config::{default_root_folder, TomlConfig, DATABASE_FILE_NAME, ROOT_FOLDER_ENV};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let config = TomlConfig::default();
    assert_eq!(config.resolve_root_folder(), default_root_folder());
    assert_eq!(
        config.resolve_database_path(),
        default_root_folder().join(DATABASE_FILE_NAME)
    );
}

#[test]
#[serial]
fn test_toml_root_folder_used_without_env() {
    env::remove_var(ROOT_FOLDER_ENV);

    let config = TomlConfig::from_toml_str(r#"root_folder = "/srv/podlog""#).unwrap();
    assert_eq!(config.resolve_root_folder(), PathBuf::from("/srv/podlog"));
    assert_eq!(
        config.resolve_database_path(),
        PathBuf::from("/srv/podlog/podlog.db")
    );
}

#[test]
#[serial]
fn test_env_var_overrides_toml_root_folder() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/podlog-env-root");

    let config = TomlConfig::from_toml_str(r#"root_folder = "/srv/podlog""#).unwrap();
    assert_eq!(config.resolve_root_folder(), PathBuf::from("/tmp/podlog-env-root"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_explicit_database_path_wins() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/podlog-env-root");

    let config = TomlConfig::from_toml_str(r#"database_path = "/data/shows.db""#).unwrap();
    assert_eq!(config.resolve_database_path(), PathBuf::from("/data/shows.db"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = 9000\n[logging]\nlevel = \"warn\"\n").unwrap();

    let config = TomlConfig::load_or_default(Some(&path)).unwrap();
    assert_eq!(config.port, 9000);
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.host, "127.0.0.1");
}
