// tests/config_test.rs
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use revbump::config::{load_config, Config, CONFIG_FILE_NAME, DEFAULT_REMOTE};
use serial_test::serial;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.git.remote, DEFAULT_REMOTE);
    assert_eq!(config.git.branch, "master");
    assert_eq!(config.manifest.path, PathBuf::from("composer.json"));
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[git]
remote = "origin"
branch = "main"
commit_message = "chore: release [skip ci]"
annotated_tags = true

[manifest]
path = "packages/core/composer.json"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.git.remote, "origin");
    assert_eq!(config.git.branch, "main");
    assert_eq!(config.git.commit_message, "chore: release [skip ci]");
    assert!(config.git.annotated_tags);
    assert_eq!(
        config.manifest.path,
        PathBuf::from("packages/core/composer.json")
    );
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = load_config(Some(dir.path().join("nope.toml").as_path()));
    assert!(result.is_err());
}

#[test]
fn test_invalid_values_are_rejected() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[git]\nbranch = \"  \"\n").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path())).unwrap_err();
    assert!(err.to_string().contains("git.branch"));
}

#[test]
#[serial]
fn test_config_in_current_directory_is_found() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[git]\nremote = \"release\"\n",
    )
    .unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).expect("Could not change to temp dir");

    let result = load_config(None);

    env::set_current_dir(original_dir).unwrap();

    assert_eq!(result.unwrap().git.remote, "release");
}
