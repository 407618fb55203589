//! Integration tests for Settings layered loading.
//!
//! These run without a global config (temp directories only), so they test
//! local config merging with defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use socgraph::application::ApplicationError;
use socgraph::config::Settings;

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".socgraph.toml"),
        "dataset = \"data/network.txt\"\nmax_users = 500\n",
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.dataset, PathBuf::from("data/network.txt"));
    assert_eq!(settings.max_users, 500);
}

#[test]
fn given_no_local_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.max_users, Settings::default().max_users);
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".socgraph.toml"), "max_users = [not toml").unwrap();

    let result = Settings::load(Some(dir.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_tilde_dataset_when_load_then_expanded() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".socgraph.toml"), "dataset = \"~/net.txt\"\n").unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert!(!settings.dataset.to_string_lossy().starts_with('~'));
    assert!(settings.dataset.ends_with("net.txt"));
}

#[test]
fn given_settings_when_serialized_then_round_trips_through_toml() {
    let settings = Settings {
        max_users: 7,
        ..Settings::default()
    };

    let text = settings.to_toml().unwrap();

    assert!(text.contains("max_users = 7"));
    assert!(text.contains("dataset = \"veriseti.txt\""));
}
