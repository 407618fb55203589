//! Loading datasets from files.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use socgraph::application::{load_file, ApplicationError, LoadReport};
use socgraph::config::Settings;
use socgraph::util::testing;

#[test]
fn given_sample_dataset_when_loading_then_counts_and_skips() {
    testing::init_test_setup();

    // Act
    let (network, report) = load_file(
        Path::new("tests/resources/veriseti.txt"),
        &Settings::default(),
    )
    .unwrap();

    // Assert
    assert_eq!(
        report,
        LoadReport {
            users: 8,
            friendships: 6,
            rejected_users: 1,
            ignored_friendships: 1,
            malformed_lines: 2,
        }
    );
    assert_eq!(network.user(3).unwrap().name, "Cem");
    assert_eq!(network.index().len(), 8);
    assert!(network.index().validate().is_ok());
}

#[test]
fn given_capacity_limit_when_loading_then_extra_users_rejected() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("net.txt");
    fs::write(&path, "USER 1 A\nUSER 2 B\nUSER 3 C\nFRIEND 1 3\nFRIEND 1 2\n").unwrap();
    let settings = Settings {
        max_users: 2,
        ..Settings::default()
    };

    // Act
    let (network, report) = load_file(&path, &settings).unwrap();

    // Assert
    assert_eq!(network.directory().len(), 2);
    assert_eq!(report.rejected_users, 1);
    assert_eq!(report.ignored_friendships, 1);
    assert_eq!(report.friendships, 1);
}

#[test]
fn given_long_name_when_loading_then_truncated_to_limit() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("net.txt");
    let long_name = "x".repeat(80);
    fs::write(&path, format!("USER 1 {long_name}\n")).unwrap();

    let (network, _) = load_file(&path, &Settings::default()).unwrap();

    assert_eq!(network.user(1).unwrap().name.chars().count(), 49);
}

#[test]
fn given_friendship_before_users_when_loading_then_ignored() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("net.txt");
    fs::write(&path, "FRIEND 1 2\nUSER 1 A\nUSER 2 B\n").unwrap();

    let (network, report) = load_file(&path, &Settings::default()).unwrap();

    assert_eq!(network.graph().edge_count(), 0);
    assert_eq!(report.ignored_friendships, 1);
}

#[test]
fn given_missing_file_when_loading_then_io_error_with_path() {
    let result = load_file(Path::new("/nonexistent/veriseti.txt"), &Settings::default());

    match result {
        Err(ApplicationError::Io { context, .. }) => {
            assert!(context.contains("/nonexistent/veriseti.txt"));
        }
        other => panic!("expected I/O error, got {:?}", other.map(|(_, r)| r)),
    }
}
