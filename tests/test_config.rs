use std::fs;
use std::path::PathBuf;

use space_shooter::config::GameConfig;
use space_shooter::error::GameError;

#[test]
fn empty_document_is_default() {
    let config = GameConfig::from_yaml("").unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.tick_millis, 16);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.seed, None);
}

#[test]
fn partial_document_keeps_other_defaults() {
    let config = GameConfig::from_yaml("seed: 99\nlogging:\n  level: debug\n").unwrap();
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.tick_millis, 16);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file, PathBuf::from("space_shooter.log"));
}

#[test]
fn invalid_yaml_is_rejected() {
    assert!(GameConfig::from_yaml("tick_millis: [fast]").is_err());
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.yaml");
    fs::write(&path, "tick_millis: 20\npilot_name: Maverick\n").unwrap();

    let config = GameConfig::load(&path).unwrap();
    assert_eq!(config.tick_millis, 20);
    assert_eq!(config.resolved_pilot_name(), "Maverick");
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, GameError::Io { .. }), "{err}");
}

#[test]
fn load_reports_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.yaml");
    fs::write(&path, "seed: not-a-number\n").unwrap();
    let err = GameConfig::load(&path).unwrap_err();
    assert!(matches!(err, GameError::Config { .. }), "{err}");
}

#[test]
fn explicit_scores_path_wins() {
    let config = GameConfig::from_yaml("scores_path: /tmp/hs.json\n").unwrap();
    assert_eq!(config.resolved_scores_path(), PathBuf::from("/tmp/hs.json"));
}

#[test]
fn default_scores_path_is_json() {
    let path = GameConfig::default().resolved_scores_path();
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
}
