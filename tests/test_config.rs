use std::io::Write;
use std::path::{Path, PathBuf};

use homeward::config::GameConfig;
use homeward::error::GameError;

use tempfile::NamedTempFile;

fn write_ini(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn defaults() {
    let config = GameConfig::default();
    assert_eq!(config.target_fps, 60);
    assert_eq!(config.start_level, 0);
    assert_eq!(config.hold_window, 4);
    assert_eq!(config.levels_path, None);
    assert_eq!(config.log_path, PathBuf::from("homeward.log"));
    assert_eq!(config.source, None);
    assert!(config.validate().is_ok());
}

#[test]
fn missing_file_means_defaults() {
    let config = GameConfig::load(Path::new("/definitely/not/here.ini")).unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.source, None);
}

#[test]
fn values_are_read_from_file() {
    let file = write_ini(
        "[game]\ntarget_fps = 30\nstart_level = 2\n\n[input]\nhold_window = 6\n\n[files]\nlevels = custom.ron\nlog = game.log\n",
    );
    let config = GameConfig::load(file.path()).unwrap();
    assert_eq!(config.target_fps, 30);
    assert_eq!(config.start_level, 2);
    assert_eq!(config.hold_window, 6);
    assert_eq!(config.levels_path, Some(PathBuf::from("custom.ron")));
    assert_eq!(config.log_path, PathBuf::from("game.log"));
    assert_eq!(config.source.as_deref(), Some(file.path()));
}

#[test]
fn partial_file_keeps_other_defaults() {
    let file = write_ini("[input]\nhold_window = 2\n");
    let config = GameConfig::load(file.path()).unwrap();
    assert_eq!(config.hold_window, 2);
    assert_eq!(config.target_fps, 60);
    assert_eq!(config.levels_path, None);
}

#[test]
fn zero_fps_is_rejected() {
    let file = write_ini("[game]\ntarget_fps = 0\n");
    let err = GameConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, GameError::Config(_)));
}

#[test]
fn non_numeric_value_is_rejected() {
    let file = write_ini("[game]\ntarget_fps = fast\n");
    let err = GameConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, GameError::Config(_)));
}

#[test]
fn oversized_fps_is_rejected_not_truncated() {
    // 2^32 + 60 would wrap to 60 if narrowed blindly
    let file = write_ini("[game]\ntarget_fps = 4294967356\n");
    let err = GameConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, GameError::Config(_)));
}
