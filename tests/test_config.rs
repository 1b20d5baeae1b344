use std::io::Write;

use vacuum_explorer::simulation::config::Config;
use vacuum_explorer::simulation::error::ConfigError;
use vacuum_explorer::simulation::params::DEFAULT_ITERATION_LIMIT;

#[test]
fn test_load_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[agent]\nbootstrap_steps = 0\nseed = 11\n\n[world]\nwidth = 20\nheight = 10\nwall_density = 0.0"
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.agent.bootstrap_steps, 0);
    assert_eq!(config.agent.seed, Some(11));
    assert_eq!(config.agent.iteration_limit, DEFAULT_ITERATION_LIMIT);
    assert_eq!(config.world.width, 20);
    assert_eq!(config.world.height, 10);
    assert!(config.world.wall_density.abs() < f64::EPSILON);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_invalid_values_rejected_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[world]\ndirt_density = -0.1").unwrap();
    let err = Config::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_unknown_type_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[agent]\nwidth = \"wide\"").unwrap();
    let err = Config::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
