/// Integration tests for loading pour.toml from disk

use pour_solver::config::{Config, ConfigError, CONFIG_FILE};
use pour_solver::{Puzzle, SolutionCache, WaterJugService};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_load_searches_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(CONFIG_FILE),
        "[server]\nport = 9090\n\n[cache]\nttl_secs = 42\n",
    )
    .unwrap();

    let nested = temp_dir.path().join("project/src");
    fs::create_dir_all(&nested).unwrap();

    let config = Config::load(&nested).unwrap().unwrap();
    assert_eq!(config.server.port, Some(9090));
    assert_eq!(config.cache.ttl(), Duration::from_secs(42));
}

#[test]
fn test_nearest_config_wins() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(CONFIG_FILE), "[server]\nport = 1\n").unwrap();

    let project = temp_dir.path().join("project");
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join(CONFIG_FILE), "[server]\nport = 2\n").unwrap();

    let config = Config::load(&project).unwrap().unwrap();
    assert_eq!(config.server.port, Some(2));
}

#[test]
fn test_invalid_config_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE);
    fs::write(&path, "[cache]\nttl_secs = \"soon\"\n").unwrap();

    let err = Config::load(temp_dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(CONFIG_FILE));
}

#[test]
fn test_service_from_loaded_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(CONFIG_FILE), "[cache]\nenabled = false\n").unwrap();

    let config = Config::load(temp_dir.path()).unwrap().unwrap();
    let service = WaterJugService::from_config(&config.cache);

    assert_eq!(service.solve(3, 5, 4).unwrap().len(), 6);
    assert!(service.cache().get(&Puzzle::new(3, 5, 4).unwrap()).is_none());
}
