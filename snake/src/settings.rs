use log::{info, warn};
use snake_core::GameConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Where the config file lives when none is given on the command line
fn settings_path() -> Option<PathBuf> {
    settings_path_from(
        std::env::var("XDG_CONFIG_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

fn settings_path_from(xdg_config_home: Option<String>, home: Option<String>) -> Option<PathBuf> {
    // Try to use XDG config directory on Unix-like systems
    if let Some(dir) = xdg_config_home.filter(|d| !d.is_empty()) {
        Some(PathBuf::from(dir).join("snake").join("config.json"))
    } else {
        home.map(|home| PathBuf::from(home).join(".config").join("snake").join("config.json"))
    }
}

/// Load the game config. An explicit path must exist and parse. The
/// default location is optional, and a broken file there falls back to
/// defaults with a warning. Nothing is ever written back.
pub fn load(explicit: Option<&Path>) -> Result<GameConfig, SettingsError> {
    if let Some(path) = explicit {
        return read(path);
    }
    let Some(path) = settings_path() else {
        return Ok(GameConfig::default());
    };
    if !path.exists() {
        return Ok(GameConfig::default());
    }
    read(&path).or_else(|e| {
        warn!("{e}, using defaults");
        Ok(GameConfig::default())
    })
}

fn read(path: &Path) -> Result<GameConfig, SettingsError> {
    let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("snake-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_settings_path_prefers_xdg() {
        assert_eq!(
            settings_path_from(Some("/xdg".into()), Some("/home/me".into())),
            Some(PathBuf::from("/xdg/snake/config.json"))
        );
        assert_eq!(
            settings_path_from(Some(String::new()), Some("/home/me".into())),
            Some(PathBuf::from("/home/me/.config/snake/config.json"))
        );
        assert_eq!(settings_path_from(None, None), None);
    }

    #[test]
    fn test_load_explicit_file() {
        let path = scratch_file("ok.json", r#"{ "rows": 12, "tick_rate": 20 }"#);
        let config = load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.rows, 12);
        assert_eq!(config.tick_rate, 20);
        assert_eq!(config.cols, GameConfig::default().cols);
    }

    #[test]
    fn test_explicit_file_errors() {
        let missing = std::env::temp_dir().join("snake-definitely-missing.json");
        assert!(matches!(load(Some(&missing)), Err(SettingsError::Read { .. })));

        let path = scratch_file("bad.json", "{ rows: ");
        let result = load(Some(&path));
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(SettingsError::Parse { .. })));
    }
}
