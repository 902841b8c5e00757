pub mod config;

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

pub use config::{BackendConfig, Config, ConfigStorage, GeneralConfig, TomlConfigStorage};

/// Ensure data and config directories exist
/// Returns (data_dir, config_dir)
///
/// - Windows: %LOCALAPPDATA%\clipfall and %APPDATA%\clipfall
/// - Elsewhere (XDG): $XDG_DATA_HOME/clipfall and $XDG_CONFIG_HOME/clipfall,
///   defaulting to ~/.local/share/clipfall and ~/.config/clipfall
pub fn ensure_directories() -> Result<(PathBuf, PathBuf)> {
    let (data_dir, config_dir) = resolve_directories()?;

    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

    fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;

    log::debug!("Data directory: {:?}", data_dir);
    log::debug!("Config directory: {:?}", config_dir);

    Ok((data_dir, config_dir))
}

fn resolve_directories() -> Result<(PathBuf, PathBuf)> {
    if let Ok(app_data) = env::var("APPDATA") {
        let config_dir = PathBuf::from(&app_data).join("clipfall");
        let data_dir = env::var("LOCALAPPDATA")
            .map(|local| PathBuf::from(local).join("clipfall"))
            .unwrap_or_else(|_| config_dir.clone());
        return Ok((data_dir, config_dir));
    }

    let home = env::var("HOME").context("Neither APPDATA nor HOME environment variable is set")?;
    let home_path = PathBuf::from(home);

    let data_dir = if let Ok(xdg_data) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("clipfall")
    } else {
        home_path.join(".local/share/clipfall")
    };

    let config_dir = if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("clipfall")
    } else {
        home_path.join(".config/clipfall")
    };

    Ok((data_dir, config_dir))
}
