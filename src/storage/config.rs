use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backends: BackendConfig,
}

/// General configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Maximum encoded image or image file size in bytes (reject larger images)
    #[serde(default = "default_max_image_size")]
    pub max_image_size_bytes: u64,

    /// Enable debug logging
    #[serde(default)]
    pub debug_logging: bool,

    /// Write logs to a rolling file in the data directory
    #[serde(default)]
    pub log_to_file: bool,

    /// Level written to the log file
    #[serde(default = "default_file_log_level")]
    pub file_log_level: String,

    /// Level echoed to stderr when logging to file
    #[serde(default = "default_console_log_level")]
    pub console_log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            max_image_size_bytes: default_max_image_size(),
            debug_logging: false,
            log_to_file: false,
            file_log_level: default_file_log_level(),
            console_log_level: default_console_log_level(),
        }
    }
}

/// Which backends may be probed; a disabled backend is never acquired
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_enabled")]
    pub fast_text: bool,
    #[serde(default = "default_enabled")]
    pub native: bool,
    #[serde(default = "default_enabled")]
    pub gui: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            fast_text: true,
            native: true,
            gui: true,
        }
    }
}

// Default value functions for serde
fn default_max_image_size() -> u64 {
    52_428_800 // 50MB
}

fn default_file_log_level() -> String {
    "info".to_string()
}

fn default_console_log_level() -> String {
    "warn".to_string()
}

fn default_enabled() -> bool {
    true
}

/// Trait for configuration storage
pub trait ConfigStorage: Send + Sync {
    /// Load configuration from file
    fn load(&self) -> Result<Config>;

    /// Save configuration to file
    fn save(&self, config: &Config) -> Result<()>;

    /// Create default configuration file if it doesn't exist
    fn create_default(&self) -> Result<()>;
}

/// TOML-based implementation of ConfigStorage
pub struct TomlConfigStorage {
    path: PathBuf,
}

impl TomlConfigStorage {
    /// Create a new TomlConfigStorage with the given path
    pub fn new(path: PathBuf) -> Self {
        TomlConfigStorage { path }
    }
}

impl ConfigStorage for TomlConfigStorage {
    fn load(&self) -> Result<Config> {
        use anyhow::Context;
        use std::fs;

        // If file doesn't exist, create default and return it
        if !self.path.exists() {
            log::info!(
                "Config file not found at {:?}, creating default configuration",
                self.path
            );
            self.create_default()?;
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config from {:?}", self.path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.path))?;

        log::info!("Loaded configuration from {:?}", self.path);
        log::debug!(
            "Config: backends fast_text={} native={} gui={}, max image {} bytes",
            config.backends.fast_text,
            config.backends.native,
            config.backends.gui,
            config.general.max_image_size_bytes
        );

        Ok(config)
    }

    fn save(&self, config: &Config) -> Result<()> {
        use anyhow::Context;
        use std::fs;

        let toml_str = toml::to_string_pretty(config)
            .with_context(|| "Failed to serialize configuration")?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        fs::write(&self.path, toml_str)
            .with_context(|| format!("Failed to write config to {:?}", self.path))?;

        log::debug!("Saved configuration to {:?}", self.path);

        Ok(())
    }

    fn create_default(&self) -> Result<()> {
        use anyhow::Context;
        use std::fs;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        // Use the example config compiled into the binary
        let example_config = include_str!("../../clipfall.toml.example");

        fs::write(&self.path, example_config)
            .with_context(|| format!("Failed to create default config at {:?}", self.path))?;

        log::info!("Created default configuration at {:?}", self.path);

        Ok(())
    }
}
