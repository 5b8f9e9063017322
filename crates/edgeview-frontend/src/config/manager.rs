//! Configuration manager for loading and saving the app configuration

use std::path::{Path, PathBuf};

use super::AppConfig;

/// Configuration error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// Error during deserialization
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

/// Loads, holds and saves the app configuration
pub struct ConfigManager {
    config: AppConfig,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a manager for the OS-standard location, loading the file if it parses
    pub fn new() -> Self {
        let config_path = Self::default_config_path();
        let config = Self::load_from_path(&config_path).unwrap_or_else(|| {
            tracing::info!("No config file found, using defaults");
            AppConfig::new()
        });

        Self {
            config,
            config_path,
        }
    }

    /// Create a manager for an explicit path.
    ///
    /// A missing file yields defaults; a file that exists but does not parse
    /// is an error.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let config_path = path.into();
        let config = if config_path.exists() {
            let config = Self::read(&config_path)?;
            tracing::info!("Loaded config from {:?}", config_path);
            config
        } else {
            tracing::info!("Config file {:?} not found, using defaults", config_path);
            AppConfig::new()
        };

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Get the OS-standard configuration directory
    fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("edgeview")
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join("config.ron")
    }

    fn read(path: &Path) -> Result<AppConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Load configuration from a file path
    fn load_from_path(path: &Path) -> Option<AppConfig> {
        if !path.exists() {
            return None;
        }
        match Self::read(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file: {}", e);
                None
            }
        }
    }

    /// Get a reference to the current configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a mutable reference to the configuration
    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    /// Write the configuration to disk
    pub fn write(&self) -> Result<(), ConfigError> {
        // Ensure config directory exists
        if let Some(parent) = self.config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let content = ron::ser::to_string_pretty(&self.config, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::write(&self.config_path, &content).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::info!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    /// Get the config file path (for display purposes)
    pub fn config_file_path(&self) -> &Path {
        &self.config_path
    }
}
