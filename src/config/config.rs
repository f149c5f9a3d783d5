//! Config file handling

use std::path::{Path, PathBuf};

use crate::errors::{ArgsError, Result};

/// Environment variable that overrides the config directory
pub const CONFIG_DIR_ENV: &str = "PROCARGS_CONFIG_DIR";

/// procargs configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub config_dir: PathBuf,
    /// Flags inserted after argv[0] of every captured argument list
    pub default_options: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: Self::default_config_dir(),
            default_options: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from the config file (TOML format)
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_config_dir())
    }

    /// Load `config.toml` from `config_dir`; a missing file gives the defaults
    pub fn load_from(config_dir: &Path) -> Result<Self> {
        let config_file = config_dir.join("config.toml");

        if !config_file.exists() {
            return Ok(Self {
                config_dir: config_dir.to_path_buf(),
                default_options: Vec::new(),
            });
        }

        let content = std::fs::read_to_string(&config_file)
            .map_err(|e| ArgsError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&content, config_dir)
    }

    fn parse(content: &str, config_dir: &Path) -> Result<Self> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| ArgsError::Config(format!("Invalid config TOML: {}", e)))?;

        let default_options = match toml_value.get("defaults").and_then(|d| d.get("options")) {
            None => Vec::new(),
            Some(value) => value
                .as_array()
                .ok_or_else(|| ArgsError::Config("defaults.options must be an array".to_string()))?
                .iter()
                .map(|v| {
                    v.as_str().map(String::from).ok_or_else(|| {
                        ArgsError::Config("defaults.options entries must be strings".to_string())
                    })
                })
                .collect::<Result<Vec<_>>>()?,
        };

        Ok(Self {
            config_dir: config_dir.to_path_buf(),
            default_options,
        })
    }

    /// Get the default config directory
    fn default_config_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .map(|p| p.join("procargs"))
            .unwrap_or_else(|| PathBuf::from(".procargs"))
    }
}
