use std::fs;
use std::path::{Path, PathBuf};

use crate::io::event_log::{self, Category, home_dir};
use crate::model::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Get the config file path, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"));
    config_dir.join("lanno").join("config.toml")
}

/// Read the config at `path`. A missing file yields the defaults.
pub fn read_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Read the config from the default location, falling back to defaults
/// (and logging why) if it cannot be used.
pub fn load_config() -> Config {
    let path = config_path();
    match read_config_from(&path) {
        Ok(config) => config,
        Err(e) => {
            event_log::warn(
                Category::Config,
                format!("ignoring {}: {}", path.display(), e),
            );
            Config::default()
        }
    }
}
