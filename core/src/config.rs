//! Style configuration loading and saving
//!
//! The configuration store proper belongs to the host application; this
//! module only reads and writes the TOML file the preview tooling uses.

use std::fs;
use std::path::{Path, PathBuf};

use dispel_types::StyleConfig;
use thiserror::Error;

/// Errors that can occur during config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Serialize error for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        source: toml::ser::Error,
    },
}

/// Default location of the style config file.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("dispel").join("overlay.toml"))
}

/// Parse a style config from TOML text. Numeric fields are clamped.
pub fn parse_style_config(contents: &str, path: &Path) -> Result<StyleConfig, ConfigError> {
    toml::from_str::<StyleConfig>(contents)
        .map(|cfg| cfg.validated())
        .map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Load a style config file.
pub fn load_style_config(path: &Path) -> Result<StyleConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_style_config(&contents, path)
}

/// Load a style config, falling back to defaults on any error.
pub fn load_or_default(path: &Path) -> StyleConfig {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No style config file, using defaults");
        return StyleConfig::default();
    }
    match load_style_config(path) {
        Ok(cfg) => {
            tracing::debug!(path = %path.display(), "Loaded style config");
            cfg
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load style config, using defaults");
            StyleConfig::default()
        }
    }
}

/// Save a style config, creating parent directories as needed.
pub fn save_style_config(path: &Path, config: &StyleConfig) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config).map_err(|e| ConfigError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(path, contents).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
