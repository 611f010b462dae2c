//! Configuration loading and discovery for `pfx.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::PfxConfig;
use crate::pixel::BlendMode;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file
pub const CONFIG_FILE: &str = "pfx.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pfx.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Extra asset roots, searched before the configured ones
    pub roots: Vec<PathBuf>,
    /// Override blend mode
    pub mode: Option<BlendMode>,
    /// Override wash opacity
    pub opacity: Option<f64>,
    /// Override blend intensity
    pub intensity: Option<f64>,
    /// Override ring color
    pub border_color: Option<String>,
    /// Override blink delay
    pub delay_ms: Option<u32>,
    /// Override blink looping
    pub looping: Option<bool>,
    /// Override log filter
    pub log_level: Option<String>,
}

/// Find pfx.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for pfx.toml
/// 2. Check XDG_CONFIG_HOME/pixelfx/pfx.toml (or ~/.config/pixelfx/pfx.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find pfx.toml in XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("pixelfx").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find pfx.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a pfx.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// Relative asset roots are resolved against the directory holding the file.
pub fn load_config(path: Option<&Path>) -> Result<PfxConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading config");
            load_config_file(&p)
        }
        None => Ok(PfxConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<PfxConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: PfxConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    if let Some(root) = path.parent() {
        config.assets.roots =
            config.assets.roots.iter().map(|r| resolve_path(root, r)).collect();
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The merged config
/// is validated again so a bad flag is reported the same way as a bad file.
pub fn merge_cli_overrides(
    config: &mut PfxConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if !overrides.roots.is_empty() {
        let mut roots = overrides.roots.clone();
        roots.append(&mut config.assets.roots);
        config.assets.roots = roots;
    }
    if let Some(mode) = overrides.mode {
        config.defaults.mode = mode;
    }
    if let Some(opacity) = overrides.opacity {
        config.defaults.opacity = opacity;
    }
    if let Some(intensity) = overrides.intensity {
        config.defaults.intensity = intensity;
    }
    if let Some(ref color) = overrides.border_color {
        config.defaults.border_color = color.clone();
    }
    if let Some(delay_ms) = overrides.delay_ms {
        config.defaults.delay_ms = delay_ms;
    }
    if let Some(looping) = overrides.looping {
        config.defaults.looping = looping;
    }
    if let Some(ref level) = overrides.log_level {
        config.logging.level = level.clone();
    }

    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()))
    }
}

/// Resolve a path relative to the config directory.
///
/// If the path is absolute, returns it unchanged.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
