//! Configuration schema types for `pfx.toml`
//!
//! Defines the structure and validation rules for pixelfx configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::color::parse_hex;
use crate::pixel::BlendMode;

/// Asset lookup settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AssetsConfig {
    /// Directories searched (after the working directory) for input images
    #[serde(default)]
    pub roots: Vec<PathBuf>,
}

/// Default transform parameters used when a flag is omitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Blend mode for `color`
    #[serde(default)]
    pub mode: BlendMode,
    /// Wash opacity for `color`
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Blend intensity for `color`
    #[serde(default = "default_intensity")]
    pub intensity: f64,
    /// Ring color for `circle`, as `#rgb` or `#rrggbb`
    #[serde(default = "default_border_color")]
    pub border_color: String,
    /// Per-frame delay for `blink`
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u32,
    /// Whether `blink` animations repeat forever
    #[serde(default = "default_true", rename = "loop")]
    pub looping: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mode: BlendMode::default(),
            opacity: default_opacity(),
            intensity: default_intensity(),
            border_color: default_border_color(),
            delay_ms: default_delay_ms(),
            looping: default_true(),
        }
    }
}

fn default_opacity() -> f64 {
    0.5
}

fn default_intensity() -> f64 {
    1.0
}

fn default_border_color() -> String {
    "#000000".to_string()
}

fn default_delay_ms() -> u32 {
    500
}

fn default_true() -> bool {
    true
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter (e.g. "warn", "pixelfx=debug")
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_level() }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

/// Complete pfx.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PfxConfig {
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "defaults.opacity")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pfx.toml: '{}' {}", self.field, self.message)
    }
}

impl PfxConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        for (field, value) in
            [("defaults.opacity", self.defaults.opacity), ("defaults.intensity", self.defaults.intensity)]
        {
            if !(0.0..=1.0).contains(&value) {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: format!("must be between 0 and 1, got {}", value),
                });
            }
        }

        if let Err(e) = parse_hex(&self.defaults.border_color) {
            errors.push(ConfigValidationError {
                field: "defaults.border_color".to_string(),
                message: e.to_string(),
            });
        }

        if self.logging.level.trim().is_empty() {
            errors.push(ConfigValidationError {
                field: "logging.level".to_string(),
                message: "must be a non-empty filter".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: PfxConfig = toml::from_str("").unwrap();
        assert!(config.assets.roots.is_empty());
        assert_eq!(config.defaults.mode, BlendMode::Tint);
        assert_eq!(config.defaults.opacity, 0.5);
        assert_eq!(config.defaults.delay_ms, 500);
        assert!(config.defaults.looping);
        assert_eq!(config.logging.level, "warn");
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config() {
        let toml = r##"
[assets]
roots = ["assets", "img"]

[defaults]
mode = "softlight"
opacity = 0.25
intensity = 0.75
border_color = "#fff"
delay_ms = 120
loop = false

[logging]
level = "pixelfx=debug"
"##;
        let config: PfxConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.assets.roots, vec![PathBuf::from("assets"), PathBuf::from("img")]);
        assert_eq!(config.defaults.mode, BlendMode::Softlight);
        assert_eq!(config.defaults.intensity, 0.75);
        assert_eq!(config.defaults.border_color, "#fff");
        assert_eq!(config.defaults.delay_ms, 120);
        assert!(!config.defaults.looping);
        assert_eq!(config.logging.level, "pixelfx=debug");
        assert!(config.is_valid());
    }

    #[test]
    fn test_unknown_mode_fails_to_parse() {
        let result: Result<PfxConfig, _> = toml::from_str("[defaults]\nmode = \"multiply\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let mut config = PfxConfig::default();
        config.defaults.opacity = 2.0;
        config.defaults.intensity = -1.0;
        config.defaults.border_color = "black".to_string();
        let errors = config.validate();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].to_string().contains("defaults.opacity"));
        assert!(errors[2].to_string().contains("border_color"));
    }
}
