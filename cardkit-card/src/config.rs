//! Host configuration.
//!
//! Everything has a default, so an empty JSON object is a valid config:
//!
//! ```json
//! { "viewport": { "width": 1280, "height": 800 }, "text": { "font_size": 16 } }
//! ```

use cardkit_text::{TextEngine, TextStyle};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error("Invalid text metrics: {0}")]
    InvalidMetrics(String),
}

/// Size of the page the host lays out into, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub font_size: f32,
    pub line_height: f32,
    /// Text layouts kept in the engine's LRU cache.
    pub cache_capacity: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        let style = TextStyle::default();
        Self {
            font_size: style.font_size,
            line_height: style.line_height,
            cache_capacity: TextEngine::DEFAULT_CACHE_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub viewport: Viewport,
    pub text: TextConfig,
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl HostConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Viewport { width, height } = self.viewport;
        if !positive(width) || !positive(height) {
            return Err(ConfigError::InvalidViewport { width, height });
        }

        let text = &self.text;
        for (name, value) in [
            ("font_size", text.font_size),
            ("line_height", text.line_height),
        ] {
            if !positive(value) {
                return Err(ConfigError::InvalidMetrics(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Base style for body text.
    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            font_size: self.text.font_size,
            line_height: self.text.line_height,
            ..TextStyle::default()
        }
    }

    pub fn text_engine(&self) -> TextEngine {
        TextEngine::with_capacity(self.text.cache_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = HostConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.viewport.width, 1280.0);
        assert_eq!(config.text.font_size, 16.0);
        assert_eq!(config.text_style().line_height, 24.0);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = HostConfig::from_json(r#"{ "viewport": { "width": 640 } }"#).unwrap();
        assert_eq!(config.viewport.width, 640.0);
        assert_eq!(config.viewport.height, 800.0);
        assert_eq!(config.text, TextConfig::default());

        assert_eq!(HostConfig::from_json("{}").unwrap(), HostConfig::default());
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            HostConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            HostConfig::from_json(r#"{ "viewport": { "width": 0 } }"#),
            Err(ConfigError::InvalidViewport { .. })
        ));
        let err = HostConfig::from_json(r#"{ "text": { "line_height": -1 } }"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid text metrics: line_height must be positive, got -1"
        );
    }

    #[test]
    fn test_text_engine_uses_configured_size() {
        let small = HostConfig::default();
        let mut large = HostConfig::default();
        large.text.font_size = 32.0;

        let narrow = small.text_engine().measure("abcd", &small.text_style());
        let wide = large.text_engine().measure("abcd", &large.text_style());
        assert!((wide - 2.0 * narrow).abs() < 0.01);
    }

    #[test]
    fn test_zero_cache_capacity_still_works() {
        let config = HostConfig::from_json(r#"{ "text": { "cache_capacity": 0 } }"#).unwrap();
        let mut engine = config.text_engine();
        engine.measure("a", &config.text_style());
        engine.measure("a", &config.text_style());
        assert_eq!(engine.cache_stats(), (1, 1));
    }
}
