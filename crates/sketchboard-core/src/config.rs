//! Canvas configuration.

use crate::shapes::SerializableColor;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for drawing defaults, hit testing and image uploads.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Stage width in pixels.
    pub stage_width: f64,
    /// Stage height in pixels.
    pub stage_height: f64,
    /// Fill color for new rectangles, circles and triangles.
    pub fill_color: SerializableColor,
    /// Stroke color for new shapes and pen strokes.
    pub stroke_color: SerializableColor,
    /// Stroke width for new rectangles, circles and triangles.
    pub stroke_width: f64,
    /// Stroke width for pen strokes.
    pub pen_stroke_width: f64,
    /// Extra distance around a shape that still counts as a hit.
    pub hit_tolerance: f64,
    /// Distance from a handle center that counts as grabbing it.
    pub handle_tolerance: f64,
    /// Largest accepted image upload, in bytes.
    pub max_image_bytes: usize,
    /// Uploaded images are scaled down to fit this box.
    pub max_image_width: f64,
    pub max_image_height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            stage_width: 1280.0,
            stage_height: 800.0,
            fill_color: SerializableColor::light_gray(),
            stroke_color: SerializableColor::black(),
            stroke_width: 1.0,
            pen_stroke_width: 5.0,
            hit_tolerance: 2.0,
            handle_tolerance: 8.0,
            max_image_bytes: 20 * 1024 * 1024,
            max_image_width: 800.0,
            max_image_height: 600.0,
        }
    }
}

impl CanvasConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded canvas config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CanvasConfig::default();
        assert_eq!(config.fill_color.to_hex(), "#cccccc");
        assert_eq!(config.stroke_color.to_hex(), "#000000");
        assert!((config.pen_stroke_width - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CanvasConfig::from_json(r##"{ "fill_color": "#f00", "hit_tolerance": 4 }"##).unwrap();
        assert_eq!(config.fill_color, SerializableColor::new(255, 0, 0, 255));
        assert!((config.hit_tolerance - 4.0).abs() < f64::EPSILON);
        assert_eq!(config.stroke_color, SerializableColor::black());
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let err = CanvasConfig::from_json(r#"{ "fill_color": "gray" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "stage_width": 640, "stage_height": 480 }}"#).unwrap();

        let config = CanvasConfig::load(file.path()).unwrap();
        assert!((config.stage_width - 640.0).abs() < f64::EPSILON);
        assert!((config.stage_height - 480.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CanvasConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
