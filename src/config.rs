// src/config.rs - Tunables for calibration, measurement and display

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{RootLengthError, Result};

/// Configuration for RootLengthR
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Threshold used for the first binarization pass
    #[serde(default = "default_initial_threshold")]
    pub initial_threshold: u8,

    // Zoom / pan
    #[serde(default = "default_zoom_size")]
    pub zoom_size: u32,

    #[serde(default = "default_zoom_step")]
    pub zoom_step: u32,

    // Reference crop taken from the top-left corner of the scan
    #[serde(default = "default_reference_view_width")]
    pub reference_view_width: u32,

    #[serde(default = "default_reference_view_height")]
    pub reference_view_height: u32,

    #[serde(default = "default_reference_cursor_start")]
    pub reference_cursor_start: [u32; 2],

    /// Edge length of the calibration markers in pixels
    #[serde(default = "default_marker_size")]
    pub marker_size: u32,

    // Window size used by the minifb frontend
    #[serde(default = "default_window_width")]
    pub window_width: usize,

    #[serde(default = "default_window_height")]
    pub window_height: usize,

    #[serde(default)]
    pub filter: ShapeFilter,

    #[serde(default)]
    pub annotation: AnnotationStyle,
}

/// Bounding box limits for a contour to count as a root.
///
/// The limits are named for an upright root in the source image. Measurement
/// happens on the image rotated by 90°, so `root_height_*` bound the rotated
/// box *width* and `root_width_max` bounds the rotated box *height*.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct ShapeFilter {
    #[serde(default = "default_root_width_max")]
    pub root_width_max: u32,

    #[serde(default = "default_root_height_min")]
    pub root_height_min: u32,

    #[serde(default = "default_root_height_max")]
    pub root_height_max: u32,
}

/// Colors and geometry of the annotations burned into the output images
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AnnotationStyle {
    #[serde(default = "default_primary_rgb")]
    pub primary_rgb: [u8; 3],

    /// Colors cycled by contour index in multi-color mode
    #[serde(default = "default_palette_rgb")]
    pub palette_rgb: [[u8; 3]; 4],

    #[serde(default = "default_line_thickness")]
    pub line_thickness: u32,

    /// Integer upscale of the 5x7 label glyphs
    #[serde(default = "default_label_scale")]
    pub label_scale: u32,

    /// Horizontal gap between a bounding box and its label
    #[serde(default = "default_label_offset")]
    pub label_offset: i32,
}

fn default_initial_threshold() -> u8 {
    128
}

fn default_zoom_size() -> u32 {
    2000
}

fn default_zoom_step() -> u32 {
    100
}

fn default_reference_view_width() -> u32 {
    300
}

fn default_reference_view_height() -> u32 {
    600
}

fn default_reference_cursor_start() -> [u32; 2] {
    [100, 100]
}

fn default_marker_size() -> u32 {
    50
}

fn default_window_width() -> usize {
    1280
}

fn default_window_height() -> usize {
    800
}

fn default_root_width_max() -> u32 {
    50
}

fn default_root_height_min() -> u32 {
    50
}

fn default_root_height_max() -> u32 {
    1000
}

fn default_primary_rgb() -> [u8; 3] {
    [0, 255, 0] // Green
}

fn default_palette_rgb() -> [[u8; 3]; 4] {
    [
        [0, 255, 0],     // Green
        [0, 255, 255],   // Cyan
        [255, 255, 0],   // Yellow
        [255, 127, 255], // Pink
    ]
}

fn default_line_thickness() -> u32 {
    2
}

fn default_label_scale() -> u32 {
    3
}

fn default_label_offset() -> i32 {
    10
}

impl Default for ShapeFilter {
    fn default() -> Self {
        Self {
            root_width_max: default_root_width_max(),
            root_height_min: default_root_height_min(),
            root_height_max: default_root_height_max(),
        }
    }
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            primary_rgb: default_primary_rgb(),
            palette_rgb: default_palette_rgb(),
            line_thickness: default_line_thickness(),
            label_scale: default_label_scale(),
            label_offset: default_label_offset(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_threshold: default_initial_threshold(),
            zoom_size: default_zoom_size(),
            zoom_step: default_zoom_step(),
            reference_view_width: default_reference_view_width(),
            reference_view_height: default_reference_view_height(),
            reference_cursor_start: default_reference_cursor_start(),
            marker_size: default_marker_size(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            filter: ShapeFilter::default(),
            annotation: AnnotationStyle::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RootLengthError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| RootLengthError::ConfigLoad {
            source: e,
            path: path.to_path_buf(),
        })?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.filter.root_width_max == 0 {
            return Err(RootLengthError::Config(
                "filter.root_width_max must be > 0".to_string(),
            ));
        }

        if self.filter.root_height_min >= self.filter.root_height_max {
            return Err(RootLengthError::Config(
                "filter.root_height_min must be < filter.root_height_max".to_string(),
            ));
        }

        if self.zoom_size == 0 || self.zoom_step == 0 {
            return Err(RootLengthError::Config(
                "zoom_size and zoom_step must be > 0".to_string(),
            ));
        }

        if self.reference_view_width == 0 || self.reference_view_height == 0 {
            return Err(RootLengthError::Config(
                "reference_view_width and reference_view_height must be > 0".to_string(),
            ));
        }

        if self.window_width == 0 || self.window_height == 0 {
            return Err(RootLengthError::Config(
                "window_width and window_height must be > 0".to_string(),
            ));
        }

        if self.annotation.line_thickness == 0 {
            return Err(RootLengthError::Config(
                "annotation.line_thickness must be > 0".to_string(),
            ));
        }

        if self.annotation.label_scale == 0 {
            return Err(RootLengthError::Config(
                "annotation.label_scale must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            RootLengthError::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_compiled_constants() {
        let config = Config::default();
        assert_eq!(config.initial_threshold, 128);
        assert_eq!(config.zoom_size, 2000);
        assert_eq!(config.zoom_step, 100);
        assert_eq!((config.reference_view_width, config.reference_view_height), (300, 600));
        assert_eq!(config.filter.root_width_max, 50);
        assert_eq!(config.filter.root_height_min, 50);
        assert_eq!(config.filter.root_height_max, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            "initial_threshold = 90\n[filter]\nroot_height_max = 400\n",
        )
        .unwrap();

        assert_eq!(config.initial_threshold, 90);
        assert_eq!(config.filter.root_height_max, 400);
        assert_eq!(config.filter.root_height_min, 50);
        assert_eq!(config.annotation, AnnotationStyle::default());
    }

    #[test]
    fn inverted_height_limits_are_rejected() {
        let mut config = Config::default();
        config.filter.root_height_min = 1000;
        assert!(matches!(config.validate(), Err(RootLengthError::Config(_))));
    }

    #[test]
    fn zero_label_scale_is_rejected() {
        let mut config = Config::default();
        config.annotation.label_scale = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn saved_config_loads_back() {
        let path = std::env::temp_dir().join(format!("root_length_cfg_{}.toml", std::process::id()));
        let mut config = Config::default();
        config.zoom_step = 250;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn malformed_file_reports_path() {
        let path = std::env::temp_dir().join(format!("root_length_bad_{}.toml", std::process::id()));
        fs::write(&path, "zoom_size = \"big\"").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, RootLengthError::ConfigLoad { .. }));
    }
}
