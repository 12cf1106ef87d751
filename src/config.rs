//! Collage configuration.
//!
//! Settings come from three layers, each overriding the one before:
//!
//! ```text
//! stock defaults  ←  config file (--config)  ←  command-line flags
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [canvas]
//! width = 1000              # Output width in pixels
//! height = 1000             # Output height in pixels
//! margin = 10               # Gutter between cells and around the edge
//! background = "#ffffff"    # Colour of uncovered areas
//!
//! [output]
//! quality = 90              # JPEG quality (1-100); ignored for lossless formats
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::collage::CollageOptions;
use crate::imaging::Quality;
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Collage configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollageConfig {
    /// Canvas size, spacing and colour.
    pub canvas: CanvasConfig,
    /// Encoding settings for the output file.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Pixels between adjacent cells and between cells and the canvas edge.
    pub margin: u32,
    /// `#rrggbb` or `#rgb`.
    pub background: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            margin: 10,
            background: "#ffffff".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

/// Values supplied on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub margin: Option<u32>,
    pub background: Option<String>,
    pub quality: Option<u32>,
}

impl CollageConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Validation(
                "canvas.width and canvas.height must be positive".into(),
            ));
        }
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        parse_hex_color(&self.canvas.background)?;
        Ok(())
    }

    /// Layer command-line values on top, then re-validate.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(w) = overrides.width {
            self.canvas.width = w;
        }
        if let Some(h) = overrides.height {
            self.canvas.height = h;
        }
        if let Some(m) = overrides.margin {
            self.canvas.margin = m;
        }
        if let Some(bg) = overrides.background {
            self.canvas.background = bg;
        }
        if let Some(q) = overrides.quality {
            self.output.quality = q;
        }
        self.validate()?;
        Ok(self)
    }

    /// Convert to the options the collage builder consumes.
    pub fn to_options(&self) -> Result<CollageOptions, ConfigError> {
        Ok(CollageOptions {
            width: self.canvas.width,
            height: self.canvas.height,
            margin: self.canvas.margin,
            background: parse_hex_color(&self.canvas.background)?,
            quality: Quality::new(self.output.quality),
        })
    }
}

/// Parse `#rrggbb` or `#rgb` (the leading `#` is optional).
pub fn parse_hex_color(value: &str) -> Result<Rgb<u8>, ConfigError> {
    let invalid = || ConfigError::Validation(format!("invalid colour '{value}', expected #rrggbb"));
    let hex = value.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        6 => Ok(Rgb([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ])),
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, c) in rgb.iter_mut().zip(hex.chars()) {
                *slot = channel(&format!("{c}{c}"))?;
            }
            Ok(Rgb(rgb))
        }
        _ => Err(invalid()),
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CollageConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<CollageConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CollageConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from an optional file.
///
/// `None` yields the stock defaults. A path that does not exist is an error:
/// the user asked for that file explicitly.
pub fn load_config(path: Option<&Path>) -> Result<CollageConfig, ConfigError> {
    let overlay = match path {
        Some(p) => {
            let content = fs::read_to_string(p)?;
            Some(toml::from_str::<toml::Value>(&content)?)
        }
        None => None,
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Photo Collage Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags win over this file.

# ---------------------------------------------------------------------------
# Canvas
# ---------------------------------------------------------------------------
[canvas]
# Output size in pixels.
width = 1000
height = 1000

# Gap in pixels between neighbouring cells and around the outer edge.
# Images are placed in a square grid of ceil(sqrt(count)) rows and columns;
# each cell is (width - (grid + 1) * margin) / grid pixels wide.
margin = 10

# Colour shown wherever no image covers the canvas (#rrggbb or #rgb).
background = "#ffffff"

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# JPEG quality (1 = worst, 100 = best). PNG, BMP and GIF ignore it.
quality = 90
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = CollageConfig::default();
        assert_eq!(config.canvas.width, 1000);
        assert_eq!(config.canvas.height, 1000);
        assert_eq!(config.canvas.margin, 10);
        assert_eq!(config.canvas.background, "#ffffff");
        assert_eq!(config.output.quality, 90);
    }

    #[test]
    fn default_config_passes_validation() {
        assert!(CollageConfig::default().validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[canvas]
margin = 4
"##;
        let config: CollageConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.canvas.margin, 4);
        // Default values preserved
        assert_eq!(config.canvas.width, 1000);
        assert_eq!(config.output.quality, 90);
    }

    #[test]
    fn unknown_key_rejected() {
        let toml = r#"
[canvas]
widht = 500
"#;
        let result: Result<CollageConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<CollageConfig, _> = toml::from_str("[layout]\ncolumns = 3\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_without_file_is_default() {
        assert_eq!(load_config(None).unwrap(), CollageConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("collage.toml");
        fs::write(
            &path,
            r##"
[canvas]
width = 1920
height = 1080
background = "#000000"

[output]
quality = 75
"##,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.canvas.width, 1920);
        assert_eq!(config.canvas.height, 1080);
        assert_eq!(config.canvas.margin, 10);
        assert_eq!(config.canvas.background, "#000000");
        assert_eq!(config.output.quality, 75);
    }

    #[test]
    fn load_config_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(Some(&tmp.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("collage.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let result = load_config(Some(&path));
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("collage.toml");
        fs::write(&path, "[output]\nquality = 0\n").unwrap();

        let result = load_config(Some(&path));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_nested_table_merge() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[canvas]\nwidth = 10").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["canvas"]["width"].as_integer(), Some(10));
        assert_eq!(merged["canvas"]["height"].as_integer(), Some(1000));
        assert_eq!(merged["output"]["quality"].as_integer(), Some(90));
    }

    // =========================================================================
    // Overrides and validation
    // =========================================================================

    #[test]
    fn overrides_win_over_config() {
        let config = CollageConfig::default()
            .with_overrides(Overrides {
                width: Some(640),
                margin: Some(0),
                ..Overrides::default()
            })
            .unwrap();
        assert_eq!(config.canvas.width, 640);
        assert_eq!(config.canvas.height, 1000);
        assert_eq!(config.canvas.margin, 0);
    }

    #[test]
    fn overrides_are_validated() {
        let result = CollageConfig::default().with_overrides(Overrides {
            height: Some(0),
            ..Overrides::default()
        });
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn bad_background_rejected() {
        let result = CollageConfig::default().with_overrides(Overrides {
            background: Some("white".into()),
            ..Overrides::default()
        });
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn to_options_carries_every_value() {
        let config = CollageConfig::default()
            .with_overrides(Overrides {
                width: Some(300),
                height: Some(200),
                margin: Some(5),
                background: Some("#102030".into()),
                quality: Some(60),
            })
            .unwrap();
        let options = config.to_options().unwrap();
        assert_eq!(options.width, 300);
        assert_eq!(options.height, 200);
        assert_eq!(options.margin, 5);
        assert_eq!(options.background, Rgb([0x10, 0x20, 0x30]));
        assert_eq!(options.quality.value(), 60);
    }

    #[test]
    fn parse_hex_color_forms() {
        assert_eq!(parse_hex_color("#ffffff").unwrap(), Rgb([255, 255, 255]));
        assert_eq!(parse_hex_color("0a0B0c").unwrap(), Rgb([10, 11, 12]));
        assert_eq!(parse_hex_color("#f80").unwrap(), Rgb([255, 136, 0]));
        assert!(parse_hex_color("#ff").is_err());
        assert!(parse_hex_color("#gggggg").is_err());
        assert!(parse_hex_color("").is_err());
    }

    // =========================================================================
    // stock config
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: CollageConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, CollageConfig::default());
    }
}
