//! # Configuration Module
//!
//! This module provides the configuration structure and validation for preview card
//! generation. It is the common interface between the CLI and the compositor.
//!
//! ## Configuration Parameters
//!
//! | Parameter | Type | Range | Description |
//! |-----------|------|-------|-------------|
//! | `input` | `PathBuf` | Existing image file | Source logo |
//! | `output` | `PathBuf` | Writable location | PNG to create or replace |
//! | `width` | `u32` | 1-8192 | Canvas width in pixels |
//! | `height` | `u32` | 1-8192 | Canvas height in pixels |
//! | `fraction` | `f64` | (0, 1] | Share of each axis the logo may occupy |
//! | `bias` | `f64` | [0, 1] | Share of leftover height placed above the logo |
//! | `background` | `[u8; 4]` | RGBA | Canvas fill color |
//!
//! ## Layout Presets
//!
//! - `discord`: fraction 0.45, bias 0.75 (default)
//! - `balanced`: fraction 0.60, bias 0.55
//!
//! ## Examples
//!
//! ```rust
//! use og_card::config::OgConfig;
//! use og_scale::presets::LayoutPreset;
//!
//! let config = OgConfig::new("assets/logo.png", "assets/logo-og.png")
//!     .with_preset(LayoutPreset::Balanced);
//!
//! assert!(config.validate().is_ok());
//! let options = config.to_compose_options();
//! assert_eq!(options.fraction, 0.6);
//! ```

use std::path::{Path, PathBuf};

use og_scale::presets::{LayoutPreset, OG_HEIGHT, OG_WIDTH, Size};

/// Largest canvas side accepted. Platforms downscale anything past 1200 wide anyway.
pub const MAX_CANVAS_SIDE: u32 = 8192;

/// Opaque white.
pub const DEFAULT_BACKGROUND: [u8; 4] = [255, 255, 255, 255];

/// Configuration for one preview card run.
#[derive(Debug, Clone, PartialEq)]
pub struct OgConfig {
    /// Source logo path. Any format the `image` crate can decode.
    pub input: PathBuf,

    /// Output PNG path. The parent directory must exist and be writable.
    pub output: PathBuf,

    /// Canvas width in pixels.
    pub width: u32,

    /// Canvas height in pixels.
    pub height: u32,

    /// Bounding-box fraction.
    pub fraction: f64,

    /// Vertical bias: 0 pins the logo to the top, 1 to the bottom.
    pub bias: f64,

    /// Canvas fill color as RGBA. A non-opaque alpha produces an RGBA PNG.
    pub background: [u8; 4],
}

impl Default for OgConfig {
    /// Default values:
    /// - `input`: "public/logo.png"
    /// - `output`: "public/logo-og.png"
    /// - 1200×630 canvas, `discord` preset, white background
    fn default() -> Self {
        Self::new("public/logo.png", "public/logo-og.png")
    }
}

impl OgConfig {
    /// Creates a configuration with the default canvas, preset and background.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        let preset = LayoutPreset::default();
        Self {
            input: input.into(),
            output: output.into(),
            width: OG_WIDTH,
            height: OG_HEIGHT,
            fraction: preset.fraction(),
            bias: preset.bias(),
            background: DEFAULT_BACKGROUND,
        }
    }

    /// Replace fraction and bias with the values of `preset`.
    pub fn with_preset(mut self, preset: LayoutPreset) -> Self {
        self.fraction = preset.fraction();
        self.bias = preset.bias();
        self
    }

    /// Validates the configuration parameters.
    ///
    /// # Validation Rules
    ///
    /// - `width` and `height` must be between 1 and [`MAX_CANVAS_SIDE`]
    /// - `fraction` must be in `(0, 1]`
    /// - `bias` must be in `[0, 1]`
    /// - `input` and `output` must not be the same path
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_CANVAS_SIDE).contains(&self.width) {
            return Err(format!("Width must be between 1 and {}", MAX_CANVAS_SIDE));
        }
        if !(1..=MAX_CANVAS_SIDE).contains(&self.height) {
            return Err(format!("Height must be between 1 and {}", MAX_CANVAS_SIDE));
        }
        if !(self.fraction > 0.0 && self.fraction <= 1.0) {
            return Err("Fraction must be greater than 0 and at most 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.bias) {
            return Err("Bias must be between 0 and 1".to_string());
        }
        if self.output.as_os_str().is_empty() {
            return Err("Output path must not be empty".to_string());
        }
        if self.input == self.output {
            return Err("Output path must differ from the input path".to_string());
        }
        Ok(())
    }

    /// Convert to ComposeOptions for use with the compositor.
    pub fn to_compose_options(&self) -> crate::ComposeOptions {
        crate::ComposeOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            canvas: Size {
                w: self.width,
                h: self.height,
            },
            fraction: self.fraction,
            bias: self.bias,
            background: self.background,
        }
    }
}

/// Output path used when none is given: `<stem>-og.png` next to the input.
///
/// ```rust
/// use std::path::Path;
/// use og_card::config::default_output_for;
///
/// assert_eq!(default_output_for(Path::new("public/logo.svg.png")), Path::new("public/logo.svg-og.png"));
/// assert_eq!(default_output_for(Path::new("logo.jpg")), Path::new("logo-og.png"));
/// ```
pub fn default_output_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{}-og.png", stem))
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional) into RGBA.
pub fn parse_hex_color(value: &str) -> Result<[u8; 4], String> {
    let hex = value.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("Invalid color: {}. Use #rgb, #rrggbb or #rrggbbaa", value));
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
    match hex.len() {
        3 => {
            let mut rgba = [255u8; 4];
            for (i, c) in hex.chars().enumerate() {
                // single digit expands to a repeated pair: f → ff
                let d = c.to_digit(16).unwrap_or(0) as u8;
                rgba[i] = d * 17;
            }
            Ok(rgba)
        }
        6 => Ok([channel(0)?, channel(2)?, channel(4)?, 255]),
        8 => Ok([channel(0)?, channel(2)?, channel(4)?, channel(6)?]),
        _ => Err(format!("Invalid color: {}. Use #rgb, #rrggbb or #rrggbbaa", value)),
    }
}
