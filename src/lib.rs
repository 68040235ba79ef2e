//! # og-card
//!
//! Generates Open Graph preview images: a source logo scaled into a bounding box and
//! placed on a fixed-size solid canvas, written as a PNG.
//!
//! ## Architecture
//!
//! - `og_scale` (workspace crate): placement planning and Lanczos resizing, no I/O
//! - `compose`: the pipeline (decode, plan, resize, composite, encode, atomic write)
//! - `config`: defaults, presets and validation shared with the CLI
//! - `report`: success summary, JSON rendering and meta tags
//! - `error`: the error taxonomy
//!
//! The logo is centered horizontally and placed high on the canvas: chat platforms crop
//! previews from the bottom, so the vertical bias keeps more padding below the logo
//! than above it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use og_card::{create_og_image, config::OgConfig};
//!
//! # fn example() -> Result<(), og_card::OgError> {
//! let config = OgConfig::new("public/logo.png", "public/logo-og.png");
//! let report = create_og_image(&config.to_compose_options())?;
//! for line in report.summary_lines() {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod compose;
pub mod config;
pub mod error;
pub mod report;

/// Re-export error types for convenience
pub use error::{HasRecoverySuggestion, OgError, OgResult};
pub use report::ComposeReport;

/// Re-export commonly used types from the scaling crate
pub use og_scale::presets::{LayoutPreset, PlacementPlan, Size};

/// Parameters for one compositor run.
///
/// Usually built from [`config::OgConfig::to_compose_options`], which validates first.
/// Out-of-range ratios that reach [`create_og_image`] directly are still rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeOptions {
    /// Source image path.
    pub input: PathBuf,

    /// Output PNG path. Replaced atomically; an existing file survives any failure.
    pub output: PathBuf,

    /// Canvas dimensions, 1200×630 by default.
    pub canvas: Size,

    /// Share of each canvas axis the logo may occupy, in `(0, 1]`.
    pub fraction: f64,

    /// Share of leftover vertical space placed above the logo, in `[0, 1]`.
    pub bias: f64,

    /// Canvas fill color as RGBA.
    pub background: [u8; 4],
}

/// Main entry point: build the preview card described by `options`.
///
/// # Errors
///
/// - [`OgError::NotFound`] if the source path does not exist
/// - [`OgError::Decode`] if the source cannot be decoded or has a zero-sized side
/// - [`OgError::Config`] if the canvas, fraction or bias is out of range
/// - [`OgError::Processing`] if resizing fails
/// - [`OgError::Write`] if encoding or writing the output fails
///
/// No file is left at the output path on failure, and an existing file there is
/// left untouched.
pub fn create_og_image(options: &ComposeOptions) -> OgResult<ComposeReport> {
    log::info!(
        "Composing {} -> {} ({} canvas, fraction {}, bias {})",
        options.input.display(),
        options.output.display(),
        options.canvas,
        options.fraction,
        options.bias
    );
    compose::run(options)
}
