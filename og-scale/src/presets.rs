// SPDX-License-Identifier: MIT
//! # Layout Presets and Placement Plan Computation
//!
//! This module provides the core logic for deciding how large a logo is drawn on a
//! preview card and where it sits.
//!
//! ## Design Philosophy
//!
//! Placement is described by three concepts:
//! 1. **Canvas**: the fixed output size, 1200×630 (the 1.91:1 ratio the major platforms expect)
//! 2. **Fraction**: the share of each canvas axis the logo may occupy
//! 3. **Bias**: the share of leftover vertical space placed above the logo
//!
//! ## Numeric Behavior
//!
//! - The bounding box is computed in floating point (`1200 * 0.45 = 540.0`, `630 * 0.45 = 283.5`)
//! - The scale is the minimum of the two axis ratios, so the aspect ratio is preserved
//! - Resized sides are rounded to the nearest pixel and clamped to `1..=canvas`
//! - Upscaling is allowed: a small logo grows to fill the bounding box
//! - Zero-sized inputs are rejected before any division takes place

use std::fmt;

/// Width of the standard Open Graph card.
pub const OG_WIDTH: u32 = 1200;

/// Height of the standard Open Graph card.
pub const OG_HEIGHT: u32 = 630;

/// The standard Open Graph canvas.
pub const OG_CANVAS: Size = Size {
    w: OG_WIDTH,
    h: OG_HEIGHT,
};

/// Represents a 2D size with width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Width divided by height. Callers must check `is_empty` first.
    pub fn aspect_ratio(self) -> f64 {
        self.w as f64 / self.h as f64
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Reasons a placement plan cannot be built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlanError {
    EmptySource(Size),
    EmptyCanvas(Size),
    FractionOutOfRange(f64),
    BiasOutOfRange(f64),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::EmptySource(s) => write!(f, "Invalid image dimensions: {}", s),
            PlanError::EmptyCanvas(s) => write!(f, "Invalid canvas dimensions: {}", s),
            PlanError::FractionOutOfRange(v) => {
                write!(f, "Bounding-box fraction must be in (0, 1], got {}", v)
            }
            PlanError::BiasOutOfRange(v) => {
                write!(f, "Vertical bias must be in [0, 1], got {}", v)
            }
        }
    }
}

impl std::error::Error for PlanError {}

/// Complete placement plan computed from the source and canvas sizes.
/// Contains everything needed to resize the source and paste it onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementPlan {
    /// Original source dimensions
    pub input: Size,
    /// Output canvas dimensions
    pub canvas: Size,
    /// Uniform scale factor applied to both axes
    pub scale: f64,
    /// Source dimensions after scaling
    pub resized: Size,
    /// Left edge of the resized source on the canvas
    pub offset_x: u32,
    /// Top edge of the resized source on the canvas
    pub offset_y: u32,
}

impl PlacementPlan {
    /// Sub-rectangle of the canvas covered by the source.
    /// Format: (x, y, width, height) in canvas coordinates.
    pub fn dst_roi(&self) -> (u32, u32, u32, u32) {
        (self.offset_x, self.offset_y, self.resized.w, self.resized.h)
    }

    /// Padding left between the right edge of the source and the canvas edge.
    pub fn right_gap(&self) -> u32 {
        self.canvas.w - self.offset_x - self.resized.w
    }

    /// Padding left between the bottom edge of the source and the canvas edge.
    pub fn bottom_gap(&self) -> u32 {
        self.canvas.h - self.offset_y - self.resized.h
    }
}

/// Compute a placement plan.
///
/// # Arguments
/// * `input` - Source image dimensions
/// * `canvas` - Output canvas dimensions
/// * `fraction` - Share of each canvas axis the source may occupy, in `(0, 1]`
/// * `bias` - Share of leftover vertical space placed above the source, in `[0, 1]`
///
/// # Errors
/// Returns a [`PlanError`] when either size is empty or a ratio is out of range.
/// NaN ratios are rejected as out of range.
pub fn build_plan(
    input: Size,
    canvas: Size,
    fraction: f64,
    bias: f64,
) -> Result<PlacementPlan, PlanError> {
    if input.is_empty() {
        return Err(PlanError::EmptySource(input));
    }
    if canvas.is_empty() {
        return Err(PlanError::EmptyCanvas(canvas));
    }
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(PlanError::FractionOutOfRange(fraction));
    }
    if !(0.0..=1.0).contains(&bias) {
        return Err(PlanError::BiasOutOfRange(bias));
    }

    let (scale, resized) = fit_within_fraction(input, canvas, fraction);
    let offset_x = (canvas.w - resized.w) / 2;
    let leftover = canvas.h - resized.h;
    let offset_y = ((leftover as f64 * bias).floor() as u32).min(leftover);

    Ok(PlacementPlan {
        input,
        canvas,
        scale,
        resized,
        offset_x,
        offset_y,
    })
}

/// Scale `input` uniformly into the `fraction`-sized box of `canvas`.
/// Returns the scale factor and the rounded output size.
fn fit_within_fraction(input: Size, canvas: Size, fraction: f64) -> (f64, Size) {
    let (w, h) = (input.w as f64, input.h as f64);
    let max_w = canvas.w as f64 * fraction;
    let max_h = canvas.h as f64 * fraction;
    let s = (max_w / w).min(max_h / h);
    let resized = Size {
        w: ((w * s).round() as u32).clamp(1, canvas.w),
        h: ((h * s).round() as u32).clamp(1, canvas.h),
    };
    (s, resized)
}

/// Named layout presets for preview cards.
///
/// Both tunings are in use for the same purpose; neither is authoritative, so both
/// are offered by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LayoutPreset {
    /// 45% bounding box, 75% of leftover height above the logo.
    /// Survives Discord's heavy bottom crop (15-20% of the card).
    #[default]
    #[value(name = "discord")]
    Discord,
    /// 60% bounding box, 55% of leftover height above the logo.
    /// Larger logo, close to vertically centered.
    #[value(name = "balanced")]
    Balanced,
}

impl LayoutPreset {
    pub fn fraction(self) -> f64 {
        match self {
            LayoutPreset::Discord => 0.45,
            LayoutPreset::Balanced => 0.6,
        }
    }

    pub fn bias(self) -> f64 {
        match self {
            LayoutPreset::Discord => 0.75,
            LayoutPreset::Balanced => 0.55,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LayoutPreset::Discord => "discord",
            LayoutPreset::Balanced => "balanced",
        }
    }
}
