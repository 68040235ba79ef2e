//! # Compose Pipeline
//!
//! One linear pass per run:
//! 1. `source`: decode the logo into RGBA8
//! 2. `og_scale::presets::build_plan`: scale factor and offsets
//! 3. `canvas`: resize and composite onto the filled canvas
//! 4. `output`: PNG encode into a temp file, then rename over the output path
//!
//! Every buffer and file handle is owned by `run` and dropped on every exit path; an
//! unpersisted temp file deletes itself on drop.

pub mod canvas;
pub mod output;
pub mod source;

use og_scale::presets::{Size, build_plan};

use crate::{ComposeOptions, ComposeReport, OgResult};

pub use canvas::render;
pub use output::write_png_atomic;
pub use source::{SourceImage, load_source};

/// Run the whole pipeline for `options`.
pub fn run(options: &ComposeOptions) -> OgResult<ComposeReport> {
    // Reject bad ratios and canvases before touching the filesystem.
    build_plan(Size { w: 1, h: 1 }, options.canvas, options.fraction, options.bias)?;

    let source = load_source(&options.input)?;
    let plan = build_plan(source.size, options.canvas, options.fraction, options.bias)?;
    log::debug!(
        "Plan: {} -> {} (scale {:.4}) at ({}, {}) on {}",
        plan.input,
        plan.resized,
        plan.scale,
        plan.offset_x,
        plan.offset_y,
        plan.canvas
    );

    let card = render(&source, &plan, options.background)?;
    let bytes_written = write_png_atomic(&card, &options.output)?;
    log::info!("Wrote {} bytes to {}", bytes_written, options.output.display());

    Ok(ComposeReport::new(
        options.output.clone(),
        &plan,
        source.has_alpha,
        bytes_written,
    ))
}
