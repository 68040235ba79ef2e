// SPDX-License-Identifier: MIT
//! # og-scale: Placement Planning for Open Graph Preview Cards
//!
//! This crate computes where a logo lands on a fixed-size social preview card and
//! resizes the logo pixels to fit. It holds no I/O: decoding, compositing and encoding
//! live in the application crate.
//!
//! ## Key Components
//!
//! - [`presets`]: Placement plan computation and the named layout presets
//! - [`cpu`]: Lanczos3 resizing of RGBA8 buffers using fast_image_resize
//!
//! ## Placement Model
//!
//! The logo is scaled uniformly so that it fits a bounding box covering a fraction `f`
//! of the canvas on both axes. It is centered horizontally. Vertically, the leftover
//! space is split by a bias `b`: `b` of it goes above the logo, the rest below. Chat
//! platforms tend to crop previews from the bottom, so biases above 0.5 keep the logo
//! clear of the crop zone.
//!
//! ## Usage Example
//!
//! ```rust
//! use og_scale::presets::{build_plan, LayoutPreset, Size, OG_CANVAS};
//!
//! let preset = LayoutPreset::Discord;
//! let plan = build_plan(Size { w: 400, h: 200 }, OG_CANVAS, preset.fraction(), preset.bias())
//!     .expect("valid plan");
//!
//! assert_eq!((plan.resized.w, plan.resized.h), (540, 270));
//! assert_eq!((plan.offset_x, plan.offset_y), (330, 270));
//! ```

pub mod cpu;
pub mod presets;
