//! Common test utilities for the og-card tests
//!
//! Builds small source images on disk so each test can run the real pipeline.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Write a solid opaque RGB PNG and return its path.
pub fn write_rgb_logo(dir: &Path, name: &str, w: u32, h: u32, color: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(w, h, Rgb(color))
        .save(&path)
        .expect("write rgb logo");
    path
}

/// Write a solid RGBA PNG and return its path.
pub fn write_rgba_logo(dir: &Path, name: &str, w: u32, h: u32, color: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(w, h, Rgba(color))
        .save(&path)
        .expect("write rgba logo");
    path
}

/// Assert two pixels match within `tol` per channel.
pub fn assert_pixel_near(got: &[u8], want: &[u8], tol: i16) {
    assert_eq!(got.len(), want.len());
    for (g, w) in got.iter().zip(want) {
        assert!(
            (*g as i16 - *w as i16).abs() <= tol,
            "got {:?}, want {:?}",
            got,
            want
        );
    }
}
