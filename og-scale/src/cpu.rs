// SPDX-License-Identifier: MIT
// CPU scaler built on fast_image_resize (SIMD-accelerated, Lanczos3).
// RGBA8 in → RGBA8 out, either into a tight tile buffer or straight into a canvas region.

use fast_image_resize as fir;
use fir::images::{TypedCroppedImageMut, TypedImage, TypedImageRef};
use fir::pixels::U8x4;
use fir::{ResizeOptions, Resizer};

use crate::presets::{PlacementPlan, Size};

#[derive(Debug)]
pub enum ScaleError {
    BufferTooSmall { needed: usize, got: usize },
    SizeMismatch { expected: Size, got: Size },
    Fir(fir::ResizeError),
    ImageBuf(fir::ImageBufferError),
    Crop(fir::CropBoxError),
}

impl From<fir::ResizeError> for ScaleError { fn from(e: fir::ResizeError) -> Self { Self::Fir(e) } }
impl From<fir::ImageBufferError> for ScaleError { fn from(e: fir::ImageBufferError) -> Self { Self::ImageBuf(e) } }
impl From<fir::CropBoxError> for ScaleError { fn from(e: fir::CropBoxError) -> Self { Self::Crop(e) } }

impl std::fmt::Display for ScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleError::BufferTooSmall { needed, got } => {
                write!(f, "Output buffer too small: need {} bytes, got {}", needed, got)
            }
            ScaleError::SizeMismatch { expected, got } => {
                write!(f, "Image is {} but the plan expects {}", got, expected)
            }
            ScaleError::Fir(e) => write!(f, "Fast image resize error: {}", e),
            ScaleError::ImageBuf(e) => write!(f, "Image buffer error: {}", e),
            ScaleError::Crop(e) => write!(f, "Crop error: {}", e),
        }
    }
}

impl std::error::Error for ScaleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaleError::Fir(e) => Some(e),
            ScaleError::ImageBuf(e) => Some(e),
            ScaleError::Crop(e) => Some(e),
            _ => None,
        }
    }
}

/// Byte length of a tightly packed RGBA8 image.
pub fn rgba_len(size: Size) -> usize {
    (size.w as usize) * (size.h as usize) * 4
}

/// Lanczos3 with alpha premultiplication, so transparent edges don't pick up dark fringes.
fn resize_options(alpha: bool) -> ResizeOptions {
    ResizeOptions::new()
        .resize_alg(fir::ResizeAlg::Convolution(fir::FilterType::Lanczos3))
        .use_alpha(alpha)
}

/// Resize a tightly packed RGBA8 source into `dst`, which receives `plan.resized` pixels.
/// Used for sources with transparency: the tile is blended onto the canvas afterwards.
pub fn scale_rgba_cpu(
    resizer: &mut Resizer,
    src_rgba: &[u8],
    src: Size,
    plan: &PlacementPlan,
    dst: &mut [u8],
) -> Result<(), ScaleError> {
    check_source(src, plan)?;
    let dst_len = rgba_len(plan.resized);
    if dst.len() < dst_len {
        return Err(ScaleError::BufferTooSmall { needed: dst_len, got: dst.len() });
    }

    let src_view = TypedImageRef::<U8x4>::from_buffer(src.w, src.h, src_rgba)?;
    let mut dst_image =
        TypedImage::<U8x4>::from_buffer(plan.resized.w, plan.resized.h, &mut dst[..dst_len])?;

    resizer.resize_typed::<U8x4>(&src_view, &mut dst_image, &resize_options(true))?;
    Ok(())
}

/// Resize an opaque RGBA8 source straight into its region of a tightly packed canvas.
/// Pixels outside `plan.dst_roi()` are left as they are.
pub fn paint_opaque_cpu(
    resizer: &mut Resizer,
    src_rgba: &[u8],
    src: Size,
    plan: &PlacementPlan,
    canvas: &mut [u8],
) -> Result<(), ScaleError> {
    check_source(src, plan)?;
    let canvas_len = rgba_len(plan.canvas);
    if canvas.len() < canvas_len {
        return Err(ScaleError::BufferTooSmall { needed: canvas_len, got: canvas.len() });
    }

    let src_view = TypedImageRef::<U8x4>::from_buffer(src.w, src.h, src_rgba)?;
    let mut canvas_image =
        TypedImage::<U8x4>::from_buffer(plan.canvas.w, plan.canvas.h, &mut canvas[..canvas_len])?;

    let (x, y, w, h) = plan.dst_roi();
    let mut roi = TypedCroppedImageMut::from_ref(&mut canvas_image, x, y, w, h)?;
    resizer.resize_typed::<U8x4>(&src_view, &mut roi, &resize_options(false))?;
    Ok(())
}

fn check_source(src: Size, plan: &PlacementPlan) -> Result<(), ScaleError> {
    if src != plan.input {
        return Err(ScaleError::SizeMismatch { expected: plan.input, got: src });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{build_plan, OG_CANVAS};

    fn solid(size: Size, px: [u8; 4]) -> Vec<u8> {
        px.iter().copied().cycle().take(rgba_len(size)).collect()
    }

    fn pixel(buf: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    }

    fn assert_near(got: [u8; 4], want: [u8; 4]) {
        for (g, w) in got.iter().zip(want.iter()) {
            assert!((*g as i16 - *w as i16).abs() <= 1, "got {:?}, want {:?}", got, want);
        }
    }

    #[test]
    fn test_scale_solid_tile() {
        let src = Size { w: 40, h: 20 };
        let plan = build_plan(src, OG_CANVAS, 0.45, 0.75).unwrap();
        let mut tile = vec![0u8; rgba_len(plan.resized)];
        let mut resizer = Resizer::new();

        scale_rgba_cpu(&mut resizer, &solid(src, [10, 200, 30, 255]), src, &plan, &mut tile)
            .unwrap();

        assert_near(pixel(&tile, plan.resized.w, 270, 135), [10, 200, 30, 255]);
        assert_near(pixel(&tile, plan.resized.w, 0, 0), [10, 200, 30, 255]);
    }

    #[test]
    fn test_paint_opaque_only_touches_roi() {
        let src = Size { w: 400, h: 200 };
        let plan = build_plan(src, OG_CANVAS, 0.45, 0.75).unwrap();
        let mut canvas = solid(OG_CANVAS, [255, 255, 255, 255]);
        let mut resizer = Resizer::new();

        paint_opaque_cpu(&mut resizer, &solid(src, [200, 0, 0, 255]), src, &plan, &mut canvas)
            .unwrap();

        assert_near(pixel(&canvas, 1200, 600, 400), [200, 0, 0, 255]);
        assert_near(pixel(&canvas, 1200, 330, 270), [200, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 1200, 329, 400), [255, 255, 255, 255]);
        assert_eq!(pixel(&canvas, 1200, 870, 400), [255, 255, 255, 255]);
        assert_eq!(pixel(&canvas, 1200, 600, 269), [255, 255, 255, 255]);
        assert_eq!(pixel(&canvas, 1200, 600, 540), [255, 255, 255, 255]);
    }

    #[test]
    fn test_buffer_too_small() {
        let src = Size { w: 4, h: 2 };
        let plan = build_plan(src, OG_CANVAS, 0.45, 0.75).unwrap();
        let mut tile = vec![0u8; 16];
        let err = scale_rgba_cpu(&mut Resizer::new(), &solid(src, [0; 4]), src, &plan, &mut tile)
            .unwrap_err();
        assert!(matches!(err, ScaleError::BufferTooSmall { got: 16, .. }));
    }

    #[test]
    fn test_source_must_match_plan() {
        let plan = build_plan(Size { w: 4, h: 2 }, OG_CANVAS, 0.45, 0.75).unwrap();
        let other = Size { w: 2, h: 2 };
        let mut tile = vec![0u8; rgba_len(plan.resized)];
        let err = scale_rgba_cpu(&mut Resizer::new(), &solid(other, [0; 4]), other, &plan, &mut tile)
            .unwrap_err();
        assert!(err.to_string().contains("2x2"));
    }
}
