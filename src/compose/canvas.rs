//! Canvas fill, resize and composite.

use fast_image_resize::Resizer;
use image::{DynamicImage, Rgba, RgbaImage, imageops};
use og_scale::cpu::{paint_opaque_cpu, rgba_len, scale_rgba_cpu};
use og_scale::presets::PlacementPlan;

use super::source::SourceImage;
use crate::error::{OgError, OgResult};

/// Draw `source` onto a `plan.canvas`-sized canvas filled with `background`.
///
/// Opaque sources are resized straight into their canvas region. Sources with an alpha
/// channel are resized into a separate tile first and then blended over the background.
///
/// The result is RGB8 when `background` is opaque and RGBA8 otherwise.
pub fn render(
    source: &SourceImage,
    plan: &PlacementPlan,
    background: [u8; 4],
) -> OgResult<DynamicImage> {
    let mut canvas = RgbaImage::from_pixel(plan.canvas.w, plan.canvas.h, Rgba(background));
    let mut resizer = Resizer::new();
    let placing = || placement(source, plan);

    if source.has_alpha {
        let mut tile = vec![0u8; rgba_len(plan.resized)];
        scale_rgba_cpu(&mut resizer, &source.pixels, source.size, plan, &mut tile)
            .map_err(|e| OgError::from(e).with_context(placing()))?;
        let tile = RgbaImage::from_raw(plan.resized.w, plan.resized.h, tile).ok_or_else(|| {
            OgError::processing("composite", "resized tile does not match planned size")
                .with_context(placing())
        })?;
        imageops::overlay(&mut canvas, &tile, plan.offset_x as i64, plan.offset_y as i64);
    } else {
        paint_opaque_cpu(&mut resizer, &source.pixels, source.size, plan, &mut canvas)
            .map_err(|e| OgError::from(e).with_context(placing()))?;
    }

    let canvas = DynamicImage::ImageRgba8(canvas);
    if background[3] == u8::MAX {
        Ok(DynamicImage::ImageRgb8(canvas.into_rgb8()))
    } else {
        Ok(canvas)
    }
}

fn placement(source: &SourceImage, plan: &PlacementPlan) -> String {
    format!(
        "placing {} source as {} at ({}, {}) on a {} canvas",
        source.size, plan.resized, plan.offset_x, plan.offset_y, plan.canvas
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use og_scale::presets::{OG_CANVAS, Size, build_plan};

    fn source(w: u32, h: u32, px: [u8; 4], has_alpha: bool) -> SourceImage {
        SourceImage {
            pixels: RgbaImage::from_pixel(w, h, Rgba(px)),
            size: Size { w, h },
            has_alpha,
        }
    }

    fn near(a: &[u8], b: &[u8]) -> bool {
        a.iter().zip(b).all(|(x, y)| (*x as i16 - *y as i16).abs() <= 2)
    }

    #[test]
    fn test_opaque_source_on_white() {
        let src = source(400, 200, [0, 0, 200, 255], false);
        let plan = build_plan(src.size, OG_CANVAS, 0.45, 0.75).unwrap();
        let card = render(&src, &plan, [255, 255, 255, 255]).unwrap();

        let rgb = card.as_rgb8().expect("opaque background gives rgb8");
        assert_eq!(rgb.dimensions(), (1200, 630));
        assert!(near(&rgb.get_pixel(600, 405).0, &[0, 0, 200]));
        assert_eq!(rgb.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(rgb.get_pixel(600, 269).0, [255, 255, 255]);
        assert_eq!(rgb.get_pixel(600, 540).0, [255, 255, 255]);
        assert_eq!(rgb.get_pixel(329, 405).0, [255, 255, 255]);
        assert_eq!(rgb.get_pixel(870, 405).0, [255, 255, 255]);
    }

    #[test]
    fn test_transparent_source_keeps_background() {
        let src = source(400, 200, [255, 0, 0, 0], true);
        let plan = build_plan(src.size, OG_CANVAS, 0.45, 0.75).unwrap();
        let card = render(&src, &plan, [10, 20, 30, 255]).unwrap();

        let rgb = card.as_rgb8().unwrap();
        assert!(near(&rgb.get_pixel(600, 405).0, &[10, 20, 30]));
    }

    #[test]
    fn test_half_transparent_source_blends() {
        let src = source(400, 200, [0, 0, 0, 128], true);
        let plan = build_plan(src.size, OG_CANVAS, 0.45, 0.75).unwrap();
        let card = render(&src, &plan, [255, 255, 255, 255]).unwrap();

        let px = card.as_rgb8().unwrap().get_pixel(600, 405).0;
        // black at ~50% over white lands near mid-gray
        for c in px {
            assert!((120..=135).contains(&c), "{:?}", px);
        }
    }

    #[test]
    fn test_transparent_background_gives_rgba() {
        let src = source(40, 20, [0, 128, 0, 255], false);
        let plan = build_plan(src.size, OG_CANVAS, 0.45, 0.75).unwrap();
        let card = render(&src, &plan, [0, 0, 0, 0]).unwrap();

        let rgba = card.as_rgba8().expect("transparent background gives rgba8");
        assert_eq!(rgba.get_pixel(5, 5).0, [0, 0, 0, 0]);
        assert!(near(&rgba.get_pixel(600, 405).0, &[0, 128, 0, 255]));
    }

    #[test]
    fn test_resize_failure_names_the_placement() {
        let src = source(10, 10, [0, 0, 0, 255], false);
        let plan = build_plan(Size { w: 400, h: 200 }, OG_CANVAS, 0.45, 0.75).unwrap();

        let err = render(&src, &plan, [255, 255, 255, 255]).unwrap_err();

        assert_eq!(err.category(), "processing");
        assert_eq!(
            err.context().context.as_deref(),
            Some("placing 10x10 source as 540x270 at (330, 270) on a 1200x630 canvas")
        );
    }
}
