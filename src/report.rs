//! # Compose Report
//!
//! What a successful run produced, in three renderings: human-readable summary lines,
//! a JSON object for scripts, and the `<meta>` tags that reference the card from a page.

use std::path::PathBuf;

use html_escape::encode_double_quoted_attribute;
use og_scale::presets::{PlacementPlan, Size};
use serde_json::{Value, json};

/// Result of a successful compositor run.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeReport {
    pub output: PathBuf,
    pub canvas: Size,
    pub source: Size,
    pub resized: Size,
    pub scale: f64,
    pub offset_x: u32,
    pub offset_y: u32,
    pub right_gap: u32,
    pub bottom_gap: u32,
    /// Whether the source was alpha-blended rather than pasted opaquely.
    pub alpha_blended: bool,
    pub bytes_written: u64,
}

impl ComposeReport {
    pub fn new(
        output: PathBuf,
        plan: &PlacementPlan,
        alpha_blended: bool,
        bytes_written: u64,
    ) -> Self {
        Self {
            output,
            canvas: plan.canvas,
            source: plan.input,
            resized: plan.resized,
            scale: plan.scale,
            offset_x: plan.offset_x,
            offset_y: plan.offset_y,
            right_gap: plan.right_gap(),
            bottom_gap: plan.bottom_gap(),
            alpha_blended,
            bytes_written,
        }
    }

    /// Human-readable summary, one entry per line.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("✓ Created optimized OG image: {}", self.output.display()),
            format!(
                "  Dimensions: {} (aspect ratio: {:.2}:1)",
                self.canvas,
                self.canvas.aspect_ratio()
            ),
            format!("  Logo size: {} (scaled {:.2}x)", self.resized, self.scale),
            format!(
                "  Logo position: centered with {}px horizontal, {}px vertical padding ({}px right, {}px below)",
                self.offset_x, self.offset_y, self.right_gap, self.bottom_gap
            ),
        ]
    }

    pub fn to_json(&self) -> Value {
        json!({
            "output": self.output.display().to_string(),
            "width": self.canvas.w,
            "height": self.canvas.h,
            "source": { "width": self.source.w, "height": self.source.h },
            "resized": { "width": self.resized.w, "height": self.resized.h },
            "scale": self.scale,
            "offset": { "x": self.offset_x, "y": self.offset_y },
            "right_gap": self.right_gap,
            "bottom_gap": self.bottom_gap,
            "alpha_blended": self.alpha_blended,
            "bytes": self.bytes_written,
        })
    }

    /// Open Graph and Twitter card tags pointing at the generated image.
    ///
    /// `url` is where the card will be served from; `alt` is optional alt text.
    pub fn meta_tags(&self, url: &str, alt: Option<&str>) -> Vec<String> {
        let url = encode_double_quoted_attribute(url);
        let mut tags = vec![
            property_tag("og:image", &url),
            property_tag("og:image:type", "image/png"),
            property_tag("og:image:width", &self.canvas.w.to_string()),
            property_tag("og:image:height", &self.canvas.h.to_string()),
        ];
        if let Some(alt) = alt {
            tags.push(property_tag("og:image:alt", &encode_double_quoted_attribute(alt)));
        }
        tags.push(name_tag("twitter:card", "summary_large_image"));
        tags.push(name_tag("twitter:image", &url));
        if let Some(alt) = alt {
            tags.push(name_tag("twitter:image:alt", &encode_double_quoted_attribute(alt)));
        }
        tags
    }
}

fn property_tag(property: &str, content: &str) -> String {
    format!(r#"<meta property="{}" content="{}" />"#, property, content)
}

fn name_tag(name: &str, content: &str) -> String {
    format!(r#"<meta name="{}" content="{}" />"#, name, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use og_scale::presets::{OG_CANVAS, build_plan};

    fn report() -> ComposeReport {
        let plan = build_plan(Size { w: 400, h: 200 }, OG_CANVAS, 0.45, 0.75).unwrap();
        ComposeReport::new(PathBuf::from("public/logo-og.png"), &plan, false, 4242)
    }

    #[test]
    fn test_summary_lines() {
        let lines = report().summary_lines();
        assert_eq!(lines[0], "✓ Created optimized OG image: public/logo-og.png");
        assert_eq!(lines[1], "  Dimensions: 1200x630 (aspect ratio: 1.90:1)");
        assert_eq!(lines[2], "  Logo size: 540x270 (scaled 1.35x)");
        assert!(lines[3].contains("330px horizontal, 270px vertical"));
        assert!(lines[3].contains("(330px right, 90px below)"));
    }

    #[test]
    fn test_json() {
        let value = report().to_json();
        assert_eq!(value["width"], 1200);
        assert_eq!(value["height"], 630);
        assert_eq!(value["resized"]["width"], 540);
        assert_eq!(value["offset"]["x"], 330);
        assert_eq!(value["offset"]["y"], 270);
        assert_eq!(value["right_gap"], 330);
        assert_eq!(value["bottom_gap"], 90);
        assert_eq!(value["bytes"], 4242);
        assert_eq!(value["alpha_blended"], false);
    }

    #[test]
    fn test_meta_tags() {
        let tags = report().meta_tags("https://example.com/logo-og.png?v=1&x=2", Some("Logo \"A\""));
        assert!(tags.contains(
            &r#"<meta property="og:image" content="https://example.com/logo-og.png?v=1&amp;x=2" />"#
                .to_string()
        ));
        assert!(tags.contains(&r#"<meta property="og:image:width" content="1200" />"#.to_string()));
        assert!(tags.contains(&r#"<meta property="og:image:height" content="630" />"#.to_string()));
        assert!(tags.contains(
            &r#"<meta property="og:image:alt" content="Logo &quot;A&quot;" />"#.to_string()
        ));
        assert!(tags.contains(
            &r#"<meta name="twitter:card" content="summary_large_image" />"#.to_string()
        ));
    }

    #[test]
    fn test_meta_tags_escape_markup() {
        let tags = report().meta_tags("/og.png", Some("<b>Tom & Jerry</b>"));
        assert!(tags.contains(
            &r#"<meta name="twitter:image:alt" content="&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;" />"#
                .to_string()
        ));
    }

    #[test]
    fn test_meta_tags_without_alt() {
        let tags = report().meta_tags("/logo-og.png", None);
        assert_eq!(tags.len(), 6);
        assert!(tags.iter().all(|t| !t.contains("alt")));
    }
}
