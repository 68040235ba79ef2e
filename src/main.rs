use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use og_card::config::{OgConfig, default_output_for, parse_hex_color};
use og_card::{HasRecoverySuggestion, LayoutPreset, OgError, OgResult};

/// Open Graph card generator:
/// - scales a logo into a fraction of a 1200×630 canvas
/// - centers it horizontally, biased upward to survive bottom cropping
/// - writes a PNG atomically
#[derive(Parser, Debug)]
#[command(name = "og-card")]
#[command(about = "🖼️  Create a 1200x630 Open Graph preview image from a logo")]
#[command(long_about = "Create an Open Graph preview image from a logo.
The logo is scaled to fit a fraction of the canvas and placed high, so platforms that crop
the bottom of link previews (Discord, Twitter, Facebook, LinkedIn) keep it visible.")]
struct Args {
    /// Source logo path
    #[arg(default_value = "public/logo.png", help = "Source image (PNG, JPEG, GIF, WebP, BMP)")]
    input: PathBuf,

    /// Output PNG path
    #[arg(short, long, help = "Output PNG path [default: <input-stem>-og.png next to the input]")]
    output: Option<PathBuf>,

    /// Layout preset
    #[arg(short, long, value_enum, default_value_t = LayoutPreset::Discord,
          help = "Layout preset: discord (45% box, 75% top padding), balanced (60% box, 55% top padding)")]
    preset: LayoutPreset,

    /// Canvas width
    #[arg(long, default_value_t = 1200, help = "Canvas width in pixels")]
    width: u32,

    /// Canvas height
    #[arg(long, default_value_t = 630, help = "Canvas height in pixels")]
    height: u32,

    /// Bounding-box fraction override
    #[arg(long, help = "Share of each canvas axis the logo may occupy, 0 < f <= 1 (overrides the preset)")]
    fraction: Option<f64>,

    /// Vertical bias override
    #[arg(long, help = "Share of leftover height placed above the logo, 0..1 (overrides the preset)")]
    bias: Option<f64>,

    /// Background color
    #[arg(short, long, default_value = "#ffffff", help = "Background color: #rgb, #rrggbb or #rrggbbaa")]
    background: String,

    /// Print the report as JSON
    #[arg(long, help = "Print the result as JSON instead of text")]
    json: bool,

    /// Public URL of the generated card
    #[arg(long, help = "Print Open Graph and Twitter meta tags pointing at this URL")]
    meta_url: Option<String>,

    /// Alt text for meta tags
    #[arg(long, requires = "meta_url", help = "Alt text for the meta tags")]
    alt: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let result = build_config(&args)
        .and_then(|config| og_card::create_og_image(&config.to_compose_options()));

    match result {
        Ok(report) => {
            if args.json {
                println!("{}", report.to_json());
            } else {
                for line in report.summary_lines() {
                    println!("{}", line);
                }
            }
            if let Some(url) = &args.meta_url {
                for tag in report.meta_tags(url, args.alt.as_deref()) {
                    println!("{}", tag);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn report_error(e: &OgError) {
    eprintln!("✗ Error creating OG image: {}", e);
    let context = e.context();
    if let Some(operation) = &context.operation {
        eprintln!("  During: {}", operation);
    }
    if let Some(detail) = &context.context {
        eprintln!("  Context: {}", detail);
    }
    if let Some(hint) = e.recovery_suggestion() {
        eprintln!("  Hint: {}", hint);
    }
}

/// Merge preset, overrides and defaults into a validated config
fn build_config(args: &Args) -> OgResult<OgConfig> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_for(&args.input));

    log::debug!("Using preset '{}'", args.preset.name());
    let mut config = OgConfig::new(args.input.clone(), output).with_preset(args.preset);
    config.width = args.width;
    config.height = args.height;
    if let Some(fraction) = args.fraction {
        config.fraction = fraction;
    }
    if let Some(bias) = args.bias {
        config.bias = bias;
    }
    config.background = parse_hex_color(&args.background).map_err(|reason| {
        OgError::config("background", &args.background, reason)
            .with_operation("parse_arguments")
            .with_recovery_suggestion("Pass --background as #rgb, #rrggbb or #rrggbbaa, e.g. #ffffff")
    })?;

    config.validate().map_err(|reason| {
        let value = format!(
            "{}x{} fraction={} bias={}",
            config.width, config.height, config.fraction, config.bias
        );
        OgError::config("parameters", value, reason)
            .with_operation("parse_arguments")
            .with_recovery_suggestion("See `og-card --help` for the accepted ranges")
    })?;
    Ok(config)
}
