use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colorpirate::{ExtractorConfig, PaletteExtractor, colors::to_hex};
use palette::Srgb;
use serde_json::json;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Extract a color palette from an image file, URL or data URI.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Image path, file:// URL, http(s) URL or data: URI
    source: String,

    /// Number of colors in the palette
    #[arg(short = 'k', long, default_value_t = colorpirate::config::DEFAULT_PALETTE_SIZE)]
    palette_size: usize,

    /// Sampling stride; higher is faster but coarser
    #[arg(short, long, default_value_t = colorpirate::config::DEFAULT_QUALITY)]
    quality: usize,

    /// Print only the dominant color
    #[arg(short, long)]
    dominant: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Give up loading the image after this many seconds
    #[arg(short, long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = ExtractorConfig::default()
        .with_palette_size(args.palette_size)
        .with_quality(args.quality);
    if let Some(secs) = args.timeout {
        config = config.with_load_timeout(Duration::from_secs(secs));
    }

    let extractor = PaletteExtractor::with_config(args.source.as_str(), config);

    let colors = if args.dominant {
        vec![extractor
            .get_color(None)
            .await
            .with_context(|| format!("no dominant color for {}", extractor.source()))?]
    } else {
        extractor
            .get_palette(None, None)
            .await
            .with_context(|| format!("no palette for {}", extractor.source()))?
            .into_colors()
    };

    if args.json {
        let entries: Vec<_> = colors
            .iter()
            .map(|&c| json!({ "hex": to_hex(c), "rgb": [c.red, c.green, c.blue] }))
            .collect();
        let doc = json!({ "source": extractor.source().to_string(), "palette": entries });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        for c in colors {
            println!("{}  #{}  rgb({}, {}, {})", swatch(c), to_hex(c), c.red, c.green, c.blue);
        }
    }

    Ok(())
}

/// A truecolor block in the given color.
fn swatch(c: Srgb<u8>) -> String {
    format!("\x1b[48;2;{};{};{}m    \x1b[0m", c.red, c.green, c.blue)
}
