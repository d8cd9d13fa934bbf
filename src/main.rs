use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swatch_core::{ReferenceChart, Rgb, ScreenRect, Viewport};
use swatchpick::assets::{AssetLoader, AssetSource};
use swatchpick::models::{AppConfig, InteractionScript, ScreenPoint};
use swatchpick::services::{self, ColorReport};

#[derive(Parser)]
#[command(name = "swatchpick")]
#[command(about = "Sample representative colors from images and match them to a reference chart")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a click or drag selection from a PNG image
    Sample {
        /// PNG image to sample from
        #[arg(short, long)]
        image: PathBuf,

        /// Selection start in screen coordinates (e.g. "120,40")
        #[arg(long, allow_hyphen_values = true)]
        from: ScreenPoint,

        /// Selection end; omit for a single click
        #[arg(long, allow_hyphen_values = true)]
        to: Option<ScreenPoint>,

        /// Zoom factor (defaults to fit-to-viewport from config)
        #[arg(short, long)]
        zoom: Option<f64>,

        /// Screen position of the image origin (e.g. "-30,0")
        #[arg(short, long, allow_hyphen_values = true)]
        pan: Option<ScreenPoint>,

        /// Snap the sample to the nearest chart color
        #[arg(short, long)]
        quantize: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Find the chart entry closest to a hex color
    Nearest {
        /// Color as "#rrggbb", "rrggbb" or "#rgb"
        hex: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Replay a recorded interaction script
    Replay {
        /// Script YAML file
        script: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the configured reference chart
    Chart {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Sample {
            image,
            from,
            to,
            zoom,
            pan,
            quantize,
            json,
        }) => {
            init_logging();
            run_sample_command(&image, from, to, zoom, pan, quantize, json)
        }
        Some(Commands::Nearest { hex, json }) => {
            init_logging();
            run_nearest_command(&hex, json)
        }
        Some(Commands::Replay { script, json }) => {
            init_logging();
            run_replay_command(&script, json)
        }
        Some(Commands::Chart { json }) => {
            init_logging();
            run_chart_command(json)
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swatchpick=warn,swatch_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Load config and the configured chart
fn load_environment() -> anyhow::Result<(AppConfig, Arc<ReferenceChart>)> {
    let loader = AssetLoader::from_env();
    let config = AppConfig::load_from_assets(&loader);
    let chart = services::load_chart(&loader, &config.chart.file, config.chart.anchors())?;
    Ok((config, Arc::new(chart)))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_sample_command(
    image_path: &Path,
    from: ScreenPoint,
    to: Option<ScreenPoint>,
    zoom: Option<f64>,
    pan: Option<ScreenPoint>,
    quantize: bool,
    json: bool,
) -> anyhow::Result<()> {
    let (config, chart) = load_environment()?;
    let image = services::open_png(image_path)?;

    let mut session = config.new_session(chart);
    match zoom {
        Some(zoom) => {
            let (pan_x, pan_y) = pan.map_or((0.0, 0.0), ScreenPoint::as_tuple);
            session = session.viewport(Viewport::with_state(zoom, pan_x, pan_y));
        }
        None => {
            session.on_image_loaded(&image, config.viewport.width, config.viewport.height)?;
            if let Some(pan) = pan {
                session.on_pan(pan.x, pan.y);
            }
        }
    }

    let to = to.unwrap_or(from);
    let rect = ScreenRect::new(from.x, from.y, to.x, to.y);
    session
        .on_region_selected(rect, &image)
        .with_context(|| format!("selection {from} -> {to} does not cover any image pixel"))?;

    if quantize {
        session.on_quantize_requested();
    }
    let color = session
        .current_aggregate()
        .context("no sample recorded")?;
    let report = ColorReport::new(color, session.chart());

    if json {
        print_json(&report)
    } else {
        println!("{}", report.to_line());
        Ok(())
    }
}

fn run_nearest_command(hex: &str, json: bool) -> anyhow::Result<()> {
    let color: Rgb = hex
        .parse()
        .with_context(|| format!("invalid color {hex:?}"))?;
    let (_, chart) = load_environment()?;
    let report = ColorReport::new(color, &chart);

    if json {
        print_json(&report)
    } else {
        println!("{}", report.to_line());
        Ok(())
    }
}

fn run_replay_command(script_path: &Path, json: bool) -> anyhow::Result<()> {
    let (config, chart) = load_environment()?;
    let script = InteractionScript::load(script_path)?;
    let image = services::open_png(&script.image)?;

    let mut session = config.new_session(chart);
    let report = services::replay(&mut session, &image, config.viewport, &script.events)?;

    if json {
        return print_json(&report);
    }

    println!(
        "Image {}x{} (fit zoom {:.3}, zoom {:.3}, pan {:.1},{:.1})",
        report.width, report.height, report.fit_zoom, report.zoom, report.pan.0, report.pan.1
    );
    println!("\nSteps:");
    for step in &report.steps {
        match (&step.color, &step.error) {
            (_, Some(error)) => println!("  {:>3} {:<14} error: {error}", step.step, step.event),
            (Some(color), None) => println!("  {:>3} {:<14} {color}", step.step, step.event),
            (None, None) => println!("  {:>3} {}", step.step, step.event),
        }
    }

    println!("\nSamples ({}):", report.samples.len());
    for (i, hex) in report.samples.iter().enumerate() {
        println!("  {i:>3} {hex}");
    }
    match report.aggregate {
        Some(ref aggregate) => println!("\nAggregate: {}", aggregate.to_line()),
        None => println!("\nAggregate: (no samples)"),
    }
    println!("\nPalette ({}):", report.palette.len());
    for (i, hex) in report.palette.iter().enumerate() {
        println!("  {i:>3} {hex}");
    }
    Ok(())
}

fn run_chart_command(json: bool) -> anyhow::Result<()> {
    let (config, chart) = load_environment()?;

    if json {
        let entries: Vec<_> = chart
            .entries()
            .iter()
            .map(|e| serde_json::json!({ "code": e.code, "hex": e.color.to_hex() }))
            .collect();
        return print_json(&serde_json::json!({
            "file": config.chart.file,
            "near_black": chart.anchors().near_black.to_hex(),
            "near_white": chart.anchors().near_white.to_hex(),
            "entries": entries,
        }));
    }

    println!("Chart {} ({} entries)", config.chart.file, chart.len());
    println!(
        "  near-black = {}, near-white = {}\n",
        chart.anchors().near_black,
        chart.anchors().near_white
    );
    for entry in chart.entries() {
        println!("  {:<12} {}", entry.code, entry.color);
    }
    Ok(())
}

/// Show version, environment and configuration summary
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();
    let charts_dir = std::env::var("CHARTS_DIR").ok();

    println!("Swatchpick v{VERSION}");
    println!("Color sampling from images\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  CHARTS_DIR  = {}",
        charts_dir.as_deref().unwrap_or("(not set)")
    );

    let loader = AssetLoader::new(
        charts_dir.clone().map(PathBuf::from),
        config_file.clone().map(PathBuf::from),
    );

    println!("\nAsset Sources:");
    let config_source = match (loader.config_source(), config_file) {
        (AssetSource::Filesystem, Some(path)) => path,
        (_, Some(_)) => "embedded (file not found)".to_string(),
        (_, None) => "embedded".to_string(),
    };
    println!("  Config:  {config_source}");

    let charts = loader.list_charts();
    match charts_dir {
        Some(ref path) if Path::new(path).exists() => {
            println!("  Charts:  {path} ({} available)", charts.len())
        }
        _ => println!("  Charts:  embedded ({} available)", charts.len()),
    }
    for name in &charts {
        println!("           {name}");
    }

    let config = AppConfig::load_from_assets(&loader);
    println!("\nConfiguration:");
    println!("  Chart:           {}", config.chart.file);
    println!("  Buffer capacity: {}", config.sampler.buffer_capacity);
    println!("  Mode:            {:?}", config.sampler.mode);
    println!(
        "  Viewport:        {}x{}",
        config.viewport.width, config.viewport.height
    );

    println!("\nCommands:");
    println!("  swatchpick sample    Sample a selection from a PNG image");
    println!("  swatchpick nearest   Find the closest chart color");
    println!("  swatchpick replay    Replay an interaction script");
    println!("  swatchpick chart     List the reference chart");
    println!("\nRun 'swatchpick --help' for more details.");
}
