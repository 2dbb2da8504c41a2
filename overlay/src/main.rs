//! Overlay preview renderer
//!
//! Run with: cargo run -p dispel-overlay --bin dispel-preview
//!
//! Builds a simulated roster, runs the overlay engine over it and writes the
//! result as a PNG.
//!
//!   --config PATH  style config (default: user config dir)
//!   --out PATH     output image (default: dispel-preview.png)
//!   --raid         raid-sized roster instead of a party
//!   --preview      canned preview data instead of simulated effects

use std::path::PathBuf;

use dispel_core::config::{default_config_path, load_or_default};
use dispel_core::sim::{SimulatedRoster, StaticPreview};
use dispel_core::UnitToken;
use dispel_overlay::{OverlayEngine, UnitFrame, render_roster_png};
use dispel_types::{Category, DisplayContext};
use tracing_subscriber::filter::EnvFilter;

struct Args {
    config: Option<PathBuf>,
    out: PathBuf,
    raid: bool,
    preview: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: None,
        out: PathBuf::from("dispel-preview.png"),
        raid: false,
        preview: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                args.config = Some(iter.next().ok_or("--config needs a path")?.into());
            }
            "--out" => args.out = iter.next().ok_or("--out needs a path")?.into(),
            "--raid" => args.raid = true,
            "--preview" => args.preview = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // If DISPEL_LOG_PATH is set, append to that file
    if let Ok(path) = std::env::var("DISPEL_LOG_PATH")
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Frames plus a host with one unit per frame, cycling through every
/// category so each visual state appears at least once.
fn build_roster(context: DisplayContext) -> (Vec<UnitFrame>, SimulatedRoster) {
    let (prefix, count, width, height) = match context {
        DisplayContext::Party => ("party", 5, 120.0, 48.0),
        DisplayContext::Raid => ("raid", 20, 80.0, 36.0),
    };

    let mut host = SimulatedRoster::new();
    let mut frames = Vec::with_capacity(count);
    for slot in 0..count {
        let unit = UnitToken::new(format!("{prefix}{}", slot + 1));
        host.add_unit(unit.clone());

        let category = Category::ALL[slot % Category::ALL.len()];
        if category != Category::None {
            host.apply(&unit, category);
        }
        if slot % 3 == 2 {
            host.set_in_range(&unit, Some(false));
        }
        host.set_health(&unit, 100.0 - (slot % 4) as f32 * 20.0, 100.0);

        frames.push(UnitFrame::new(unit, slot, context, width, height));
    }
    (frames, host)
}

fn main() {
    init_logging();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!(
                "Usage: dispel-preview [--config PATH] [--out PATH] [--raid] [--preview]"
            );
            std::process::exit(2);
        }
    };

    let config = match args.config.or_else(default_config_path) {
        Some(path) => load_or_default(&path),
        None => {
            tracing::warn!("No config directory, using default style");
            Default::default()
        }
    };

    let context = if args.raid {
        DisplayContext::Raid
    } else {
        DisplayContext::Party
    };
    let (mut frames, host) = build_roster(context);

    let mut engine = OverlayEngine::new(config);
    if args.preview {
        engine.enable_preview(context, Box::new(StaticPreview::showcase(frames.len())));
    }
    engine.update_all_overlays(&host, &mut frames);

    let columns = if args.raid { 5 } else { 1 };
    match render_roster_png(&frames, columns, &args.out) {
        Ok(()) => {
            tracing::info!(path = %args.out.display(), frames = frames.len(), "Wrote preview")
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to render preview");
            std::process::exit(1);
        }
    }
}
