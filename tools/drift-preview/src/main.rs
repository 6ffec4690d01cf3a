//! drift-preview: run drift sequences against a simulated renderer.
//!
//! Usage:
//!   drift-preview [--image NAME=WxH]... [--viewport WxH] [--mode MODE]
//!   drift-preview --single --image photo.jpg=1600x1200
//!
//! Every submitted animation group is printed to stdout as one JSON line.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use driftview_common::config::DriftConfig;
use driftview_common::error::DriftError;
use driftview_common::logging::init_logging;
use driftview_core::{
    AnimationPlan, ContentFitMode, DriftHost, DriftRanges, DriftView, RandomRangeSampler, Size2D,
};
use serde::Serialize;
use tokio::sync::mpsc;

mod host;

use host::{HostEvent, PreviewHost};

#[derive(Parser, Debug)]
#[command(
    name = "drift-preview",
    about = "Preview slow pan-and-zoom drift sequences without a renderer",
    version
)]
struct Args {
    /// Image to drift through, as NAME=WIDTHxHEIGHT (repeatable, in order)
    #[arg(
        long = "image",
        value_parser = parse_image,
        default_values = ["photo00.jpg=1600x1200", "photo01.jpg=1200x1600"]
    )]
    images: Vec<(String, Size2D)>,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size, default_value = "320x480")]
    viewport: Size2D,

    /// Content fit mode (e.g. scale-aspect-fill, scale-aspect-fit, top-left)
    #[arg(long, default_value = "scale-aspect-fill")]
    mode: ContentFitMode,

    /// Number of completed chain steps before stopping
    #[arg(long, default_value_t = 4)]
    steps: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Run one endlessly repeating drift on the first image instead of a chain
    #[arg(long)]
    single: bool,

    /// Real seconds per simulated animation second
    #[arg(long, default_value_t = 0.01)]
    time_scale: f64,

    /// Config file (defaults to the standard location)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit structured JSON logs on stderr
    #[arg(long)]
    json_logs: bool,
}

#[derive(Serialize)]
struct StepRecord<'a> {
    step: usize,
    image: Option<&'a str>,
    plans: &'a [AnimationPlan],
}

fn parse_size(value: &str) -> Result<Size2D, String> {
    let (w, h) = value
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width: f64 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let height: f64 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        return Err(format!("size must be positive, got '{value}'"));
    }
    Ok(Size2D::new(width, height))
}

fn parse_image(value: &str) -> Result<(String, Size2D), String> {
    let (name, size) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=WIDTHxHEIGHT, got '{value}'"))?;
    if name.is_empty() {
        return Err("image name must not be empty".to_string());
    }
    Ok((name.to_string(), parse_size(size)?))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DriftConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DriftConfig::load(),
    };
    let mut logging = config.logging.clone();
    logging.json |= args.json_logs;
    init_logging(&logging);

    let names: Vec<String> = args.images.iter().map(|(name, _)| name.clone()).collect();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let host = PreviewHost::new(
        args.images.clone(),
        args.viewport,
        args.mode,
        args.time_scale,
        tx,
    );
    let sampler = match args.seed {
        Some(seed) => RandomRangeSampler::seeded(seed),
        None => RandomRangeSampler::from_entropy(),
    };
    let view = DriftView::with_sampler(host, sampler, DriftRanges::from(&config.animation));

    tracing::info!(
        images = names.len(),
        viewport = ?args.viewport,
        mode = %args.mode,
        "starting drift preview"
    );

    if args.single {
        run_single(&view, &names, &args, &mut rx).await
    } else {
        run_chain(&view, &names, args.steps, &mut rx).await
    }
}

async fn run_single(
    view: &DriftView<PreviewHost>,
    names: &[String],
    args: &Args,
    rx: &mut mpsc::UnboundedReceiver<HostEvent>,
) -> Result<()> {
    let Some(first) = names.first() else {
        bail!("no images given");
    };
    let image = view
        .host()
        .resolve_image(first)
        .ok_or_else(|| DriftError::image_not_found(first.as_str()))?;
    view.set_image(image);

    let duration = view.begin(true, None, None)?;
    drain(rx, 0);

    // Let one simulated cycle play out before tearing down.
    let cycle = Duration::try_from_secs_f64(duration * args.time_scale).unwrap_or_default();
    tokio::time::sleep(cycle).await;
    view.stop();
    drain(rx, 0);
    Ok(())
}

async fn run_chain(
    view: &DriftView<PreviewHost>,
    names: &[String],
    steps: usize,
    rx: &mut mpsc::UnboundedReceiver<HostEvent>,
) -> Result<()> {
    view.perform(names, 0);
    if !view.is_animating() {
        bail!("none of the requested images could be started");
    }

    let mut completed = 0;
    let mut step = 0;
    while let Some(event) = rx.recv().await {
        match event {
            HostEvent::Submitted { image, plans } => {
                print_step(step, image.as_deref(), &plans)?;
                step += 1;
            }
            HostEvent::Finished => {
                completed += 1;
                if completed >= steps || !view.is_animating() {
                    break;
                }
            }
            HostEvent::Removed(channel) => tracing::debug!(?channel, "animation removed"),
        }
    }

    view.stop();
    tracing::info!(completed, "drift preview finished");
    Ok(())
}

/// Print everything already queued without waiting for more.
fn drain(rx: &mut mpsc::UnboundedReceiver<HostEvent>, mut step: usize) {
    while let Ok(event) = rx.try_recv() {
        if let HostEvent::Submitted { image, plans } = event {
            if let Err(e) = print_step(step, image.as_deref(), &plans) {
                tracing::warn!(error = %e, "failed to print step");
            }
            step += 1;
        }
    }
}

fn print_step(step: usize, image: Option<&str>, plans: &[AnimationPlan]) -> Result<()> {
    let record = StepRecord { step, image, plans };
    println!("{}", serde_json::to_string(&record)?);
    Ok(())
}
