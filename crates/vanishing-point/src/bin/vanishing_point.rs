use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{info, warn, LevelFilter};

use vanishing_point::detect::{self, DetectError};
use vanishing_point::estimator::io::{VpConfigError, VpDetectConfig, VpDetectReport, VpIoError};
use vanishing_point::{ImageBounds, VanishingPointEstimator};

/// Estimate the dominant vanishing point from detected line segments.
#[derive(Parser, Debug)]
#[command(name = "vanishing-point", version, about)]
struct Cli {
    /// JSON run configuration; command-line flags override its fields.
    config: Option<PathBuf>,

    /// JSON file with an array of `[x1, y1, x2, y2]` segments (source pixels).
    #[arg(long)]
    segments: Option<PathBuf>,

    /// Image the segments were detected on; only its size is read.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Source image width, when no image is given.
    #[arg(long)]
    width: Option<f64>,

    /// Source image height, when no image is given.
    #[arg(long)]
    height: Option<f64>,

    /// Cap on the working image's longer side.
    #[arg(long, conflicts_with = "no_downscale")]
    max_side: Option<f64>,

    /// Vote at source resolution.
    #[arg(long)]
    no_downscale: bool,

    /// Cluster radius in working pixels.
    #[arg(long)]
    cluster_radius: Option<f64>,

    /// Minimal fold-angle in degrees for a segment to vote.
    #[arg(long)]
    min_angle: Option<f64>,

    /// Where to write the JSON report.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Emit JSON log lines (requires the `tracing` feature).
    #[arg(long)]
    json_log: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] VpConfigError),
    #[error(transparent)]
    Io(#[from] VpIoError),
    #[error(transparent)]
    Detect(#[from] DetectError),
    #[error(transparent)]
    Estimate(#[from] vanishing_point::EstimateError),
    #[cfg(not(feature = "tracing"))]
    #[error(transparent)]
    Logger(#[from] log::SetLoggerError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&cli) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(cli: &Cli) -> Result<(), CliError> {
    vanishing_point::core::init_with_level(cli.log_level)?;
    if cli.json_log {
        warn!("--json-log needs the `tracing` feature; using plain logs");
    }
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(cli: &Cli) -> Result<(), CliError> {
    vanishing_point::core::init_tracing(cli.json_log);
    log::set_max_level(cli.log_level);
    Ok(())
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(cli)))]
fn run(cli: Cli) -> Result<(), CliError> {
    let (mut cfg, config_path) = match &cli.config {
        Some(path) => (VpDetectConfig::load_json(path)?, path.clone()),
        None => (VpDetectConfig::default(), PathBuf::from("<command line>")),
    };
    let base_dir = cli
        .config
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_default();

    apply_overrides(&mut cfg, &cli);

    let source = resolve_source_bounds(&cfg, &base_dir)?;
    let frame = cfg.working_frame(source)?;
    info!(
        "source {}x{}, working {}x{} (scale {:.4})",
        source.width, source.height, frame.working.width, frame.working.height, frame.scale
    );

    let segments = cfg.load_segments(&base_dir)?;
    info!("loaded {} segments", segments.len());

    let mut report = VpDetectReport::new(&cfg, &config_path, frame, segments.len());
    let out_path = cfg.output_path();
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(VpIoError::from)?;
    }

    let estimator = VanishingPointEstimator::new(cfg.estimator.clone());
    match estimator.estimate_in_frame(&segments, &frame) {
        Ok(res) => {
            report.set_result(&res);
            report.write_json(&out_path)?;
            match &report.vanishing_point {
                Some(vp) => println!(
                    "vanishing point: ({:.2}, {:.2}) weight={} [working ({:.2}, {:.2})]",
                    vp.source.x, vp.source.y, vp.weight, vp.working.x, vp.working.y
                ),
                None => println!("No vanishing point found."),
            }
            println!("wrote report JSON to {}", out_path.display());
            Ok(())
        }
        Err(err) => {
            warn!("estimation failed: {err}");
            report.set_error(&err);
            report.write_json(&out_path)?;
            Err(err.into())
        }
    }
}

fn apply_overrides(cfg: &mut VpDetectConfig, cli: &Cli) {
    // Flag paths are relative to the working directory, not to the config.
    if let Some(path) = &cli.segments {
        cfg.segments = None;
        cfg.segments_path = Some(absolute_lossy(path));
    }
    if let Some(path) = &cli.image {
        cfg.image_path = Some(absolute_lossy(path));
    }
    if cli.width.is_some() {
        cfg.width = cli.width;
    }
    if cli.height.is_some() {
        cfg.height = cli.height;
    }
    if cli.no_downscale {
        cfg.max_working_side = None;
    } else if cli.max_side.is_some() {
        cfg.max_working_side = cli.max_side;
    }
    if let Some(r) = cli.cluster_radius {
        cfg.estimator.cluster_radius_px = r;
    }
    if let Some(a) = cli.min_angle {
        cfg.estimator.min_fold_angle_deg = a;
    }
    if let Some(out) = &cli.output {
        cfg.output_path = Some(out.to_string_lossy().into_owned());
    }
}

/// Explicit width/height win; otherwise read the image header.
fn resolve_source_bounds(cfg: &VpDetectConfig, base_dir: &Path) -> Result<ImageBounds, CliError> {
    if let Some(bounds) = cfg.explicit_bounds() {
        return Ok(bounds);
    }
    match &cfg.image_path {
        Some(path) => Ok(detect::source_bounds_from_image(base_dir.join(path))?),
        None => Err(VpConfigError::MissingFrameSize.into()),
    }
}

fn absolute_lossy(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}
