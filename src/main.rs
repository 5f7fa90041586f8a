use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use visdiff::{DiffEngine, DiffOptions, SizePolicy};

#[derive(Parser)]
#[command(name = "visdiff")]
#[command(about = "Hybrid SSIM + CIELAB ΔE visual diff")]
struct Cli {
    /// Reference screenshot
    #[arg(long, value_name = "PATH")]
    baseline: PathBuf,

    /// Screenshot under test
    #[arg(long, value_name = "PATH")]
    candidate: PathBuf,

    /// Directory for baseline_marked.png, candidate_marked.png and diff_mask.png
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Minimum contour area for glyph-level (colour) regions
    #[arg(long, default_value_t = 8)]
    min_area_small: u32,

    /// Minimum contour area for block-level (structural) regions
    #[arg(long, default_value_t = 40)]
    min_area_big: u32,

    /// Closing passes applied to the structural mask
    #[arg(long = "close-iter", default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..))]
    close_iterations: u8,

    /// ΔE above which a pixel counts as a colour change
    #[arg(long = "delta-e", default_value_t = 15.0)]
    delta_e_threshold: f32,

    /// Fail instead of resizing when the images differ in size
    #[arg(long)]
    strict_size: bool,

    /// Exit with failure when the score falls below this value
    #[arg(long, value_name = "SCORE")]
    threshold: Option<f64>,

    /// Save intermediate masks to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut options = DiffOptions::default()
        .with_min_areas(args.min_area_small, args.min_area_big)
        .with_close_iterations(args.close_iterations)
        .with_delta_e_threshold(args.delta_e_threshold);
    if args.strict_size {
        options = options.with_size_policy(SizePolicy::Strict);
    }
    if let Some(dir) = args.out_dir {
        options = options.with_output_dir(dir);
    }

    let mut engine = DiffEngine::new(options);
    if let Some(debug_dir) = args.debug_out {
        engine = engine.with_debug(debug_dir)?;
    }

    let report = engine.compare(&args.baseline, &args.candidate)?;

    println!("SSIM: {:.4}", report.score);
    println!("Size: {}x{}", report.width, report.height);
    println!(
        "Regions: {} ({} edge strips suppressed)",
        report.regions.len(),
        report.suppressed
    );
    if args.verbose {
        for (i, region) in report.regions.iter().enumerate() {
            println!(
                "  {} {:?} at ({}, {}) {}x{} area={:.1}",
                i + 1,
                region.pass,
                region.x,
                region.y,
                region.width,
                region.height,
                region.area
            );
        }
    }
    println!("Artefacts saved to {}", report.artefacts.dir().display());

    if let Some(threshold) = args.threshold {
        if !report.passes(threshold) {
            eprintln!(
                "Visual regression detected: SSIM={:.4} < {}",
                report.score, threshold
            );
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}
