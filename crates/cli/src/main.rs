use std::path::PathBuf;
use std::process;
use std::sync::atomic::AtomicBool;

use clap::Parser;

use depthface_core::detection::infrastructure::variance_classifier::VarianceWindowClassifier;
use depthface_core::pipeline::config::DetectionConfig;
use depthface_core::pipeline::frame_loop::run_frames;
use depthface_core::pipeline::frame_pipeline::FramePipeline;
use depthface_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use depthface_core::sensor::domain::depth_source::DepthSource;
use depthface_core::sensor::domain::undistortion::UndistortionProvider;
use depthface_core::sensor::infrastructure::pinhole_undistorter::PinholeUndistorter;
use depthface_core::sensor::infrastructure::synthetic_source::{Blob, SyntheticDepthSource};

/// Face candidate detection on depth frames.
#[derive(Parser)]
#[command(name = "depthface")]
struct Cli {
    /// JSON config file (missing fields take built-in defaults).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of synthetic frames to stream.
    #[arg(long, default_value = "30")]
    frames: usize,

    /// Physical raster extent in millimeters.
    #[arg(long)]
    extent: Option<f64>,

    /// Raster cells per millimeter.
    #[arg(long)]
    resolution: Option<f64>,

    /// Classifier window side in raster cells.
    #[arg(long)]
    face_size: Option<usize>,

    /// Maximum hole-fill distance in cells.
    #[arg(long)]
    fill_radius: Option<u8>,

    /// Merge detections closer than this many millimeters.
    #[arg(long)]
    merge_distance: Option<f64>,

    /// Elevation variance ceiling for the window classifier.
    #[arg(long, default_value = "40.0")]
    max_variance: f64,

    /// Wall depth of the synthetic scene in meters.
    #[arg(long, default_value = "2.0")]
    wall_depth: f32,

    /// Depth of a raised blob in meters (omit for a bare wall).
    #[arg(long)]
    blob_depth: Option<f32>,

    /// Blob radius in sensor pixels.
    #[arg(long, default_value = "40")]
    blob_radius: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;
    let config = build_config(&cli)?;

    let mut source = build_source(&cli);
    let intrinsics = source.intrinsics();
    let map = PinholeUndistorter::default().lookup_table(
        &intrinsics,
        source.rows(),
        source.cols(),
    );
    let classifier = VarianceWindowClassifier::new(config.face_size, cli.max_variance);
    let pipeline = FramePipeline::new(&config, intrinsics, map, Box::new(classifier))?;

    let shutdown = AtomicBool::new(false);
    let mut logger = StdoutPipelineLogger::default();
    log::info!(
        "Streaming {} frames over a {}x{} raster",
        cli.frames,
        config.raster_side(),
        config.raster_side()
    );

    let frames = run_frames(
        &mut source,
        &pipeline,
        &shutdown,
        &mut logger,
        |index, faces| {
            for face in faces {
                log::info!(
                    "frame {index}: face at ({:.0}, {:.0}, {:.0}) mm, pixel ({:.1}, {:.1}), {} windows",
                    face.position.x,
                    face.position.y,
                    face.position.z,
                    face.pixel.0,
                    face.pixel.1,
                    face.count
                );
            }
        },
    )?;
    log::info!("Processed {frames} frames");
    Ok(())
}

fn build_config(cli: &Cli) -> Result<DetectionConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => DetectionConfig::from_file(path)?,
        None => DetectionConfig::default(),
    };
    if let Some(extent) = cli.extent {
        config.extent_mm = extent;
    }
    if let Some(resolution) = cli.resolution {
        config.resolution = resolution;
    }
    if let Some(face_size) = cli.face_size {
        config.face_size = face_size;
    }
    if let Some(fill_radius) = cli.fill_radius {
        config.fill_radius = fill_radius;
    }
    if let Some(merge) = cli.merge_distance {
        config.merge_distance_mm = merge;
    }
    config.validate()?;
    Ok(config)
}

fn build_source(cli: &Cli) -> SyntheticDepthSource {
    let blob = cli.blob_depth.map(|depth_m| Blob {
        center_row: 212,
        center_col: 256,
        radius_px: cli.blob_radius,
        depth_m,
    });
    SyntheticDepthSource::new(cli.wall_depth, blob, cli.frames)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.frames == 0 {
        return Err("Frame count must be at least 1".into());
    }
    if !cli.max_variance.is_finite() || cli.max_variance < 0.0 {
        return Err(format!(
            "Max variance must be non-negative, got {}",
            cli.max_variance
        )
        .into());
    }
    if cli.wall_depth < 0.0 {
        return Err(format!("Wall depth must be non-negative, got {}", cli.wall_depth).into());
    }
    if let Some(depth) = cli.blob_depth {
        if depth <= 0.0 {
            return Err(format!("Blob depth must be positive, got {depth}").into());
        }
        if depth >= cli.wall_depth {
            return Err(format!(
                "Blob depth ({depth} m) must be closer than the wall ({} m)",
                cli.wall_depth
            )
            .into());
        }
    }
    if cli.blob_radius == 0 {
        return Err("Blob radius must be at least 1 pixel".into());
    }
    Ok(())
}
