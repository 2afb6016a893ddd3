use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use heliopatch_core::detection::locate_disk;
use heliopatch_core::filters::resample::resize_bilinear;
use heliopatch_core::io::image_io::load_image;
use heliopatch_core::pipeline::PipelineConfig;
use heliopatch_core::solar::{generate_global_grid, orientation_from_datetime};

use super::resolve_timestamp;

#[derive(Args)]
pub struct GridArgs {
    /// Full-disk input image
    pub file: PathBuf,

    /// Observation timestamp (YYYY-MM-DDTHH:MM:SS); filename parsed otherwise
    #[arg(long)]
    pub timestamp: Option<String>,

    /// Output JSON path
    #[arg(short, long, default_value = "grid.json")]
    pub output: PathBuf,
}

pub fn run(args: &GridArgs) -> Result<()> {
    let config = PipelineConfig::default();
    let observed_at = resolve_timestamp(&args.file, args.timestamp.as_deref())?;

    let frame = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let working = resize_bilinear(&frame.data, config.working_size, config.working_size);

    let disk = locate_disk(&working, &config.disk).context("Disk detection failed")?;
    let orientation = orientation_from_datetime(observed_at, config.delta_t_seconds);
    let grid = generate_global_grid(&orientation, &disk, config.grid_points);

    println!(
        "Disk at ({:.1}, {:.1}), r = {:.1} px; {} lat + {} lon lines",
        disk.cx,
        disk.cy,
        disk.r,
        grid.lat_lines.len(),
        grid.lon_lines.len()
    );

    let json = serde_json::json!({
        "disk": disk,
        "orientation": orientation,
        "grid": grid,
    });
    std::fs::write(&args.output, serde_json::to_string_pretty(&json)?)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Grid written to {}", args.output.display());
    Ok(())
}
