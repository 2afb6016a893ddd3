use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use heliopatch_core::io::image_io::{load_image, save_patch};
use heliopatch_core::pipeline::{
    process_image_reported, ImageResult, PipelineConfig, PipelineStage, ProgressReporter,
};

use super::resolve_timestamp;

#[derive(Args)]
pub struct ProcessArgs {
    /// Full-disk input images
    pub files: Vec<PathBuf>,

    /// Pipeline config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Observation timestamp override (only valid for a single input)
    #[arg(long)]
    pub timestamp: Option<String>,

    /// Rectified patch edge length in pixels
    #[arg(long)]
    pub patch_size: Option<usize>,

    /// TT - UT correction in seconds
    #[arg(long)]
    pub delta_t: Option<f64>,

    /// Output directory for patches and metadata
    #[arg(short, long, default_value = "heliopatch-out")]
    pub output: PathBuf,
}

pub fn run(args: &ProcessArgs) -> Result<()> {
    anyhow::ensure!(!args.files.is_empty(), "No input images given");
    anyhow::ensure!(
        args.timestamp.is_none() || args.files.len() == 1,
        "--timestamp only applies to a single input image"
    );

    let mut config: PipelineConfig = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid pipeline config")?
    } else {
        PipelineConfig::default()
    };
    if let Some(patch_size) = args.patch_size {
        config.patch_size = patch_size;
    }
    if let Some(delta_t) = args.delta_t {
        config.delta_t_seconds = delta_t;
    }

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Cannot create {}", args.output.display()))?;

    let mut failures = 0usize;
    for file in &args.files {
        println!("{} {}", style("Processing").cyan().bold(), file.display());
        match process_one(file, args, &config) {
            Ok(result) => {
                println!(
                    "  disk ({:.1}, {:.1}) r={:.1}  B0={:+.2} P0={:+.2} L0={:.2}  {} patch(es)",
                    result.disk.cx,
                    result.disk.cy,
                    result.disk.r,
                    result.orientation.b0,
                    result.orientation.p0,
                    result.orientation.l0,
                    result.patches.len()
                );
            }
            Err(err) => {
                // One bad image never aborts the batch.
                failures += 1;
                eprintln!("  {} {err:#}", style("failed:").red().bold());
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} image(s) failed", args.files.len());
    }
    Ok(())
}

fn process_one(file: &Path, args: &ProcessArgs, config: &PipelineConfig) -> Result<ImageResult> {
    let observed_at = resolve_timestamp(file, args.timestamp.as_deref())?;
    let frame = load_image(file).with_context(|| format!("Failed to load {}", file.display()))?;

    let reporter = BarReporter::new();
    let result = process_image_reported(&frame, observed_at, config, &reporter)?;
    reporter.clear();

    let stem = file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");

    for (index, entry) in result.patches.iter().enumerate() {
        let patch_path = args.output.join(format!("{stem}_patch{index:02}.png"));
        save_patch(&entry.patch, &patch_path)?;
    }

    let metadata = serde_json::json!({
        "source": file.display().to_string(),
        "observed_at": observed_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        "disk": result.disk,
        "orientation": result.orientation,
        "global_grid": result.global_grid,
        "patches": result
            .patches
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                serde_json::json!({
                    "file": format!("{stem}_patch{index:02}.png"),
                    "center": { "x": entry.patch.center.0, "y": entry.patch.center.1 },
                    "candidate": entry.candidate,
                    "grid": entry.grid,
                })
            })
            .collect::<Vec<_>>(),
    });
    let metadata_path = args.output.join(format!("{stem}.json"));
    std::fs::write(&metadata_path, serde_json::to_string_pretty(&metadata)?)
        .with_context(|| format!("Failed to write {}", metadata_path.display()))?;

    Ok(result)
}

/// Progress reporter backed by an indicatif bar, one stage at a time.
struct BarReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl BarReporter {
    fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn clear(&self) {
        if let Some(bar) = self.bar.lock().expect("reporter lock").take() {
            bar.finish_and_clear();
        }
    }
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        let bar = match total_items {
            Some(total) => {
                let bar = ProgressBar::new(total as u64);
                bar.set_style(
                    ProgressStyle::with_template("  {msg:<26} [{bar:30}] {pos}/{len}")
                        .expect("valid template")
                        .progress_chars("=> "),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.enable_steady_tick(std::time::Duration::from_millis(120));
                bar
            }
        };
        bar.set_message(stage.to_string());
        *self.bar.lock().expect("reporter lock") = Some(bar);
    }

    fn advance(&self, items_done: usize) {
        if let Some(ref bar) = *self.bar.lock().expect("reporter lock") {
            bar.inc(items_done as u64);
        }
    }

    fn finish_stage(&self) {
        if let Some(bar) = self.bar.lock().expect("reporter lock").take() {
            bar.finish_and_clear();
        }
    }
}
