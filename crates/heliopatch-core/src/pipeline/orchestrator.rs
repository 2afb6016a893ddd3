use chrono::NaiveDateTime;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::detection::candidates::{detect_candidates, merge_nearby_candidates};
use crate::detection::disk::locate_disk;
use crate::detection::segmentation::segment_candidate_mask;
use crate::error::{HeliopatchError, Result};
use crate::filters::resample::resize_bilinear;
use crate::frame::Frame;
use crate::solar::grid::{generate_global_grid, generate_patch_grid};
use crate::solar::orientation::orientation_from_datetime;
use crate::solar::rectify::rectify_patch_from_orientation;

use super::config::PipelineConfig;
use super::types::{ImageResult, NoOpReporter, PatchResult, PipelineStage, ProgressReporter};

/// Run the full pipeline for a single image:
/// normalize -> locate disk -> orientation -> segment -> extract/merge
/// candidates -> per candidate, rectify patch + patch grid.
///
/// Zero candidates is a valid outcome and returns an `ImageResult` with an
/// empty `patches` list. A missing disk is fatal for this image.
pub fn process_image(
    frame: &Frame,
    observed_at: NaiveDateTime,
    config: &PipelineConfig,
) -> Result<ImageResult> {
    process_image_reported(frame, observed_at, config, &NoOpReporter)
}

/// `process_image` with a progress reporter for UI feedback.
pub fn process_image_reported(
    frame: &Frame,
    observed_at: NaiveDateTime,
    config: &PipelineConfig,
    reporter: &dyn ProgressReporter,
) -> Result<ImageResult> {
    if config.patch_size == 0 || config.patch_size > config.working_size {
        return Err(HeliopatchError::PatchTooLarge {
            patch_size: config.patch_size,
            working_size: config.working_size,
        });
    }
    if frame.width() == 0 || frame.height() == 0 {
        return Err(HeliopatchError::InvalidDimensions {
            width: frame.width() as u32,
            height: frame.height() as u32,
        });
    }

    // Detection parameters are tuned for the working resolution, so the
    // image is normalized before anything looks at it.
    reporter.begin_stage(PipelineStage::Normalizing, None);
    let working = resize_bilinear(&frame.data, config.working_size, config.working_size);
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::DiskDetection, None);
    let disk = locate_disk(&working, &config.disk)?;
    reporter.finish_stage();
    info!(cx = disk.cx, cy = disk.cy, r = disk.r, "Solar disk located");

    let orientation = orientation_from_datetime(observed_at, config.delta_t_seconds);
    info!(
        b0 = orientation.b0,
        p0 = orientation.p0,
        l0 = orientation.l0,
        "Disk orientation"
    );

    reporter.begin_stage(PipelineStage::Segmentation, None);
    let (candidate_mask, disk_mask) = segment_candidate_mask(&working, &disk, &config.segmentation);
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::CandidateExtraction, None);
    let raw = detect_candidates(&candidate_mask, &disk_mask, &config.candidates);
    let candidates = merge_nearby_candidates(&raw, &config.candidates);
    reporter.finish_stage();
    info!(
        raw = raw.len(),
        merged = candidates.len(),
        "Candidate regions"
    );

    reporter.begin_stage(PipelineStage::GridGeneration, None);
    let global_grid = generate_global_grid(&orientation, &disk, config.grid_points);
    reporter.finish_stage();

    // Candidates are independent: each worker reads the shared image and the
    // per-image geometry, which stay immutable for the rest of the run.
    reporter.begin_stage(PipelineStage::Rectification, Some(candidates.len()));
    let half = (config.patch_size / 2) as f64;
    let patches: Vec<PatchResult> = candidates
        .into_par_iter()
        .map(|candidate| {
            let patch = rectify_patch_from_orientation(
                &working,
                candidate.cx,
                candidate.cy,
                config.patch_size,
                &disk,
                &orientation,
            );
            let grid = generate_patch_grid(
                &global_grid,
                (candidate.cx - half, candidate.cy - half),
                config.patch_size,
                &disk,
                &orientation,
            );
            reporter.advance(1);
            PatchResult {
                candidate,
                patch,
                grid,
            }
        })
        .collect();
    reporter.finish_stage();

    if patches.is_empty() {
        info!("No candidate regions on this disk; returning zero patches");
    }

    Ok(ImageResult {
        disk,
        orientation,
        global_grid,
        patches,
    })
}

/// Process a batch of independent images in parallel.
///
/// A failing image is logged and skipped; it never aborts the batch.
/// Results are returned in input order.
pub fn process_batch(
    items: &[(Frame, NaiveDateTime)],
    config: &PipelineConfig,
) -> Vec<Result<ImageResult>> {
    items
        .par_iter()
        .map(|(frame, observed_at)| {
            let result = process_image(frame, *observed_at, config);
            if let Err(ref err) = result {
                warn!(error = %err, "Image processing failed; continuing with next");
            }
            result
        })
        .collect()
}
