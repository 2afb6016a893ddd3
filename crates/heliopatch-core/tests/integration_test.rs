mod common;

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use ndarray::Array2;

use common::{add_blob, standard_disk, synthetic_disk};
use heliopatch_core::error::HeliopatchError;
use heliopatch_core::frame::Frame;
use heliopatch_core::pipeline::config::PipelineConfig;
use heliopatch_core::pipeline::orchestrator::{process_batch, process_image};

fn observation_time() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 7, 14)
        .unwrap()
        .and_hms_opt(15, 30, 0)
        .unwrap()
}

fn spotted_frame() -> Frame {
    let mut image = synthetic_disk(2048, &standard_disk(), 0.8);
    add_blob(&mut image, 1424.0, 824.0, 20.0, 0.1);
    Frame::new(image, 16)
}

#[test]
fn test_pipeline_single_spot() {
    let frame = spotted_frame();
    let result = process_image(&frame, observation_time(), &PipelineConfig::default()).unwrap();

    assert_abs_diff_eq!(result.disk.cx, 1024.0, epsilon = 6.0);
    assert_abs_diff_eq!(result.disk.cy, 1024.0, epsilon = 6.0);
    assert_abs_diff_eq!(result.disk.r, 900.0, epsilon = 5.0);

    assert_abs_diff_eq!(result.orientation.b0, 4.2405, epsilon = 0.05);
    assert_abs_diff_eq!(result.orientation.p0, 3.3220, epsilon = 0.05);

    assert!(!result.global_grid.lat_lines.is_empty());
    assert!(!result.global_grid.lon_lines.is_empty());

    assert_eq!(result.patches.len(), 1, "Expected exactly one candidate");
    let patch = &result.patches[0];
    assert_abs_diff_eq!(patch.candidate.cx, 1424.0, epsilon = 8.0);
    assert_abs_diff_eq!(patch.candidate.cy, 824.0, epsilon = 8.0);
    assert_eq!(patch.patch.size(), 512);
    assert_eq!(
        patch.patch.center,
        (patch.candidate.cx, patch.candidate.cy)
    );

    // The spot sits near the patch center after rectification.
    let center = patch.patch.data[[256, 256]];
    assert!(center < 0.4, "Patch center is not dark: {center}");
    assert!(patch.patch.valid[[256, 256]]);
}

#[test]
fn test_pipeline_spotless_disk_returns_no_patches() {
    let frame = Frame::new(synthetic_disk(2048, &standard_disk(), 0.8), 16);
    let result = process_image(&frame, observation_time(), &PipelineConfig::default()).unwrap();
    assert!(result.patches.is_empty());
}

#[test]
fn test_pipeline_close_spot_pair_is_merged() {
    let mut image = synthetic_disk(2048, &standard_disk(), 0.8);
    add_blob(&mut image, 1000.0, 1000.0, 15.0, 0.1);
    add_blob(&mut image, 1080.0, 1000.0, 15.0, 0.1);
    let frame = Frame::new(image, 16);

    let result = process_image(&frame, observation_time(), &PipelineConfig::default()).unwrap();
    assert_eq!(result.patches.len(), 1, "Close pair should merge");
    assert_abs_diff_eq!(result.patches[0].candidate.cx, 1040.0, epsilon = 8.0);
}

#[test]
fn test_pipeline_distant_spots_stay_separate() {
    let mut image = synthetic_disk(2048, &standard_disk(), 0.8);
    add_blob(&mut image, 700.0, 700.0, 15.0, 0.1);
    add_blob(&mut image, 1400.0, 1300.0, 15.0, 0.1);
    let frame = Frame::new(image, 16);

    let result = process_image(&frame, observation_time(), &PipelineConfig::default()).unwrap();
    assert_eq!(result.patches.len(), 2);
}

#[test]
fn test_pipeline_rejects_oversize_patch() {
    let frame = spotted_frame();
    let config = PipelineConfig {
        patch_size: 4096,
        ..PipelineConfig::default()
    };
    let err = process_image(&frame, observation_time(), &config).unwrap_err();
    assert!(matches!(err, HeliopatchError::PatchTooLarge { .. }));
}

#[test]
fn test_pipeline_rejects_empty_frame() {
    let frame = Frame::new(Array2::<f32>::zeros((0, 0)), 16);
    let err =
        process_image(&frame, observation_time(), &PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, HeliopatchError::InvalidDimensions { .. }));
}

#[test]
fn test_pipeline_resamples_other_resolutions() {
    // A 1024 px input is normalized up to the working resolution, so the
    // reported geometry is still in working-resolution pixels.
    let half_disk = heliopatch_core::frame::DiskGeometry {
        cx: 512.0,
        cy: 512.0,
        r: 450.0,
    };
    let mut image = synthetic_disk(1024, &half_disk, 0.8);
    add_blob(&mut image, 712.0, 412.0, 10.0, 0.1);
    let frame = Frame::new(image, 16);

    let result = process_image(&frame, observation_time(), &PipelineConfig::default()).unwrap();
    assert_abs_diff_eq!(result.disk.cx, 1024.0, epsilon = 8.0);
    assert_abs_diff_eq!(result.disk.r, 900.0, epsilon = 8.0);
    assert_eq!(result.patches.len(), 1);
    assert_abs_diff_eq!(result.patches[0].candidate.cx, 1424.0, epsilon = 10.0);
}

#[test]
fn test_batch_keeps_going_after_a_bad_image() {
    let good = spotted_frame();
    let bad = Frame::new(Array2::from_elem((2048, 2048), 0.5f32), 16);
    let items = vec![
        (good, observation_time()),
        (bad, observation_time()),
    ];

    let results = process_batch(&items, &PipelineConfig::default());
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(
        results[1].as_ref().unwrap_err(),
        HeliopatchError::NoDiskFound
    ));
}
