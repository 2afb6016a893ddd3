mod common;

use ndarray::Array2;

use heliopatch_core::detection::config::SegmentationConfig;
use heliopatch_core::detection::morphology::{close, dilate, erode, open};
use heliopatch_core::detection::segmentation::{disk_mask, segment_candidate_mask};
use heliopatch_core::detection::threshold::{darkest_class_mask, multi_otsu_thresholds};
use heliopatch_core::frame::DiskGeometry;

fn small_disk() -> DiskGeometry {
    DiskGeometry {
        cx: 256.0,
        cy: 256.0,
        r: 200.0,
    }
}

#[test]
fn test_multi_otsu_separates_three_levels() {
    // Trimodal image: dark spot pixels, mid penumbra, bright photosphere.
    let mut data = Array2::from_elem((64, 64), 0.9f32);
    for row in 0..64 {
        for col in 0..16 {
            data[[row, col]] = 0.1;
        }
        for col in 16..32 {
            data[[row, col]] = 0.5;
        }
    }
    let mask = Array2::from_elem((64, 64), true);

    let (t_low, t_high) = multi_otsu_thresholds(&data, &mask).unwrap();
    assert!(t_low > 0.1 && t_low <= 0.5, "t_low = {t_low}");
    assert!(t_high > 0.5 && t_high <= 0.9, "t_high = {t_high}");

    let dark = darkest_class_mask(&data, &mask, t_low);
    assert_eq!(dark.iter().filter(|&&v| v).count(), 64 * 16);
    assert!(dark[[0, 0]]);
    assert!(!dark[[0, 20]]);
    assert!(!dark[[0, 40]]);
}

#[test]
fn test_multi_otsu_ignores_masked_out_pixels() {
    // Without the mask the black background would dominate the histogram.
    let mut data = Array2::from_elem((64, 64), 0.0f32);
    let mut mask = Array2::from_elem((64, 64), false);
    for row in 16..48 {
        for col in 16..48 {
            data[[row, col]] = if col < 24 { 0.2 } else { 0.8 };
            mask[[row, col]] = true;
        }
    }

    let (t_low, _) = multi_otsu_thresholds(&data, &mask).unwrap();
    assert!(t_low > 0.2, "Background zeros leaked into the histogram");
}

#[test]
fn test_multi_otsu_empty_mask_is_none() {
    let data = Array2::from_elem((16, 16), 0.5f32);
    let mask = Array2::from_elem((16, 16), false);
    assert!(multi_otsu_thresholds(&data, &mask).is_none());
}

#[test]
fn test_morphology_close_bridges_gap() {
    let mut mask = Array2::from_elem((16, 16), false);
    for col in 2..6 {
        mask[[8, col]] = true;
    }
    for col in 7..11 {
        mask[[8, col]] = true;
    }
    let closed = close(&mask, 3);
    assert!(closed[[8, 6]], "Closing must bridge a one-pixel gap");
}

#[test]
fn test_morphology_open_removes_speck() {
    let mut mask = Array2::from_elem((16, 16), false);
    mask[[8, 8]] = true;
    let opened = open(&mask, 3);
    assert!(opened.iter().all(|&v| !v));
}

#[test]
fn test_morphology_dilate_erode_inverse_on_large_blob() {
    let mut mask = Array2::from_elem((32, 32), false);
    for row in 8..24 {
        for col in 8..24 {
            mask[[row, col]] = true;
        }
    }
    assert_eq!(erode(&dilate(&mask, 3), 3), mask);
}

#[test]
fn test_disk_mask_matches_geometry() {
    let disk = small_disk();
    let mask = disk_mask(512, 512, &disk);
    assert!(mask[[256, 256]]);
    assert!(mask[[256, 256 + 199]]);
    assert!(!mask[[256, 256 + 201]]);
    assert!(!mask[[0, 0]]);
}

#[test]
fn test_segmentation_finds_dark_blob() {
    let disk = small_disk();
    let mut image = common::synthetic_disk(512, &disk, 0.8);
    common::add_blob(&mut image, 320.0, 200.0, 8.0, 0.1);

    let (candidate, on_disk) = segment_candidate_mask(&image, &disk, &SegmentationConfig::default());

    assert!(candidate[[200, 320]], "Blob center must be foreground");
    // Clean photosphere stays background.
    assert!(!candidate[[256, 200]]);
    // Off-disk pixels never enter the candidate mask.
    for ((row, col), &v) in candidate.indexed_iter() {
        if v {
            let dilation_slack = 2.0 * SegmentationConfig::default().morphology_kernel as f64;
            let dx = col as f64 - disk.cx;
            let dy = row as f64 - disk.cy;
            assert!(
                (dx * dx + dy * dy).sqrt() <= disk.r + dilation_slack,
                "Foreground far off the disk at ({row}, {col})"
            );
        }
    }
    assert!(on_disk[[256, 256]]);
    assert!(!on_disk[[0, 0]]);
}

#[test]
fn test_segmentation_spotless_disk_yields_nothing() {
    // A limb-darkened disk with no spots: the darkest Otsu class is the limb
    // annulus, far too large to be sunspots, so segmentation bails out.
    let disk = small_disk();
    let image = Array2::from_shape_fn((512, 512), |(row, col)| {
        let dx = col as f64 - disk.cx;
        let dy = row as f64 - disk.cy;
        let d = (dx * dx + dy * dy).sqrt();
        if d <= disk.r {
            0.9 - 0.2 * (d / disk.r) as f32
        } else {
            0.0
        }
    });

    let (candidate, _) = segment_candidate_mask(&image, &disk, &SegmentationConfig::default());
    assert!(candidate.iter().all(|&v| !v));
}
