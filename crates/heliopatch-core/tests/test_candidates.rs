use ndarray::Array2;

use heliopatch_core::detection::candidates::{
    detect_candidates, merge_nearby_candidates, CandidateRegion,
};
use heliopatch_core::detection::components::{connected_components, BoundingBox};
use heliopatch_core::detection::config::CandidateConfig;

fn mask_with(size: usize, pixels: &[(usize, usize)]) -> Array2<bool> {
    let mut mask = Array2::from_elem((size, size), false);
    for &(row, col) in pixels {
        mask[[row, col]] = true;
    }
    mask
}

fn square(mask: &mut Array2<bool>, top: usize, left: usize, edge: usize) {
    for row in top..top + edge {
        for col in left..left + edge {
            mask[[row, col]] = true;
        }
    }
}

fn region(cx: f64, cy: f64, edge: usize) -> CandidateRegion {
    let half = edge / 2;
    CandidateRegion {
        cx,
        cy,
        bbox: BoundingBox {
            min_row: cy as usize - half,
            max_row: cy as usize + half,
            min_col: cx as usize - half,
            max_col: cx as usize + half,
        },
    }
}

fn config(merge_distance: f64, max_merged_size: usize) -> CandidateConfig {
    CandidateConfig {
        min_area: 10,
        merge_distance,
        max_merged_size,
    }
}

#[test]
fn test_connected_components_eight_connectivity() {
    // A diagonal staircase is a single component under 8-connectivity.
    let mask = mask_with(8, &[(1, 1), (2, 2), (3, 3), (4, 4)]);
    let components = connected_components(&mask);
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].area, 4);
    assert_eq!(components[0].bbox.width(), 4);
    assert_eq!(components[0].bbox.height(), 4);
}

#[test]
fn test_connected_components_stats() {
    let mut mask = Array2::from_elem((32, 32), false);
    square(&mut mask, 4, 4, 5);
    square(&mut mask, 20, 10, 3);
    let components = connected_components(&mask);

    assert_eq!(components.len(), 2);
    // Sorted by area descending.
    assert_eq!(components[0].area, 25);
    assert_eq!(components[1].area, 9);
    assert_eq!(components[0].centroid, (6.0, 6.0));
    assert_eq!(components[1].centroid, (11.0, 21.0));
}

#[test]
fn test_detect_candidates_min_area_filter() {
    let mut mask = Array2::from_elem((64, 64), false);
    square(&mut mask, 10, 10, 4); // 16 px, kept
    square(&mut mask, 40, 40, 2); // 4 px, dropped
    let disk = Array2::from_elem((64, 64), true);

    let candidates = detect_candidates(&mask, &disk, &config(200.0, 300));
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].cx, 11.5);
    assert_eq!(candidates[0].cy, 11.5);
}

#[test]
fn test_detect_candidates_respects_disk_mask() {
    let mut mask = Array2::from_elem((64, 64), false);
    square(&mut mask, 10, 10, 4);
    square(&mut mask, 40, 40, 4);
    // Only the first square sits inside the "disk".
    let mut disk = Array2::from_elem((64, 64), false);
    for row in 0..32 {
        for col in 0..32 {
            disk[[row, col]] = true;
        }
    }

    let candidates = detect_candidates(&mask, &disk, &config(200.0, 300));
    assert_eq!(candidates.len(), 1);
    assert!(candidates[0].cx < 32.0);
}

#[test]
fn test_detect_candidates_drops_centroid_off_disk() {
    // A hollow ring whose centroid falls into a disk-mask hole: the component
    // survives intersection but its center is not a disk pixel.
    let mut ring = Array2::from_elem((32, 32), false);
    square(&mut ring, 12, 12, 7);
    ring[[15, 15]] = false;
    let mut disk = Array2::from_elem((32, 32), true);
    disk[[15, 15]] = false; // centroid pixel

    let candidates = detect_candidates(&ring, &disk, &config(200.0, 300));
    assert!(candidates.is_empty(), "Centroid off the disk mask must reject");
}

#[test]
fn test_merge_within_distance_uses_mean_center() {
    let a = region(100.0, 100.0, 21);
    let b = region(150.0, 100.0, 21);
    let merged = merge_nearby_candidates(&[a, b], &config(200.0, 300));

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].cx, 125.0);
    assert_eq!(merged[0].cy, 100.0);
    // Union box spans both members.
    assert_eq!(merged[0].bbox.min_col, 90);
    assert_eq!(merged[0].bbox.max_col, 160);
}

#[test]
fn test_merge_beyond_distance_keeps_candidates_apart() {
    let a = region(100.0, 100.0, 21);
    let b = region(600.0, 100.0, 21);
    let merged = merge_nearby_candidates(&[a.clone(), b.clone()], &config(200.0, 300));
    assert_eq!(merged, vec![a, b]);
}

#[test]
fn test_merge_rejected_when_union_box_oversize() {
    // Centroids within range but the union box edge exceeds the cap: both
    // members must come through unchanged rather than as one giant region.
    let a = region(100.0, 100.0, 161);
    let b = region(280.0, 100.0, 161);
    let merged = merge_nearby_candidates(&[a.clone(), b.clone()], &config(200.0, 300));
    assert_eq!(merged, vec![a, b]);
}

#[test]
fn test_merge_group_of_three() {
    let a = region(100.0, 100.0, 11);
    let b = region(140.0, 100.0, 11);
    let c = region(100.0, 140.0, 11);
    let merged = merge_nearby_candidates(&[a, b, c], &config(60.0, 300));

    assert_eq!(merged.len(), 1);
    assert!((merged[0].cx - 340.0 / 3.0).abs() < 1e-9);
    assert!((merged[0].cy - 340.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_merge_does_not_chain_through_consumed_candidates() {
    // b is within range of a, c only within range of b. The seed is a, so c
    // stays out of the first group and forms its own.
    let a = region(100.0, 100.0, 11);
    let b = region(190.0, 100.0, 11);
    let c = region(280.0, 100.0, 11);
    let merged = merge_nearby_candidates(&[a, b, c], &config(100.0, 300));

    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].cx, 145.0);
    assert_eq!(merged[1].cx, 280.0);
}

#[test]
fn test_merge_empty_input() {
    assert!(merge_nearby_candidates(&[], &config(200.0, 300)).is_empty());
}
