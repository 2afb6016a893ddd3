use ndarray::Array2;
use tracing::debug;

use super::components::{connected_components, BoundingBox};
use super::config::CandidateConfig;

/// A connected dark region considered a potential detection target.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CandidateRegion {
    /// Center column in working-resolution pixels.
    pub cx: f64,
    /// Center row in working-resolution pixels.
    pub cy: f64,
    pub bbox: BoundingBox,
}

impl CandidateRegion {
    fn distance_to(&self, other: &CandidateRegion) -> f64 {
        ((self.cx - other.cx).powi(2) + (self.cy - other.cy).powi(2)).sqrt()
    }
}

/// Extract candidate regions from the segmentation mask, restricted to the
/// disk interior.
///
/// The candidate mask is intersected with the disk mask before labeling, and
/// components whose rounded centroid does not itself lie on the disk mask
/// are dropped (rim artifacts produce components that straddle the limb).
pub fn detect_candidates(
    candidate_mask: &Array2<bool>,
    disk_mask: &Array2<bool>,
    config: &CandidateConfig,
) -> Vec<CandidateRegion> {
    let (h, w) = candidate_mask.dim();
    let on_disk = Array2::from_shape_fn((h, w), |idx| candidate_mask[idx] && disk_mask[idx]);

    let components = connected_components(&on_disk);
    let candidates: Vec<CandidateRegion> = components
        .into_iter()
        .filter(|comp| comp.area >= config.min_area)
        .filter(|comp| {
            let col = comp.centroid.0.round() as usize;
            let row = comp.centroid.1.round() as usize;
            row < h && col < w && disk_mask[[row, col]]
        })
        .map(|comp| CandidateRegion {
            cx: comp.centroid.0,
            cy: comp.centroid.1,
            bbox: comp.bbox,
        })
        .collect();

    debug!(count = candidates.len(), "Candidates extracted");
    candidates
}

/// Merge spatially close candidates under a size constraint.
///
/// For each not-yet-consumed candidate, every other unconsumed candidate
/// within `merge_distance` of its centroid joins the group. If either edge
/// of the group's union bounding box exceeds `max_merged_size` the merge is
/// rejected and every member is emitted unchanged -- averaging the centers
/// of regions that cannot share one patch would anchor the patch between
/// them. Otherwise one merged region is emitted with the arithmetic mean
/// center and the union box.
///
/// Inputs are never mutated; merging produces new regions.
pub fn merge_nearby_candidates(
    candidates: &[CandidateRegion],
    config: &CandidateConfig,
) -> Vec<CandidateRegion> {
    let mut consumed = vec![false; candidates.len()];
    let mut merged = Vec::new();

    for i in 0..candidates.len() {
        if consumed[i] {
            continue;
        }

        let mut group = vec![i];
        for j in i + 1..candidates.len() {
            if !consumed[j] && candidates[i].distance_to(&candidates[j]) <= config.merge_distance {
                group.push(j);
            }
        }

        let union_bbox = group
            .iter()
            .map(|&k| candidates[k].bbox)
            .reduce(|a, b| a.union(&b))
            .expect("group contains at least the seed");

        let oversize = union_bbox.width() > config.max_merged_size
            || union_bbox.height() > config.max_merged_size;

        if group.len() == 1 || oversize {
            // Reject-on-oversize: keep every member as its own candidate.
            for &k in &group {
                consumed[k] = true;
                merged.push(candidates[k].clone());
            }
        } else {
            let n = group.len() as f64;
            let cx = group.iter().map(|&k| candidates[k].cx).sum::<f64>() / n;
            let cy = group.iter().map(|&k| candidates[k].cy).sum::<f64>() / n;
            for &k in &group {
                consumed[k] = true;
            }
            merged.push(CandidateRegion {
                cx,
                cy,
                bbox: union_bbox,
            });
        }
    }

    merged
}
