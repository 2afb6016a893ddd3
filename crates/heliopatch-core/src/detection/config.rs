use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BILATERAL_RADIUS, DEFAULT_BILATERAL_SIGMA_RANGE, DEFAULT_BILATERAL_SIGMA_SPACE,
    DEFAULT_MAX_MERGED_SIZE, DEFAULT_MERGE_DISTANCE, DEFAULT_MIN_CANDIDATE_AREA,
    DEFAULT_MORPHOLOGY_KERNEL, DISK_BLUR_SIGMA, DISK_EDGE_FRACTION, DISK_RADIUS_MAX,
    DISK_RADIUS_MIN,
};

/// Configuration for the Hough-style solar disk locator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiskDetectConfig {
    /// Gaussian blur sigma before edge extraction.
    #[serde(default = "default_blur_sigma")]
    pub blur_sigma: f32,
    /// Fraction of the peak gradient magnitude that qualifies an edge point.
    #[serde(default = "default_edge_fraction")]
    pub edge_fraction: f32,
    /// Smallest acceptable disk radius at the working resolution.
    #[serde(default = "default_radius_min")]
    pub radius_min: usize,
    /// Largest acceptable disk radius at the working resolution.
    #[serde(default = "default_radius_max")]
    pub radius_max: usize,
}

impl Default for DiskDetectConfig {
    fn default() -> Self {
        Self {
            blur_sigma: DISK_BLUR_SIGMA,
            edge_fraction: DISK_EDGE_FRACTION,
            radius_min: DISK_RADIUS_MIN,
            radius_max: DISK_RADIUS_MAX,
        }
    }
}

/// Configuration for the sunspot segmentation stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Bilateral filter window radius.
    #[serde(default = "default_bilateral_radius")]
    pub bilateral_radius: usize,
    /// Bilateral spatial sigma (pixels).
    #[serde(default = "default_bilateral_sigma_space")]
    pub bilateral_sigma_space: f32,
    /// Bilateral range sigma (intensity units, image is [0,1]).
    #[serde(default = "default_bilateral_sigma_range")]
    pub bilateral_sigma_range: f32,
    /// Square structuring-element edge for the dilate + close sequence.
    #[serde(default = "default_morphology_kernel")]
    pub morphology_kernel: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            bilateral_radius: DEFAULT_BILATERAL_RADIUS,
            bilateral_sigma_space: DEFAULT_BILATERAL_SIGMA_SPACE,
            bilateral_sigma_range: DEFAULT_BILATERAL_SIGMA_RANGE,
            morphology_kernel: DEFAULT_MORPHOLOGY_KERNEL,
        }
    }
}

/// Configuration for candidate extraction and merging.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CandidateConfig {
    /// Minimum connected-component area (pixels).
    #[serde(default = "default_min_area")]
    pub min_area: usize,
    /// Centroid distance under which candidates are grouped for merging.
    #[serde(default = "default_merge_distance")]
    pub merge_distance: f64,
    /// Maximum edge length of a merged bounding box before the merge is
    /// rejected and the group members emitted individually.
    #[serde(default = "default_max_merged_size")]
    pub max_merged_size: usize,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            min_area: DEFAULT_MIN_CANDIDATE_AREA,
            merge_distance: DEFAULT_MERGE_DISTANCE,
            max_merged_size: DEFAULT_MAX_MERGED_SIZE,
        }
    }
}

fn default_blur_sigma() -> f32 {
    DISK_BLUR_SIGMA
}
fn default_edge_fraction() -> f32 {
    DISK_EDGE_FRACTION
}
fn default_radius_min() -> usize {
    DISK_RADIUS_MIN
}
fn default_radius_max() -> usize {
    DISK_RADIUS_MAX
}
fn default_bilateral_radius() -> usize {
    DEFAULT_BILATERAL_RADIUS
}
fn default_bilateral_sigma_space() -> f32 {
    DEFAULT_BILATERAL_SIGMA_SPACE
}
fn default_bilateral_sigma_range() -> f32 {
    DEFAULT_BILATERAL_SIGMA_RANGE
}
fn default_morphology_kernel() -> usize {
    DEFAULT_MORPHOLOGY_KERNEL
}
fn default_min_area() -> usize {
    DEFAULT_MIN_CANDIDATE_AREA
}
fn default_merge_distance() -> f64 {
    DEFAULT_MERGE_DISTANCE
}
fn default_max_merged_size() -> usize {
    DEFAULT_MAX_MERGED_SIZE
}
