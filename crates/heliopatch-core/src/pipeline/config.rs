use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DELTA_T_SECONDS, DEFAULT_GRID_POINTS, DEFAULT_PATCH_SIZE, WORKING_RESOLUTION,
};
use crate::detection::config::{CandidateConfig, DiskDetectConfig, SegmentationConfig};

/// Full pipeline configuration, loadable from TOML.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Square resolution the input is normalized to before detection.
    #[serde(default = "default_working_size")]
    pub working_size: usize,
    /// Edge length of rectified patches in pixels.
    #[serde(default = "default_patch_size")]
    pub patch_size: usize,
    /// Sample points per heliographic grid line.
    #[serde(default = "default_grid_points")]
    pub grid_points: usize,
    /// TT - UT correction in seconds for the ephemeris conversion.
    #[serde(default = "default_delta_t")]
    pub delta_t_seconds: f64,
    #[serde(default)]
    pub disk: DiskDetectConfig,
    #[serde(default)]
    pub segmentation: SegmentationConfig,
    #[serde(default)]
    pub candidates: CandidateConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            working_size: WORKING_RESOLUTION,
            patch_size: DEFAULT_PATCH_SIZE,
            grid_points: DEFAULT_GRID_POINTS,
            delta_t_seconds: DEFAULT_DELTA_T_SECONDS,
            disk: DiskDetectConfig::default(),
            segmentation: SegmentationConfig::default(),
            candidates: CandidateConfig::default(),
        }
    }
}

fn default_working_size() -> usize {
    WORKING_RESOLUTION
}
fn default_patch_size() -> usize {
    DEFAULT_PATCH_SIZE
}
fn default_grid_points() -> usize {
    DEFAULT_GRID_POINTS
}
fn default_delta_t() -> f64 {
    DEFAULT_DELTA_T_SECONDS
}
