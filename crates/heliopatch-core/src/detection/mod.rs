pub mod candidates;
pub mod components;
pub mod config;
pub mod disk;
pub mod morphology;
pub mod segmentation;
pub mod threshold;

pub use candidates::{detect_candidates, merge_nearby_candidates, CandidateRegion};
pub use config::{CandidateConfig, DiskDetectConfig, SegmentationConfig};
pub use disk::locate_disk;
pub use segmentation::segment_candidate_mask;
