pub mod config;
pub mod orchestrator;
pub mod types;

pub use config::PipelineConfig;
pub use orchestrator::{process_batch, process_image, process_image_reported};
pub use types::{ImageResult, NoOpReporter, PatchResult, PipelineStage, ProgressReporter};
