use crate::detection::candidates::CandidateRegion;
use crate::frame::DiskGeometry;
use crate::solar::grid::HeliographicGrid;
use crate::solar::orientation::OrientationParams;
use crate::solar::rectify::RectifiedPatch;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug)]
pub enum PipelineStage {
    Normalizing,
    DiskDetection,
    Segmentation,
    CandidateExtraction,
    GridGeneration,
    Rectification,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normalizing => write!(f, "Normalizing resolution"),
            Self::DiskDetection => write!(f, "Locating solar disk"),
            Self::Segmentation => write!(f, "Segmenting sunspots"),
            Self::CandidateExtraction => write!(f, "Extracting candidates"),
            Self::GridGeneration => write!(f, "Generating coordinate grid"),
            Self::Rectification => write!(f, "Rectifying patches"),
        }
    }
}

/// One rectified candidate: the region it came from, the fixed-size patch,
/// and the heliographic overlay clipped to that patch.
#[derive(Clone, Debug)]
pub struct PatchResult {
    pub candidate: CandidateRegion,
    pub patch: RectifiedPatch,
    pub grid: HeliographicGrid,
}

/// Everything the pipeline produces for one image.
#[derive(Clone, Debug)]
pub struct ImageResult {
    pub disk: DiskGeometry,
    pub orientation: OrientationParams,
    pub global_grid: HeliographicGrid,
    pub patches: Vec<PatchResult>,
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage (e.g., candidate count), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `process_image` delegates.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
