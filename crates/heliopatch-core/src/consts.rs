/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f64 = 1e-12;

/// Working resolution the full-disk image is normalized to before detection.
/// Disk-detection parameters below are tuned for this scale.
pub const WORKING_RESOLUTION: usize = 2048;

/// Expected solar disk radius bounds (pixels) at the working resolution.
pub const DISK_RADIUS_MIN: usize = 700;
pub const DISK_RADIUS_MAX: usize = 1000;

/// Gaussian blur sigma applied before circle detection.
pub const DISK_BLUR_SIGMA: f32 = 2.0;

/// Fraction of the strongest gradient magnitude a pixel must reach to vote
/// as a rim edge point in the circle transform.
pub const DISK_EDGE_FRACTION: f32 = 0.3;

/// Downscale factor of the Hough center accumulator relative to the image.
pub const DISK_ACCUMULATOR_SCALE: usize = 4;

/// Minimum rim support (fraction of the expected circumference) for the
/// accumulator peak to count as a detected disk.
pub const DISK_MIN_RIM_SUPPORT: f64 = 0.2;

/// Number of histogram bins for Otsu-style thresholding.
pub const OTSU_HISTOGRAM_BINS: usize = 256;

/// Largest fraction of the disk the darkest Otsu class may cover before the
/// segmentation is considered a contrast failure and discarded.
pub const SEGMENTATION_MAX_DARK_FRACTION: f64 = 0.2;

/// Default bilateral filter parameters for sunspot segmentation.
pub const DEFAULT_BILATERAL_RADIUS: usize = 4;
pub const DEFAULT_BILATERAL_SIGMA_SPACE: f32 = 2.0;
pub const DEFAULT_BILATERAL_SIGMA_RANGE: f32 = 0.1;

/// Default structuring-element size for the dilate + close sequence.
pub const DEFAULT_MORPHOLOGY_KERNEL: usize = 5;

/// Default minimum connected-component area (pixels) for a candidate.
pub const DEFAULT_MIN_CANDIDATE_AREA: usize = 10;

/// Default centroid distance (pixels) under which nearby candidates merge.
pub const DEFAULT_MERGE_DISTANCE: f64 = 200.0;

/// Default maximum edge length (pixels) of a merged bounding box. A merge
/// whose union box exceeds this is rejected and the members kept separate.
pub const DEFAULT_MAX_MERGED_SIZE: usize = 300;

/// Default edge length of a rectified patch in pixels.
pub const DEFAULT_PATCH_SIZE: usize = 512;

/// Default number of sample points per heliographic grid line.
pub const DEFAULT_GRID_POINTS: usize = 90;

/// Heliographic grid spacing in degrees.
pub const GRID_STEP_DEG: f64 = 15.0;

/// Default TT - UT correction (seconds) applied when converting a civil
/// timestamp to a Julian Ephemeris Date. Roughly valid for the mid-2020s;
/// configurable because it drifts by ~1 s/year.
pub const DEFAULT_DELTA_T_SECONDS: f64 = 66.0;

/// Inclination of the solar equator to the ecliptic, degrees (Carrington).
pub const SOLAR_INCLINATION_DEG: f64 = 7.25;

/// Sidereal epoch JD for the solar rotation phase angle.
pub const SOLAR_ROTATION_EPOCH_JD: f64 = 2_398_220.0;

/// Synodic solar rotation period in days (Carrington).
pub const SOLAR_SYNODIC_PERIOD_DAYS: f64 = 25.38;

/// Epoch JD for the ascending-node longitude of the solar equator.
pub const SOLAR_NODE_EPOCH_JD: f64 = 2_396_758.0;

/// Photospheric solar radius in kilometers.
pub const SOLAR_RADIUS_KM: f64 = 696_340.0;
