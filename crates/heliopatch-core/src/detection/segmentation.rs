use ndarray::Array2;
use tracing::debug;

use crate::consts::SEGMENTATION_MAX_DARK_FRACTION;
use crate::filters::bilateral::bilateral_filter;
use crate::frame::DiskGeometry;

use super::config::SegmentationConfig;
use super::morphology::{close, dilate};
use super::threshold::{darkest_class_mask, multi_otsu_thresholds};

/// Boolean mask of pixels on the visible disk.
pub fn disk_mask(h: usize, w: usize, disk: &DiskGeometry) -> Array2<bool> {
    Array2::from_shape_fn((h, w), |(row, col)| {
        disk.contains(col as f64, row as f64)
    })
}

/// Convert a grayscale full-disk image into a binary sunspot candidate mask.
///
/// Bilateral smoothing (noise out, umbra/penumbra edges kept), then 3-class
/// Otsu restricted to on-disk pixels, then the darkest class binarized, then
/// a dilate + close sequence that fuses fragmented dark pixels into coherent
/// blobs.
///
/// Returns `(candidate_mask, disk_mask)`, both at the input resolution.
pub fn segment_candidate_mask(
    data: &Array2<f32>,
    disk: &DiskGeometry,
    config: &SegmentationConfig,
) -> (Array2<bool>, Array2<bool>) {
    let (h, w) = data.dim();

    let smoothed = bilateral_filter(
        data,
        config.bilateral_radius,
        config.bilateral_sigma_space,
        config.bilateral_sigma_range,
    );

    let on_disk = disk_mask(h, w, disk);

    let Some((t_low, t_high)) = multi_otsu_thresholds(&smoothed, &on_disk) else {
        // Disk entirely outside the image; nothing to segment.
        return (Array2::from_elem((h, w), false), on_disk);
    };
    debug!(t_low, t_high, "Multi-level Otsu thresholds");

    let binary = darkest_class_mask(&smoothed, &on_disk, t_low);
    let disk_area = on_disk.iter().filter(|&&m| m).count();
    let dark_area = binary.iter().filter(|&&v| v).count();
    if dark_area as f64 > disk_area as f64 * SEGMENTATION_MAX_DARK_FRACTION {
        // A dark class spanning much of the disk means the image has no real
        // dark/bright contrast to segment on, not disk-sized sunspots.
        debug!(dark_area, disk_area, "Dark class too large, discarded");
        return (Array2::from_elem((h, w), false), on_disk);
    }

    let dilated = dilate(&binary, config.morphology_kernel);
    let candidate_mask = close(&dilated, config.morphology_kernel);

    (candidate_mask, on_disk)
}
