use ndarray::Array2;
use tracing::debug;

use crate::consts::{DISK_ACCUMULATOR_SCALE, DISK_MIN_RIM_SUPPORT};
use crate::error::{HeliopatchError, Result};
use crate::filters::gaussian_blur::gaussian_blur_array;
use crate::frame::DiskGeometry;

use super::config::DiskDetectConfig;

/// One thresholded gradient pixel used for circle voting.
struct EdgePoint {
    x: f64,
    y: f64,
    // Unit gradient direction.
    ux: f64,
    uy: f64,
}

/// Locate the solar disk with a gradient Hough circle transform.
///
/// The input must already be at the working resolution the radius bounds are
/// tuned for. Edge points vote along their gradient direction for center
/// positions at rim distances within `[radius_min, radius_max]`; the single
/// strongest accumulator cell is accepted (the whole image acts as the
/// minimum circle separation, so exactly one circle can win), and the radius
/// is recovered as the modal rim distance from that center.
///
/// Fails with [`HeliopatchError::NoDiskFound`] when the rim support of the
/// best center falls below the expected fraction of the circumference.
pub fn locate_disk(data: &Array2<f32>, config: &DiskDetectConfig) -> Result<DiskGeometry> {
    let (h, w) = data.dim();
    if h == 0 || w == 0 {
        return Err(HeliopatchError::InvalidDimensions {
            width: w as u32,
            height: h as u32,
        });
    }

    let blurred = gaussian_blur_array(data, config.blur_sigma);
    let edges = extract_edge_points(&blurred, config.edge_fraction);
    if edges.is_empty() {
        return Err(HeliopatchError::NoDiskFound);
    }
    debug!(edge_points = edges.len(), "Circle transform input");

    let (center_x, center_y, peak_votes) = vote_for_center(&edges, h, w, config);

    // Rim support check: a real disk rim contributes on the order of its
    // circumference in edge points; far less than that means the peak is
    // accumulator noise, not a circle.
    let min_votes = (DISK_MIN_RIM_SUPPORT * 2.0 * std::f64::consts::PI * config.radius_min as f64
        / DISK_ACCUMULATOR_SCALE as f64) as u32;
    if peak_votes < min_votes.max(8) {
        return Err(HeliopatchError::NoDiskFound);
    }

    let radius = estimate_radius(&edges, center_x, center_y, config)
        .ok_or(HeliopatchError::NoDiskFound)?;

    debug!(cx = center_x, cy = center_y, r = radius, votes = peak_votes, "Disk located");

    Ok(DiskGeometry {
        cx: center_x,
        cy: center_y,
        r: radius,
    })
}

/// Sobel gradients, thresholded at a fraction of the peak magnitude.
fn extract_edge_points(data: &Array2<f32>, edge_fraction: f32) -> Vec<EdgePoint> {
    let (h, w) = data.dim();
    if h < 3 || w < 3 {
        return Vec::new();
    }

    let mut gradients = Vec::new();
    let mut max_mag = 0.0f64;

    for row in 1..h - 1 {
        for col in 1..w - 1 {
            let gx = (data[[row - 1, col + 1]] as f64
                + 2.0 * data[[row, col + 1]] as f64
                + data[[row + 1, col + 1]] as f64)
                - (data[[row - 1, col - 1]] as f64
                    + 2.0 * data[[row, col - 1]] as f64
                    + data[[row + 1, col - 1]] as f64);
            let gy = (data[[row + 1, col - 1]] as f64
                + 2.0 * data[[row + 1, col]] as f64
                + data[[row + 1, col + 1]] as f64)
                - (data[[row - 1, col - 1]] as f64
                    + 2.0 * data[[row - 1, col]] as f64
                    + data[[row - 1, col + 1]] as f64);

            let mag = (gx * gx + gy * gy).sqrt();
            if mag > 0.0 {
                max_mag = max_mag.max(mag);
                gradients.push((col, row, gx, gy, mag));
            }
        }
    }

    let threshold = max_mag * edge_fraction as f64;
    gradients
        .into_iter()
        .filter(|&(_, _, _, _, mag)| mag >= threshold)
        .map(|(col, row, gx, gy, mag)| EdgePoint {
            x: col as f64,
            y: row as f64,
            ux: gx / mag,
            uy: gy / mag,
        })
        .collect()
}

/// Accumulate center votes along each edge point's gradient line and return
/// the refined peak position plus its vote count.
fn vote_for_center(
    edges: &[EdgePoint],
    h: usize,
    w: usize,
    config: &DiskDetectConfig,
) -> (f64, f64, u32) {
    let scale = DISK_ACCUMULATOR_SCALE;
    let acc_h = h.div_ceil(scale);
    let acc_w = w.div_ceil(scale);
    let mut accumulator = Array2::<u32>::zeros((acc_h, acc_w));

    for edge in edges {
        let mut d = config.radius_min as f64;
        while d <= config.radius_max as f64 {
            // The rim gradient points radially; the center lies along the
            // gradient line in one of the two directions, so vote both.
            for sign in [1.0, -1.0] {
                let cx = edge.x + sign * d * edge.ux;
                let cy = edge.y + sign * d * edge.uy;
                if cx >= 0.0 && cy >= 0.0 && (cx as usize) < w && (cy as usize) < h {
                    accumulator[[cy as usize / scale, cx as usize / scale]] += 1;
                }
            }
            d += scale as f64;
        }
    }

    let mut peak = (0usize, 0usize);
    let mut peak_votes = 0u32;
    for ((row, col), &votes) in accumulator.indexed_iter() {
        if votes > peak_votes {
            peak_votes = votes;
            peak = (row, col);
        }
    }

    // Sub-cell refinement: vote-weighted centroid of the 3x3 neighborhood.
    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    let mut sum_votes = 0.0f64;
    for dr in -1..=1isize {
        for dc in -1..=1isize {
            let nr = peak.0 as isize + dr;
            let nc = peak.1 as isize + dc;
            if nr >= 0 && nc >= 0 && (nr as usize) < acc_h && (nc as usize) < acc_w {
                let votes = accumulator[[nr as usize, nc as usize]] as f64;
                sum_x += (nc as f64 + 0.5) * scale as f64 * votes;
                sum_y += (nr as f64 + 0.5) * scale as f64 * votes;
                sum_votes += votes;
            }
        }
    }

    if sum_votes > 0.0 {
        (sum_x / sum_votes, sum_y / sum_votes, peak_votes)
    } else {
        (
            (peak.1 as f64 + 0.5) * scale as f64,
            (peak.0 as f64 + 0.5) * scale as f64,
            peak_votes,
        )
    }
}

/// Radius = mean rim distance within 2 px of the modal distance bin.
fn estimate_radius(
    edges: &[EdgePoint],
    cx: f64,
    cy: f64,
    config: &DiskDetectConfig,
) -> Option<f64> {
    let bins = config.radius_max - config.radius_min + 1;
    let mut histogram = vec![0u32; bins];

    for edge in edges {
        let d = ((edge.x - cx).powi(2) + (edge.y - cy).powi(2)).sqrt();
        let bin = d.round() as isize - config.radius_min as isize;
        if bin >= 0 && (bin as usize) < bins {
            histogram[bin as usize] += 1;
        }
    }

    let (modal_bin, &modal_count) = histogram
        .iter()
        .enumerate()
        .max_by_key(|&(_, &count)| count)?;
    if modal_count == 0 {
        return None;
    }

    let modal_r = (config.radius_min + modal_bin) as f64;
    let mut sum = 0.0f64;
    let mut n = 0usize;
    for edge in edges {
        let d = ((edge.x - cx).powi(2) + (edge.y - cy).powi(2)).sqrt();
        if (d - modal_r).abs() <= 2.0 {
            sum += d;
            n += 1;
        }
    }

    (n > 0).then(|| sum / n as f64)
}
