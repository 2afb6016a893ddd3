use ndarray::Array2;

use crate::consts::OTSU_HISTOGRAM_BINS;

/// Multi-level Otsu thresholding with three classes (two thresholds).
///
/// Only pixels where `mask` is true enter the histogram, so the black
/// off-disk background cannot bias the search. Returns `(t_low, t_high)`
/// in intensity units, or `None` when the mask selects no pixels.
///
/// The exhaustive two-threshold search maximizes between-class variance
/// using prefix sums, so each candidate pair costs O(1).
pub fn multi_otsu_thresholds(data: &Array2<f32>, mask: &Array2<bool>) -> Option<(f32, f32)> {
    let bins = OTSU_HISTOGRAM_BINS;
    let mut histogram = vec![0u64; bins];
    let mut total = 0u64;

    for (&v, &m) in data.iter().zip(mask.iter()) {
        if m {
            let bin = ((v.clamp(0.0, 1.0) * (bins - 1) as f32) as usize).min(bins - 1);
            histogram[bin] += 1;
            total += 1;
        }
    }

    if total == 0 {
        return None;
    }

    // Prefix sums of counts and intensity-weighted counts.
    let mut weight = vec![0.0f64; bins + 1];
    let mut moment = vec![0.0f64; bins + 1];
    for i in 0..bins {
        weight[i + 1] = weight[i] + histogram[i] as f64;
        moment[i + 1] = moment[i] + i as f64 * histogram[i] as f64;
    }

    let class_term = |lo: usize, hi: usize| -> f64 {
        // Contribution w_k * mu_k^2 of the class covering bins [lo, hi).
        let w = weight[hi] - weight[lo];
        if w == 0.0 {
            return 0.0;
        }
        let s = moment[hi] - moment[lo];
        s * s / w
    };

    let mut best = f64::NEG_INFINITY;
    let mut best_pair = (0usize, 0usize);
    for t1 in 0..bins - 1 {
        for t2 in t1 + 1..bins {
            let variance = class_term(0, t1 + 1) + class_term(t1 + 1, t2 + 1)
                + class_term(t2 + 1, bins);
            // Ties resolve toward the largest thresholds, so a run of empty
            // low bins cannot pin the dark class to an unpopulated range.
            if variance >= best {
                best = variance;
                best_pair = (t1, t2);
            }
        }
    }

    // Report each threshold as the midpoint between the populated bins it
    // separates; where the cut sits inside a run of empty bins then cannot
    // move the binarization.
    let populated_below = |cut: usize| (0..=cut).rev().find(|&b| histogram[b] > 0);
    let populated_above = |cut: usize| (cut + 1..bins).find(|&b| histogram[b] > 0);
    let to_intensity = |cut: usize| match (populated_below(cut), populated_above(cut)) {
        (Some(lo), Some(hi)) => (lo as f32 + 1.0 + hi as f32) / 2.0 / (bins - 1) as f32,
        _ => (cut as f32 + 1.0) / (bins - 1) as f32,
    };
    Some((to_intensity(best_pair.0), to_intensity(best_pair.1)))
}

/// Binarize the darkest of the three classes as candidate foreground.
pub fn darkest_class_mask(data: &Array2<f32>, mask: &Array2<bool>, t_low: f32) -> Array2<bool> {
    let (h, w) = data.dim();
    Array2::from_shape_fn((h, w), |idx| mask[idx] && data[idx] < t_low)
}
