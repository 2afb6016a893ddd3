use ndarray::parallel::prelude::*;
use ndarray::{Array2, Axis};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Edge-preserving bilateral filter.
///
/// Each output pixel is a weighted mean of its (2*radius+1)^2 neighborhood,
/// weights being the product of a spatial Gaussian and a range Gaussian on
/// the intensity difference. Smooths sensor noise while keeping the sharp
/// umbra/penumbra boundaries that later thresholding depends on.
pub fn bilateral_filter(
    data: &Array2<f32>,
    radius: usize,
    sigma_space: f32,
    sigma_range: f32,
) -> Array2<f32> {
    let (h, w) = data.dim();
    let spatial = spatial_weights(radius, sigma_space);
    let inv_2sr2 = 1.0 / (2.0 * sigma_range * sigma_range);

    let filter_row = |row: usize, dst: &mut [f32]| {
        for (col, out) in dst.iter_mut().enumerate() {
            let center = data[[row, col]];
            let mut sum = 0.0f32;
            let mut weight_sum = 0.0f32;

            for dr in -(radius as isize)..=radius as isize {
                let nr = (row as isize + dr).clamp(0, h as isize - 1) as usize;
                for dc in -(radius as isize)..=radius as isize {
                    let nc = (col as isize + dc).clamp(0, w as isize - 1) as usize;
                    let v = data[[nr, nc]];
                    let dv = v - center;
                    let ws = spatial[[(dr + radius as isize) as usize,
                        (dc + radius as isize) as usize]];
                    let weight = ws * (-dv * dv * inv_2sr2).exp();
                    sum += v * weight;
                    weight_sum += weight;
                }
            }

            *out = sum / weight_sum;
        }
    };

    let mut result = Array2::<f32>::zeros((h, w));
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, mut dst)| {
                filter_row(row, dst.as_slice_mut().expect("row is contiguous"));
            });
    } else {
        for (row, mut dst) in result.axis_iter_mut(Axis(0)).enumerate() {
            filter_row(row, dst.as_slice_mut().expect("row is contiguous"));
        }
    }

    result
}

fn spatial_weights(radius: usize, sigma_space: f32) -> Array2<f32> {
    let size = 2 * radius + 1;
    let s2 = 2.0 * sigma_space * sigma_space;
    Array2::from_shape_fn((size, size), |(r, c)| {
        let dr = r as f32 - radius as f32;
        let dc = c as f32 - radius as f32;
        (-(dr * dr + dc * dc) / s2).exp()
    })
}
