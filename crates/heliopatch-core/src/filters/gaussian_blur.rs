use ndarray::parallel::prelude::*;
use ndarray::{Array2, Axis};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Apply Gaussian blur using separable 1D convolution with clamped borders.
pub fn gaussian_blur_array(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    let kernel = make_gaussian_kernel(sigma);
    // Horizontal pass, then the same row convolution on the transpose.
    let pass = convolve_rows(data, &kernel);
    let pass_t = convolve_rows(&pass.t().to_owned(), &kernel);
    pass_t.t().to_owned()
}

fn make_gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil().max(1.0) as usize;
    let s2 = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (0..2 * radius + 1)
        .map(|i| {
            let x = i as f32 - radius as f32;
            (-x * x / s2).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for v in &mut kernel {
        *v /= sum;
    }
    kernel
}

fn convolve_row(src: &[f32], dst: &mut [f32], kernel: &[f32]) {
    let w = src.len();
    let radius = kernel.len() / 2;
    for (col, out) in dst.iter_mut().enumerate() {
        let mut sum = 0.0f32;
        for (ki, &kv) in kernel.iter().enumerate() {
            let src_col =
                (col as isize + ki as isize - radius as isize).clamp(0, w as isize - 1) as usize;
            sum += src[src_col] * kv;
        }
        *out = sum;
    }
}

fn convolve_rows(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let mut result = Array2::<f32>::zeros((h, w));

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(data.axis_iter(Axis(0)).into_par_iter())
            .for_each(|(mut dst, src)| {
                let src = src.to_vec();
                convolve_row(&src, dst.as_slice_mut().expect("row is contiguous"), kernel);
            });
    } else {
        for (mut dst, src) in result
            .axis_iter_mut(Axis(0))
            .zip(data.axis_iter(Axis(0)))
        {
            let src = src.to_vec();
            convolve_row(&src, dst.as_slice_mut().expect("row is contiguous"), kernel);
        }
    }

    result
}
