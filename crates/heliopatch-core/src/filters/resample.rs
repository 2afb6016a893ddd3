use ndarray::parallel::prelude::*;
use ndarray::{Array2, Axis};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Bilinear sample at a fractional pixel coordinate.
///
/// Returns `None` when the 2x2 support does not fit inside the image; the
/// caller decides what an out-of-bounds sample means (border fill, mask bit).
pub fn bilinear_sample(data: &Array2<f32>, x: f64, y: f64) -> Option<f32> {
    let (h, w) = data.dim();
    if x < 0.0 || y < 0.0 {
        return None;
    }

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    if x0 + 1 >= w || y0 + 1 >= h {
        // Exactly on the far edge still resolves via the last full cell.
        if x0 < w && y0 < h && x == x0 as f64 && y == y0 as f64 {
            return Some(data[[y0, x0]]);
        }
        return None;
    }

    let fx = (x - x0 as f64) as f32;
    let fy = (y - y0 as f64) as f32;

    let top = data[[y0, x0]] * (1.0 - fx) + data[[y0, x0 + 1]] * fx;
    let bottom = data[[y0 + 1, x0]] * (1.0 - fx) + data[[y0 + 1, x0 + 1]] * fx;
    Some(top * (1.0 - fy) + bottom * fy)
}

/// Resize an image to the given shape with bilinear interpolation.
pub fn resize_bilinear(data: &Array2<f32>, out_h: usize, out_w: usize) -> Array2<f32> {
    let (h, w) = data.dim();
    if (h, w) == (out_h, out_w) {
        return data.clone();
    }

    let scale_y = h as f64 / out_h as f64;
    let scale_x = w as f64 / out_w as f64;

    let fill_row = |row: usize, dst: &mut [f32]| {
        let src_y = ((row as f64 + 0.5) * scale_y - 0.5).clamp(0.0, (h - 1) as f64);
        for (col, out) in dst.iter_mut().enumerate() {
            let src_x = ((col as f64 + 0.5) * scale_x - 0.5).clamp(0.0, (w - 1) as f64);
            *out = bilinear_sample_clamped(data, src_x, src_y);
        }
    };

    let mut result = Array2::<f32>::zeros((out_h, out_w));
    if out_h * out_w >= PARALLEL_PIXEL_THRESHOLD {
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, mut dst)| {
                fill_row(row, dst.as_slice_mut().expect("row is contiguous"));
            });
    } else {
        for (row, mut dst) in result.axis_iter_mut(Axis(0)).enumerate() {
            fill_row(row, dst.as_slice_mut().expect("row is contiguous"));
        }
    }

    result
}

/// Bilinear sample with coordinates clamped to the valid interior.
fn bilinear_sample_clamped(data: &Array2<f32>, x: f64, y: f64) -> f32 {
    let (h, w) = data.dim();
    let x = x.clamp(0.0, (w - 1) as f64);
    let y = y.clamp(0.0, (h - 1) as f64);

    let x0 = (x.floor() as usize).min(w - 1);
    let y0 = (y.floor() as usize).min(h - 1);
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);

    let fx = (x - x0 as f64) as f32;
    let fy = (y - y0 as f64) as f32;

    let top = data[[y0, x0]] * (1.0 - fx) + data[[y0, x1]] * fx;
    let bottom = data[[y1, x0]] * (1.0 - fx) + data[[y1, x1]] * fx;
    top * (1.0 - fy) + bottom * fy
}
