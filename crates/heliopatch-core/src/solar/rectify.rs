use ndarray::parallel::prelude::*;
use ndarray::{Array2, Axis};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::filters::resample::bilinear_sample;
use crate::frame::DiskGeometry;

use super::orientation::OrientationParams;
use super::projection::{cartesian_to_spherical, TangentBasis, Vec3};

/// A geometrically corrected, north-aligned square patch.
///
/// Immutable once produced. `valid` is the out-of-band sentinel for samples
/// that fell outside the source image or off the visible disk; their pixel
/// value is 0.0 but must not be read as an intensity.
#[derive(Clone, Debug)]
pub struct RectifiedPatch {
    pub data: Array2<f32>,
    pub valid: Array2<bool>,
    /// Patch anchor in working-resolution pixel coordinates.
    pub center: (f64, f64),
}

impl RectifiedPatch {
    pub fn size(&self) -> usize {
        self.data.nrows()
    }
}

/// Orthographic tangent-plane reprojection of a fixed-size patch around
/// `(px, py)`, aligned with true solar north.
///
/// The tangent basis at the patch center's sphere point is built from P0; a
/// regular `patch_size`^2 grid on the tangent plane (pixel steps of 1/r, so
/// the plane spans +-patch_size/(2r) around the anchor) is rotated onto the
/// sphere frame and projected back to source pixels, which are resampled
/// bilinearly. The anchor itself maps to the exact patch center pixel.
pub fn rectify_patch_from_orientation(
    image: &Array2<f32>,
    px: f64,
    py: f64,
    patch_size: usize,
    disk: &DiskGeometry,
    orientation: &OrientationParams,
) -> RectifiedPatch {
    let anchor = cartesian_to_spherical(px, py, disk);
    // Candidate centers come from the disk interior; a numerically off-disk
    // anchor is clamped to the limb rather than inventing a z-component.
    let n = if anchor.on_disk {
        anchor.dir
    } else {
        anchor
            .dir
            .normalized()
            .unwrap_or(Vec3::new(0.0, 0.0, 1.0))
    };

    let basis = TangentBasis::from_orientation(n, orientation.p0);

    let half = (patch_size / 2) as f64;
    let inv_r = 1.0 / disk.r;

    let mut data = Array2::<f32>::zeros((patch_size, patch_size));
    let mut valid = Array2::from_elem((patch_size, patch_size), false);

    let fill_row = |row: usize, dst: &mut [f32], ok: &mut [bool]| {
        let v = (row as f64 - half) * inv_r;
        for col in 0..patch_size {
            let u = (col as f64 - half) * inv_r;
            let p = basis.to_world(Vec3::new(u, v, 1.0));

            // Orthographic projection back to source pixels; anything the
            // tangent plane reaches beyond the limb is off-disk.
            let on_disk = p.x * p.x + p.y * p.y <= 1.0;
            let sx = p.x * disk.r + disk.cx;
            let sy = p.y * disk.r + disk.cy;

            match bilinear_sample(image, sx, sy) {
                Some(value) if on_disk => {
                    dst[col] = value;
                    ok[col] = true;
                }
                // Constant zero border for out-of-image and off-disk samples.
                _ => {
                    dst[col] = 0.0;
                    ok[col] = false;
                }
            }
        }
    };

    if patch_size * patch_size >= PARALLEL_PIXEL_THRESHOLD {
        data.axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(valid.axis_iter_mut(Axis(0)).into_par_iter())
            .enumerate()
            .for_each(|(row, (mut dst, mut ok))| {
                fill_row(
                    row,
                    dst.as_slice_mut().expect("row is contiguous"),
                    ok.as_slice_mut().expect("row is contiguous"),
                );
            });
    } else {
        for (row, (mut dst, mut ok)) in data
            .axis_iter_mut(Axis(0))
            .zip(valid.axis_iter_mut(Axis(0)))
            .enumerate()
        {
            fill_row(
                row,
                dst.as_slice_mut().expect("row is contiguous"),
                ok.as_slice_mut().expect("row is contiguous"),
            );
        }
    }

    RectifiedPatch {
        data,
        valid,
        center: (px, py),
    }
}
