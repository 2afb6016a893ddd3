use ndarray::Array2;

use heliopatch_core::frame::DiskGeometry;

/// Build a synthetic full-disk image: bright disk on black background.
pub fn synthetic_disk(size: usize, disk: &DiskGeometry, disk_value: f32) -> Array2<f32> {
    Array2::from_shape_fn((size, size), |(row, col)| {
        if disk.contains(col as f64, row as f64) {
            disk_value
        } else {
            0.0
        }
    })
}

/// Stamp a filled dark circle (a fake sunspot) onto the image.
pub fn add_blob(data: &mut Array2<f32>, cx: f64, cy: f64, radius: f64, value: f32) {
    let (h, w) = data.dim();
    for row in 0..h {
        for col in 0..w {
            let dx = col as f64 - cx;
            let dy = row as f64 - cy;
            if dx * dx + dy * dy <= radius * radius {
                data[[row, col]] = value;
            }
        }
    }
}

/// Disk geometry used by the end-to-end scenario tests.
pub fn standard_disk() -> DiskGeometry {
    DiskGeometry {
        cx: 1024.0,
        cy: 1024.0,
        r: 900.0,
    }
}
