use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};
use ndarray::Array2;

use crate::error::Result;
use crate::frame::Frame;
use crate::io::filename::parse_observation_timestamp;
use crate::solar::rectify::RectifiedPatch;

/// Load an image file as a grayscale frame.
///
/// Color inputs are converted to luminance; values are normalized to
/// [0, 1]. The observation timestamp is filled in from the filename when it
/// follows the `YYYYMMDD_HHMMSS_<suffix>` convention.
pub fn load_image(path: &Path) -> Result<Frame> {
    let img = image::open(path)?;
    let gray = img.to_luma16();
    let (w, h) = gray.dimensions();
    let mut data = Array2::<f32>::zeros((h as usize, w as usize));

    for row in 0..h as usize {
        for col in 0..w as usize {
            let pixel = gray.get_pixel(col as u32, row as u32);
            data[[row, col]] = pixel.0[0] as f32 / 65535.0;
        }
    }

    let mut frame = Frame::new(data, 16);
    frame.metadata.source = Some(path.to_path_buf());
    frame.metadata.observed_at = parse_observation_timestamp(path).ok();
    Ok(frame)
}

/// Save a raw array as 8-bit grayscale PNG.
pub fn save_png(data: &Array2<f32>, path: &Path) -> Result<()> {
    let (h, w) = data.dim();

    let mut img = GrayImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let val = (data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
            img.put_pixel(col as u32, row as u32, Luma([val]));
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a raw array as 16-bit grayscale TIFF.
pub fn save_tiff(data: &Array2<f32>, path: &Path) -> Result<()> {
    let (h, w) = data.dim();

    let mut pixels: Vec<u16> = Vec::with_capacity(h * w);
    for row in 0..h {
        for col in 0..w {
            pixels.push((data[[row, col]].clamp(0.0, 1.0) * 65535.0) as u16);
        }
    }

    let img = image::ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .expect("buffer size matches dimensions");
    img.save(path)?;
    Ok(())
}

/// Save a rectified patch, choosing format from the file extension.
/// Invalid (off-disk / out-of-image) samples are written as black.
pub fn save_patch(patch: &RectifiedPatch, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("tiff" | "tif") => save_tiff(&patch.data, path),
        _ => save_png(&patch.data, path),
    }
}
