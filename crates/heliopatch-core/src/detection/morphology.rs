use ndarray::Array2;

/// Binary dilation with a square structuring element of edge `kernel`.
/// A pixel becomes true if ANY pixel in its neighborhood is true.
pub fn dilate(mask: &Array2<bool>, kernel: usize) -> Array2<bool> {
    morph(mask, kernel, false)
}

/// Binary erosion with a square structuring element of edge `kernel`.
/// A pixel stays true only if ALL pixels in its neighborhood are true
/// (out-of-bounds neighbors count as false).
pub fn erode(mask: &Array2<bool>, kernel: usize) -> Array2<bool> {
    morph(mask, kernel, true)
}

/// Morphological closing: dilate then erode. Bridges small gaps between
/// fragmented foreground blobs without growing their outer envelope.
pub fn close(mask: &Array2<bool>, kernel: usize) -> Array2<bool> {
    erode(&dilate(mask, kernel), kernel)
}

/// Morphological opening: erode then dilate. Removes isolated specks while
/// preserving larger regions.
pub fn open(mask: &Array2<bool>, kernel: usize) -> Array2<bool> {
    dilate(&erode(mask, kernel), kernel)
}

fn morph(mask: &Array2<bool>, kernel: usize, all: bool) -> Array2<bool> {
    let (h, w) = mask.dim();
    let radius = (kernel.max(1) / 2) as isize;
    let mut result = Array2::from_elem((h, w), false);

    for row in 0..h {
        for col in 0..w {
            // Erosion can be decided early for background pixels.
            if all && !mask[[row, col]] {
                continue;
            }

            let mut hit = all;
            'window: for dr in -radius..=radius {
                for dc in -radius..=radius {
                    let nr = row as isize + dr;
                    let nc = col as isize + dc;
                    let inside =
                        nr >= 0 && nr < h as isize && nc >= 0 && nc < w as isize;
                    let value = inside && mask[[nr as usize, nc as usize]];
                    if all != value {
                        hit = value;
                        break 'window;
                    }
                }
            }
            result[[row, col]] = hit;
        }
    }

    result
}
