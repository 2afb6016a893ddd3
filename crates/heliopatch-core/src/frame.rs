use chrono::NaiveDateTime;
use ndarray::Array2;
use std::path::PathBuf;

/// A single grayscale image frame.
/// Pixel values are f32 in [0.0, 1.0].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    /// Original bit depth before conversion (8 or 16)
    pub original_bit_depth: u8,
    /// Optional per-frame metadata
    pub metadata: FrameMetadata,
}

impl Frame {
    pub fn new(data: Array2<f32>, bit_depth: u8) -> Self {
        Self {
            data,
            original_bit_depth: bit_depth,
            metadata: FrameMetadata::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

#[derive(Clone, Debug, Default)]
pub struct FrameMetadata {
    /// Observation instant (UTC), usually parsed from the filename.
    pub observed_at: Option<NaiveDateTime>,
    /// Source file the frame was decoded from.
    pub source: Option<PathBuf>,
}

/// Center and radius of the solar disk in working-resolution pixel
/// coordinates. Produced once per image and read-only afterwards.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DiskGeometry {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl DiskGeometry {
    /// True if the pixel coordinate lies on the visible disk.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        dx * dx + dy * dy <= self.r * self.r
    }
}
