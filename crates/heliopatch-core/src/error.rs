use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeliopatchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("No solar disk found in image")]
    NoDiskFound,

    #[error("Cannot parse observation timestamp from '{0}'")]
    InvalidTimestamp(String),

    #[error("Patch size {patch_size} does not fit working resolution {working_size}")]
    PatchTooLarge {
        patch_size: usize,
        working_size: usize,
    },

    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

pub type Result<T> = std::result::Result<T, HeliopatchError>;
