pub mod filename;
pub mod image_io;
