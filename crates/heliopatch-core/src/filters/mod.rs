pub mod bilateral;
pub mod gaussian_blur;
pub mod resample;
