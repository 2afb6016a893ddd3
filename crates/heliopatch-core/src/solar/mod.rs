pub mod grid;
pub mod orientation;
pub mod projection;
pub mod rectify;

pub use grid::{generate_global_grid, generate_patch_grid, GridLine, HeliographicGrid};
pub use orientation::{datetime_to_jde, orientation_from_datetime, OrientationParams};
pub use projection::{cartesian_to_spherical, heliographic_to_image, TangentBasis, Vec3};
pub use rectify::{rectify_patch_from_orientation, RectifiedPatch};
