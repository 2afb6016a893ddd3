use serde::{Deserialize, Serialize};

use crate::consts::GRID_STEP_DEG;
use crate::frame::DiskGeometry;

use super::orientation::OrientationParams;
use super::projection::{cartesian_to_spherical, heliographic_to_image, TangentBasis, Vec3};

/// A single polyline point, in full-disk pixels (global grid) or
/// patch-local pixels (patch grid).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
}

/// The coordinate a grid line holds fixed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCoord {
    /// Heliographic latitude, degrees.
    Lat(f64),
    /// Heliographic longitude, degrees.
    Lon(f64),
}

/// One latitude or longitude polyline. Points that fall outside the visible
/// disk (global) or outside the patch bounds (patch-local) are dropped, so
/// a line may hold fewer points than its sampling count, and lines with no
/// surviving points are omitted from the grid entirely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub coord: LineCoord,
    pub points: Vec<GridPoint>,
}

/// Heliographic coordinate overlay: latitude and longitude lines at a fixed
/// angular interval.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeliographicGrid {
    pub lat_lines: Vec<GridLine>,
    pub lon_lines: Vec<GridLine>,
}

/// Generate the 15-degree heliographic grid in full-disk pixel space.
///
/// Latitude lines run -75..=+75, longitude lines -180..=+180, each sampled
/// at `num_points` along the orthogonal coordinate. Far-hemisphere and
/// off-disk samples are silently dropped.
pub fn generate_global_grid(
    orientation: &OrientationParams,
    disk: &DiskGeometry,
    num_points: usize,
) -> HeliographicGrid {
    let mut grid = HeliographicGrid::default();

    let mut lat = -90.0 + GRID_STEP_DEG;
    while lat < 90.0 - f64::EPSILON {
        let points = sample_line(num_points, -180.0, 180.0, |lon| {
            heliographic_to_image(lat, lon, orientation, disk)
        });
        if !points.is_empty() {
            grid.lat_lines.push(GridLine {
                coord: LineCoord::Lat(lat),
                points,
            });
        }
        lat += GRID_STEP_DEG;
    }

    let mut lon = -180.0;
    while lon <= 180.0 + f64::EPSILON {
        let points = sample_line(num_points, -90.0, 90.0, |lat| {
            heliographic_to_image(lat, lon, orientation, disk)
        });
        if !points.is_empty() {
            grid.lon_lines.push(GridLine {
                coord: LineCoord::Lon(lon),
                points,
            });
        }
        lon += GRID_STEP_DEG;
    }

    grid
}

fn sample_line(
    num_points: usize,
    from: f64,
    to: f64,
    project: impl Fn(f64) -> Option<(f64, f64)>,
) -> Vec<GridPoint> {
    let step = if num_points > 1 {
        (to - from) / (num_points - 1) as f64
    } else {
        0.0
    };
    (0..num_points)
        .filter_map(|i| project(from + step * i as f64))
        .map(|(x, y)| GridPoint { x, y })
        .collect()
}

/// Clip and transform the global grid into a rectified patch's local frame.
///
/// Only points inside the patch's bounding box survive. Each survivor's
/// sphere direction is re-derived from its global pixel position and passed
/// through the SAME tangent basis the rectifier used for this patch center,
/// so the overlay and the rectified pixels share one rotation and stay
/// geometrically consistent. Transformed points landing outside
/// `[0, patch_size)` are dropped; empty lines are omitted.
pub fn generate_patch_grid(
    global: &HeliographicGrid,
    patch_origin: (f64, f64),
    patch_size: usize,
    disk: &DiskGeometry,
    orientation: &OrientationParams,
) -> HeliographicGrid {
    let half = (patch_size / 2) as f64;
    let center = cartesian_to_spherical(patch_origin.0 + half, patch_origin.1 + half, disk);
    let n = if center.on_disk {
        center.dir
    } else {
        center
            .dir
            .normalized()
            .unwrap_or(Vec3::new(0.0, 0.0, 1.0))
    };
    let basis = TangentBasis::from_orientation(n, orientation.p0);

    let transform_line = |line: &GridLine| -> Option<GridLine> {
        let points: Vec<GridPoint> = line
            .points
            .iter()
            .filter(|pt| {
                pt.x >= patch_origin.0
                    && pt.x < patch_origin.0 + patch_size as f64
                    && pt.y >= patch_origin.1
                    && pt.y < patch_origin.1 + patch_size as f64
            })
            .filter_map(|pt| {
                let surface = cartesian_to_spherical(pt.x, pt.y, disk);
                if !surface.on_disk {
                    return None;
                }
                let local = basis.to_local(surface.dir);
                let x = local.x * disk.r + half;
                let y = local.y * disk.r + half;
                let inside =
                    x >= 0.0 && x < patch_size as f64 && y >= 0.0 && y < patch_size as f64;
                inside.then_some(GridPoint { x, y })
            })
            .collect();

        (!points.is_empty()).then(|| GridLine {
            coord: line.coord,
            points,
        })
    };

    HeliographicGrid {
        lat_lines: global.lat_lines.iter().filter_map(transform_line).collect(),
        lon_lines: global.lon_lines.iter().filter_map(transform_line).collect(),
    }
}
