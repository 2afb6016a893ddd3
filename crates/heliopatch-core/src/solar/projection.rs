use crate::consts::{EPSILON, SOLAR_RADIUS_KM};
use crate::frame::DiskGeometry;

use super::orientation::OrientationParams;

/// Minimal 3-vector for sphere/tangent-plane geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn scaled(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    /// Unit vector, or `None` when the norm is numerically degenerate.
    pub fn normalized(self) -> Option<Vec3> {
        let n = self.norm();
        (n > EPSILON).then(|| self.scaled(1.0 / n))
    }
}

/// A pixel coordinate lifted onto the unit sphere.
#[derive(Clone, Copy, Debug)]
pub struct SurfacePoint {
    /// Direction from sphere center; unit length when `on_disk`.
    pub dir: Vec3,
    /// False for pixels outside the visible disk. Off-disk points carry a
    /// zero z-component and must not be treated as surface samples.
    pub on_disk: bool,
}

/// Orthographic lift of an image pixel onto the visible solar hemisphere.
///
/// Normalizes `(x - cx)/r, (y - cy)/r`; on-disk points get
/// `z = sqrt(1 - nx^2 - ny^2)`, off-disk points get `z = 0` and the
/// explicit invalid flag instead of a fabricated value.
pub fn cartesian_to_spherical(x: f64, y: f64, disk: &DiskGeometry) -> SurfacePoint {
    let nx = (x - disk.cx) / disk.r;
    let ny = (y - disk.cy) / disk.r;
    let planar = nx * nx + ny * ny;

    if planar > 1.0 {
        SurfacePoint {
            dir: Vec3::new(nx, ny, 0.0),
            on_disk: false,
        }
    } else {
        SurfacePoint {
            dir: Vec3::new(nx, ny, (1.0 - planar).sqrt()),
            on_disk: true,
        }
    }
}

/// Physical image scale from the disk radius in pixels.
pub fn km_per_pixel(r_pixels: f64) -> f64 {
    SOLAR_RADIUS_KM / r_pixels
}

/// Orthonormal tangent-plane basis at a sphere point, aligned so that solar
/// north (given by P0) appears "up" in patch space.
///
/// Columns of the rotation are `[x_axis, y_axis, z_axis]`; `to_world` maps
/// tangent-plane coordinates onto the sphere frame, `to_local` is the
/// transpose (inverse) mapping.
#[derive(Clone, Copy, Debug)]
pub struct TangentBasis {
    pub x_axis: Vec3,
    pub y_axis: Vec3,
    pub z_axis: Vec3,
}

impl TangentBasis {
    /// Build the basis at unit normal `n` for position angle `p0_deg`.
    ///
    /// The image-space north direction `(-sin P0, -cos P0, 0)` is projected
    /// onto the tangent plane at `n` and normalized. The projection only
    /// loses all length when north is parallel to `n`, which no on-disk
    /// position reaches for any valid P0; if the norm still degenerates
    /// numerically we fall back to an axis-aligned basis instead of failing.
    pub fn from_orientation(n: Vec3, p0_deg: f64) -> TangentBasis {
        let p0 = p0_deg.to_radians();
        let north = Vec3::new(-p0.sin(), -p0.cos(), 0.0);

        let north_tangent = tangent_projection(north, n)
            .or_else(|| tangent_projection(Vec3::new(0.0, -1.0, 0.0), n))
            .or_else(|| tangent_projection(Vec3::new(1.0, 0.0, 0.0), n))
            .expect("n cannot be parallel to two orthogonal axes");

        let y_axis = north_tangent.scaled(-1.0);
        let z_axis = n;
        let x_axis = y_axis
            .cross(z_axis)
            .normalized()
            .expect("y and z are orthonormal");

        TangentBasis {
            x_axis,
            y_axis,
            z_axis,
        }
    }

    /// R * v: tangent-plane coordinates into the sphere frame.
    pub fn to_world(&self, v: Vec3) -> Vec3 {
        self.x_axis
            .scaled(v.x)
            .add(self.y_axis.scaled(v.y))
            .add(self.z_axis.scaled(v.z))
    }

    /// R^T * v: sphere frame into tangent-plane coordinates.
    pub fn to_local(&self, v: Vec3) -> Vec3 {
        Vec3::new(self.x_axis.dot(v), self.y_axis.dot(v), self.z_axis.dot(v))
    }
}

/// Component of `v` perpendicular to unit `n`, normalized.
fn tangent_projection(v: Vec3, n: Vec3) -> Option<Vec3> {
    v.sub(n.scaled(v.dot(n))).normalized()
}

/// Forward heliographic-to-pixel projection.
///
/// Builds the sphere point for `(lat, lon)` under the disk orientation and
/// projects it orthographically into pixel space. Returns `None` for points
/// on the far hemisphere or off the visible disk; grid generation silently
/// drops such points rather than reporting an error.
pub fn heliographic_to_image(
    lat_deg: f64,
    lon_deg: f64,
    orientation: &OrientationParams,
    disk: &DiskGeometry,
) -> Option<(f64, f64)> {
    let lat = lat_deg.to_radians();
    let dlon = (lon_deg - orientation.l0).to_radians();
    let b0 = orientation.b0.to_radians();

    // Sky-plane frame: x east, y toward celestial north, z toward observer.
    let x_sky = lat.cos() * dlon.sin();
    let y_sky = lat.sin() * b0.cos() - lat.cos() * dlon.cos() * b0.sin();
    let z_sky = lat.sin() * b0.sin() + lat.cos() * dlon.cos() * b0.cos();

    if z_sky < 0.0 {
        return None;
    }

    // Rotate by P0 into image axes (y down, north = (-sin P0, -cos P0),
    // east on the left per astronomical display convention).
    let p0 = orientation.p0.to_radians();
    let nx = -x_sky * p0.cos() - y_sky * p0.sin();
    let ny = x_sky * p0.sin() - y_sky * p0.cos();

    if nx * nx + ny * ny > 1.0 {
        return None;
    }

    Some((disk.cx + disk.r * nx, disk.cy + disk.r * ny))
}
