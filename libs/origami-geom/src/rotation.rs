//! # Axis Rotation
//!
//! Rodrigues rotation about an arbitrary-position axis. Fold rotations spin
//! points around a crease segment wherever it lies, so the axis is a full
//! 3D line (origin + direction), not an origin-anchored vector.

use glam::DVec3;

/// Rotate `point` by `angle_rad` about the axis through `origin` with
/// direction `dir` (right-hand rule around `dir`).
///
/// Degenerate axis directions leave the point unchanged.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use origami_geom::rotate_around_axis;
///
/// // Quarter turn of the far corner of a sheet around its bottom edge
/// let p = rotate_around_axis(
///     DVec3::new(-200.0, -200.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     std::f64::consts::FRAC_PI_2,
///     DVec3::new(200.0, 200.0, 0.0),
/// );
/// assert!((p - DVec3::new(200.0, -200.0, 400.0)).length() < 1e-9);
/// ```
pub fn rotate_around_axis(origin: DVec3, dir: DVec3, angle_rad: f64, point: DVec3) -> DVec3 {
    let len = dir.length();
    if !len.is_finite() || len == 0.0 {
        return point;
    }
    let k = dir / len;
    let v = point - origin;
    let (sin, cos) = angle_rad.sin_cos();

    // Rodrigues: v' = v cos + (k x v) sin + k (k . v)(1 - cos)
    let rotated = v * cos + k.cross(v) * sin + k * (k.dot(v) * (1.0 - cos));
    origin + rotated
}
