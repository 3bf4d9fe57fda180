//! # Geometric Primitives
//!
//! Pure 2D/3D functions: distances, signed areas, and the intersection
//! routines the split algorithms are built on. The collinear-overlap
//! resolver in [`segment_intersection_flat`] is the subtle part; creasing
//! along an existing edge is a common user action and must resolve to a
//! deterministic shared point instead of failing.

use config::constants::PARALLEL_EPSILON;
use glam::{DVec2, DVec3};

// =============================================================================
// DISTANCES & AREAS
// =============================================================================

/// Clamped distance from point `p` to segment `ab`.
///
/// Degenerate segments (where `a == b`) fall back to the point distance.
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use origami_geom::distance_point_to_segment_2d;
///
/// let d = distance_point_to_segment_2d(
///     DVec2::new(0.0, 0.0),
///     DVec2::new(10.0, 0.0),
///     DVec2::new(15.0, 0.0),
/// );
/// assert_eq!(d, 5.0); // clamped to endpoint b
/// ```
pub fn distance_point_to_segment_2d(a: DVec2, b: DVec2, p: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Twice the signed area of triangle `abc`.
///
/// Sign convention: positive means `c` lies to the *right* of the directed
/// line `a -> b`. Used both in crease-pattern space and on the x/y
/// projection of folded space.
pub fn signed_area(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b.y - a.y) * (c.x - a.x) - (b.x - a.x) * (c.y - a.y)
}

/// Signed distance from `p` to the infinite line through `a` and `b`,
/// normalized by the line's length. Positive on the right of `a -> b`,
/// matching [`signed_area`]. Returns the plain point distance when the
/// line degenerates to a point.
pub fn signed_distance_to_line_2d(a: DVec2, b: DVec2, p: DVec2) -> f64 {
    let len = a.distance(b);
    if len == 0.0 {
        return p.distance(a);
    }
    signed_area(a, b, p) / len
}

// =============================================================================
// INTERSECTIONS
// =============================================================================

/// Intersection of the infinite lines through `ab` and `cd`.
///
/// Returns `None` when the determinant is ~0 (parallel or coincident lines).
pub fn line_intersection_2d(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> Option<DVec2> {
    let r = b - a;
    let s = d - c;
    let det = r.perp_dot(s);
    if det.abs() <= PARALLEL_EPSILON * r.length() * s.length() || det == 0.0 {
        return None;
    }
    let t = (c - a).perp_dot(s) / det;
    Some(a + r * t)
}

/// Intersection of segments `ab` and `cd`, collinear overlaps included.
///
/// The general case clamps both parameters to their segments. For parallel
/// segments the result is `None` unless they are collinear, in which case a
/// deterministic shared point is chosen: the first endpoint of `cd` (then of
/// `ab`) that lies within the other segment's span. Disjoint collinear
/// segments yield `None`.
///
/// Every combinatorial case (crossing, T-junction, disjoint, parallel,
/// nested, touching, vertical, horizontal) is locked by tests.
pub fn segment_intersection_flat(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> Option<DVec2> {
    let r = b - a;
    let s = d - c;
    let det = r.perp_dot(s);

    if det.abs() > PARALLEL_EPSILON * (1.0 + r.length() * s.length()) {
        // Proper crossing: both parameters must land inside their segments
        let t = (c - a).perp_dot(s) / det;
        let u = (c - a).perp_dot(r) / det;
        let eps = 1e-9;
        if (-eps..=1.0 + eps).contains(&t) && (-eps..=1.0 + eps).contains(&u) {
            return Some(a + r * t.clamp(0.0, 1.0));
        }
        return None;
    }

    // Parallel. Only collinear segments can share a point.
    if signed_area(a, b, c).abs() > PARALLEL_EPSILON * (1.0 + r.length_squared()) {
        return None;
    }

    // Collinear: prefer an endpoint of cd inside ab's span, then an endpoint
    // of ab inside cd's span (covers the surrounding case).
    for p in [c, d] {
        if point_within_span(a, b, p) {
            return Some(p);
        }
    }
    for p in [a, b] {
        if point_within_span(c, d, p) {
            return Some(p);
        }
    }
    None
}

/// True when collinear point `p` projects inside segment `ab` (inclusive).
fn point_within_span(a: DVec2, b: DVec2, p: DVec2) -> bool {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance_squared(a) == 0.0;
    }
    let t = (p - a).dot(ab) / len_sq;
    (-1e-9..=1.0 + 1e-9).contains(&t)
}

/// Closest points between segments `AB` and `CD` in 3D.
///
/// Classic skew-line closest-point computation with both parameters clamped
/// to `[0, 1]`, so the result is the closest pair on the *segments*. Either
/// segment may collapse to a point.
///
/// ## Returns
///
/// `(p, q)` where `p` lies on `AB` and `q` on `CD`.
pub fn closest_points_between_lines(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> (DVec3, DVec3) {
    let u = b - a;
    let v = d - c;
    let w = a - c;

    let uu = u.dot(u);
    let vv = v.dot(v);

    // Degenerate segments collapse to point-to-segment problems
    if uu <= f64::EPSILON && vv <= f64::EPSILON {
        return (a, c);
    }
    if uu <= f64::EPSILON {
        let t = (v.dot(a - c) / vv).clamp(0.0, 1.0);
        return (a, c + v * t);
    }
    if vv <= f64::EPSILON {
        let s = (u.dot(c - a) / uu).clamp(0.0, 1.0);
        return (a + u * s, c);
    }

    let uv = u.dot(v);
    let uw = u.dot(w);
    let vw = v.dot(w);
    let denom = uu * vv - uv * uv;

    let mut s = if denom.abs() > f64::EPSILON {
        ((uv * vw - vv * uw) / denom).clamp(0.0, 1.0)
    } else {
        // Parallel segments: any common perpendicular works, anchor at A
        0.0
    };
    let mut t = ((uv * s + vw) / vv).clamp(0.0, 1.0);
    // Re-derive s against the clamped t so both ends stay consistent
    s = ((uv * t - uw) / uu).clamp(0.0, 1.0);
    t = ((uv * s + vw) / vv).clamp(0.0, 1.0);

    (a + u * s, c + v * t)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance_to_degenerate_segment() {
        let a = DVec2::new(1.0, 1.0);
        let d = distance_point_to_segment_2d(a, a, DVec2::new(4.0, 5.0));
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn test_distance_clamps_to_interior() {
        let d = distance_point_to_segment_2d(
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(5.0, 3.0),
        );
        assert_relative_eq!(d, 3.0);
    }

    #[test]
    fn test_signed_area_right_is_positive() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(10.0, 0.0);
        // Below the x axis is to the right of a -> b
        assert!(signed_area(a, b, DVec2::new(5.0, -1.0)) > 0.0);
        assert!(signed_area(a, b, DVec2::new(5.0, 1.0)) < 0.0);
        assert_eq!(signed_area(a, b, DVec2::new(5.0, 0.0)), 0.0);
    }

    #[test]
    fn test_line_intersection_extends_past_segments() {
        // Segments do not touch, lines do
        let hit = line_intersection_2d(
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(5.0, -1.0),
            DVec2::new(5.0, 1.0),
        )
        .unwrap();
        assert_relative_eq!(hit.x, 5.0);
        assert_relative_eq!(hit.y, 0.0);
    }

    #[test]
    fn test_line_intersection_parallel_is_none() {
        let hit = line_intersection_2d(
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(10.0, 1.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_closest_points_skew_lines() {
        // AB along x at z=0, CD along y at z=2, crossing over (1,0)/(1,0)
        let (p, q) = closest_points_between_lines(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(4.0, 0.0, 0.0),
            DVec3::new(1.0, -2.0, 2.0),
            DVec3::new(1.0, 2.0, 2.0),
        );
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(q.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(q.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.distance(q), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_closest_points_clamp_to_segment_ends() {
        let (p, q) = closest_points_between_lines(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(5.0, -1.0, 0.0),
            DVec3::new(5.0, 1.0, 0.0),
        );
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(q.x, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_closest_points_degenerate_first_segment() {
        let a = DVec3::new(0.0, 5.0, 0.0);
        let (p, q) = closest_points_between_lines(
            a,
            a,
            DVec3::new(-1.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
        );
        assert_eq!(p, a);
        assert_relative_eq!(q.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(q.y, 0.0, epsilon = 1e-9);
    }
}
