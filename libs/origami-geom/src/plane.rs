//! # Fold Planes
//!
//! Plane representation (origin + unit normal) with the three constructors
//! the folding operations need, plus point classification against an
//! epsilon band. "Across" is the perpendicular bisector between two points
//! (the fold crease plane); "by" passes through both points and stands
//! vertical in folded space.

use glam::DVec3;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point relative to a plane, within a tolerance band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Point is in front of the plane (positive side of the normal).
    Front,
    /// Point is behind the plane (negative side).
    Back,
    /// Point lies within the tolerance band around the plane.
    On,
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane in folded space, defined by a point on it and a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// A point on the plane.
    pub origin: DVec3,
    /// Unit normal.
    pub normal: DVec3,
}

impl Plane {
    /// Create a plane from an origin and a (not necessarily unit) normal.
    ///
    /// Returns `None` when the normal has no usable length.
    pub fn new(origin: DVec3, normal: DVec3) -> Option<Self> {
        let len = normal.length();
        if !len.is_finite() || len == 0.0 {
            return None;
        }
        Some(Self {
            origin,
            normal: normal / len,
        })
    }

    /// Plane perpendicular to `p1 p2` through its midpoint.
    ///
    /// This is the fold crease plane: folding `p2` onto `p1` mirrors the
    /// sheet through exactly this plane. Returns `None` for coincident
    /// points.
    pub fn across(p1: DVec3, p2: DVec3) -> Option<Self> {
        Self::new((p1 + p2) * 0.5, p2 - p1)
    }

    /// Vertical plane containing `p1` and `p2`.
    ///
    /// The normal is the segment direction rotated 90 degrees in the XY
    /// plane, so the plane stands upright regardless of the points' z.
    /// Returns `None` when the points coincide in XY.
    pub fn by(p1: DVec3, p2: DVec3) -> Option<Self> {
        let dir = p2 - p1;
        Self::new(p1, DVec3::new(-dir.y, dir.x, 0.0))
    }

    /// Plane perpendicular to `p1 p2` through an arbitrary `point`.
    pub fn orthogonal(p1: DVec3, p2: DVec3, point: DVec3) -> Option<Self> {
        Self::new(point, p2 - p1)
    }

    /// Signed distance from `point` to the plane.
    ///
    /// Positive = front (normal side), negative = back.
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point - self.origin)
    }

    /// Classify a point against the plane within `epsilon`.
    pub fn classify_point(&self, point: DVec3, epsilon: f64) -> Classification {
        let dist = self.signed_distance(point);
        if dist > epsilon {
            Classification::Front
        } else if dist < -epsilon {
            Classification::Back
        } else {
            Classification::On
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
