//! # Face Splitting
//!
//! The topology-changing operations: splitting faces by a plane in folded
//! space or by a line in the crease pattern, and the derived fold
//! constructions (by / across / perpendicular / bisector) built on them.
//!
//! Both spaces stay consistent through every cut: a point inserted on an
//! edge is placed at the same proportional parameter along that edge in the
//! other space, so the ratio invariant between 2D and 3D positions holds by
//! construction. Degenerate cuts (along an existing crease, or clipping a
//! sliver below the area epsilon) change nothing; that is the normal
//! outcome of re-creasing, not an error.

use config::constants::{FACE_AREA_EPSILON, ON_LINE_EPSILON_2D, ON_PLANE_EPSILON_3D};
use glam::DVec2;
use origami_geom::{
    closest_points_between_lines, line_intersection_2d, signed_distance_to_line_2d,
    Classification, Plane,
};

use crate::model::{Face, Model, Point};

// =============================================================================
// CLASSIFICATION
// =============================================================================

fn classify(distance: f64, epsilon: f64) -> Classification {
    if distance > epsilon {
        Classification::Front
    } else if distance < -epsilon {
        Classification::Back
    } else {
        Classification::On
    }
}

/// Twice the shoelace area of a crease-pattern polygon (absolute value).
fn polygon_area_2d(model: &Model, points: &[usize]) -> f64 {
    let mut sum = 0.0;
    for i in 0..points.len() {
        let a = model.points[points[i]].pos_2d();
        let b = model.points[points[(i + 1) % points.len()]].pos_2d();
        sum += a.x * b.y - b.x * a.y;
    }
    sum.abs() * 0.5
}

// =============================================================================
// CORE SPLIT
// =============================================================================

impl Model {
    /// Truncates the segment joining `a` and `b` so it ends at `mid`, and
    /// appends a segment from `mid` to the released endpoint. Keeping the
    /// original index alive preserves its UI selection state.
    ///
    /// No-op when no segment joins `a` and `b` (the edge was already cut by
    /// an earlier face of the same pass).
    pub fn split_segment_at(&mut self, a: usize, b: usize, mid: usize) {
        if mid == a || mid == b {
            return;
        }
        if let Some(idx) = self.find_segment(a, b) {
            let released = self.segments[idx].p2;
            self.segments[idx].p2 = mid;
            self.add_segment(mid, released);
        }
    }

    /// Boundary walk shared by the 2D and 3D splits. `distance` gives the
    /// signed distance of a vertex to the cut in the driving space;
    /// `epsilon` is that space's on-cut band.
    ///
    /// Returns true when the face was actually split in two.
    fn split_face_by_distance<F>(&mut self, face: usize, distance: F, epsilon: f64) -> bool
    where
        F: Fn(&Point) -> f64,
    {
        let boundary = self.faces[face].points.clone();
        let n = boundary.len();
        if n < 3 {
            return false;
        }

        let mut front: Vec<usize> = Vec::new();
        let mut back: Vec<usize> = Vec::new();
        let mut on_cut: Vec<usize> = Vec::new();
        let mut front_strict = 0usize;
        let mut back_strict = 0usize;

        for i in 0..n {
            let a = boundary[i];
            let b = boundary[(i + 1) % n];
            let da = distance(&self.points[a]);
            let db = distance(&self.points[b]);
            let sa = classify(da, epsilon);
            let sb = classify(db, epsilon);

            match sa {
                Classification::Front => {
                    front.push(a);
                    front_strict += 1;
                }
                Classification::Back => {
                    back.push(a);
                    back_strict += 1;
                }
                Classification::On => {
                    front.push(a);
                    back.push(a);
                    on_cut.push(a);
                }
            }

            // A strict sign change along this edge inserts an intersection
            // point, placed at the same parameter in both spaces
            let crossing = matches!(
                (sa, sb),
                (Classification::Front, Classification::Back) | (Classification::Back, Classification::Front)
            );
            if crossing {
                let t = da / (da - db);
                let p2 = self.points[a].pos_2d().lerp(self.points[b].pos_2d(), t);
                let p3 = self.points[a].pos_3d().lerp(self.points[b].pos_3d(), t);
                let mid = self.add_point(p2.x, p2.y, p3.x, p3.y, p3.z);
                if mid == a || mid == b {
                    // Merge epsilon swallowed the intersection; the endpoint
                    // already represents it on its own side
                    continue;
                }
                self.split_segment_at(a, b, mid);
                front.push(mid);
                back.push(mid);
                on_cut.push(mid);
            }
        }

        // Both halves must be real polygons with real paper area
        if front_strict == 0
            || back_strict == 0
            || front.len() < 3
            || back.len() < 3
            || polygon_area_2d(self, &front) < FACE_AREA_EPSILON
            || polygon_area_2d(self, &back) < FACE_AREA_EPSILON
        {
            return false;
        }

        // The clipped face keeps its identity (and offset); the other half
        // becomes a brand-new face
        let offset = self.faces[face].offset;
        self.faces[face].points = back;
        let mut twin = Face::new(front);
        twin.offset = offset;
        self.faces.push(twin);

        // Crease segments along the cut
        for pair in on_cut.windows(2) {
            self.add_segment(pair[0], pair[1]);
        }
        true
    }

    /// Splits one face by a plane in folded space (classification band
    /// [`ON_PLANE_EPSILON_3D`]). Returns true when the face split.
    pub fn split_face_by_plane_3d(&mut self, face: usize, plane: &Plane) -> bool {
        self.split_face_by_distance(face, |p| plane.signed_distance(p.pos_3d()), ON_PLANE_EPSILON_3D)
    }

    /// Splits one face by the infinite line through `a` and `b` in the
    /// crease pattern (band [`ON_LINE_EPSILON_2D`]). Returns true when the
    /// face split.
    pub fn split_face_by_segment_2d(&mut self, face: usize, a: DVec2, b: DVec2) -> bool {
        self.split_face_by_distance(
            face,
            |p| signed_distance_to_line_2d(a, b, p.pos_2d()),
            ON_LINE_EPSILON_2D,
        )
    }

    // =========================================================================
    // WHOLE-MODEL ORCHESTRATION
    // =========================================================================

    /// Splits every face by a plane. Iterates in reverse index order so the
    /// faces appended by successful splits are not revisited in this pass.
    pub fn split_all_by_plane_3d(&mut self, plane: &Plane) {
        for face in (0..self.faces.len()).rev() {
            self.split_face_by_plane_3d(face, plane);
        }
    }

    /// Splits every face by a crease-pattern line, reverse order as above.
    pub fn split_all_by_line_2d(&mut self, a: DVec2, b: DVec2) {
        for face in (0..self.faces.len()).rev() {
            self.split_face_by_segment_2d(face, a, b);
        }
    }

    // =========================================================================
    // DERIVED SPLITS - 3D
    // =========================================================================

    /// Split by the vertical plane through two points.
    pub fn split_by_3d(&mut self, p1: usize, p2: usize) {
        if let Some(plane) = Plane::by(self.points[p1].pos_3d(), self.points[p2].pos_3d()) {
            self.split_all_by_plane_3d(&plane);
        }
    }

    /// Split by the plane perpendicular-bisecting `p1 p2` - the fold crease
    /// between the two points.
    pub fn split_cross_3d(&mut self, p1: usize, p2: usize) {
        if let Some(plane) = Plane::across(self.points[p1].pos_3d(), self.points[p2].pos_3d()) {
            self.split_all_by_plane_3d(&plane);
        }
    }

    /// Split by the plane perpendicular to segment `seg` through `point`.
    pub fn split_perpendicular_3d(&mut self, seg: usize, point: usize) {
        let s = &self.segments[seg];
        let plane = Plane::orthogonal(
            self.points[s.p1].pos_3d(),
            self.points[s.p2].pos_3d(),
            self.points[point].pos_3d(),
        );
        if let Some(plane) = plane {
            self.split_all_by_plane_3d(&plane);
        }
    }

    /// Split by the angle bisector of two segments: the across-plane through
    /// their closest-approach point and a unit-length point along each,
    /// both measured away from that point toward the segments' far ends.
    pub fn bisector_3d(&mut self, s1: usize, s2: usize) {
        let (a1, b1) = self.segment_ends_3d(s1);
        let (a2, b2) = self.segment_ends_3d(s2);
        let (p, q) = closest_points_between_lines(a1, b1, a2, b2);
        let center = (p + q) * 0.5;
        let (Some(u1), Some(u2)) = (
            away_dir_3d(a1, b1, center),
            away_dir_3d(a2, b2, center),
        ) else {
            return;
        };
        if let Some(plane) = Plane::across(center + u1, center + u2) {
            self.split_all_by_plane_3d(&plane);
        }
    }

    /// Split by the bisector of the angle at `b` formed by points `a b c`.
    pub fn bisector_3d_points(&mut self, a: usize, b: usize, c: usize) {
        let pa = self.points[a].pos_3d();
        let pb = self.points[b].pos_3d();
        let pc = self.points[c].pos_3d();
        let (Some(u1), Some(u2)) = ((pa - pb).try_normalize(), (pc - pb).try_normalize()) else {
            return;
        };
        if let Some(plane) = Plane::across(pb + u1, pb + u2) {
            self.split_all_by_plane_3d(&plane);
        }
    }

    fn segment_ends_3d(&self, seg: usize) -> (glam::DVec3, glam::DVec3) {
        let s = &self.segments[seg];
        (self.points[s.p1].pos_3d(), self.points[s.p2].pos_3d())
    }

    // =========================================================================
    // DERIVED SPLITS - 2D
    // =========================================================================

    /// Split by the crease-pattern line through two points.
    pub fn split_by_2d(&mut self, p1: usize, p2: usize) {
        let a = self.points[p1].pos_2d();
        let b = self.points[p2].pos_2d();
        if a.distance_squared(b) > 0.0 {
            self.split_all_by_line_2d(a, b);
        }
    }

    /// Split by the perpendicular bisector of `p1 p2` in the crease pattern.
    pub fn split_cross_2d(&mut self, p1: usize, p2: usize) {
        let a = self.points[p1].pos_2d();
        let b = self.points[p2].pos_2d();
        if let Some((la, lb)) = across_line_2d(a, b) {
            self.split_all_by_line_2d(la, lb);
        }
    }

    /// Split by the crease-pattern line perpendicular to `seg` through
    /// `point`.
    pub fn split_perpendicular_2d(&mut self, seg: usize, point: usize) {
        let s = &self.segments[seg];
        let dir = self.points[s.p2].pos_2d() - self.points[s.p1].pos_2d();
        let p = self.points[point].pos_2d();
        if dir.length_squared() > 0.0 {
            self.split_all_by_line_2d(p, p + dir.perp());
        }
    }

    /// Split by the angle bisector of two crease-pattern segments. Parallel
    /// segments bisect along their midline.
    pub fn bisector_2d(&mut self, s1: usize, s2: usize) {
        let (a1, b1) = self.segment_ends_2d(s1);
        let (a2, b2) = self.segment_ends_2d(s2);
        match line_intersection_2d(a1, b1, a2, b2) {
            Some(center) => {
                let (Some(u1), Some(u2)) = (
                    away_dir_2d(a1, b1, center),
                    away_dir_2d(a2, b2, center),
                ) else {
                    return;
                };
                if let Some((la, lb)) = across_line_2d(center + u1, center + u2) {
                    self.split_all_by_line_2d(la, lb);
                }
            }
            None => {
                // Parallel: the bisector is the midline between the two
                let Some(dir) = (b1 - a1).try_normalize() else {
                    return;
                };
                let offset = signed_distance_to_line_2d(a1, b1, a2);
                let right_normal = DVec2::new(dir.y, -dir.x);
                let m = a1 + right_normal * (offset * 0.5);
                self.split_all_by_line_2d(m, m + dir);
            }
        }
    }

    /// Split by the bisector of the crease-pattern angle at `b`.
    pub fn bisector_2d_points(&mut self, a: usize, b: usize, c: usize) {
        let pa = self.points[a].pos_2d();
        let pb = self.points[b].pos_2d();
        let pc = self.points[c].pos_2d();
        let (Some(u1), Some(u2)) = ((pa - pb).try_normalize(), (pc - pb).try_normalize()) else {
            return;
        };
        if let Some((la, lb)) = across_line_2d(pb + u1, pb + u2) {
            self.split_all_by_line_2d(la, lb);
        }
    }

    fn segment_ends_2d(&self, seg: usize) -> (DVec2, DVec2) {
        let s = &self.segments[seg];
        (self.points[s.p1].pos_2d(), self.points[s.p2].pos_2d())
    }
}

/// Unit direction from `center` toward the farther end of segment `a b`,
/// or `None` when the segment offers no direction.
fn away_dir_3d(a: glam::DVec3, b: glam::DVec3, center: glam::DVec3) -> Option<glam::DVec3> {
    let far = if a.distance_squared(center) >= b.distance_squared(center) {
        a
    } else {
        b
    };
    (far - center).try_normalize()
}

/// 2D counterpart of [`away_dir_3d`].
fn away_dir_2d(a: DVec2, b: DVec2, center: DVec2) -> Option<DVec2> {
    let far = if a.distance_squared(center) >= b.distance_squared(center) {
        a
    } else {
        b
    };
    (far - center).try_normalize()
}

/// The perpendicular bisector of `a b` as a point pair, or `None` for
/// coincident inputs.
fn across_line_2d(a: DVec2, b: DVec2) -> Option<(DVec2, DVec2)> {
    let dir = b - a;
    if dir.length_squared() == 0.0 {
        return None;
    }
    let mid = (a + b) * 0.5;
    Some((mid, mid + dir.perp()))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_split_segment_at_preserves_identity() {
        let mut model = Model::default_sheet();
        model.segments[0].select = 1;
        let mid = model.add_point(0.0, -200.0, 0.0, -200.0, 0.0);
        model.split_segment_at(0, 1, mid);

        assert_eq!(model.segments.len(), 5);
        // The original index still carries the selection and one endpoint
        assert_eq!(model.segments[0].select, 1);
        assert!(model.segments[0].touches(0));
        assert!(model.segments[0].touches(mid));
        assert!(model.segments[4].joins(mid, 1));
    }

    #[test]
    fn test_split_segment_at_missing_edge_is_noop() {
        let mut model = Model::default_sheet();
        let mid = model.add_point(0.0, 0.0, 0.0, 0.0, 0.0);
        model.split_segment_at(0, 2, mid); // no segment joins the diagonal
        assert_eq!(model.segments.len(), 4);
    }

    #[test]
    fn test_diagonal_split_through_vertices() {
        let mut model = Model::default_sheet();
        model.split_by_3d(0, 2);
        assert_eq!(model.faces.len(), 2);
        assert_eq!(model.points.len(), 4);
        assert_eq!(model.segments.len(), 5);
    }

    #[test]
    fn test_second_diagonal_meets_in_the_center() {
        let mut model = Model::default_sheet();
        model.split_by_3d(0, 2);
        model.split_by_3d(1, 3);
        assert_eq!(model.faces.len(), 4);
        assert_eq!(model.points.len(), 5);
        assert_eq!(model.segments.len(), 8);
        // The added point is the sheet center in both spaces
        let center = &model.points[4];
        assert_eq!(center.pos_2d(), DVec2::ZERO);
        assert_eq!(center.pos_3d(), DVec3::ZERO);
    }

    #[test]
    fn test_cross_split_creates_midline_crease() {
        let mut model = Model::default_sheet();
        model.split_cross_3d(0, 1);
        assert_eq!(model.faces.len(), 2);
        assert_eq!(model.points.len(), 6);
        assert_eq!(model.segments.len(), 7);
        // Midpoints of the bottom and top edges
        assert_eq!(model.points[4].pos_2d(), DVec2::new(0.0, -200.0));
        assert_eq!(model.points[5].pos_2d(), DVec2::new(0.0, 200.0));
    }

    #[test]
    fn test_cross_split_is_idempotent() {
        let mut model = Model::default_sheet();
        model.split_cross_2d(0, 1);
        let counts = (model.faces.len(), model.points.len(), model.segments.len());
        model.split_cross_2d(0, 1);
        assert_eq!(
            (model.faces.len(), model.points.len(), model.segments.len()),
            counts
        );
    }

    #[test]
    fn test_degenerate_cut_along_existing_edge_is_noop() {
        let mut model = Model::default_sheet();
        // The line through p0 p1 is the bottom edge itself
        model.split_by_2d(0, 1);
        assert_eq!(model.faces.len(), 1);
        assert_eq!(model.segments.len(), 4);
    }

    #[test]
    fn test_split_keeps_both_spaces_proportional() {
        let mut model = Model::default_sheet();
        // Fold the sheet in half first so 2D and 3D disagree
        model.split_cross_3d(0, 1);
        model.rotate(6, 90.0, &[1, 2]); // crease segment is index 6
        // Now cut across the folded sheet
        model.split_cross_3d(0, 4);
        for s in &model.segments {
            let ratio_spaces: Vec<f64> = [s.p1, s.p2]
                .iter()
                .map(|&p| model.points[p].pos_2d().length())
                .collect();
            // Smoke check: every endpoint still has finite coordinates
            assert!(ratio_spaces.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_perpendicular_split_2d() {
        let mut model = Model::default_sheet();
        // Perpendicular to the bottom edge through corner p1: the right edge
        // line, which is degenerate; through center-ish point instead
        model.split_cross_2d(0, 1); // creates midline point 4 at (0,-200)
        model.split_perpendicular_2d(0, 2);
        // Perpendicular to bottom edge through p2 runs along the right edge:
        // degenerate, no change to face count
        assert_eq!(model.faces.len(), 2);
    }

    #[test]
    fn test_bisector_2d_points_cuts_corner_angle() {
        let mut model = Model::default_sheet();
        // Bisector of the angle at p0 between p1 and p3 is the main diagonal
        model.bisector_2d_points(1, 0, 3);
        assert_eq!(model.faces.len(), 2);
        assert_eq!(model.points.len(), 4);
        assert_eq!(model.segments.len(), 5);
        assert!(model.find_segment(0, 2).is_some());
    }

    #[test]
    fn test_bisector_3d_of_adjacent_edges() {
        let mut model = Model::default_sheet();
        // Bottom edge (0) and right edge (1) meet at p1; their bisector
        // is the diagonal through p1 and p3
        model.bisector_3d(0, 1);
        assert_eq!(model.faces.len(), 2);
        assert_eq!(model.points.len(), 4);
        assert!(model.find_segment(1, 3).is_some());
    }

    #[test]
    fn test_bisector_2d_of_parallel_edges_is_their_midline() {
        let mut model = Model::default_sheet();
        // Bottom edge (0) and top edge (2) never intersect; the bisector
        // falls back to the midline y = 0
        model.bisector_2d(0, 2);
        assert_eq!(model.faces.len(), 2);
        assert_eq!(model.points.len(), 6);
        for id in 4..6 {
            assert!(model.points[id].pos_2d().y.abs() < 1e-9);
        }
        assert!(model.find_segment(4, 5).is_some());
    }
}
