//! # Mesh Model
//!
//! The point/segment/face arena and every operation that does not change
//! topology: deduplicating adds, fold rotation, whole-model transforms,
//! selection state and the 2D/3D length check.
//!
//! Topology-changing splits live in [`crate::split`]; the length-matching
//! solver in [`crate::adjust`].

use config::constants::{
    DEFAULT_SHEET_HALF, FIT_TARGET_EXTENT, LENGTH_CHECK_TOLERANCE, POINT_MERGE_EPSILON_2D,
};
use glam::{DVec2, DVec3};
use origami_geom::rotate_around_axis;

// =============================================================================
// POINT
// =============================================================================

/// A vertex of the sheet, present in both coordinate spaces at once.
///
/// `(xf, yf)` is the position in the flat crease pattern; `(x, y, z)` the
/// position in folded space. `(x_canvas, y_canvas)` is a transient screen
/// projection written by the rendering collaborator and never read by the
/// engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Crease-pattern x coordinate.
    pub xf: f64,
    /// Crease-pattern y coordinate.
    pub yf: f64,
    /// Folded-space x coordinate.
    pub x: f64,
    /// Folded-space y coordinate.
    pub y: f64,
    /// Folded-space z coordinate.
    pub z: f64,
    /// Screen projection x (rendering-owned).
    pub x_canvas: f64,
    /// Screen projection y (rendering-owned).
    pub y_canvas: f64,
    /// UI hover state.
    pub hover: bool,
    /// UI selection state: 0 = none, 1 = primary, 2 = secondary.
    pub select: u8,
}

impl Point {
    /// Creates a point at the given 2D and 3D positions.
    pub fn new(xf: f64, yf: f64, x: f64, y: f64, z: f64) -> Self {
        Self {
            xf,
            yf,
            x,
            y,
            z,
            x_canvas: 0.0,
            y_canvas: 0.0,
            hover: false,
            select: 0,
        }
    }

    /// Creates a flat point: folded position equal to the crease pattern.
    pub fn flat(xf: f64, yf: f64) -> Self {
        Self::new(xf, yf, xf, yf, 0.0)
    }

    /// Crease-pattern position.
    #[inline]
    pub fn pos_2d(&self) -> DVec2 {
        DVec2::new(self.xf, self.yf)
    }

    /// Folded-space position.
    #[inline]
    pub fn pos_3d(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Overwrites the folded-space position.
    #[inline]
    pub fn set_3d(&mut self, p: DVec3) {
        self.x = p.x;
        self.y = p.y;
        self.z = p.z;
    }
}

// =============================================================================
// SEGMENT
// =============================================================================

/// An undirected edge between two points of the arena.
///
/// At most one segment exists between any pair of points; `(p1, p2)` and
/// `(p2, p1)` are the same segment for lookup purposes. Splits truncate a
/// segment in place so its index (and UI state) survives the cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// First endpoint handle.
    pub p1: usize,
    /// Second endpoint handle.
    pub p2: usize,
    /// UI hover state.
    pub hover: bool,
    /// UI selection state: 0 = none, 1 = primary, 2 = secondary.
    pub select: u8,
}

impl Segment {
    /// Creates a segment between two point handles.
    pub fn new(p1: usize, p2: usize) -> Self {
        Self {
            p1,
            p2,
            hover: false,
            select: 0,
        }
    }

    /// True when this segment joins `a` and `b` in either order.
    #[inline]
    pub fn joins(&self, a: usize, b: usize) -> bool {
        (self.p1 == a && self.p2 == b) || (self.p1 == b && self.p2 == a)
    }

    /// True when `p` is one of the endpoints.
    #[inline]
    pub fn touches(&self, p: usize) -> bool {
        self.p1 == p || self.p2 == p
    }

    /// The endpoint opposite `p`. Returns `p1` when `p` is not an endpoint.
    #[inline]
    pub fn other(&self, p: usize) -> usize {
        if self.p1 == p {
            self.p2
        } else {
            self.p1
        }
    }
}

// =============================================================================
// FACE
// =============================================================================

/// A counter-clockwise polygon over point handles.
///
/// Boundary points taken consecutively always match existing segments; the
/// split routines maintain that correspondence themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Boundary point handles, counter-clockwise.
    pub points: Vec<usize>,
    /// Separation distance used by rendering for the thickness effect.
    pub offset: f64,
    /// UI hover state.
    pub hover: bool,
    /// UI selection state: 0 = none, 1 = primary, 2 = secondary.
    pub select: u8,
}

impl Face {
    /// Creates a face over the given boundary handles.
    pub fn new(points: Vec<usize>) -> Self {
        Self {
            points,
            offset: 0.0,
            hover: false,
            select: 0,
        }
    }
}

// =============================================================================
// AXIS
// =============================================================================

/// World axis for whole-model `turn` rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit direction of the axis.
    pub fn dir(self) -> DVec3 {
        match self {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        }
    }
}

// =============================================================================
// MODEL
// =============================================================================

/// The mesh: point arena plus segments and faces referencing it by handle.
///
/// `scale` is the accumulated uniform 3D scale factor; it only changes
/// through [`Model::scale_model`] / [`Model::zoom`] and accumulates
/// multiplicatively. The solver divides folded lengths by it before
/// comparing against crease lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Point arena. Handles are indices into this vector and are stable:
    /// points are never removed within one `define` session.
    pub points: Vec<Point>,
    /// Segments referencing the arena by handle.
    pub segments: Vec<Segment>,
    /// Faces referencing the arena by handle.
    pub faces: Vec<Face>,
    /// Accumulated uniform 3D scale factor.
    pub scale: f64,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            segments: Vec::new(),
            faces: Vec::new(),
            scale: 1.0,
        }
    }

    /// Resets the model to a flat rectangle with the given corner
    /// coordinates, counter-clockwise from `(x_min, y_min)`.
    pub fn define_rectangle(&mut self, x_min: f64, y_min: f64, x_max: f64, y_max: f64) {
        self.points.clear();
        self.segments.clear();
        self.faces.clear();
        self.scale = 1.0;

        let p0 = self.add_point(x_min, y_min, x_min, y_min, 0.0);
        let p1 = self.add_point(x_max, y_min, x_max, y_min, 0.0);
        let p2 = self.add_point(x_max, y_max, x_max, y_max, 0.0);
        let p3 = self.add_point(x_min, y_max, x_min, y_max, 0.0);
        self.add_face(vec![p0, p1, p2, p3]);
    }

    /// Convenience: a fresh square sheet spanning `[-half, +half]`.
    pub fn square(half: f64) -> Self {
        let mut model = Self::new();
        model.define_rectangle(-half, -half, half, half);
        model
    }

    /// A fresh default sheet (400x400 crease units).
    pub fn default_sheet() -> Self {
        Self::square(DEFAULT_SHEET_HALF)
    }

    // =========================================================================
    // DEDUPLICATING ADDS
    // =========================================================================

    /// Adds a point, reusing any existing point within the crease-pattern
    /// merge distance of `(xf, yf)`. Returns the handle.
    pub fn add_point(&mut self, xf: f64, yf: f64, x: f64, y: f64, z: f64) -> usize {
        let candidate = DVec2::new(xf, yf);
        if let Some(existing) = self
            .points
            .iter()
            .position(|p| p.pos_2d().distance(candidate) < POINT_MERGE_EPSILON_2D)
        {
            return existing;
        }
        self.points.push(Point::new(xf, yf, x, y, z));
        self.points.len() - 1
    }

    /// Finds the undirected segment joining `a` and `b`, if any.
    pub fn find_segment(&self, a: usize, b: usize) -> Option<usize> {
        self.segments.iter().position(|s| s.joins(a, b))
    }

    /// Adds a segment between two handles, reusing an existing one in
    /// either direction. Returns the handle.
    pub fn add_segment(&mut self, a: usize, b: usize) -> usize {
        if let Some(existing) = self.find_segment(a, b) {
            return existing;
        }
        self.segments.push(Segment::new(a, b));
        self.segments.len() - 1
    }

    /// Adds a face over the given boundary, reusing an existing face with an
    /// identical handle list. Ensures every boundary edge has a backing
    /// segment. Returns the handle.
    pub fn add_face(&mut self, points: Vec<usize>) -> usize {
        if let Some(existing) = self.faces.iter().position(|f| f.points == points) {
            return existing;
        }
        for i in 0..points.len() {
            let j = (i + 1) % points.len();
            self.add_segment(points[i], points[j]);
        }
        self.faces.push(Face::new(points));
        self.faces.len() - 1
    }

    // =========================================================================
    // LENGTHS
    // =========================================================================

    /// Crease-pattern length of a segment.
    pub fn length_2d(&self, seg: usize) -> f64 {
        let s = &self.segments[seg];
        self.points[s.p1].pos_2d().distance(self.points[s.p2].pos_2d())
    }

    /// Folded-space length of a segment (not scale-normalized).
    pub fn length_3d(&self, seg: usize) -> f64 {
        let s = &self.segments[seg];
        self.points[s.p1].pos_3d().distance(self.points[s.p2].pos_3d())
    }

    /// Handles of all segments incident to a point.
    pub fn segments_at(&self, point: usize) -> Vec<usize> {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.touches(point))
            .map(|(i, _)| i)
            .collect()
    }

    /// Flags segments whose crease length and scale-normalized folded length
    /// disagree beyond tolerance, and returns their handles.
    pub fn check_lengths(&mut self) -> Vec<usize> {
        let mut flagged = Vec::new();
        for i in 0..self.segments.len() {
            let error = (self.length_3d(i) / self.scale - self.length_2d(i)).abs();
            if error > LENGTH_CHECK_TOLERANCE {
                self.segments[i].select = 1;
                flagged.push(i);
            }
        }
        flagged
    }

    // =========================================================================
    // FOLD ROTATION
    // =========================================================================

    /// Rotates the listed points about the 3D line of `seg` by `angle_deg`
    /// (right-hand rule around `p1 -> p2`). This is the fold motion.
    pub fn rotate(&mut self, seg: usize, angle_deg: f64, points: &[usize]) {
        let s = &self.segments[seg];
        let origin = self.points[s.p1].pos_3d();
        let dir = self.points[s.p2].pos_3d() - origin;
        let angle = angle_deg.to_radians();
        for &id in points {
            let rotated = rotate_around_axis(origin, dir, angle, self.points[id].pos_3d());
            self.points[id].set_3d(rotated);
        }
    }

    // =========================================================================
    // WHOLE-MODEL TRANSFORMS
    // =========================================================================

    /// Rotates every point about a world axis through the origin (viewing
    /// rotation; the crease pattern is untouched).
    pub fn turn(&mut self, axis: Axis, angle_deg: f64) {
        let angle = angle_deg.to_radians();
        let dir = axis.dir();
        for p in &mut self.points {
            let rotated = rotate_around_axis(DVec3::ZERO, dir, angle, p.pos_3d());
            p.set_3d(rotated);
        }
    }

    /// Scales folded space uniformly about the origin. Accumulates into
    /// `scale`.
    pub fn scale_model(&mut self, factor: f64) {
        self.zoom(factor, DVec2::ZERO);
    }

    /// Scales folded space uniformly about `(center.x, center.y, 0)`.
    /// Accumulates into `scale`.
    pub fn zoom(&mut self, factor: f64, center: DVec2) {
        let c = DVec3::new(center.x, center.y, 0.0);
        for p in &mut self.points {
            let scaled = c + (p.pos_3d() - c) * factor;
            p.set_3d(scaled);
        }
        self.scale *= factor;
    }

    /// Moves the model `fraction` of the way toward filling the fit target
    /// extent centered on the origin. `fraction == 1.0` fits exactly.
    pub fn fit_step(&mut self, fraction: f64) {
        let Some((center, extent)) = self.bounding_sphere_xy() else {
            return;
        };
        if extent == 0.0 {
            return;
        }
        let target = FIT_TARGET_EXTENT / extent;
        let factor = 1.0 + (target - 1.0) * fraction;
        for p in &mut self.points {
            let moved = p.pos_3d() - center * fraction;
            p.set_3d(moved);
        }
        self.zoom(factor, DVec2::ZERO);
    }

    /// Bounding-box center and largest x/y extent of folded space.
    fn bounding_sphere_xy(&self) -> Option<(DVec3, f64)> {
        let first = self.points.first()?;
        let mut min = first.pos_3d();
        let mut max = min;
        for p in &self.points {
            min = min.min(p.pos_3d());
            max = max.max(p.pos_3d());
        }
        let size = max - min;
        Some(((min + max) * 0.5, size.x.max(size.y)))
    }

    /// Translates the listed points in folded space.
    pub fn move_points(&mut self, delta: DVec3, points: &[usize]) {
        for &id in points {
            let moved = self.points[id].pos_3d() + delta;
            self.points[id].set_3d(moved);
        }
    }

    /// Moves the listed points `fraction` of their remaining way onto the
    /// target point's folded position. `fraction == 1.0` lands exactly.
    pub fn move_on(&mut self, target: usize, fraction: f64, points: &[usize]) {
        let goal = self.points[target].pos_3d();
        for &id in points {
            let p = self.points[id].pos_3d();
            self.points[id].set_3d(p + (goal - p) * fraction);
        }
    }

    /// Sets the rendering offset of the listed faces.
    pub fn offset(&mut self, dz: f64, faces: &[usize]) {
        for &id in faces {
            self.faces[id].offset = dz;
        }
    }

    /// Flattens the listed points (or all points when the list is empty)
    /// onto the z = 0 plane.
    pub fn flat(&mut self, points: &[usize]) {
        if points.is_empty() {
            for p in &mut self.points {
                p.z = 0.0;
            }
        } else {
            for &id in points {
                self.points[id].z = 0.0;
            }
        }
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Replaces the point selection with the listed handles.
    pub fn select_points(&mut self, points: &[usize]) {
        for p in &mut self.points {
            p.select = 0;
        }
        for &id in points {
            self.points[id].select = 1;
        }
    }

    /// Replaces the segment selection with the listed handles.
    pub fn select_segments(&mut self, segments: &[usize]) {
        for s in &mut self.segments {
            s.select = 0;
        }
        for &id in segments {
            self.segments[id].select = 1;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_define_builds_square_ccw() {
        let model = Model::default_sheet();
        assert_eq!(model.points.len(), 4);
        assert_eq!(model.segments.len(), 4);
        assert_eq!(model.faces.len(), 1);
        assert_eq!(model.faces[0].points, vec![0, 1, 2, 3]);
        assert_eq!(model.points[0].pos_2d(), DVec2::new(-200.0, -200.0));
        assert_eq!(model.points[2].pos_2d(), DVec2::new(200.0, 200.0));
    }

    #[test]
    fn test_add_point_merges_within_epsilon() {
        let mut model = Model::default_sheet();
        let id = model.add_point(-199.5, -200.0, 0.0, 0.0, 0.0);
        assert_eq!(id, 0);
        assert_eq!(model.points.len(), 4);
    }

    #[test]
    fn test_add_segment_is_undirected() {
        let mut model = Model::default_sheet();
        let forward = model.add_segment(0, 1);
        let backward = model.add_segment(1, 0);
        assert_eq!(forward, backward);
        assert_eq!(model.segments.len(), 4);
    }

    #[test]
    fn test_add_face_backfills_segments() {
        let mut model = Model::new();
        let a = model.add_point(0.0, 0.0, 0.0, 0.0, 0.0);
        let b = model.add_point(10.0, 0.0, 10.0, 0.0, 0.0);
        let c = model.add_point(10.0, 10.0, 10.0, 10.0, 0.0);
        model.add_face(vec![a, b, c]);
        assert_eq!(model.segments.len(), 3);
    }

    #[test]
    fn test_rotate_folds_corner_over_bottom_edge() {
        let mut model = Model::default_sheet();
        // Bottom edge p0 -> p1 is segment 0
        model.rotate(0, 90.0, &[2]);
        let p2 = model.points[2].pos_3d();
        assert_relative_eq!(p2.x, 200.0, epsilon = 1e-9);
        assert_relative_eq!(p2.y, -200.0, epsilon = 1e-9);
        assert_relative_eq!(p2.z, 400.0, epsilon = 1e-9);
        // Crease pattern must not move
        assert_eq!(model.points[2].pos_2d(), DVec2::new(200.0, 200.0));
    }

    #[test]
    fn test_scale_accumulates_multiplicatively() {
        let mut model = Model::default_sheet();
        model.scale_model(2.0);
        model.scale_model(0.5);
        assert_relative_eq!(model.scale, 1.0);
        assert_relative_eq!(model.points[1].x, 200.0);
    }

    #[test]
    fn test_zoom_scales_about_center() {
        let mut model = Model::default_sheet();
        model.zoom(2.0, DVec2::new(-200.0, -200.0));
        // The corner at the zoom center stays put
        assert_relative_eq!(model.points[0].x, -200.0);
        assert_relative_eq!(model.points[2].x, 600.0);
        assert_relative_eq!(model.scale, 2.0);
    }

    #[test]
    fn test_move_on_full_fraction_lands_on_target() {
        let mut model = Model::default_sheet();
        model.move_on(0, 1.0, &[2]);
        assert_eq!(model.points[2].pos_3d(), model.points[0].pos_3d());
        // 2D untouched
        assert_eq!(model.points[2].pos_2d(), DVec2::new(200.0, 200.0));
    }

    #[test]
    fn test_check_lengths_flags_stretch() {
        let mut model = Model::default_sheet();
        model.points[1].x += 50.0;
        let flagged = model.check_lengths();
        assert!(!flagged.is_empty());
        assert_eq!(model.segments[flagged[0]].select, 1);
    }

    #[test]
    fn test_check_lengths_respects_scale() {
        let mut model = Model::default_sheet();
        model.scale_model(3.0);
        assert!(model.check_lengths().is_empty());
    }

    #[test]
    fn test_select_points_replaces_selection() {
        let mut model = Model::default_sheet();
        model.select_points(&[0, 2]);
        model.select_points(&[1]);
        assert_eq!(model.points[0].select, 0);
        assert_eq!(model.points[1].select, 1);
        assert_eq!(model.points[2].select, 0);
    }

    #[test]
    fn test_fit_step_full_fraction_centers_and_fills() {
        let mut model = Model::default_sheet();
        model.zoom(0.25, DVec2::new(100.0, 0.0));
        model.fit_step(1.0);
        let min = model
            .points
            .iter()
            .fold(DVec3::splat(f64::INFINITY), |m, p| m.min(p.pos_3d()));
        let max = model
            .points
            .iter()
            .fold(DVec3::splat(f64::NEG_INFINITY), |m, p| m.max(p.pos_3d()));
        let center = (min + max) * 0.5;
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(max.x - min.x, 400.0, epsilon = 1e-6);
    }
}
