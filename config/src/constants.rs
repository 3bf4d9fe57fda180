//! # Configuration Constants
//!
//! Centralized constants for the origami folding engine. All geometry
//! tolerances, solver parameters, and sheet defaults are defined here.
//!
//! ## Categories
//!
//! - **Classification**: On-line / on-plane tolerance bands for splits
//! - **Merging**: Vertex and segment deduplication tolerances
//! - **Solver**: Iteration caps and convergence thresholds for `adjust`
//! - **Sheet**: Default crease-pattern dimensions

// =============================================================================
// CLASSIFICATION CONSTANTS
// =============================================================================

/// On-line tolerance band for 2D split classification, in crease units.
///
/// A crease-pattern point whose signed distance to a split line has absolute
/// value at or below this band counts as lying *on* the line. The sheet is
/// hundreds of units across, so a one-unit band absorbs the accumulated
/// floating-point noise of repeated splits without swallowing real geometry.
///
/// # Example
///
/// ```rust
/// use config::constants::ON_LINE_EPSILON_2D;
///
/// fn on_line(signed_distance: f64) -> bool {
///     signed_distance.abs() <= ON_LINE_EPSILON_2D
/// }
///
/// assert!(on_line(0.5));
/// assert!(!on_line(3.0));
/// ```
pub const ON_LINE_EPSILON_2D: f64 = 1.0;

/// On-plane tolerance band for 3D split classification, in folded-space units.
///
/// Wider than the 2D band: folded coordinates carry error from chained
/// rotations and solver relaxation, so vertices settle further from the exact
/// crease plane than their crease-pattern twins do from the crease line.
/// The 2D/3D ratio of these two bands is load-bearing for split stability.
pub const ON_PLANE_EPSILON_3D: f64 = 10.0;

/// Minimum absolute polygon area, in crease units squared, for a split half
/// to count as a real face. Halves below this are slivers produced by cuts
/// along existing creases and are discarded without touching the model.
pub const FACE_AREA_EPSILON: f64 = 1.0;

/// Determinant threshold below which two 2D lines are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-9;

// =============================================================================
// MERGE CONSTANTS
// =============================================================================

/// Vertex deduplication distance in the crease pattern, in crease units.
///
/// Two points within this 2D distance are the same vertex: split operations
/// that land an intersection on an existing point must reuse it, or shared
/// creases would tear apart.
///
/// # Example
///
/// ```rust
/// use config::constants::POINT_MERGE_EPSILON_2D;
///
/// fn same_vertex(dx: f64, dy: f64) -> bool {
///     (dx * dx + dy * dy).sqrt() < POINT_MERGE_EPSILON_2D
/// }
///
/// assert!(same_vertex(1.0, 1.0));
/// assert!(!same_vertex(3.0, 0.0));
/// ```
pub const POINT_MERGE_EPSILON_2D: f64 = 2.0;

// =============================================================================
// SOLVER CONSTANTS
// =============================================================================

/// Maximum relaxation iterations for the per-point length solver (`adjust`).
pub const ADJUST_MAX_ITERATIONS: usize = 200;

/// Worst-length-error threshold at which `adjust` stops early, in crease
/// units. Paper does not stretch; below this residual it visibly has not.
pub const ADJUST_TOLERANCE: f64 = 0.01;

/// Maximum outer iterations for `adjust_list` over interdependent points.
pub const ADJUST_LIST_MAX_ITERATIONS: usize = 200;

/// Stabilization threshold for `adjust_list`: when the worst residual across
/// all listed points changes by less than this between outer passes, further
/// passes cannot improve the mesh and the loop ends.
pub const ADJUST_LIST_TOLERANCE: f64 = 1e-4;

/// Tolerance for the `check` command: a segment whose crease-pattern length
/// and scale-normalized folded length differ by more than this is flagged.
pub const LENGTH_CHECK_TOLERANCE: f64 = 1.0;

// =============================================================================
// SHEET CONSTANTS
// =============================================================================

/// Default half-width of the initial sheet, in crease units.
///
/// `define` with no arguments creates a square spanning
/// `[-DEFAULT_SHEET_HALF, +DEFAULT_SHEET_HALF]` on both axes: a 400x400
/// sheet with corners indexed 0..3 counter-clockwise.
pub const DEFAULT_SHEET_HALF: f64 = 200.0;

/// Target extent, in folded-space units, that `fit` scales the model to.
pub const FIT_TARGET_EXTENT: f64 = 400.0;
