//! # Origami Geom
//!
//! Geometric primitives for the origami folding engine.
//!
//! ## Architecture
//!
//! ```text
//! origami-geom (primitives) → origami-model (mesh) → origami-command (interpreter)
//! ```
//!
//! Everything here is a pure value type or a pure function: no hidden state,
//! no tolerance decisions beyond those the caller passes in or that
//! `config::constants` centralizes.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec2;
//! use origami_geom::segment_intersection_flat;
//!
//! let hit = segment_intersection_flat(
//!     DVec2::new(0.0, 0.0),
//!     DVec2::new(10.0, 0.0),
//!     DVec2::new(5.0, -5.0),
//!     DVec2::new(5.0, 5.0),
//! );
//! assert_eq!(hit, Some(DVec2::new(5.0, 0.0)));
//! ```

pub mod plane;
pub mod primitives;
pub mod rotation;

// Re-export public API
pub use plane::{Classification, Plane};
pub use primitives::{
    closest_points_between_lines, distance_point_to_segment_2d, line_intersection_2d,
    segment_intersection_flat, signed_area, signed_distance_to_line_2d,
};
pub use rotation::rotate_around_axis;
