//! # Origami Model
//!
//! The mesh model of the folding engine: a sheet of material held
//! simultaneously in 2D crease-pattern space and 3D folded space.
//!
//! ## Architecture
//!
//! ```text
//! origami-geom (primitives) → origami-model (mesh) → origami-command (interpreter)
//! ```
//!
//! Points live in an arena and are addressed by stable integer handles;
//! segments and faces store handles, never copies, so every holder observes
//! updates to a shared vertex. Split operations keep both coordinate spaces
//! consistent: a point inserted on an edge in one space is placed at the
//! same proportional parameter in the other.
//!
//! ## Example
//!
//! ```rust
//! use origami_model::Model;
//!
//! let mut model = Model::square(200.0);
//! assert_eq!(model.points.len(), 4);
//!
//! // Fold crease down the middle: two faces, two new midpoints
//! model.split_cross_3d(0, 1);
//! assert_eq!(model.faces.len(), 2);
//! assert_eq!(model.points.len(), 6);
//! assert_eq!(model.segments.len(), 7);
//! ```

pub mod adjust;
pub mod error;
pub mod model;
pub mod snapshot;
pub mod split;

// Re-export public API
pub use error::ModelError;
pub use model::{Axis, Face, Model, Point, Segment};
pub use snapshot::ModelState;
