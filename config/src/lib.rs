//! # Config Crate
//!
//! Centralized configuration constants for the origami folding engine.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{ON_LINE_EPSILON_2D, POINT_MERGE_EPSILON_2D};
//!
//! // Classify a signed distance against the 2D on-line band
//! let distance: f64 = 0.4;
//! assert!(distance.abs() <= ON_LINE_EPSILON_2D);
//!
//! // Decide whether two crease-pattern points are the same vertex
//! let gap: f64 = 1.5;
//! assert!(gap < POINT_MERGE_EPSILON_2D);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Unit-Aware**: Tolerances are expressed in crease-pattern units
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
