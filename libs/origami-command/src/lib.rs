//! # Origami Command
//!
//! The command interpreter of the folding engine: a textual command stream
//! is tokenized into a flat queue, parsed into a typed instruction set, and
//! stepped one command (or one animation tick) at a time against the mesh
//! model, with a full-snapshot undo stack.
//!
//! ## Architecture
//!
//! ```text
//! origami-geom (primitives) → origami-model (mesh) → origami-command (interpreter)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use origami_command::Interpreter;
//! use origami_model::Model;
//!
//! let mut model = Model::new();
//! let mut interp = Interpreter::new();
//! interp.command("d 400 400; c3d 0 1)");
//! while interp.step(&mut model, 0.0) {}
//!
//! assert_eq!(model.faces.len(), 2);
//! ```

pub mod error;
pub mod instruction;
pub mod interpolator;
pub mod interpreter;
pub mod tokenizer;

// Re-export public API
pub use error::CommandError;
pub use instruction::Instruction;
pub use interpolator::{Interpolator, InterpolatorKind};
pub use interpreter::{Interpreter, State};
pub use tokenizer::{tokenize, EOC};
