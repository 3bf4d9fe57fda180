//! # Instruction Set
//!
//! Tokens are parsed into a typed [`Instruction`] before execution, so
//! dispatch is an exhaustive match instead of a string-keyed fallthrough
//! chain. Parsing consumes tokens up to (but not including) the next `eoc`
//! marker; index arguments are validated against the live model later, at
//! execution time, because collection sizes change as commands run.

use config::constants::DEFAULT_SHEET_HALF;
use glam::{DVec2, DVec3};
use origami_model::Axis;

use crate::error::CommandError;
use crate::interpolator::InterpolatorKind;
use crate::tokenizer::EOC;

/// One parsed command from the token stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// `define`/`d`: reset the mesh to a rectangle. No numbers means the
    /// default sheet; two are a width/height pair (centered on the origin);
    /// four are explicit `x_min y_min x_max y_max` corners.
    Define { corners: [f64; 4] },
    /// `by3d`: split by the plane through two points.
    By3d { p1: usize, p2: usize },
    /// `by2d`: split by the crease-pattern line through two points.
    By2d { p1: usize, p2: usize },
    /// `across3d`/`cross3d`/`c3d`: fold crease: split by the plane
    /// perpendicular-bisecting the two points.
    Cross3d { p1: usize, p2: usize },
    /// `across2d`/`cross2d`/`c2d`: 2D counterpart of [`Self::Cross3d`].
    Cross2d { p1: usize, p2: usize },
    /// `perpendicular3d`/`p3d`: split perpendicular to a segment through
    /// a point.
    Perpendicular3d { seg: usize, point: usize },
    /// `perpendicular2d`/`p2d`.
    Perpendicular2d { seg: usize, point: usize },
    /// `bisector3d`: split by the angle bisector of two segments.
    Bisector3d { s1: usize, s2: usize },
    /// `bisector2d`.
    Bisector2d { s1: usize, s2: usize },
    /// `bisector3dPoints`: split by the bisector of the angle at `b`.
    Bisector3dPoints { a: usize, b: usize, c: usize },
    /// `bisector2dPoints`.
    Bisector2dPoints { a: usize, b: usize, c: usize },
    /// `rotate`/`r`: fold rotation of points about a segment axis.
    Rotate {
        seg: usize,
        angle: f64,
        points: Vec<usize>,
    },
    /// `move`/`m`: translate points by a 3D delta.
    Move { delta: DVec3, points: Vec<usize> },
    /// `moveOn`/`mo`: collapse points onto a target point.
    MoveOn { target: usize, points: Vec<usize> },
    /// `adjust`/`a`: run the length-matching solver. An empty list means
    /// every point.
    Adjust { points: Vec<usize> },
    /// `offset`/`o`: set the rendering offset of faces.
    Offset { dz: f64, faces: Vec<usize> },
    /// `turn`/`tx`/`ty`/`tz`: rotate the whole model about a world axis.
    Turn { axis: Axis, angle: f64 },
    /// `zoom`/`z`: uniform scale about a canvas point.
    Zoom { factor: f64, center: DVec2 },
    /// `fit`/`zf`: scale and pan the model back to the standard extent.
    Fit,
    /// `il`/`ib`/...: select the active easing curve.
    SelectInterpolator(InterpolatorKind),
    /// `selectPoints`/`sp`.
    SelectPoints { points: Vec<usize> },
    /// `selectSegments`/`ss`.
    SelectSegments { segments: Vec<usize> },
    /// `time`/`t`: begin a timed animation batch.
    Time { duration_ms: f64 },
    /// `undo`/`u`: revert the last command.
    Undo,
    /// `check`: select segments whose 2D/3D lengths disagree.
    Check,
    /// `flat`: flatten points to z = 0. An empty list means every point.
    Flat { points: Vec<usize> },
    /// `pause`/`pa`: suspend the interpreter.
    Pause,
    /// `continue`/`co`: resume a paused interpreter.
    Continue,
}

impl Instruction {
    /// Parses one instruction starting at `cursor`, which must point at a
    /// command keyword (not an `eoc` marker). Returns the instruction and
    /// the cursor position just past its last argument.
    pub fn parse(tokens: &[String], cursor: usize) -> Result<(Self, usize), CommandError> {
        let mut args = Args {
            tokens,
            pos: cursor + 1,
        };
        let keyword = tokens[cursor].as_str();
        let instruction = match keyword {
            "define" | "d" => {
                let numbers = args.rest_numbers();
                match numbers[..] {
                    [] => Self::Define {
                        corners: [
                            -DEFAULT_SHEET_HALF,
                            -DEFAULT_SHEET_HALF,
                            DEFAULT_SHEET_HALF,
                            DEFAULT_SHEET_HALF,
                        ],
                    },
                    [w, h] => Self::Define {
                        corners: [-w / 2.0, -h / 2.0, w / 2.0, h / 2.0],
                    },
                    [x_min, y_min, x_max, y_max] => Self::Define {
                        corners: [x_min, y_min, x_max, y_max],
                    },
                    _ => return Err(CommandError::MissingArgument("rectangle corner")),
                }
            }
            "by3d" => Self::By3d {
                p1: args.index("point")?,
                p2: args.index("point")?,
            },
            "by2d" => Self::By2d {
                p1: args.index("point")?,
                p2: args.index("point")?,
            },
            "across3d" | "cross3d" | "c3d" => Self::Cross3d {
                p1: args.index("point")?,
                p2: args.index("point")?,
            },
            "across2d" | "cross2d" | "c2d" => Self::Cross2d {
                p1: args.index("point")?,
                p2: args.index("point")?,
            },
            "perpendicular3d" | "p3d" => Self::Perpendicular3d {
                seg: args.index("segment")?,
                point: args.index("point")?,
            },
            "perpendicular2d" | "p2d" => Self::Perpendicular2d {
                seg: args.index("segment")?,
                point: args.index("point")?,
            },
            "bisector3d" => Self::Bisector3d {
                s1: args.index("segment")?,
                s2: args.index("segment")?,
            },
            "bisector2d" => Self::Bisector2d {
                s1: args.index("segment")?,
                s2: args.index("segment")?,
            },
            "bisector3dPoints" => Self::Bisector3dPoints {
                a: args.index("point")?,
                b: args.index("point")?,
                c: args.index("point")?,
            },
            "bisector2dPoints" => Self::Bisector2dPoints {
                a: args.index("point")?,
                b: args.index("point")?,
                c: args.index("point")?,
            },
            "rotate" | "r" => Self::Rotate {
                seg: args.index("segment")?,
                angle: args.number("angle")?,
                points: args.rest_indices(),
            },
            "move" | "m" => Self::Move {
                delta: DVec3::new(
                    args.number("dx")?,
                    args.number("dy")?,
                    args.number("dz")?,
                ),
                points: args.rest_indices(),
            },
            "moveOn" | "mo" => Self::MoveOn {
                target: args.index("point")?,
                points: args.rest_indices(),
            },
            "adjust" | "a" => Self::Adjust {
                points: args.rest_indices(),
            },
            "offset" | "o" => Self::Offset {
                dz: args.number("dz")?,
                faces: args.rest_indices(),
            },
            "turn" | "ty" => Self::Turn {
                axis: Axis::Y,
                angle: args.number("angle")?,
            },
            "tx" => Self::Turn {
                axis: Axis::X,
                angle: args.number("angle")?,
            },
            "tz" => Self::Turn {
                axis: Axis::Z,
                angle: args.number("angle")?,
            },
            "zoom" | "z" => Self::Zoom {
                factor: args.number("scale")?,
                center: DVec2::new(args.number("cx")?, args.number("cy")?),
            },
            "fit" | "zf" => Self::Fit,
            "selectPoints" | "sp" => Self::SelectPoints {
                points: args.rest_indices(),
            },
            "selectSegments" | "ss" => Self::SelectSegments {
                segments: args.rest_indices(),
            },
            "time" | "t" => Self::Time {
                duration_ms: args.number("duration")?,
            },
            "undo" | "u" => Self::Undo,
            "check" => Self::Check,
            "flat" => Self::Flat {
                points: args.rest_indices(),
            },
            "pause" | "pa" => Self::Pause,
            "continue" | "co" => Self::Continue,
            other => {
                if let Some(kind) = InterpolatorKind::from_mnemonic(other) {
                    Self::SelectInterpolator(kind)
                } else {
                    return Err(CommandError::UnknownCommand(other.to_owned()));
                }
            }
        };
        Ok((instruction, args.pos))
    }
}

/// A consuming view over one command's argument tokens.
struct Args<'a> {
    tokens: &'a [String],
    pos: usize,
}

impl<'a> Args<'a> {
    fn peek(&self) -> Option<&'a str> {
        self.tokens
            .get(self.pos)
            .map(String::as_str)
            .filter(|t| *t != EOC)
    }

    fn next(&mut self, context: &'static str) -> Result<&'a str, CommandError> {
        let token = self
            .peek()
            .ok_or(CommandError::MissingArgument(context))?;
        self.pos += 1;
        Ok(token)
    }

    fn number(&mut self, context: &'static str) -> Result<f64, CommandError> {
        let token = self.next(context)?;
        token
            .parse()
            .map_err(|_| CommandError::bad_number(context, token))
    }

    fn index(&mut self, context: &'static str) -> Result<usize, CommandError> {
        let token = self.next(context)?;
        token
            .parse()
            .map_err(|_| CommandError::bad_number(context, token))
    }

    /// Consumes numeric tokens as an index list, stopping at the first
    /// non-numeric token. Animated batches concatenate sub-commands without
    /// separators, so the next keyword terminates the list.
    fn rest_indices(&mut self) -> Vec<usize> {
        let mut indices = Vec::new();
        while let Some(index) = self.peek().and_then(|t| t.parse().ok()) {
            indices.push(index);
            self.pos += 1;
        }
        indices
    }

    /// Numeric-list counterpart of [`Self::rest_indices`].
    fn rest_numbers(&mut self) -> Vec<f64> {
        let mut numbers = Vec::new();
        while let Some(number) = self.peek().and_then(|t| t.parse().ok()) {
            numbers.push(number);
            self.pos += 1;
        }
        numbers
    }
}

// =============================================================================
// TESTS
// =============================================================================
