//! # Interpreter
//!
//! The command interpreter is a four-state machine driven by an external
//! per-frame tick: the render loop calls [`Interpreter::step`] once per
//! frame with the current wall-clock time, and each call executes at most
//! one command (or one animation tick). The mesh is mutated exclusively
//! from inside `step`, so a single logical thread of control owns all
//! model state.
//!
//! ## Animation model
//!
//! A `time <ms>` token opens an animated batch: the sub-commands between
//! it and the next `eoc` marker are re-executed every tick with the
//! *delta* of eased time `tni - tpi` as the incremental step fraction.
//! Commands expressed as relative deltas (`rotate`, `move`, `turn`)
//! animate smoothly under this replay; splits are idempotent and simply
//! land on their first tick. When elapsed time reaches the duration the
//! batch finalizes: the pre-animation snapshot is restored and the batch
//! replays once with `tni = 1, tpi = 0`, so the final state is exact
//! regardless of easing-curve endpoint error or tick-rate jitter.
//!
//! ## Undo model
//!
//! Before every command (and before every animated batch) a full
//! serialized snapshot is pushed, keeping the snapshot stack and the
//! instruction log in lockstep. `undo` switches to the `Undo`
//! state; the next step pops one snapshot, restores the model from it and
//! removes the command from the instruction log, so replaying the log
//! never replays the undo itself.

use log::warn;
use origami_model::{Model, ModelError};

use crate::error::CommandError;
use crate::instruction::Instruction;
use crate::interpolator::InterpolatorKind;
use crate::tokenizer::{tokenize, EOC};

/// Interpreter execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Idle, ready for the next command.
    Run,
    /// A timed animation batch is in progress.
    Anim,
    /// A revert is pending; the next step performs it.
    Undo,
    /// Explicitly suspended; steps are no-ops until resumed.
    Pause,
}

/// A full-model undo snapshot. The wire format carries only the mesh
/// geometry, so the zoom factor, face offsets and hover/select flags ride
/// alongside the serialized string.
#[derive(Debug, Clone)]
struct Snapshot {
    mesh: String,
    scale: f64,
    point_ui: Vec<(bool, u8)>,
    segment_ui: Vec<(bool, u8)>,
    face_ui: Vec<(f64, bool, u8)>,
}

impl Snapshot {
    fn capture(model: &Model) -> Result<Self, ModelError> {
        Ok(Self {
            mesh: model.serialize()?,
            scale: model.scale,
            point_ui: model.points.iter().map(|p| (p.hover, p.select)).collect(),
            segment_ui: model.segments.iter().map(|s| (s.hover, s.select)).collect(),
            face_ui: model
                .faces
                .iter()
                .map(|f| (f.offset, f.hover, f.select))
                .collect(),
        })
    }

    /// Rebuilds the model from the mesh string, then reapplies the state
    /// the wire format does not carry. Entity counts match by construction
    /// since both halves were captured from the same model.
    fn apply(&self, model: &mut Model) -> Result<(), ModelError> {
        model.restore(&self.mesh, self.scale)?;
        for (point, &(hover, select)) in model.points.iter_mut().zip(&self.point_ui) {
            point.hover = hover;
            point.select = select;
        }
        for (segment, &(hover, select)) in model.segments.iter_mut().zip(&self.segment_ui) {
            segment.hover = hover;
            segment.select = select;
        }
        for (face, &(offset, hover, select)) in model.faces.iter_mut().zip(&self.face_ui) {
            face.offset = offset;
            face.hover = hover;
            face.select = select;
        }
        Ok(())
    }
}

/// The command interpreter. See the [module docs](self) for the execution
/// model.
#[derive(Debug)]
pub struct Interpreter {
    tokens: Vec<String>,
    cursor: usize,
    state: State,
    /// Active easing curve; a plain field, never a global.
    interpolator: InterpolatorKind,
    undo_stack: Vec<Snapshot>,
    /// Source text of every completed command, oldest first.
    done: Vec<String>,
    // Animated-batch bookkeeping, valid while `state == State::Anim`.
    anim_text_start: usize,
    anim_start: usize,
    anim_end: usize,
    anim_begin_ms: f64,
    anim_duration_ms: f64,
    tpi: f64,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an idle interpreter with a linear easing curve.
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            cursor: 0,
            state: State::Run,
            interpolator: InterpolatorKind::Linear,
            undo_stack: Vec::new(),
            done: Vec::new(),
            anim_text_start: 0,
            anim_start: 0,
            anim_end: 0,
            anim_begin_ms: 0.0,
            anim_duration_ms: 0.0,
            tpi: 0.0,
        }
    }

    /// Appends a command string to the token queue. Nothing executes until
    /// [`Self::step`] is called.
    pub fn command(&mut self, text: &str) {
        if !self.tokens.is_empty() && self.tokens.last().map(String::as_str) != Some(EOC) {
            self.tokens.push(EOC.to_owned());
        }
        self.tokens.extend(tokenize(text));
    }

    /// Current execution state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The active easing curve.
    pub fn interpolator(&self) -> InterpolatorKind {
        self.interpolator
    }

    /// Source text of every completed command, oldest first.
    pub fn history(&self) -> &[String] {
        &self.done
    }

    /// Number of snapshots available to `undo`.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Resumes a paused interpreter. No effect in any other state.
    pub fn resume(&mut self) {
        if self.state == State::Pause {
            self.state = State::Run;
        }
    }

    /// Advances the interpreter by one command or one animation tick.
    /// `now_ms` is the driver's wall-clock timestamp; animation progress is
    /// recomputed from it each call, so irregular frame intervals need no
    /// compensation. Returns `true` when the model may have changed and a
    /// redraw is needed.
    pub fn step(&mut self, model: &mut Model, now_ms: f64) -> bool {
        match self.state {
            State::Run => self.run_step(model, now_ms),
            State::Anim => self.anim_step(model, now_ms),
            State::Undo => self.undo_step(model),
            State::Pause => self.pause_step(),
        }
    }

    // =========================================================================
    // RUN
    // =========================================================================

    fn run_step(&mut self, model: &mut Model, now_ms: f64) -> bool {
        while self.tokens.get(self.cursor).map(String::as_str) == Some(EOC) {
            self.cursor += 1;
        }
        if self.cursor >= self.tokens.len() {
            return false;
        }

        let (instruction, next) = match Instruction::parse(&self.tokens, self.cursor) {
            Ok(parsed) => parsed,
            Err(err) => return self.abort_batch(&err),
        };
        if let Err(err) = validate(&instruction, model) {
            return self.abort_batch(&err);
        }

        match instruction {
            Instruction::Time { duration_ms } => {
                if !self.push_snapshot(model) {
                    return false;
                }
                self.anim_text_start = self.cursor;
                self.anim_start = next;
                self.anim_end = self.tokens[next..]
                    .iter()
                    .position(|t| t == EOC)
                    .map_or(self.tokens.len(), |i| next + i);
                self.anim_begin_ms = now_ms;
                self.anim_duration_ms = duration_ms;
                self.tpi = 0.0;
                self.state = State::Anim;
                true
            }
            Instruction::Undo => {
                self.cursor = next;
                self.state = State::Undo;
                true
            }
            Instruction::Pause => {
                self.cursor = next;
                self.state = State::Pause;
                true
            }
            Instruction::Continue => {
                self.cursor = next;
                true
            }
            _ => {
                if !self.push_snapshot(model) {
                    return false;
                }
                self.execute(model, &instruction, 1.0, 0.0);
                self.done.push(self.tokens[self.cursor..next].join(" "));
                self.cursor = next;
                true
            }
        }
    }

    // =========================================================================
    // ANIM
    // =========================================================================

    fn anim_step(&mut self, model: &mut Model, now_ms: f64) -> bool {
        let tn = if self.anim_duration_ms <= 0.0 {
            1.0
        } else {
            (now_ms - self.anim_begin_ms) / self.anim_duration_ms
        };
        if tn >= 1.0 {
            return self.finalize_anim(model);
        }

        let tni = self.interpolator.function()(tn.max(0.0));
        let tpi = self.tpi;
        if !self.replay_batch(model, tni, tpi) {
            return false;
        }
        self.tpi = tni;
        true
    }

    /// Restores the pre-animation snapshot and replays the batch once with
    /// an exact full step, so the final state carries no accumulated drift.
    fn finalize_anim(&mut self, model: &mut Model) -> bool {
        if let Some(snapshot) = self.undo_stack.last() {
            if let Err(err) = snapshot.apply(model) {
                return self.abort_anim(model, &err);
            }
        }
        if !self.replay_batch(model, 1.0, 0.0) {
            return false;
        }
        self.done
            .push(self.tokens[self.anim_text_start..self.anim_end].join(" "));
        self.cursor = self.anim_end;
        self.tpi = 0.0;
        self.state = State::Run;
        true
    }

    /// Re-executes every sub-command of the animated batch with the given
    /// eased-time pair.
    fn replay_batch(&mut self, model: &mut Model, tni: f64, tpi: f64) -> bool {
        let mut cursor = self.anim_start;
        while cursor < self.anim_end {
            let (instruction, next) = match Instruction::parse(&self.tokens, cursor) {
                Ok(parsed) => parsed,
                Err(err) => return self.abort_anim(model, &err),
            };
            if let Err(err) = validate(&instruction, model) {
                return self.abort_anim(model, &err);
            }
            self.execute(model, &instruction, tni, tpi);
            cursor = next;
        }
        true
    }

    // =========================================================================
    // UNDO / PAUSE
    // =========================================================================

    fn undo_step(&mut self, model: &mut Model) -> bool {
        self.state = State::Run;
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        if let Err(err) = snapshot.apply(model) {
            return self.abort_batch(&err);
        }
        // The undone command leaves the log too, so replaying history never
        // replays the undo itself.
        self.done.pop();
        true
    }

    /// While paused, only an immediately following `continue` token is
    /// honored; everything else waits for [`Self::resume`].
    fn pause_step(&mut self) -> bool {
        let mut cursor = self.cursor;
        while self.tokens.get(cursor).map(String::as_str) == Some(EOC) {
            cursor += 1;
        }
        if matches!(
            self.tokens.get(cursor).map(String::as_str),
            Some("continue") | Some("co")
        ) {
            self.cursor = cursor + 1;
            self.state = State::Run;
            return true;
        }
        false
    }

    // =========================================================================
    // EXECUTION
    // =========================================================================

    /// Dispatches one instruction against the model. `tni`/`tpi` are the
    /// eased times of this tick and the previous one; non-animated
    /// execution passes `(1, 0)`, making the delta a single full step.
    fn execute(&mut self, model: &mut Model, instruction: &Instruction, tni: f64, tpi: f64) {
        let delta = tni - tpi;
        match instruction {
            Instruction::Define { corners } => {
                let [x_min, y_min, x_max, y_max] = *corners;
                model.define_rectangle(x_min, y_min, x_max, y_max);
            }
            Instruction::By3d { p1, p2 } => model.split_by_3d(*p1, *p2),
            Instruction::By2d { p1, p2 } => model.split_by_2d(*p1, *p2),
            Instruction::Cross3d { p1, p2 } => model.split_cross_3d(*p1, *p2),
            Instruction::Cross2d { p1, p2 } => model.split_cross_2d(*p1, *p2),
            Instruction::Perpendicular3d { seg, point } => {
                model.split_perpendicular_3d(*seg, *point);
            }
            Instruction::Perpendicular2d { seg, point } => {
                model.split_perpendicular_2d(*seg, *point);
            }
            Instruction::Bisector3d { s1, s2 } => model.bisector_3d(*s1, *s2),
            Instruction::Bisector2d { s1, s2 } => model.bisector_2d(*s1, *s2),
            Instruction::Bisector3dPoints { a, b, c } => model.bisector_3d_points(*a, *b, *c),
            Instruction::Bisector2dPoints { a, b, c } => model.bisector_2d_points(*a, *b, *c),
            Instruction::Rotate { seg, angle, points } => {
                model.rotate(*seg, angle * delta, points);
            }
            Instruction::Move { delta: d, points } => model.move_points(*d * delta, points),
            Instruction::MoveOn { target, points } => {
                model.move_on(*target, arrival_fraction(tni, tpi), points);
            }
            Instruction::Adjust { points } => {
                model.adjust_list(points);
            }
            Instruction::Offset { dz, faces } => model.offset(*dz, faces),
            Instruction::Turn { axis, angle } => model.turn(*axis, angle * delta),
            Instruction::Zoom { factor, center } => {
                model.zoom(zoom_tick_factor(*factor, tni, tpi), *center);
            }
            Instruction::Fit => model.fit_step(arrival_fraction(tni, tpi)),
            Instruction::SelectInterpolator(kind) => self.interpolator = *kind,
            Instruction::SelectPoints { points } => model.select_points(points),
            Instruction::SelectSegments { segments } => model.select_segments(segments),
            Instruction::Check => {
                model.check_lengths();
            }
            Instruction::Flat { points } => model.flat(points),
            // Handled by the state machine, never dispatched here.
            Instruction::Time { .. }
            | Instruction::Undo
            | Instruction::Pause
            | Instruction::Continue => {}
        }
    }

    /// Serializes the model onto the undo stack. Returns `false` (with the
    /// queue dropped) if serialization fails.
    fn push_snapshot(&mut self, model: &Model) -> bool {
        match Snapshot::capture(model) {
            Ok(snapshot) => {
                self.undo_stack.push(snapshot);
                true
            }
            Err(err) => self.abort_batch(&err),
        }
    }

    /// Aborts an in-flight animated batch: rolls the model back to the
    /// pre-batch snapshot and discards it. The batch never reached the
    /// instruction log, so removing its snapshot keeps the undo stack and
    /// the log in lockstep.
    fn abort_anim(&mut self, model: &mut Model, err: &dyn std::fmt::Display) -> bool {
        if let Some(snapshot) = self.undo_stack.pop() {
            if let Err(restore_err) = snapshot.apply(model) {
                warn!("rollback of aborted batch failed: {restore_err}");
            }
        }
        self.abort_batch(err)
    }

    /// Logs a diagnostic and drops the remainder of the queue. Recovery is
    /// deliberately permissive: the session continues, later submissions
    /// run normally. Always returns `false`.
    fn abort_batch(&mut self, err: &dyn std::fmt::Display) -> bool {
        warn!("{err}; dropping {} queued tokens", self.tokens.len() - self.cursor);
        self.cursor = self.tokens.len();
        self.state = State::Run;
        false
    }
}

/// Fraction of the *remaining* way to travel this tick so that repeated
/// partial arrivals compose into exactly one full arrival at `tni = 1`.
fn arrival_fraction(tni: f64, tpi: f64) -> f64 {
    let remaining = 1.0 - tpi;
    if remaining.abs() < 1e-12 {
        1.0
    } else {
        (tni - tpi) / remaining
    }
}

/// Per-tick zoom factor whose product over an animation telescopes to the
/// target factor exactly: `(1+(s-1)·tni) / (1+(s-1)·tpi)`.
fn zoom_tick_factor(factor: f64, tni: f64, tpi: f64) -> f64 {
    let denominator = 1.0 + (factor - 1.0) * tpi;
    if denominator.abs() < 1e-12 {
        1.0
    } else {
        (1.0 + (factor - 1.0) * tni) / denominator
    }
}

/// Checks every index argument against the live model before execution.
/// Out-of-range references are a defined, recoverable error here rather
/// than a fault inside the model's geometry.
fn validate(instruction: &Instruction, model: &Model) -> Result<(), CommandError> {
    let points = |list: &[usize]| check_all("point", list, model.points.len());
    let point = |i: usize| check("point", i, model.points.len());
    let segment = |i: usize| check("segment", i, model.segments.len());

    match instruction {
        Instruction::By3d { p1, p2 }
        | Instruction::By2d { p1, p2 }
        | Instruction::Cross3d { p1, p2 }
        | Instruction::Cross2d { p1, p2 } => {
            point(*p1)?;
            point(*p2)
        }
        Instruction::Perpendicular3d { seg, point: p }
        | Instruction::Perpendicular2d { seg, point: p } => {
            segment(*seg)?;
            point(*p)
        }
        Instruction::Bisector3d { s1, s2 } | Instruction::Bisector2d { s1, s2 } => {
            segment(*s1)?;
            segment(*s2)
        }
        Instruction::Bisector3dPoints { a, b, c } | Instruction::Bisector2dPoints { a, b, c } => {
            point(*a)?;
            point(*b)?;
            point(*c)
        }
        Instruction::Rotate { seg, points: list, .. } => {
            segment(*seg)?;
            points(list)
        }
        Instruction::Move { points: list, .. }
        | Instruction::Adjust { points: list }
        | Instruction::Flat { points: list }
        | Instruction::SelectPoints { points: list } => points(list),
        Instruction::MoveOn { target, points: list } => {
            point(*target)?;
            points(list)
        }
        Instruction::Offset { faces, .. } => check_all("face", faces, model.faces.len()),
        Instruction::SelectSegments { segments: list } => {
            check_all("segment", list, model.segments.len())
        }
        Instruction::Define { .. }
        | Instruction::Turn { .. }
        | Instruction::Zoom { .. }
        | Instruction::Fit
        | Instruction::SelectInterpolator(_)
        | Instruction::Time { .. }
        | Instruction::Undo
        | Instruction::Check
        | Instruction::Pause
        | Instruction::Continue => Ok(()),
    }
}

fn check(kind: &'static str, index: usize, len: usize) -> Result<(), CommandError> {
    if index < len {
        Ok(())
    } else {
        Err(CommandError::invalid_reference(kind, index, len))
    }
}

fn check_all(kind: &'static str, list: &[usize], len: usize) -> Result<(), CommandError> {
    for &index in list {
        check(kind, index, len)?;
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
