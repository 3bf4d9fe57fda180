//! # Easing Functions
//!
//! An interpolator maps normalized animation time `t ∈ [0, 1]` to eased
//! time. The result is NOT required to stay inside `[0, 1]`: overshoot and
//! anticipate curves intentionally exceed the range, and the spring curves
//! land only approximately on `1.0` (the interpreter finalizes every
//! animation with an exact last step, so endpoint drift never accumulates).
//!
//! The active interpolator is a plain field on the [`Interpreter`], selected
//! by the `il`/`ib`/`io`/... commands, never a global.
//!
//! [`Interpreter`]: crate::Interpreter

use std::f64::consts::{PI, TAU};

/// A pure easing function from normalized time to eased time.
pub type Interpolator = fn(f64) -> f64;

/// The selectable easing curves, one per `i*` command mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolatorKind {
    /// `il`: identity.
    Linear,
    /// `ib`: decaying bounces settling on the target.
    Bounce,
    /// `io`: shoots past the target, then eases back.
    Overshoot,
    /// `ia`: backs up before accelerating toward the target.
    Anticipate,
    /// `iao`: backs up, then shoots past, then settles.
    AnticipateOvershoot,
    /// `iad`: slow start, fast middle, slow finish.
    AccelerateDecelerate,
    /// `iso`: damped spring oscillating across the target.
    SpringOvershoot,
    /// `isb`: damped spring rebounding below the target.
    SpringBounce,
    /// `igb`: free fall onto the target with parabolic rebounds.
    GravityBounce,
}

impl InterpolatorKind {
    /// Parses a command mnemonic (`il`, `ib`, ...) into a curve kind.
    pub fn from_mnemonic(token: &str) -> Option<Self> {
        match token {
            "il" => Some(Self::Linear),
            "ib" => Some(Self::Bounce),
            "io" => Some(Self::Overshoot),
            "ia" => Some(Self::Anticipate),
            "iao" => Some(Self::AnticipateOvershoot),
            "iad" => Some(Self::AccelerateDecelerate),
            "iso" => Some(Self::SpringOvershoot),
            "isb" => Some(Self::SpringBounce),
            "igb" => Some(Self::GravityBounce),
            _ => None,
        }
    }

    /// Returns the easing function for this curve kind.
    pub fn function(self) -> Interpolator {
        match self {
            Self::Linear => linear,
            Self::Bounce => bounce,
            Self::Overshoot => overshoot,
            Self::Anticipate => anticipate,
            Self::AnticipateOvershoot => anticipate_overshoot,
            Self::AccelerateDecelerate => accelerate_decelerate,
            Self::SpringOvershoot => spring_overshoot,
            Self::SpringBounce => spring_bounce,
            Self::GravityBounce => gravity_bounce,
        }
    }
}

// =============================================================================
// CURVES
// =============================================================================

const OVERSHOOT_TENSION: f64 = 2.0;
const ANTICIPATE_TENSION: f64 = 2.0;
// The combined curve sharpens both halves.
const COMBINED_TENSION: f64 = ANTICIPATE_TENSION * 1.5;
const SPRING_DAMPING: f64 = 6.0;

fn linear(t: f64) -> f64 {
    t
}

fn bounce_arc(t: f64) -> f64 {
    t * t * 8.0
}

/// Four decaying parabolic arcs, each settling closer to `1.0`.
fn bounce(t: f64) -> f64 {
    let t = t * 1.1226;
    if t < 0.3535 {
        bounce_arc(t)
    } else if t < 0.7408 {
        bounce_arc(t - 0.54719) + 0.7
    } else if t < 0.9644 {
        bounce_arc(t - 0.8526) + 0.9
    } else {
        bounce_arc(t - 1.0435) + 0.95
    }
}

fn overshoot(t: f64) -> f64 {
    let t = t - 1.0;
    t * t * ((OVERSHOOT_TENSION + 1.0) * t + OVERSHOOT_TENSION) + 1.0
}

fn anticipate(t: f64) -> f64 {
    t * t * ((ANTICIPATE_TENSION + 1.0) * t - ANTICIPATE_TENSION)
}

fn anticipate_overshoot(t: f64) -> f64 {
    fn back_up(t: f64, tension: f64) -> f64 {
        t * t * ((tension + 1.0) * t - tension)
    }
    fn shoot_past(t: f64, tension: f64) -> f64 {
        t * t * ((tension + 1.0) * t + tension)
    }
    if t < 0.5 {
        0.5 * back_up(t * 2.0, COMBINED_TENSION)
    } else {
        0.5 * (shoot_past(t * 2.0 - 2.0, COMBINED_TENSION) + 2.0)
    }
}

fn accelerate_decelerate(t: f64) -> f64 {
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

/// Damped oscillation across the target, one overshoot per half period.
fn spring_overshoot(t: f64) -> f64 {
    1.0 - (-SPRING_DAMPING * t).exp() * (TAU * t).cos()
}

/// Same envelope as [`spring_overshoot`] with excursions reflected below
/// the target, so the value never exceeds its destination.
fn spring_bounce(t: f64) -> f64 {
    1.0 - ((-SPRING_DAMPING * t).exp() * (TAU * t).cos()).abs()
}

/// Free fall reaching the target at half time, then two parabolic rebounds
/// with quartered amplitude.
fn gravity_bounce(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t
    } else if t < 0.75 {
        let s = (t - 0.5) / 0.25;
        1.0 - 0.25 * 4.0 * s * (1.0 - s)
    } else {
        let s = (t - 0.75) / 0.25;
        1.0 - 0.0625 * 4.0 * s * (1.0 - s)
    }
}

// =============================================================================
// TESTS
// =============================================================================
