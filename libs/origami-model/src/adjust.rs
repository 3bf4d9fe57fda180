//! # Length-Matching Solver
//!
//! Paper does not stretch: after a fold rotation, every segment's folded
//! length must still equal its crease-pattern length (times the model
//! scale). The solver relaxes one point's folded position toward the mean
//! of the positions its incident segments individually demand - a
//! Kaczmarz-style fixed-point iteration. Convergence is not guaranteed for
//! arbitrary meshes, but folds built from small incremental rotations start
//! with length ratios near 1.0 and settle quickly.

use config::constants::{
    ADJUST_LIST_MAX_ITERATIONS, ADJUST_LIST_TOLERANCE, ADJUST_MAX_ITERATIONS, ADJUST_TOLERANCE,
};
use glam::DVec3;

use crate::model::Model;

impl Model {
    /// Relaxes one point's folded position until its incident segments'
    /// lengths match their crease lengths (worst error at most
    /// [`ADJUST_TOLERANCE`]) or the iteration cap is reached.
    ///
    /// Only `point` moves; every other point is left untouched. Returns the
    /// worst remaining absolute length discrepancy, in crease units.
    pub fn adjust(&mut self, point: usize) -> f64 {
        let segments = self.segments_at(point);
        self.adjust_against(point, &segments)
    }

    /// [`Model::adjust`] restricted to the given incident segments.
    pub fn adjust_against(&mut self, point: usize, segments: &[usize]) -> f64 {
        if segments.is_empty() {
            return 0.0;
        }

        let mut worst = self.worst_length_error(segments);
        for _ in 0..ADJUST_MAX_ITERATIONS {
            if worst <= ADJUST_TOLERANCE {
                break;
            }

            let p = self.points[point].pos_3d();
            let mut sum = DVec3::ZERO;
            let mut count = 0usize;
            for &seg in segments {
                let other = self.segments[seg].other(point);
                let o = self.points[other].pos_3d();
                let current = p.distance(o);
                if current == 0.0 {
                    // No direction to push along; leave this constraint to
                    // the neighbors
                    continue;
                }
                // Where the point should sit for this one segment to have
                // the right folded length
                let wanted = self.length_2d(seg) * self.scale;
                sum += o + (p - o) * (wanted / current);
                count += 1;
            }
            if count == 0 {
                break;
            }

            self.points[point].set_3d(sum / count as f64);
            worst = self.worst_length_error(segments);
        }
        worst
    }

    /// Worst absolute discrepancy between crease length and scale-normalized
    /// folded length over the given segments.
    fn worst_length_error(&self, segments: &[usize]) -> f64 {
        segments
            .iter()
            .map(|&seg| (self.length_3d(seg) / self.scale - self.length_2d(seg)).abs())
            .fold(0.0, f64::max)
    }

    /// Relaxes a set of interdependent points: adjusting one point perturbs
    /// neighbors that share a segment, so the per-point solver is swept
    /// repeatedly until the worst residual stabilizes (change below
    /// [`ADJUST_LIST_TOLERANCE`]) or the outer cap is reached.
    ///
    /// An empty list means every point in the model. Returns the worst
    /// residual of the final sweep.
    pub fn adjust_list(&mut self, points: &[usize]) -> f64 {
        let all: Vec<usize>;
        let points = if points.is_empty() {
            all = (0..self.points.len()).collect();
            &all
        } else {
            points
        };

        let mut previous = f64::MAX;
        let mut worst: f64 = 0.0;
        for _ in 0..ADJUST_LIST_MAX_ITERATIONS {
            worst = 0.0;
            for &id in points {
                worst = worst.max(self.adjust(id));
            }
            if (previous - worst).abs() < ADJUST_LIST_TOLERANCE {
                break;
            }
            previous = worst;
        }
        worst
    }
}

// =============================================================================
// TESTS
// =============================================================================
