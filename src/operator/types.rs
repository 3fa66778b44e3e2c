//! Operator traits.

use crate::objective::{Candidate, Objective};
use crate::tour::Tour;
use rand::Rng;

/// An improvement step on a tour.
///
/// One call performs at most one improving move. `apply` returns the
/// `before - after` fitness delta of the move it made, or `None` when no
/// improving move exists; in that case the tour is left untouched.
///
/// Use [`Converge`](super::Converge) to repeat an operator until it stops
/// improving.
pub trait Operator<P, O: Objective<P>>: Send + Sync {
    /// Short operator label used in logs and composite names.
    fn name(&self) -> String;

    /// Returns `false` if the operator cannot work with `objective`.
    fn supports(&self, _objective: &O) -> bool {
        true
    }

    /// Performs one improving move.
    fn apply<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        tour: &mut Tour,
        rng: &mut R,
    ) -> Option<O::Fitness>;
}

/// A randomized disruption of a tour, used as the shaking step of VNS.
///
/// `level` scales the amount of disruption. The returned value is the
/// `before - after` delta of the perturbation (usually negative), or `None`
/// if no perturbation could be made.
pub trait Perturber<P, O: Objective<P>>: Send + Sync {
    /// Short perturber label.
    fn name(&self) -> String;

    /// Returns `false` if the perturber cannot work with `objective`.
    fn supports(&self, _objective: &O) -> bool {
        true
    }

    /// Disrupts `tour` at intensity `level` (at least 1).
    fn perturb<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        tour: &mut Tour,
        level: usize,
        rng: &mut R,
    ) -> Option<O::Fitness>;
}

/// Recombination of two parent tours into one child.
pub trait Crossover<P, O: Objective<P>>: Send + Sync {
    /// Short crossover label.
    fn name(&self) -> String;

    /// Builds a scored child from two parents sharing the same terminals.
    fn crossover<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        first: &Tour,
        second: &Tour,
        rng: &mut R,
    ) -> Candidate<O::Fitness>;
}
