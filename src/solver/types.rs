//! Solver trait.

use crate::objective::{Candidate, Objective};
use rand::Rng;

/// Builds a complete candidate for a problem.
///
/// Constructors (random, cheapest insertion), local-search wrappers and the
/// strategies themselves ([`VnsSolver`](crate::vns::VnsSolver),
/// [`GaSolver`](crate::ga::GaSolver)) all implement this trait, so any of
/// them can seed another.
pub trait Solver<P, O: Objective<P>>: Send + Sync {
    /// Short solver label.
    fn name(&self) -> String;

    /// Produces a candidate scored with `objective`.
    fn solve<R: Rng>(&self, problem: &P, objective: &O, rng: &mut R) -> Candidate<O::Fitness>;
}
