//! Fitness algebra.

use std::cmp::Ordering;
use std::fmt::Debug;

/// Tolerance below which a scalar fitness delta is treated as no change.
pub const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// A totally ordered, additive fitness value.
///
/// Fitness values form an ordered group: [`zero`](Fitness::zero) is the
/// identity of [`add`](Fitness::add)/[`subtract`](Fitness::subtract), and
/// [`compare`](Fitness::compare) returns `Less` when `self` is strictly
/// better. [`infinite`](Fitness::infinite) dominates every finite value and
/// marks infeasible candidates.
///
/// Deltas reported by operators are `before - after`, so a delta is an
/// improvement exactly when it compares *worse* than zero; see
/// [`is_improvement`](Fitness::is_improvement).
///
/// Built-in implementation exists for `f64` (lower is better).
pub trait Fitness: Copy + PartialEq + Send + Sync + Debug + 'static {
    /// The additive identity.
    fn zero() -> Self;

    /// The infeasible sentinel, worse than every finite fitness.
    fn infinite() -> Self;

    /// `self + other`.
    fn add(self, other: Self) -> Self;

    /// `self - other`.
    fn subtract(self, other: Self) -> Self;

    /// Total order, `Less` meaning `self` is better.
    fn compare(&self, other: &Self) -> Ordering;

    /// Returns `true` if `self`, read as a `before - after` delta, is a
    /// significant improvement.
    fn is_improvement(self) -> bool;

    /// Converts the fitness to `f64` for logging and history tracking.
    fn to_f64(self) -> f64;
}

impl Fitness for f64 {
    fn zero() -> Self {
        0.0
    }

    fn infinite() -> Self {
        f64::INFINITY
    }

    fn add(self, other: Self) -> Self {
        self + other
    }

    fn subtract(self, other: Self) -> Self {
        self - other
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn is_improvement(self) -> bool {
        self > IMPROVEMENT_EPSILON
    }

    fn to_f64(self) -> f64 {
        self
    }
}
