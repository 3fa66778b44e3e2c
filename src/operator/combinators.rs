//! Operator combinators.

use super::Operator;
use crate::objective::Objective;
use crate::tour::Tour;
use rand::Rng;

/// Default bound on improvement rounds in [`converge`].
pub const DEFAULT_MAX_ROUNDS: usize = 100_000;

/// Applies `operator` until it stops improving, or `max_rounds` moves were
/// made.
///
/// Returns the accumulated delta, or `None` if not a single improving move
/// was found.
pub fn converge<P, O, Op, R>(
    operator: &Op,
    problem: &P,
    objective: &O,
    tour: &mut Tour,
    max_rounds: usize,
    rng: &mut R,
) -> Option<O::Fitness>
where
    O: Objective<P>,
    Op: Operator<P, O> + ?Sized,
    R: Rng,
{
    let mut total: Option<O::Fitness> = None;
    for _ in 0..max_rounds {
        let Some(delta) = operator.apply(problem, objective, tour, rng) else {
            break;
        };
        total = Some(match total {
            Some(t) => objective.add(problem, t, delta),
            None => delta,
        });
    }
    total
}

/// Repeats the inner operator until it stops improving.
#[derive(Debug, Clone)]
pub struct Converge<Op> {
    inner: Op,
    max_rounds: usize,
}

impl<Op> Converge<Op> {
    /// Wraps `inner` with the default round bound.
    pub fn new(inner: Op) -> Self {
        Self {
            inner,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Sets the maximum number of improving moves per call.
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds.max(1);
        self
    }

    /// The wrapped operator.
    pub fn inner(&self) -> &Op {
        &self.inner
    }
}

impl<P, O, Op> Operator<P, O> for Converge<Op>
where
    O: Objective<P>,
    Op: Operator<P, O>,
{
    fn name(&self) -> String {
        format!("Converge({})", self.inner.name())
    }

    fn supports(&self, objective: &O) -> bool {
        self.inner.supports(objective)
    }

    fn apply<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        tour: &mut Tour,
        rng: &mut R,
    ) -> Option<O::Fitness> {
        converge(&self.inner, problem, objective, tour, self.max_rounds, rng)
    }
}

/// Runs `A` then `B` in one pass.
///
/// Reports the combined delta when at least one of them improved.
#[derive(Debug, Clone)]
pub struct Sequence<A, B> {
    first: A,
    second: B,
}

impl<A, B> Sequence<A, B> {
    /// Chains two operators.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<P, O, A, B> Operator<P, O> for Sequence<A, B>
where
    O: Objective<P>,
    A: Operator<P, O>,
    B: Operator<P, O>,
{
    fn name(&self) -> String {
        format!("{}+{}", self.first.name(), self.second.name())
    }

    fn supports(&self, objective: &O) -> bool {
        self.first.supports(objective) && self.second.supports(objective)
    }

    fn apply<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        tour: &mut Tour,
        rng: &mut R,
    ) -> Option<O::Fitness> {
        let a = self.first.apply(problem, objective, tour, rng);
        let b = self.second.apply(problem, objective, tour, rng);
        match (a, b) {
            (Some(a), Some(b)) => Some(objective.add(problem, a, b)),
            (a, b) => a.or(b),
        }
    }
}

/// Applies the inner operator up to `n` times.
///
/// With `stop_at_fail` the loop ends at the first call that finds nothing;
/// otherwise every attempt is made, which suits randomized operators.
#[derive(Debug, Clone)]
pub struct Iterate<Op> {
    inner: Op,
    n: usize,
    stop_at_fail: bool,
}

impl<Op> Iterate<Op> {
    /// Repeats `inner` up to `n` times.
    pub fn new(inner: Op, n: usize, stop_at_fail: bool) -> Self {
        Self {
            inner,
            n,
            stop_at_fail,
        }
    }
}

impl<P, O, Op> Operator<P, O> for Iterate<Op>
where
    O: Objective<P>,
    Op: Operator<P, O>,
{
    fn name(&self) -> String {
        format!("{}x{}", self.inner.name(), self.n)
    }

    fn supports(&self, objective: &O) -> bool {
        self.inner.supports(objective)
    }

    fn apply<R: Rng>(
        &self,
        problem: &P,
        objective: &O,
        tour: &mut Tour,
        rng: &mut R,
    ) -> Option<O::Fitness> {
        let mut total: Option<O::Fitness> = None;
        for _ in 0..self.n {
            match self.inner.apply(problem, objective, tour, rng) {
                Some(delta) => {
                    total = Some(match total {
                        Some(t) => objective.add(problem, t, delta),
                        None => delta,
                    });
                }
                None if self.stop_at_fail => break,
                None => {}
            }
        }
        total
    }
}
