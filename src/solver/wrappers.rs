//! Solvers built from other solvers.

use super::Solver;
use crate::objective::{Candidate, Objective};
use crate::operator::{converge, Operator, DEFAULT_MAX_ROUNDS};
use rand::Rng;

/// Runs a solver, then a local search to convergence.
#[derive(Debug, Clone)]
pub struct WithLocalSearch<S, L> {
    solver: S,
    local_search: L,
}

impl<S, L> WithLocalSearch<S, L> {
    /// Chains `solver` with `local_search`.
    pub fn new(solver: S, local_search: L) -> Self {
        Self {
            solver,
            local_search,
        }
    }
}

impl<P, O, S, L> Solver<P, O> for WithLocalSearch<S, L>
where
    O: Objective<P>,
    S: Solver<P, O>,
    L: Operator<P, O>,
{
    fn name(&self) -> String {
        format!("{}+{}", self.solver.name(), self.local_search.name())
    }

    fn solve<R: Rng>(&self, problem: &P, objective: &O, rng: &mut R) -> Candidate<O::Fitness> {
        let mut candidate = self.solver.solve(problem, objective, rng);
        if converge(
            &self.local_search,
            problem,
            objective,
            &mut candidate.tour,
            DEFAULT_MAX_ROUNDS,
            rng,
        )
        .is_some()
        {
            candidate.fitness = objective.calculate(problem, &candidate.tour);
        }
        candidate
    }
}

/// Exposes a solver driven by one objective as a solver for another.
///
/// The inner solver runs with `inner`; its tour is re-scored with the outer
/// objective. Both objectives must share the tour representation, e.g. a
/// time-window feasibility search seeding a duration search.
#[derive(Debug, Clone)]
pub struct Converted<S, I> {
    solver: S,
    inner: I,
}

impl<S, I> Converted<S, I> {
    /// Runs `solver` under `inner`.
    pub fn new(solver: S, inner: I) -> Self {
        Self { solver, inner }
    }

    /// The objective the inner solver is driven by.
    pub fn inner_objective(&self) -> &I {
        &self.inner
    }
}

impl<P, O, S, I> Solver<P, O> for Converted<S, I>
where
    O: Objective<P>,
    I: Objective<P>,
    S: Solver<P, I>,
{
    fn name(&self) -> String {
        format!("{}[{}]", self.solver.name(), self.inner.name())
    }

    fn solve<R: Rng>(&self, problem: &P, objective: &O, rng: &mut R) -> Candidate<O::Fitness> {
        let seed = self.solver.solve(problem, &self.inner, rng);
        log::debug!(
            "{}: seed with {} = {:?}",
            objective.name(),
            self.inner.name(),
            seed.fitness
        );
        Candidate::evaluate(problem, objective, seed.tour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::TwoOpt;
    use crate::problem::tests::{line, MatrixProblem};
    use crate::problem::TourProblem;
    use crate::solver::RandomSolver;
    use crate::tour::Tour;
    use crate::tsp::TspObjective;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Counts visits out of id order.
    struct Disorder;

    impl<P: TourProblem> Objective<P> for Disorder {
        type Fitness = f64;

        fn name(&self) -> &str {
            "disorder"
        }

        fn calculate(&self, _problem: &P, tour: &Tour) -> f64 {
            tour.pairs().filter(|&(a, b)| b < a).count() as f64
        }
    }

    #[test]
    fn test_with_local_search_rescores() {
        let p = line(8, None);
        let mut rng = StdRng::seed_from_u64(4);
        let solver = WithLocalSearch::new(RandomSolver, TwoOpt);
        let c = solver.solve(&p, &TspObjective, &mut rng);
        assert_eq!(c.fitness, TspObjective.calculate(&p, &c.tour));
        assert_eq!(c.tour.count(), 8);
        assert_eq!(
            <WithLocalSearch<RandomSolver, TwoOpt> as Solver<MatrixProblem, TspObjective>>::name(&solver),
            "random+2-opt"
        );
    }

    #[test]
    fn test_converted_scores_with_outer_objective() {
        let p = line(6, Some(0));
        let mut rng = StdRng::seed_from_u64(4);
        let solver = Converted::new(RandomSolver, TspObjective);
        let c = solver.solve(&p, &Disorder, &mut rng);
        assert_eq!(c.fitness, Disorder.calculate(&p, &c.tour));
    }
}
