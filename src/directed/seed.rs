//! Seeding directed searches from the undirected projection.

use super::helper::optimize_turns;
use super::id::{DirectedId, Turn};
use super::problem::{DirectedProblem, DirectedTspProblem};
use crate::objective::{Candidate, Objective};
use crate::solver::Solver;
use crate::tour::Tour;
use crate::tsp::{TspObjective, TspProblem};
use rand::Rng;

/// Solves the min-weight undirected projection with an undirected solver,
/// lifts the tour into directed ids and optimizes the turns.
///
/// # Examples
///
/// ```
/// use u_tour::directed::{DirectedTspObjective, DirectedTspProblem, UndirectedSeed};
/// use u_tour::problem::WeightMatrix;
/// use u_tour::solver::{CheapestInsertionSolver, Solver};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let weights = WeightMatrix::from_fn(8, |i, j| ((i / 2) as f64 - (j / 2) as f64).abs() + (i % 2) as f64);
/// let problem = DirectedTspProblem::open(0, weights, [0.0; 4]).unwrap();
/// let seed = UndirectedSeed::new(CheapestInsertionSolver::new());
/// let best = seed.solve(&problem, &DirectedTspObjective, &mut StdRng::seed_from_u64(0));
/// assert_eq!(best.tour.count(), 4);
/// assert_eq!(best.fitness, 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct UndirectedSeed<S> {
    solver: S,
}

impl<S> UndirectedSeed<S> {
    /// Wraps an undirected solver.
    pub fn new(solver: S) -> Self {
        Self { solver }
    }

    /// The undirected solver.
    pub fn inner(&self) -> &S {
        &self.solver
    }
}

/// Lifts an undirected tour into directed ids with every turn
/// [`Turn::ForwardForward`].
pub fn lift(tour: &Tour) -> Tour {
    let directed = |v: usize| DirectedId::new(v, Turn::ForwardForward).raw();
    let first = directed(tour.first());
    let mut lifted = Tour::from_terminals(first, tour.last().map(directed));
    let mut after = first;
    for visit in tour.iter().skip(1) {
        if tour.is_fixed_last(visit) {
            break;
        }
        lifted.insert_after(after, directed(visit));
        after = directed(visit);
    }
    lifted
}

impl<O, S> Solver<DirectedTspProblem, O> for UndirectedSeed<S>
where
    O: Objective<DirectedTspProblem>,
    S: Solver<TspProblem, TspObjective>,
{
    fn name(&self) -> String {
        format!("undirected({})", self.solver.name())
    }

    fn solve<R: Rng>(
        &self,
        problem: &DirectedTspProblem,
        objective: &O,
        rng: &mut R,
    ) -> Candidate<O::Fitness> {
        let seed = self.solver.solve(problem.undirected(), &TspObjective, rng);
        let mut tour = lift(&seed.tour);
        while optimize_turns(problem, &mut tour) > 0.0 {}
        log::debug!(
            "{}: undirected {:.3} -> {} visits",
            Solver::<DirectedTspProblem, O>::name(self),
            seed.fitness,
            DirectedProblem::count(problem)
        );
        Candidate::evaluate(problem, objective, tour)
    }
}
