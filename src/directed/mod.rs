//! Directed TSP: travel weights that depend on the side a visit is entered
//! and left on, plus a turn-penalty table.
//!
//! Each visit `v` owns two sides, `2v` and `2v + 1`, which index the rows
//! and columns of a `2N x 2N` matrix. A directed tour stores
//! [`DirectedId`]s (`v * 4 + turn`); the [`Turn`] chooses the arrival and
//! departure side. Penalties are charged per [`Turn`] for visits with both
//! a predecessor and a successor.
//!
//! # Key Types
//!
//! - [`DirectedId`], [`Turn`]: the visit codec
//! - [`DirectedTspProblem`]: side matrix, penalties, undirected projection
//! - [`DirectedTspObjective`]: edge weights plus charged penalties
//! - [`DirectedTwoOpt`], [`DirectionLocalSearch`]: local search
//! - [`DirectedRandomShift`]: VNS perturbation
//! - [`DirectedCheapestInsertion`], [`UndirectedSeed`]: construction
//!
//! # Examples
//!
//! ```
//! use u_tour::directed::{self, DirectedTspObjective, DirectedTspProblem};
//! use u_tour::problem::WeightMatrix;
//! use u_tour::solver::Solver;
//! use u_tour::vns::VnsConfig;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let weights = WeightMatrix::from_fn(10, |i, j| ((i / 2) as f64 - (j / 2) as f64).abs());
//! let problem = DirectedTspProblem::open(0, weights, [0.0, 1.0, 1.0, 0.0]).unwrap();
//! let solver = directed::default_solver(VnsConfig::fast(), 1).unwrap();
//! let best = solver.solve(&problem, &DirectedTspObjective, &mut StdRng::seed_from_u64(2));
//! assert_eq!(best.fitness, 4.0);
//! ```

mod direction;
mod helper;
mod id;
mod insertion;
mod objective;
mod problem;
mod seed;
mod shift;
mod two_opt;

pub use direction::DirectionLocalSearch;
pub use helper::{
    best_turn, charged_penalty, edge_weight, legal_turns, min_weight, optimize_turns,
    placement_cost, tour_weight,
};
pub use id::{build_directed_id, extract_all, extract_id, DirectedId, Turn};
pub use insertion::DirectedCheapestInsertion;
pub use objective::DirectedTspObjective;
pub use problem::{DirectedProblem, DirectedTspProblem};
pub use seed::{lift, UndirectedSeed};
pub use shift::DirectedRandomShift;
pub use two_opt::DirectedTwoOpt;

use crate::error::Result;
use crate::operator::{OneShiftLocalSearch, Sequence, TwoOpt};
use crate::solver::{CheapestInsertionSolver, Iterative, WithLocalSearch};
use crate::tsp;
use crate::vns::{VnsConfig, VnsSolver};

/// Local search of the directed preset: 2-opt with turn flips, then turn
/// re-optimization.
pub type DirectedLocalSearch = Sequence<DirectedTwoOpt, DirectionLocalSearch>;

/// Undirected construction used to seed the directed preset.
pub type DefaultSeed = UndirectedSeed<WithLocalSearch<CheapestInsertionSolver, tsp::LocalSearch>>;

/// The VNS repeated by [`default_solver`].
pub type DefaultVns = VnsSolver<
    DirectedTspProblem,
    DirectedTspObjective,
    DefaultSeed,
    DirectedRandomShift,
    DirectedLocalSearch,
>;

/// Solver returned by [`default_solver`].
pub type DefaultSolver = Iterative<DirectedTspProblem, DirectedTspObjective, DefaultVns>;

/// Restarted VNS for directed TSPs.
///
/// Every run solves the undirected projection (randomized cheapest
/// insertion, 2-opt, 1-shift), lifts it, then searches the directed tour
/// with [`DirectedRandomShift`] and [`DirectedLocalSearch`].
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn default_solver(config: VnsConfig, restarts: usize) -> Result<DefaultSolver> {
    let seed = UndirectedSeed::new(WithLocalSearch::new(
        CheapestInsertionSolver::new().with_random_start(true),
        Sequence::new(TwoOpt, OneShiftLocalSearch),
    ));
    let vns = VnsSolver::new(
        config,
        seed,
        DirectedRandomShift,
        Sequence::new(DirectedTwoOpt, DirectionLocalSearch),
    )?;
    Ok(Iterative::new(vns, restarts).with_parallel(restarts > 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::Objective;
    use crate::problem::WeightMatrix;
    use crate::solver::Solver;
    use crate::tour::tests::assert_invariants;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_solver_places_every_visit_once() {
        let weights = WeightMatrix::from_fn(16, |i, j| {
            let (from, to) = (i / 2, j / 2);
            ((from * 5 + to * 3) % 7) as f64 + (i % 2) as f64 * 0.5 + (j % 2) as f64
        });
        let p = DirectedTspProblem::closed(0, weights, [0.0, 3.0, 3.0, 0.5]).unwrap();
        let solver = default_solver(VnsConfig::fast(), 2).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let best = solver.solve(&p, &DirectedTspObjective, &mut rng);

        assert_invariants(&best.tour);
        let mut ids: Vec<usize> = best.tour.iter().map(extract_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..8).collect::<Vec<_>>());
        assert!((DirectedTspObjective.calculate(&p, &best.tour) - best.fitness).abs() < 1e-9);
    }

    #[test]
    fn test_default_solver_reaches_side_optimum() {
        let weights = WeightMatrix::from_fn(12, |i, j| {
            let distance = ((i / 2) as f64 - (j / 2) as f64).abs();
            distance + 3.0 * (1 - j % 2) as f64
        });
        let p = DirectedTspProblem::closed(0, weights, [0.0, 2.0, 2.0, 0.0]).unwrap();
        let solver = default_solver(VnsConfig::fast(), 1).unwrap();
        let best = solver.solve(&p, &DirectedTspObjective, &mut StdRng::seed_from_u64(4));
        assert_eq!(best.fitness, 10.0);
    }
}
