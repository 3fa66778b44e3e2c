//! Selective TSP: visit as much as the weight budget allows.
//!
//! [`StspFitness`] ranks tours by visit count first and weight second.
//! The preset VNS alternates [`RandomRemoval`] (drop visits) with a local
//! search that shortens the tour and then spends the freed budget on
//! [`CheapestInsertionOperator`].
//!
//! # Examples
//!
//! ```
//! use u_tour::problem::WeightMatrix;
//! use u_tour::solver::Solver;
//! use u_tour::stsp::{self, StspObjective, StspProblem};
//! use u_tour::vns::VnsConfig;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let weights = WeightMatrix::from_fn(10, |i, j| (i as f64 - j as f64).abs());
//! let problem = StspProblem::closed(0, weights, 8.0).unwrap();
//! let solver = stsp::default_solver(VnsConfig::fast(), 1).unwrap();
//! let best = solver.solve(&problem, &StspObjective, &mut StdRng::seed_from_u64(0));
//! assert_eq!(best.fitness.visits, 5);
//! assert_eq!(best.fitness.weight, 8.0);
//! ```

mod objective;
mod problem;
mod removal;

pub use objective::{StspFitness, StspObjective};
pub use problem::StspProblem;
pub use removal::RandomRemoval;

use crate::error::Result;
use crate::operator::{CheapestInsertionOperator, OneShiftLocalSearch, Sequence, TwoOpt};
use crate::solver::{CheapestInsertionSolver, Iterative};
use crate::tsp;
use crate::vns::{VnsConfig, VnsSolver};

/// Shorten, then insert.
pub type LocalSearch = Sequence<tsp::LocalSearch, CheapestInsertionOperator>;

/// The VNS repeated by [`default_solver`].
pub type DefaultVns =
    VnsSolver<StspProblem, StspObjective, CheapestInsertionSolver, RandomRemoval, LocalSearch>;

/// Solver returned by [`default_solver`].
pub type DefaultSolver = Iterative<StspProblem, StspObjective, DefaultVns>;

/// Restarted VNS for selective TSPs.
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn default_solver(config: VnsConfig, restarts: usize) -> Result<DefaultSolver> {
    let local_search = Sequence::new(
        Sequence::new(TwoOpt, OneShiftLocalSearch),
        CheapestInsertionOperator,
    );
    let vns = VnsSolver::new(
        config,
        CheapestInsertionSolver::new().with_random_start(true),
        RandomRemoval,
        local_search,
    )?;
    Ok(Iterative::new(vns, restarts).with_parallel(restarts > 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::Objective;
    use crate::problem::{tour_weight, WeightMatrix};
    use crate::solver::Solver;
    use crate::stsp::problem::tests::budget_line;
    use crate::tour::tests::assert_invariants;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_solver_fills_budget() {
        let p = budget_line(10, 10.0);
        let solver = default_solver(VnsConfig::default(), 2).unwrap();
        let best = solver.solve(&p, &StspObjective, &mut StdRng::seed_from_u64(5));
        assert_invariants(&best.tour);
        assert_eq!(best.fitness, StspFitness::new(10.0, 6));
        assert!(tour_weight(&p, &best.tour) <= p.max_weight());
    }

    #[test]
    fn test_reaches_far_visit_within_budget() {
        // {3, 4, 5} sits next to the depot, {1, 2} is far; only 1 fits.
        let coords: [f64; 6] = [0.0, 10.0, 10.5, 1.0, 1.5, 2.0];
        let weights = WeightMatrix::from_fn(6, |i, j| (coords[i] - coords[j]).abs());
        let p = StspProblem::closed(0, weights, 20.0).unwrap();
        let solver = default_solver(VnsConfig::default().with_seed(2), 1).unwrap();
        let best = solver.solve(&p, &StspObjective, &mut StdRng::seed_from_u64(2));
        assert_eq!(best.fitness, StspFitness::new(20.0, 5));
        assert!(best.tour.contains(1));
        assert!(!best.tour.contains(2));
        assert_eq!(StspObjective.calculate(&p, &best.tour), best.fitness);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = VnsConfig {
            level_max: 0,
            ..VnsConfig::default()
        };
        assert!(default_solver(config, 1).is_err());
    }
}
