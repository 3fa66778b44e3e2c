//! Plain travelling-salesman problem.
//!
//! [`TspProblem`] pairs a square [`WeightMatrix`](crate::problem::WeightMatrix)
//! with the tour terminals; [`TspObjective`] minimizes the total weight and
//! scores any [`TourProblem`], so it also serves as the "plain distance" view
//! of the time-windowed and selective variants.
//!
//! # Presets
//!
//! - [`default_solver`]: restarted VNS (cheapest insertion, random shifts,
//!   2-opt followed by 1-shift)
//! - [`default_ga`]: GA with order crossover and a converging local search
//!   as mutation
//!
//! # Examples
//!
//! ```
//! use u_tour::problem::WeightMatrix;
//! use u_tour::solver::Solver;
//! use u_tour::tsp::{self, TspObjective, TspProblem};
//! use u_tour::vns::VnsConfig;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let weights = WeightMatrix::from_fn(8, |i, j| (i as f64 - j as f64).abs());
//! let problem = TspProblem::closed(0, weights).unwrap();
//! let solver = tsp::default_solver(VnsConfig::fast().with_seed(1), 2).unwrap();
//! let best = solver.solve(&problem, &TspObjective, &mut StdRng::seed_from_u64(1));
//! assert_eq!(best.fitness, 14.0);
//! ```

mod objective;
mod problem;

pub use objective::TspObjective;
pub use problem::TspProblem;

use crate::error::Result;
use crate::ga::{GaConfig, GaSolver};
use crate::operator::{Converge, OneShiftLocalSearch, OrderCrossover, RandomShift, Sequence, TwoOpt};
use crate::problem::TourProblem;
use crate::solver::{CheapestInsertionSolver, Iterative};
use crate::vns::{VnsConfig, VnsSolver};

/// Local search shared by the presets: 2-opt, then 1-shift.
pub type LocalSearch = Sequence<TwoOpt, OneShiftLocalSearch>;

/// The VNS repeated by [`default_solver`].
pub type DefaultVns<P> =
    VnsSolver<P, TspObjective, CheapestInsertionSolver, RandomShift, LocalSearch>;

/// Solver returned by [`default_solver`].
pub type DefaultSolver<P> = Iterative<P, TspObjective, DefaultVns<P>>;

/// Solver returned by [`default_ga`].
pub type DefaultGa<P> =
    GaSolver<P, TspObjective, CheapestInsertionSolver, OrderCrossover, Converge<LocalSearch>>;

fn local_search() -> LocalSearch {
    Sequence::new(TwoOpt, OneShiftLocalSearch)
}

/// Restarted VNS for plain TSPs.
///
/// Each of the `restarts` runs starts from a randomized cheapest insertion.
/// More than one restart runs in parallel.
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn default_solver<P: TourProblem>(
    config: VnsConfig,
    restarts: usize,
) -> Result<DefaultSolver<P>> {
    let vns = VnsSolver::new(
        config,
        CheapestInsertionSolver::new().with_random_start(true),
        RandomShift,
        local_search(),
    )?;
    Ok(Iterative::new(vns, restarts).with_parallel(restarts > 1))
}

/// GA for plain TSPs.
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn default_ga<P: TourProblem>(config: GaConfig) -> Result<DefaultGa<P>> {
    GaSolver::new(
        config,
        CheapestInsertionSolver::new().with_random_start(true),
        OrderCrossover,
        Converge::new(local_search()),
    )
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

    /// A ring with unit neighbour edges and expensive chords.
    fn ring(n: usize) -> TspProblem {
        let weights = WeightMatrix::from_fn(n, |i, j| {
            if (i + 1) % n == j || (j + 1) % n == i {
                1.0
            } else {
                50.0 + ((i * 7 + j * 3) % 11) as f64
            }
        });
        TspProblem::closed(0, weights).unwrap()
    }

    #[test]
    fn test_default_solver_finds_ring() {
        let p = ring(15);
        let solver = default_solver(VnsConfig::default().with_seed(3), 3).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let best = solver.solve(&p, &TspObjective, &mut rng);
        assert_invariants(&best.tour);
        assert_eq!(best.tour.count(), 15);
        assert_eq!(best.fitness, 15.0);
        assert_eq!(TspObjective.calculate(&p, &best.tour), best.fitness);
    }

    #[test]
    fn test_default_solver_open_and_fixed() {
        let weights = WeightMatrix::from_fn(9, |i, j| (i as f64 - j as f64).abs());
        let open = TspProblem::open(0, weights.clone()).unwrap();
        let fixed = TspProblem::new(0, Some(4), weights).unwrap();
        let solver = default_solver(VnsConfig::default(), 1).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let best = solver.solve(&open, &TspObjective, &mut rng);
        assert_eq!(best.fitness, 8.0);

        let best = solver.solve(&fixed, &TspObjective, &mut rng);
        assert_eq!(best.tour.tail(), 4);
        // 0 -> 8 is unavoidable on the way out and back to 4.
        assert_eq!(best.fitness, 12.0);
        assert_invariants(&best.tour);
    }

    #[test]
    fn test_default_ga_finds_ring() {
        let p = ring(10);
        let config = GaConfig::fast().with_population_size(30).with_seed(5);
        let ga = default_ga(config).unwrap();
        let result = ga.run(&p, &TspObjective);
        assert_eq!(result.best.fitness, 10.0);
        assert_invariants(&result.best.tour);
    }

    #[test]
    fn test_default_solver_rejects_invalid_config() {
        let config = VnsConfig {
            level_max: 0,
            ..VnsConfig::default()
        };
        assert!(default_solver::<TspProblem>(config, 1).is_err());
    }
}
