//! TSP with time windows.
//!
//! Travel weights are times. Every visit has a [`TimeWindow`]; arriving
//! early means waiting, arriving late makes the tour infeasible.
//!
//! Solving happens in two phases sharing one tour representation:
//!
//! 1. a VNS under [`TspTwFeasibleObjective`] removes all lateness and stops
//!    as soon as the tour is feasible;
//! 2. that VNS, wrapped in [`Converted`], is the generator of a second VNS
//!    minimizing the duration under [`TspTwObjective`].
//!
//! [`default_solver`] wires both phases.
//!
//! # Examples
//!
//! ```
//! use u_tour::problem::WeightMatrix;
//! use u_tour::solver::Solver;
//! use u_tour::tsptw::{self, TimeWindow, TspTwObjective, TspTwProblem};
//! use u_tour::vns::VnsConfig;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let times = WeightMatrix::from_fn(4, |i, j| (i as f64 - j as f64).abs());
//! let mut windows = vec![TimeWindow::unlimited(); 4];
//! windows[1] = TimeWindow::new(5.0, 10.0);
//! let problem = TspTwProblem::open(0, times, windows).unwrap();
//! let solver = tsptw::default_solver(VnsConfig::fast(), 1).unwrap();
//! let best = solver.solve(&problem, &TspTwObjective, &mut StdRng::seed_from_u64(0));
//! assert_eq!(best.tour.tail(), 1);
//! assert_eq!(best.fitness, 5.0);
//! ```

mod objective;
mod problem;
mod two_opt;

pub use objective::{TspTwFeasibleObjective, TspTwObjective};
pub use problem::{TimeWindow, Timing, TspTwProblem};
pub use two_opt::TwoOptTw;

use crate::error::Result;
use crate::objective::Objective;
use crate::operator::{OneShiftLocalSearch, RandomShift, Sequence};
use crate::solver::{CheapestInsertionSolver, Converted, Iterative};
use crate::vns::{VnsConfig, VnsSolver};

/// Local search of both phases.
pub type LocalSearch = Sequence<TwoOptTw, OneShiftLocalSearch>;

/// Phase one: lateness-removing VNS.
pub type FeasibleVns =
    VnsSolver<TspTwProblem, TspTwFeasibleObjective, CheapestInsertionSolver, RandomShift, LocalSearch>;

/// Phase two: duration-minimizing VNS seeded by phase one.
pub type CostVns = VnsSolver<
    TspTwProblem,
    TspTwObjective,
    Converted<FeasibleVns, TspTwFeasibleObjective>,
    RandomShift,
    LocalSearch,
>;

/// Solver returned by [`default_solver`].
pub type DefaultSolver = Iterative<TspTwProblem, TspTwObjective, CostVns>;

/// VNS that stops as soon as the tour meets every window.
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn feasible_solver(config: VnsConfig) -> Result<FeasibleVns> {
    let vns = VnsSolver::new(
        config,
        CheapestInsertionSolver::new().with_random_start(true),
        RandomShift,
        Sequence::new(TwoOptTw, OneShiftLocalSearch),
    )?;
    Ok(vns.with_stop(|_, _, problem, objective: &TspTwFeasibleObjective, best| {
        objective.is_zero(problem, best.fitness)
    }))
}

/// Restarted construct-feasible-then-optimize pipeline.
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn default_solver(config: VnsConfig, restarts: usize) -> Result<DefaultSolver> {
    let seed = Converted::new(feasible_solver(config.clone())?, TspTwFeasibleObjective);
    let vns = VnsSolver::new(
        config,
        seed,
        RandomShift,
        Sequence::new(TwoOptTw, OneShiftLocalSearch),
    )?;
    Ok(Iterative::new(vns, restarts).with_parallel(restarts > 1))
}
