//! Tour optimization for travelling-salesman problems.
//!
//! A tour is an arena of visit ids with a fixed first visit and an optional
//! fixed last visit (closed, open or fixed-end topology). Every strategy in
//! this crate works on that one representation:
//!
//! - **Operators**: 2-opt, 1-shift relocation, cheapest insertion, plus
//!   perturbers and crossovers, composed with [`operator::Sequence`] and
//!   [`operator::Converge`].
//! - **Variable Neighborhood Search (VNS)**: shake at increasing levels and
//!   descend with a local search.
//! - **Genetic Algorithm (GA)**: tournament selection, crossover, local
//!   search as mutation.
//! - **Solver wrappers**: restarts ([`solver::Iterative`]), objective
//!   conversion ([`solver::Converted`]) and post-optimization
//!   ([`solver::WithLocalSearch`]).
//!
//! Fitness values form an additive, totally ordered algebra
//! ([`objective::Fitness`]), so the same operators optimize a plain weight,
//! a lateness, or a lexicographic `(visits, weight)` pair.
//!
//! # Problem variants
//!
//! | Module | Problem |
//! |--------|---------|
//! | [`tsp`] | weight matrix, any topology |
//! | [`directed`] | visits with two sides and four turns, turn penalties |
//! | [`tsptw`] | time windows, feasibility first |
//! | [`stsp`] | weight budget, maximize visits |
//!
//! Each variant has a `default_solver` preset.

pub mod directed;
pub mod error;
pub mod ga;
pub mod objective;
pub mod operator;
pub mod problem;
pub mod solver;
pub mod stsp;
pub mod tour;
pub mod tsp;
pub mod tsptw;
pub mod vns;

pub use error::{Error, Result};
