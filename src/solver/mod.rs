//! Solvers: anything that produces a complete candidate.
//!
//! - [`RandomSolver`], [`CheapestInsertionSolver`]: constructors.
//! - [`WithLocalSearch`]: constructor followed by a converging local search.
//! - [`Converted`]: a solver driven by one objective, scored by another.
//! - [`Iterative`]: repeat a solver, keep the best, optionally in parallel.

mod construct;
mod iterative;
mod types;
mod wrappers;

pub use construct::{CheapestInsertionSolver, RandomSolver};
pub use iterative::{AcceptFn, Iterative};
pub use types::Solver;
pub use wrappers::{Converted, WithLocalSearch};
