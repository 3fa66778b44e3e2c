//! Local-search operators, perturbers and crossovers.
//!
//! Operators are the improvement steps shared by every strategy. They are
//! generic over the problem and objective and declare what they need from
//! the objective through trait bounds:
//!
//! | Operator | Kind | Objective bound |
//! |----------|------|-----------------|
//! | [`TwoOpt`] | improvement | [`WeightObjective`](crate::objective::WeightObjective) |
//! | [`OneShiftLocalSearch`] | improvement | [`ShiftObjective`](crate::objective::ShiftObjective) |
//! | [`CheapestInsertionOperator`] | improvement / repair | any |
//! | [`RandomShift`] | perturbation | [`ShiftObjective`](crate::objective::ShiftObjective) |
//! | [`RandomRemoveInsert`] | perturbation | [`WeightObjective`](crate::objective::WeightObjective) |
//! | [`OrderCrossover`], [`PartiallyMappedCrossover`] | crossover | any |
//!
//! Combinators ([`Converge`], [`Sequence`], [`Iterate`]) build composite
//! local searches out of single-pass operators.

mod combinators;
mod crossover;
mod insertion;
mod one_shift;
mod two_opt;
mod types;

pub use combinators::{converge, Converge, Iterate, Sequence, DEFAULT_MAX_ROUNDS};
pub use crossover::{OrderCrossover, PartiallyMappedCrossover};
pub use insertion::{CheapestInsertionOperator, RandomRemoveInsert};
pub use one_shift::{OneShiftLocalSearch, RandomShift};
pub use two_opt::TwoOpt;
pub use types::{Crossover, Operator, Perturber};

pub(crate) use insertion::unplaced_visits;
pub(crate) use one_shift::movable_visits;
pub(crate) use two_opt::{first_reversal, Reversal};
