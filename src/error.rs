//! Error type for problem, tour and configuration construction.
//!
//! Search-time infeasibility (a window violated, a budget exceeded, a move
//! that would break the tour) is never an error: operators report it through
//! `Option`/`bool` returns. [`Error`] only covers inputs that cannot describe
//! a valid problem or configuration.

use std::fmt;

/// Errors raised while building tours, problems and solver configurations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The weight matrix is not square or does not match the expected size.
    InvalidMatrix {
        /// Number of rows/columns the problem requires.
        expected: usize,
        /// Number of rows (or flat length) that was supplied.
        actual: usize,
    },
    /// A visit id is outside `0..count`.
    VisitOutOfRange {
        /// The offending visit.
        visit: usize,
        /// Number of visits in the problem.
        count: usize,
    },
    /// A visit appears more than once in a tour.
    DuplicateVisit(usize),
    /// A tour sequence was empty.
    EmptyTour,
    /// The fixed last visit is not the final element of the sequence.
    LastNotTerminal(usize),
    /// A time window with `min > max`.
    InvalidWindow {
        /// Visit owning the window.
        visit: usize,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// A configuration value is out of range.
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMatrix { expected, actual } => {
                write!(f, "weight matrix must be {expected}x{expected}, got {actual}")
            }
            Self::VisitOutOfRange { visit, count } => {
                write!(f, "visit {visit} is out of range for {count} visits")
            }
            Self::DuplicateVisit(v) => write!(f, "visit {v} appears more than once"),
            Self::EmptyTour => write!(f, "a tour needs at least one visit"),
            Self::LastNotTerminal(v) => {
                write!(f, "fixed last visit {v} must terminate the sequence")
            }
            Self::InvalidWindow { visit, min, max } => {
                write!(f, "time window of visit {visit} is inverted: [{min}, {max}]")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
