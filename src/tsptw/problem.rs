//! TSP with time windows.

use crate::error::{Error, Result};
use crate::problem::{validate_terminals, TourProblem, WeightMatrix};
use crate::tour::Tour;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Earliest and latest arrival time at a visit.
///
/// Arriving before `min` means waiting until `min`; arriving after `max`
/// makes the tour late by the difference.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeWindow {
    /// Earliest service start.
    pub min: f64,
    /// Latest arrival.
    pub max: f64,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl TimeWindow {
    /// A window `[min, max]`.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `[0, inf)`.
    pub fn unlimited() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }

    /// Returns `true` if the window does not constrain arrivals.
    pub fn is_unlimited(&self) -> bool {
        self.min <= 0.0 && self.max == f64::INFINITY
    }

    /// Lateness of an arrival at `time` (zero if on time).
    pub fn lateness(&self, time: f64) -> f64 {
        (time - self.max).max(0.0)
    }

    /// Service start for an arrival at `time`.
    pub fn start(&self, time: f64) -> f64 {
        time.max(self.min)
    }
}

/// Running clock along a tour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Current time.
    pub time: f64,
    /// Accumulated lateness.
    pub lateness: f64,
}

/// A TSP where every visit has a [`TimeWindow`] and the weights are travel
/// times.
///
/// A tour departs `first` at the opening of its window. Each arrival waits
/// for the window to open; an arrival after the window closes adds to the
/// lateness. A closed tour's return to `first` is timed but not checked
/// against its window.
#[derive(Debug, Clone)]
pub struct TspTwProblem {
    first: usize,
    last: Option<usize>,
    times: WeightMatrix,
    windows: Vec<TimeWindow>,
}

impl TspTwProblem {
    /// Creates a time-windowed TSP.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMatrix`] if `windows` does not hold one
    /// window per visit, [`Error::InvalidWindow`] for an inverted window and
    /// [`Error::VisitOutOfRange`] for bad terminals.
    pub fn new(
        first: usize,
        last: Option<usize>,
        times: WeightMatrix,
        windows: Vec<TimeWindow>,
    ) -> Result<Self> {
        if times.size() == 0 || windows.len() != times.size() {
            return Err(Error::InvalidMatrix {
                expected: windows.len().max(1),
                actual: times.size(),
            });
        }
        validate_terminals(first, last, times.size())?;
        for (visit, window) in windows.iter().enumerate() {
            if window.min.is_nan() || window.max.is_nan() || window.min > window.max {
                return Err(Error::InvalidWindow {
                    visit,
                    min: window.min,
                    max: window.max,
                });
            }
        }
        Ok(Self {
            first,
            last,
            times,
            windows,
        })
    }

    /// Creates a closed time-windowed TSP.
    pub fn closed(first: usize, times: WeightMatrix, windows: Vec<TimeWindow>) -> Result<Self> {
        Self::new(first, Some(first), times, windows)
    }

    /// Creates an open time-windowed TSP.
    pub fn open(first: usize, times: WeightMatrix, windows: Vec<TimeWindow>) -> Result<Self> {
        Self::new(first, None, times, windows)
    }

    /// The travel-time matrix.
    pub fn times(&self) -> &WeightMatrix {
        &self.times
    }

    /// The window of `visit`.
    pub fn window(&self, visit: usize) -> TimeWindow {
        self.windows[visit]
    }

    /// The clock when leaving `first`.
    pub fn start(&self) -> Timing {
        Timing {
            time: self.windows[self.first].min,
            lateness: 0.0,
        }
    }

    /// Travels from `from` to `to` and waits for the window of `to`.
    pub fn advance(&self, timing: Timing, from: usize, to: usize) -> Timing {
        let arrival = timing.time + self.times.get(from, to);
        let window = self.windows[to];
        Timing {
            time: window.start(arrival),
            lateness: timing.lateness + window.lateness(arrival),
        }
    }

    /// Times a visit sequence starting at `first`.
    ///
    /// `seq` must start with `first`; for a closed problem the return leg is
    /// added.
    pub fn schedule<I: IntoIterator<Item = usize>>(&self, seq: I) -> Timing {
        let mut visits = seq.into_iter();
        let Some(mut previous) = visits.next() else {
            return self.start();
        };
        let mut timing = self.start();
        for visit in visits {
            timing = self.advance(timing, previous, visit);
            previous = visit;
        }
        if self.last == Some(self.first) {
            timing.time += self.times.get(previous, self.first);
        }
        timing
    }

    /// Times a tour.
    pub fn evaluate(&self, tour: &Tour) -> Timing {
        self.schedule(tour.iter())
    }
}

impl TourProblem for TspTwProblem {
    fn first(&self) -> usize {
        self.first
    }

    fn last(&self) -> Option<usize> {
        self.last
    }

    fn count(&self) -> usize {
        self.times.size()
    }

    #[inline]
    fn weight(&self, from: usize, to: usize) -> f64 {
        self.times.get(from, to)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Line travel times; visit 3 must be reached by time 3, visit 1 not
    /// before 8.
    pub(crate) fn windowed_line(last: Option<usize>) -> TspTwProblem {
        let times = WeightMatrix::from_fn(6, |i, j| (i as f64 - j as f64).abs());
        let mut windows = vec![TimeWindow::unlimited(); 6];
        windows[3] = TimeWindow::new(0.0, 3.0);
        windows[1] = TimeWindow::new(8.0, 20.0);
        TspTwProblem::new(0, last, times, windows).unwrap()
    }

    #[test]
    fn test_window_rules() {
        let w = TimeWindow::new(2.0, 5.0);
        assert_eq!(w.start(1.0), 2.0);
        assert_eq!(w.start(3.0), 3.0);
        assert_eq!(w.lateness(4.0), 0.0);
        assert_eq!(w.lateness(7.5), 2.5);
        assert!(TimeWindow::default().is_unlimited());
        assert!(!w.is_unlimited());
    }

    #[test]
    fn test_schedule_waits_and_accumulates_lateness() {
        let p = windowed_line(Some(0));
        // 1 at 1 -> wait to 8; 2 at 9; 3 at 10 (late 7); 4 at 11; 5 at 12;
        // back to 0 at 17.
        let timing = p.evaluate(&Tour::closed([0, 1, 2, 3, 4, 5]).unwrap());
        assert_eq!(timing.time, 17.0);
        assert_eq!(timing.lateness, 7.0);

        let timing = p.evaluate(&Tour::closed([0, 2, 3, 4, 5, 1]).unwrap());
        assert_eq!(timing, Timing { time: 10.0, lateness: 0.0 });
    }

    #[test]
    fn test_open_schedule_has_no_return() {
        let p = windowed_line(None);
        let timing = p.evaluate(&Tour::open([0, 3, 5, 1]).unwrap());
        assert_eq!(timing, Timing { time: 9.0, lateness: 0.0 });
    }

    #[test]
    fn test_rejects_bad_windows() {
        let times = WeightMatrix::new(2);
        let inverted = vec![TimeWindow::unlimited(), TimeWindow::new(5.0, 1.0)];
        assert_eq!(
            TspTwProblem::closed(0, times.clone(), inverted).unwrap_err(),
            Error::InvalidWindow {
                visit: 1,
                min: 5.0,
                max: 1.0
            }
        );
        assert!(TspTwProblem::closed(0, times.clone(), vec![TimeWindow::unlimited()]).is_err());
        let nan = vec![TimeWindow::unlimited(), TimeWindow::new(f64::NAN, 1.0)];
        assert!(TspTwProblem::closed(0, times, nan).is_err());
    }
}
