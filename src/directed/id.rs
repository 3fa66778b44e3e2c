//! Directed visit ids.
//!
//! A directed id packs a visit id and a 2-bit [`Turn`] into one integer,
//! `id * 4 + turn`. The turn selects the side of the visit used on arrival
//! and on departure; each side has its own row/column in the `2N x 2N`
//! weight matrix of a directed problem:
//!
//! | turn | arrival side | departure side |
//! |------|--------------|----------------|
//! | 0    | 0            | 0              |
//! | 1    | 0            | 1              |
//! | 2    | 1            | 0              |
//! | 3    | 1            | 1              |
//!
//! `arrival_id = id * 2 + arrival side`, `departure_id = id * 2 + departure
//! side`.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Arrival/departure side combination of a directed visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Turn {
    /// Arrive on side 0, depart from side 0.
    ForwardForward = 0,
    /// Arrive on side 0, depart from side 1.
    ForwardBackward = 1,
    /// Arrive on side 1, depart from side 0.
    BackwardForward = 2,
    /// Arrive on side 1, depart from side 1.
    BackwardBackward = 3,
}

impl Turn {
    /// All turns in encoding order.
    pub const ALL: [Turn; 4] = [
        Turn::ForwardForward,
        Turn::ForwardBackward,
        Turn::BackwardForward,
        Turn::BackwardBackward,
    ];

    /// Decodes the two low bits of `bits`.
    pub const fn from_bits(bits: usize) -> Self {
        match bits & 3 {
            0 => Turn::ForwardForward,
            1 => Turn::ForwardBackward,
            2 => Turn::BackwardForward,
            _ => Turn::BackwardBackward,
        }
    }

    /// Builds the turn from its sides.
    pub const fn from_sides(arrival: usize, departure: usize) -> Self {
        Self::from_bits(((arrival & 1) << 1) | (departure & 1))
    }

    /// The 2-bit encoding, also the index into a turn-penalty table.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Side used on arrival (0 or 1).
    pub const fn arrival_offset(self) -> usize {
        self.index() >> 1
    }

    /// Side used on departure (0 or 1).
    pub const fn departure_offset(self) -> usize {
        self.index() & 1
    }

    /// The turn seen when travelling through the visit the other way round.
    ///
    /// Swaps arrival and departure sides, so `1 <-> 2` and `0`, `3` are
    /// fixed points.
    pub const fn flip(self) -> Self {
        Self::from_sides(self.departure_offset(), self.arrival_offset())
    }

    /// Returns `true` if the visit is left on a different side than it was
    /// entered.
    pub const fn is_u_turn(self) -> bool {
        self.arrival_offset() != self.departure_offset()
    }
}

/// A visit id together with its turn.
///
/// # Examples
///
/// ```
/// use u_tour::directed::{DirectedId, Turn};
///
/// let id = DirectedId::new(5, Turn::BackwardForward);
/// assert_eq!(id.raw(), 22);
/// assert_eq!(id.arrival_id(), 11);
/// assert_eq!(id.departure_id(), 10);
/// assert_eq!(id.flip().turn(), Turn::ForwardBackward);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DirectedId(usize);

impl DirectedId {
    /// Packs `id` and `turn`.
    pub const fn new(id: usize, turn: Turn) -> Self {
        Self(id * 4 + turn.index())
    }

    /// Wraps an already packed value.
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// The packed value, as stored in a directed [`Tour`](crate::tour::Tour).
    pub const fn raw(self) -> usize {
        self.0
    }

    /// The plain visit id.
    pub const fn id(self) -> usize {
        self.0 >> 2
    }

    /// The turn.
    pub const fn turn(self) -> Turn {
        Turn::from_bits(self.0)
    }

    /// Matrix index of the arrival side.
    pub const fn arrival_id(self) -> usize {
        self.id() * 2 + self.turn().arrival_offset()
    }

    /// Matrix index of the departure side.
    pub const fn departure_id(self) -> usize {
        self.id() * 2 + self.turn().departure_offset()
    }

    /// Same visit, other turn.
    pub const fn with_turn(self, turn: Turn) -> Self {
        Self::new(self.id(), turn)
    }

    /// Same visit travelled the other way round.
    pub const fn flip(self) -> Self {
        self.with_turn(self.turn().flip())
    }
}

impl From<DirectedId> for usize {
    fn from(id: DirectedId) -> Self {
        id.raw()
    }
}

impl fmt::Display for DirectedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.id(), self.turn().index())
    }
}

/// Packs `id` and `turn` into a raw directed id.
pub const fn build_directed_id(id: usize, turn: Turn) -> usize {
    DirectedId::new(id, turn).raw()
}

/// Recovers the plain visit id of a raw directed id.
pub const fn extract_id(directed: usize) -> usize {
    DirectedId::from_raw(directed).id()
}

/// Recovers the visit id and the turn of a raw directed id.
pub const fn extract_all(directed: usize) -> (usize, Turn) {
    let id = DirectedId::from_raw(directed);
    (id.id(), id.turn())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_turn_offsets() {
        let sides: Vec<_> = Turn::ALL
            .iter()
            .map(|t| (t.arrival_offset(), t.departure_offset()))
            .collect();
        assert_eq!(sides, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert!(Turn::ForwardBackward.is_u_turn());
        assert!(!Turn::BackwardBackward.is_u_turn());
    }

    #[test]
    fn test_flip_swaps_u_turns() {
        assert_eq!(Turn::ForwardForward.flip(), Turn::ForwardForward);
        assert_eq!(Turn::ForwardBackward.flip(), Turn::BackwardForward);
        assert_eq!(Turn::BackwardForward.flip(), Turn::ForwardBackward);
        assert_eq!(Turn::BackwardBackward.flip(), Turn::BackwardBackward);
        for turn in Turn::ALL {
            assert_eq!(turn.flip().flip(), turn);
        }
    }

    #[test]
    fn test_matrix_indices() {
        let id = DirectedId::new(3, Turn::ForwardBackward);
        assert_eq!(id.raw(), 13);
        assert_eq!(id.arrival_id(), 6);
        assert_eq!(id.departure_id(), 7);
        let flipped = id.flip();
        assert_eq!(flipped.arrival_id(), id.departure_id());
        assert_eq!(flipped.departure_id(), id.arrival_id());
        assert_eq!(id.to_string(), "3/1");
    }

    proptest! {
        #[test]
        fn prop_codec_round_trip(id in 0usize..1_000_000, bits in 0usize..4) {
            let turn = Turn::from_bits(bits);
            let raw = build_directed_id(id, turn);
            prop_assert_eq!(extract_id(raw), id);
            prop_assert_eq!(extract_all(raw), (id, turn));
            prop_assert_eq!(turn.index(), bits);
            prop_assert_eq!(Turn::from_sides(turn.arrival_offset(), turn.departure_offset()), turn);
        }
    }
}
