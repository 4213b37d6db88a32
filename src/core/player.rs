//! Seat identification and per-seat data storage.
//!
//! ## Seat
//!
//! The two seats at the table. In training mode the learning agent sits
//! in `Seat::Agent`; in play mode that seat is the human and the model
//! plays `Seat::Opponent`.
//!
//! ## SeatMap
//!
//! Fixed-size per-seat storage with O(1) indexing by `Seat`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two seats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Agent,
    Opponent,
}

impl Seat {
    /// Both seats, agent first.
    pub const ALL: [Seat; 2] = [Seat::Agent, Seat::Opponent];

    /// The seat across the table.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Seat::Agent => Seat::Opponent,
            Seat::Opponent => Seat::Agent,
        }
    }

    /// Storage index (agent = 0, opponent = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Seat::Agent => 0,
            Seat::Opponent => 1,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::Agent => f.write_str("agent"),
            Seat::Opponent => f.write_str("opponent"),
        }
    }
}

/// Per-seat data storage.
///
/// ## Example
///
/// ```
/// use go_fish::core::{Seat, SeatMap};
///
/// let mut sets: SeatMap<u32> = SeatMap::with_value(0);
/// sets[Seat::Opponent] += 2;
/// assert_eq!(sets[Seat::Agent], 0);
/// assert_eq!(sets[Seat::Opponent], 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: [T; 2],
}

impl<T> SeatMap<T> {
    /// Create a SeatMap with values from a factory function.
    pub fn new(factory: impl Fn(Seat) -> T) -> Self {
        Self {
            data: [factory(Seat::Agent), factory(Seat::Opponent)],
        }
    }

    /// Create a SeatMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        &self.data[seat.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        &mut self.data[seat.index()]
    }

    /// Iterate over (Seat, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        Seat::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Seat, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Seat, &mut T)> {
        Seat::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}
