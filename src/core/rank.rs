//! Card ranks.
//!
//! Suits are not modeled: a card is fully described by its rank, and a
//! deck is 4 copies of each of the 13 ranks.

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Number of distinct ranks.
pub const RANK_COUNT: usize = 13;

/// Copies of each rank in a deck; also the size of a completed set.
pub const COPIES_PER_RANK: u8 = 4;

/// Cards in a full deck.
pub const DECK_SIZE: usize = RANK_COUNT * COPIES_PER_RANK as usize;

/// A card rank in `0..13`.
///
/// Construction from a raw integer is fallible, so a `Rank` in hand is
/// always in range.
///
/// ```
/// use go_fish::core::Rank;
///
/// let seven = Rank::new(7).unwrap();
/// assert_eq!(seven.index(), 7);
/// assert!(Rank::new(13).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    /// The lowest rank, used as the fallback ask when nothing else is legal.
    pub const LOWEST: Rank = Rank(0);

    /// Create a rank, rejecting values outside `0..13`.
    pub fn new(value: u8) -> Result<Self, GameError> {
        if (value as usize) < RANK_COUNT {
            Ok(Self(value))
        } else {
            Err(GameError::InvalidRank(i64::from(value)))
        }
    }

    /// Index into per-rank arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw rank value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Iterate over all 13 ranks in ascending order.
    pub fn all() -> impl Iterator<Item = Rank> {
        (0..RANK_COUNT as u8).map(Rank)
    }
}

impl TryFrom<u8> for Rank {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::new(value)
    }
}

impl TryFrom<i64> for Rank {
    type Error = GameError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| GameError::InvalidRank(value))
            .and_then(Rank::new)
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> u8 {
        rank.0
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rank({})", self.0)
    }
}
