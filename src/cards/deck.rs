//! The draw pile.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameRng, Rank, COPIES_PER_RANK, DECK_SIZE, RANK_COUNT};

/// A stack of rank tokens. The last element is the top.
///
/// Holds exactly 4 of each rank when built and only ever shrinks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Rank>,
}

impl Deck {
    /// A full deck in rank order (rank 12 on top).
    #[must_use]
    pub fn standard() -> Self {
        let cards = Rank::all()
            .flat_map(|rank| std::iter::repeat(rank).take(COPIES_PER_RANK as usize))
            .collect();
        Self { cards }
    }

    /// A full deck shuffled with `rng`.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut deck = Self::standard();
        rng.shuffle(&mut deck.cards);
        deck
    }

    /// Build a deck from an explicit draw order; the first element is drawn first.
    ///
    /// The order must be a permutation of the standard deck.
    pub fn from_draw_order(order: Vec<Rank>) -> Result<Self, GameError> {
        let malformed = GameError::MalformedDeck { len: order.len() };
        if order.len() != DECK_SIZE {
            return Err(malformed);
        }
        let mut counts = [0u8; RANK_COUNT];
        for rank in &order {
            counts[rank.index()] += 1;
        }
        if counts.iter().any(|&c| c != COPIES_PER_RANK) {
            return Err(malformed);
        }

        let mut cards = order;
        cards.reverse();
        Ok(Self { cards })
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Result<Rank, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    /// Cards left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Copies of `rank` still in the deck.
    #[must_use]
    pub fn count_of_rank(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|&&r| r == rank).count()
    }
}
