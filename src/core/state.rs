//! Game state.
//!
//! ## GameState
//!
//! Everything one game needs:
//! - Draw pile
//! - Both hands and their completed sets
//! - Turn possession
//! - Each seat's most recent ask
//!
//! The state is a plain owned value. Rules in `crate::rules` mutate it;
//! nothing here enforces legality.

use serde::{Deserialize, Serialize};

use super::player::{Seat, SeatMap};
use super::rank::{Rank, COPIES_PER_RANK, DECK_SIZE, RANK_COUNT};
use crate::cards::{CompletedSets, Deck, Hand};

/// Who may act next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    AgentTurn,
    OpponentTurn,
    /// All 13 sets are retired.
    Terminal,
}

impl TurnState {
    /// The turn state in which `seat` acts.
    #[must_use]
    pub const fn of(seat: Seat) -> Self {
        match seat {
            Seat::Agent => TurnState::AgentTurn,
            Seat::Opponent => TurnState::OpponentTurn,
        }
    }

    /// The seat holding the turn, if the game is still running.
    #[must_use]
    pub const fn seat(self) -> Option<Seat> {
        match self {
            TurnState::AgentTurn => Some(Seat::Agent),
            TurnState::OpponentTurn => Some(Seat::Opponent),
            TurnState::Terminal => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, TurnState::Terminal)
    }
}

/// A seat's most recent ask. Observability only; never read by the rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AskMemory {
    /// `None` until the seat has asked this game.
    pub rank: Option<Rank>,
    pub success: bool,
}

impl AskMemory {
    #[must_use]
    pub const fn new(rank: Rank, success: bool) -> Self {
        Self {
            rank: Some(rank),
            success,
        }
    }
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Draw pile.
    pub deck: Deck,

    /// Cards held by each seat.
    pub hands: SeatMap<Hand>,

    /// Sets retired by each seat.
    pub sets: SeatMap<CompletedSets>,

    /// Turn possession.
    pub turn: TurnState,

    /// Last ask per seat.
    pub last_ask: SeatMap<AskMemory>,
}

impl GameState {
    /// A game with empty hands, `deck` undealt, and `first` holding the turn.
    #[must_use]
    pub fn new(deck: Deck, first: Seat) -> Self {
        Self {
            deck,
            hands: SeatMap::default(),
            sets: SeatMap::default(),
            turn: TurnState::of(first),
            last_ask: SeatMap::default(),
        }
    }

    /// The seat holding the turn, if any.
    #[must_use]
    pub fn active_seat(&self) -> Option<Seat> {
        self.turn.seat()
    }

    /// Whether `seat` holds the turn.
    #[must_use]
    pub fn has_turn(&self, seat: Seat) -> bool {
        self.turn.seat() == Some(seat)
    }

    /// Give the turn to `seat` unless the game is over.
    pub fn set_turn(&mut self, seat: Seat) {
        if !self.turn.is_terminal() {
            self.turn = TurnState::of(seat);
        }
    }

    /// A seat's hand.
    #[must_use]
    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat]
    }

    /// Sets retired by both seats together.
    #[must_use]
    pub fn total_sets(&self) -> usize {
        self.sets.iter().map(|(_, sets)| sets.total()).sum()
    }

    /// Whether every rank has been retired.
    #[must_use]
    pub fn all_sets_completed(&self) -> bool {
        self.total_sets() == RANK_COUNT
    }

    /// Cards accounted for across deck, hands and retired sets.
    ///
    /// Equals 52 at every point after a deal.
    #[must_use]
    pub fn card_total(&self) -> usize {
        self.deck.len()
            + self.hands.iter().map(|(_, hand)| hand.len()).sum::<usize>()
            + COPIES_PER_RANK as usize * self.total_sets()
    }

    /// Whether the card total matches a full deck.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        self.card_total() == DECK_SIZE
    }
}
