//! Engine error taxonomy.
//!
//! None of these are fatal during normal play:
//! - `EmptyDeck` is swallowed by the draw helpers (the hand just stays short).
//! - `IllegalAction` becomes a penalized step outcome with a reason string.
//! - `InvalidOpponentAction` is recovered by substituting a legal rank.
//!
//! `InvalidRank` and `MalformedDeck` guard the construction boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an ask was rejected before resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IllegalReason {
    /// The acting seat does not hold the turn.
    OutOfTurn,
    /// The acting seat asked for a rank absent from its own hand.
    RankNotHeld,
}

impl IllegalReason {
    /// Diagnostic code reported in step info.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            IllegalReason::OutOfTurn => "moved_out_of_turn",
            IllegalReason::RankNotHeld => "invalid_action",
        }
    }
}

impl std::fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by the game engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("deck is empty")]
    EmptyDeck,

    #[error("rank {0} is outside 0..13")]
    InvalidRank(i64),

    #[error("illegal action: {0}")]
    IllegalAction(IllegalReason),

    #[error("opponent policy chose rank {rank}, which the opponent does not hold")]
    InvalidOpponentAction { rank: u8 },

    #[error("deck must hold 4 copies of each of the 13 ranks, got {len} cards")]
    MalformedDeck { len: usize },
}

impl GameError {
    /// Short code used in step info and logs.
    #[must_use]
    pub fn reason_code(&self) -> &'static str {
        match self {
            GameError::EmptyDeck => "empty_deck",
            GameError::InvalidRank(_) => "invalid_rank",
            GameError::IllegalAction(reason) => reason.as_str(),
            GameError::InvalidOpponentAction { .. } => "invalid_opponent_action",
            GameError::MalformedDeck { .. } => "malformed_deck",
        }
    }
}
