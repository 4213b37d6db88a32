//! One ask, as the turn controller sequences it.
//!
//! ## Sequence
//!
//! 1. Transfer every card of the asked rank (`resolve_ask`)
//! 2. Record the ask in the asker's `AskMemory`
//! 3. Retire completed sets
//! 4. On failure: go fish, then pass the turn
//! 5. Empty-hand recovery
//! 6. Termination check
//!
//! Termination is checked after each stage and stops the sequence.
//! Legality is the caller's job: `play_ask` trusts that `asker` holds the
//! turn and the rank.

use serde::{Deserialize, Serialize};

use super::engine::{
    check_empty_hands, detect_sets, draw_card, refresh_terminal, resolve_ask, update_sets,
    AskOutcome,
};
use crate::core::{AskMemory, GameState, Rank, Seat, SeatMap, TurnState};

/// Everything that happened during one ask.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub outcome: AskOutcome,
    /// Card drawn by the asker after a failed ask.
    pub drew: Option<Rank>,
    /// Sets newly retired by each seat during the ask, refills included.
    pub sets_completed: SeatMap<usize>,
    /// Turn state once the ask has fully resolved.
    pub turn: TurnState,
}

impl TurnReport {
    /// Whether the asker keeps the turn.
    #[must_use]
    pub fn keeps_turn(&self) -> bool {
        self.turn == TurnState::of(self.outcome.asker)
    }
}

/// Resolve one ask by `asker` for `rank` and advance the turn.
pub fn play_ask(state: &mut GameState, asker: Seat, rank: Rank) -> TurnReport {
    let sets_before = SeatMap::new(|seat| state.sets[seat].total());

    let outcome = resolve_ask(state, asker, rank);
    state.last_ask[asker] = AskMemory::new(rank, outcome.is_success());
    update_sets(state);

    let mut drew = None;
    if !refresh_terminal(state) {
        if !outcome.is_success() {
            drew = draw_card(state, asker);
            if drew.is_some() {
                detect_sets(state, asker);
            }
            state.set_turn(asker.other());
        }
        if !refresh_terminal(state) {
            check_empty_hands(state);
            refresh_terminal(state);
        }
    }

    TurnReport {
        outcome,
        drew,
        sets_completed: SeatMap::new(|seat| state.sets[seat].total() - sets_before[seat]),
        turn: state.turn,
    }
}
