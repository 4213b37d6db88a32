//! Resolution primitives shared by every step mode.
//!
//! - Legality check for an ask
//! - The ask-resolve transfer itself
//! - Set detection and termination
//! - Draws, the initial deal, and empty-hand recovery
//!
//! None of these consult a policy or compute rewards; the environment
//! layers those on top.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{GameError, GameState, IllegalReason, Rank, Seat, SeatMap, TurnState, COPIES_PER_RANK};

/// Result of one ask-resolve transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskOutcome {
    /// Seat that asked.
    pub asker: Seat,
    /// Rank asked for.
    pub rank: Rank,
    /// Cards moved from the target to the asker.
    pub transferred: u8,
    /// Cards of `rank` the asker held before the transfer.
    pub held_before: u8,
}

impl AskOutcome {
    /// At least one card changed hands.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.transferred > 0
    }
}

/// Why `seat` may not ask for `rank` right now, if it may not.
#[must_use]
pub fn illegal_reason(state: &GameState, seat: Seat, rank: Rank) -> Option<IllegalReason> {
    if !state.has_turn(seat) {
        Some(IllegalReason::OutOfTurn)
    } else if !state.hands[seat].holds(rank) {
        Some(IllegalReason::RankNotHeld)
    } else {
        None
    }
}

/// Check that `seat` may ask for `rank` right now.
pub fn check_ask(state: &GameState, seat: Seat, rank: Rank) -> Result<(), GameError> {
    match illegal_reason(state, seat, rank) {
        Some(reason) => Err(GameError::IllegalAction(reason)),
        None => Ok(()),
    }
}

/// Move every card of `rank` from the other seat's hand to `asker`'s.
///
/// Performs no legality check, so forced opponent asks can reuse it.
pub fn resolve_ask(state: &mut GameState, asker: Seat, rank: Rank) -> AskOutcome {
    let held_before = state.hands[asker].count_of_rank(rank);
    let transferred = state.hands[asker.other()].take_all(rank);
    state.hands[asker].add_many(rank, transferred);

    trace!(seat = %asker, rank = rank.raw(), transferred, "ask resolved");

    AskOutcome {
        asker,
        rank,
        transferred,
        held_before,
    }
}

/// Retire every rank that has reached four copies in `seat`'s hand.
///
/// Returns the number of sets newly completed.
pub fn detect_sets(state: &mut GameState, seat: Seat) -> usize {
    let mut completed = 0;
    for rank in Rank::all() {
        if state.hands[seat].count_of_rank(rank) == COPIES_PER_RANK
            && !state.sets[seat].is_completed(rank)
        {
            state.hands[seat].take_all(rank);
            state.sets[seat].mark(rank);
            completed += 1;
            trace!(seat = %seat, rank = rank.raw(), "set retired");
        }
    }
    completed
}

/// Run set detection on both hands.
pub fn update_sets(state: &mut GameState) -> SeatMap<usize> {
    let agent = detect_sets(state, Seat::Agent);
    let opponent = detect_sets(state, Seat::Opponent);
    SeatMap::new(|seat| match seat {
        Seat::Agent => agent,
        Seat::Opponent => opponent,
    })
}

/// Whether all 13 ranks are retired.
#[must_use]
pub fn is_terminal(state: &GameState) -> bool {
    state.all_sets_completed()
}

/// Move the state to `Terminal` if the game is over. Returns whether it is.
pub fn refresh_terminal(state: &mut GameState) -> bool {
    if is_terminal(state) {
        state.turn = TurnState::Terminal;
        true
    } else {
        false
    }
}

/// Draw the top card into `seat`'s hand.
///
/// An empty deck is not an error here: the hand simply stays short.
pub fn draw_card(state: &mut GameState, seat: Seat) -> Option<Rank> {
    match state.deck.draw() {
        Ok(rank) => {
            state.hands[seat].add(rank);
            Some(rank)
        }
        Err(GameError::EmptyDeck) => {
            trace!(seat = %seat, "deck empty, draw skipped");
            None
        }
        Err(_) => None,
    }
}

/// Deal `hand_size` cards to each seat by alternating single draws,
/// starting with `first`.
pub fn deal_initial(state: &mut GameState, first: Seat, hand_size: usize) {
    for _ in 0..hand_size {
        for seat in [first, first.other()] {
            draw_card(state, seat);
        }
    }
    update_sets(state);
    refresh_terminal(state);
}

/// Empty-hand recovery.
///
/// An empty-handed seat draws one replacement card while the deck lasts.
/// If the seat holding the turn still has no cards, the turn moves to the
/// seat that does.
pub fn check_empty_hands(state: &mut GameState) {
    let Some(active) = state.active_seat() else {
        return;
    };

    for seat in [active, active.other()] {
        if state.hands[seat].is_empty() && draw_card(state, seat).is_some() {
            detect_sets(state, seat);
        }
    }

    if state.hands[active].is_empty() && !state.hands[active.other()].is_empty() {
        trace!(from = %active, "empty hand with empty deck, passing turn");
        state.set_turn(active.other());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Deck, Hand};

    fn rank(v: u8) -> Rank {
        Rank::new(v).unwrap()
    }

    fn empty_deck_state(agent: &[u8], opponent: &[u8]) -> GameState {
        let mut state = GameState::new(Deck::standard(), Seat::Agent);
        while state.deck.draw().is_ok() {}
        state.hands[Seat::Agent] = Hand::from_ranks(agent.iter().map(|&v| rank(v)));
        state.hands[Seat::Opponent] = Hand::from_ranks(opponent.iter().map(|&v| rank(v)));
        state
    }

    #[test]
    fn test_check_ask() {
        let mut state = empty_deck_state(&[1, 2], &[3]);
        assert!(check_ask(&state, Seat::Agent, rank(1)).is_ok());
        assert_eq!(
            check_ask(&state, Seat::Agent, rank(3)),
            Err(GameError::IllegalAction(IllegalReason::RankNotHeld))
        );
        assert_eq!(
            check_ask(&state, Seat::Opponent, rank(3)),
            Err(GameError::IllegalAction(IllegalReason::OutOfTurn))
        );

        state.turn = TurnState::Terminal;
        assert_eq!(
            check_ask(&state, Seat::Agent, rank(1)),
            Err(GameError::IllegalAction(IllegalReason::OutOfTurn))
        );
    }

    #[test]
    fn test_resolve_ask_transfers_all() {
        let mut state = empty_deck_state(&[4], &[4, 4, 9]);
        let outcome = resolve_ask(&mut state, Seat::Agent, rank(4));

        assert!(outcome.is_success());
        assert_eq!(outcome.transferred, 2);
        assert_eq!(outcome.held_before, 1);
        assert_eq!(state.hands[Seat::Agent].count_of_rank(rank(4)), 3);
        assert_eq!(state.hands[Seat::Opponent].count_of_rank(rank(4)), 0);
        assert_eq!(state.hands[Seat::Opponent].len(), 1);
    }

    #[test]
    fn test_resolve_ask_failure_moves_nothing() {
        let mut state = empty_deck_state(&[4], &[9]);
        let before = state.clone();
        let outcome = resolve_ask(&mut state, Seat::Agent, rank(4));

        assert!(!outcome.is_success());
        assert_eq!(state, before);
    }

    #[test]
    fn test_detect_sets_retires_four() {
        let mut state = empty_deck_state(&[5, 5, 5, 5, 6], &[]);
        assert_eq!(detect_sets(&mut state, Seat::Agent), 1);
        assert!(state.sets[Seat::Agent].is_completed(rank(5)));
        assert_eq!(state.hands[Seat::Agent].count_of_rank(rank(5)), 0);
        assert_eq!(state.hands[Seat::Agent].len(), 1);

        // Idempotent
        assert_eq!(detect_sets(&mut state, Seat::Agent), 0);
        assert_eq!(state.total_sets(), 1);
    }

    #[test]
    fn test_deal_alternates_from_first() {
        let order: Vec<Rank> = (0..13u8)
            .flat_map(|r| std::iter::repeat(rank(r)).take(4))
            .collect();
        let deck = Deck::from_draw_order(order).unwrap();
        let mut state = GameState::new(deck, Seat::Opponent);

        deal_initial(&mut state, Seat::Opponent, 2);

        // Draw order 0,0,0,0: opponent, agent, opponent, agent
        assert_eq!(state.hands[Seat::Opponent].count_of_rank(rank(0)), 2);
        assert_eq!(state.hands[Seat::Agent].count_of_rank(rank(0)), 2);
        assert_eq!(state.deck.len(), 48);
        assert!(state.is_conserved());
    }

    #[test]
    fn test_deal_fourteen_each() {
        let mut state = GameState::new(Deck::standard(), Seat::Agent);
        deal_initial(&mut state, Seat::Agent, 14);

        assert_eq!(state.deck.len(), 52 - 28);
        assert!(state.is_conserved());
    }

    #[test]
    fn test_draw_card_empty_deck() {
        let mut state = empty_deck_state(&[1], &[2]);
        assert_eq!(draw_card(&mut state, Seat::Agent), None);
        assert_eq!(state.hands[Seat::Agent].len(), 1);
    }

    #[test]
    fn test_check_empty_hands_refills_both_seats() {
        let mut state = GameState::new(Deck::standard(), Seat::Agent);
        check_empty_hands(&mut state);

        assert_eq!(state.hands[Seat::Agent].len(), 1);
        assert_eq!(state.hands[Seat::Opponent].len(), 1);
        assert_eq!(state.turn, TurnState::AgentTurn);
    }

    #[test]
    fn test_check_empty_hands_passes_turn_when_deck_empty() {
        let mut state = empty_deck_state(&[], &[2, 3]);
        check_empty_hands(&mut state);
        assert_eq!(state.turn, TurnState::OpponentTurn);
    }

    #[test]
    fn test_refresh_terminal() {
        let mut state = empty_deck_state(&[], &[]);
        assert!(!refresh_terminal(&mut state));

        for r in Rank::all() {
            state.sets[Seat::Agent].mark(r);
        }
        assert!(refresh_terminal(&mut state));
        assert_eq!(state.turn, TurnState::Terminal);
    }
}
