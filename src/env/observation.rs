//! Per-seat projection of the game state.
//!
//! ## Observation
//!
//! What one seat is allowed to see:
//! - Its own per-rank counts
//! - The opponent's hand size (never its contents)
//! - Both completed-set totals
//! - Whether it holds the turn
//! - Both seats' most recent ask and whether it succeeded
//!
//! `observe` is perspective-relative, so the opponent's view is the same
//! structure with roles swapped and one policy can play either seat.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Rank, Seat, RANK_COUNT};

/// A seat's view of the game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Own cards per rank, each 0..=4.
    pub hand_ranks: [u8; RANK_COUNT],
    /// Cards in the other seat's hand.
    pub opponent_hand_size: u8,
    /// Sets retired by this seat.
    pub own_sets: u8,
    /// Sets retired by the other seat.
    pub opponent_sets: u8,
    pub is_own_turn: bool,
    pub last_own_ask: Option<Rank>,
    pub last_own_ask_success: bool,
    pub last_opponent_ask: Option<Rank>,
    pub last_opponent_ask_success: bool,
}

impl Observation {
    /// Ranks this seat may legally ask for, ascending.
    pub fn held_ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        Rank::all().filter(|rank| self.hand_ranks[rank.index()] > 0)
    }

    /// Number of cards held of `rank`.
    #[must_use]
    pub fn count_of_rank(&self, rank: Rank) -> u8 {
        self.hand_ranks[rank.index()]
    }

    /// Total cards in own hand.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand_ranks.iter().map(|&c| c as usize).sum()
    }

    /// 13-entry mask, true where asking is legal.
    #[must_use]
    pub fn action_mask(&self) -> [bool; RANK_COUNT] {
        self.hand_ranks.map(|count| count > 0)
    }
}

/// Build the observation `seat` sees.
#[must_use]
pub fn observe(state: &GameState, seat: Seat) -> Observation {
    let other = seat.other();
    let own_ask = state.last_ask[seat];
    let other_ask = state.last_ask[other];

    Observation {
        hand_ranks: state.hands[seat].counts(),
        opponent_hand_size: narrow(state.hands[other].len()),
        own_sets: narrow(state.sets[seat].total()),
        opponent_sets: narrow(state.sets[other].total()),
        is_own_turn: state.has_turn(seat),
        last_own_ask: own_ask.rank,
        last_own_ask_success: own_ask.success,
        last_opponent_ask: other_ask.rank,
        last_opponent_ask_success: other_ask.success,
    }
}

// Hand sizes and set totals are bounded by 52.
fn narrow(value: usize) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Deck, Hand};
    use crate::core::AskMemory;

    fn rank(v: u8) -> Rank {
        Rank::new(v).unwrap()
    }

    fn sample_state() -> GameState {
        let mut state = GameState::new(Deck::standard(), Seat::Agent);
        state.hands[Seat::Agent] = Hand::from_ranks([rank(1), rank(1), rank(6)]);
        state.hands[Seat::Opponent] = Hand::from_ranks([rank(2), rank(3), rank(4), rank(4)]);
        state.sets[Seat::Opponent].mark(rank(9));
        state.last_ask[Seat::Agent] = AskMemory::new(rank(6), false);
        state
    }

    #[test]
    fn test_agent_view() {
        let obs = observe(&sample_state(), Seat::Agent);

        assert_eq!(obs.hand_ranks[1], 2);
        assert_eq!(obs.hand_size(), 3);
        assert_eq!(obs.opponent_hand_size, 4);
        assert_eq!(obs.own_sets, 0);
        assert_eq!(obs.opponent_sets, 1);
        assert!(obs.is_own_turn);
        assert_eq!(obs.last_own_ask, Some(rank(6)));
        assert!(!obs.last_own_ask_success);
        assert_eq!(obs.last_opponent_ask, None);
    }

    #[test]
    fn test_mirrored_view() {
        let obs = observe(&sample_state(), Seat::Opponent);

        assert_eq!(obs.hand_ranks[4], 2);
        assert_eq!(obs.opponent_hand_size, 3);
        assert_eq!(obs.own_sets, 1);
        assert_eq!(obs.opponent_sets, 0);
        assert!(!obs.is_own_turn);
        assert_eq!(obs.last_own_ask, None);
        assert_eq!(obs.last_opponent_ask, Some(rank(6)));
    }

    #[test]
    fn test_held_ranks_and_mask() {
        let obs = observe(&sample_state(), Seat::Agent);
        assert_eq!(obs.held_ranks().collect::<Vec<_>>(), vec![rank(1), rank(6)]);

        let mask = obs.action_mask();
        assert!(mask[1] && mask[6]);
        assert_eq!(mask.iter().filter(|&&m| m).count(), 2);
    }
}
