//! Opponent auto-play.
//!
//! The opponent's decisions come from an injected `Policy` evaluated on
//! the mirrored observation. A rank the opponent does not hold is
//! replaced by a uniformly random held rank (or `Rank::LOWEST` with an
//! empty hand) and logged.

use tracing::warn;

use super::observation::observe;
use crate::core::{GameError, GameRng, GameState, Rank, Seat};
use crate::policy::Policy;
use crate::rules::{play_ask, AskOutcome};

/// Ask the policy for the opponent's next rank, substituting if needed.
pub fn choose_opponent_rank(
    state: &GameState,
    policy: &mut dyn Policy,
    rng: &mut GameRng,
) -> Rank {
    let observation = observe(state, Seat::Opponent);
    let proposed = policy.predict(&observation, rng);
    let hand = &state.hands[Seat::Opponent];
    if hand.holds(proposed) {
        return proposed;
    }

    let held: Vec<Rank> = hand.held_ranks().collect();
    let substitute = rng.choose(&held).copied().unwrap_or(Rank::LOWEST);
    let error = GameError::InvalidOpponentAction {
        rank: proposed.raw(),
    };
    warn!(
        policy = policy.name(),
        %error,
        substitute = substitute.raw(),
        "substituting opponent ask"
    );
    substitute
}

/// Play the opponent's turn cycle: keep asking while successful.
///
/// Returns when the opponent loses the turn or the game ends.
pub fn run_opponent_cycle(
    state: &mut GameState,
    policy: &mut dyn Policy,
    rng: &mut GameRng,
) -> Vec<AskOutcome> {
    let mut asks = Vec::new();
    while state.has_turn(Seat::Opponent) && !state.hands[Seat::Opponent].is_empty() {
        let rank = choose_opponent_rank(state, policy, rng);
        asks.push(play_ask(state, Seat::Opponent, rank).outcome);
    }
    asks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Deck, Hand};
    use crate::core::TurnState;
    use crate::env::Observation;
    use crate::policy::{FnPolicy, FrequencyPolicy};

    fn rank(v: u8) -> Rank {
        Rank::new(v).unwrap()
    }

    fn state_with(agent: &[u8], opponent: &[u8]) -> GameState {
        let mut state = GameState::new(Deck::standard(), Seat::Opponent);
        while state.deck.draw().is_ok() {}
        state.hands[Seat::Agent] = Hand::from_ranks(agent.iter().map(|&v| rank(v)));
        state.hands[Seat::Opponent] = Hand::from_ranks(opponent.iter().map(|&v| rank(v)));
        state
    }

    #[test]
    fn test_valid_choice_passes_through() {
        let state = state_with(&[1], &[3, 3, 8]);
        let mut rng = GameRng::new(0);
        let rank = choose_opponent_rank(&state, &mut FrequencyPolicy, &mut rng);
        assert_eq!(rank.raw(), 3);
    }

    #[test]
    fn test_invalid_choice_substituted() {
        let state = state_with(&[1], &[3, 8]);
        let mut policy = FnPolicy::new(|_: &Observation| rank(12));
        let mut rng = GameRng::new(0);

        for _ in 0..20 {
            let chosen = choose_opponent_rank(&state, &mut policy, &mut rng);
            assert!(chosen.raw() == 3 || chosen.raw() == 8);
        }
    }

    #[test]
    fn test_invalid_choice_with_empty_hand() {
        let state = state_with(&[1], &[]);
        let mut policy = FnPolicy::new(|_: &Observation| rank(12));
        let mut rng = GameRng::new(0);
        assert_eq!(choose_opponent_rank(&state, &mut policy, &mut rng), Rank::LOWEST);
    }

    #[test]
    fn test_cycle_continues_until_failure() {
        // Opponent takes the 2s, then the 6, then misses on 9.
        let mut state = state_with(&[2, 2, 6, 10], &[2, 6, 9]);
        let mut order = vec![rank(9), rank(6), rank(2)];
        let mut policy = FnPolicy::new(move |_: &Observation| order.pop().unwrap_or(Rank::LOWEST));
        let mut rng = GameRng::new(0);

        let asks = run_opponent_cycle(&mut state, &mut policy, &mut rng);

        assert_eq!(asks.len(), 3);
        assert!(asks[0].is_success() && asks[1].is_success());
        assert!(!asks[2].is_success());
        assert_eq!(state.turn, TurnState::AgentTurn);
        assert_eq!(state.hands[Seat::Agent].len(), 1);
    }

    #[test]
    fn test_cycle_noop_on_agent_turn() {
        let mut state = state_with(&[2], &[2]);
        state.turn = TurnState::AgentTurn;
        let mut rng = GameRng::new(0);
        assert!(run_opponent_cycle(&mut state, &mut FrequencyPolicy, &mut rng).is_empty());
    }
}
