//! Hands as per-rank counts.

use serde::{Deserialize, Serialize};

use crate::core::{Rank, RANK_COUNT};

/// A multiset of ranks stored as counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    counts: [u8; RANK_COUNT],
}

impl Hand {
    /// An empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hand from individual cards.
    pub fn from_ranks(ranks: impl IntoIterator<Item = Rank>) -> Self {
        let mut hand = Self::new();
        for rank in ranks {
            hand.add(rank);
        }
        hand
    }

    /// Add one card.
    pub fn add(&mut self, rank: Rank) {
        self.counts[rank.index()] += 1;
    }

    /// Add `count` cards of one rank.
    pub fn add_many(&mut self, rank: Rank, count: u8) {
        self.counts[rank.index()] += count;
    }

    /// Remove every card of `rank`, returning how many were removed.
    pub fn take_all(&mut self, rank: Rank) -> u8 {
        std::mem::take(&mut self.counts[rank.index()])
    }

    /// Multiplicity of `rank`.
    #[must_use]
    pub fn count_of_rank(&self, rank: Rank) -> u8 {
        self.counts[rank.index()]
    }

    /// Whether at least one card of `rank` is held.
    #[must_use]
    pub fn holds(&self, rank: Rank) -> bool {
        self.count_of_rank(rank) > 0
    }

    /// Total cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Ranks with at least one card, ascending.
    pub fn held_ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        Rank::all().filter(|&rank| self.holds(rank))
    }

    /// Per-rank counts.
    #[must_use]
    pub fn counts(&self) -> [u8; RANK_COUNT] {
        self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(v: u8) -> Rank {
        Rank::new(v).unwrap()
    }

    #[test]
    fn test_add_and_count() {
        let mut hand = Hand::new();
        assert!(hand.is_empty());

        hand.add(rank(3));
        hand.add(rank(3));
        hand.add(rank(9));

        assert_eq!(hand.count_of_rank(rank(3)), 2);
        assert_eq!(hand.count_of_rank(rank(9)), 1);
        assert_eq!(hand.count_of_rank(rank(0)), 0);
        assert_eq!(hand.len(), 3);
        assert!(!hand.is_empty());
    }

    #[test]
    fn test_take_all() {
        let mut hand = Hand::from_ranks([rank(5), rank(5), rank(1)]);
        assert_eq!(hand.take_all(rank(5)), 2);
        assert_eq!(hand.take_all(rank(5)), 0);
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn test_held_ranks() {
        let hand = Hand::from_ranks([rank(12), rank(0), rank(0)]);
        let held: Vec<_> = hand.held_ranks().collect();
        assert_eq!(held, vec![rank(0), rank(12)]);
    }
}
