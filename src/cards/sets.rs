//! Completed-set flags.

use serde::{Deserialize, Serialize};

use crate::core::{Rank, RANK_COUNT};

/// Per-rank flags marking which sets a player has retired.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletedSets {
    flags: [bool; RANK_COUNT],
}

impl CompletedSets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag `rank` as completed. Returns false if it already was.
    pub fn mark(&mut self, rank: Rank) -> bool {
        !std::mem::replace(&mut self.flags[rank.index()], true)
    }

    #[must_use]
    pub fn is_completed(&self, rank: Rank) -> bool {
        self.flags[rank.index()]
    }

    /// Number of completed sets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    /// Completed ranks, ascending.
    pub fn ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        Rank::all().filter(|&rank| self.is_completed(rank))
    }

    #[must_use]
    pub fn flags(&self) -> [bool; RANK_COUNT] {
        self.flags
    }
}
