//! Card containers: the draw pile, hands, and retired sets.
//!
//! ## Key Types
//!
//! - `Deck`: ordered stack of ranks, drawn from the top
//! - `Hand`: per-rank counts held by one seat
//! - `CompletedSets`: per-rank flags for sets a seat has retired
//!
//! A card is fully described by its `Rank`; suits are not modeled.

pub mod deck;
pub mod hand;
pub mod sets;

pub use deck::Deck;
pub use hand::Hand;
pub use sets::CompletedSets;
