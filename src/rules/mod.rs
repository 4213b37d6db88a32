//! Go Fish rules.
//!
//! `engine` holds the resolution primitives (ask transfer, set
//! detection, draws, empty-hand recovery). `turn` sequences them into a
//! single ask as the turn controller sees it.
//!
//! Both environment modes drive the game exclusively through these
//! functions, so legality and card movement are defined in one place.

pub mod engine;
pub mod turn;

pub use engine::{
    check_ask, check_empty_hands, deal_initial, detect_sets, draw_card, illegal_reason, is_terminal,
    refresh_terminal, resolve_ask, update_sets, AskOutcome,
};
pub use turn::{play_ask, TurnReport};
