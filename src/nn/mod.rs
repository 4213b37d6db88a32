//! Model-facing encodings.
//!
//! ## Overview
//!
//! - **Traits**: `ObservationEncoder`, producing an `EncodedState`
//! - **Encoders**: `OneHotEncoder` (180 features), `CompactEncoder` (21)
//! - **Selection**: `EncoderKind`, stored alongside saved model weights
//!
//! ## Usage
//!
//! ```rust
//! use go_fish::env::GoFishEnv;
//! use go_fish::nn::{ObservationEncoder, OneHotEncoder};
//!
//! let env = GoFishEnv::with_seed(42);
//! let encoded = OneHotEncoder.encode(&env.observation());
//! assert_eq!(encoded.len(), 180);
//! ```

pub mod encoder;
pub mod traits;

pub use encoder::{CompactEncoder, EncoderKind, OneHotEncoder};
pub use traits::{EncodedState, ObservationEncoder};
