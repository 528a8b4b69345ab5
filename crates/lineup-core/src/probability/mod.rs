//! Rating-to-probability mapping and best-of-n aggregation.
//!
//! - `elo`: logistic expected score for a single pairing.
//! - `outcome`: exact distribution of wins over independent, non-identical sub-matches.

mod elo;
pub mod outcome;

pub use elo::{DEFAULT_ELO_FACTOR, EloModel, PROBABILITY_FLOOR};
pub use outcome::{MAJORITY, SUB_MATCHES};
