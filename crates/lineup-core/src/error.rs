use thiserror::Error;

use crate::model::Side;

/// Violations of the roster preconditions. Raised only while building a
/// [`Roster`](crate::model::Roster); evaluation itself cannot fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    #[error("{side} roster requires exactly 3 players but found {found}")]
    InvalidRosterSize { side: Side, found: usize },
    #[error("{side} roster lists player '{name}' more than once")]
    DuplicatePlayer { side: Side, name: String },
    #[error("player '{name}' has a non-finite rating")]
    NonFiniteRating { name: String },
    #[error("{side} selection index {index} is outside the pool of {pool} players")]
    SelectionOutOfRange {
        side: Side,
        index: usize,
        pool: usize,
    },
    #[error("{side} selection uses pool index {index} more than once")]
    DuplicateSelection { side: Side, index: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("elo factor must be finite and greater than zero, got {0}")]
    InvalidEloFactor(f64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid arrangement '{0}': expected a permutation such as 2-1-3")]
    Arrangement(String),
    #[error("invalid player spec '{0}': expected NAME=RATING")]
    PlayerSpec(String),
    #[error("invalid view '{0}': expected home:<arrangement> or away:<arrangement>")]
    View(String),
}
