use core::fmt;
use serde::{Deserialize, Serialize};

use crate::combinatorics::LINEUP_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    /// Lineup slot names, strongest slot first.
    pub const fn slot_labels(self) -> [&'static str; LINEUP_SIZE] {
        match self {
            Side::Home => ["A", "B", "C"],
            Side::Away => ["X", "Y", "Z"],
        }
    }

    /// Ratings used when a pool has to be filled with placeholder players.
    pub const fn default_ratings(self) -> [f64; LINEUP_SIZE] {
        match self {
            Side::Home => [1500.0, 1400.0, 1300.0],
            Side::Away => [1550.0, 1450.0, 1350.0],
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
