use serde::Serialize;

use super::{Player, Roster, Side};
use crate::combinatorics::LINEUP_SIZE;
use crate::error::RosterError;

/// A side's player pool, kept sorted by rating (strongest first).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    side: Side,
    players: Vec<Player>,
}

impl Team {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            players: Vec::new(),
        }
    }

    pub fn from_players(side: Side, players: Vec<Player>) -> Self {
        let mut team = Self { side, players };
        team.sort_by_rating();
        team
    }

    /// Builds a pool from `players`, padding it to a full roster.
    ///
    /// An empty input becomes `Player 1..3` at the side's default ratings.
    /// A short input is padded with `Default {n}` entries.
    pub fn with_defaults(side: Side, players: Vec<Player>) -> Self {
        let defaults = side.default_ratings();
        let mut team = Self { side, players };

        if team.players.is_empty() {
            for (index, rating) in defaults.iter().enumerate() {
                team.players
                    .push(Player::new(format!("Player {}", index + 1), *rating));
            }
        } else {
            while team.players.len() < LINEUP_SIZE {
                let number = team.players.len() + 1;
                let rating = defaults
                    .get(number - 1)
                    .copied()
                    .unwrap_or(defaults[0] - number as f64 * 100.0);
                team.players
                    .push(Player::new(format!("Default {number}"), rating));
            }
        }

        team.sort_by_rating();
        team
    }

    pub const fn side(&self) -> Side {
        self.side
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn add_player(&mut self, player: Player) {
        self.players.push(player);
        self.sort_by_rating();
    }

    /// Stable sort, strongest first; equal ratings keep insertion order.
    pub fn sort_by_rating(&mut self) {
        self.players
            .sort_by(|a, b| b.rating().total_cmp(&a.rating()));
    }

    pub fn top_players(&self, count: usize) -> &[Player] {
        &self.players[..count.min(self.players.len())]
    }

    /// Roster of the three strongest players in the pool.
    pub fn default_roster(&self) -> Result<Roster, RosterError> {
        Roster::new(self.side, self.top_players(LINEUP_SIZE).to_vec())
    }

    /// Roster built from three pool indices. The selected players are ordered
    /// strongest first regardless of the order of `indices`.
    pub fn select(&self, indices: [usize; LINEUP_SIZE]) -> Result<Roster, RosterError> {
        for (position, &index) in indices.iter().enumerate() {
            if index >= self.players.len() {
                return Err(RosterError::SelectionOutOfRange {
                    side: self.side,
                    index,
                    pool: self.players.len(),
                });
            }
            if indices[..position].contains(&index) {
                return Err(RosterError::DuplicateSelection {
                    side: self.side,
                    index,
                });
            }
        }

        let mut selected: Vec<Player> = indices
            .iter()
            .map(|&index| self.players[index].clone())
            .collect();
        selected.sort_by(|a, b| b.rating().total_cmp(&a.rating()));

        Roster::new(self.side, selected)
    }
}
