use serde::Serialize;

use super::{Player, Side};
use crate::combinatorics::LINEUP_SIZE;
use crate::error::RosterError;

/// Exactly three distinct, finitely rated players for one side.
///
/// Player order is preserved as supplied; arrangement labels are relative to
/// it. [`Team::select`](super::Team::select) supplies players strongest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roster {
    side: Side,
    players: [Player; LINEUP_SIZE],
}

impl Roster {
    pub fn new(side: Side, players: Vec<Player>) -> Result<Self, RosterError> {
        let found = players.len();
        let players: [Player; LINEUP_SIZE] = players
            .try_into()
            .map_err(|_| RosterError::InvalidRosterSize { side, found })?;

        if let Some(player) = players.iter().find(|p| !p.rating().is_finite()) {
            return Err(RosterError::NonFiniteRating {
                name: player.name().to_string(),
            });
        }

        for (index, player) in players.iter().enumerate() {
            if players[..index].iter().any(|p| p.name() == player.name()) {
                return Err(RosterError::DuplicatePlayer {
                    side,
                    name: player.name().to_string(),
                });
            }
        }

        Ok(Self { side, players })
    }

    pub const fn side(&self) -> Side {
        self.side
    }

    pub fn players(&self) -> &[Player; LINEUP_SIZE] {
        &self.players
    }

    pub fn ratings(&self) -> [f64; LINEUP_SIZE] {
        self.players.each_ref().map(Player::rating)
    }

    pub fn names(&self) -> [&str; LINEUP_SIZE] {
        self.players.each_ref().map(Player::name)
    }
}
