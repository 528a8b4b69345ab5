use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    rating: f64,
}

impl Player {
    pub fn new(name: impl Into<String>, rating: f64) -> Self {
        Self {
            name: name.into(),
            rating,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn rating(&self) -> f64 {
        self.rating
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.rating)
    }
}

/// Parses `NAME=RATING`. The split happens at the last `=`, so names may
/// contain `=` themselves.
impl FromStr for Player {
    type Err = ParseError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::PlayerSpec(spec.to_string());

        let (name, rating) = spec.rsplit_once('=').ok_or_else(invalid)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid());
        }

        let rating: f64 = rating.trim().parse().map_err(|_| invalid())?;
        if !rating.is_finite() {
            return Err(invalid());
        }

        Ok(Player::new(name, rating))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_rating() {
        assert_eq!(Player::new("Ada", 1500.0).to_string(), "Ada (1500)");
        assert_eq!(Player::new("Bo", 1432.5).to_string(), "Bo (1432.5)");
    }

    #[test]
    fn parses_name_and_rating() {
        let player: Player = "Ada Lovelace=1523".parse().unwrap();
        assert_eq!(player.name(), "Ada Lovelace");
        assert_eq!(player.rating(), 1523.0);
    }

    #[test]
    fn splits_on_last_equals_sign() {
        let player: Player = "a=b = 1400.5".parse().unwrap();
        assert_eq!(player.name(), "a=b");
        assert_eq!(player.rating(), 1400.5);
    }

    #[test]
    fn rejects_malformed_specs() {
        for spec in ["Ada", "=1500", "Ada=", "Ada=fast", "Ada=inf", "Ada=NaN"] {
            assert_eq!(
                spec.parse::<Player>(),
                Err(ParseError::PlayerSpec(spec.to_string())),
                "{spec} should be rejected"
            );
        }
    }
}
