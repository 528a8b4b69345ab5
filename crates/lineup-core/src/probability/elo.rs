use serde::Serialize;

use crate::error::ModelError;

/// Rating gap that turns into 10:1 odds.
pub const DEFAULT_ELO_FACTOR: f64 = 200.0;

/// Smallest probability the model reports. `1.0 - PROBABILITY_FLOOR` is exact
/// in f64, so clamped pairs still sum to one.
pub const PROBABILITY_FLOOR: f64 = f64::EPSILON;

/// Logistic expected-score model: `1 / (1 + 10^((opponent - rating) / factor))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EloModel {
    factor: f64,
}

impl EloModel {
    pub fn new(factor: f64) -> Result<Self, ModelError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ModelError::InvalidEloFactor(factor));
        }
        Ok(Self { factor })
    }

    pub const fn factor(&self) -> f64 {
        self.factor
    }

    /// Probability that a player rated `rating` beats one rated `opponent`.
    /// Strictly inside (0, 1) for any input. A gap that cannot be ordered
    /// (equal infinities or a NaN rating) scores as a coin flip.
    pub fn probability(&self, rating: f64, opponent: f64) -> f64 {
        let exponent = (opponent - rating) / self.factor;
        if exponent.is_nan() {
            return 0.5;
        }
        let raw = 1.0 / (1.0 + 10f64.powf(exponent));
        raw.clamp(PROBABILITY_FLOOR, 1.0 - PROBABILITY_FLOOR)
    }
}

impl Default for EloModel {
    fn default() -> Self {
        Self {
            factor: DEFAULT_ELO_FACTOR,
        }
    }
}
