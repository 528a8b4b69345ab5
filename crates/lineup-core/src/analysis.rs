use serde::Serialize;
use tracing::{Level, event};

use crate::combinatorics::LINEUP_PERMUTATIONS;
use crate::evaluator::{LineupEvaluator, LineupResult};
use crate::model::{Arrangement, Roster};
use crate::probability::EloModel;
use crate::strategy::{Strategies, StrategySelector};

/// Everything computed in one pass over two rosters. Rebuilt from scratch
/// whenever a roster or rating changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    model: EloModel,
    home: Roster,
    away: Roster,
    lineups: [LineupResult; LINEUP_PERMUTATIONS],
    strategies: Strategies,
}

impl Analysis {
    pub fn run(model: EloModel, home: &Roster, away: &Roster) -> Self {
        let lineups = LineupEvaluator::new(model).evaluate(home, away);
        let strategies = StrategySelector::select(&lineups);

        event!(
            target: "lineup_core::analysis",
            Level::INFO,
            elo_factor = model.factor(),
            minimax = %strategies.minimax.arrangement,
            minimax_probability = strategies.minimax.probability,
            ordered = %strategies.ordered.arrangement,
            ordered_probability = strategies.ordered.probability,
            average = %strategies.average.arrangement,
            average_probability = strategies.average.probability,
        );

        Self {
            model,
            home: home.clone(),
            away: away.clone(),
            lineups,
            strategies,
        }
    }

    pub const fn model(&self) -> EloModel {
        self.model
    }

    pub fn home(&self) -> &Roster {
        &self.home
    }

    pub fn away(&self) -> &Roster {
        &self.away
    }

    /// Home lineups in canonical order.
    pub fn lineups(&self) -> &[LineupResult; LINEUP_PERMUTATIONS] {
        &self.lineups
    }

    pub fn lineup(&self, arrangement: Arrangement) -> Option<&LineupResult> {
        self.lineups
            .iter()
            .find(|lineup| lineup.arrangement() == arrangement)
    }

    pub fn strategies(&self) -> &Strategies {
        &self.strategies
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
