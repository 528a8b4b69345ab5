//! Picks the recommended home lineups from an evaluated result table.
//!
//! Every scan runs left to right in canonical order and only replaces the
//! current pick on a strictly greater score, so ties go to the earlier
//! arrangement.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::combinatorics::LINEUP_PERMUTATIONS;
use crate::evaluator::{LineupResult, Opponent};
use crate::model::Arrangement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Maximize the worst-case win probability.
    Minimax,
    /// Maximize the win probability against the `"1-2-3"` opponent.
    Ordered,
    /// Maximize the mean win probability over all opponents.
    Average,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Minimax,
        StrategyKind::Ordered,
        StrategyKind::Average,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Minimax => "minimax",
            StrategyKind::Ordered => "ordered",
            StrategyKind::Average => "average",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            StrategyKind::Minimax => "Minimax",
            StrategyKind::Ordered => "Opponents 1-2-3",
            StrategyKind::Average => "Opponents averaged",
        }
    }

    /// The figure this strategy maximizes.
    pub fn score(self, lineup: &LineupResult) -> f64 {
        match self {
            StrategyKind::Minimax => lineup.worst_case_probability(),
            StrategyKind::Ordered => lineup.ordered_probability(),
            StrategyKind::Average => lineup.average_probability(),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recommended home lineup plus the opponent it is judged against.
///
/// The focus opponent is the worst case for minimax, `"1-2-3"` for ordered,
/// and the representative opponent for average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Strategy {
    pub kind: StrategyKind,
    /// Index into the canonical lineup table.
    pub lineup_index: usize,
    pub arrangement: Arrangement,
    /// Index into the chosen lineup's opponents.
    pub opponent_index: usize,
    pub opponent_arrangement: Arrangement,
    /// The maximized figure: worst case, ordered, or mean probability.
    pub probability: f64,
}

impl Strategy {
    fn new(
        kind: StrategyKind,
        lineups: &[LineupResult; LINEUP_PERMUTATIONS],
        lineup_index: usize,
        opponent_index: usize,
    ) -> Self {
        let lineup = &lineups[lineup_index];
        Self {
            kind,
            lineup_index,
            arrangement: lineup.arrangement(),
            opponent_index,
            opponent_arrangement: lineup.opponents()[opponent_index].arrangement,
            probability: kind.score(lineup),
        }
    }

    pub fn lineup<'a>(&self, lineups: &'a [LineupResult]) -> Option<&'a LineupResult> {
        lineups.get(self.lineup_index)
    }

    pub fn opponent<'a>(&self, lineups: &'a [LineupResult]) -> Option<&'a Opponent> {
        self.lineup(lineups)
            .and_then(|lineup| lineup.opponents().get(self.opponent_index))
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn description(&self) -> String {
        let percent = self.probability * 100.0;
        match self.kind {
            StrategyKind::Minimax => {
                format!("Guarantees at least {percent:.1}% win probability")
            }
            StrategyKind::Ordered => format!(
                "Achieves {percent:.1}% win probability against rank-ordered opponent"
            ),
            StrategyKind::Average => format!(
                "Average {percent:.1}% win probability across all opponent permutations"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Strategies {
    pub minimax: Strategy,
    pub ordered: Strategy,
    pub average: Strategy,
}

impl Strategies {
    pub const fn get(&self, kind: StrategyKind) -> &Strategy {
        match kind {
            StrategyKind::Minimax => &self.minimax,
            StrategyKind::Ordered => &self.ordered,
            StrategyKind::Average => &self.average,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Strategy> {
        StrategyKind::ALL.into_iter().map(|kind| self.get(kind))
    }
}

pub struct StrategySelector;

impl StrategySelector {
    pub fn select(lineups: &[LineupResult; LINEUP_PERMUTATIONS]) -> Strategies {
        let minimax = first_maximum(lineups, StrategyKind::Minimax);
        let ordered = first_maximum(lineups, StrategyKind::Ordered);
        let average = first_maximum(lineups, StrategyKind::Average);

        Strategies {
            minimax: Strategy::new(
                StrategyKind::Minimax,
                lineups,
                minimax,
                lineups[minimax].worst_case_index(),
            ),
            ordered: Strategy::new(
                StrategyKind::Ordered,
                lineups,
                ordered,
                lineups[ordered].ordered_index(),
            ),
            average: Strategy::new(
                StrategyKind::Average,
                lineups,
                average,
                representative_opponent(&lineups[average]),
            ),
        }
    }
}

fn first_maximum(lineups: &[LineupResult], kind: StrategyKind) -> usize {
    let mut best = 0;
    for (index, lineup) in lineups.iter().enumerate().skip(1) {
        if kind.score(lineup) > kind.score(&lineups[best]) {
            best = index;
        }
    }
    best
}

/// Opponent whose win probability is closest to the lineup's mean; the first
/// one wins ties.
pub fn representative_opponent(lineup: &LineupResult) -> usize {
    let mean = lineup.average_probability();
    let distance = |opponent: &Opponent| (opponent.win_probability - mean).abs();

    let opponents = lineup.opponents();
    let mut closest = 0;
    for (index, opponent) in opponents.iter().enumerate().skip(1) {
        if distance(opponent) < distance(&opponents[closest]) {
            closest = index;
        }
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::LineupEvaluator;
    use crate::model::{Player, Roster, Side};

    fn evaluate(home: [f64; 3], away: [f64; 3]) -> [LineupResult; LINEUP_PERMUTATIONS] {
        let build = |side: Side, ratings: [f64; 3]| {
            let players = ratings
                .iter()
                .enumerate()
                .map(|(i, r)| Player::new(format!("{side}{i}"), *r))
                .collect();
            Roster::new(side, players).unwrap()
        };
        LineupEvaluator::default().evaluate(&build(Side::Home, home), &build(Side::Away, away))
    }

    #[test]
    fn minimax_is_max_min() {
        let lineups = evaluate([1620.0, 1480.0, 1310.0], [1500.0, 1490.0, 1400.0]);
        let strategies = StrategySelector::select(&lineups);
        let chosen = &lineups[strategies.minimax.lineup_index];
        for lineup in lineups.iter() {
            assert!(chosen.worst_case_probability() >= lineup.worst_case_probability());
        }
        assert_eq!(
            strategies.minimax.opponent_index,
            chosen.worst_case_index()
        );
    }

    #[test]
    fn ordered_focuses_on_canonical_opponent() {
        let lineups = evaluate([1500.0, 1400.0, 1300.0], [1550.0, 1450.0, 1350.0]);
        let strategies = StrategySelector::select(&lineups);
        assert!(strategies.ordered.opponent_arrangement.is_canonical());
        for lineup in lineups.iter() {
            assert!(strategies.ordered.probability >= lineup.ordered_probability());
        }
    }

    #[test]
    fn average_representative_is_closest_to_mean() {
        let lineups = evaluate([1700.0, 1350.0, 1340.0], [1600.0, 1500.0, 1200.0]);
        let strategies = StrategySelector::select(&lineups);
        let lineup = strategies.average.lineup(&lineups).unwrap();
        let mean = lineup.average_probability();
        let chosen = strategies.average.opponent(&lineups).unwrap();
        for opponent in lineup.opponents() {
            assert!(
                (chosen.win_probability - mean).abs() <= (opponent.win_probability - mean).abs()
            );
        }
    }

    #[test]
    fn ties_resolve_to_first_arrangement() {
        let lineups = evaluate([1400.0, 1400.0, 1400.0], [1400.0, 1400.0, 1400.0]);
        let strategies = StrategySelector::select(&lineups);
        for strategy in strategies.iter() {
            assert_eq!(strategy.lineup_index, 0);
            assert!(strategy.arrangement.is_canonical());
        }
        assert_eq!(strategies.average.opponent_index, 0);
        assert_eq!(strategies.minimax.opponent_index, 0);
    }

    #[test]
    fn descriptions_use_one_decimal() {
        let lineups = evaluate([1500.0, 1400.0, 1300.0], [1550.0, 1450.0, 1350.0]);
        let strategies = StrategySelector::select(&lineups);
        assert_eq!(
            strategies.minimax.description(),
            "Guarantees at least 28.0% win probability"
        );
        assert_eq!(strategies.get(StrategyKind::Ordered).title(), "Opponents 1-2-3");
        assert!(
            strategies
                .average
                .description()
                .starts_with("Average 31.8% win probability")
        );
    }

    #[test]
    fn strategies_iterate_in_kind_order() {
        let lineups = evaluate([1500.0, 1400.0, 1300.0], [1550.0, 1450.0, 1350.0]);
        let kinds: Vec<StrategyKind> = StrategySelector::select(&lineups)
            .iter()
            .map(|s| s.kind)
            .collect();
        assert_eq!(kinds, StrategyKind::ALL);
    }
}
