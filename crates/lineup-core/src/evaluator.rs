//! Evaluates every home lineup against every away lineup.
//!
//! Pairing template, home slots `A,B,C` against away slots `X,Y,Z`:
//! `A-Y`, `B-X`, `C-Z`, `A-X`, then a doubles proxy pitting the mean of
//! `B,C` against the mean of `Y,Z`.

use serde::Serialize;
use tracing::{Level, event};

use crate::combinatorics::{LINEUP_PERMUTATIONS, LINEUP_SIZE};
use crate::model::{Arrangement, Roster};
use crate::probability::outcome::competition_win_probability;
use crate::probability::{EloModel, SUB_MATCHES};

/// Sub-match labels in template order.
pub const SUB_MATCH_LABELS: [&str; SUB_MATCHES] = ["A-Y", "B-X", "C-Z", "A-X", "BC-YZ"];

/// One away arrangement's result against a fixed home lineup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opponent {
    pub arrangement: Arrangement,
    /// Away player names in `X, Y, Z` order.
    pub players: [String; LINEUP_SIZE],
    /// Home win probability per sub-match, in [`SUB_MATCH_LABELS`] order.
    pub match_probabilities: [f64; SUB_MATCHES],
    /// Probability of winning at least three sub-matches.
    pub win_probability: f64,
}

/// One home arrangement evaluated against all six away arrangements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupResult {
    arrangement: Arrangement,
    players: [String; LINEUP_SIZE],
    opponents: [Opponent; LINEUP_PERMUTATIONS],
    worst_case_probability: f64,
    worst_case_index: usize,
    ordered_probability: f64,
    ordered_index: usize,
    average_probability: f64,
}

impl LineupResult {
    fn from_opponents(
        arrangement: Arrangement,
        players: [String; LINEUP_SIZE],
        opponents: [Opponent; LINEUP_PERMUTATIONS],
    ) -> Self {
        let mut worst_case_probability = f64::INFINITY;
        let mut worst_case_index = 0;
        let mut ordered_probability = 0.0;
        let mut ordered_index = 0;
        let mut total = 0.0;

        for (index, opponent) in opponents.iter().enumerate() {
            // Strict comparison keeps the first minimum in canonical order.
            if opponent.win_probability < worst_case_probability {
                worst_case_probability = opponent.win_probability;
                worst_case_index = index;
            }
            if opponent.arrangement.is_canonical() {
                ordered_probability = opponent.win_probability;
                ordered_index = index;
            }
            total += opponent.win_probability;
        }

        Self {
            arrangement,
            players,
            opponents,
            worst_case_probability,
            worst_case_index,
            ordered_probability,
            ordered_index,
            average_probability: total / LINEUP_PERMUTATIONS as f64,
        }
    }

    pub const fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    /// Home player names in `A, B, C` order.
    pub fn players(&self) -> &[String; LINEUP_SIZE] {
        &self.players
    }

    /// Results against every away arrangement, in canonical order.
    pub fn opponents(&self) -> &[Opponent; LINEUP_PERMUTATIONS] {
        &self.opponents
    }

    pub fn opponent(&self, arrangement: Arrangement) -> Option<&Opponent> {
        self.opponents
            .iter()
            .find(|opponent| opponent.arrangement == arrangement)
    }

    pub const fn worst_case_probability(&self) -> f64 {
        self.worst_case_probability
    }

    pub const fn worst_case_index(&self) -> usize {
        self.worst_case_index
    }

    pub fn worst_case_opponent(&self) -> &Opponent {
        &self.opponents[self.worst_case_index]
    }

    /// Win probability against the rank-ordered `"1-2-3"` opponent.
    pub const fn ordered_probability(&self) -> f64 {
        self.ordered_probability
    }

    pub const fn ordered_index(&self) -> usize {
        self.ordered_index
    }

    pub fn ordered_opponent(&self) -> &Opponent {
        &self.opponents[self.ordered_index]
    }

    pub const fn average_probability(&self) -> f64 {
        self.average_probability
    }
}

/// Builds the full 6×6 result table for two rosters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineupEvaluator {
    model: EloModel,
}

impl LineupEvaluator {
    pub const fn new(model: EloModel) -> Self {
        Self { model }
    }

    pub const fn model(&self) -> EloModel {
        self.model
    }

    /// Evaluates every home arrangement in canonical order.
    pub fn evaluate(&self, home: &Roster, away: &Roster) -> [LineupResult; LINEUP_PERMUTATIONS] {
        let arrangements = Arrangement::all();
        arrangements.map(|arrangement| self.evaluate_lineup(home, arrangement, away, arrangements))
    }

    /// Evaluates a single pairing of arrangements.
    pub fn matchup(
        &self,
        home: &Roster,
        home_arrangement: Arrangement,
        away: &Roster,
        away_arrangement: Arrangement,
    ) -> Opponent {
        let home_ratings = slot_ratings(home, home_arrangement);
        let away_ratings = slot_ratings(away, away_arrangement);
        let match_probabilities = self.sub_match_probabilities(&home_ratings, &away_ratings);

        Opponent {
            arrangement: away_arrangement,
            players: slot_names(away, away_arrangement),
            match_probabilities,
            win_probability: competition_win_probability(&match_probabilities),
        }
    }

    /// Home win probability for each sub-match, given slot ratings
    /// `[A, B, C]` and `[X, Y, Z]`. Pair means halve before adding so
    /// ratings near `f64::MAX` cannot overflow.
    pub fn sub_match_probabilities(
        &self,
        home: &[f64; LINEUP_SIZE],
        away: &[f64; LINEUP_SIZE],
    ) -> [f64; SUB_MATCHES] {
        let [a, b, c] = *home;
        let [x, y, z] = *away;
        [
            self.model.probability(a, y),
            self.model.probability(b, x),
            self.model.probability(c, z),
            self.model.probability(a, x),
            self.model.probability(b / 2.0 + c / 2.0, y / 2.0 + z / 2.0),
        ]
    }

    fn evaluate_lineup(
        &self,
        home: &Roster,
        home_arrangement: Arrangement,
        away: &Roster,
        arrangements: [Arrangement; LINEUP_PERMUTATIONS],
    ) -> LineupResult {
        let opponents = arrangements
            .map(|away_arrangement| self.matchup(home, home_arrangement, away, away_arrangement));
        let result = LineupResult::from_opponents(
            home_arrangement,
            slot_names(home, home_arrangement),
            opponents,
        );

        if tracing::enabled!(Level::DEBUG) {
            event!(
                target: "lineup_core::evaluator",
                Level::DEBUG,
                arrangement = %result.arrangement(),
                worst_case = result.worst_case_probability(),
                worst_case_opponent = %result.worst_case_opponent().arrangement,
                ordered = result.ordered_probability(),
                average = result.average_probability(),
            );
        }

        result
    }
}

fn slot_ratings(roster: &Roster, arrangement: Arrangement) -> [f64; LINEUP_SIZE] {
    let ratings = roster.ratings();
    arrangement.apply(&ratings).map(|rating| *rating)
}

fn slot_names(roster: &Roster, arrangement: Arrangement) -> [String; LINEUP_SIZE] {
    arrangement
        .apply(roster.players())
        .map(|player| player.name().to_string())
}
