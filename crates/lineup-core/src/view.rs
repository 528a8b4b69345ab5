//! Read-only projections of an [`Analysis`] for presentation layers.
//!
//! The currently displayed row or column is a [`ViewSelection`] owned by the
//! caller and passed in explicitly; nothing here mutates the analysis.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::analysis::Analysis;
use crate::combinatorics::{LINEUP_PERMUTATIONS, LINEUP_SIZE};
use crate::error::ParseError;
use crate::model::Arrangement;
use crate::probability::SUB_MATCHES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "arrangement", rename_all = "snake_case")]
pub enum ViewSelection {
    /// One home lineup against every away arrangement.
    HomeRow(Arrangement),
    /// Every home lineup against one away arrangement.
    AwayColumn(Arrangement),
}

impl ViewSelection {
    /// Starting view: the minimax lineup's row.
    pub fn initial(analysis: &Analysis) -> Self {
        ViewSelection::HomeRow(analysis.strategies().minimax.arrangement)
    }

    pub const fn arrangement(self) -> Arrangement {
        match self {
            ViewSelection::HomeRow(arrangement) | ViewSelection::AwayColumn(arrangement) => {
                arrangement
            }
        }
    }
}

impl fmt::Display for ViewSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewSelection::HomeRow(arrangement) => write!(f, "home:{arrangement}"),
            ViewSelection::AwayColumn(arrangement) => write!(f, "away:{arrangement}"),
        }
    }
}

impl FromStr for ViewSelection {
    type Err = ParseError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::View(spec.to_string());

        let (side, label) = spec.trim().split_once(':').ok_or_else(invalid)?;
        let arrangement: Arrangement = label.parse().map_err(|_| invalid())?;
        match side.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(ViewSelection::HomeRow(arrangement)),
            "away" => Ok(ViewSelection::AwayColumn(arrangement)),
            _ => Err(invalid()),
        }
    }
}

/// One cell of the result table with both sides' slot assignments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matchup<'a> {
    pub home_arrangement: Arrangement,
    pub away_arrangement: Arrangement,
    pub home_players: &'a [String; LINEUP_SIZE],
    pub away_players: &'a [String; LINEUP_SIZE],
    pub match_probabilities: [f64; SUB_MATCHES],
    pub win_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDetails<'a> {
    pub selection: ViewSelection,
    pub title: String,
    pub matchups: Vec<Matchup<'a>>,
    /// Index of the highest win probability; first wins ties.
    pub best: Option<usize>,
    /// Index of the lowest win probability; first wins ties.
    pub worst: Option<usize>,
}

pub fn match_details(analysis: &Analysis, selection: ViewSelection) -> MatchDetails<'_> {
    let (title, mut matchups) = match selection {
        ViewSelection::HomeRow(arrangement) => (
            format!("Home Team {arrangement} vs All Away Permutations"),
            home_row(analysis, arrangement),
        ),
        ViewSelection::AwayColumn(arrangement) => (
            format!("All Home Permutations vs Away Team {arrangement}"),
            away_column(analysis, arrangement),
        ),
    };

    match selection {
        ViewSelection::HomeRow(_) => matchups.sort_by_key(|m| m.away_arrangement),
        ViewSelection::AwayColumn(_) => matchups.sort_by_key(|m| m.home_arrangement),
    }

    let best = extreme_index(&matchups, |candidate, current| candidate > current);
    let worst = extreme_index(&matchups, |candidate, current| candidate < current);

    MatchDetails {
        selection,
        title,
        matchups,
        best,
        worst,
    }
}

fn home_row(analysis: &Analysis, arrangement: Arrangement) -> Vec<Matchup<'_>> {
    let Some(lineup) = analysis.lineup(arrangement) else {
        return Vec::new();
    };

    lineup
        .opponents()
        .iter()
        .map(|opponent| Matchup {
            home_arrangement: arrangement,
            away_arrangement: opponent.arrangement,
            home_players: lineup.players(),
            away_players: &opponent.players,
            match_probabilities: opponent.match_probabilities,
            win_probability: opponent.win_probability,
        })
        .collect()
}

fn away_column(analysis: &Analysis, arrangement: Arrangement) -> Vec<Matchup<'_>> {
    analysis
        .lineups()
        .iter()
        .filter_map(|lineup| {
            lineup.opponent(arrangement).map(|opponent| Matchup {
                home_arrangement: lineup.arrangement(),
                away_arrangement: arrangement,
                home_players: lineup.players(),
                away_players: &opponent.players,
                match_probabilities: opponent.match_probabilities,
                win_probability: opponent.win_probability,
            })
        })
        .collect()
}

fn extreme_index(matchups: &[Matchup<'_>], replaces: impl Fn(f64, f64) -> bool) -> Option<usize> {
    let first = matchups.first()?;
    let mut index = 0;
    let mut value = first.win_probability;
    for (candidate, matchup) in matchups.iter().enumerate().skip(1) {
        if replaces(matchup.win_probability, value) {
            index = candidate;
            value = matchup.win_probability;
        }
    }
    Some(index)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellMarker {
    /// The minimax lineup's guaranteed minimum.
    Minimax,
    /// The ordered lineup against `"1-2-3"`.
    Ordered,
}

impl CellMarker {
    pub const fn symbol(self) -> char {
        match self {
            CellMarker::Minimax => 'M',
            CellMarker::Ordered => 'O',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub away: Arrangement,
    pub win_probability: f64,
    pub marker: Option<CellMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapRow {
    pub home: Arrangement,
    /// Row chosen by the average strategy.
    pub average_strategy: bool,
    pub cells: [HeatmapCell; LINEUP_PERMUTATIONS],
}

/// Win probabilities for every home (row) and away (column) arrangement,
/// with the strategy focus cells marked. A cell that is both the minimax
/// and the ordered focus is marked minimax.
pub fn heatmap(analysis: &Analysis) -> [HeatmapRow; LINEUP_PERMUTATIONS] {
    let strategies = analysis.strategies();
    let minimax = strategies.minimax;
    let ordered = strategies.ordered;

    std::array::from_fn(|row| {
        let lineup = &analysis.lineups()[row];
        let cells = std::array::from_fn(|column| {
            let opponent = &lineup.opponents()[column];
            let marker = if row == minimax.lineup_index && column == minimax.opponent_index {
                Some(CellMarker::Minimax)
            } else if row == ordered.lineup_index && opponent.arrangement.is_canonical() {
                Some(CellMarker::Ordered)
            } else {
                None
            };
            HeatmapCell {
                away: opponent.arrangement,
                win_probability: opponent.win_probability,
                marker,
            }
        });

        HeatmapRow {
            home: lineup.arrangement(),
            average_strategy: row == strategies.average.lineup_index,
            cells,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Player, Roster, Side};
    use crate::probability::EloModel;

    fn analysis() -> Analysis {
        let home = Roster::new(
            Side::Home,
            vec![
                Player::new("Ada", 1500.0),
                Player::new("Bo", 1400.0),
                Player::new("Cy", 1300.0),
            ],
        )
        .unwrap();
        let away = Roster::new(
            Side::Away,
            vec![
                Player::new("Xi", 1550.0),
                Player::new("Yu", 1450.0),
                Player::new("Zed", 1350.0),
            ],
        )
        .unwrap();
        Analysis::run(EloModel::default(), &home, &away)
    }

    #[test]
    fn parses_and_displays_selection() {
        let selection: ViewSelection = "home:1-3-2".parse().unwrap();
        assert_eq!(selection, ViewSelection::HomeRow("1-3-2".parse().unwrap()));
        assert_eq!(selection.to_string(), "home:1-3-2");

        let column: ViewSelection = " AWAY:2-1-3".parse().unwrap();
        assert_eq!(column.to_string(), "away:2-1-3");

        for spec in ["1-2-3", "left:1-2-3", "home:1-2-2"] {
            assert_eq!(
                spec.parse::<ViewSelection>(),
                Err(ParseError::View(spec.to_string()))
            );
        }
    }

    #[test]
    fn initial_view_is_minimax_row() {
        let analysis = analysis();
        assert_eq!(
            ViewSelection::initial(&analysis),
            ViewSelection::HomeRow(analysis.strategies().minimax.arrangement)
        );
    }

    #[test]
    fn home_row_lists_every_opponent() {
        let analysis = analysis();
        let arrangement: Arrangement = "2-1-3".parse().unwrap();
        let details = match_details(&analysis, ViewSelection::HomeRow(arrangement));

        assert_eq!(details.title, "Home Team 2-1-3 vs All Away Permutations");
        assert_eq!(details.matchups.len(), 6);
        assert!(details.matchups.iter().all(|m| m.home_arrangement == arrangement));
        assert!(
            details
                .matchups
                .windows(2)
                .all(|pair| pair[0].away_arrangement < pair[1].away_arrangement)
        );
        assert_eq!(details.matchups[0].home_players, &["Bo", "Ada", "Cy"].map(String::from));

        let lineup = analysis.lineup(arrangement).unwrap();
        assert_eq!(details.worst, Some(lineup.worst_case_index()));
    }

    #[test]
    fn away_column_lists_every_lineup() {
        let analysis = analysis();
        let arrangement: Arrangement = "3-2-1".parse().unwrap();
        let details = match_details(&analysis, ViewSelection::AwayColumn(arrangement));

        assert_eq!(details.title, "All Home Permutations vs Away Team 3-2-1");
        let homes: Vec<Arrangement> = details.matchups.iter().map(|m| m.home_arrangement).collect();
        assert_eq!(homes, Arrangement::all());
        assert!(
            details
                .matchups
                .iter()
                .all(|m| m.away_players == &["Zed", "Yu", "Xi"].map(String::from))
        );

        let best = details.best.unwrap();
        let worst = details.worst.unwrap();
        for matchup in &details.matchups {
            assert!(details.matchups[best].win_probability >= matchup.win_probability);
            assert!(details.matchups[worst].win_probability <= matchup.win_probability);
        }
    }

    #[test]
    fn heatmap_marks_strategy_cells() {
        let analysis = analysis();
        let rows = heatmap(&analysis);
        let strategies = analysis.strategies();

        let minimax_cells: Vec<(usize, usize)> = marked(&rows, CellMarker::Minimax);
        assert_eq!(
            minimax_cells,
            [(strategies.minimax.lineup_index, strategies.minimax.opponent_index)]
        );

        let average_rows: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.average_strategy)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(average_rows, [strategies.average.lineup_index]);

        for (row, lineup) in rows.iter().zip(analysis.lineups()) {
            assert_eq!(row.home, lineup.arrangement());
            for (cell, opponent) in row.cells.iter().zip(lineup.opponents()) {
                assert_eq!(cell.win_probability, opponent.win_probability);
            }
        }
        assert_eq!(CellMarker::Minimax.symbol(), 'M');
    }

    fn marked(rows: &[HeatmapRow], marker: CellMarker) -> Vec<(usize, usize)> {
        let mut found = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.cells.iter().enumerate() {
                if cell.marker == Some(marker) {
                    found.push((r, c));
                }
            }
        }
        found
    }
}
