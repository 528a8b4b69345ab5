use std::fs;
use std::path::Path;

use lineup_core::evaluator::SUB_MATCH_LABELS;
use lineup_core::view::{self, HeatmapRow, Matchup};
use lineup_core::{Analysis, MatchDetails, Roster, ViewSelection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Markdown summary of one analysis pass.
pub struct SummaryReport<'a> {
    run_id: &'a str,
    analysis: &'a Analysis,
    details: MatchDetails<'a>,
}

impl<'a> SummaryReport<'a> {
    pub fn new(run_id: &'a str, analysis: &'a Analysis, selection: ViewSelection) -> Self {
        Self {
            run_id,
            analysis,
            details: view::match_details(analysis, selection),
        }
    }

    pub fn details(&self) -> &MatchDetails<'a> {
        &self.details
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# Lineup Analysis: {}\n\n", self.run_id));
        out.push_str(&format!(
            "Elo factor: {}. A competition is won by taking at least 3 of 5 sub-matches.\n\n",
            self.analysis.model().factor()
        ));
        self.push_rosters(&mut out);
        self.push_strategies(&mut out);
        push_heatmap(&mut out, &view::heatmap(self.analysis));
        self.push_details(&mut out);
        out
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        fs::write(path.as_ref(), self.render()).map_err(|e| ReportError::Io {
            context: "writing summary markdown",
            source: e,
        })
    }

    fn push_rosters(&self, out: &mut String) {
        let home = self.analysis.home();
        let away = self.analysis.away();
        out.push_str("## Rosters\n\n");
        out.push_str("| Rank | Home | Rating | Away | Rating |\n");
        out.push_str("|------|------|--------|------|--------|\n");
        for (rank, (h, a)) in home.players().iter().zip(away.players()).enumerate() {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                rank + 1,
                h.name(),
                h.rating(),
                a.name(),
                a.rating()
            ));
        }
        out.push('\n');
    }

    fn push_strategies(&self, out: &mut String) {
        let lineups = self.analysis.lineups();
        out.push_str("## Recommended Lineups\n\n");
        for strategy in self.analysis.strategies().iter() {
            out.push_str(&format!("### {}\n\n", strategy.title()));
            if let Some(lineup) = strategy.lineup(lineups) {
                out.push_str(&format!(
                    "- Lineup {}: {}\n",
                    strategy.arrangement,
                    slot_names(lineup.players())
                ));
            }
            out.push_str(&format!("- {}\n", strategy.description()));
            if let Some(opponent) = strategy.opponent(lineups) {
                out.push_str(&format!(
                    "- Focus opponent {}: {} ({})\n",
                    opponent.arrangement,
                    slot_names(&opponent.players),
                    percent(opponent.win_probability)
                ));
            }
            out.push('\n');
        }
    }

    fn push_details(&self, out: &mut String) {
        let details = &self.details;
        out.push_str(&format!("## {}\n\n", details.title));
        if details.matchups.is_empty() {
            out.push_str("No matchups for this selection.\n");
            return;
        }

        out.push_str("| Home | Away |");
        for label in SUB_MATCH_LABELS {
            out.push_str(&format!(" {label} |"));
        }
        out.push_str(" Win | Note |\n");
        out.push_str("|------|------|");
        for _ in SUB_MATCH_LABELS {
            out.push_str("-----|");
        }
        out.push_str("-----|------|\n");

        for (index, matchup) in details.matchups.iter().enumerate() {
            let note = if details.best == Some(index) {
                "best"
            } else if details.worst == Some(index) {
                "worst"
            } else {
                ""
            };
            out.push_str(&matchup_row(matchup, note));
        }
    }
}

fn push_heatmap(out: &mut String, rows: &[HeatmapRow]) {
    out.push_str("## Win Probability Heatmap\n\n");
    out.push_str(
        "Rows are home lineups, columns away lineups. `M` marks the minimax focus, \
         `O` the ordered focus and `*` the averaged lineup.\n\n",
    );

    out.push_str("| Home \\ Away |");
    if let Some(first) = rows.first() {
        for cell in &first.cells {
            out.push_str(&format!(" {} |", cell.away));
        }
    }
    out.push_str("\n|-------------|");
    for _ in rows.first().map(|row| row.cells.as_slice()).unwrap_or_default() {
        out.push_str("-------|");
    }
    out.push('\n');

    for row in rows {
        let marker = if row.average_strategy { " *" } else { "" };
        out.push_str(&format!("| {}{marker} |", row.home));
        for cell in &row.cells {
            match cell.marker {
                Some(marker) => out.push_str(&format!(
                    " {} {} |",
                    percent(cell.win_probability),
                    marker.symbol()
                )),
                None => out.push_str(&format!(" {} |", percent(cell.win_probability))),
            }
        }
        out.push('\n');
    }
    out.push('\n');
}

fn matchup_row(matchup: &Matchup<'_>, note: &str) -> String {
    let mut row = format!(
        "| {} {} | {} {} |",
        matchup.home_arrangement,
        slot_names(matchup.home_players),
        matchup.away_arrangement,
        slot_names(matchup.away_players)
    );
    for probability in matchup.match_probabilities {
        row.push_str(&format!(" {} |", percent(probability)));
    }
    row.push_str(&format!(" {} | {note} |\n", percent(matchup.win_probability)));
    row
}

fn slot_names(names: &[String]) -> String {
    names.join(" / ")
}

fn percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

/// One-line roster listing used in console output.
pub fn roster_line(roster: &Roster) -> String {
    roster
        .players()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineup_core::{EloModel, Side, Team};

    fn analysis() -> Analysis {
        let home = Team::with_defaults(Side::Home, Vec::new())
            .default_roster()
            .expect("home");
        let away = Team::with_defaults(Side::Away, Vec::new())
            .default_roster()
            .expect("away");
        Analysis::run(EloModel::default(), &home, &away)
    }

    #[test]
    fn renders_every_section() {
        let analysis = analysis();
        let report = SummaryReport::new("demo", &analysis, ViewSelection::initial(&analysis));
        let markdown = report.render();

        assert!(markdown.starts_with("# Lineup Analysis: demo\n"));
        assert!(markdown.contains("## Rosters"));
        assert!(markdown.contains("### Minimax"));
        assert!(markdown.contains("### Opponents 1-2-3"));
        assert!(markdown.contains("### Opponents averaged"));
        assert!(markdown.contains("Guarantees at least 28.0% win probability"));
        assert!(markdown.contains("## Win Probability Heatmap"));
        assert!(markdown.contains("| 1-2-3 * |"));
        assert!(markdown.contains("## Home Team 1-3-2 vs All Away Permutations"));
    }

    #[test]
    fn heatmap_has_one_line_per_lineup() {
        let analysis = analysis();
        let mut out = String::new();
        push_heatmap(&mut out, &view::heatmap(&analysis));
        let body: Vec<&str> = out
            .lines()
            .filter(|line| line.starts_with("| ") && !line.starts_with("| Home"))
            .collect();
        assert_eq!(body.len(), 6);
        assert_eq!(out.matches(" M |").count(), 1);
    }

    #[test]
    fn details_table_marks_best_and_worst() {
        let analysis = analysis();
        let selection: ViewSelection = "away:1-2-3".parse().expect("view");
        let report = SummaryReport::new("demo", &analysis, selection);
        let markdown = report.render();

        assert!(markdown.contains("## All Home Permutations vs Away Team 1-2-3"));
        assert_eq!(markdown.matches("| best |").count(), 1);
        assert_eq!(markdown.matches("| worst |").count(), 1);
        assert_eq!(report.details().matchups.len(), 6);
    }

    #[test]
    fn roster_line_lists_players() {
        let roster = Team::with_defaults(Side::Away, Vec::new())
            .default_roster()
            .expect("away");
        assert_eq!(
            roster_line(&roster),
            "Player 1 (1550), Player 2 (1450), Player 3 (1350)"
        );
    }
}
