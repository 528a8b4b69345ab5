use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use lineup_core::{
    Analysis, Arrangement, EloModel, ModelError, Roster, RosterError, Strategies, ViewSelection,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{LineupConfig, ResolvedOutputs};
use crate::logging::telemetry_path;
use crate::report::{ReportError, SummaryReport};

/// Runs one analysis pass and writes its artifacts.
pub struct AnalysisRunner {
    config: LineupConfig,
    outputs: ResolvedOutputs,
    model: EloModel,
    home: Roster,
    away: Roster,
    view: Option<ViewSelection>,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub rows_written: usize,
    pub strategies: Strategies,
    pub view: ViewSelection,
    pub jsonl_path: PathBuf,
    pub analysis_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
}

impl AnalysisRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: LineupConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let model = config.elo_model()?;
        let (home, away) = config.rosters()?;
        let view = config
            .view_selection()
            .map_err(|err| RunnerError::View {
                message: err.to_string(),
            })?;

        Ok(Self {
            config,
            outputs,
            model,
            home,
            away,
            view,
        })
    }

    pub fn home(&self) -> &Roster {
        &self.home
    }

    pub fn away(&self) -> &Roster {
        &self.away
    }

    pub fn analysis(&self) -> Analysis {
        Analysis::run(self.model, &self.home, &self.away)
    }

    /// Execute the pass, writing the matchup log, the snapshot and the summary.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.analysis_json.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let analysis = self.analysis();
        let view = self
            .view
            .unwrap_or_else(|| ViewSelection::initial(&analysis));

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let rows_written = write_matchup_rows(&mut writer, &self.config.run_id, &analysis)?;
        writer.flush()?;

        fs::write(&self.outputs.analysis_json, analysis.to_json()?)?;

        let report = SummaryReport::new(&self.config.run_id, &analysis, view);
        report.write_markdown(&self.outputs.summary_md)?;

        let strategies = *analysis.strategies();
        event!(
            target: "lineup_cli::runner",
            Level::INFO,
            run_id = %self.config.run_id,
            rows_written,
            view = %view,
            minimax = %strategies.minimax.arrangement,
            ordered = %strategies.ordered.arrangement,
            average = %strategies.average.arrangement,
        );

        let telemetry_path = self
            .config
            .logging
            .enable_structured
            .then(|| telemetry_path(&self.outputs));

        Ok(RunSummary {
            rows_written,
            strategies,
            view,
            jsonl_path: self.outputs.jsonl.clone(),
            analysis_path: self.outputs.analysis_json.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path,
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_matchup_rows(
    writer: &mut impl Write,
    run_id: &str,
    analysis: &Analysis,
) -> Result<usize, RunnerError> {
    let strategies = analysis.strategies();
    let mut rows_written = 0usize;

    for (home_index, lineup) in analysis.lineups().iter().enumerate() {
        for (away_index, opponent) in lineup.opponents().iter().enumerate() {
            let row = MatchupLogRow {
                run_id,
                home: lineup.arrangement(),
                away: opponent.arrangement,
                home_players: lineup.players(),
                away_players: &opponent.players,
                match_probabilities: opponent.match_probabilities,
                win_probability: opponent.win_probability,
                minimax_focus: home_index == strategies.minimax.lineup_index
                    && away_index == strategies.minimax.opponent_index,
                ordered_focus: home_index == strategies.ordered.lineup_index
                    && away_index == strategies.ordered.opponent_index,
            };

            serde_json::to_writer(&mut *writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;
        }
    }

    Ok(rows_written)
}

#[derive(Serialize)]
struct MatchupLogRow<'a> {
    run_id: &'a str,
    home: Arrangement,
    away: Arrangement,
    home_players: &'a [String; 3],
    away_players: &'a [String; 3],
    match_probabilities: [f64; 5],
    win_probability: f64,
    minimax_focus: bool,
    ordered_focus: bool,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize output: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("roster error: {0}")]
    Roster(#[from] RosterError),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
    #[error("invalid view: {message}")]
    View { message: String },
    #[error("report error: {0}")]
    Report(#[from] ReportError),
}
