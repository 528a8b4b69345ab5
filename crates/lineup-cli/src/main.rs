use std::path::PathBuf;

use clap::Parser;

use lineup_cli::config::{LineupConfig, ResolvedOutputs};
use lineup_cli::logging::init_logging;
use lineup_cli::report::roster_line;
use lineup_cli::runner::AnalysisRunner;
use lineup_core::{AppInfo, Player, ViewSelection};

/// Lineup analysis harness for three-player team competitions.
#[derive(Debug, Parser)]
#[command(
    name = "lineup",
    author,
    version,
    about = "Recommends batting orders for a 3-player, 5-sub-match team competition"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config/lineup.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the Elo scale factor.
    #[arg(long, value_name = "FACTOR")]
    elo_factor: Option<f64>,

    /// Replace the home pool; repeat once per player.
    #[arg(long = "home", value_name = "NAME=RATING")]
    home: Vec<Player>,

    /// Replace the away pool; repeat once per player.
    #[arg(long = "away", value_name = "NAME=RATING")]
    away: Vec<Player>,

    /// Result slice for the summary, e.g. home:1-3-2 or away:2-1-3.
    #[arg(long, value_name = "VIEW")]
    view: Option<ViewSelection>,

    /// Exit after validating the configuration (no analysis is run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = LineupConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(factor) = cli.elo_factor {
        config.calculation.elo_factor = factor;
    }

    if !cli.home.is_empty() {
        config.home.players = cli.home;
        config.home.selection = None;
    }

    if !cli.away.is_empty() {
        config.away.players = cli.away;
        config.away.selection = None;
    }

    if let Some(view) = cli.view {
        config.view = Some(view.to_string());
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let elo_factor = config.calculation.elo_factor;

    println!(
        "{} ({}) loaded configuration '{run_id}' (Elo factor {elo_factor})",
        AppInfo::name(),
        AppInfo::codename()
    );

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = AnalysisRunner::new(config, outputs)?;
    println!("Home: {}", roster_line(runner.home()));
    println!("Away: {}", roster_line(runner.away()));

    if cli.validate_only {
        println!("Validation-only mode: analysis skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    for strategy in summary.strategies.iter() {
        println!(
            "{:<20} {}  {}",
            strategy.title(),
            strategy.arrangement,
            strategy.description()
        );
    }
    println!(
        "Analysis complete for '{run_id}': {} rows at {}",
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Snapshot: {}", summary.analysis_path.display());
    println!(
        "Summary ({}): {}",
        summary.view,
        summary.summary_path.display()
    );
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
