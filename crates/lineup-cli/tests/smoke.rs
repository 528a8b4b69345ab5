use std::fs;

use lineup_cli::config::LineupConfig;
use lineup_cli::runner::AnalysisRunner;
use tempfile::tempdir;

fn load_config(output_dir: &std::path::Path, view: &str) -> LineupConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
outputs:
  jsonl: "{jsonl}"
  analysis_json: "{analysis}"
  summary_md: "{summary}"
view: "{view}"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("nested/matchups.jsonl").display(),
        analysis = output_dir.join("analysis.json").display(),
        summary = output_dir.join("summary.md").display(),
    );

    let mut cfg: LineupConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

#[test]
fn default_rosters_write_all_artifacts() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), "away:2-1-3");
    let outputs = config.resolved_outputs();

    let runner = AnalysisRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("analysis completes");

    assert_eq!(summary.rows_written, 36);
    assert_eq!(summary.view.to_string(), "away:2-1-3");
    assert_eq!(summary.strategies.minimax.arrangement.to_string(), "1-3-2");
    assert_eq!(summary.strategies.average.arrangement.to_string(), "1-2-3");
    assert!(summary.telemetry_path.is_none());

    let jsonl = fs::read_to_string(&summary.jsonl_path).expect("jsonl readable");
    let rows: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes to JSON"))
        .collect();
    assert_eq!(rows.len(), 36);
    assert!(rows.iter().all(|row| row["run_id"] == "test_smoke"));
    let first = rows[0]["win_probability"].as_f64().expect("win probability");
    assert!((first - 0.26212673356585825).abs() < 1e-12);

    let snapshot = fs::read_to_string(&summary.analysis_path).expect("snapshot readable");
    let snapshot: serde_json::Value = serde_json::from_str(&snapshot).expect("snapshot is JSON");
    assert_eq!(snapshot["strategies"]["ordered"]["arrangement"], "1-3-2");
    assert_eq!(snapshot["home"]["players"][0]["name"], "Player 1");

    let markdown = fs::read_to_string(&summary.summary_path).expect("summary readable");
    assert!(markdown.contains("# Lineup Analysis: test_smoke"));
    assert!(markdown.contains("## All Home Permutations vs Away Team 2-1-3"));
}

#[test]
fn missing_view_defaults_to_minimax_row() {
    let dir = tempdir().expect("temp dir");
    let mut config = load_config(dir.path(), "home:1-2-3");
    config.view = None;
    let outputs = config.resolved_outputs();

    let summary = AnalysisRunner::new(config, outputs)
        .expect("runner created")
        .run()
        .expect("analysis completes");
    assert_eq!(summary.view.to_string(), "home:1-3-2");
}

#[test]
fn config_file_errors_report_their_path() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "run_id: [unterminated").expect("write config");

    let err = LineupConfig::from_path(&path).expect_err("parse failure");
    assert_eq!(err.path(), path.as_path());
    assert!(err.to_string().starts_with("failed to parse config"));
}
