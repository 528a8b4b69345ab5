use lineup_core::probability::DEFAULT_ELO_FACTOR;
use lineup_core::{
    EloModel, ModelError, ParseError, Player, Roster, RosterError, Side, Team, ViewSelection,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root analysis configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LineupConfig {
    pub run_id: String,
    #[serde(default)]
    pub calculation: CalculationConfig,
    #[serde(default)]
    pub home: TeamConfig,
    #[serde(default)]
    pub away: TeamConfig,
    pub outputs: OutputsConfig,
    /// Result table slice for the summary, e.g. `home:1-3-2`.
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LineupConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: LineupConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.calculation.validate()?;
        self.home.validate(Side::Home)?;
        self.away.validate(Side::Away)?;
        self.outputs.validate(&self.run_id)?;
        self.view_selection()
            .map_err(|err| ValidationError::InvalidField {
                field: "view".to_string(),
                message: err.to_string(),
            })?;
        self.logging.normalize();
        self.logging.validate()?;
        Ok(())
    }

    pub fn elo_model(&self) -> Result<EloModel, ModelError> {
        EloModel::new(self.calculation.elo_factor)
    }

    /// Rosters for both sides, home first.
    pub fn rosters(&self) -> Result<(Roster, Roster), RosterError> {
        Ok((self.home.roster(Side::Home)?, self.away.roster(Side::Away)?))
    }

    /// The configured view, if any. `None` means the minimax home row.
    pub fn view_selection(&self) -> Result<Option<ViewSelection>, ParseError> {
        self.view.as_deref().map(str::parse::<ViewSelection>).transpose()
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            analysis_json: resolve_template(&self.run_id, &self.outputs.analysis_json),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CalculationConfig {
    #[serde(default = "default_elo_factor")]
    pub elo_factor: f64,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            elo_factor: default_elo_factor(),
        }
    }
}

impl CalculationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        EloModel::new(self.elo_factor).map_err(|err| ValidationError::InvalidField {
            field: "calculation.elo_factor".to_string(),
            message: err.to_string(),
        })?;
        Ok(())
    }
}

fn default_elo_factor() -> f64 {
    DEFAULT_ELO_FACTOR
}

/// One side's player pool and the pool indices fielded as its roster.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TeamConfig {
    #[serde(default)]
    pub players: Vec<Player>,
    /// Pool indices after sorting by rating. Defaults to the top three.
    #[serde(default)]
    pub selection: Option<[usize; 3]>,
}

impl TeamConfig {
    /// The pool, filled up to three players and sorted strongest first.
    pub fn team(&self, side: Side) -> Team {
        Team::with_defaults(side, self.players.clone())
    }

    pub fn roster(&self, side: Side) -> Result<Roster, RosterError> {
        let team = self.team(side);
        match self.selection {
            Some(indices) => team.select(indices),
            None => team.default_roster(),
        }
    }

    fn validate(&self, side: Side) -> Result<(), ValidationError> {
        let field = format!("{side}.players");
        let mut seen = HashSet::new();
        for player in &self.players {
            if player.name().trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field,
                    message: "player name must not be empty".to_string(),
                });
            }

            if !player.rating().is_finite() {
                return Err(ValidationError::InvalidField {
                    field,
                    message: format!("player '{}' has a non-finite rating", player.name()),
                });
            }

            if !seen.insert(player.name()) {
                return Err(ValidationError::InvalidField {
                    field,
                    message: format!("player '{}' defined more than once", player.name()),
                });
            }
        }

        self.roster(side)
            .map_err(|err| ValidationError::InvalidField {
                field: format!("{side}.selection"),
                message: err.to_string(),
            })?;
        Ok(())
    }
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub analysis_json: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.analysis_json", &self.analysis_json),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown tracing level '{}'", self.tracing_level),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub analysis_json: PathBuf,
    pub summary_md: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
