#![deny(warnings)]
pub mod analysis;
pub mod combinatorics;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod probability;
pub mod strategy;
pub mod view;

pub use analysis::Analysis;
pub use error::{ModelError, ParseError, RosterError};
pub use evaluator::{LineupEvaluator, LineupResult, Opponent};
pub use model::{Arrangement, Player, Roster, Side, Team};
pub use probability::EloModel;
pub use strategy::{Strategies, Strategy, StrategyKind, StrategySelector};
pub use view::{MatchDetails, ViewSelection};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "lineup"
    }

    pub const fn codename() -> &'static str {
        "Three by Five"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "lineup");
        assert_eq!(AppInfo::codename(), "Three by Five");
        assert!(!AppInfo::version().is_empty());
    }
}
