pub mod batch;
pub mod config;
pub mod dominance;
pub mod event_generator;
pub mod free_kicks;
pub mod lineup;
pub mod match_phase;
pub mod match_state;
pub mod morale;
pub mod orchestrator;
pub mod probability;
pub mod rating;
pub mod resolver;
pub mod shootout;

#[cfg(test)]
pub mod test_fixtures;

pub use batch::{prematch_odds, simulate_batch};
pub use config::MatchConfig;
pub use dominance::{DominanceTracker, DominanceTrend};
pub use lineup::MatchSide;
pub use match_phase::{next_phase, MatchPhase};
pub use morale::{compute_deltas, FinalScore};
pub use orchestrator::{simulate_match, MatchEngine, MatchRun, SimulationMode};
pub use probability::{goal_probability, logistic_probability, ShotKind};
pub use rating::{effective_rating, effective_skill};
pub use resolver::{resolve, Resolution, ShotContext, ShotRolls, ShotSituation};
