//! # tf_core - Deterministic Text Football Match Engine
//!
//! Simulates football matches between two rostered squads as a stream of
//! text events. A run is driven entirely by an explicit seed and a
//! read-only [`engine::config::MatchConfig`].
//!
//! ## Features
//! - Same rosters, config and seed give the same report
//! - Narrative buildup stages ahead of every shot outcome
//! - Knockout ties with extra time and penalty shootouts
//! - Post-match morale deltas for both squads
//! - Parallel batch mode for pre-match odds
//! - JSON API for host integration
//!
//! ## Usage
//! ```rust
//! use tf_core::{generate_starter_squad, simulate_match, MatchConfig};
//!
//! let home = generate_starter_squad("Rovers", 70, 1);
//! let away = generate_starter_squad("United", 65, 2);
//! let report = simulate_match(&home, &away, &MatchConfig::default(), 42).unwrap();
//! assert_eq!(report.seed, 42);
//! ```

#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

pub use api::{simulate_batch_json, simulate_match_json, BatchRequest, MatchRequest};
pub use engine::{
    compute_deltas, prematch_odds, simulate_batch, simulate_match, FinalScore, MatchConfig,
    MatchEngine, MatchPhase,
};
pub use error::{MatchError, Result};
pub use models::{
    generate_starter_squad, BatchSummary, MatchEvent, MatchReport, MoraleDelta, Player, Position,
    PrematchOdds, Side, Team,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
