use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::batch::{prematch_odds, simulate_batch};
use crate::engine::config::MatchConfig;
use crate::engine::MatchEngine;
use crate::error::{MatchError, Result};
use crate::models::{BatchSummary, MatchReport, Team};

pub const SCHEMA_VERSION: u8 = 1;

fn check_schema(version: u8) -> Result<()> {
    if version != SCHEMA_VERSION {
        return Err(MatchError::InvalidRequest(format!(
            "Unsupported schema version: {} (expected {})",
            version, SCHEMA_VERSION
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: Team,
    pub away_team: Team,
    /// Omitted fields fall back to the league defaults.
    #[serde(default)]
    pub config: MatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub report: MatchReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: Team,
    pub away_team: Team,
    #[serde(default)]
    pub config: MatchConfig,
    pub trials: u32,
    /// Also play the reverse fixture, giving pre-match odds for `home_team`.
    #[serde(default)]
    pub both_fixtures: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub schema_version: u8,
    pub home_name: String,
    pub away_name: String,
    pub home_fixture: BatchSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_fixture: Option<BatchSummary>,
    pub home_win_probability: f64,
    pub draw_probability: f64,
    pub away_win_probability: f64,
}

/// Run one detailed match from a JSON request and return the report as JSON.
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;
    debug!(
        "Match request: {} vs {} (seed {})",
        request.home_team.name, request.away_team.name, request.seed
    );

    let MatchRequest { seed, home_team, away_team, config, .. } = request;
    let report = MatchEngine::new(home_team, away_team, config)?.simulate(seed)?;

    let response = MatchResponse { schema_version: SCHEMA_VERSION, report };
    Ok(serde_json::to_string(&response)?)
}

/// Run a batch from a JSON request. With `both_fixtures`, `away_fixture`
/// holds the reverse fixture and the top-level probabilities stay those
/// of the requested one.
pub fn simulate_batch_json(request_json: &str) -> Result<String> {
    let request: BatchRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    let (home_fixture, away_fixture) = if request.both_fixtures {
        let odds = prematch_odds(
            &request.home_team,
            &request.away_team,
            &request.config,
            request.seed,
            request.trials,
        )?;
        (odds.home_fixture, Some(odds.away_fixture))
    } else {
        let summary = simulate_batch(
            &request.home_team,
            &request.away_team,
            &request.config,
            request.seed,
            request.trials,
        )?;
        (summary, None)
    };

    info!("Batch request served: {} trials", home_fixture.trials);

    let response = BatchResponse {
        schema_version: SCHEMA_VERSION,
        home_name: request.home_team.name,
        away_name: request.away_team.name,
        home_win_probability: home_fixture.home_win_probability(),
        draw_probability: home_fixture.draw_probability(),
        away_win_probability: home_fixture.away_win_probability(),
        home_fixture,
        away_fixture,
    };
    Ok(serde_json::to_string(&response)?)
}
