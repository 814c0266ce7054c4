//! Batch (Monte-Carlo) simulation
//!
//! Many independent regulation-time trials of one fixture, aggregated into
//! a [`BatchSummary`]. Trials run on rayon workers. Trial `i` owns the
//! ChaCha stream `i` of the batch seed, so the summary depends only on the
//! seed and the trial count, never on scheduling.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::engine::config::MatchConfig;
use crate::engine::orchestrator::{MatchEngine, SimulationMode};
use crate::error::{MatchError, Result};
use crate::models::{BatchSummary, PrematchOdds, Team};

/// Below this, trials run on the calling thread.
const PARALLEL_THRESHOLD: u32 = 64;

/// Aggregate `trials` regulation-time matches.
///
/// Knockout settings are ignored; a level score counts as a draw.
pub fn simulate_batch(
    home: &Team,
    away: &Team,
    config: &MatchConfig,
    seed: u64,
    trials: u32,
) -> Result<BatchSummary> {
    if trials == 0 {
        return Err(MatchError::InvalidRequest("batch needs at least one trial".into()));
    }

    let mut config = config.clone();
    if config.knockout {
        warn!("Batch simulation ignores knockout; trials end at full time");
        config.knockout = false;
    }
    let engine = MatchEngine::new(home.clone(), away.clone(), config)?;

    let summary = if trials > PARALLEL_THRESHOLD {
        (0..trials)
            .into_par_iter()
            .map(|trial| run_trial(&engine, seed, trial))
            .try_fold(BatchSummary::default, |mut acc, score| {
                let (h, a) = score?;
                acc.record(h, a);
                Ok::<_, MatchError>(acc)
            })
            .try_reduce(BatchSummary::default, |a, b| Ok(a.merge(b)))?
    } else {
        let mut acc = BatchSummary::default();
        for trial in 0..trials {
            let (h, a) = run_trial(&engine, seed, trial)?;
            acc.record(h, a);
        }
        acc
    };

    info!(
        "Batch of {} trials: {} {:.3} / draw {:.3} / {} {:.3}",
        summary.trials,
        home.name,
        summary.home_win_probability(),
        summary.draw_probability(),
        away.name,
        summary.away_win_probability()
    );
    Ok(summary)
}

fn run_trial(engine: &MatchEngine, seed: u64, trial: u32) -> Result<(u8, u8)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(trial as u64);
    let run = engine.run(&mut rng, SimulationMode::Lean)?;
    Ok((run.state.score_home, run.state.score_away))
}

/// Odds for `user` against `opponent`, once at home and once away.
pub fn prematch_odds(
    user: &Team,
    opponent: &Team,
    config: &MatchConfig,
    seed: u64,
    trials: u32,
) -> Result<PrematchOdds> {
    Ok(PrematchOdds {
        home_fixture: simulate_batch(user, opponent, config, seed, trials)?,
        away_fixture: simulate_batch(opponent, user, config, seed.wrapping_add(1), trials)?,
    })
}
