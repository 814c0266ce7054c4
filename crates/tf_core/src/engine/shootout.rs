//! Penalty shootout
//!
//! Five kicks each, alternating, home first. The shootout stops as soon as
//! one side cannot be caught with the kicks left. Level after five rounds
//! goes to sudden death, one kick each per round, until a round is won.
//! Kicks use the resolver's penalty path and never touch the match score.

use rand::Rng;
use tracing::debug;

use crate::engine::config::MatchConfig;
use crate::engine::lineup::MatchSide;
use crate::engine::resolver::{resolve, ShotContext, ShotRolls, ShotSituation};
use crate::models::{Player, ShootoutKick, ShootoutResult, Side};

pub const REGULATION_KICKS: u8 = 5;

struct Tally {
    home: u8,
    away: u8,
    home_taken: u8,
    away_taken: u8,
}

impl Tally {
    fn decided(&self) -> bool {
        let home_left = REGULATION_KICKS.saturating_sub(self.home_taken);
        let away_left = REGULATION_KICKS.saturating_sub(self.away_taken);
        self.home > self.away + away_left || self.away > self.home + home_left
    }
}

pub fn run_shootout<R: Rng + ?Sized>(
    home: &MatchSide,
    away: &MatchSide,
    minute: u8,
    config: &MatchConfig,
    narrate: bool,
    rng: &mut R,
) -> ShootoutResult {
    let home_order = home.shootout_order(config);
    let away_order = away.shootout_order(config);
    let mut tally = Tally { home: 0, away: 0, home_taken: 0, away_taken: 0 };
    let mut kicks = Vec::new();

    let mut take = |side: Side, round: u8, sudden_death: bool, rng: &mut R| -> bool {
        let (order, keeper) = match side {
            Side::Home => (&home_order, away.goalkeeper()),
            Side::Away => (&away_order, home.goalkeeper()),
        };
        let taker: &Player = order[(round as usize - 1) % order.len()];
        let ctx = ShotContext::new(
            ShotSituation::Shootout { round, sudden_death },
            side,
            minute,
            taker,
            keeper,
            config.shooting.penalty_distance,
            config,
        );
        let rolls = ShotRolls::draw(rng, &config.shooting);
        let resolution = resolve(&ctx, &rolls, &config.shooting, narrate);
        let scored = resolution.outcome.is_goal();
        kicks.push(ShootoutKick {
            round,
            side,
            taker: taker.id,
            goalkeeper: keeper.id,
            outcome: resolution.outcome,
            sudden_death,
            buildup_stages: resolution.stages,
        });
        scored
    };

    for round in 1..=REGULATION_KICKS {
        if take(Side::Home, round, false, rng) {
            tally.home += 1;
        }
        tally.home_taken += 1;
        if tally.decided() {
            break;
        }
        if take(Side::Away, round, false, rng) {
            tally.away += 1;
        }
        tally.away_taken += 1;
        if tally.decided() {
            break;
        }
    }

    let mut round = REGULATION_KICKS;
    while tally.home == tally.away {
        round = round.saturating_add(1);
        if take(Side::Home, round, true, rng) {
            tally.home = tally.home.saturating_add(1);
        }
        if take(Side::Away, round, true, rng) {
            tally.away = tally.away.saturating_add(1);
        }
    }

    let winner = if tally.home > tally.away { Side::Home } else { Side::Away };
    debug!("Shootout won by {} side {}-{}", winner, tally.home, tally.away);

    ShootoutResult { home_score: tally.home, away_score: tally.away, winner, kicks }
}
