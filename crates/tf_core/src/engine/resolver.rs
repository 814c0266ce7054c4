//! Shot and set-piece resolution
//!
//! Pure functions in the context/rolls style: everything random about a
//! shot is drawn up front into [`ShotRolls`], so resolution itself is
//! deterministic and testable with fixed rolls.
//!
//! Buildup stages before the reveal are written from the [`ShotContext`]
//! alone, before the outcome roll is looked at.

use rand::Rng;

use crate::engine::config::{FreeKickZone, MatchConfig, ShotConfig};
use crate::engine::probability::{goal_probability, ShotKind};
use crate::engine::rating::effective_rating;
use crate::models::{BuildupStage, Outcome, Player, PlayerId, RatingContext, Side};

/// What kind of attempt this is, with the details the narrative needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotSituation {
    OpenPlay,
    FreeKick(FreeKickZone),
    Penalty,
    Shootout { round: u8, sudden_death: bool },
}

impl ShotSituation {
    pub fn shot_kind(&self) -> ShotKind {
        match self {
            ShotSituation::OpenPlay => ShotKind::OpenPlay,
            ShotSituation::FreeKick(_) => ShotKind::FreeKick,
            ShotSituation::Penalty | ShotSituation::Shootout { .. } => ShotKind::Penalty,
        }
    }
}

/// Everything known about a shot before any dice are rolled.
#[derive(Debug, Clone)]
pub struct ShotContext {
    pub situation: ShotSituation,
    pub side: Side,
    pub minute: u8,
    pub shooter: PlayerId,
    pub shooter_name: String,
    pub goalkeeper: PlayerId,
    pub goalkeeper_name: String,
    /// Effective rating for the situation, before noise.
    pub shooter_rating: f32,
    pub keeper_rating: f32,
    pub distance_m: f32,
}

impl ShotContext {
    pub fn new(
        situation: ShotSituation,
        side: Side,
        minute: u8,
        shooter: &Player,
        keeper: &Player,
        distance_m: f32,
        config: &MatchConfig,
    ) -> Self {
        let (shot_ctx, keeper_ctx) = match situation {
            ShotSituation::OpenPlay => (RatingContext::Shooting, RatingContext::Goalkeeping),
            ShotSituation::FreeKick(_) => (RatingContext::FreeKick, RatingContext::Goalkeeping),
            ShotSituation::Penalty | ShotSituation::Shootout { .. } => {
                (RatingContext::PenaltyTaking, RatingContext::PenaltySaving)
            }
        };
        let distance_m = match situation {
            ShotSituation::Penalty | ShotSituation::Shootout { .. } => {
                config.shooting.penalty_distance
            }
            ShotSituation::OpenPlay | ShotSituation::FreeKick(_) => distance_m,
        };
        Self {
            situation,
            side,
            minute,
            shooter: shooter.id,
            shooter_name: shooter.name.clone(),
            goalkeeper: keeper.id,
            goalkeeper_name: keeper.name.clone(),
            shooter_rating: effective_rating(shooter, shot_ctx, config),
            keeper_rating: effective_rating(keeper, keeper_ctx, config),
            distance_m,
        }
    }
}

/// Random values a shot needs, drawn fresh for every attempt.
#[derive(Debug, Clone, Copy)]
pub struct ShotRolls {
    pub shooter_noise: f32,
    pub keeper_noise: f32,
    pub goal_roll: f32,
    /// Splits a non-goal into blocked / saved / missed.
    pub miss_roll: f32,
}

impl ShotRolls {
    pub fn draw<R: Rng + ?Sized>(rng: &mut R, cfg: &ShotConfig) -> Self {
        Self {
            shooter_noise: rng.gen_range(cfg.shooter_noise_min..=cfg.shooter_noise_max),
            keeper_noise: rng.gen_range(cfg.keeper_noise_min..=cfg.keeper_noise_max),
            goal_roll: rng.gen(),
            miss_roll: rng.gen(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub outcome: Outcome,
    pub goal_probability: f32,
    pub shot_power: f32,
    pub keeper_power: f32,
    /// Announcement, tension, reveal. Empty when narration is off.
    pub stages: Vec<BuildupStage>,
}

impl Resolution {
    /// Text of the reveal stage, used as the event commentary.
    pub fn commentary(&self) -> String {
        self.stages.last().map(|s| s.narrative.clone()).unwrap_or_default()
    }
}

/// Resolve one attempt (pure function).
pub fn resolve(ctx: &ShotContext, rolls: &ShotRolls, cfg: &ShotConfig, narrate: bool) -> Resolution {
    let mut stages = Vec::new();
    if narrate {
        stages.push(BuildupStage::announcement(announcement(ctx)));
        stages.push(BuildupStage::tension(tension(ctx)));
    }

    let kind = ctx.situation.shot_kind();
    let shot_power = ctx.shooter_rating * rolls.shooter_noise;
    let keeper_power = ctx.keeper_rating * rolls.keeper_noise;
    let p = goal_probability(kind, shot_power, keeper_power, ctx.distance_m, cfg);

    let outcome = if rolls.goal_roll < p {
        Outcome::Goal
    } else {
        split_non_goal(kind, rolls.miss_roll, cfg)
    };

    if narrate {
        stages.push(BuildupStage::reveal(reveal(ctx, outcome), outcome));
    }

    Resolution { outcome, goal_probability: p, shot_power, keeper_power, stages }
}

fn split_non_goal(kind: ShotKind, roll: f32, cfg: &ShotConfig) -> Outcome {
    match kind {
        ShotKind::OpenPlay => {
            if roll < cfg.block_share {
                Outcome::Blocked
            } else if roll < cfg.block_share + cfg.save_share {
                Outcome::Saved
            } else {
                Outcome::Missed
            }
        }
        // Nobody stands between the ball and the keeper.
        ShotKind::FreeKick | ShotKind::Penalty => {
            let open = (1.0 - cfg.block_share).max(f32::EPSILON);
            if roll < (cfg.save_share / open).min(1.0) {
                Outcome::Saved
            } else {
                Outcome::Missed
            }
        }
    }
}

// ============================================================================
// Narrative
// ============================================================================

fn pick<'a>(ctx: &ShotContext, lines: &'a [&'a str]) -> &'a str {
    let i = (ctx.shooter.0 as usize + ctx.minute as usize) % lines.len();
    lines[i]
}

fn announcement(ctx: &ShotContext) -> String {
    let who = &ctx.shooter_name;
    match ctx.situation {
        ShotSituation::OpenPlay => {
            format!("{}' {} shapes to shoot from {:.0} metres.", ctx.minute, who, ctx.distance_m)
        }
        ShotSituation::FreeKick(zone) => format!(
            "{}' {} stands over a free kick in a {} position, {:.0} metres out.",
            ctx.minute,
            who,
            zone.label(),
            ctx.distance_m
        ),
        ShotSituation::Penalty => format!("{}' {} places the ball on the spot.", ctx.minute, who),
        ShotSituation::Shootout { round, sudden_death: false } => {
            format!("Round {}: {} walks up to the spot.", round, who)
        }
        ShotSituation::Shootout { round, sudden_death: true } => {
            format!("Sudden death, round {}: {} must score.", round, who)
        }
    }
}

fn tension(ctx: &ShotContext) -> String {
    let keeper = &ctx.goalkeeper_name;
    let line = match ctx.situation {
        ShotSituation::OpenPlay => pick(
            ctx,
            &[
                "{keeper} edges off the line.",
                "Defenders scramble to close the angle.",
                "{keeper} sets, weight on the toes.",
            ],
        ),
        ShotSituation::FreeKick(_) => pick(
            ctx,
            &[
                "The wall jumps as {shooter} strikes it.",
                "{keeper} peers around the wall.",
                "A short run-up, and the ball is struck.",
            ],
        ),
        ShotSituation::Penalty | ShotSituation::Shootout { .. } => pick(
            ctx,
            &[
                "{keeper} bounces on the line.",
                "The stadium falls silent.",
                "{shooter} takes a long look at the corner.",
            ],
        ),
    };
    line.replace("{keeper}", keeper).replace("{shooter}", &ctx.shooter_name)
}

fn reveal(ctx: &ShotContext, outcome: Outcome) -> String {
    let who = &ctx.shooter_name;
    let keeper = &ctx.goalkeeper_name;
    match (outcome, ctx.situation.shot_kind()) {
        (Outcome::Goal, ShotKind::Penalty) => format!("GOAL! {} sends {} the wrong way.", who, keeper),
        (Outcome::Goal, ShotKind::FreeKick) => format!("GOAL! {} curls it into the top corner.", who),
        (Outcome::Goal, ShotKind::OpenPlay) => format!("GOAL! {} finds the net.", who),
        (Outcome::Saved, _) => format!("Saved! {} keeps it out.", keeper),
        (Outcome::Blocked, _) => format!("Blocked! {}'s effort cannons off a defender.", who),
        (Outcome::Missed, ShotKind::Penalty) => format!("Missed! {} puts it wide.", who),
        (Outcome::Missed, _) => format!("Off target from {}.", who),
        (Outcome::None, _) => String::new(),
    }
}
