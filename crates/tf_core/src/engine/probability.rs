//! Probability calculation utilities for match simulation
//!
//! All functions are pure - they take ratings as input and return
//! probabilities. Randomness is applied by the callers.

use crate::engine::config::ShotConfig;

/// Which shot curve applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShotKind {
    OpenPlay,
    FreeKick,
    Penalty,
}

/// Probability that side A overcomes side B.
///
/// Exponent clamped to ±10 so extreme gaps saturate instead of overflowing.
#[inline]
pub fn logistic_probability(strength_a: f32, strength_b: f32, scaling: f32) -> f32 {
    let exponent = -(strength_a - strength_b) / scaling;
    if exponent > 10.0 {
        0.0
    } else if exponent < -10.0 {
        1.0
    } else {
        1.0 / (1.0 + exponent.exp())
    }
}

/// Shooting efficiency by distance.
///
/// 1.0 at `optimal_shot_distance`, falling off on both sides: faster when
/// closer (tight angles) and slower when farther, never below the floor.
pub fn distance_efficiency(distance_m: f32, cfg: &ShotConfig) -> f32 {
    let gap = distance_m - cfg.optimal_shot_distance;
    let width = if gap < 0.0 { cfg.close_falloff_m } else { cfg.far_falloff_m };
    let bell = (-(gap / width).powi(2)).exp();
    cfg.distance_floor + (1.0 - cfg.distance_floor) * bell
}

/// Goal probability for a resolved shot.
///
/// `shot_power` and `keeper_rating` already include per-shot noise. Evenly
/// matched sides give `base_rate` at optimal distance.
pub fn goal_probability(
    kind: ShotKind,
    shot_power: f32,
    keeper_rating: f32,
    distance_m: f32,
    cfg: &ShotConfig,
) -> f32 {
    let (base_rate, scaling) = match kind {
        ShotKind::OpenPlay => (cfg.open_play_base_rate, cfg.shot_scaling),
        ShotKind::FreeKick => (cfg.free_kick_base_rate, cfg.free_kick_scaling),
        ShotKind::Penalty => (cfg.penalty_base_rate, cfg.penalty_scaling),
    };

    let duel = 2.0
        * logistic_probability(shot_power, keeper_rating * cfg.goalkeeper_scaling, scaling);
    let distance = match kind {
        ShotKind::Penalty => 1.0,
        ShotKind::OpenPlay | ShotKind::FreeKick => distance_efficiency(distance_m, cfg),
    };

    (base_rate * duel * distance).clamp(cfg.min_probability, cfg.max_probability)
}
