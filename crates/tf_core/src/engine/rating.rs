//! Player Rating Model
//!
//! Effective ratings are pure functions of a player snapshot and the
//! configuration. Nothing is cached: callers recompute whenever a tick
//! needs a rating, so identical inputs always give identical numbers.
//!
//! ```text
//! effective = attribute × shape_factor × morale_factor + trait_bonus
//!             clamped to [min_rating, attribute × max_skill_multiplier]
//! ```
//!
//! Skill-based contexts use `shape / 100`; set-piece contexts use the
//! softer `floor + (1 - floor) × shape / 100`.

use crate::engine::config::MatchConfig;
use crate::models::{Player, RatingContext};

/// General on-pitch effectiveness.
pub fn effective_skill(player: &Player, config: &MatchConfig) -> f32 {
    effective_rating(player, RatingContext::OpenPlay, config)
}

pub fn effective_rating(player: &Player, ctx: RatingContext, config: &MatchConfig) -> f32 {
    let rating = &config.rating;
    let attribute = context_attribute(player, ctx) as f32;

    let morale = if config.morale_effect_active {
        morale_factor(player.morale, config)
    } else {
        1.0
    };

    let core = attribute * shape_factor(player.shape, ctx, config) * morale;
    let bonus = attribute * trait_bonus_pct(player, ctx, config) / 100.0;

    let ceiling = (attribute * rating.max_skill_multiplier).max(rating.min_rating);
    (core + bonus).clamp(rating.min_rating, ceiling)
}

/// Monotonic in morale, 1.0 at neutral morale, bounded by `1 ± morale_swing`.
pub fn morale_factor(morale: u8, config: &MatchConfig) -> f32 {
    let rating = &config.rating;
    let neutral = rating.neutral_morale;
    let m = morale.min(100) as f32;
    let offset = if m >= neutral {
        (m - neutral) / (100.0 - neutral)
    } else {
        (m - neutral) / neutral
    };
    1.0 + rating.morale_swing * offset.clamp(-1.0, 1.0)
}

/// Combined bonus percentage of every qualifying trait rule.
pub fn trait_bonus_pct(player: &Player, ctx: RatingContext, config: &MatchConfig) -> f32 {
    if player.traits.is_empty() {
        return 0.0;
    }
    let rating = &config.rating;
    let bonuses = rating
        .trait_rules
        .iter()
        .filter(|rule| rule.qualifies(player, ctx))
        .map(|rule| rule.bonus_pct);
    rating.trait_stacking.combine(bonuses)
}

fn context_attribute(player: &Player, ctx: RatingContext) -> u8 {
    match ctx {
        RatingContext::OpenPlay | RatingContext::Shooting | RatingContext::Goalkeeping => {
            player.base_skill
        }
        RatingContext::FreeKick => player.free_kick_ability,
        RatingContext::PenaltyTaking => player.penalty_taking,
        RatingContext::PenaltySaving => player.penalty_saving,
    }
}

fn shape_factor(shape: u8, ctx: RatingContext, config: &MatchConfig) -> f32 {
    let s = shape.min(100) as f32 / 100.0;
    match ctx {
        RatingContext::OpenPlay | RatingContext::Shooting | RatingContext::Goalkeeping => s,
        RatingContext::FreeKick | RatingContext::PenaltyTaking | RatingContext::PenaltySaving => {
            let floor = config.rating.set_piece_shape_floor;
            floor + (1.0 - floor) * s
        }
    }
}
