//! Player rating tunables

use serde::{Deserialize, Serialize};

use super::{check_range, check_unit};
use crate::error::{MatchError, Result};
use crate::models::{default_trait_rules, TraitRule, TraitStacking};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Largest morale swing either side of neutral morale (default: 0.10)
    pub morale_swing: f32,
    /// Morale at which the morale factor is exactly 1.0 (default: 50)
    pub neutral_morale: f32,
    /// Shape contribution floor for set-piece ratings (default: 0.5)
    pub set_piece_shape_floor: f32,
    /// Upper clamp of a rating relative to its attribute (default: 1.5)
    pub max_skill_multiplier: f32,
    /// Lower clamp of any rating (default: 1.0)
    pub min_rating: f32,
    pub trait_stacking: TraitStacking,
    pub trait_rules: Vec<TraitRule>,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            morale_swing: 0.10,
            neutral_morale: 50.0,
            set_piece_shape_floor: 0.5,
            max_skill_multiplier: 1.5,
            min_rating: 1.0,
            trait_stacking: TraitStacking::default(),
            trait_rules: default_trait_rules(),
        }
    }
}

impl RatingConfig {
    pub fn validate(&self) -> Result<()> {
        check_range("rating.morale_swing", self.morale_swing, 0.0, 0.5)?;
        check_range("rating.neutral_morale", self.neutral_morale, 1.0, 99.0)?;
        check_unit("rating.set_piece_shape_floor", self.set_piece_shape_floor)?;
        check_range("rating.max_skill_multiplier", self.max_skill_multiplier, 1.0, 3.0)?;
        check_range("rating.min_rating", self.min_rating, 0.1, 50.0)?;
        if let TraitStacking::Additive { cap_pct } = self.trait_stacking {
            check_range("rating.trait_stacking.cap_pct", cap_pct, 0.0, 100.0)?;
        }
        for rule in &self.trait_rules {
            if !(0.0..=100.0).contains(&rule.bonus_pct) {
                return Err(MatchError::config(
                    "rating.trait_rules",
                    format!("{:?} bonus {} outside 0..=100", rule.tag, rule.bonus_pct),
                ));
            }
        }
        Ok(())
    }
}
