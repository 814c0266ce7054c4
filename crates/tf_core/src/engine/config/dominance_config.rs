//! Dominance tracker tunables

use serde::{Deserialize, Serialize};

use super::{check_range, check_unit};
use crate::error::Result;
use crate::models::EventKind;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DominanceConfig {
    /// Dominance lives in [-limit, +limit] (default: 100)
    pub limit: f32,
    pub midfield_battle_weight: f32,
    pub attack_weight: f32,
    pub defensive_action_weight: f32,
    pub free_kick_weight: f32,
    pub shot_weight: f32,
    pub penalty_weight: f32,
    /// Nudge of a goal, applied instead of the kind weight (default: 30)
    pub goal_weight: f32,
    /// Share kept after a goal's restart (default: 0.5)
    pub goal_reset_factor: f32,
    /// Share lost per quiet minute (default: 0.04)
    pub decay_rate: f32,
    /// Share kept over the half-time break (default: 0.6)
    pub halftime_retain: f32,
}

impl Default for DominanceConfig {
    fn default() -> Self {
        Self {
            limit: 100.0,
            midfield_battle_weight: 3.0,
            attack_weight: 6.0,
            defensive_action_weight: 5.0,
            free_kick_weight: 5.0,
            shot_weight: 10.0,
            penalty_weight: 14.0,
            goal_weight: 30.0,
            goal_reset_factor: 0.5,
            decay_rate: 0.04,
            halftime_retain: 0.6,
        }
    }
}

impl DominanceConfig {
    pub fn weight(&self, kind: EventKind) -> f32 {
        match kind {
            EventKind::MidfieldBattle => self.midfield_battle_weight,
            EventKind::Attack => self.attack_weight,
            EventKind::DefensiveAction => self.defensive_action_weight,
            EventKind::FreeKick => self.free_kick_weight,
            EventKind::Shot => self.shot_weight,
            EventKind::Penalty => self.penalty_weight,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_range("dominance.limit", self.limit, 1.0, 10_000.0)?;
        for (field, w) in [
            ("dominance.midfield_battle_weight", self.midfield_battle_weight),
            ("dominance.attack_weight", self.attack_weight),
            ("dominance.defensive_action_weight", self.defensive_action_weight),
            ("dominance.free_kick_weight", self.free_kick_weight),
            ("dominance.shot_weight", self.shot_weight),
            ("dominance.penalty_weight", self.penalty_weight),
            ("dominance.goal_weight", self.goal_weight),
        ] {
            check_range(field, w, 0.0, self.limit)?;
        }
        check_unit("dominance.goal_reset_factor", self.goal_reset_factor)?;
        check_unit("dominance.decay_rate", self.decay_rate)?;
        check_unit("dominance.halftime_retain", self.halftime_retain)?;
        Ok(())
    }
}
