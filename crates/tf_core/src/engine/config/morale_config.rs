//! Post-match morale tunables

use serde::{Deserialize, Serialize};

use super::{check_range, check_unit};
use crate::error::Result;
use crate::models::{Personality, ResultKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalityReactions {
    pub professional: f32,
    pub ambitious: f32,
    pub stoic: f32,
    pub volatile: f32,
}

impl Default for PersonalityReactions {
    fn default() -> Self {
        Self { professional: 0.8, ambitious: 1.2, stoic: 0.5, volatile: 1.6 }
    }
}

impl PersonalityReactions {
    pub fn multiplier(&self, personality: Personality) -> f32 {
        match personality {
            Personality::Professional => self.professional,
            Personality::Ambitious => self.ambitious,
            Personality::Stoic => self.stoic,
            Personality::Volatile => self.volatile,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoraleConfig {
    pub win_delta: f32,
    pub draw_delta: f32,
    pub loss_delta: f32,
    /// Per goal scored (default: 2)
    pub goal_bonus: f32,
    /// Extra on top of the per-goal bonus for 3+ goals (default: 4)
    pub hat_trick_bonus: f32,
    /// Goalkeeper and defenders of a side that conceded nothing (default: 2)
    pub clean_sheet_bonus: f32,
    /// Morale unused squad members drift toward (default: 50)
    pub drift_target: f32,
    /// Share of the gap to the drift target closed per match (default: 0.1)
    pub drift_rate: f32,
    pub reactions: PersonalityReactions,
}

impl Default for MoraleConfig {
    fn default() -> Self {
        Self {
            win_delta: 5.0,
            draw_delta: 1.0,
            loss_delta: -5.0,
            goal_bonus: 2.0,
            hat_trick_bonus: 4.0,
            clean_sheet_bonus: 2.0,
            drift_target: 50.0,
            drift_rate: 0.1,
            reactions: PersonalityReactions::default(),
        }
    }
}

impl MoraleConfig {
    pub fn result_delta(&self, result: ResultKind) -> f32 {
        match result {
            ResultKind::Win => self.win_delta,
            ResultKind::Draw => self.draw_delta,
            ResultKind::Loss => self.loss_delta,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_range("morale.win_delta", self.win_delta, 0.0, 50.0)?;
        check_range("morale.draw_delta", self.draw_delta, -50.0, 50.0)?;
        check_range("morale.loss_delta", self.loss_delta, -50.0, 0.0)?;
        check_range("morale.goal_bonus", self.goal_bonus, 0.0, 50.0)?;
        check_range("morale.hat_trick_bonus", self.hat_trick_bonus, 0.0, 50.0)?;
        check_range("morale.clean_sheet_bonus", self.clean_sheet_bonus, 0.0, 50.0)?;
        check_range("morale.drift_target", self.drift_target, 0.0, 100.0)?;
        check_unit("morale.drift_rate", self.drift_rate)?;
        for (field, m) in [
            ("morale.reactions.professional", self.reactions.professional),
            ("morale.reactions.ambitious", self.reactions.ambitious),
            ("morale.reactions.stoic", self.reactions.stoic),
            ("morale.reactions.volatile", self.reactions.volatile),
        ] {
            check_range(field, m, 0.0, 5.0)?;
        }
        Ok(())
    }
}
