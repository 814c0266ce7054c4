//! Possession flow tunables (midfield battles, attacks, pressure)

use serde::{Deserialize, Serialize};

use super::{check_range, check_unit};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Multiplier on the home side's strengths (default: 1.04)
    pub home_advantage: f32,
    /// Logistic scale of attack vs defensive gate (default: 32)
    pub attack_scaling: f32,
    /// Goalkeeper share of the defensive gate (default: 0.18)
    pub def_gk_blend: f32,
    /// Share of defensive stops that concede a penalty (default: 0.03)
    pub penalty_award_probability: f32,
    /// Added shot chance per consecutive same-side event (default: 0.04)
    pub pressure_escalation_step: f32,
    /// Ceiling of the pressure bonus (default: 0.20)
    pub pressure_escalation_cap: f32,
    /// Strength assumed for a zone with nobody in it (default: 20)
    pub empty_zone_strength: f32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            home_advantage: 1.04,
            attack_scaling: 32.0,
            def_gk_blend: 0.18,
            penalty_award_probability: 0.03,
            pressure_escalation_step: 0.04,
            pressure_escalation_cap: 0.20,
            empty_zone_strength: 20.0,
        }
    }
}

impl FlowConfig {
    pub fn validate(&self) -> Result<()> {
        check_range("flow.home_advantage", self.home_advantage, 0.5, 2.0)?;
        check_range("flow.attack_scaling", self.attack_scaling, 1.0, 1000.0)?;
        check_unit("flow.def_gk_blend", self.def_gk_blend)?;
        check_unit("flow.penalty_award_probability", self.penalty_award_probability)?;
        check_unit("flow.pressure_escalation_step", self.pressure_escalation_step)?;
        check_unit("flow.pressure_escalation_cap", self.pressure_escalation_cap)?;
        check_range("flow.empty_zone_strength", self.empty_zone_strength, 0.0, 150.0)?;
        Ok(())
    }
}
