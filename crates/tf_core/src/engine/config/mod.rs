//! # Match Configuration
//!
//! Every tunable the engine reads, grouped per concern. The configuration
//! is read-only input to a simulation; nothing in the engine keeps global
//! switches, so runs with different settings can share a process.
//!
//! ## Usage
//! ```rust
//! use tf_core::engine::config::MatchConfig;
//!
//! let config = MatchConfig::default();
//! let cup_tie = MatchConfig::knockout_tie();
//! assert!(config.validate().is_ok() && cup_tie.knockout);
//! ```

mod clock_config;
mod dominance_config;
mod flow_config;
mod morale_config;
mod rating_config;
mod set_piece_config;
mod shot_config;

pub use clock_config::ClockConfig;
pub use dominance_config::DominanceConfig;
pub use flow_config::FlowConfig;
pub use morale_config::{MoraleConfig, PersonalityReactions};
pub use rating_config::RatingConfig;
pub use set_piece_config::{FreeKickZone, FreeKickZoneSpec, SetPieceConfig};
pub use shot_config::ShotConfig;

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};
use crate::models::TraitStacking;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Draws go to extra time and penalties
    pub knockout: bool,
    /// No home advantage for either side
    pub neutral_venue: bool,
    /// Morale term in the player rating model
    pub morale_effect_active: bool,
    /// Post-match morale deltas
    pub morale_updates_active: bool,
    pub clock: ClockConfig,
    pub rating: RatingConfig,
    pub flow: FlowConfig,
    pub shooting: ShotConfig,
    pub set_pieces: SetPieceConfig,
    pub dominance: DominanceConfig,
    pub morale: MoraleConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            knockout: false,
            neutral_venue: false,
            morale_effect_active: true,
            morale_updates_active: true,
            clock: ClockConfig::default(),
            rating: RatingConfig::default(),
            flow: FlowConfig::default(),
            shooting: ShotConfig::default(),
            set_pieces: SetPieceConfig::default(),
            dominance: DominanceConfig::default(),
            morale: MoraleConfig::default(),
        }
    }
}

impl MatchConfig {
    /// League fixture (default)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Cup tie: extra time and penalties on a draw
    pub fn knockout_tie() -> Self {
        Self { knockout: true, ..Self::default() }
    }

    /// Neither side gets home advantage
    pub fn neutral() -> Self {
        Self { neutral_venue: true, ..Self::default() }
    }

    /// Sets both morale switches at once.
    pub fn with_morale_effect(mut self, active: bool) -> Self {
        self.morale_effect_active = active;
        self.morale_updates_active = active;
        self
    }

    pub fn with_trait_stacking(mut self, stacking: TraitStacking) -> Self {
        self.rating.trait_stacking = stacking;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Home advantage actually applied to the home side.
    pub fn effective_home_advantage(&self) -> f32 {
        if self.neutral_venue {
            1.0
        } else {
            self.flow.home_advantage
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.clock.validate()?;
        self.rating.validate()?;
        self.flow.validate()?;
        self.shooting.validate()?;
        self.set_pieces.validate()?;
        self.dominance.validate()?;
        self.morale.validate()?;
        Ok(())
    }
}

pub(crate) fn check_range(field: &'static str, value: f32, lo: f32, hi: f32) -> Result<()> {
    if value.is_finite() && value >= lo && value <= hi {
        Ok(())
    } else {
        Err(MatchError::config(field, format!("{value} outside {lo}..={hi}")))
    }
}

pub(crate) fn check_unit(field: &'static str, value: f32) -> Result<()> {
    check_range(field, value, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MatchConfig::default().validate().is_ok());
        assert!(MatchConfig::knockout_tie().validate().is_ok());
        assert!(MatchConfig::neutral().validate().is_ok());
    }

    #[test]
    fn test_negative_distance_rejected() {
        let mut config = MatchConfig::default();
        config.shooting.optimal_shot_distance = -3.0;
        match config.validate() {
            Err(MatchError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "shooting.optimal_shot_distance")
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_nan_rejected() {
        let mut config = MatchConfig::default();
        config.flow.home_advantage = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_half_time_must_precede_full_time() {
        let mut config = MatchConfig::default();
        config.clock.half_time_minute = 90;
        assert!(matches!(config.validate(), Err(MatchError::InvalidConfig { .. })));
    }

    #[test]
    fn test_morale_switches_independent() {
        let mut config = MatchConfig::default().with_morale_effect(false);
        assert!(!config.morale_effect_active && !config.morale_updates_active);
        config.morale_updates_active = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_neutral_venue_removes_home_advantage() {
        assert_eq!(MatchConfig::neutral().effective_home_advantage(), 1.0);
        assert!(MatchConfig::default().effective_home_advantage() > 1.0);
    }

    #[test]
    fn test_from_json_partial() {
        let config = MatchConfig::from_json(r#"{"knockout": true, "flow": {"home_advantage": 1.0, "attack_scaling": 32.0, "def_gk_blend": 0.18, "penalty_award_probability": 0.03, "pressure_escalation_step": 0.04, "pressure_escalation_cap": 0.2, "empty_zone_strength": 20.0}}"#).unwrap();
        assert!(config.knockout);
        assert_eq!(config.flow.home_advantage, 1.0);
        assert_eq!(config.clock.full_time_minute, 90);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = MatchConfig::from_json(r#"{"clock": {"half_time_minute": 45, "full_time_minute": 90, "extra_time_minutes": 30, "event_probability": 1.5}}"#).unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfig { field: "clock.event_probability", .. }));
    }
}
