//! Shot, free-kick and penalty resolution tunables

use serde::{Deserialize, Serialize};

use super::{check_range, check_unit};
use crate::error::{MatchError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    // === Distance curve ===
    /// Distance of peak shooting efficiency in meters (default: 12)
    pub optimal_shot_distance: f32,
    /// Falloff width for shots closer than optimal (default: 7)
    pub close_falloff_m: f32,
    /// Falloff width for shots farther than optimal (default: 14)
    pub far_falloff_m: f32,
    /// Efficiency never drops below this (default: 0.08)
    pub distance_floor: f32,
    /// Mean open-play shot distance (default: 16)
    pub mean_shot_distance: f32,
    /// Spread of open-play shot distance (default: 6)
    pub shot_distance_sd: f32,
    pub min_shot_distance: f32,
    pub max_shot_distance: f32,

    // === Keeper ===
    /// Scales goalkeeper rating against shot power (default: 1.0)
    pub goalkeeper_scaling: f32,

    // === Open play ===
    /// Goal chance with evenly matched shooter/keeper at optimal distance (default: 0.30)
    pub open_play_base_rate: f32,
    /// Logistic scale of shooter vs keeper (default: 30)
    pub shot_scaling: f32,

    // === Free kicks ===
    /// Base goal chance of a direct free kick (default: 0.12)
    pub free_kick_base_rate: f32,
    /// Logistic scale for free kicks (default: 24)
    pub free_kick_scaling: f32,

    // === Penalties ===
    /// Base conversion of a penalty (default: 0.76)
    pub penalty_base_rate: f32,
    /// Logistic scale for penalties (default: 20)
    pub penalty_scaling: f32,
    /// Distance recorded for penalties (default: 11)
    pub penalty_distance: f32,

    // === Per-shot variance ===
    pub shooter_noise_min: f32,
    pub shooter_noise_max: f32,
    pub keeper_noise_min: f32,
    pub keeper_noise_max: f32,

    // === Non-goal split ===
    /// Share of failed open-play shots that are blocked (default: 0.2)
    pub block_share: f32,
    /// Share of failed shots that the keeper saves (default: 0.45)
    pub save_share: f32,

    /// Hard probability bounds
    pub min_probability: f32,
    pub max_probability: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            optimal_shot_distance: 12.0,
            close_falloff_m: 7.0,
            far_falloff_m: 14.0,
            distance_floor: 0.08,
            mean_shot_distance: 16.0,
            shot_distance_sd: 6.0,
            min_shot_distance: 4.0,
            max_shot_distance: 35.0,

            goalkeeper_scaling: 1.0,

            open_play_base_rate: 0.30,
            shot_scaling: 30.0,

            free_kick_base_rate: 0.12,
            free_kick_scaling: 24.0,

            penalty_base_rate: 0.76,
            penalty_scaling: 20.0,
            penalty_distance: 11.0,

            shooter_noise_min: 0.85,
            shooter_noise_max: 1.15,
            keeper_noise_min: 0.92,
            keeper_noise_max: 1.08,

            block_share: 0.2,
            save_share: 0.45,

            min_probability: 0.01,
            max_probability: 0.97,
        }
    }
}

impl ShotConfig {
    pub fn validate(&self) -> Result<()> {
        check_range("shooting.optimal_shot_distance", self.optimal_shot_distance, 1.0, 40.0)?;
        check_range("shooting.close_falloff_m", self.close_falloff_m, 0.5, 50.0)?;
        check_range("shooting.far_falloff_m", self.far_falloff_m, 0.5, 80.0)?;
        check_unit("shooting.distance_floor", self.distance_floor)?;
        check_range("shooting.min_shot_distance", self.min_shot_distance, 0.5, 60.0)?;
        check_range(
            "shooting.max_shot_distance",
            self.max_shot_distance,
            self.min_shot_distance,
            60.0,
        )?;
        check_range(
            "shooting.mean_shot_distance",
            self.mean_shot_distance,
            self.min_shot_distance,
            self.max_shot_distance,
        )?;
        check_range("shooting.shot_distance_sd", self.shot_distance_sd, 0.0, 30.0)?;
        check_range("shooting.goalkeeper_scaling", self.goalkeeper_scaling, 0.0, 5.0)?;
        check_unit("shooting.open_play_base_rate", self.open_play_base_rate)?;
        check_unit("shooting.free_kick_base_rate", self.free_kick_base_rate)?;
        check_unit("shooting.penalty_base_rate", self.penalty_base_rate)?;
        check_range("shooting.shot_scaling", self.shot_scaling, 1.0, 1000.0)?;
        check_range("shooting.free_kick_scaling", self.free_kick_scaling, 1.0, 1000.0)?;
        check_range("shooting.penalty_scaling", self.penalty_scaling, 1.0, 1000.0)?;
        check_range("shooting.penalty_distance", self.penalty_distance, 1.0, 40.0)?;
        check_range("shooting.shooter_noise_min", self.shooter_noise_min, 0.0, 2.0)?;
        check_range(
            "shooting.shooter_noise_max",
            self.shooter_noise_max,
            self.shooter_noise_min,
            2.0,
        )?;
        check_range("shooting.keeper_noise_min", self.keeper_noise_min, 0.0, 2.0)?;
        check_range(
            "shooting.keeper_noise_max",
            self.keeper_noise_max,
            self.keeper_noise_min,
            2.0,
        )?;
        check_unit("shooting.block_share", self.block_share)?;
        check_unit("shooting.save_share", self.save_share)?;
        if self.block_share + self.save_share > 1.0 {
            return Err(MatchError::config(
                "shooting.save_share",
                "block_share + save_share must not exceed 1.0",
            ));
        }
        check_unit("shooting.min_probability", self.min_probability)?;
        check_range(
            "shooting.max_probability",
            self.max_probability,
            self.min_probability,
            1.0,
        )?;
        Ok(())
    }
}
