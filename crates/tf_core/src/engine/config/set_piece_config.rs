//! Scheduled free-kick tunables

use serde::{Deserialize, Serialize};

use super::{check_range, check_unit};
use crate::error::{MatchError, Result};

/// Where on the pitch a free kick is awarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreeKickZone {
    Deep,
    Middle,
    Attacking,
    Dangerous,
}

impl FreeKickZone {
    pub const ALL: [FreeKickZone; 4] = [
        FreeKickZone::Deep,
        FreeKickZone::Middle,
        FreeKickZone::Attacking,
        FreeKickZone::Dangerous,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FreeKickZone::Deep => "deep",
            FreeKickZone::Middle => "middle",
            FreeKickZone::Attacking => "attacking",
            FreeKickZone::Dangerous => "dangerous",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreeKickZoneSpec {
    /// Relative likelihood of a free kick landing in this zone
    pub likelihood: f32,
    /// Chance of a direct shot at goal
    pub p_direct: f32,
    /// Chance of a delivery into the attacking zone
    pub p_indirect: f32,
    /// Multiplier on the defensive gate after an indirect delivery
    pub defense_modifier: f32,
    /// Nominal distance to goal of a direct attempt
    pub distance_m: f32,
}

impl FreeKickZoneSpec {
    const fn new(
        likelihood: f32,
        p_direct: f32,
        p_indirect: f32,
        defense_modifier: f32,
        distance_m: f32,
    ) -> Self {
        Self { likelihood, p_direct, p_indirect, defense_modifier, distance_m }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetPieceConfig {
    /// Mean number of free kicks per match (default: 10)
    pub avg_free_kicks: f32,
    /// Standard deviation of the free-kick count (default: 5)
    pub free_kick_variance: f32,
    /// Lower bound on scheduled free kicks (default: 10)
    pub min_free_kicks: u8,
    pub deep: FreeKickZoneSpec,
    pub middle: FreeKickZoneSpec,
    pub attacking: FreeKickZoneSpec,
    pub dangerous: FreeKickZoneSpec,
}

impl Default for SetPieceConfig {
    fn default() -> Self {
        Self {
            avg_free_kicks: 10.0,
            free_kick_variance: 5.0,
            min_free_kicks: 10,
            deep: FreeKickZoneSpec::new(0.25, 0.00, 0.05, 1.00, 45.0),
            middle: FreeKickZoneSpec::new(0.50, 0.02, 0.40, 0.90, 32.0),
            attacking: FreeKickZoneSpec::new(0.17, 0.30, 0.70, 0.75, 25.0),
            dangerous: FreeKickZoneSpec::new(0.08, 0.85, 0.15, 0.60, 19.0),
        }
    }
}

impl SetPieceConfig {
    pub fn zone(&self, zone: FreeKickZone) -> &FreeKickZoneSpec {
        match zone {
            FreeKickZone::Deep => &self.deep,
            FreeKickZone::Middle => &self.middle,
            FreeKickZone::Attacking => &self.attacking,
            FreeKickZone::Dangerous => &self.dangerous,
        }
    }

    /// Disables scheduled free kicks entirely.
    pub fn none() -> Self {
        Self {
            avg_free_kicks: 0.0,
            free_kick_variance: 0.0,
            min_free_kicks: 0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_range("set_pieces.avg_free_kicks", self.avg_free_kicks, 0.0, 60.0)?;
        check_range("set_pieces.free_kick_variance", self.free_kick_variance, 0.0, 30.0)?;
        let mut total = 0.0;
        for zone in FreeKickZone::ALL {
            let spec = self.zone(zone);
            check_range("set_pieces.zone.likelihood", spec.likelihood, 0.0, 1.0)?;
            check_unit("set_pieces.zone.p_direct", spec.p_direct)?;
            check_unit("set_pieces.zone.p_indirect", spec.p_indirect)?;
            check_range("set_pieces.zone.defense_modifier", spec.defense_modifier, 0.1, 2.0)?;
            check_range("set_pieces.zone.distance_m", spec.distance_m, 1.0, 60.0)?;
            if spec.p_direct + spec.p_indirect > 1.0 + f32::EPSILON {
                return Err(MatchError::config(
                    "set_pieces.zone",
                    format!("{} zone direct + indirect exceeds 1.0", zone.label()),
                ));
            }
            total += spec.likelihood;
        }
        if total <= 0.0 {
            return Err(MatchError::config(
                "set_pieces.zone.likelihood",
                "at least one zone needs a positive likelihood",
            ));
        }
        Ok(())
    }
}
