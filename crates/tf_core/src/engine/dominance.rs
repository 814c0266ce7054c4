//! Dominance Tracker
//!
//! A single signed scalar describing which side controls the match:
//! positive = home, negative = away, 0 = balanced. Influenced by:
//! - Every play event (nudge toward the acting side, scaled by kind)
//! - Goals (largest nudge, then a partial reset as the game restarts)
//! - Quiet minutes (decay toward balance)
//! - Half-time (recovery toward balance)

use serde::{Deserialize, Serialize};

use crate::engine::config::DominanceConfig;
use crate::models::{EventKind, Outcome, Side};

/// Dominance trend direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominanceTrend {
    HomeRising,
    AwayRising,
    #[default]
    Stable,
}

/// The part of an event the tracker reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DominanceInput {
    pub kind: EventKind,
    pub acting_team: Side,
    pub outcome: Outcome,
}

/// Pure update: `(current, event) -> new`, always within `[-limit, limit]`.
pub fn update(current: f32, input: &DominanceInput, cfg: &DominanceConfig) -> f32 {
    let sign = input.acting_team.sign();
    let next = if input.outcome.is_goal() {
        (current + sign * cfg.goal_weight) * cfg.goal_reset_factor
    } else {
        current + sign * cfg.weight(input.kind)
    };
    clamp(next, cfg)
}

/// One quiet minute of decay toward zero.
pub fn decay(current: f32, cfg: &DominanceConfig) -> f32 {
    clamp(current * (1.0 - cfg.decay_rate), cfg)
}

fn clamp(value: f32, cfg: &DominanceConfig) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-cfg.limit, cfg.limit)
    }
}

/// Dominance state owned by the match state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DominanceTracker {
    pub value: f32,
    pub trend: DominanceTrend,
}

impl DominanceTracker {
    pub fn apply_event(&mut self, input: &DominanceInput, cfg: &DominanceConfig) {
        let next = update(self.value, input, cfg);
        let delta = next - self.value;
        self.trend = if delta > 0.01 {
            DominanceTrend::HomeRising
        } else if delta < -0.01 {
            DominanceTrend::AwayRising
        } else {
            DominanceTrend::Stable
        };
        self.value = next;
    }

    pub fn tick_quiet(&mut self, cfg: &DominanceConfig) {
        self.value = decay(self.value, cfg);
        if self.value.abs() < 1.0 {
            self.trend = DominanceTrend::Stable;
        }
    }

    /// Break in play; both sides reset somewhat.
    pub fn apply_halftime_recovery(&mut self, cfg: &DominanceConfig) {
        self.value = clamp(self.value * cfg.halftime_retain, cfg);
        self.trend = DominanceTrend::Stable;
    }

    /// Side in control, if any.
    pub fn leader(&self) -> Option<Side> {
        if self.value > 0.0 {
            Some(Side::Home)
        } else if self.value < 0.0 {
            Some(Side::Away)
        } else {
            None
        }
    }
}
