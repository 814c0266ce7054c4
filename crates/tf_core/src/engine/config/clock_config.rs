//! Match clock

use serde::{Deserialize, Serialize};

use super::{check_range, check_unit};
use crate::error::{MatchError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Last minute of the first half (default: 45)
    pub half_time_minute: u8,
    /// Last minute of regulation (default: 90)
    pub full_time_minute: u8,
    /// Length of extra time in a knockout tie (default: 30)
    pub extra_time_minutes: u8,
    /// Chance that a minute tick produces a play event (default: 0.3)
    pub event_probability: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            half_time_minute: 45,
            full_time_minute: 90,
            extra_time_minutes: 30,
            event_probability: 0.3,
        }
    }
}

impl ClockConfig {
    pub fn extra_time_end(&self) -> u8 {
        self.full_time_minute.saturating_add(self.extra_time_minutes)
    }

    pub fn validate(&self) -> Result<()> {
        if self.half_time_minute == 0 || self.half_time_minute >= self.full_time_minute {
            return Err(MatchError::config(
                "clock.half_time_minute",
                format!(
                    "must be in 1..{}, got {}",
                    self.full_time_minute, self.half_time_minute
                ),
            ));
        }
        check_range("clock.full_time_minute", self.full_time_minute as f32, 2.0, 120.0)?;
        check_range(
            "clock.extra_time_minutes",
            self.extra_time_minutes as f32,
            1.0,
            (u8::MAX - self.full_time_minute) as f32,
        )?;
        check_unit("clock.event_probability", self.event_probability)?;
        Ok(())
    }
}
