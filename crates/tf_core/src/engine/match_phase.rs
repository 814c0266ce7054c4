//! Match phase flow, including extra time and the penalty shootout.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    #[default]
    PreMatch,
    FirstHalf,
    HalfTime,
    SecondHalf,
    FullTime,
    ExtraTime,
    PenaltyShootout,
    Finished,
}

impl MatchPhase {
    /// Phases in which the clock runs and events can happen.
    pub fn is_playing(&self) -> bool {
        matches!(self, MatchPhase::FirstHalf | MatchPhase::SecondHalf | MatchPhase::ExtraTime)
    }
}

/// Advance to the next match phase after a phase ends.
///
/// `is_draw` should reflect the score at the end of the phase.
pub fn next_phase(current: MatchPhase, knockout: bool, is_draw: bool) -> MatchPhase {
    match current {
        MatchPhase::PreMatch => MatchPhase::FirstHalf,
        MatchPhase::FirstHalf => MatchPhase::HalfTime,
        MatchPhase::HalfTime => MatchPhase::SecondHalf,
        MatchPhase::SecondHalf => MatchPhase::FullTime,
        MatchPhase::FullTime => {
            if is_draw && knockout {
                MatchPhase::ExtraTime
            } else {
                MatchPhase::Finished
            }
        }
        MatchPhase::ExtraTime => {
            if is_draw {
                MatchPhase::PenaltyShootout
            } else {
                MatchPhase::Finished
            }
        }
        MatchPhase::PenaltyShootout => MatchPhase::Finished,
        MatchPhase::Finished => MatchPhase::Finished,
    }
}
