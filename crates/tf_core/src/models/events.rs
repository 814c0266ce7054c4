use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::team::Side;
use crate::engine::match_phase::MatchPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Ball won in the middle of the park.
    MidfieldBattle,
    /// Possessing side breaks into the attacking third.
    Attack,
    Shot,
    FreeKick,
    Penalty,
    /// Attack snuffed out by the defending side.
    DefensiveAction,
}

impl EventKind {
    /// Kinds that go through the shot/set-piece resolver.
    pub fn is_shot_class(&self) -> bool {
        matches!(self, EventKind::Shot | EventKind::FreeKick | EventKind::Penalty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    None,
    Goal,
    Saved,
    Missed,
    Blocked,
}

impl Outcome {
    pub fn is_goal(&self) -> bool {
        matches!(self, Outcome::Goal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Names the shooter and the situation.
    Announcement,
    /// Crowd and keeper reaction while the ball is in flight.
    Tension,
    /// The outcome.
    Reveal,
}

/// One step of the suspense buildup a renderer can replay with pacing.
///
/// Only the [`StageKind::Reveal`] stage carries an outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildupStage {
    pub stage: StageKind,
    pub narrative: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

impl BuildupStage {
    pub fn announcement(narrative: String) -> Self {
        Self { stage: StageKind::Announcement, narrative, outcome: None }
    }

    pub fn tension(narrative: String) -> Self {
        Self { stage: StageKind::Tension, narrative, outcome: None }
    }

    pub fn reveal(narrative: String, outcome: Outcome) -> Self {
        Self { stage: StageKind::Reveal, narrative, outcome: Some(outcome) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    /// Position in the log; strictly increasing.
    pub seq: u32,
    pub minute: u8,
    pub phase: MatchPhase,
    pub kind: EventKind,
    pub acting_team: Side,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goalkeeper: Option<PlayerId>,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_probability: Option<f32>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub commentary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buildup_stages: Vec<BuildupStage>,
}

/// Phase change marker, kept apart from play events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseMark {
    pub minute: u8,
    pub phase: MatchPhase,
}

/// Dominance value at the end of a minute tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DominanceSample {
    pub minute: u8,
    pub value: f32,
}
