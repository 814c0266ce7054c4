//! Mutable state of a single simulation run.

use serde::{Deserialize, Serialize};

use crate::engine::config::DominanceConfig;
use crate::engine::dominance::{DominanceInput, DominanceTracker};
use crate::engine::match_phase::MatchPhase;
use crate::models::{MatchEvent, Side};

/// Where the ball is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "zone", content = "side")]
pub enum Zone {
    Midfield,
    /// In the attacking third of the given side.
    Attacking(Side),
}

/// Possession and field position carried from one event to the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowState {
    pub possession: Side,
    pub zone: Zone,
    /// One-shot multiplier on the defensive gate, left by an indirect free kick.
    pub defense_modifier: Option<f32>,
}

impl FlowState {
    pub fn midfield(possession: Side) -> Self {
        Self { possession, zone: Zone::Midfield, defense_modifier: None }
    }

    pub fn attacking(side: Side, defense_modifier: Option<f32>) -> Self {
        Self { possession: side, zone: Zone::Attacking(side), defense_modifier }
    }
}

/// Consecutive events by the same acting team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PressureStreak {
    pub side: Option<Side>,
    pub length: u8,
}

impl PressureStreak {
    pub fn push(&mut self, acting: Side) {
        if self.side == Some(acting) {
            self.length = self.length.saturating_add(1);
        } else {
            self.side = Some(acting);
            self.length = 1;
        }
    }

    /// Streak length if `side` owns it.
    pub fn for_side(&self, side: Side) -> u8 {
        if self.side == Some(side) {
            self.length
        } else {
            0
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchState {
    pub minute: u8,
    pub phase: MatchPhase,
    pub score_home: u8,
    pub score_away: u8,
    pub dominance: DominanceTracker,
    /// Append-only. Empty when the log is not retained.
    pub event_log: Vec<MatchEvent>,
    pub flow: FlowState,
    pub streak: PressureStreak,
    next_seq: u32,
    retain_log: bool,
}

impl MatchState {
    pub fn new(kickoff: Side, retain_log: bool) -> Self {
        Self {
            minute: 0,
            phase: MatchPhase::PreMatch,
            score_home: 0,
            score_away: 0,
            dominance: DominanceTracker::default(),
            event_log: Vec::new(),
            flow: FlowState::midfield(kickoff),
            streak: PressureStreak::default(),
            next_seq: 0,
            retain_log,
        }
    }

    pub fn score(&self, side: Side) -> u8 {
        match side {
            Side::Home => self.score_home,
            Side::Away => self.score_away,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.score_home == self.score_away
    }

    /// Number of events recorded so far, retained or not.
    pub fn events_recorded(&self) -> u32 {
        self.next_seq
    }

    /// Append an event. The score moves only on a goal; dominance moves once.
    pub fn record(&mut self, mut event: MatchEvent, cfg: &DominanceConfig) {
        event.seq = self.next_seq;
        self.next_seq += 1;

        if event.outcome.is_goal() {
            match event.acting_team {
                Side::Home => self.score_home = self.score_home.saturating_add(1),
                Side::Away => self.score_away = self.score_away.saturating_add(1),
            }
        }

        self.dominance.apply_event(
            &DominanceInput {
                kind: event.kind,
                acting_team: event.acting_team,
                outcome: event.outcome,
            },
            cfg,
        );
        self.streak.push(event.acting_team);

        if self.retain_log {
            self.event_log.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventKind, Outcome};

    fn event(kind: EventKind, side: Side, outcome: Outcome, minute: u8) -> MatchEvent {
        MatchEvent {
            seq: 0,
            minute,
            phase: MatchPhase::FirstHalf,
            kind,
            acting_team: side,
            player: None,
            goalkeeper: None,
            outcome,
            distance_meters: None,
            goal_probability: None,
            commentary: String::new(),
            buildup_stages: Vec::new(),
        }
    }

    #[test]
    fn test_only_goals_change_score() {
        let cfg = DominanceConfig::default();
        let mut state = MatchState::new(Side::Home, true);
        state.record(event(EventKind::Shot, Side::Home, Outcome::Saved, 3), &cfg);
        state.record(event(EventKind::Attack, Side::Away, Outcome::None, 4), &cfg);
        assert_eq!((state.score_home, state.score_away), (0, 0));
        state.record(event(EventKind::Shot, Side::Away, Outcome::Goal, 5), &cfg);
        assert_eq!((state.score_home, state.score_away), (0, 1));
        assert!(!state.is_draw());
    }

    #[test]
    fn test_sequence_numbers_increase() {
        let cfg = DominanceConfig::default();
        let mut state = MatchState::new(Side::Away, true);
        for m in 1..5 {
            state.record(event(EventKind::MidfieldBattle, Side::Home, Outcome::None, m), &cfg);
        }
        let seqs: Vec<u32> = state.event_log.iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_lean_state_keeps_score_without_log() {
        let cfg = DominanceConfig::default();
        let mut state = MatchState::new(Side::Home, false);
        state.record(event(EventKind::Penalty, Side::Home, Outcome::Goal, 10), &cfg);
        assert!(state.event_log.is_empty());
        assert_eq!(state.score_home, 1);
        assert_eq!(state.events_recorded(), 1);
        assert!(state.dominance.value > 0.0);
    }

    #[test]
    fn test_pressure_streak() {
        let mut streak = PressureStreak::default();
        streak.push(Side::Home);
        streak.push(Side::Home);
        streak.push(Side::Home);
        assert_eq!(streak.for_side(Side::Home), 3);
        assert_eq!(streak.for_side(Side::Away), 0);
        streak.push(Side::Away);
        assert_eq!(streak.for_side(Side::Away), 1);
    }
}
