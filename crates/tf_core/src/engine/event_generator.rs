//! Event Generator
//!
//! Proposes the next match event from the current flow state. Two zones:
//!
//! - Midfield: the possessing side either advances (`Attack`) or loses the
//!   ball (`MidfieldBattle` by the opponent).
//! - Attacking third: the attack ends in a `Shot`, a `DefensiveAction`, or
//!   occasionally a `Penalty`.
//!
//! Shot-class proposals carry a ready [`ShotContext`]; the orchestrator
//! resolves them. All randomness comes from the `rng` argument.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_distr::Normal;

use crate::engine::config::MatchConfig;
use crate::engine::free_kicks::{choose_play, FreeKickPlay, ScheduledFreeKick};
use crate::engine::lineup::MatchSide;
use crate::engine::match_state::{FlowState, MatchState, Zone};
use crate::engine::probability::logistic_probability;
use crate::engine::resolver::{ShotContext, ShotSituation};
use crate::error::{MatchError, Result};
use crate::models::{EventKind, Side};

/// A proposed event, not yet resolved or recorded.
#[derive(Debug, Clone)]
pub struct EventProposal {
    pub kind: EventKind,
    pub acting_team: Side,
    /// Present for shot-class proposals.
    pub shot: Option<ShotContext>,
    /// Empty unless narration is on. Shot-class commentary comes from the resolver.
    pub commentary: String,
    /// Flow state once the event is over.
    pub after: FlowState,
}

pub struct EventGenerator<'a> {
    home: &'a MatchSide,
    away: &'a MatchSide,
    config: &'a MatchConfig,
    narrate: bool,
    shot_distance: Normal<f32>,
}

impl<'a> EventGenerator<'a> {
    pub fn new(
        home: &'a MatchSide,
        away: &'a MatchSide,
        config: &'a MatchConfig,
        narrate: bool,
    ) -> Result<Self> {
        let shooting = &config.shooting;
        let shot_distance = Normal::new(shooting.mean_shot_distance, shooting.shot_distance_sd)
            .map_err(|e| MatchError::config("shooting.shot_distance_sd", e.to_string()))?;
        Ok(Self { home, away, config, narrate, shot_distance })
    }

    pub fn side(&self, side: Side) -> &'a MatchSide {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    /// Propose the next event from the current state.
    pub fn next_event<R: Rng + ?Sized>(&self, state: &MatchState, rng: &mut R) -> Result<EventProposal> {
        match state.flow.zone {
            Zone::Midfield => self.midfield(state, rng),
            Zone::Attacking(attacker) => self.attack(state, attacker, rng),
        }
    }

    fn midfield<R: Rng + ?Sized>(&self, state: &MatchState, rng: &mut R) -> Result<EventProposal> {
        let possessor = state.flow.possession;
        let opponent = possessor.opponent();

        let mut own = self.side(possessor).base_zonal.midfield;
        if possessor == Side::Home {
            own *= self.config.effective_home_advantage();
        }
        let other = self.side(opponent).base_zonal.midfield;

        let battle = WeightedIndex::new([own, other])
            .map_err(|e| MatchError::config("flow.home_advantage", e.to_string()))?;

        if battle.sample(rng) == 0 {
            Ok(EventProposal {
                kind: EventKind::Attack,
                acting_team: possessor,
                shot: None,
                commentary: self.say(|| {
                    format!("{}' {} break into the final third.", state.minute, self.side(possessor).name)
                }),
                after: FlowState::attacking(possessor, None),
            })
        } else {
            Ok(EventProposal {
                kind: EventKind::MidfieldBattle,
                acting_team: opponent,
                shot: None,
                commentary: self.say(|| {
                    format!("{}' {} win the ball in midfield.", state.minute, self.side(opponent).name)
                }),
                after: FlowState::midfield(opponent),
            })
        }
    }

    fn attack<R: Rng + ?Sized>(
        &self,
        state: &MatchState,
        attacker: Side,
        rng: &mut R,
    ) -> Result<EventProposal> {
        let flow = &self.config.flow;
        let att = self.side(attacker);
        let def = self.side(attacker.opponent());

        // Home advantage lifts the attacker only; the gate uses base strengths.
        let gate = ((1.0 - flow.def_gk_blend) * def.base_zonal.defence
            + flow.def_gk_blend * def.base_zonal.goalkeeper)
            * state.flow.defense_modifier.unwrap_or(1.0);
        let pressure = (flow.pressure_escalation_step
            * state.streak.for_side(attacker).saturating_sub(1) as f32)
            .min(flow.pressure_escalation_cap);
        let p_shot =
            (logistic_probability(att.zonal.attack, gate, flow.attack_scaling) + pressure).min(0.97);
        let stop = 1.0 - p_shot;

        let choice = WeightedIndex::new([
            p_shot,
            stop * (1.0 - flow.penalty_award_probability),
            stop * flow.penalty_award_probability,
        ])
        .map_err(|e| MatchError::config("flow.penalty_award_probability", e.to_string()))?;

        let after = FlowState::midfield(def.side);
        match choice.sample(rng) {
            0 => {
                let shooter = att.pick_shooter(rng)?;
                let cfg = &self.config.shooting;
                let distance = self
                    .shot_distance
                    .sample(rng)
                    .clamp(cfg.min_shot_distance, cfg.max_shot_distance);
                Ok(EventProposal {
                    kind: EventKind::Shot,
                    acting_team: attacker,
                    shot: Some(ShotContext::new(
                        ShotSituation::OpenPlay,
                        attacker,
                        state.minute,
                        shooter,
                        def.goalkeeper(),
                        distance,
                        self.config,
                    )),
                    commentary: String::new(),
                    after,
                })
            }
            1 => Ok(EventProposal {
                kind: EventKind::DefensiveAction,
                acting_team: def.side,
                shot: None,
                commentary: self.say(|| format!("{}' {} hold firm at the back.", state.minute, def.name)),
                after,
            }),
            _ => Ok(EventProposal {
                kind: EventKind::Penalty,
                acting_team: attacker,
                shot: Some(ShotContext::new(
                    ShotSituation::Penalty,
                    attacker,
                    state.minute,
                    att.penalty_taker(),
                    def.goalkeeper(),
                    self.config.shooting.penalty_distance,
                    self.config,
                )),
                commentary: String::new(),
                after,
            }),
        }
    }

    /// Play a scheduled free kick.
    pub fn free_kick<R: Rng + ?Sized>(
        &self,
        state: &MatchState,
        kick: &ScheduledFreeKick,
        rng: &mut R,
    ) -> EventProposal {
        let spec = self.config.set_pieces.zone(kick.zone);
        let taking = self.side(kick.side);
        let defending = self.side(kick.side.opponent());

        match choose_play(spec, rng.gen()) {
            FreeKickPlay::Direct => EventProposal {
                kind: EventKind::FreeKick,
                acting_team: kick.side,
                shot: Some(ShotContext::new(
                    ShotSituation::FreeKick(kick.zone),
                    kick.side,
                    state.minute,
                    taking.free_kick_taker(),
                    defending.goalkeeper(),
                    spec.distance_m,
                    self.config,
                )),
                commentary: String::new(),
                after: FlowState::midfield(defending.side),
            },
            FreeKickPlay::Indirect => EventProposal {
                kind: EventKind::FreeKick,
                acting_team: kick.side,
                shot: None,
                commentary: self.say(|| {
                    format!(
                        "{}' {} swing a free kick into the box from a {} position.",
                        state.minute,
                        taking.name,
                        kick.zone.label()
                    )
                }),
                after: FlowState::attacking(kick.side, Some(spec.defense_modifier)),
            },
            FreeKickPlay::Restart => EventProposal {
                kind: EventKind::FreeKick,
                acting_team: kick.side,
                shot: None,
                commentary: self.say(|| {
                    format!(
                        "{}' {} restart play safely from a {} free kick.",
                        state.minute,
                        taking.name,
                        kick.zone.label()
                    )
                }),
                after: FlowState::midfield(kick.side),
            },
        }
    }

    fn say(&self, line: impl FnOnce() -> String) -> String {
        if self.narrate {
            line()
        } else {
            String::new()
        }
    }
}
