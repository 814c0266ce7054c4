//! Match Orchestrator
//!
//! Drives one match through its phases minute by minute:
//!
//! ```text
//! PreMatch → FirstHalf → HalfTime → SecondHalf → FullTime
//!          → [ExtraTime → PenaltyShootout] → Finished
//! ```
//!
//! Each minute tick plays the free kicks scheduled for that minute, then
//! with probability `clock.event_probability` asks the generator for an
//! event. Shot-class events go through the resolver before they are
//! recorded. A tick with no event decays dominance.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::engine::config::MatchConfig;
use crate::engine::event_generator::{EventGenerator, EventProposal};
use crate::engine::free_kicks::{schedule_free_kicks, ScheduledFreeKick};
use crate::engine::lineup::MatchSide;
use crate::engine::match_phase::{next_phase, MatchPhase};
use crate::engine::match_state::{FlowState, MatchState, PressureStreak};
use crate::engine::morale::{compute_deltas, FinalScore};
use crate::engine::resolver::{resolve, ShotRolls};
use crate::engine::shootout::run_shootout;
use crate::error::Result;
use crate::models::{
    DominanceSample, MatchEvent, MatchReport, Outcome, PhaseMark, PlayerContribution, PlayerId,
    ShootoutResult, Side, Team,
};

/// How much a run records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationMode {
    /// Event log, narrative, dominance trace, morale.
    Detailed,
    /// Score only. Used by batch trials.
    Lean,
}

/// Raw product of one run, before it is turned into a report.
#[derive(Debug, Clone)]
pub struct MatchRun {
    pub state: MatchState,
    pub phases: Vec<PhaseMark>,
    pub dominance_trace: Vec<DominanceSample>,
    pub shootout: Option<ShootoutResult>,
    pub contributions: Vec<PlayerContribution>,
}

impl MatchRun {
    pub fn final_score(&self) -> FinalScore {
        FinalScore {
            home: self.state.score_home,
            away: self.state.score_away,
            shootout_winner: self.shootout.as_ref().map(|s| s.winner),
        }
    }

    fn contribution_mut(&mut self, id: PlayerId, side: Side) -> Option<&mut PlayerContribution> {
        self.contributions.iter_mut().find(|c| c.player_id == id && c.side == side)
    }
}

/// A validated fixture, ready to be simulated any number of times.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    home_team: Team,
    away_team: Team,
    home: MatchSide,
    away: MatchSide,
    config: MatchConfig,
}

impl MatchEngine {
    /// Validate configuration and both rosters, then pick the XIs.
    pub fn new(home: Team, away: Team, config: MatchConfig) -> Result<Self> {
        config.validate()?;
        home.validate(Side::Home)?;
        away.validate(Side::Away)?;
        let home_side = MatchSide::prepare(&home, Side::Home, &config)?;
        let away_side = MatchSide::prepare(&away, Side::Away, &config)?;
        Ok(Self { home_team: home, away_team: away, home: home_side, away: away_side, config })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn side(&self, side: Side) -> &MatchSide {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    /// Detailed simulation. Same seed, same report.
    pub fn simulate(&self, seed: u64) -> Result<MatchReport> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let run = self.run(&mut rng, SimulationMode::Detailed)?;

        let score = run.final_score();
        let morale_deltas =
            compute_deltas(&score, &run.contributions, &self.home_team, &self.away_team, &self.config);

        info!(
            "Full time: {} {}-{} {}{}",
            self.home.name,
            score.home,
            score.away,
            self.away.name,
            match score.shootout_winner {
                Some(side) => format!(" ({} side wins on penalties)", side),
                None => String::new(),
            }
        );

        Ok(MatchReport {
            seed,
            home_name: self.home.name.clone(),
            away_name: self.away.name.clone(),
            score_home: score.home,
            score_away: score.away,
            phases: run.phases,
            final_dominance: run.state.dominance.value,
            events: run.state.event_log,
            dominance_trace: run.dominance_trace,
            shootout: run.shootout,
            home_profile: self.home.profile(&self.config),
            away_profile: self.away.profile(&self.config),
            contributions: run.contributions,
            morale_deltas,
        })
    }

    /// Play one match with the given generator.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R, mode: SimulationMode) -> Result<MatchRun> {
        let detailed = mode == SimulationMode::Detailed;
        let gen = EventGenerator::new(&self.home, &self.away, &self.config, detailed)?;
        let clock = &self.config.clock;

        let kickoff = if rng.gen_bool(0.5) { Side::Home } else { Side::Away };
        let free_kicks = schedule_free_kicks(&self.config.set_pieces, clock, rng)?;
        let mut fk_cursor = 0;

        let contributions = self
            .home
            .lineup
            .iter()
            .map(|p| PlayerContribution::new(p.id, Side::Home))
            .chain(self.away.lineup.iter().map(|p| PlayerContribution::new(p.id, Side::Away)))
            .collect();

        let mut run = MatchRun {
            state: MatchState::new(kickoff, detailed),
            phases: Vec::new(),
            dominance_trace: Vec::new(),
            shootout: None,
            contributions,
        };
        self.enter_phase(&mut run, MatchPhase::PreMatch);

        let mut phase = MatchPhase::PreMatch;
        while phase != MatchPhase::Finished {
            phase = next_phase(phase, self.config.knockout, run.state.is_draw());
            self.enter_phase(&mut run, phase);

            match phase {
                MatchPhase::FirstHalf => {
                    for minute in 1..=clock.half_time_minute {
                        self.tick(&gen, &mut run, minute, &free_kicks, &mut fk_cursor, detailed, rng)?;
                    }
                }
                MatchPhase::HalfTime => {
                    run.state.dominance.apply_halftime_recovery(&self.config.dominance);
                    run.state.flow = FlowState::midfield(kickoff.opponent());
                    run.state.streak = PressureStreak::default();
                }
                MatchPhase::SecondHalf => {
                    for minute in clock.half_time_minute + 1..=clock.full_time_minute {
                        self.tick(&gen, &mut run, minute, &free_kicks, &mut fk_cursor, detailed, rng)?;
                    }
                }
                MatchPhase::ExtraTime => {
                    run.state.flow = FlowState::midfield(kickoff);
                    run.state.streak = PressureStreak::default();
                    for minute in clock.full_time_minute + 1..=clock.extra_time_end() {
                        self.tick(&gen, &mut run, minute, &free_kicks, &mut fk_cursor, detailed, rng)?;
                    }
                }
                MatchPhase::PenaltyShootout => {
                    run.shootout = Some(run_shootout(
                        &self.home,
                        &self.away,
                        run.state.minute,
                        &self.config,
                        detailed,
                        rng,
                    ));
                }
                MatchPhase::PreMatch | MatchPhase::FullTime | MatchPhase::Finished => {}
            }
        }

        Ok(run)
    }

    fn enter_phase(&self, run: &mut MatchRun, phase: MatchPhase) {
        run.state.phase = phase;
        debug!("Phase {:?} at minute {}", phase, run.state.minute);
        run.phases.push(PhaseMark { minute: run.state.minute, phase });
    }

    #[allow(clippy::too_many_arguments)]
    fn tick<R: Rng + ?Sized>(
        &self,
        gen: &EventGenerator<'_>,
        run: &mut MatchRun,
        minute: u8,
        free_kicks: &[ScheduledFreeKick],
        fk_cursor: &mut usize,
        detailed: bool,
        rng: &mut R,
    ) -> Result<()> {
        run.state.minute = minute;
        let mut active = false;

        while let Some(kick) = free_kicks.get(*fk_cursor).filter(|k| k.minute <= minute) {
            *fk_cursor += 1;
            let proposal = gen.free_kick(&run.state, kick, rng);
            self.apply(run, proposal, detailed, rng);
            active = true;
        }

        if rng.gen::<f32>() < self.config.clock.event_probability {
            let proposal = gen.next_event(&run.state, rng)?;
            self.apply(run, proposal, detailed, rng);
            active = true;
        }

        if !active {
            run.state.dominance.tick_quiet(&self.config.dominance);
        }
        if detailed {
            run.dominance_trace.push(DominanceSample { minute, value: run.state.dominance.value });
        }
        Ok(())
    }

    fn apply<R: Rng + ?Sized>(
        &self,
        run: &mut MatchRun,
        proposal: EventProposal,
        detailed: bool,
        rng: &mut R,
    ) {
        let mut event = MatchEvent {
            seq: 0,
            minute: run.state.minute,
            phase: run.state.phase,
            kind: proposal.kind,
            acting_team: proposal.acting_team,
            player: None,
            goalkeeper: None,
            outcome: Outcome::None,
            distance_meters: None,
            goal_probability: None,
            commentary: proposal.commentary,
            buildup_stages: Vec::new(),
        };

        if let Some(ctx) = &proposal.shot {
            let rolls = ShotRolls::draw(rng, &self.config.shooting);
            let resolution = resolve(ctx, &rolls, &self.config.shooting, detailed);

            if let Some(c) = run.contribution_mut(ctx.shooter, ctx.side) {
                c.shots = c.shots.saturating_add(1);
                if resolution.outcome.is_goal() {
                    c.goals = c.goals.saturating_add(1);
                }
            }
            if resolution.outcome == Outcome::Saved {
                if let Some(c) = run.contribution_mut(ctx.goalkeeper, ctx.side.opponent()) {
                    c.saves = c.saves.saturating_add(1);
                }
            }
            if resolution.outcome.is_goal() {
                debug!(
                    "Goal for {} side: {} ({:?}, p={:.2}) minute {}",
                    ctx.side, ctx.shooter_name, proposal.kind, resolution.goal_probability, ctx.minute
                );
            }

            event.player = Some(ctx.shooter);
            event.goalkeeper = Some(ctx.goalkeeper);
            event.outcome = resolution.outcome;
            event.distance_meters = Some(ctx.distance_m);
            event.goal_probability = Some(resolution.goal_probability);
            if detailed {
                event.commentary = resolution.commentary();
                event.buildup_stages = resolution.stages;
            }
        }

        run.state.record(event, &self.config.dominance);
        run.state.flow = proposal.after;
    }
}

/// One-shot detailed simulation.
pub fn simulate_match(home: &Team, away: &Team, config: &MatchConfig, seed: u64) -> Result<MatchReport> {
    MatchEngine::new(home.clone(), away.clone(), config.clone())?.simulate(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::{create_test_team, create_test_team_with_subs};
    use crate::error::MatchError;
    use crate::engine::config::SetPieceConfig;
    use crate::models::{generate_starter_squad, EventKind, Position, ResultKind, StageKind};
    use proptest::prelude::*;

    fn engine(config: MatchConfig) -> MatchEngine {
        MatchEngine::new(create_test_team_with_subs("Home", 1), create_test_team_with_subs("Away", 2), config)
            .unwrap()
    }

    #[test]
    fn test_same_seed_same_report() {
        let e = engine(MatchConfig::default());
        let a = e.simulate(2024).unwrap();
        let b = e.simulate(2024).unwrap();
        assert_eq!(a, b);
        let json_a = serde_json::to_string(&a).unwrap();
        let json_b = serde_json::to_string(&b).unwrap();
        assert_eq!(json_a, json_b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let e = engine(MatchConfig::default());
        let reports: Vec<_> = (0..10).map(|s| e.simulate(s).unwrap()).collect();
        assert!(reports.windows(2).any(|w| w[0].events != w[1].events));
    }

    #[test]
    fn test_run_ends_finished_with_ordered_log() {
        let e = engine(MatchConfig::default());
        for seed in 0..30 {
            let report = e.simulate(seed).unwrap();
            assert_eq!(report.phases.last().map(|m| m.phase), Some(MatchPhase::Finished));
            assert!(report.events.windows(2).all(|w| w[0].minute <= w[1].minute));
            assert!(report.events.windows(2).all(|w| w[0].seq < w[1].seq));
            assert!(report.phases.windows(2).all(|w| w[0].minute <= w[1].minute));
            assert!(report.events.iter().all(|ev| ev.minute >= 1 && ev.minute <= 90));
            assert_eq!(report.dominance_trace.len(), 90);
            assert!(report.shootout.is_none());
        }
    }

    #[test]
    fn test_score_matches_goal_events() {
        let e = engine(MatchConfig::default());
        for seed in 100..130 {
            let report = e.simulate(seed).unwrap();
            let goals = |side: Side| {
                report.events.iter().filter(|ev| ev.acting_team == side && ev.outcome.is_goal()).count()
            };
            assert_eq!(goals(Side::Home), report.score_home as usize);
            assert_eq!(goals(Side::Away), report.score_away as usize);
            let credited: u32 = report.contributions.iter().map(|c| c.goals as u32).sum();
            assert_eq!(credited, (report.score_home + report.score_away) as u32);
        }
    }

    #[test]
    fn test_only_shot_class_events_have_outcomes() {
        let report = engine(MatchConfig::default()).simulate(7).unwrap();
        for ev in &report.events {
            if ev.outcome != Outcome::None {
                assert!(ev.kind.is_shot_class());
            }
            if ev.kind == EventKind::Shot {
                assert_ne!(ev.outcome, Outcome::None);
                assert_eq!(ev.buildup_stages.len(), 3);
                assert_eq!(ev.buildup_stages[2].stage, StageKind::Reveal);
            }
        }
    }

    #[test]
    fn test_dominance_trace_within_limit() {
        let config = MatchConfig::default();
        let limit = config.dominance.limit;
        let report = engine(config).simulate(55).unwrap();
        assert!(report.dominance_trace.iter().all(|s| s.value.abs() <= limit));
    }

    /// No events at all, so every match ends 0-0.
    fn goalless(mut config: MatchConfig) -> MatchConfig {
        config.clock.event_probability = 0.0;
        config.set_pieces = SetPieceConfig::none();
        config
    }

    #[test]
    fn test_knockout_draw_goes_to_extra_time_and_penalties() {
        let e = engine(goalless(MatchConfig::knockout_tie()));
        let report = e.simulate(3).unwrap();
        let phases: Vec<MatchPhase> = report.phases.iter().map(|m| m.phase).collect();
        assert_eq!(
            phases,
            vec![
                MatchPhase::PreMatch,
                MatchPhase::FirstHalf,
                MatchPhase::HalfTime,
                MatchPhase::SecondHalf,
                MatchPhase::FullTime,
                MatchPhase::ExtraTime,
                MatchPhase::PenaltyShootout,
                MatchPhase::Finished,
            ]
        );
        assert!(report.events.is_empty());
        assert_eq!(report.dominance_trace.len(), 120);

        // Shootout kicks never reach the match score.
        assert_eq!((report.score_home, report.score_away), (0, 0));
        let shootout = report.shootout.as_ref().expect("level after extra time");
        assert_ne!(shootout.home_score, shootout.away_score);
        assert_eq!(report.winner(), Some(shootout.winner));
        assert_eq!(report.result_for(shootout.winner), ResultKind::Win);
    }

    #[test]
    fn test_league_draw_finishes_at_full_time() {
        let report = engine(goalless(MatchConfig::default())).simulate(3).unwrap();
        assert_eq!(report.phases.len(), 6);
        assert!(report.shootout.is_none());
        assert_eq!(report.winner(), None);
        // Draw: +1 x 0.8 rounds to 1 for every starter.
        assert!(report.morale_deltas.iter().all(|d| d.delta >= 0));
    }

    #[test]
    fn test_ten_players_no_keeper_rejected_before_play() {
        let mut short = create_test_team("Short", 1);
        short.players.retain(|p| p.position != Position::Goalkeeper);
        assert_eq!(short.players.len(), 10);
        let err = MatchEngine::new(short, create_test_team("Full", 2), MatchConfig::default()).unwrap_err();
        assert!(matches!(err, MatchError::RosterIncomplete { side: Side::Home, .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = MatchConfig::default();
        config.clock.event_probability = 2.0;
        let err = MatchEngine::new(create_test_team("A", 1), create_test_team("B", 2), config).unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfig { .. }));
    }

    #[test]
    fn test_morale_deltas_reported_and_toggle() {
        let on = engine(MatchConfig::default()).simulate(9).unwrap();
        assert!(!on.morale_deltas.is_empty());
        let off = engine(MatchConfig::default().with_morale_effect(false)).simulate(9).unwrap();
        assert!(off.morale_deltas.is_empty());
    }

    #[test]
    fn test_generated_squads_play() {
        let home = generate_starter_squad("Generated A", 60, 1);
        let away = generate_starter_squad("Generated B", 55, 2);
        let report = simulate_match(&home, &away, &MatchConfig::default(), 77).unwrap();
        assert_eq!(report.home_profile.lineup.len(), 11);
        assert_eq!(report.contributions.len(), 22);
    }

    #[test]
    fn test_lean_run_matches_detailed_score() {
        let e = engine(MatchConfig::default());
        for seed in 0..20 {
            let detailed = e.simulate(seed).unwrap();
            let lean = e.run(&mut ChaCha8Rng::seed_from_u64(seed), SimulationMode::Lean).unwrap();
            assert!(lean.state.event_log.is_empty());
            assert!(lean.dominance_trace.is_empty());
            assert_eq!((lean.state.score_home, lean.state.score_away), (detailed.score_home, detailed.score_away));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_every_run_finishes(seed in any::<u64>(), knockout in any::<bool>()) {
            let config = MatchConfig { knockout, ..MatchConfig::default() };
            let report = engine(config).simulate(seed).unwrap();
            prop_assert_eq!(report.phases.last().map(|m| m.phase), Some(MatchPhase::Finished));
            if knockout {
                prop_assert!(report.winner().is_some());
            }
        }
    }
}
