//! Post-match morale
//!
//! Turns a final result and per-player contributions into morale deltas.
//! The engine never writes morale back; the host applies the deltas.
//!
//! - Participants (the two XIs): result delta scaled by personality, plus
//!   goal, hat-trick and clean-sheet bonuses.
//! - Everyone else in the squads drifts toward the configured baseline.
//! - A delta never takes morale outside 0..=100.

use serde::{Deserialize, Serialize};

use crate::engine::config::MatchConfig;
use crate::models::{
    MatchReport, MoraleComponent, MoraleDelta, MoraleReason, Player, PlayerContribution, Position,
    ResultKind, Side, Team,
};

/// Final score as the morale updater sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub home: u8,
    pub away: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shootout_winner: Option<Side>,
}

impl FinalScore {
    pub fn result_for(&self, side: Side) -> ResultKind {
        let winner = match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => self.shootout_winner,
        };
        match winner {
            Some(w) if w == side => ResultKind::Win,
            Some(_) => ResultKind::Loss,
            None => ResultKind::Draw,
        }
    }

    pub fn conceded(&self, side: Side) -> u8 {
        match side {
            Side::Home => self.away,
            Side::Away => self.home,
        }
    }
}

impl From<&MatchReport> for FinalScore {
    fn from(report: &MatchReport) -> Self {
        Self {
            home: report.score_home,
            away: report.score_away,
            shootout_winner: report.shootout.as_ref().map(|s| s.winner),
        }
    }
}

/// Morale deltas for both squads.
///
/// One delta per rostered player, zero included. `contributions` lists
/// every participant; squad members missing from it are treated as unused
/// and drift. Returns nothing when morale updates are switched off.
pub fn compute_deltas(
    score: &FinalScore,
    contributions: &[PlayerContribution],
    home: &Team,
    away: &Team,
    config: &MatchConfig,
) -> Vec<MoraleDelta> {
    if !config.morale_updates_active {
        return Vec::new();
    }

    let mut deltas = Vec::new();
    for (side, team) in [(Side::Home, home), (Side::Away, away)] {
        for player in &team.players {
            let played = contributions.iter().find(|c| c.player_id == player.id && c.side == side);
            let components = match played {
                Some(c) => participant_components(player, c, score, config),
                None => drift_components(player, config),
            };
            if let Some(delta) = to_delta(player, components) {
                deltas.push(delta);
            }
        }
    }
    deltas
}

fn participant_components(
    player: &Player,
    contribution: &PlayerContribution,
    score: &FinalScore,
    config: &MatchConfig,
) -> Vec<MoraleComponent> {
    let morale = &config.morale;
    let result = score.result_for(contribution.side);
    let reason = match result {
        ResultKind::Win => MoraleReason::Win,
        ResultKind::Draw => MoraleReason::Draw,
        ResultKind::Loss => MoraleReason::Loss,
    };

    let mut components = vec![MoraleComponent {
        reason,
        amount: morale.result_delta(result) * morale.reactions.multiplier(player.personality),
    }];

    if contribution.goals > 0 {
        components.push(MoraleComponent {
            reason: MoraleReason::GoalScored,
            amount: morale.goal_bonus * contribution.goals as f32,
        });
    }
    if contribution.goals >= 3 {
        components.push(MoraleComponent { reason: MoraleReason::HatTrick, amount: morale.hat_trick_bonus });
    }
    if score.conceded(contribution.side) == 0
        && matches!(player.position, Position::Goalkeeper | Position::Defender)
    {
        components.push(MoraleComponent {
            reason: MoraleReason::CleanSheet,
            amount: morale.clean_sheet_bonus,
        });
    }
    components
}

fn drift_components(player: &Player, config: &MatchConfig) -> Vec<MoraleComponent> {
    let morale = &config.morale;
    let amount = (morale.drift_target - player.morale as f32) * morale.drift_rate;
    vec![MoraleComponent { reason: MoraleReason::Drift, amount }]
}

/// Sum, round, and clamp to keep morale in range.
fn to_delta(player: &Player, components: Vec<MoraleComponent>) -> Option<MoraleDelta> {
    let total: f32 = components.iter().map(|c| c.amount).sum();
    let current = player.morale.min(100) as i16;
    let delta = (total.round() as i16).clamp(-current, 100 - current);

    let primary = components
        .iter()
        .fold(None::<&MoraleComponent>, |best, c| match best {
            Some(b) if b.amount.abs() >= c.amount.abs() => Some(b),
            _ => Some(c),
        })
        .map(|c| c.reason)?;

    Some(MoraleDelta { player_id: player.id, delta, reason: primary, components })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::{create_test_team, create_test_team_with_subs};
    use crate::models::{Personality, PlayerId};

    fn contributions(team: &Team, side: Side) -> Vec<PlayerContribution> {
        team.players.iter().take(11).map(|p| PlayerContribution::new(p.id, side)).collect()
    }

    fn delta_for(deltas: &[MoraleDelta], id: PlayerId) -> &MoraleDelta {
        deltas.iter().find(|d| d.player_id == id).expect("delta present")
    }

    #[test]
    fn test_result_scaled_by_personality() {
        let config = MatchConfig::default();
        let mut home = create_test_team("Home", 1);
        let away = create_test_team("Away", 2);
        home.players[5].personality = Personality::Volatile;
        home.players[6].personality = Personality::Stoic;
        let mut contrib = contributions(&home, Side::Home);
        contrib.extend(contributions(&away, Side::Away));

        let score = FinalScore { home: 2, away: 1, shootout_winner: None };
        let deltas = compute_deltas(&score, &contrib, &home, &away, &config);
        assert_eq!(deltas.len(), 22);
        assert_eq!(delta_for(&deltas, home.players[5].id).delta, 8);
        assert_eq!(delta_for(&deltas, home.players[6].id).delta, 3);
        assert_eq!(delta_for(&deltas, home.players[7].id).delta, 4);
        let loser = delta_for(&deltas, away.players[7].id);
        assert_eq!(loser.delta, -4);
        assert_eq!(loser.reason, MoraleReason::Loss);
    }

    #[test]
    fn test_hat_trick_beats_three_single_goals() {
        let config = MatchConfig::default();
        let home = create_test_team("Home", 1);
        let away = create_test_team("Away", 2);
        let mut contrib = contributions(&home, Side::Home);
        contrib.extend(contributions(&away, Side::Away));
        contrib[9].goals = 3;
        contrib[10].goals = 1;

        let score = FinalScore { home: 4, away: 1, shootout_winner: None };
        let deltas = compute_deltas(&score, &contrib, &home, &away, &config);
        let hat_trick = delta_for(&deltas, home.players[9].id);
        let single = delta_for(&deltas, home.players[10].id);
        let base = delta_for(&deltas, home.players[8].id);

        let single_bonus = single.delta - base.delta;
        assert!(hat_trick.delta - base.delta > 3 * single_bonus);
        assert_eq!(hat_trick.reason, MoraleReason::GoalScored);
        assert!(hat_trick.components.iter().any(|c| c.reason == MoraleReason::HatTrick));
    }

    #[test]
    fn test_clean_sheet_for_keeper_and_defenders() {
        let config = MatchConfig::default();
        let home = create_test_team("Home", 1);
        let away = create_test_team("Away", 2);
        let mut contrib = contributions(&home, Side::Home);
        contrib.extend(contributions(&away, Side::Away));

        let score = FinalScore { home: 1, away: 0, shootout_winner: None };
        let deltas = compute_deltas(&score, &contrib, &home, &away, &config);
        // Keeper and defenders: 4 + 2; midfielders 4.
        assert_eq!(delta_for(&deltas, home.players[0].id).delta, 6);
        assert_eq!(delta_for(&deltas, home.players[2].id).delta, 6);
        assert_eq!(delta_for(&deltas, home.players[6].id).delta, 4);
        // Away conceded.
        assert_eq!(delta_for(&deltas, away.players[0].id).delta, -4);
    }

    #[test]
    fn test_shootout_decides_result() {
        let score = FinalScore { home: 1, away: 1, shootout_winner: Some(Side::Away) };
        assert_eq!(score.result_for(Side::Away), ResultKind::Win);
        assert_eq!(score.result_for(Side::Home), ResultKind::Loss);
        let level = FinalScore { home: 1, away: 1, shootout_winner: None };
        assert_eq!(level.result_for(Side::Home), ResultKind::Draw);
    }

    #[test]
    fn test_bench_drifts_toward_baseline() {
        let config = MatchConfig::default();
        let mut home = create_test_team_with_subs("Home", 1);
        let away = create_test_team("Away", 2);
        home.players[11].morale = 90;
        home.players[12].morale = 10;
        home.players[13].morale = 52;
        let contrib = contributions(&home, Side::Home);

        let score = FinalScore { home: 0, away: 0, shootout_winner: None };
        let deltas = compute_deltas(&score, &contrib, &home, &away, &config);
        assert_eq!(delta_for(&deltas, home.players[11].id).delta, -4);
        assert_eq!(delta_for(&deltas, home.players[12].id).delta, 4);
        let settled = delta_for(&deltas, home.players[13].id);
        assert_eq!(settled.delta, 0);
        assert_eq!(settled.reason, MoraleReason::Drift);
        assert_eq!(deltas.len(), home.players.len() + away.players.len());
    }

    #[test]
    fn test_delta_keeps_morale_in_range() {
        let config = MatchConfig::default();
        let mut home = create_test_team("Home", 1);
        let mut away = create_test_team("Away", 2);
        home.players[9].morale = 99;
        away.players[9].morale = 2;
        away.players[9].personality = Personality::Volatile;
        let mut contrib = contributions(&home, Side::Home);
        contrib.extend(contributions(&away, Side::Away));
        contrib[9].goals = 4;

        let score = FinalScore { home: 4, away: 0, shootout_winner: None };
        let deltas = compute_deltas(&score, &contrib, &home, &away, &config);
        assert_eq!(delta_for(&deltas, home.players[9].id).delta, 1);
        assert_eq!(delta_for(&deltas, away.players[9].id).delta, -2);
    }

    #[test]
    fn test_updates_toggle_off_gives_no_deltas() {
        let mut config = MatchConfig::default();
        config.morale_updates_active = false;
        let home = create_test_team("Home", 1);
        let away = create_test_team("Away", 2);
        let contrib = contributions(&home, Side::Home);
        let score = FinalScore { home: 3, away: 0, shootout_winner: None };
        assert!(compute_deltas(&score, &contrib, &home, &away, &config).is_empty());
    }
}
