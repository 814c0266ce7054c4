//! Starting XI selection and per-side match data.
//!
//! A [`MatchSide`] is built once per simulation (or once per batch) from a
//! validated [`Team`]. It holds the selected XI, zonal strengths and the
//! designated set-piece takers. Ratings are read from the rating model at
//! build time; player attributes do not change during a match.

use std::cmp::Ordering;

use rand::Rng;

use crate::engine::config::MatchConfig;
use crate::engine::rating::{effective_rating, effective_skill};
use crate::error::{MatchError, Result};
use crate::models::{
    Player, PlayerId, Position, RatingContext, Side, Team, TeamProfile, ZonalStrength, STARTERS,
};

/// 1-4-4-2: goalkeeper, defenders, midfielders, forwards.
pub const FORMATION: [(Position, usize); 4] = [
    (Position::Goalkeeper, 1),
    (Position::Defender, 4),
    (Position::Midfielder, 4),
    (Position::Forward, 2),
];

#[derive(Debug, Clone)]
pub struct MatchSide {
    pub side: Side,
    pub name: String,
    /// Selected XI, goalkeeper first.
    pub lineup: Vec<Player>,
    pub bench: Vec<Player>,
    pub base_zonal: ZonalStrength,
    /// Base strength with home advantage applied. Read for attacking weight only.
    pub zonal: ZonalStrength,
    goalkeeper: usize,
    free_kick_taker: usize,
    penalty_taker: usize,
    shooters: Vec<usize>,
}

impl MatchSide {
    /// Select the XI and precompute strengths. The team must already be validated.
    pub fn prepare(team: &Team, side: Side, config: &MatchConfig) -> Result<Self> {
        let (lineup, bench) = match &team.fixed_lineup {
            Some(ids) => split_fixed(team, ids, side)?,
            None => select_best(team, config),
        };
        if lineup.len() < STARTERS {
            return Err(MatchError::roster(
                side,
                format!("{} can only field {} players", team.name, lineup.len()),
            ));
        }

        let goalkeeper = lineup
            .iter()
            .position(Player::is_goalkeeper)
            .ok_or_else(|| MatchError::roster(side, format!("{} fields no goalkeeper", team.name)))?;

        let free_kick_taker = best_by(&lineup, |p| effective_rating(p, RatingContext::FreeKick, config));
        let penalty_taker =
            best_by(&lineup, |p| effective_rating(p, RatingContext::PenaltyTaking, config));

        let mut shooters: Vec<usize> = lineup
            .iter()
            .enumerate()
            .filter(|(_, p)| matches!(p.position, Position::Forward | Position::Midfielder))
            .map(|(i, _)| i)
            .collect();
        if shooters.is_empty() {
            shooters = lineup
                .iter()
                .enumerate()
                .filter(|(_, p)| p.position.is_outfield())
                .map(|(i, _)| i)
                .collect();
        }

        let base_zonal = zonal_strength(&lineup, config);
        let advantage = match side {
            Side::Home => config.effective_home_advantage(),
            Side::Away => 1.0,
        };

        Ok(Self {
            side,
            name: team.name.clone(),
            zonal: base_zonal.scaled(advantage),
            base_zonal,
            lineup,
            bench,
            goalkeeper,
            free_kick_taker,
            penalty_taker,
            shooters,
        })
    }

    pub fn goalkeeper(&self) -> &Player {
        &self.lineup[self.goalkeeper]
    }

    pub fn free_kick_taker(&self) -> &Player {
        &self.lineup[self.free_kick_taker]
    }

    pub fn penalty_taker(&self) -> &Player {
        &self.lineup[self.penalty_taker]
    }

    /// Random forward or midfielder, falling back to any outfield player.
    pub fn pick_shooter<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&Player> {
        if self.shooters.is_empty() {
            return Err(MatchError::roster(
                self.side,
                format!("{} has no outfield player to take a shot", self.name),
            ));
        }
        let idx = self.shooters[rng.gen_range(0..self.shooters.len())];
        Ok(&self.lineup[idx])
    }

    /// Shootout order: outfield players by penalty taking, strongest first.
    ///
    /// A lineup without outfield players falls back to the whole XI.
    pub fn shootout_order(&self, config: &MatchConfig) -> Vec<&Player> {
        let mut order: Vec<&Player> = self.lineup.iter().filter(|p| p.position.is_outfield()).collect();
        if order.is_empty() {
            order = self.lineup.iter().collect();
        }
        order.sort_by(|a, b| {
            let ra = effective_rating(a, RatingContext::PenaltyTaking, config);
            let rb = effective_rating(b, RatingContext::PenaltyTaking, config);
            rb.total_cmp(&ra).then_with(|| a.id.cmp(&b.id))
        });
        order
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.lineup.iter().any(|p| p.id == id)
    }

    pub fn profile(&self, config: &MatchConfig) -> TeamProfile {
        let n = self.lineup.len().max(1) as f32;
        TeamProfile {
            name: self.name.clone(),
            side: self.side,
            avg_base_skill: self.lineup.iter().map(|p| p.base_skill as f32).sum::<f32>() / n,
            avg_shape: self.lineup.iter().map(|p| p.shape as f32).sum::<f32>() / n,
            avg_effective_skill: self.lineup.iter().map(|p| effective_skill(p, config)).sum::<f32>()
                / n,
            base_zonal_strength: self.base_zonal,
            zonal_strength: self.zonal,
            lineup: self.lineup.iter().map(|p| p.id).collect(),
            free_kick_taker: self.free_kick_taker().id,
            penalty_taker: self.penalty_taker().id,
        }
    }
}

fn split_fixed(team: &Team, ids: &[PlayerId], side: Side) -> Result<(Vec<Player>, Vec<Player>)> {
    let mut lineup = Vec::with_capacity(STARTERS);
    for id in ids {
        let player = team.player(*id).ok_or_else(|| {
            MatchError::roster(side, format!("{} fixed lineup names unknown player {}", team.name, id))
        })?;
        lineup.push(player.clone());
    }
    // Goalkeeper first, then the order given.
    lineup.sort_by_key(|p| !p.is_goalkeeper());
    let bench = team.players.iter().filter(|p| !ids.contains(&p.id)).cloned().collect();
    Ok((lineup, bench))
}

fn select_best(team: &Team, config: &MatchConfig) -> (Vec<Player>, Vec<Player>) {
    let mut ranked: Vec<&Player> = team.players.iter().collect();
    ranked.sort_by(|a, b| by_skill_desc(a, b, config));

    let mut taken = vec![false; ranked.len()];
    let mut lineup: Vec<Player> = Vec::with_capacity(STARTERS);

    for (position, count) in FORMATION {
        let picks: Vec<usize> = ranked
            .iter()
            .enumerate()
            .filter(|(i, p)| !taken[*i] && p.position == position)
            .map(|(i, _)| i)
            .take(count)
            .collect();
        for i in picks {
            taken[i] = true;
            lineup.push(ranked[i].clone());
        }
    }

    // Short in a position: top up with the best remaining players,
    // outfielders before spare goalkeepers.
    for outfield_only in [true, false] {
        for (i, p) in ranked.iter().enumerate() {
            if lineup.len() >= STARTERS {
                break;
            }
            if !taken[i] && (!outfield_only || p.position.is_outfield()) {
                taken[i] = true;
                lineup.push((*p).clone());
            }
        }
    }

    let bench = ranked
        .iter()
        .enumerate()
        .filter(|(i, _)| !taken[*i])
        .map(|(_, p)| (*p).clone())
        .collect();
    (lineup, bench)
}

fn by_skill_desc(a: &Player, b: &Player, config: &MatchConfig) -> Ordering {
    effective_skill(b, config)
        .total_cmp(&effective_skill(a, config))
        .then_with(|| a.id.cmp(&b.id))
}

fn best_by(lineup: &[Player], rating: impl Fn(&Player) -> f32) -> usize {
    let mut best = 0;
    let mut best_rating = f32::MIN;
    for (i, p) in lineup.iter().enumerate() {
        let r = rating(p);
        if r > best_rating {
            best = i;
            best_rating = r;
        }
    }
    best
}

/// Mean effective skill per zone; an empty zone counts as `empty_zone_strength`.
pub fn zonal_strength(lineup: &[Player], config: &MatchConfig) -> ZonalStrength {
    let zone = |position: Position| {
        let (sum, n) = lineup
            .iter()
            .filter(|p| p.position == position)
            .fold((0.0f32, 0usize), |(s, n), p| (s + effective_skill(p, config), n + 1));
        if n == 0 {
            config.flow.empty_zone_strength
        } else {
            sum / n as f32
        }
    };
    ZonalStrength {
        goalkeeper: zone(Position::Goalkeeper),
        defence: zone(Position::Defender),
        midfield: zone(Position::Midfielder),
        attack: zone(Position::Forward),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::{create_test_team, create_test_team_with_subs};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_selects_442_from_squad() {
        let config = MatchConfig::default();
        let team = create_test_team_with_subs("Squad", 1);
        let side = MatchSide::prepare(&team, Side::Home, &config).unwrap();
        assert_eq!(side.lineup.len(), STARTERS);
        assert_eq!(side.bench.len(), 7);
        assert!(side.goalkeeper().is_goalkeeper());
        for (position, count) in FORMATION {
            assert_eq!(side.lineup.iter().filter(|p| p.position == position).count(), count);
        }
        // Starters are rated 70, subs 60.
        assert!(side.lineup.iter().all(|p| p.base_skill == 70));
    }

    #[test]
    fn test_short_position_topped_up() {
        let config = MatchConfig::default();
        let mut team = create_test_team_with_subs("Thin", 2);
        // Only one forward left.
        let mut forwards = 0;
        team.players.retain(|p| {
            if p.position == Position::Forward {
                forwards += 1;
                forwards == 1
            } else {
                true
            }
        });
        let side = MatchSide::prepare(&team, Side::Away, &config).unwrap();
        assert_eq!(side.lineup.len(), STARTERS);
        assert_eq!(side.lineup.iter().filter(|p| p.is_goalkeeper()).count(), 1);
    }

    #[test]
    fn test_fixed_lineup_respected() {
        let config = MatchConfig::default();
        let team = create_test_team_with_subs("Fixed", 3);
        let ids: Vec<PlayerId> = team.players.iter().skip(7).map(|p| p.id).collect();
        let fixed = team.clone().with_fixed_lineup(ids.clone());
        fixed.validate(Side::Home).unwrap();
        let side = MatchSide::prepare(&fixed, Side::Home, &config).unwrap();
        assert!(side.goalkeeper().is_goalkeeper());
        for id in ids {
            assert!(side.contains(id));
        }
    }

    #[test]
    fn test_home_advantage_only_for_home() {
        let config = MatchConfig::default();
        let team = create_test_team("Same", 1);
        let home = MatchSide::prepare(&team, Side::Home, &config).unwrap();
        let away = MatchSide::prepare(&team, Side::Away, &config).unwrap();
        assert_eq!(home.base_zonal, away.base_zonal);
        assert!((home.zonal.attack - away.zonal.attack * 1.04).abs() < 1e-3);
        assert_eq!(away.zonal, away.base_zonal);

        let neutral = MatchSide::prepare(&team, Side::Home, &MatchConfig::neutral()).unwrap();
        assert_eq!(neutral.zonal, neutral.base_zonal);
    }

    #[test]
    fn test_empty_zone_uses_floor_strength() {
        let config = MatchConfig::default();
        let mut team = create_test_team("NoForwards", 4);
        for p in &mut team.players {
            if p.position == Position::Forward {
                p.position = Position::Midfielder;
            }
        }
        let side = MatchSide::prepare(&team, Side::Away, &config).unwrap();
        assert_eq!(side.base_zonal.attack, config.flow.empty_zone_strength);
    }

    #[test]
    fn test_set_piece_takers_are_best_in_xi() {
        let config = MatchConfig::default();
        let mut team = create_test_team("Takers", 5);
        team.players[6] = team.players[6].clone().with_set_pieces(95, 40, 10);
        team.players[9] = team.players[9].clone().with_set_pieces(40, 92, 10);
        let side = MatchSide::prepare(&team, Side::Home, &config).unwrap();
        assert_eq!(side.free_kick_taker().id, team.players[6].id);
        assert_eq!(side.penalty_taker().id, team.players[9].id);

        let order = side.shootout_order(&config);
        assert_eq!(order.len(), 10);
        assert_eq!(order[0].id, team.players[9].id);
        assert!(order.iter().all(|p| !p.is_goalkeeper()));
    }

    #[test]
    fn test_shooter_is_forward_or_midfielder() {
        let config = MatchConfig::default();
        let side = MatchSide::prepare(&create_test_team("Shoot", 6), Side::Home, &config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            let p = side.pick_shooter(&mut rng).unwrap();
            assert!(matches!(p.position, Position::Forward | Position::Midfielder));
        }
    }

    #[test]
    fn test_all_keeper_lineup_has_no_shooter() {
        let config = MatchConfig::default();
        let mut team = create_test_team("Keepers", 7);
        for p in &mut team.players {
            p.position = Position::Goalkeeper;
        }
        let side = MatchSide::prepare(&team, Side::Away, &config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            side.pick_shooter(&mut rng),
            Err(MatchError::RosterIncomplete { side: Side::Away, .. })
        ));
    }
}
