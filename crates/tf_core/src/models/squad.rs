//! Starter squad generation for hosts that need a fresh roster.
//!
//! `starter_skill` only shapes the generated players; the engine itself
//! never reads it.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::player::{Personality, Player, PlayerId, Position};
use super::team::Team;
use super::traits::TraitTag;

const FIRST_NAMES: [&str; 7] = ["Erik", "Lars", "Mikael", "Anders", "Johan", "Karl", "Fredrik"];
const LAST_NAMES: [&str; 6] = ["Andersson", "Johansson", "Karlsson", "Nilsson", "Eriksson", "Larsson"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SquadSpec {
    /// Centre of the generated base-skill band (±20).
    pub starter_skill: u8,
    pub goalkeepers: u8,
    pub defenders: u8,
    pub midfielders: u8,
    pub forwards: u8,
    /// First player id; ids are allocated consecutively.
    pub first_id: u32,
}

impl Default for SquadSpec {
    fn default() -> Self {
        Self {
            starter_skill: 50,
            goalkeepers: 2,
            defenders: 6,
            midfielders: 7,
            forwards: 5,
            first_id: 1,
        }
    }
}

impl SquadSpec {
    pub fn size(&self) -> usize {
        [self.goalkeepers, self.defenders, self.midfielders, self.forwards]
            .iter()
            .map(|&n| n as usize)
            .sum()
    }
}

/// Generate a 20-man squad around `starter_skill`, reproducible from `seed`.
pub fn generate_starter_squad(name: &str, starter_skill: u8, seed: u64) -> Team {
    generate_squad(name, SquadSpec { starter_skill, ..Default::default() }, seed)
}

pub fn generate_squad(name: &str, spec: SquadSpec, seed: u64) -> Team {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut positions = Vec::with_capacity(spec.size());
    for (pos, n) in [
        (Position::Goalkeeper, spec.goalkeepers),
        (Position::Defender, spec.defenders),
        (Position::Midfielder, spec.midfielders),
        (Position::Forward, spec.forwards),
    ] {
        positions.extend(std::iter::repeat(pos).take(n as usize));
    }
    positions.shuffle(&mut rng);

    let centre = spec.starter_skill.min(100) as i32;
    let lo = (centre - 20).max(1);
    let hi = (centre + 20).clamp(lo, 100);

    let players = positions
        .into_iter()
        .enumerate()
        .map(|(i, position)| {
            let skill = rng.gen_range(lo..=hi);
            let fk = (skill + rng.gen_range(-15..=30)).clamp(10, 99);
            let pen_taking = (skill + rng.gen_range(-20..=20)).clamp(10, 99);
            let pen_saving = if position == Position::Goalkeeper {
                (skill + rng.gen_range(5..=30)).clamp(40, 90)
            } else {
                rng.gen_range(5..=25)
            };
            let personality = match rng.gen_range(0..4) {
                0 => Personality::Professional,
                1 => Personality::Ambitious,
                2 => Personality::Stoic,
                _ => Personality::Volatile,
            };
            let traits = roll_traits(position, &mut rng);

            Player {
                id: PlayerId(spec.first_id + i as u32),
                name: format!(
                    "{} {}",
                    FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())],
                    LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())]
                ),
                position,
                base_skill: skill as u8,
                shape: rng.gen_range(70..=100),
                morale: rng.gen_range(40..=70),
                potential: rng.gen_range(60..=95),
                personality,
                free_kick_ability: fk as u8,
                penalty_taking: pen_taking as u8,
                penalty_saving: pen_saving as u8,
                traits,
            }
        })
        .collect();

    Team::new(name, players)
}

fn roll_traits(position: Position, rng: &mut ChaCha8Rng) -> Vec<TraitTag> {
    let pool: &[TraitTag] = match position {
        Position::Goalkeeper => &[TraitTag::ShotStopper, TraitTag::SpotSaver],
        Position::Defender => &[TraitTag::Engine, TraitTag::Leader],
        Position::Midfielder => &[TraitTag::DeadBallSpecialist, TraitTag::Engine, TraitTag::Leader],
        Position::Forward => &[TraitTag::Finisher, TraitTag::IceCold],
    };
    // Roughly one player in four carries a trait.
    if rng.gen_bool(0.25) {
        pool.choose(rng).map(|t| vec![*t]).unwrap_or_default()
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Side;

    #[test]
    fn test_size_of_large_spec() {
        let spec = SquadSpec {
            goalkeepers: 200,
            defenders: 200,
            midfielders: 200,
            forwards: 200,
            ..Default::default()
        };
        assert_eq!(spec.size(), 800);
    }

    #[test]
    fn test_squad_is_valid_and_sized() {
        let team = generate_starter_squad("Generated FC", 55, 9);
        assert_eq!(team.players.len(), 20);
        assert_eq!(team.count_position(Position::Goalkeeper), 2);
        assert!(team.validate(Side::Home).is_ok());
    }

    #[test]
    fn test_same_seed_same_squad() {
        assert_eq!(generate_starter_squad("A", 50, 3), generate_starter_squad("A", 50, 3));
        assert_ne!(generate_starter_squad("A", 50, 3), generate_starter_squad("A", 50, 4));
    }

    #[test]
    fn test_skill_band_follows_starter_skill() {
        let team = generate_starter_squad("Strong", 80, 1);
        assert!(team.players.iter().all(|p| (60..=100).contains(&p.base_skill)));
        let keepers: Vec<_> = team.players.iter().filter(|p| p.is_goalkeeper()).collect();
        assert!(keepers.iter().all(|p| p.penalty_saving >= 40));
    }
}
