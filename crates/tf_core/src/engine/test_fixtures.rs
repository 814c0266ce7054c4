//! Test Fixtures Module
//!
//! Shared roster helpers for engine tests.
//!
//! ## Usage
//! ```rust,ignore
//! use crate::engine::test_fixtures::*;
//! ```

use crate::models::{Player, Position, Team};

// =============================================================================
// Team Creation Helpers
// =============================================================================

/// Create a test team with 11 players in a 1-4-4-2.
///
/// Each player has:
/// - Base skill 70, shape 100, neutral morale
/// - Average set-piece attributes
/// - Id `id_base * 100 + index`
pub fn create_test_team(name: &str, id_base: u32) -> Team {
    create_test_team_with_skill(name, id_base, 70, 100)
}

/// Create a test team with the given skill and shape for every player.
pub fn create_test_team_with_skill(name: &str, id_base: u32, skill: u8, shape: u8) -> Team {
    let players = standard_442_positions()
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            Player::new(
                id_base * 100 + i as u32,
                format!("{} Player {}", name, i + 1),
                pos,
                skill,
                shape,
            )
        })
        .collect();
    Team::new(name, players)
}

/// Create a test team with 11 starters + 7 subs (18 players total).
///
/// Subs have base skill 60.
pub fn create_test_team_with_subs(name: &str, id_base: u32) -> Team {
    let mut team = create_test_team(name, id_base);
    let sub_positions = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Midfielder,
        Position::Forward,
        Position::Forward,
        Position::Defender,
    ];
    for (i, &pos) in sub_positions.iter().enumerate() {
        team.players.push(Player::new(
            id_base * 100 + 50 + i as u32,
            format!("{} Sub {}", name, i + 1),
            pos,
            60,
            100,
        ));
    }
    team
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Standard 1-4-4-2 positions (11 players).
pub fn standard_442_positions() -> [Position; 11] {
    [
        Position::Goalkeeper,
        Position::Defender,
        Position::Defender,
        Position::Defender,
        Position::Defender,
        Position::Midfielder,
        Position::Midfielder,
        Position::Midfielder,
        Position::Midfielder,
        Position::Forward,
        Position::Forward,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_team_has_11_players() {
        let team = create_test_team("Test", 1);
        assert_eq!(team.players.len(), 11);
        assert_eq!(team.count_position(Position::Goalkeeper), 1);
    }

    #[test]
    fn test_ids_do_not_clash_between_sides() {
        let home = create_test_team_with_subs("Home", 1);
        let away = create_test_team_with_subs("Away", 2);
        for p in &home.players {
            assert!(away.player(p.id).is_none());
        }
    }

    #[test]
    fn test_subs_team_has_18_players() {
        let team = create_test_team_with_subs("Test", 3);
        assert_eq!(team.players.len(), 18);
        assert_eq!(team.count_position(Position::Goalkeeper), 2);
    }
}
