use serde::{Deserialize, Serialize};
use std::fmt;

use super::traits::TraitTag;

/// Stable player identifier supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] =
        [Position::Goalkeeper, Position::Defender, Position::Midfielder, Position::Forward];

    pub fn is_outfield(&self) -> bool {
        !matches!(self, Position::Goalkeeper)
    }

    pub fn short_code(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DF",
            Position::Midfielder => "MF",
            Position::Forward => "FW",
        }
    }
}

/// How strongly a player reacts to results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    #[default]
    Professional,
    Ambitious,
    Stoic,
    Volatile,
}

/// A rostered player as seen by the engine.
///
/// All attributes are on a 0-100 scale. The engine never mutates a player;
/// morale changes are reported back as [`crate::models::MoraleDelta`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub base_skill: u8,
    /// Fitness proxy.
    pub shape: u8,
    #[serde(default = "neutral_morale")]
    pub morale: u8,
    #[serde(default)]
    pub potential: u8,
    #[serde(default)]
    pub personality: Personality,
    #[serde(default = "default_set_piece")]
    pub free_kick_ability: u8,
    #[serde(default = "default_set_piece")]
    pub penalty_taking: u8,
    #[serde(default = "default_set_piece")]
    pub penalty_saving: u8,
    #[serde(default)]
    pub traits: Vec<TraitTag>,
}

fn neutral_morale() -> u8 {
    50
}

fn default_set_piece() -> u8 {
    50
}

impl Player {
    /// Player with neutral morale, average set-piece attributes and no traits.
    pub fn new(id: u32, name: impl Into<String>, position: Position, base_skill: u8, shape: u8) -> Self {
        Self {
            id: PlayerId(id),
            name: name.into(),
            position,
            base_skill: base_skill.min(100),
            shape: shape.min(100),
            morale: neutral_morale(),
            potential: base_skill.min(100),
            personality: Personality::default(),
            free_kick_ability: default_set_piece(),
            penalty_taking: default_set_piece(),
            penalty_saving: default_set_piece(),
            traits: Vec::new(),
        }
    }

    pub fn with_morale(mut self, morale: u8) -> Self {
        self.morale = morale.min(100);
        self
    }

    pub fn with_personality(mut self, personality: Personality) -> Self {
        self.personality = personality;
        self
    }

    pub fn with_traits(mut self, traits: impl IntoIterator<Item = TraitTag>) -> Self {
        self.traits = traits.into_iter().collect();
        self
    }

    pub fn with_set_pieces(mut self, free_kick: u8, penalty_taking: u8, penalty_saving: u8) -> Self {
        self.free_kick_ability = free_kick.min(100);
        self.penalty_taking = penalty_taking.min(100);
        self.penalty_saving = penalty_saving.min(100);
        self
    }

    pub fn has_trait(&self, tag: TraitTag) -> bool {
        self.traits.contains(&tag)
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.position == Position::Goalkeeper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_attributes() {
        let p = Player::new(1, "Clamp", Position::Forward, 140, 255);
        assert_eq!(p.base_skill, 100);
        assert_eq!(p.shape, 100);
        assert_eq!(p.morale, 50);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let json = r#"{"id":7,"name":"Keeper","position":"goalkeeper","base_skill":60,"shape":80}"#;
        let p: Player = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, PlayerId(7));
        assert!(p.is_goalkeeper());
        assert_eq!(p.morale, 50);
        assert_eq!(p.penalty_saving, 50);
        assert!(p.traits.is_empty());
    }
}
