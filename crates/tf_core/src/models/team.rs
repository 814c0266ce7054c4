use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::player::{Player, PlayerId, Position};
use crate::error::{MatchError, Result};

pub const STARTERS: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    /// +1.0 for home, -1.0 for away; the sign convention of dominance.
    pub fn sign(&self) -> f32 {
        match self {
            Side::Home => 1.0,
            Side::Away => -1.0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

/// A squad handed over by the host. The engine picks its starting XI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
    /// Explicit starting XI; when absent the best 1-4-4-2 is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_lineup: Option<Vec<PlayerId>>,
}

impl Team {
    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Self {
        Self { name: name.into(), players, fixed_lineup: None }
    }

    pub fn with_fixed_lineup(mut self, ids: Vec<PlayerId>) -> Self {
        self.fixed_lineup = Some(ids);
        self
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn count_position(&self, position: Position) -> usize {
        self.players.iter().filter(|p| p.position == position).count()
    }

    /// Precondition check run before any simulation starts.
    pub fn validate(&self, side: Side) -> Result<()> {
        if self.players.len() < STARTERS {
            return Err(MatchError::roster(
                side,
                format!(
                    "{} has {} players, at least {} required",
                    self.name,
                    self.players.len(),
                    STARTERS
                ),
            ));
        }

        if self.count_position(Position::Goalkeeper) == 0 {
            return Err(MatchError::roster(side, format!("{} has no goalkeeper", self.name)));
        }

        let mut seen = HashSet::with_capacity(self.players.len());
        for p in &self.players {
            if let Some((attribute, value)) = out_of_scale(p) {
                return Err(MatchError::roster(
                    side,
                    format!("{} player {} has {} {} (max 100)", self.name, p.id, attribute, value),
                ));
            }
            if !seen.insert(p.id) {
                return Err(MatchError::roster(
                    side,
                    format!("{} lists player {} twice", self.name, p.id),
                ));
            }
        }

        if let Some(ids) = &self.fixed_lineup {
            let unique: HashSet<_> = ids.iter().copied().collect();
            if ids.len() != STARTERS || unique.len() != STARTERS {
                return Err(MatchError::roster(
                    side,
                    format!("{} fixed lineup must name {} distinct players", self.name, STARTERS),
                ));
            }
            let mut has_keeper = false;
            for id in ids {
                match self.player(*id) {
                    Some(p) => has_keeper |= p.is_goalkeeper(),
                    None => {
                        return Err(MatchError::roster(
                            side,
                            format!("{} fixed lineup names unknown player {}", self.name, id),
                        ))
                    }
                }
            }
            if !has_keeper {
                return Err(MatchError::roster(
                    side,
                    format!("{} fixed lineup has no goalkeeper", self.name),
                ));
            }
        }

        Ok(())
    }
}

/// First attribute above the 0-100 scale, if any.
fn out_of_scale(p: &Player) -> Option<(&'static str, u8)> {
    [
        ("base_skill", p.base_skill),
        ("shape", p.shape),
        ("morale", p.morale),
        ("potential", p.potential),
        ("free_kick_ability", p.free_kick_ability),
        ("penalty_taking", p.penalty_taking),
        ("penalty_saving", p.penalty_saving),
    ]
    .into_iter()
    .find(|(_, value)| *value > 100)
}
