//! Player trait table
//!
//! Traits are tags carried by a player. What a trait does lives in a
//! [`TraitRule`] table evaluated at rating time: a rule fires when the
//! player carries the tag and the named attribute reaches the threshold,
//! and then adds a percentage bonus to ratings in its scope.

use serde::{Deserialize, Serialize};

use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitTag {
    /// Clinical in front of goal.
    Finisher,
    /// Free-kick specialist.
    DeadBallSpecialist,
    /// Nerveless from the spot.
    IceCold,
    /// Reflex goalkeeper.
    ShotStopper,
    /// Reads penalty takers.
    SpotSaver,
    /// Covers every blade of grass.
    Engine,
    /// Lifts the side when confident.
    Leader,
}

/// Attribute a rule's threshold is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitAttribute {
    BaseSkill,
    Shape,
    Morale,
    FreeKickAbility,
    PenaltyTaking,
    PenaltySaving,
}

impl TraitAttribute {
    pub fn read(&self, player: &Player) -> u8 {
        match self {
            TraitAttribute::BaseSkill => player.base_skill,
            TraitAttribute::Shape => player.shape,
            TraitAttribute::Morale => player.morale,
            TraitAttribute::FreeKickAbility => player.free_kick_ability,
            TraitAttribute::PenaltyTaking => player.penalty_taking,
            TraitAttribute::PenaltySaving => player.penalty_saving,
        }
    }
}

/// The situation a rating is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingContext {
    OpenPlay,
    Shooting,
    Goalkeeping,
    FreeKick,
    PenaltyTaking,
    PenaltySaving,
}

/// Which ratings a rule's bonus applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitScope {
    /// Every skill-based rating (open play, shooting, goalkeeping).
    General,
    Shooting,
    Goalkeeping,
    FreeKick,
    PenaltyTaking,
    PenaltySaving,
}

impl TraitScope {
    pub fn applies_to(&self, ctx: RatingContext) -> bool {
        match (self, ctx) {
            (
                TraitScope::General,
                RatingContext::OpenPlay | RatingContext::Shooting | RatingContext::Goalkeeping,
            ) => true,
            (TraitScope::Shooting, RatingContext::Shooting) => true,
            (TraitScope::Goalkeeping, RatingContext::Goalkeeping) => true,
            (TraitScope::FreeKick, RatingContext::FreeKick) => true,
            (TraitScope::PenaltyTaking, RatingContext::PenaltyTaking) => true,
            (TraitScope::PenaltySaving, RatingContext::PenaltySaving) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitRule {
    pub tag: TraitTag,
    pub attribute: TraitAttribute,
    pub threshold: u8,
    /// Percentage of the underlying attribute added to the rating.
    pub bonus_pct: f32,
    pub scope: TraitScope,
}

impl TraitRule {
    pub const fn new(
        tag: TraitTag,
        attribute: TraitAttribute,
        threshold: u8,
        bonus_pct: f32,
        scope: TraitScope,
    ) -> Self {
        Self { tag, attribute, threshold, bonus_pct, scope }
    }

    pub fn qualifies(&self, player: &Player, ctx: RatingContext) -> bool {
        self.scope.applies_to(ctx)
            && player.has_trait(self.tag)
            && self.attribute.read(player) >= self.threshold
    }
}

/// How several qualifying rules combine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum TraitStacking {
    /// Sum every qualifying bonus, capped at `cap_pct`.
    Additive { cap_pct: f32 },
    /// Only the largest qualifying bonus counts.
    StrongestOnly,
}

impl Default for TraitStacking {
    fn default() -> Self {
        TraitStacking::Additive { cap_pct: 30.0 }
    }
}

impl TraitStacking {
    pub fn combine(&self, bonuses: impl IntoIterator<Item = f32>) -> f32 {
        match self {
            TraitStacking::Additive { cap_pct } => {
                bonuses.into_iter().map(|b| b.max(0.0)).sum::<f32>().min(*cap_pct)
            }
            TraitStacking::StrongestOnly => bonuses.into_iter().fold(0.0, f32::max),
        }
    }
}

/// Stock trait table.
pub fn default_trait_rules() -> Vec<TraitRule> {
    use TraitAttribute as A;
    use TraitScope as S;
    use TraitTag as T;

    vec![
        TraitRule::new(T::Finisher, A::BaseSkill, 65, 15.0, S::Shooting),
        TraitRule::new(T::DeadBallSpecialist, A::FreeKickAbility, 70, 12.0, S::FreeKick),
        TraitRule::new(T::IceCold, A::PenaltyTaking, 60, 10.0, S::PenaltyTaking),
        TraitRule::new(T::ShotStopper, A::BaseSkill, 55, 10.0, S::Goalkeeping),
        TraitRule::new(T::SpotSaver, A::PenaltySaving, 60, 12.0, S::PenaltySaving),
        TraitRule::new(T::Engine, A::Shape, 80, 5.0, S::General),
        TraitRule::new(T::Leader, A::Morale, 60, 4.0, S::General),
    ]
}
