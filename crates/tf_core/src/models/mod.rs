pub mod events;
pub mod match_result;
pub mod player;
pub mod squad;
pub mod team;
pub mod traits;

pub use events::{
    BuildupStage, DominanceSample, EventKind, MatchEvent, Outcome, PhaseMark, StageKind,
};
pub use match_result::{
    BatchSummary, MatchReport, MoraleComponent, MoraleDelta, MoraleReason, PlayerContribution,
    PrematchOdds, ResultKind, ShootoutKick, ShootoutResult, TeamProfile, ZonalStrength,
};
pub use player::{Personality, Player, PlayerId, Position};
pub use squad::{generate_starter_squad, generate_squad, SquadSpec};
pub use team::{Side, Team, STARTERS};
pub use traits::{
    default_trait_rules, RatingContext, TraitAttribute, TraitRule, TraitScope, TraitStacking,
    TraitTag,
};
