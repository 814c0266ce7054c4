use serde::{Deserialize, Serialize};

use super::events::{BuildupStage, DominanceSample, MatchEvent, Outcome, PhaseMark};
use super::player::{PlayerId, Position};
use super::team::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Win,
    Draw,
    Loss,
}

/// Average effective skill per zone of a selected XI.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZonalStrength {
    pub goalkeeper: f32,
    pub defence: f32,
    pub midfield: f32,
    pub attack: f32,
}

impl ZonalStrength {
    pub fn get(&self, position: Position) -> f32 {
        match position {
            Position::Goalkeeper => self.goalkeeper,
            Position::Defender => self.defence,
            Position::Midfielder => self.midfield,
            Position::Forward => self.attack,
        }
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            goalkeeper: self.goalkeeper * factor,
            defence: self.defence * factor,
            midfield: self.midfield * factor,
            attack: self.attack * factor,
        }
    }
}

/// Pre-match snapshot of a side, for the host's match preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub name: String,
    pub side: Side,
    pub avg_base_skill: f32,
    pub avg_shape: f32,
    pub avg_effective_skill: f32,
    pub base_zonal_strength: ZonalStrength,
    /// Zonal strength with home advantage applied.
    pub zonal_strength: ZonalStrength,
    pub lineup: Vec<PlayerId>,
    pub free_kick_taker: PlayerId,
    pub penalty_taker: PlayerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerContribution {
    pub player_id: PlayerId,
    pub side: Side,
    pub goals: u8,
    pub shots: u8,
    pub saves: u8,
}

impl PlayerContribution {
    pub fn new(player_id: PlayerId, side: Side) -> Self {
        Self { player_id, side, goals: 0, shots: 0, saves: 0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShootoutKick {
    pub round: u8,
    pub side: Side,
    pub taker: PlayerId,
    pub goalkeeper: PlayerId,
    pub outcome: Outcome,
    pub sudden_death: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buildup_stages: Vec<BuildupStage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShootoutResult {
    pub home_score: u8,
    pub away_score: u8,
    pub winner: Side,
    pub kicks: Vec<ShootoutKick>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoraleReason {
    Win,
    Draw,
    Loss,
    GoalScored,
    HatTrick,
    CleanSheet,
    Drift,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoraleComponent {
    pub reason: MoraleReason,
    pub amount: f32,
}

/// Post-match morale change for one rostered player, to be persisted by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoraleDelta {
    pub player_id: PlayerId,
    pub delta: i16,
    /// Largest single component.
    pub reason: MoraleReason,
    pub components: Vec<MoraleComponent>,
}

/// Everything a detailed simulation produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub seed: u64,
    pub home_name: String,
    pub away_name: String,
    pub score_home: u8,
    pub score_away: u8,
    pub phases: Vec<PhaseMark>,
    pub events: Vec<MatchEvent>,
    pub dominance_trace: Vec<DominanceSample>,
    pub final_dominance: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shootout: Option<ShootoutResult>,
    pub home_profile: TeamProfile,
    pub away_profile: TeamProfile,
    pub contributions: Vec<PlayerContribution>,
    pub morale_deltas: Vec<MoraleDelta>,
}

impl MatchReport {
    /// Winning side, counting a shootout; `None` for a draw.
    pub fn winner(&self) -> Option<Side> {
        match self.score_home.cmp(&self.score_away) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => self.shootout.as_ref().map(|s| s.winner),
        }
    }

    pub fn result_for(&self, side: Side) -> ResultKind {
        match self.winner() {
            Some(w) if w == side => ResultKind::Win,
            Some(_) => ResultKind::Loss,
            None => ResultKind::Draw,
        }
    }

    pub fn goals_by(&self, player: PlayerId) -> u8 {
        self.contributions
            .iter()
            .find(|c| c.player_id == player)
            .map(|c| c.goals)
            .unwrap_or(0)
    }
}

/// Aggregate of a batch of regulation-time trials.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub trials: u32,
    pub home_wins: u32,
    pub draws: u32,
    pub away_wins: u32,
    pub home_goals: u32,
    pub away_goals: u32,
}

impl BatchSummary {
    pub fn record(&mut self, home_goals: u8, away_goals: u8) {
        self.trials += 1;
        self.home_goals += home_goals as u32;
        self.away_goals += away_goals as u32;
        match home_goals.cmp(&away_goals) {
            std::cmp::Ordering::Greater => self.home_wins += 1,
            std::cmp::Ordering::Less => self.away_wins += 1,
            std::cmp::Ordering::Equal => self.draws += 1,
        }
    }

    pub fn merge(mut self, other: BatchSummary) -> Self {
        self.trials += other.trials;
        self.home_wins += other.home_wins;
        self.draws += other.draws;
        self.away_wins += other.away_wins;
        self.home_goals += other.home_goals;
        self.away_goals += other.away_goals;
        self
    }

    fn ratio(&self, n: u32) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            n as f64 / self.trials as f64
        }
    }

    pub fn home_win_probability(&self) -> f64 {
        self.ratio(self.home_wins)
    }

    pub fn draw_probability(&self) -> f64 {
        self.ratio(self.draws)
    }

    pub fn away_win_probability(&self) -> f64 {
        self.ratio(self.away_wins)
    }

    pub fn expected_goals_home(&self) -> f64 {
        self.ratio(self.home_goals)
    }

    pub fn expected_goals_away(&self) -> f64 {
        self.ratio(self.away_goals)
    }
}

/// Odds for a pairing played at both grounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrematchOdds {
    /// User side at home.
    pub home_fixture: BatchSummary,
    /// User side away.
    pub away_fixture: BatchSummary,
}
