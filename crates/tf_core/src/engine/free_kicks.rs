//! Scheduled free kicks
//!
//! Before kick-off a match draws its free kicks: how many, when, for whom
//! and from which zone. The orchestrator plays each one in its minute.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use crate::engine::config::{ClockConfig, FreeKickZone, FreeKickZoneSpec, SetPieceConfig};
use crate::error::{MatchError, Result};
use crate::models::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledFreeKick {
    pub minute: u8,
    pub side: Side,
    pub zone: FreeKickZone,
}

/// How the taking side uses a free kick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreeKickPlay {
    /// Straight at goal.
    Direct,
    /// Played into the box; the next attack faces a weakened defence.
    Indirect,
    /// Safe restart from midfield.
    Restart,
}

/// Draw the free-kick plan for regulation time, sorted by minute.
pub fn schedule_free_kicks<R: Rng + ?Sized>(
    set_pieces: &SetPieceConfig,
    clock: &ClockConfig,
    rng: &mut R,
) -> Result<Vec<ScheduledFreeKick>> {
    let count_dist = Normal::new(set_pieces.avg_free_kicks, set_pieces.free_kick_variance)
        .map_err(|e| MatchError::config("set_pieces.free_kick_variance", e.to_string()))?;
    let drawn = count_dist.sample(rng).max(0.0) as u32;
    let count = drawn.max(set_pieces.min_free_kicks as u32);
    if count == 0 {
        return Ok(Vec::new());
    }

    let weights = FreeKickZone::ALL.map(|z| set_pieces.zone(z).likelihood);
    let zones = WeightedIndex::new(weights)
        .map_err(|e| MatchError::config("set_pieces.zone.likelihood", e.to_string()))?;

    let mut kicks: Vec<ScheduledFreeKick> = (0..count)
        .map(|_| ScheduledFreeKick {
            minute: rng.gen_range(1..=clock.full_time_minute),
            side: if rng.gen_bool(0.5) { Side::Home } else { Side::Away },
            zone: FreeKickZone::ALL[zones.sample(rng)],
        })
        .collect();
    kicks.sort_by_key(|k| k.minute);
    Ok(kicks)
}

/// Pick the play from a uniform roll in `[0, 1)`.
pub fn choose_play(spec: &FreeKickZoneSpec, roll: f32) -> FreeKickPlay {
    if roll < spec.p_direct {
        FreeKickPlay::Direct
    } else if roll < spec.p_direct + spec.p_indirect {
        FreeKickPlay::Indirect
    } else {
        FreeKickPlay::Restart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_schedule_sorted_within_regulation() {
        let clock = ClockConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            let kicks = schedule_free_kicks(&SetPieceConfig::default(), &clock, &mut rng).unwrap();
            assert!(kicks.len() >= 10);
            assert!(kicks.windows(2).all(|w| w[0].minute <= w[1].minute));
            assert!(kicks.iter().all(|k| (1..=clock.full_time_minute).contains(&k.minute)));
        }
    }

    #[test]
    fn test_schedule_reproducible() {
        let clock = ClockConfig::default();
        let a = schedule_free_kicks(&SetPieceConfig::default(), &clock, &mut ChaCha8Rng::seed_from_u64(5));
        let b = schedule_free_kicks(&SetPieceConfig::default(), &clock, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(a.unwrap(), b.unwrap());
    }

    #[test]
    fn test_no_free_kicks_config() {
        let clock = ClockConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(schedule_free_kicks(&SetPieceConfig::none(), &clock, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_deep_zone_never_direct() {
        let config = SetPieceConfig::default();
        for i in 0..100 {
            let play = choose_play(&config.deep, i as f32 / 100.0);
            assert_ne!(play, FreeKickPlay::Direct);
        }
    }

    #[test]
    fn test_play_thresholds() {
        let config = SetPieceConfig::default();
        assert_eq!(choose_play(&config.dangerous, 0.5), FreeKickPlay::Direct);
        assert_eq!(choose_play(&config.dangerous, 0.9), FreeKickPlay::Indirect);
        assert_eq!(choose_play(&config.middle, 0.01), FreeKickPlay::Direct);
        assert_eq!(choose_play(&config.middle, 0.3), FreeKickPlay::Indirect);
        assert_eq!(choose_play(&config.middle, 0.9), FreeKickPlay::Restart);
    }
}
