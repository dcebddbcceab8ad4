//! Kickoff micro-simulator.
//!
//! Team A restarts from the centre circle, team B lines up as the primary
//! press, and team C balances between contesting possession and shielding
//! its own goal. The remainder after shot/counter/possession is the
//! explicit `Stalled` outcome, and retained possession contributes a bonus
//! term to the advantage scalar.

use crate::error::{Result, SimError};
use rand::distributions::{Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KickoffAttack {
    FastBreak,
    ControlledBuildup,
    BackPassSwitch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KickoffDefense {
    HighPress,
    MidBlock,
    DeepShell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KickoffThird {
    SweepForward,
    MatchMark,
    SitDeep,
}

impl KickoffAttack {
    pub const ALL: [KickoffAttack; 3] = [
        KickoffAttack::FastBreak,
        KickoffAttack::ControlledBuildup,
        KickoffAttack::BackPassSwitch,
    ];
}

impl KickoffDefense {
    pub const ALL: [KickoffDefense; 3] =
        [KickoffDefense::HighPress, KickoffDefense::MidBlock, KickoffDefense::DeepShell];
}

impl KickoffThird {
    pub const ALL: [KickoffThird; 3] =
        [KickoffThird::SweepForward, KickoffThird::MatchMark, KickoffThird::SitDeep];
}

/// Possible resolutions of a single kickoff sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KickoffOutcome {
    Shot,
    Counter,
    Possession,
    Stalled,
}

impl KickoffOutcome {
    /// Category order used for weighted sampling.
    pub const ALL: [KickoffOutcome; 4] = [
        KickoffOutcome::Shot,
        KickoffOutcome::Counter,
        KickoffOutcome::Possession,
        KickoffOutcome::Stalled,
    ];
}

const BASE_SHOT: f64 = 0.05;
const BASE_COUNTER: f64 = 0.03;
const BASE_POSSESSION: f64 = 0.62;
const MAX_SHOT: f64 = 0.25;
const MAX_COUNTER: f64 = 0.4;
const MAX_POSSESSION: f64 = 0.9;
/// Weight of retained possession in the advantage scalar.
const POSSESSION_BONUS: f64 = 0.25;

fn attack_shot_shift(stance: KickoffAttack) -> f64 {
    match stance {
        KickoffAttack::FastBreak => 0.05,
        KickoffAttack::ControlledBuildup => 0.01,
        KickoffAttack::BackPassSwitch => -0.01,
    }
}

fn defense_shot_shift(stance: KickoffDefense) -> f64 {
    match stance {
        KickoffDefense::HighPress => -0.02,
        KickoffDefense::MidBlock => -0.01,
        KickoffDefense::DeepShell => 0.0,
    }
}

fn third_shot_shift(stance: KickoffThird) -> f64 {
    match stance {
        KickoffThird::SweepForward => -0.015,
        KickoffThird::MatchMark => -0.005,
        KickoffThird::SitDeep => 0.0,
    }
}

fn attack_counter_shift(stance: KickoffAttack) -> f64 {
    match stance {
        KickoffAttack::FastBreak => 0.04,
        KickoffAttack::ControlledBuildup => -0.01,
        KickoffAttack::BackPassSwitch => 0.02,
    }
}

fn defense_counter_shift(stance: KickoffDefense) -> f64 {
    match stance {
        KickoffDefense::HighPress => 0.05,
        KickoffDefense::MidBlock => 0.02,
        KickoffDefense::DeepShell => -0.02,
    }
}

fn third_counter_shift(stance: KickoffThird) -> f64 {
    match stance {
        KickoffThird::SweepForward => 0.03,
        KickoffThird::MatchMark => 0.01,
        KickoffThird::SitDeep => -0.03,
    }
}

fn attack_possession_shift(stance: KickoffAttack) -> f64 {
    match stance {
        KickoffAttack::FastBreak => -0.05,
        KickoffAttack::ControlledBuildup => 0.06,
        KickoffAttack::BackPassSwitch => 0.08,
    }
}

fn defense_possession_shift(stance: KickoffDefense) -> f64 {
    match stance {
        KickoffDefense::HighPress => -0.08,
        KickoffDefense::MidBlock => -0.02,
        KickoffDefense::DeepShell => 0.05,
    }
}

fn third_possession_shift(stance: KickoffThird) -> f64 {
    match stance {
        KickoffThird::SweepForward => -0.04,
        KickoffThird::MatchMark => -0.01,
        KickoffThird::SitDeep => 0.04,
    }
}

/// Normalized outcome distribution for one stance triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KickoffProbabilities {
    pub shot: f64,
    pub counter: f64,
    pub possession: f64,
    pub stalled: f64,
}

impl KickoffProbabilities {
    pub fn weight(&self, outcome: KickoffOutcome) -> f64 {
        match outcome {
            KickoffOutcome::Shot => self.shot,
            KickoffOutcome::Counter => self.counter,
            KickoffOutcome::Possession => self.possession,
            KickoffOutcome::Stalled => self.stalled,
        }
    }
}

/// Sampled outcome frequencies plus the derived advantage scalar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KickoffRates {
    pub shot_rate: f64,
    pub counter_rate: f64,
    pub possession_rate: f64,
    pub stalled_rate: f64,
    pub net_advantage: f64,
}

pub struct KickoffSimulator {
    rng: ChaCha8Rng,
}

impl KickoffSimulator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rng }
    }

    /// Outcome distribution before sampling. Clamping is silent.
    pub fn outcome_probabilities(
        attack: KickoffAttack,
        defense: KickoffDefense,
        third: KickoffThird,
    ) -> KickoffProbabilities {
        let shot = (BASE_SHOT
            + attack_shot_shift(attack)
            + defense_shot_shift(defense)
            + third_shot_shift(third))
        .clamp(0.0, MAX_SHOT);
        let counter = (BASE_COUNTER
            + attack_counter_shift(attack)
            + defense_counter_shift(defense)
            + third_counter_shift(third))
        .clamp(0.0, MAX_COUNTER);
        let possession = (BASE_POSSESSION
            + attack_possession_shift(attack)
            + defense_possession_shift(defense)
            + third_possession_shift(third))
        .clamp(0.0, MAX_POSSESSION);
        let stalled = (1.0 - shot - counter - possession).max(0.0);
        let total = shot + counter + possession + stalled;
        KickoffProbabilities {
            shot: shot / total,
            counter: counter / total,
            possession: possession / total,
            stalled: stalled / total,
        }
    }

    /// Sample `samples` kickoffs and return outcome frequencies.
    pub fn simulate(
        &mut self,
        attack: KickoffAttack,
        defense: KickoffDefense,
        third: KickoffThird,
        samples: u32,
    ) -> Result<KickoffRates> {
        if samples == 0 {
            return Err(SimError::InvalidParameter("samples must be at least 1".into()));
        }
        let probabilities = Self::outcome_probabilities(attack, defense, third);
        let weights = KickoffOutcome::ALL.map(|outcome| probabilities.weight(outcome));
        let dist = WeightedIndex::new(weights).map_err(|err| {
            SimError::InvalidParameter(format!("kickoff outcome weights are invalid: {}", err))
        })?;

        let mut counts = [0u32; 4];
        for _ in 0..samples {
            counts[dist.sample(&mut self.rng)] += 1;
        }
        let n = f64::from(samples);
        let shot_rate = f64::from(counts[0]) / n;
        let counter_rate = f64::from(counts[1]) / n;
        let possession_rate = f64::from(counts[2]) / n;
        Ok(KickoffRates {
            shot_rate,
            counter_rate,
            possession_rate,
            stalled_rate: f64::from(counts[3]) / n,
            net_advantage: shot_rate - counter_rate + POSSESSION_BONUS * possession_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probabilities_partition_for_every_triple() {
        for attack in KickoffAttack::ALL {
            for defense in KickoffDefense::ALL {
                for third in KickoffThird::ALL {
                    let p = KickoffSimulator::outcome_probabilities(attack, defense, third);
                    let total = p.shot + p.counter + p.possession + p.stalled;
                    assert!(
                        (total - 1.0).abs() < 1e-9,
                        "{:?}/{:?}/{:?} sums to {}",
                        attack,
                        defense,
                        third,
                        total
                    );
                    for value in [p.shot, p.counter, p.possession, p.stalled] {
                        assert!((0.0..=1.0).contains(&value), "probability {} out of range", value);
                    }
                }
            }
        }
    }

    #[test]
    fn test_possession_bonus_feeds_net_advantage() {
        let mut sim = KickoffSimulator::new(Some(15));
        let rates = sim
            .simulate(
                KickoffAttack::ControlledBuildup,
                KickoffDefense::DeepShell,
                KickoffThird::SitDeep,
                10_000,
            )
            .unwrap();
        let expected =
            rates.shot_rate - rates.counter_rate + POSSESSION_BONUS * rates.possession_rate;
        assert!((rates.net_advantage - expected).abs() < 1e-12);
        assert!(
            rates.possession_rate > 0.5,
            "build-up into a deep shell should keep the ball: {}",
            rates.possession_rate
        );
    }

    #[test]
    fn test_same_seed_same_rates() {
        let run = || {
            KickoffSimulator::new(Some(31))
                .simulate(
                    KickoffAttack::FastBreak,
                    KickoffDefense::HighPress,
                    KickoffThird::SweepForward,
                    5_000,
                )
                .unwrap()
        };
        assert_eq!(run(), run());
    }
}
