//! Corner kick micro-simulator.
//!
//! Team A delivers the corner, team B defends the targeted goal directly,
//! and team C chooses between supporting the defence and springing a
//! counter. Probabilities start from fixed base rates, take one additive
//! modifier per team's stance, and are clamped and renormalized; the
//! remainder is the explicit `Neutral` outcome.

use crate::error::{Result, SimError};
use rand::distributions::{Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerAttack {
    OverloadB,
    SplitAttack,
    ShortCorner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerDefense {
    GoalLine,
    ManMark,
    CounterPress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerThird {
    PressA,
    PressB,
    StayBack,
}

impl CornerAttack {
    pub const ALL: [CornerAttack; 3] =
        [CornerAttack::OverloadB, CornerAttack::SplitAttack, CornerAttack::ShortCorner];
}

impl CornerDefense {
    pub const ALL: [CornerDefense; 3] =
        [CornerDefense::GoalLine, CornerDefense::ManMark, CornerDefense::CounterPress];
}

impl CornerThird {
    pub const ALL: [CornerThird; 3] =
        [CornerThird::PressA, CornerThird::PressB, CornerThird::StayBack];
}

/// Possible resolutions of a single corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerOutcome {
    Goal,
    Counter,
    Neutral,
}

impl CornerOutcome {
    /// Category order used for weighted sampling.
    pub const ALL: [CornerOutcome; 3] =
        [CornerOutcome::Goal, CornerOutcome::Counter, CornerOutcome::Neutral];
}

const BASE_GOAL: f64 = 0.12;
const BASE_COUNTER: f64 = 0.05;
const MAX_GOAL: f64 = 0.6;
const MAX_COUNTER: f64 = 0.5;

fn attack_goal_shift(stance: CornerAttack) -> f64 {
    match stance {
        CornerAttack::OverloadB => 0.09,
        CornerAttack::SplitAttack => 0.04,
        CornerAttack::ShortCorner => -0.03,
    }
}

fn attack_counter_shift(stance: CornerAttack) -> f64 {
    match stance {
        CornerAttack::OverloadB => 0.07,
        CornerAttack::SplitAttack => 0.03,
        CornerAttack::ShortCorner => -0.02,
    }
}

fn defense_goal_shift(stance: CornerDefense) -> f64 {
    match stance {
        CornerDefense::GoalLine => -0.04,
        CornerDefense::ManMark => -0.02,
        CornerDefense::CounterPress => 0.01,
    }
}

fn defense_counter_shift(stance: CornerDefense) -> f64 {
    match stance {
        CornerDefense::GoalLine => -0.01,
        CornerDefense::ManMark => 0.0,
        CornerDefense::CounterPress => 0.04,
    }
}

fn third_goal_shift(stance: CornerThird) -> f64 {
    match stance {
        CornerThird::PressA => -0.02,
        CornerThird::PressB => 0.02,
        CornerThird::StayBack => 0.0,
    }
}

fn third_counter_shift(stance: CornerThird) -> f64 {
    match stance {
        CornerThird::PressA => 0.06,
        CornerThird::PressB => 0.01,
        CornerThird::StayBack => -0.02,
    }
}

/// Normalized outcome distribution for one stance triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerProbabilities {
    pub goal: f64,
    pub counter: f64,
    pub neutral: f64,
}

impl CornerProbabilities {
    pub fn weight(&self, outcome: CornerOutcome) -> f64 {
        match outcome {
            CornerOutcome::Goal => self.goal,
            CornerOutcome::Counter => self.counter,
            CornerOutcome::Neutral => self.neutral,
        }
    }
}

/// Sampled outcome frequencies plus the derived advantage scalar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerRates {
    pub goal_rate: f64,
    pub counter_rate: f64,
    pub neutral_rate: f64,
    pub net_advantage: f64,
}

pub struct CornerSimulator {
    rng: ChaCha8Rng,
}

impl CornerSimulator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rng }
    }

    /// Outcome distribution before sampling.
    ///
    /// Out-of-range intermediate probabilities are clamped silently and
    /// the distribution renormalized; masking bad tuning here is a
    /// deliberate trade-off.
    pub fn outcome_probabilities(
        attack: CornerAttack,
        defense: CornerDefense,
        third: CornerThird,
    ) -> CornerProbabilities {
        let goal = (BASE_GOAL
            + attack_goal_shift(attack)
            + defense_goal_shift(defense)
            + third_goal_shift(third))
        .clamp(0.0, MAX_GOAL);
        let counter = (BASE_COUNTER
            + attack_counter_shift(attack)
            + defense_counter_shift(defense)
            + third_counter_shift(third))
        .clamp(0.0, MAX_COUNTER);
        let neutral = (1.0 - goal - counter).max(0.0);
        let total = goal + counter + neutral;
        CornerProbabilities {
            goal: goal / total,
            counter: counter / total,
            neutral: neutral / total,
        }
    }

    /// Sample `samples` corners and return outcome frequencies.
    pub fn simulate(
        &mut self,
        attack: CornerAttack,
        defense: CornerDefense,
        third: CornerThird,
        samples: u32,
    ) -> Result<CornerRates> {
        if samples == 0 {
            return Err(SimError::InvalidParameter("samples must be at least 1".into()));
        }
        let probabilities = Self::outcome_probabilities(attack, defense, third);
        let weights = CornerOutcome::ALL.map(|outcome| probabilities.weight(outcome));
        let dist = WeightedIndex::new(weights).map_err(|err| {
            SimError::InvalidParameter(format!("corner outcome weights are invalid: {}", err))
        })?;

        let mut counts = [0u32; 3];
        for _ in 0..samples {
            counts[dist.sample(&mut self.rng)] += 1;
        }
        let n = f64::from(samples);
        let goal_rate = f64::from(counts[0]) / n;
        let counter_rate = f64::from(counts[1]) / n;
        Ok(CornerRates {
            goal_rate,
            counter_rate,
            neutral_rate: f64::from(counts[2]) / n,
            net_advantage: goal_rate - counter_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probabilities_partition_for_every_triple() {
        for attack in CornerAttack::ALL {
            for defense in CornerDefense::ALL {
                for third in CornerThird::ALL {
                    let p = CornerSimulator::outcome_probabilities(attack, defense, third);
                    for value in [p.goal, p.counter, p.neutral] {
                        assert!((0.0..=1.0).contains(&value), "probability {} out of range", value);
                    }
                    let total = p.goal + p.counter + p.neutral;
                    assert!(
                        (total - 1.0).abs() < 1e-9,
                        "{:?}/{:?}/{:?} sums to {}",
                        attack,
                        defense,
                        third,
                        total
                    );
                }
            }
        }
    }

    #[test]
    fn test_overload_against_goal_line_arithmetic() {
        // 0.12 + 0.09 - 0.04 + 0.0 = 0.17 before clamping, which is
        // already in range, so it survives renormalization untouched.
        let p = CornerSimulator::outcome_probabilities(
            CornerAttack::OverloadB,
            CornerDefense::GoalLine,
            CornerThird::StayBack,
        );
        assert!((p.goal - 0.17).abs() < 1e-12, "goal probability {}", p.goal);
    }

    #[test]
    fn test_sampled_goal_rate_tracks_probability() {
        let mut sim = CornerSimulator::new(Some(42));
        let rates = sim
            .simulate(
                CornerAttack::OverloadB,
                CornerDefense::GoalLine,
                CornerThird::StayBack,
                20_000,
            )
            .unwrap();
        assert!(
            (rates.goal_rate - 0.17).abs() < 0.02,
            "goal rate {} should sit near 0.17",
            rates.goal_rate
        );
        let total = rates.goal_rate + rates.counter_rate + rates.neutral_rate;
        assert!((total - 1.0).abs() < 1e-9, "rates must partition: {}", total);
        assert!(
            (rates.net_advantage - (rates.goal_rate - rates.counter_rate)).abs() < 1e-12
        );
    }

    #[test]
    fn test_same_seed_same_rates() {
        let mut first = CornerSimulator::new(Some(9));
        let mut second = CornerSimulator::new(Some(9));
        let one = first
            .simulate(CornerAttack::SplitAttack, CornerDefense::ManMark, CornerThird::PressA, 5_000)
            .unwrap();
        let two = second
            .simulate(CornerAttack::SplitAttack, CornerDefense::ManMark, CornerThird::PressA, 5_000)
            .unwrap();
        assert_eq!(one, two);
    }

    #[test]
    fn test_zero_samples_rejected() {
        let mut sim = CornerSimulator::new(Some(1));
        let err = sim
            .simulate(CornerAttack::ShortCorner, CornerDefense::GoalLine, CornerThird::StayBack, 0)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter(_)));
    }
}
