//! Free-kick micro-simulator.
//!
//! Team A strikes the attacking free kick, team B sets the wall and keeper
//! screen, and team C manages spill-over space and counter threats. The
//! remainder after goal/counter/retained is the explicit `Lost` outcome.

use crate::error::{Result, SimError};
use rand::distributions::{Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FreeKickAttack {
    DirectShot,
    FarPostCross,
    QuickRestart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FreeKickDefense {
    HighWall,
    SplitWall,
    LatePress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FreeKickThird {
    PressSecondBall,
    CoverCounter,
    StayCentral,
}

impl FreeKickAttack {
    pub const ALL: [FreeKickAttack; 3] =
        [FreeKickAttack::DirectShot, FreeKickAttack::FarPostCross, FreeKickAttack::QuickRestart];
}

impl FreeKickDefense {
    pub const ALL: [FreeKickDefense; 3] =
        [FreeKickDefense::HighWall, FreeKickDefense::SplitWall, FreeKickDefense::LatePress];
}

impl FreeKickThird {
    pub const ALL: [FreeKickThird; 3] = [
        FreeKickThird::PressSecondBall,
        FreeKickThird::CoverCounter,
        FreeKickThird::StayCentral,
    ];
}

/// Possible resolutions of a single free kick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FreeKickOutcome {
    Goal,
    Counter,
    Retained,
    Lost,
}

impl FreeKickOutcome {
    /// Category order used for weighted sampling.
    pub const ALL: [FreeKickOutcome; 4] = [
        FreeKickOutcome::Goal,
        FreeKickOutcome::Counter,
        FreeKickOutcome::Retained,
        FreeKickOutcome::Lost,
    ];
}

const BASE_GOAL: f64 = 0.10;
const BASE_COUNTER: f64 = 0.04;
const BASE_RETAINED: f64 = 0.36;
const MAX_GOAL: f64 = 0.55;
const MAX_COUNTER: f64 = 0.5;
const MAX_RETAINED: f64 = 0.8;

fn attack_goal_shift(stance: FreeKickAttack) -> f64 {
    match stance {
        FreeKickAttack::DirectShot => 0.08,
        FreeKickAttack::FarPostCross => 0.05,
        FreeKickAttack::QuickRestart => -0.02,
    }
}

fn defense_goal_shift(stance: FreeKickDefense) -> f64 {
    match stance {
        FreeKickDefense::HighWall => -0.05,
        FreeKickDefense::SplitWall => -0.02,
        FreeKickDefense::LatePress => 0.01,
    }
}

fn third_goal_shift(stance: FreeKickThird) -> f64 {
    match stance {
        FreeKickThird::PressSecondBall => -0.01,
        FreeKickThird::CoverCounter => 0.0,
        FreeKickThird::StayCentral => 0.02,
    }
}

fn attack_counter_shift(stance: FreeKickAttack) -> f64 {
    match stance {
        FreeKickAttack::DirectShot => -0.01,
        FreeKickAttack::FarPostCross => 0.03,
        FreeKickAttack::QuickRestart => 0.05,
    }
}

fn defense_counter_shift(stance: FreeKickDefense) -> f64 {
    match stance {
        FreeKickDefense::HighWall => -0.02,
        FreeKickDefense::SplitWall => 0.01,
        FreeKickDefense::LatePress => 0.04,
    }
}

fn third_counter_shift(stance: FreeKickThird) -> f64 {
    match stance {
        FreeKickThird::PressSecondBall => 0.05,
        FreeKickThird::CoverCounter => -0.02,
        FreeKickThird::StayCentral => -0.01,
    }
}

fn attack_retained_shift(stance: FreeKickAttack) -> f64 {
    match stance {
        FreeKickAttack::DirectShot => -0.08,
        FreeKickAttack::FarPostCross => 0.06,
        FreeKickAttack::QuickRestart => 0.09,
    }
}

fn defense_retained_shift(stance: FreeKickDefense) -> f64 {
    match stance {
        FreeKickDefense::HighWall => -0.03,
        FreeKickDefense::SplitWall => 0.02,
        FreeKickDefense::LatePress => -0.04,
    }
}

fn third_retained_shift(stance: FreeKickThird) -> f64 {
    match stance {
        FreeKickThird::PressSecondBall => 0.07,
        FreeKickThird::CoverCounter => -0.05,
        FreeKickThird::StayCentral => -0.01,
    }
}

/// Normalized outcome distribution for one stance triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreeKickProbabilities {
    pub goal: f64,
    pub counter: f64,
    pub retained: f64,
    pub lost: f64,
}

impl FreeKickProbabilities {
    pub fn weight(&self, outcome: FreeKickOutcome) -> f64 {
        match outcome {
            FreeKickOutcome::Goal => self.goal,
            FreeKickOutcome::Counter => self.counter,
            FreeKickOutcome::Retained => self.retained,
            FreeKickOutcome::Lost => self.lost,
        }
    }
}

/// Sampled outcome frequencies plus the derived advantage scalar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreeKickRates {
    pub goal_rate: f64,
    pub counter_rate: f64,
    pub retained_rate: f64,
    pub lost_rate: f64,
    pub net_advantage: f64,
}

pub struct FreeKickSimulator {
    rng: ChaCha8Rng,
}

impl FreeKickSimulator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rng }
    }

    /// Outcome distribution before sampling. Clamping is silent.
    pub fn outcome_probabilities(
        attack: FreeKickAttack,
        defense: FreeKickDefense,
        third: FreeKickThird,
    ) -> FreeKickProbabilities {
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
        let retained = (BASE_RETAINED
            + attack_retained_shift(attack)
            + defense_retained_shift(defense)
            + third_retained_shift(third))
        .clamp(0.0, MAX_RETAINED);
        let lost = (1.0 - goal - counter - retained).max(0.0);
        let total = goal + counter + retained + lost;
        FreeKickProbabilities {
            goal: goal / total,
            counter: counter / total,
            retained: retained / total,
            lost: lost / total,
        }
    }

    /// Sample `samples` free kicks and return outcome frequencies.
    pub fn simulate(
        &mut self,
        attack: FreeKickAttack,
        defense: FreeKickDefense,
        third: FreeKickThird,
        samples: u32,
    ) -> Result<FreeKickRates> {
        if samples == 0 {
            return Err(SimError::InvalidParameter("samples must be at least 1".into()));
        }
        let probabilities = Self::outcome_probabilities(attack, defense, third);
        let weights = FreeKickOutcome::ALL.map(|outcome| probabilities.weight(outcome));
        let dist = WeightedIndex::new(weights).map_err(|err| {
            SimError::InvalidParameter(format!("free-kick outcome weights are invalid: {}", err))
        })?;

        let mut counts = [0u32; 4];
        for _ in 0..samples {
            counts[dist.sample(&mut self.rng)] += 1;
        }
        let n = f64::from(samples);
        let goal_rate = f64::from(counts[0]) / n;
        let counter_rate = f64::from(counts[1]) / n;
        Ok(FreeKickRates {
            goal_rate,
            counter_rate,
            retained_rate: f64::from(counts[2]) / n,
            lost_rate: f64::from(counts[3]) / n,
            net_advantage: goal_rate - counter_rate,
        })
    }
}
