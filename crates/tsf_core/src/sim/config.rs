//! Central tuning constants for the goal model and fatigue system.

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};

/// Numeric tuning bundle shared by the period and adaptive simulators.
///
/// All strength multipliers must be positive; fatigue penalties are rates
/// applied multiplicatively and floored downstream so effective strengths
/// never reach zero or invert sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Baseline scoring intensity per attacking relationship per minute.
    pub base_rate: f64,
    pub aggressive_attack_bonus: f64,
    pub aggressive_defense_penalty: f64,
    pub defensive_attack_penalty: f64,
    pub defensive_defense_bonus: f64,
    pub collaboration_attack_bonus: f64,
    pub collaboration_defense_penalty: f64,
    pub offensive_fatigue_rate: f64,
    pub defensive_fatigue_rate: f64,
    pub fatigue_recovery: f64,
    pub fatigue_attack_penalty: f64,
    pub fatigue_defense_penalty: f64,
    /// Seed for the simulator's own generator. Runs are reproducible only
    /// when this is set; otherwise the generator is seeded from entropy.
    pub random_seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            base_rate: 0.04,
            aggressive_attack_bonus: 1.3,
            aggressive_defense_penalty: 0.85,
            defensive_attack_penalty: 0.75,
            defensive_defense_bonus: 1.35,
            collaboration_attack_bonus: 1.5,
            collaboration_defense_penalty: 0.9,
            offensive_fatigue_rate: 0.08,
            defensive_fatigue_rate: 0.07,
            fatigue_recovery: 0.03,
            fatigue_attack_penalty: 0.12,
            fatigue_defense_penalty: 0.1,
            random_seed: None,
        }
    }
}

impl SimConfig {
    /// Default tuning with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self { random_seed: Some(seed), ..Self::default() }
    }

    /// Higher-tempo preset: more goals, faster fatigue swings.
    pub fn high_scoring() -> Self {
        Self {
            base_rate: 0.06,
            aggressive_attack_bonus: 1.4,
            collaboration_attack_bonus: 1.65,
            offensive_fatigue_rate: 0.1,
            ..Self::default()
        }
    }

    /// Fail fast on constants that would corrupt the rate model.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("base_rate", self.base_rate),
            ("aggressive_attack_bonus", self.aggressive_attack_bonus),
            ("aggressive_defense_penalty", self.aggressive_defense_penalty),
            ("defensive_attack_penalty", self.defensive_attack_penalty),
            ("defensive_defense_bonus", self.defensive_defense_bonus),
            ("collaboration_attack_bonus", self.collaboration_attack_bonus),
            ("collaboration_defense_penalty", self.collaboration_defense_penalty),
        ];
        for (name, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(SimError::InvalidConfig(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("offensive_fatigue_rate", self.offensive_fatigue_rate),
            ("defensive_fatigue_rate", self.defensive_fatigue_rate),
            ("fatigue_recovery", self.fatigue_recovery),
            ("fatigue_attack_penalty", self.fatigue_attack_penalty),
            ("fatigue_defense_penalty", self.fatigue_defense_penalty),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(SimError::InvalidConfig(format!(
                    "{} must be non-negative and finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
