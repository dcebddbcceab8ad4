//! Strength and scoring-rate math for the goal model.
//!
//! All functions are pure - they take the config and stance/fatigue state
//! as input and return multipliers or rate matrices. This keeps the Poisson
//! model testable without driving a full simulation.

use crate::sim::collaboration::Collaboration;
use crate::sim::config::SimConfig;
use crate::sim::strategy::{StanceAssignment, Strategy, TeamId};

/// Floor for the fatigue attack attenuation factor.
pub const MIN_ATTACK_FACTOR: f64 = 0.2;
/// Floor for the fatigue defense attenuation factor.
pub const MIN_DEFENSE_FACTOR: f64 = 0.3;
/// Floor for the defense divisor in the per-minute rate matrix.
pub const MIN_DEFENSE_STRENGTH: f64 = 0.2;

/// Attack and defense strength multipliers from the chosen stances.
///
/// Aggressive boosts attack and weakens defense, defensive is the inverse;
/// balanced and the collaboration stances are neutral on this axis.
pub fn stance_strengths(config: &SimConfig, stances: &StanceAssignment) -> ([f64; 3], [f64; 3]) {
    let mut attack = [1.0; 3];
    let mut defense = [1.0; 3];
    for team in TeamId::ALL {
        let idx = team.index();
        match stances.get(team) {
            Strategy::Aggressive => {
                attack[idx] *= config.aggressive_attack_bonus;
                defense[idx] *= config.aggressive_defense_penalty;
            }
            Strategy::Defensive => {
                attack[idx] *= config.defensive_attack_penalty;
                defense[idx] *= config.defensive_defense_bonus;
            }
            Strategy::Balanced
            | Strategy::CollaborateWithNext
            | Strategy::CollaborateWithPrev => {}
        }
    }
    (attack, defense)
}

/// Apply realized alliances to the pairwise attack modifiers and to the
/// collaborators' own defense: a coordinated attack is bought with
/// defensive solidity.
pub fn apply_collaborations(
    config: &SimConfig,
    collaborations: &[Collaboration],
    attack_modifiers: &mut [[f64; 3]; 3],
    defense: &mut [f64; 3],
) {
    for collaboration in collaborations {
        let (first, second) = collaboration.pair;
        let target = collaboration.target.index();
        attack_modifiers[first.index()][target] *= config.collaboration_attack_bonus;
        attack_modifiers[second.index()][target] *= config.collaboration_attack_bonus;
        defense[first.index()] *= config.collaboration_defense_penalty;
        defense[second.index()] *= config.collaboration_defense_penalty;
    }
}

/// Attack attenuation from accumulated offensive fatigue, floored so
/// strength never reaches zero.
pub fn fatigue_attack_factor(config: &SimConfig, fatigue: f64) -> f64 {
    (1.0 - config.fatigue_attack_penalty * fatigue).max(MIN_ATTACK_FACTOR)
}

/// Defense attenuation from accumulated defensive fatigue.
pub fn fatigue_defense_factor(config: &SimConfig, fatigue: f64) -> f64 {
    (1.0 - config.fatigue_defense_penalty * fatigue).max(MIN_DEFENSE_FACTOR)
}

/// Asymmetric per-minute scoring-rate matrix.
///
/// `lambda[i][j] = base_rate * attack[i] * modifier[i][j] / defense[j]`
/// for `i != j`; a team cannot score against itself, so the diagonal is
/// zero. `defense_floor` guards the divisor in the fatigue-aware path.
pub fn scoring_rate_matrix(
    base_rate: f64,
    attack: &[f64; 3],
    defense: &[f64; 3],
    attack_modifiers: &[[f64; 3]; 3],
    defense_floor: f64,
) -> [[f64; 3]; 3] {
    let mut lambda = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            if i == j {
                continue;
            }
            lambda[i][j] =
                base_rate * attack[i] * attack_modifiers[i][j] / defense[j].max(defense_floor);
        }
    }
    lambda
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collaboration::identify_collaborations;
    use proptest::prelude::{prop_assert, proptest};

    const IDENTITY: [[f64; 3]; 3] = [[1.0; 3]; 3];

    #[test]
    fn test_all_balanced_is_symmetric() {
        let config = SimConfig::default();
        let (attack, defense) = stance_strengths(&config, &StanceAssignment::new());
        let lambda = scoring_rate_matrix(config.base_rate, &attack, &defense, &IDENTITY, 0.0);
        for i in 0..3 {
            assert_eq!(lambda[i][i], 0.0, "diagonal must stay zero");
            for j in 0..3 {
                if i != j {
                    assert!(
                        (lambda[i][j] - config.base_rate).abs() < 1e-12,
                        "balanced rate should equal base_rate: {}",
                        lambda[i][j]
                    );
                }
            }
        }
    }

    #[test]
    fn test_aggressive_trades_defense_for_attack() {
        let config = SimConfig::default();
        let stances = StanceAssignment::new().with(TeamId::A, Strategy::Aggressive);
        let (attack, defense) = stance_strengths(&config, &stances);
        assert!(attack[0] > 1.0 && defense[0] < 1.0);
        assert_eq!((attack[1], defense[1]), (1.0, 1.0));
    }

    #[test]
    fn test_collaboration_bonus_hits_shared_target_only() {
        let config = SimConfig::default();
        let stances = StanceAssignment::new()
            .with(TeamId::A, Strategy::CollaborateWithNext)
            .with(TeamId::B, Strategy::CollaborateWithPrev);
        let collaborations = identify_collaborations(&stances);
        let (_, mut defense) = stance_strengths(&config, &stances);
        let mut modifiers = IDENTITY;
        apply_collaborations(&config, &collaborations, &mut modifiers, &mut defense);

        assert!((modifiers[0][2] - config.collaboration_attack_bonus).abs() < 1e-12);
        assert!((modifiers[1][2] - config.collaboration_attack_bonus).abs() < 1e-12);
        assert_eq!(modifiers[0][1], 1.0, "no bonus off-target");
        assert!((defense[0] - config.collaboration_defense_penalty).abs() < 1e-12);
        assert!((defense[1] - config.collaboration_defense_penalty).abs() < 1e-12);
        assert_eq!(defense[2], 1.0, "target defense untouched");
    }

    #[test]
    fn test_rate_matrix_permutes_with_teams() {
        // Swapping which team plays which stance must swap rows/columns
        // identically; there is no positional bias outside the cyclic
        // collaboration semantics.
        let config = SimConfig::default();
        let forward = StanceAssignment::new()
            .with(TeamId::A, Strategy::Aggressive)
            .with(TeamId::B, Strategy::Defensive)
            .with(TeamId::C, Strategy::Balanced);
        let swapped = StanceAssignment::new()
            .with(TeamId::A, Strategy::Balanced)
            .with(TeamId::B, Strategy::Defensive)
            .with(TeamId::C, Strategy::Aggressive);

        let (attack_f, defense_f) = stance_strengths(&config, &forward);
        let (attack_s, defense_s) = stance_strengths(&config, &swapped);
        let lambda_f =
            scoring_rate_matrix(config.base_rate, &attack_f, &defense_f, &IDENTITY, 0.0);
        let lambda_s =
            scoring_rate_matrix(config.base_rate, &attack_s, &defense_s, &IDENTITY, 0.0);

        // Permutation swaps indices 0 and 2.
        let perm = [2, 1, 0];
        for i in 0..3 {
            for j in 0..3 {
                assert!(
                    (lambda_f[i][j] - lambda_s[perm[i]][perm[j]]).abs() < 1e-12,
                    "cell ({}, {}) should permute cleanly",
                    i,
                    j
                );
            }
        }
    }

    proptest! {
        #[test]
        fn prop_fatigue_factors_stay_positive_and_floored(fatigue in 0.0f64..50.0) {
            let config = SimConfig::default();
            let attack = fatigue_attack_factor(&config, fatigue);
            let defense = fatigue_defense_factor(&config, fatigue);
            prop_assert!(attack >= MIN_ATTACK_FACTOR && attack <= 1.0);
            prop_assert!(defense >= MIN_DEFENSE_FACTOR && defense <= 1.0);
        }

        #[test]
        fn prop_rates_are_non_negative(
            a0 in 0.1f64..3.0,
            a1 in 0.1f64..3.0,
            a2 in 0.1f64..3.0,
            d0 in 0.1f64..3.0,
            d1 in 0.1f64..3.0,
            d2 in 0.1f64..3.0,
        ) {
            let lambda = scoring_rate_matrix(
                0.04,
                &[a0, a1, a2],
                &[d0, d1, d2],
                &IDENTITY,
                MIN_DEFENSE_STRENGTH,
            );
            for row in lambda {
                for cell in row {
                    prop_assert!(cell.is_finite() && cell >= 0.0);
                }
            }
        }
    }
}
