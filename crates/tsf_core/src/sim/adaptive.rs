//! Adaptive minute-by-minute simulation.
//!
//! Each Monte Carlo sample replays the period one minute at a time. Every
//! minute each team's policy re-selects a stance from the running score and
//! fatigue state, a fresh single-minute Poisson draw is taken per ordered
//! pair, and fatigue accrues from the workload of the chosen stance.

use crate::error::{Result, SimError};
use crate::sim::collaboration::identify_collaborations;
use crate::sim::period::ThreeSidedGame;
use crate::sim::rates;
use crate::sim::state::TeamState;
use crate::sim::strategy::{StanceAssignment, Strategy, TeamId};
use rand_distr::{Distribution, Poisson};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running-state snapshot a policy consumes when picking a stance.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext {
    pub minute: u32,
    pub total_minutes: u32,
    pub team: TeamId,
    /// Cumulative goals scored per team (base state plus period so far).
    pub total_scored: [f64; 3],
    /// Cumulative goals conceded per team (base state plus period so far).
    pub total_conceded: [f64; 3],
    pub offensive_fatigue: f64,
    pub defensive_fatigue: f64,
}

/// Heuristic in-period decision rule for one team.
///
/// The rule chain runs in a fixed priority order; safety (fatigue)
/// dominates opportunism (collaboration, chasing), which dominates caution
/// (protecting a lead), which dominates equilibrium-seeking (draw).
/// Reordering the chain silently changes behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptivePolicy {
    pub default: Strategy,
    pub when_trailing: Option<Strategy>,
    pub trailing_margin: f64,
    pub when_trailing_late: Option<Strategy>,
    pub late_minute: Option<u32>,
    pub when_leading: Option<Strategy>,
    pub leading_margin: f64,
    pub collaboration_margin: Option<f64>,
    pub collaboration_strategy: Option<Strategy>,
    pub when_fatigued_offense: Option<Strategy>,
    pub offense_fatigue_threshold: Option<f64>,
    pub when_fatigued_defense: Option<Strategy>,
    pub defense_fatigue_threshold: Option<f64>,
    pub draw_strategy: Option<Strategy>,
    pub draw_minute: Option<u32>,
    pub draw_margin: f64,
}

impl Default for AdaptivePolicy {
    fn default() -> Self {
        Self {
            default: Strategy::Balanced,
            when_trailing: Some(Strategy::Aggressive),
            trailing_margin: 1.0,
            when_trailing_late: None,
            late_minute: None,
            when_leading: Some(Strategy::Defensive),
            leading_margin: 1.0,
            collaboration_margin: None,
            collaboration_strategy: None,
            when_fatigued_offense: None,
            offense_fatigue_threshold: None,
            when_fatigued_defense: None,
            defense_fatigue_threshold: None,
            draw_strategy: None,
            draw_minute: None,
            draw_margin: 0.5,
        }
    }
}

impl AdaptivePolicy {
    /// Pick the stance for one minute.
    ///
    /// Standings derive from cumulative concessions: the best-placed team
    /// is the one that has conceded least.
    pub fn select_stance(&self, ctx: &PolicyContext) -> Strategy {
        let own = ctx.total_conceded[ctx.team.index()];
        let mut sorted = ctx.total_conceded;
        sorted.sort_by(f64::total_cmp);
        let best = sorted[0];
        let second_best = sorted[1];
        let trailing_by = (own - best).max(0.0);
        let leading_by = (second_best - own).max(0.0);
        let draw_gap = ctx
            .team
            .opponents()
            .iter()
            .map(|other| (own - ctx.total_conceded[other.index()]).abs())
            .fold(0.0, f64::max);

        if let (Some(stance), Some(threshold)) =
            (self.when_fatigued_offense, self.offense_fatigue_threshold)
        {
            if ctx.offensive_fatigue >= threshold {
                return stance;
            }
        }

        if let (Some(stance), Some(threshold)) =
            (self.when_fatigued_defense, self.defense_fatigue_threshold)
        {
            if ctx.defensive_fatigue >= threshold {
                return stance;
            }
        }

        if let (Some(stance), Some(margin)) =
            (self.collaboration_strategy, self.collaboration_margin)
        {
            if trailing_by >= margin {
                return stance;
            }
        }

        if let Some(stance) = self.when_trailing {
            if trailing_by >= self.trailing_margin.max(0.0) {
                if let (Some(late_stance), Some(late_minute)) =
                    (self.when_trailing_late, self.late_minute)
                {
                    if ctx.minute >= late_minute {
                        return late_stance;
                    }
                }
                return stance;
            }
        }

        if let Some(stance) = self.when_leading {
            if leading_by >= self.leading_margin.max(0.0) {
                return stance;
            }
        }

        if let (Some(stance), Some(draw_minute)) = (self.draw_strategy, self.draw_minute) {
            if ctx.minute >= draw_minute && draw_gap <= self.draw_margin {
                return stance;
            }
        }

        if let (Some(stance), Some(late_minute)) = (self.when_trailing_late, self.late_minute) {
            if ctx.minute >= late_minute && trailing_by > 0.0 {
                return stance;
            }
        }

        self.default
    }
}

/// Per-team output of an adaptive run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveTeamMetrics {
    pub expected_scored: f64,
    pub expected_conceded: f64,
    pub expected_net: f64,
    pub avg_offensive_fatigue: f64,
    pub avg_defensive_fatigue: f64,
    /// Share of minute-decisions spent in each stance; unused stances are
    /// omitted.
    pub strategy_usage: BTreeMap<Strategy, f64>,
}

/// Run-level metadata for an adaptive simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveMetadata {
    pub minutes: u32,
    pub samples: u32,
    /// Fraction of minute-decisions during which any alliance was active.
    pub collaboration_frequency: f64,
}

/// Full result of [`ThreeSidedGame::simulate_period_adaptive`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveReport {
    pub team_metrics: [AdaptiveTeamMetrics; 3],
    pub metadata: AdaptiveMetadata,
}

impl AdaptiveReport {
    pub fn team(&self, team: TeamId) -> &AdaptiveTeamMetrics {
        &self.team_metrics[team.index()]
    }
}

/// Private per-sample trajectory state; discarded after aggregation.
#[derive(Debug, Clone, Copy, Default)]
struct SampleTrack {
    scored: [f64; 3],
    conceded: [f64; 3],
    offensive_fatigue: [f64; 3],
    defensive_fatigue: [f64; 3],
}

impl ThreeSidedGame {
    /// Simulate a period with within-minute adaptations and fatigue.
    ///
    /// Iteration is minute-major, then sample, then attacker row; that
    /// draw order is part of the reproducibility contract under a fixed
    /// seed. Sample trajectories share no state.
    pub fn simulate_period_adaptive(
        &mut self,
        states: &[TeamState; 3],
        policies: &[AdaptivePolicy; 3],
        minutes: u32,
        samples: u32,
    ) -> Result<AdaptiveReport> {
        if minutes == 0 {
            return Err(SimError::InvalidParameter("minutes must be at least 1".into()));
        }
        if samples == 0 {
            return Err(SimError::InvalidParameter("samples must be at least 1".into()));
        }
        log::debug!(
            "simulate_period_adaptive: teams=[{}, {}, {}] minutes={} samples={}",
            states[0].name,
            states[1].name,
            states[2].name,
            minutes,
            samples
        );

        let config = self.config().clone();
        let base_scored = [0, 1, 2].map(|idx| f64::from(states[idx].score));
        let base_conceded = [0, 1, 2].map(|idx| f64::from(states[idx].conceded));

        let mut tracks = vec![SampleTrack::default(); samples as usize];
        let mut usage_counts = [[0u64; Strategy::ALL.len()]; 3];
        let mut collaboration_count = 0u64;

        for minute in 0..minutes {
            for track in tracks.iter_mut() {
                let total_scored = [0, 1, 2].map(|idx| base_scored[idx] + track.scored[idx]);
                let total_conceded =
                    [0, 1, 2].map(|idx| base_conceded[idx] + track.conceded[idx]);

                let mut chosen = [Strategy::Balanced; 3];
                for team in TeamId::ALL {
                    let idx = team.index();
                    let ctx = PolicyContext {
                        minute,
                        total_minutes: minutes,
                        team,
                        total_scored,
                        total_conceded,
                        offensive_fatigue: track.offensive_fatigue[idx],
                        defensive_fatigue: track.defensive_fatigue[idx],
                    };
                    let stance = policies[idx].select_stance(&ctx);
                    chosen[idx] = stance;
                    usage_counts[idx][stance.index()] += 1;
                }

                let stances = StanceAssignment::from(chosen);
                let (mut attack, mut defense) = rates::stance_strengths(&config, &stances);
                for idx in 0..3 {
                    attack[idx] *=
                        rates::fatigue_attack_factor(&config, track.offensive_fatigue[idx]);
                    defense[idx] *=
                        rates::fatigue_defense_factor(&config, track.defensive_fatigue[idx]);
                }

                let mut attack_modifiers = [[1.0; 3]; 3];
                let collaborations = identify_collaborations(&stances);
                if !collaborations.is_empty() {
                    collaboration_count += 1;
                }
                rates::apply_collaborations(
                    &config,
                    &collaborations,
                    &mut attack_modifiers,
                    &mut defense,
                );

                // One un-scaled draw per ordered pair: a single minute of
                // intensity.
                let lambda = rates::scoring_rate_matrix(
                    config.base_rate,
                    &attack,
                    &defense,
                    &attack_modifiers,
                    rates::MIN_DEFENSE_STRENGTH,
                );
                for i in 0..3 {
                    for j in 0..3 {
                        if i == j {
                            continue;
                        }
                        let dist = Poisson::new(lambda[i][j]).map_err(|err| {
                            SimError::InvalidParameter(format!(
                                "minute rate {} for pair ({}, {}) is not a valid Poisson rate: {}",
                                lambda[i][j], i, j, err
                            ))
                        })?;
                        let goals: f64 = dist.sample(&mut self.rng);
                        track.scored[i] += goals;
                        track.conceded[j] += goals;
                    }
                }

                for idx in 0..3 {
                    let stance = chosen[idx];
                    track.offensive_fatigue[idx] = (track.offensive_fatigue[idx]
                        + config.offensive_fatigue_rate * stance.attack_load()
                        - config.fatigue_recovery)
                        .max(0.0);
                    track.defensive_fatigue[idx] = (track.defensive_fatigue[idx]
                        + config.defensive_fatigue_rate * stance.defense_load()
                        - config.fatigue_recovery * 0.7)
                        .max(0.0);
                }
            }
        }

        let n = f64::from(samples);
        let total_decisions = u64::from(minutes) * u64::from(samples);
        let team_metrics = [0, 1, 2].map(|idx| {
            let scored: f64 = tracks.iter().map(|t| t.scored[idx]).sum::<f64>() / n;
            let conceded: f64 = tracks.iter().map(|t| t.conceded[idx]).sum::<f64>() / n;
            let mut strategy_usage = BTreeMap::new();
            for stance in Strategy::ALL {
                let count = usage_counts[idx][stance.index()];
                if count > 0 {
                    strategy_usage.insert(stance, count as f64 / total_decisions as f64);
                }
            }
            AdaptiveTeamMetrics {
                expected_scored: scored,
                expected_conceded: conceded,
                expected_net: scored - conceded,
                avg_offensive_fatigue: tracks
                    .iter()
                    .map(|t| t.offensive_fatigue[idx])
                    .sum::<f64>()
                    / n,
                avg_defensive_fatigue: tracks
                    .iter()
                    .map(|t| t.defensive_fatigue[idx])
                    .sum::<f64>()
                    / n,
                strategy_usage,
            }
        });

        Ok(AdaptiveReport {
            team_metrics,
            metadata: AdaptiveMetadata {
                minutes,
                samples,
                collaboration_frequency: collaboration_count as f64 / total_decisions as f64,
            },
        })
    }
}
