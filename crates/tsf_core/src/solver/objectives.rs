//! Standing-dependent objective functions.
//!
//! Objectives are minimization targets: conceded goals weigh 1.0 and
//! scored goals earn a negative weight that grows with the period, so
//! later periods reward chasing more.

use crate::sim::period::TeamMetrics;
use crate::solver::equilibrium::{Objective, Objectives};
use serde::{Deserialize, Serialize};

/// A team's standing entering a period, from its concession count
/// relative to both rivals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Standing {
    Leading,
    Trailing,
    /// Level with one rival, separated from the other.
    DrawOne,
    /// Level with both rivals.
    DrawAll,
}

impl Standing {
    /// Weight on expected scored goals for the given period (1-based).
    pub fn scored_weight(self, period: u32) -> f64 {
        let progression = f64::from(period.saturating_sub(1));
        match self {
            Standing::Leading => 0.05 + 0.05 * progression,
            Standing::Trailing => 0.4 + 0.2 * progression,
            Standing::DrawOne => 0.3 + 0.1 * progression,
            Standing::DrawAll => 0.45 + 0.1 * progression,
        }
    }
}

/// Build one objective per team from the teams' standings.
pub fn standing_objectives(period: u32, standings: [Standing; 3]) -> Objectives {
    standings.map(|standing| {
        let weight = standing.scored_weight(period);
        Box::new(move |metrics: &TeamMetrics| {
            metrics.expected_conceded - weight * metrics.expected_scored
        }) as Objective
    })
}
