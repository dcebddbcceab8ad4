//! Best responses and pure-strategy Nash extraction.
//!
//! Complexity is combinatorial in the stance count; acceptable only
//! because the stance set is small and fixed.

use crate::error::{Result, SimError};
use crate::sim::period::{PeriodSummary, TeamMetrics};
use crate::sim::strategy::{opponents_of, profile_with, Strategy, StrategyProfile, TeamId};
use crate::solver::payoff::PayoffTable;
use std::collections::HashMap;

/// Per-team scoring function over period metrics; lower is better.
pub type Objective = Box<dyn Fn(&TeamMetrics) -> f64 + Send + Sync>;

/// One objective per team, ordered by [`TeamId::ALL`].
pub type Objectives = [Objective; 3];

/// Each team's minimizing stance against every ordered opponent pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseMap {
    by_team: [HashMap<(Strategy, Strategy), Strategy>; 3],
}

impl ResponseMap {
    pub fn response(&self, team: TeamId, opponents: (Strategy, Strategy)) -> Option<Strategy> {
        self.by_team[team.index()].get(&opponents).copied()
    }

    pub fn insert(&mut self, team: TeamId, opponents: (Strategy, Strategy), stance: Strategy) {
        self.by_team[team.index()].insert(opponents, stance);
    }

    pub fn responses_for(&self, team: TeamId) -> &HashMap<(Strategy, Strategy), Strategy> {
        &self.by_team[team.index()]
    }
}

/// Compute each team's best response to every opponent-stance pair.
///
/// Own stances are scanned in enumeration order and ties break to the
/// first minimum. A profile missing from the table is fatal.
pub fn best_responses(table: &PayoffTable, objectives: &Objectives) -> Result<ResponseMap> {
    let mut responses = ResponseMap::default();
    for team in TeamId::ALL {
        let objective = &objectives[team.index()];
        for &first in &Strategy::ALL {
            for &second in &Strategy::ALL {
                let opponents = (first, second);
                let mut best: Option<(Strategy, f64)> = None;
                for &own in &Strategy::ALL {
                    let profile = profile_with(team, own, opponents);
                    let summary = table.get(&profile).ok_or_else(|| {
                        SimError::MissingProfile(format!("{:?}", profile))
                    })?;
                    let value = objective(summary.team(team));
                    let improved = match best {
                        Some((_, incumbent)) => value < incumbent,
                        None => true,
                    };
                    if improved {
                        best = Some((own, value));
                    }
                }
                if let Some((stance, _)) = best {
                    responses.insert(team, opponents, stance);
                }
            }
        }
    }
    Ok(responses)
}

/// Extract every pure-strategy Nash equilibrium.
///
/// A profile qualifies iff each team's stance in it equals that team's
/// recorded best response to the other two stances in the same profile.
/// Profiles are scanned in enumeration order; the list is empty when no
/// mutually consistent profile exists.
pub fn find_pure_nash(
    table: &PayoffTable,
    responses: &ResponseMap,
) -> Result<Vec<(StrategyProfile, PeriodSummary)>> {
    let mut equilibria = Vec::new();
    for (profile, summary) in table.iter() {
        let mut is_equilibrium = true;
        for team in TeamId::ALL {
            let opponents = opponents_of(&profile, team);
            let best = responses.response(team, opponents).ok_or_else(|| {
                SimError::MissingResponse(format!("team {} against {:?}", team, opponents))
            })?;
            if best != profile[team.index()] {
                is_equilibrium = false;
                break;
            }
        }
        if is_equilibrium {
            equilibria.push((profile, summary.clone()));
        }
    }
    Ok(equilibria)
}
