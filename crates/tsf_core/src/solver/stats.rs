//! Marginal per-stance statistics over a payoff table.

use crate::sim::period::TeamMetrics;
use crate::sim::strategy::{Strategy, TeamId};
use crate::solver::payoff::PayoffTable;
use std::collections::BTreeMap;

/// Mean metrics per (team, own stance), averaged over every profile in
/// which that team played that stance. Stances absent from the table are
/// omitted.
pub fn marginal_strategy_stats(table: &PayoffTable) -> [BTreeMap<Strategy, TeamMetrics>; 3] {
    let mut out: [BTreeMap<Strategy, TeamMetrics>; 3] = Default::default();
    for team in TeamId::ALL {
        let idx = team.index();
        for stance in Strategy::ALL {
            let mut count = 0usize;
            let mut scored = 0.0;
            let mut conceded = 0.0;
            let mut net = 0.0;
            for (profile, summary) in table.iter() {
                if profile[idx] != stance {
                    continue;
                }
                let metrics = summary.team(team);
                scored += metrics.expected_scored;
                conceded += metrics.expected_conceded;
                net += metrics.expected_net;
                count += 1;
            }
            if count == 0 {
                continue;
            }
            let n = count as f64;
            out[idx].insert(
                stance,
                TeamMetrics {
                    expected_scored: scored / n,
                    expected_conceded: conceded / n,
                    expected_net: net / n,
                },
            );
        }
    }
    out
}
