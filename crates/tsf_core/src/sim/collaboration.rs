//! Alliance detection from a stance assignment.

use crate::sim::strategy::{StanceAssignment, TeamId};
use serde::{Deserialize, Serialize};

/// A realized alliance: two teams attacking a shared target together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaboration {
    /// Collaborating teams, in rotation order.
    pub pair: (TeamId, TeamId),
    pub target: TeamId,
}

/// Identify collaborating pairs and their shared targets.
///
/// A collaboration is realized only when at least two teams independently
/// nominate the same target in the same decision instant. Unreciprocated
/// nominations have no effect. With three teams this means the two
/// non-target teams both point at the third.
pub fn identify_collaborations(stances: &StanceAssignment) -> Vec<Collaboration> {
    let mut nominations: [Vec<TeamId>; 3] = Default::default();
    for team in TeamId::ALL {
        if let Some(target) = stances.get(team).collaboration_target(team) {
            nominations[target.index()].push(team);
        }
    }

    let mut found = Vec::new();
    for target in TeamId::ALL {
        let backers = &nominations[target.index()];
        if backers.len() < 2 {
            continue;
        }
        for i in 0..backers.len() {
            for j in (i + 1)..backers.len() {
                found.push(Collaboration { pair: (backers[i], backers[j]), target });
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::strategy::Strategy;

    #[test]
    fn test_lone_nomination_has_no_effect() {
        let stances = StanceAssignment::new().with(TeamId::A, Strategy::CollaborateWithNext);
        assert!(identify_collaborations(&stances).is_empty());
    }

    #[test]
    fn test_matched_nominations_fire() {
        // A's "next" is C; B's "prev" is C. Both point at the third team.
        let stances = StanceAssignment::new()
            .with(TeamId::A, Strategy::CollaborateWithNext)
            .with(TeamId::B, Strategy::CollaborateWithPrev);
        let found = identify_collaborations(&stances);
        assert_eq!(
            found,
            vec![Collaboration { pair: (TeamId::A, TeamId::B), target: TeamId::C }]
        );
    }

    #[test]
    fn test_mismatched_targets_do_not_fire() {
        // A nominates C, B nominates A via "next" (B + 2 = A): no shared target.
        let stances = StanceAssignment::new()
            .with(TeamId::A, Strategy::CollaborateWithNext)
            .with(TeamId::B, Strategy::CollaborateWithNext);
        assert!(identify_collaborations(&stances).is_empty());
    }

    #[test]
    fn test_pair_against_a() {
        // B's "next" is A; C's "prev" is A.
        let stances = StanceAssignment::new()
            .with(TeamId::B, Strategy::CollaborateWithNext)
            .with(TeamId::C, Strategy::CollaborateWithPrev);
        let found = identify_collaborations(&stances);
        assert_eq!(
            found,
            vec![Collaboration { pair: (TeamId::B, TeamId::C), target: TeamId::A }]
        );
    }
}
