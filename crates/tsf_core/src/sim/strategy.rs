//! Team identity and tactical stance types.
//!
//! The three teams sit on a ring in a fixed clockwise order. "Next" and
//! "prev" are defined modulo that order (cyclic distances 2 and 1), so
//! collaboration targets are rotation-relative rather than positional.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three teams, in fixed clockwise rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TeamId {
    A,
    B,
    C,
}

impl TeamId {
    /// All teams in rotation order. This order defines profile indexing
    /// and the opponent ordering used by the solver.
    pub const ALL: [TeamId; 3] = [TeamId::A, TeamId::B, TeamId::C];

    pub fn index(self) -> usize {
        match self {
            TeamId::A => 0,
            TeamId::B => 1,
            TeamId::C => 2,
        }
    }

    pub fn from_index(index: usize) -> TeamId {
        Self::ALL[index % 3]
    }

    /// Team `steps` positions clockwise around the ring.
    pub fn clockwise(self, steps: usize) -> TeamId {
        TeamId::from_index(self.index() + steps)
    }

    /// The two other teams, in rotation order.
    pub fn opponents(self) -> [TeamId; 2] {
        match self {
            TeamId::A => [TeamId::B, TeamId::C],
            TeamId::B => [TeamId::A, TeamId::C],
            TeamId::C => [TeamId::A, TeamId::B],
        }
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TeamId::A => "A",
            TeamId::B => "B",
            TeamId::C => "C",
        };
        write!(f, "{}", name)
    }
}

/// A team's tactical stance for a period or a single minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Strategy {
    Defensive,
    Balanced,
    Aggressive,
    CollaborateWithNext,
    CollaborateWithPrev,
}

impl Strategy {
    /// All stances in enumeration order. The solver breaks ties by this
    /// order (first minimum wins), so it is part of the contract.
    pub const ALL: [Strategy; 5] = [
        Strategy::Defensive,
        Strategy::Balanced,
        Strategy::Aggressive,
        Strategy::CollaborateWithNext,
        Strategy::CollaborateWithPrev,
    ];

    pub fn index(self) -> usize {
        match self {
            Strategy::Defensive => 0,
            Strategy::Balanced => 1,
            Strategy::Aggressive => 2,
            Strategy::CollaborateWithNext => 3,
            Strategy::CollaborateWithPrev => 4,
        }
    }

    /// Offensive workload multiplier, used only for fatigue accrual.
    pub fn attack_load(self) -> f64 {
        match self {
            Strategy::Defensive => 0.7,
            Strategy::Balanced => 1.0,
            Strategy::Aggressive => 1.35,
            Strategy::CollaborateWithNext => 1.2,
            Strategy::CollaborateWithPrev => 1.2,
        }
    }

    /// Defensive workload multiplier, used only for fatigue accrual.
    pub fn defense_load(self) -> f64 {
        match self {
            Strategy::Defensive => 1.3,
            Strategy::Balanced => 1.0,
            Strategy::Aggressive => 0.85,
            Strategy::CollaborateWithNext => 1.1,
            Strategy::CollaborateWithPrev => 1.1,
        }
    }

    /// The team this stance nominates as a shared collaboration target,
    /// relative to the nominating team's position on the ring.
    pub fn collaboration_target(self, team: TeamId) -> Option<TeamId> {
        match self {
            Strategy::CollaborateWithNext => Some(team.clockwise(2)),
            Strategy::CollaborateWithPrev => Some(team.clockwise(1)),
            _ => None,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Defensive => "Defensive",
            Strategy::Balanced => "Balanced",
            Strategy::Aggressive => "Aggressive",
            Strategy::CollaborateWithNext => "CollaborateWithNext",
            Strategy::CollaborateWithPrev => "CollaborateWithPrev",
        };
        write!(f, "{}", name)
    }
}

/// An ordered stance triple, one per team in [`TeamId::ALL`] order.
/// The unit of payoff evaluation.
pub type StrategyProfile = [Strategy; 3];

/// Per-team stance selection for the fixed-strategy simulator.
///
/// Teams without an explicit stance fall back to [`Strategy::Balanced`].
/// The fallback is a deliberate permissive default, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StanceAssignment {
    stances: [Option<Strategy>; 3],
}

impl StanceAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, team: TeamId, stance: Strategy) {
        self.stances[team.index()] = Some(stance);
    }

    pub fn with(mut self, team: TeamId, stance: Strategy) -> Self {
        self.set(team, stance);
        self
    }

    pub fn get(&self, team: TeamId) -> Strategy {
        self.stances[team.index()].unwrap_or(Strategy::Balanced)
    }
}

impl From<StrategyProfile> for StanceAssignment {
    fn from(profile: StrategyProfile) -> Self {
        Self { stances: [Some(profile[0]), Some(profile[1]), Some(profile[2])] }
    }
}

/// The other two teams' stances in a full profile, in rotation order.
pub fn opponents_of(profile: &StrategyProfile, team: TeamId) -> (Strategy, Strategy) {
    let [first, second] = team.opponents();
    (profile[first.index()], profile[second.index()])
}

/// Rebuild a full profile from one team's stance and its opponents' pair.
pub fn profile_with(
    team: TeamId,
    own: Strategy,
    opponents: (Strategy, Strategy),
) -> StrategyProfile {
    let mut profile = [own; 3];
    let [first, second] = team.opponents();
    profile[first.index()] = opponents.0;
    profile[second.index()] = opponents.1;
    profile
}
