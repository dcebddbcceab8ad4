//! Per-team scoreline state.

use serde::{Deserialize, Serialize};

/// Cumulative scoreline of a team entering a period.
///
/// States are immutable; advancing a team produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamState {
    pub name: String,
    pub score: u32,
    pub conceded: u32,
}

impl TeamState {
    pub fn new(name: impl Into<String>, score: u32, conceded: u32) -> Self {
        Self { name: name.into(), score, conceded }
    }

    /// Goal differential; negative implies trailing.
    pub fn net(&self) -> i64 {
        i64::from(self.score) - i64::from(self.conceded)
    }

    /// A copy of this state with a period's goals applied.
    pub fn advanced(&self, scored: u32, conceded: u32) -> Self {
        Self {
            name: self.name.clone(),
            score: self.score + scored,
            conceded: self.conceded + conceded,
        }
    }
}
