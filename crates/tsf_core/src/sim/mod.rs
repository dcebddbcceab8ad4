//! Period-level Monte Carlo simulation.
//!
//! - `strategy` / `state` / `config`: stance, team, and tuning types
//! - `collaboration`: alliance detection from a stance assignment
//! - `rates`: pure strength and scoring-rate math
//! - `period`: fixed-strategy Poisson period simulator
//! - `adaptive`: minute-resolution simulator with policies and fatigue

pub mod adaptive;
pub mod collaboration;
pub mod config;
pub mod period;
pub mod rates;
pub mod state;
pub mod strategy;

pub use adaptive::{
    AdaptiveMetadata, AdaptivePolicy, AdaptiveReport, AdaptiveTeamMetrics, PolicyContext,
};
pub use collaboration::{identify_collaborations, Collaboration};
pub use config::SimConfig;
pub use period::{PeriodSummary, TeamMetrics, ThreeSidedGame};
pub use state::TeamState;
pub use strategy::{
    opponents_of, profile_with, StanceAssignment, Strategy, StrategyProfile, TeamId,
};
