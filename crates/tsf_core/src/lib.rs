//! # tsf_core - Three-Sided Football Strategy Engine
//!
//! Monte Carlo simulation and game-theory analysis for three-sided
//! football: three teams on a ring choose tactical stances each period,
//! goals arrive as Poisson processes parameterized by all three choices at
//! once, and the team that concedes least wins.
//!
//! ## Features
//! - Poisson goal model over an asymmetric 3x3 scoring-rate matrix with
//!   pairwise collaboration effects
//! - Minute-resolution adaptive simulator with per-team policy rules and
//!   fatigue accrual
//! - Exhaustive strategy-profile enumeration, best-response computation,
//!   and pure-Nash equilibrium extraction
//! - Independent corner, free-kick, and kickoff micro-simulators
//! - Deterministic runs under an explicit seed (same seed = same result)
//!
//! Presentation concerns (CLI flags, report rendering, persistence) are
//! the consumer's job; this crate only returns structured values.

pub mod error;
pub mod set_piece;
pub mod sim;
pub mod solver;

pub use error::{Result, SimError};

// Re-export the simulation surface
pub use sim::{
    identify_collaborations, AdaptiveMetadata, AdaptivePolicy, AdaptiveReport,
    AdaptiveTeamMetrics, Collaboration, PeriodSummary, PolicyContext, SimConfig,
    StanceAssignment, Strategy, StrategyProfile, TeamId, TeamMetrics, TeamState,
    ThreeSidedGame,
};

// Re-export the solver surface
pub use solver::{
    best_responses, enumerate_profiles, estimate_payoffs, estimate_payoffs_par, find_pure_nash,
    marginal_strategy_stats, standing_objectives, Objective, Objectives, PayoffTable,
    ResponseMap, Standing,
};

// Re-export the set-piece simulators
pub use set_piece::{CornerSimulator, FreeKickSimulator, KickoffSimulator};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
