//! Strategy-profile enumeration, payoff estimation, and pure-Nash
//! equilibrium solving.

pub mod equilibrium;
pub mod objectives;
pub mod payoff;
pub mod stats;

pub use equilibrium::{best_responses, find_pure_nash, Objective, Objectives, ResponseMap};
pub use objectives::{standing_objectives, Standing};
pub use payoff::{enumerate_profiles, estimate_payoffs, estimate_payoffs_par, PayoffTable};
pub use stats::marginal_strategy_stats;
