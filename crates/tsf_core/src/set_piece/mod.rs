//! Set-piece micro-simulators.
//!
//! Corner, free kick, and kickoff share the same shape - fixed base rates,
//! one additive modifier per team's stance, clamp, renormalize, categorical
//! sampling - but each owns its stance enumerations and modifier tables.
//! They are deliberately not unified behind one generic type: the stance
//! vocabularies and outcome sets differ per restart.

pub mod corner;
pub mod free_kick;
pub mod kickoff;

pub use corner::{
    CornerAttack, CornerDefense, CornerOutcome, CornerProbabilities, CornerRates,
    CornerSimulator, CornerThird,
};
pub use free_kick::{
    FreeKickAttack, FreeKickDefense, FreeKickOutcome, FreeKickProbabilities, FreeKickRates,
    FreeKickSimulator, FreeKickThird,
};
pub use kickoff::{
    KickoffAttack, KickoffDefense, KickoffOutcome, KickoffProbabilities, KickoffRates,
    KickoffSimulator, KickoffThird,
};
