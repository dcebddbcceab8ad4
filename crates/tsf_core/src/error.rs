use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Payoff table has no entry for profile {0}")]
    MissingProfile(String),

    #[error("Response map has no entry for {0}")]
    MissingResponse(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
