//! Error types for the solver library

use thiserror::Error;

/// Input could not be turned into a solver's shared data
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("invalid input: {0}")]
    InvalidFormat(String),
    #[error("incomplete input: {0}")]
    MissingData(String),
    /// A solver option was present but unusable
    #[error("invalid option {key}={value}: {reason}")]
    InvalidOption {
        key: String,
        value: String,
        reason: String,
    },
    #[error("{0}")]
    Other(String),
}

/// A part could not produce an answer
#[derive(Debug, Error)]
pub enum SolveError {
    /// Inside `1..=PARTS` but the solver has no code for it
    #[error("part {0} is not implemented")]
    PartNotImplemented(u8),
    /// Outside `1..=PARTS`
    #[error("part {0} is out of range")]
    PartOutOfRange(u8),
    #[error("solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    /// Wrap any error (or message) as a solve failure
    pub fn failed<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        SolveError::SolveFailed(err.into())
    }
}

/// Failure anywhere between looking up a solver and getting an answer
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("no solver registered for {0}/{1:02}")]
    NotFound(u16, u8),
    #[error("{0}/{1:02} is outside the supported years and days")]
    InvalidYearDay(u16, u8),
    #[error(transparent)]
    ParseError(#[from] ParseError),
    #[error(transparent)]
    SolveError(#[from] SolveError),
}

/// The registry builder refused a solver
#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    #[error("a solver for {0}/{1:02} is already registered")]
    DuplicateSolver(u16, u8),
    #[error("cannot register {0}/{1:02}: outside the supported years and days")]
    InvalidYearDay(u16, u8),
}
