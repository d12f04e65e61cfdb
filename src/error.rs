//! Error taxonomy shared by every component of the engine.
//!
//! The engine is a deterministic batch computation: nothing is retried.
//! Any failure aborts the current call and propagates to the caller.

use thiserror::Error;

/// Errors raised by operators, ranking and the algorithm state machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvoError {
    /// A parameter is out of range (probability or fraction outside `[0, 1]`,
    /// empty population size, zero generation budget, ...).
    ///
    /// Detected eagerly when a configuration or operator is validated.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// An operation that needs at least one solution received none.
    ///
    /// The payload names the operation that failed.
    #[error("{0}: population is empty")]
    EmptyPopulation(&'static str),

    /// A state machine method was called out of order.
    #[error("algorithm is {actual}, expected {expected}")]
    InvalidState {
        /// State the call requires.
        expected: &'static str,
        /// State the algorithm was in.
        actual: &'static str,
    },
}

/// Convenience alias used throughout the crate.
pub type EvoResult<T> = Result<T, EvoError>;

/// Checks that `value` lies in `[0, 1]`.
pub(crate) fn check_probability(name: &str, value: f64) -> EvoResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EvoError::Configuration(format!(
            "{name} must be in [0, 1], got {value}"
        )))
    }
}
