//! Boundary error types.

use crate::serialize::MarshalError;
use crate::validation::ValidationError;
use thiserror::Error;

/// Errors returned when producing a deployable definition
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The machine failed validation; serialization was not attempted
    #[error("State machine failed validation with {} error(s)", .0.len())]
    Invalid(Vec<ValidationError>),

    /// Serialization of a valid machine failed
    #[error(transparent)]
    Marshal(#[from] MarshalError),
}
