//! Errors raised while assembling a state machine.

use thiserror::Error;

/// Builder misuse that prevents any machine from being produced.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Start state not specified. Call .start_at(state) before .build()")]
    MissingStartState,
}

/// Structural problems found while building the state table.
///
/// These never abort the build. They are stored on the machine and
/// reported together when it is validated.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConstructionError {
    #[error("Duplicate state name '{name}': two different states share it")]
    DuplicateStateName { name: String },

    #[error("State '{from}' transitions to '{target}', which is not part of this machine")]
    UnknownState { from: String, target: String },
}
