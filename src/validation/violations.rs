//! Structural violations reported by the validator.

use crate::builder::ConstructionError;
use thiserror::Error;

/// One grammar or structure problem in a state machine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error("State names must not be empty")]
    EmptyStateName,

    #[error("State '{state}': States.ALL must appear alone in {policy} entry {index}")]
    WildcardNotAlone {
        state: String,
        policy: &'static str,
        index: usize,
    },

    #[error("State '{state}': States.ALL in {policy} entry {index} must be in the last entry")]
    WildcardNotLast {
        state: String,
        policy: &'static str,
        index: usize,
    },

    #[error("State '{state}': {policy} entry {index} has an empty ErrorEquals")]
    EmptyErrorEquals {
        state: String,
        policy: &'static str,
        index: usize,
    },

    #[error("State '{state}': Retry entry {index} interval must be a whole number of seconds, got {interval:?}")]
    IntervalNotWholeSeconds {
        state: String,
        index: usize,
        interval: std::time::Duration,
    },

    #[error("Choice state '{state}' has no choices")]
    EmptyChoices { state: String },

    #[error("Choice state '{state}': {operator} rule {index} wraps no comparisons")]
    EmptyCombinator {
        state: String,
        operator: &'static str,
        index: usize,
    },

    #[error("Parallel state '{state}' has no branches")]
    EmptyParallel { state: String },

    #[error("State name '{name}' is used both outside and inside Parallel state '{parallel}'")]
    BranchScopeViolation { name: String, parallel: String },

    #[error("In branch {index} of Parallel state '{parallel}': {error}")]
    InBranch {
        parallel: String,
        index: usize,
        error: Box<ValidationError>,
    },

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}
