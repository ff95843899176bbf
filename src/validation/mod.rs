//! Structural validation of built state machines.
//!
//! Building never fails on a bad graph. Unknown targets and name collisions
//! are recorded on the machine and surface here, next to the grammar rules
//! the engine enforces on upload: `States.ALL` placement in Retry and Catch,
//! non-empty Choice rules, and Parallel branch scoping. Every check runs and
//! every failure is reported, using stillwater's `Validation`.
//!
//! # Example
//!
//! ```rust
//! use stepgraph::builder::StateMachineBuilder;
//! use stepgraph::core::{PassState, TransitionState};
//! use stepgraph::validation::{ValidationError, ValidatorBuilder};
//!
//! let machine = StateMachineBuilder::new("Flow")
//!     .start_at(PassState::new("A").next("Missing"))
//!     .build()
//!     .unwrap();
//!
//! let validator = ValidatorBuilder::new()
//!     .require_pred(|m| m.role_arn().is_some(), "a role is required")
//!     .build();
//!
//! let errors = validator.validate(&machine);
//! assert_eq!(errors.len(), 2);
//! assert!(matches!(errors[1], ValidationError::CustomCheckFailed { .. }));
//! ```

pub mod builder;
pub mod rules;
pub mod violations;

pub use builder::ValidatorBuilder;
pub use rules::CheckResult;
pub use violations::ValidationError;

use crate::builder::StateMachine;
use stillwater::validation::Validation;

/// Custom check run against the root machine.
pub type MachineCheck = Box<dyn Fn(&StateMachine) -> CheckResult + Send + Sync>;

/// Runs the grammar checks plus any custom checks, accumulating every
/// violation.
#[derive(Default)]
pub struct Validator {
    pub(crate) required_checks: Vec<MachineCheck>,
}

impl Validator {
    /// Validator with only the built-in grammar checks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run all checks. `Validation::Failure` carries every violation.
    pub fn check(&self, machine: &StateMachine) -> CheckResult {
        let mut checks = rules::structural(machine);
        for check_fn in &self.required_checks {
            checks.push(check_fn(machine));
        }
        Validation::all_vec(checks).map(|_| ())
    }

    /// Every violation, in check order. Empty means the machine is valid.
    pub fn validate(&self, machine: &StateMachine) -> Vec<ValidationError> {
        match self.check(machine) {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(errors) => {
                tracing::debug!(
                    machine = machine.name(),
                    violations = errors.len(),
                    "state machine failed validation"
                );
                errors.iter().cloned().collect()
            }
        }
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("required_checks", &self.required_checks.len())
            .finish()
    }
}

impl StateMachine {
    /// Validate with the built-in grammar checks only.
    pub fn validate(&self) -> Vec<ValidationError> {
        Validator::new().validate(self)
    }
}
