//! Builder API for assembling a validator with custom checks.

use crate::builder::StateMachine;
use crate::validation::rules::CheckResult;
use crate::validation::violations::ValidationError;
use crate::validation::{MachineCheck, Validator};
use stillwater::validation::Validation;

/// Builder for a `Validator`.
///
/// The grammar checks always run. Checks added here run after them against
/// the root machine, and their failures are accumulated with the rest.
pub struct ValidatorBuilder {
    required_checks: Vec<MachineCheck>,
}

impl ValidatorBuilder {
    pub fn new() -> Self {
        Self {
            required_checks: Vec::new(),
        }
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&StateMachine) -> CheckResult + Send + Sync + 'static,
    {
        self.required_checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, error_msg: impl Into<String>) -> Self
    where
        F: Fn(&StateMachine) -> bool + Send + Sync + 'static,
    {
        let message = error_msg.into();
        let check = move |machine: &StateMachine| {
            if predicate(machine) {
                Validation::success(())
            } else {
                Validation::fail(ValidationError::CustomCheckFailed {
                    message: message.clone(),
                })
            }
        };
        self.required_checks.push(Box::new(check));
        self
    }

    pub fn build(self) -> Validator {
        Validator {
            required_checks: self.required_checks,
        }
    }
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
