//! Grammar checks, each producing a `Validation` so all failures are kept.

use crate::builder::StateMachine;
use crate::core::{ChoiceBranch, ChoiceState, ErrorHandling, ErrorName, MachineState, State};
use crate::validation::violations::ValidationError;
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of a single check.
pub type CheckResult = Validation<(), NonEmptyVec<ValidationError>>;

fn pass() -> CheckResult {
    Validation::success(())
}

fn violation(error: ValidationError) -> CheckResult {
    Validation::fail(error)
}

/// Every structural check for a machine and, recursively, its branches.
pub(crate) fn structural(machine: &StateMachine) -> Vec<CheckResult> {
    let mut checks: Vec<CheckResult> = machine
        .construction_errors()
        .iter()
        .cloned()
        .map(|error| violation(error.into()))
        .collect();

    for state in machine.iter() {
        if state.name().is_empty() {
            checks.push(violation(ValidationError::EmptyStateName));
        }
        match state {
            MachineState::Task(task) => {
                checks.extend(error_handling(task.name(), task.error_handling()));
            }
            MachineState::Choice(choice) => checks.extend(choice_rules(choice)),
            MachineState::Parallel(parallel) => {
                checks.extend(error_handling(parallel.name(), parallel.error_handling()));
                if parallel.branches().is_empty() {
                    checks.push(violation(ValidationError::EmptyParallel {
                        state: parallel.name().to_string(),
                    }));
                }
                checks.extend(branch_scope(machine, parallel.name(), parallel.branches()));
                for (index, branch) in parallel.branches().iter().enumerate() {
                    checks.extend(
                        structural(branch)
                            .into_iter()
                            .map(|check| wrap_branch(check, parallel.name(), index)),
                    );
                }
            }
            _ => checks.push(pass()),
        }
    }

    checks
}

fn wrap_branch(check: CheckResult, parallel: &str, index: usize) -> CheckResult {
    match check {
        Validation::Success(()) => pass(),
        Validation::Failure(errors) => Validation::all_vec(
            errors
                .iter()
                .cloned()
                .map(|error| {
                    violation(ValidationError::InBranch {
                        parallel: parallel.to_string(),
                        index,
                        error: Box::new(error),
                    })
                })
                .collect(),
        )
        .map(|_| ()),
    }
}

/// `States.ALL` must be alone in its entry and in the last entry, for both
/// retriers and catchers. Every entry must name at least one error.
fn error_handling(state: &str, handling: &ErrorHandling) -> Vec<CheckResult> {
    let retriers: Vec<&[ErrorName]> = handling.retriers().iter().map(|r| r.errors()).collect();
    let catchers: Vec<&[ErrorName]> = handling.catchers().iter().map(|c| c.errors()).collect();

    let mut checks = wildcard_rules(state, "Retry", &retriers);
    checks.extend(wildcard_rules(state, "Catch", &catchers));
    checks.extend(retry_intervals(state, handling));
    checks
}

/// `IntervalSeconds` is an integer, so sub-second parts cannot be written.
fn retry_intervals(state: &str, handling: &ErrorHandling) -> Vec<CheckResult> {
    handling
        .retriers()
        .iter()
        .enumerate()
        .filter_map(|(index, retry)| retry.interval().map(|interval| (index, interval)))
        .map(|(index, interval)| {
            if interval.subsec_nanos() == 0 {
                pass()
            } else {
                violation(ValidationError::IntervalNotWholeSeconds {
                    state: state.to_string(),
                    index,
                    interval,
                })
            }
        })
        .collect()
}

fn wildcard_rules(state: &str, policy: &'static str, entries: &[&[ErrorName]]) -> Vec<CheckResult> {
    let last = entries.len().saturating_sub(1);
    let mut checks = Vec::new();

    for (index, errors) in entries.iter().enumerate() {
        if errors.is_empty() {
            checks.push(violation(ValidationError::EmptyErrorEquals {
                state: state.to_string(),
                policy,
                index,
            }));
            continue;
        }
        if !errors.iter().any(ErrorName::is_wildcard) {
            checks.push(pass());
            continue;
        }
        if errors.len() > 1 {
            checks.push(violation(ValidationError::WildcardNotAlone {
                state: state.to_string(),
                policy,
                index,
            }));
        }
        if index != last {
            checks.push(violation(ValidationError::WildcardNotLast {
                state: state.to_string(),
                policy,
                index,
            }));
        }
    }

    checks
}

fn choice_rules(choice: &ChoiceState) -> Vec<CheckResult> {
    if choice.choices().is_empty() {
        return vec![violation(ValidationError::EmptyChoices {
            state: choice.name().to_string(),
        })];
    }

    choice
        .choices()
        .iter()
        .enumerate()
        .map(|(index, branch)| match branch {
            ChoiceBranch::And { comparisons, .. } | ChoiceBranch::Or { comparisons, .. }
                if comparisons.is_empty() =>
            {
                violation(ValidationError::EmptyCombinator {
                    state: choice.name().to_string(),
                    operator: branch.operator().unwrap_or("And"),
                    index,
                })
            }
            _ => pass(),
        })
        .collect()
}

/// Names declared anywhere inside a machine, nested branches included.
fn all_names(machine: &StateMachine, names: &mut HashSet<String>) {
    for state in machine.iter() {
        names.insert(state.name().to_string());
        if let MachineState::Parallel(parallel) = state {
            for branch in parallel.branches() {
                all_names(branch, names);
            }
        }
    }
}

/// A branch's states are visible only inside that branch: no name may be
/// shared with the enclosing machine or with a sibling branch.
fn branch_scope(outer: &StateMachine, parallel: &str, branches: &[StateMachine]) -> Vec<CheckResult> {
    let mut owner: HashMap<String, usize> = HashMap::new();
    let mut checks = Vec::new();

    for (index, branch) in branches.iter().enumerate() {
        let mut names = HashSet::new();
        all_names(branch, &mut names);

        let mut sorted: Vec<String> = names.into_iter().collect();
        sorted.sort();
        for name in sorted {
            let shared_with_sibling = owner.get(&name).is_some_and(|&first| first != index);
            if outer.state(&name).is_some() || shared_with_sibling {
                checks.push(violation(ValidationError::BranchScopeViolation {
                    name: name.clone(),
                    parallel: parallel.to_string(),
                }));
            }
            owner.entry(name).or_insert(index);
        }
    }

    checks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateMachineBuilder;
    use crate::core::{
        ParallelState, PassState, SucceedState, TaskCatch, TaskResource, TaskRetry, TaskState,
        TransitionState,
    };
    use std::time::Duration;

    fn failures(checks: Vec<CheckResult>) -> Vec<ValidationError> {
        match Validation::all_vec(checks) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    fn task_machine(task: TaskState) -> StateMachine {
        StateMachineBuilder::new("M")
            .start_at(task)
            .states([SucceedState::new("A"), SucceedState::new("B")])
            .build()
            .unwrap()
    }

    #[test]
    fn wildcard_last_and_alone_passes() {
        let machine = task_machine(
            TaskState::new("T", TaskResource::function("Fn"))
                .with_catcher(TaskCatch::new("A", [ErrorName::Timeout]))
                .with_catcher(TaskCatch::new("B", [ErrorName::All])),
        );

        assert!(failures(structural(&machine)).is_empty());
    }

    #[test]
    fn wildcard_before_last_catcher_fails() {
        let machine = task_machine(
            TaskState::new("T", TaskResource::function("Fn"))
                .with_catcher(TaskCatch::new("A", [ErrorName::All]))
                .with_catcher(TaskCatch::new("B", [ErrorName::Timeout])),
        );

        assert_eq!(
            failures(structural(&machine)),
            vec![ValidationError::WildcardNotLast {
                state: "T".to_string(),
                policy: "Catch",
                index: 0,
            }]
        );
    }

    #[test]
    fn wildcard_sharing_an_entry_fails() {
        let machine = task_machine(
            TaskState::new("T", TaskResource::function("Fn"))
                .with_retrier(TaskRetry::new().with_errors([ErrorName::All, ErrorName::Timeout])),
        );

        assert_eq!(
            failures(structural(&machine)),
            vec![ValidationError::WildcardNotAlone {
                state: "T".to_string(),
                policy: "Retry",
                index: 0,
            }]
        );
    }

    #[test]
    fn fractional_retry_intervals_fail() {
        let machine = task_machine(
            TaskState::new("T", TaskResource::function("Fn"))
                .with_retrier(
                    TaskRetry::new()
                        .with_errors([ErrorName::Timeout])
                        .with_interval(Duration::from_millis(500)),
                )
                .with_retrier(
                    TaskRetry::new()
                        .with_errors([ErrorName::TaskFailed])
                        .with_interval(Duration::from_millis(1900)),
                )
                .with_retrier(
                    TaskRetry::new()
                        .with_errors([ErrorName::All])
                        .with_interval(Duration::from_secs(3)),
                ),
        );

        assert_eq!(
            failures(structural(&machine)),
            vec![
                ValidationError::IntervalNotWholeSeconds {
                    state: "T".to_string(),
                    index: 0,
                    interval: Duration::from_millis(500),
                },
                ValidationError::IntervalNotWholeSeconds {
                    state: "T".to_string(),
                    index: 1,
                    interval: Duration::from_millis(1900),
                },
            ]
        );
    }

    #[test]
    fn empty_error_equals_fails() {
        let machine = task_machine(
            TaskState::new("T", TaskResource::function("Fn"))
                .with_catcher(TaskCatch::new("A", Vec::new())),
        );

        assert!(matches!(
            failures(structural(&machine)).as_slice(),
            [ValidationError::EmptyErrorEquals { policy: "Catch", .. }]
        ));
    }

    #[test]
    fn empty_choice_and_combinator_fail() {
        let empty = ChoiceState::new("Empty", Vec::new());
        let hollow = ChoiceState::new("Hollow", [ChoiceBranch::or(Vec::new(), "Hollow")]);

        assert_eq!(
            failures(choice_rules(&empty)),
            vec![ValidationError::EmptyChoices {
                state: "Empty".to_string()
            }]
        );
        assert_eq!(
            failures(choice_rules(&hollow)),
            vec![ValidationError::EmptyCombinator {
                state: "Hollow".to_string(),
                operator: "Or",
                index: 0,
            }]
        );
    }

    #[test]
    fn branch_names_must_not_leak_outside() {
        let branch = StateMachineBuilder::new("Inner")
            .start_at(SucceedState::new("Shared"))
            .build()
            .unwrap();
        let machine = StateMachineBuilder::new("Outer")
            .start_at(ParallelState::new("Fan", [branch]).next("Shared"))
            .state(SucceedState::new("Shared"))
            .build()
            .unwrap();

        assert_eq!(
            failures(structural(&machine)),
            vec![ValidationError::BranchScopeViolation {
                name: "Shared".to_string(),
                parallel: "Fan".to_string(),
            }]
        );
    }

    #[test]
    fn branch_errors_are_wrapped_with_their_location() {
        let branch = StateMachineBuilder::new("Inner")
            .start_at(PassState::new("Step").next("Outside"))
            .build()
            .unwrap();
        let machine = StateMachineBuilder::new("Outer")
            .start_at(ParallelState::new("Fan", [branch]).next("Outside"))
            .state(SucceedState::new("Outside"))
            .build()
            .unwrap();

        let errors = failures(structural(&machine));
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ValidationError::InBranch { parallel, index: 0, .. } if parallel == "Fan"
        ));
    }
}
