//! Parallel states.

use super::state::{Annotated, State, StateBase, TransitionState};
use super::task::{ErrorHandling, TaskCatch, TaskRetry};
use crate::builder::StateMachine;

/// Runs independently scoped branches side by side.
///
/// Each branch is a machine built on its own, with its own table; states
/// inside a branch are invisible to the enclosing machine and vice versa.
#[derive(Clone, Debug, PartialEq)]
pub struct ParallelState {
    pub(crate) base: StateBase,
    pub(crate) next: Option<String>,
    pub(crate) branches: Vec<StateMachine>,
    pub(crate) result_path: Option<String>,
    pub(crate) handling: ErrorHandling,
}

impl ParallelState {
    pub fn new(name: impl Into<String>, branches: impl IntoIterator<Item = StateMachine>) -> Self {
        Self {
            base: StateBase::named(name),
            next: None,
            branches: branches.into_iter().collect(),
            result_path: None,
            handling: ErrorHandling::default(),
        }
    }

    pub fn with_branch(mut self, branch: StateMachine) -> Self {
        self.branches.push(branch);
        self
    }

    pub fn with_result_path(mut self, path: impl Into<String>) -> Self {
        self.result_path = Some(path.into());
        self
    }

    pub fn with_retrier(mut self, retry: TaskRetry) -> Self {
        self.handling.retriers.push(retry);
        self
    }

    pub fn with_catcher(mut self, catch: TaskCatch) -> Self {
        self.handling.catchers.push(catch);
        self
    }

    pub fn branches(&self) -> &[StateMachine] {
        &self.branches
    }

    pub fn error_handling(&self) -> &ErrorHandling {
        &self.handling
    }
}

impl State for ParallelState {
    fn name(&self) -> &str {
        &self.base.name
    }
}

impl Annotated for ParallelState {
    fn base(&self) -> &StateBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut StateBase {
        &mut self.base
    }
}

impl TransitionState for ParallelState {
    fn next(mut self, target: impl Into<String>) -> Self {
        self.next = Some(target.into());
        self
    }

    fn next_state(&self) -> Option<&str> {
        self.next.as_deref()
    }

    fn adjacent_states(&self) -> Vec<&str> {
        self.next
            .as_deref()
            .into_iter()
            .chain(self.handling.catch_targets())
            .collect()
    }
}
