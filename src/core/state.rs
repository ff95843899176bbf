//! Shared state capabilities and the `MachineState` tagged union.
//!
//! Every ASL state kind is a plain value type. Transitions reference their
//! targets by name only, so cycles and converging paths need no shared
//! ownership; names are resolved against the machine's table when the
//! graph is built.

use super::choice::ChoiceState;
use super::parallel::ParallelState;
use super::pass::PassState;
use super::task::TaskState;
use super::terminal::{FailState, SucceedState};
use super::wait::WaitState;

/// Capability shared by every state kind.
///
/// # Example
///
/// ```rust
/// use stepgraph::core::{State, SucceedState};
///
/// let done = SucceedState::new("Done");
/// assert_eq!(done.name(), "Done");
/// assert!(!done.permits_end());
/// ```
pub trait State {
    /// The state's unique name within one flattened machine.
    fn name(&self) -> &str;

    /// Whether this kind serializes `End: true` when it has no successor.
    ///
    /// Default implementation returns `true`.
    fn permits_end(&self) -> bool {
        true
    }
}

/// Fields common to the states that carry `Comment`, `InputPath` and
/// `OutputPath`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateBase {
    pub(crate) name: String,
    pub(crate) comment: Option<String>,
    pub(crate) input_path: Option<String>,
    pub(crate) output_path: Option<String>,
}

impl StateBase {
    pub(crate) fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn input_path(&self) -> Option<&str> {
        self.input_path.as_deref()
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }
}

/// Fluent setters for the comment and data selector fields.
pub trait Annotated: State + Sized {
    #[doc(hidden)]
    fn base(&self) -> &StateBase;

    #[doc(hidden)]
    fn base_mut(&mut self) -> &mut StateBase;

    fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.base_mut().comment = Some(comment.into());
        self
    }

    fn with_input_path(mut self, path: impl Into<String>) -> Self {
        self.base_mut().input_path = Some(path.into());
        self
    }

    fn with_output_path(mut self, path: impl Into<String>) -> Self {
        self.base_mut().output_path = Some(path.into());
        self
    }
}

/// States that may name an explicit successor with `Next`.
///
/// # Example
///
/// ```rust
/// use stepgraph::core::{Annotated, PassState, TransitionState};
///
/// let start = PassState::new("Start")
///     .with_comment("entry point")
///     .next("Work");
///
/// assert_eq!(start.next_state(), Some("Work"));
/// assert_eq!(start.adjacent_states(), vec!["Work"]);
/// ```
pub trait TransitionState: Annotated {
    /// Set the successor by name.
    fn next(self, target: impl Into<String>) -> Self;

    /// The explicit successor, if any.
    fn next_state(&self) -> Option<&str>;

    /// Every state reachable in one step: `Next` plus any catcher targets.
    fn adjacent_states(&self) -> Vec<&str> {
        self.next_state().into_iter().collect()
    }
}

/// One node of a state machine graph.
#[derive(Clone, Debug, PartialEq)]
pub enum MachineState {
    Pass(PassState),
    Task(TaskState),
    Wait(WaitState),
    Succeed(SucceedState),
    Fail(FailState),
    Choice(ChoiceState),
    Parallel(ParallelState),
}

impl MachineState {
    /// The ASL `Type` field for this state.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Pass(_) => "Pass",
            Self::Task(_) => "Task",
            Self::Wait(_) => "Wait",
            Self::Succeed(_) => "Succeed",
            Self::Fail(_) => "Fail",
            Self::Choice(_) => "Choice",
            Self::Parallel(_) => "Parallel",
        }
    }

    /// Names of the states this state can transition to, in declaration
    /// order. Parallel branches are opaque and never contribute.
    pub fn successors(&self) -> Vec<&str> {
        match self {
            Self::Pass(state) => state.adjacent_states(),
            Self::Task(state) => state.adjacent_states(),
            Self::Wait(state) => state.adjacent_states(),
            Self::Parallel(state) => state.adjacent_states(),
            Self::Choice(state) => state.targets(),
            Self::Succeed(_) | Self::Fail(_) => Vec::new(),
        }
    }
}

impl State for MachineState {
    fn name(&self) -> &str {
        match self {
            Self::Pass(state) => state.name(),
            Self::Task(state) => state.name(),
            Self::Wait(state) => state.name(),
            Self::Succeed(state) => state.name(),
            Self::Fail(state) => state.name(),
            Self::Choice(state) => state.name(),
            Self::Parallel(state) => state.name(),
        }
    }

    fn permits_end(&self) -> bool {
        match self {
            Self::Pass(state) => state.permits_end(),
            Self::Task(state) => state.permits_end(),
            Self::Wait(state) => state.permits_end(),
            Self::Succeed(state) => state.permits_end(),
            Self::Fail(state) => state.permits_end(),
            Self::Choice(state) => state.permits_end(),
            Self::Parallel(state) => state.permits_end(),
        }
    }
}

macro_rules! impl_from_state {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for MachineState {
                fn from(state: $ty) -> Self {
                    Self::$variant(state)
                }
            }
        )*
    };
}

impl_from_state! {
    Pass => PassState,
    Task => TaskState,
    Wait => WaitState,
    Succeed => SucceedState,
    Fail => FailState,
    Choice => ChoiceState,
    Parallel => ParallelState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChoiceBranch, Comparison, TaskCatch, TaskResource};
    use crate::core::ErrorName;

    #[test]
    fn kind_matches_asl_type_names() {
        assert_eq!(MachineState::from(PassState::new("p")).kind(), "Pass");
        assert_eq!(MachineState::from(SucceedState::new("s")).kind(), "Succeed");
        assert_eq!(
            MachineState::from(FailState::new("f", "Boom")).kind(),
            "Fail"
        );
    }

    #[test]
    fn terminal_kinds_have_no_successors() {
        let succeed = MachineState::from(SucceedState::new("Done"));
        let fail = MachineState::from(FailState::new("Bad", "Oops"));

        assert!(succeed.successors().is_empty());
        assert!(fail.successors().is_empty());
        assert!(!succeed.permits_end());
        assert!(!fail.permits_end());
    }

    #[test]
    fn task_successors_include_catchers_after_next() {
        let task = TaskState::new("Work", TaskResource::function("WorkFn"))
            .next("Done")
            .with_catcher(TaskCatch::new("Recover", [ErrorName::All]));

        let state = MachineState::from(task);
        assert_eq!(state.successors(), vec!["Done", "Recover"]);
    }

    #[test]
    fn choice_successors_include_default_last() {
        let choice = ChoiceState::new(
            "Router",
            [ChoiceBranch::matching(
                Comparison::string_equals("$.x", "go"),
                "Go",
            )],
        )
        .with_default("Bad");

        let state = MachineState::from(choice);
        assert_eq!(state.successors(), vec!["Go", "Bad"]);
        assert!(!state.permits_end());
    }

    #[test]
    fn annotated_setters_populate_base() {
        let pass = PassState::new("p")
            .with_comment("note")
            .with_input_path("$.in")
            .with_output_path("$.out");

        assert_eq!(pass.base().comment(), Some("note"));
        assert_eq!(pass.base().input_path(), Some("$.in"));
        assert_eq!(pass.base().output_path(), Some("$.out"));
    }
}
