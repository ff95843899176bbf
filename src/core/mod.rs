//! State type hierarchy.
//!
//! This module contains the value types for the seven ASL state kinds:
//! - Shared capabilities via the `State`, `Annotated` and `TransitionState` traits
//! - Comparison predicates and the boolean rules of Choice states
//! - Retry and catch policies for Task and Parallel states
//!
//! Everything here is plain data. Targets are referenced by name and only
//! resolved when a machine is built.

mod choice;
mod comparison;
mod errors;
mod parallel;
mod pass;
mod state;
mod task;
mod terminal;
mod wait;

pub use choice::{ChoiceBranch, ChoiceState};
pub use comparison::{Comparison, Literal, Relation};
pub use errors::ErrorName;
pub use parallel::ParallelState;
pub use pass::PassState;
pub use state::{Annotated, MachineState, State, StateBase, TransitionState};
pub use task::{ErrorHandling, TaskCatch, TaskResource, TaskRetry, TaskState};
pub use terminal::{FailState, SucceedState};
pub use wait::{WaitFor, WaitState};

pub(crate) use comparison::{numeric_value, rfc3339};
