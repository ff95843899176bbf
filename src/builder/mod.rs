//! Graph builder.
//!
//! `StateMachineBuilder` collects states, then walks the graph from the
//! start state and freezes the reachable ones into a `StateMachine`.

pub mod error;
mod graph;
pub mod machine;

pub use error::{BuildError, ConstructionError};
pub use machine::{StateMachine, StateMachineBuilder};
