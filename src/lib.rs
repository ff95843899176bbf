//! Stepgraph: typed construction of Amazon States Language state machines
//!
//! States are plain values that name their successors. A builder walks the
//! graph from the start state, keeps every reachable state exactly once and
//! freezes the result. The frozen machine can be validated against the ASL
//! grammar and serialized into the JSON document a workflow engine runs.
//!
//! # Core Concepts
//!
//! - **States**: one type per ASL kind, wrapped by `MachineState`
//! - **Builder**: reachability traversal with deferred construction errors
//! - **Validation**: every grammar violation reported at once
//! - **Definition**: the validated document plus the functions it invokes
//!
//! # Example
//!
//! ```rust
//! use stepgraph::builder::StateMachineBuilder;
//! use stepgraph::core::{
//!     ChoiceBranch, ChoiceState, Comparison, FailState, TaskResource, TaskState,
//!     TransitionState,
//! };
//! use stepgraph::definition::DefinitionOptions;
//!
//! let router = ChoiceState::new(
//!     "Router",
//!     [ChoiceBranch::matching(Comparison::string_equals("$.x", "go"), "Go")],
//! )
//! .with_default("Bad");
//!
//! let machine = StateMachineBuilder::new("Routing")
//!     .start_at(router)
//!     .state(TaskState::new("Go", TaskResource::function("GoFn")))
//!     .state(FailState::new("Bad", "Unroutable"))
//!     .build()
//!     .unwrap();
//!
//! assert!(machine.validate().is_empty());
//!
//! let definition = machine.definition(&DefinitionOptions::default()).unwrap();
//! assert_eq!(definition.resources, vec!["GoFn".to_string()]);
//! ```

pub mod builder;
pub mod core;
pub mod definition;
pub mod serialize;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, ConstructionError, StateMachine, StateMachineBuilder};
pub use core::{MachineState, State, TransitionState};
pub use definition::{Definition, DefinitionError, DefinitionOptions};
pub use serialize::MarshalError;
pub use validation::{ValidationError, Validator, ValidatorBuilder};
