//! Builder for constructing state machines, and the frozen machine itself.

use super::error::{BuildError, ConstructionError};
use super::graph::{self, Registry};
use crate::core::{MachineState, State};
use std::collections::BTreeMap;

/// Builder for constructing state machines with a fluent API.
///
/// States are registered by value; transitions name their targets. On
/// `build` the graph is walked from the start state and only reachable
/// states end up in the machine.
///
/// # Example
///
/// ```rust
/// use stepgraph::builder::StateMachineBuilder;
/// use stepgraph::core::{PassState, SucceedState, TransitionState};
///
/// let machine = StateMachineBuilder::new("Hello")
///     .comment("A two-step machine")
///     .start_at(PassState::new("Greet").next("Done"))
///     .state(SucceedState::new("Done"))
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.start_at(), "Greet");
/// assert_eq!(machine.visit_order(), ["Greet", "Done"]);
/// ```
#[derive(Debug, Default)]
pub struct StateMachineBuilder {
    name: String,
    comment: Option<String>,
    start: Option<MachineState>,
    states: Vec<MachineState>,
    role_arn: Option<String>,
}

impl StateMachineBuilder {
    /// Create a new builder for a machine with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set the start state (required).
    pub fn start_at(mut self, state: impl Into<MachineState>) -> Self {
        self.start = Some(state.into());
        self
    }

    /// Register a state that transitions may name.
    pub fn state(mut self, state: impl Into<MachineState>) -> Self {
        self.states.push(state.into());
        self
    }

    /// Register several states at once.
    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<MachineState>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Execution role handed to the provisioning layer. Never part of the
    /// ASL document.
    pub fn role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.role_arn = Some(role_arn.into());
        self
    }

    /// Walk the graph and freeze the state table.
    ///
    /// Only a missing start state fails here. Name collisions and dangling
    /// targets are recorded and surface when the machine is validated.
    pub fn build(self) -> Result<StateMachine, BuildError> {
        let start = self.start.ok_or(BuildError::MissingStartState)?;
        let start_at = start.name().to_string();

        let mut registry = Registry::default();
        registry.register(start);
        for state in self.states {
            registry.register(state);
        }

        let traversal = graph::traverse(&start_at, registry);
        tracing::debug!(
            machine = %self.name,
            states = traversal.states.len(),
            construction_errors = traversal.errors.len(),
            "built state machine"
        );

        Ok(StateMachine {
            name: self.name,
            comment: self.comment,
            start_at,
            states: traversal.states,
            order: traversal.order,
            role_arn: self.role_arn,
            construction_errors: traversal.errors,
        })
    }
}

/// A state machine with a frozen, deduplicated name to state table.
///
/// Immutable once built; serializing it is a pure, repeatable read.
#[derive(Clone, Debug, PartialEq)]
pub struct StateMachine {
    name: String,
    comment: Option<String>,
    start_at: String,
    states: BTreeMap<String, MachineState>,
    order: Vec<String>,
    role_arn: Option<String>,
    construction_errors: Vec<ConstructionError>,
}

impl StateMachine {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Name of the start state.
    pub fn start_at(&self) -> &str {
        &self.start_at
    }

    /// The state table, keyed by name.
    pub fn states(&self) -> &BTreeMap<String, MachineState> {
        &self.states
    }

    pub fn state(&self, name: &str) -> Option<&MachineState> {
        self.states.get(name)
    }

    /// State names in breadth-first visit order, starting with `start_at`.
    pub fn visit_order(&self) -> &[String] {
        &self.order
    }

    pub fn role_arn(&self) -> Option<&str> {
        self.role_arn.as_deref()
    }

    /// Problems recorded while building, reported by validation.
    pub fn construction_errors(&self) -> &[ConstructionError] {
        &self.construction_errors
    }

    /// States in visit order.
    pub fn iter(&self) -> impl Iterator<Item = &MachineState> {
        self.order.iter().filter_map(|name| self.states.get(name))
    }

    /// Bound compute functions referenced by Task states, including those
    /// inside Parallel branches, in visit order without repeats.
    pub fn function_resources(&self) -> Vec<String> {
        let mut resources = Vec::new();
        self.collect_function_resources(&mut resources);
        resources
    }

    fn collect_function_resources(&self, resources: &mut Vec<String>) {
        for state in self.iter() {
            match state {
                MachineState::Task(task) => {
                    if let Some(id) = task.resource().function_id() {
                        if !resources.iter().any(|known| known == id) {
                            resources.push(id.to_string());
                        }
                    }
                }
                MachineState::Parallel(parallel) => {
                    for branch in parallel.branches() {
                        branch.collect_function_resources(resources);
                    }
                }
                _ => {}
            }
        }
    }
}
