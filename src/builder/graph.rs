//! Reachability traversal from the start state.

use super::error::ConstructionError;
use crate::core::{MachineState, State};
use std::collections::{BTreeMap, HashSet, VecDeque};

/// Every state handed to a builder, keyed by name.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    states: BTreeMap<String, MachineState>,
    errors: Vec<ConstructionError>,
}

impl Registry {
    /// Add a state. The first registration of a name wins; registering an
    /// identical state again is a no-op, a different one is a collision.
    pub(crate) fn register(&mut self, state: MachineState) {
        match self.states.get(state.name()) {
            Some(existing) if *existing == state => {
                tracing::trace!(state = state.name(), "identical state registered twice");
            }
            Some(_) => {
                tracing::debug!(state = state.name(), "state name collision");
                self.errors.push(ConstructionError::DuplicateStateName {
                    name: state.name().to_string(),
                });
            }
            None => {
                self.states.insert(state.name().to_string(), state);
            }
        }
    }
}

/// The frozen result of a traversal.
#[derive(Debug)]
pub(crate) struct Traversal {
    pub(crate) states: BTreeMap<String, MachineState>,
    /// Names in the order they were visited.
    pub(crate) order: Vec<String>,
    pub(crate) errors: Vec<ConstructionError>,
}

/// Breadth-first walk from `start`, visiting each reachable state once.
///
/// A name enters the worklist at most once, so converging paths and cycles
/// terminate. Parallel branches are never entered; they own their tables.
pub(crate) fn traverse(start: &str, registry: Registry) -> Traversal {
    let Registry {
        states: mut pool,
        mut errors,
    } = registry;

    let mut states = BTreeMap::new();
    let mut order = Vec::new();
    let mut discovered: HashSet<String> = HashSet::from([start.to_string()]);
    let mut pending: VecDeque<String> = VecDeque::from([start.to_string()]);
    let mut reported: HashSet<(String, String)> = HashSet::new();

    while let Some(name) = pending.pop_front() {
        let Some(state) = pool.remove(&name) else {
            continue;
        };

        for target in state.successors() {
            if discovered.contains(target) {
                continue;
            }
            if !pool.contains_key(target) {
                if reported.insert((name.clone(), target.to_string())) {
                    errors.push(ConstructionError::UnknownState {
                        from: name.clone(),
                        target: target.to_string(),
                    });
                }
                continue;
            }
            discovered.insert(target.to_string());
            pending.push_back(target.to_string());
        }

        tracing::trace!(state = %name, kind = state.kind(), "visited state");
        order.push(name.clone());
        states.insert(name, state);
    }

    for unreachable in pool.keys() {
        tracing::debug!(state = %unreachable, "registered state is unreachable from the start state");
    }

    Traversal {
        states,
        order,
        errors,
    }
}
