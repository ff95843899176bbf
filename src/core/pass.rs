//! Pass states.

use super::state::{Annotated, State, StateBase, TransitionState};

/// Passes its input to its output, optionally injecting a fixed result.
#[derive(Clone, Debug, PartialEq)]
pub struct PassState {
    pub(crate) base: StateBase,
    pub(crate) next: Option<String>,
    pub(crate) result_path: Option<String>,
    pub(crate) result: Option<serde_json::Value>,
}

impl PassState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: StateBase::named(name),
            next: None,
            result_path: None,
            result: None,
        }
    }

    pub fn with_result(mut self, result: serde_json::Value) -> Self {
        self.result = Some(result);
        self
    }

    pub fn with_result_path(mut self, path: impl Into<String>) -> Self {
        self.result_path = Some(path.into());
        self
    }

    pub fn result(&self) -> Option<&serde_json::Value> {
        self.result.as_ref()
    }
}

impl State for PassState {
    fn name(&self) -> &str {
        &self.base.name
    }
}

impl Annotated for PassState {
    fn base(&self) -> &StateBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut StateBase {
        &mut self.base
    }
}

impl TransitionState for PassState {
    fn next(mut self, target: impl Into<String>) -> Self {
        self.next = Some(target.into());
        self
    }

    fn next_state(&self) -> Option<&str> {
        self.next.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pass_without_next_has_no_adjacent_states() {
        let pass = PassState::new("Noop");
        assert!(pass.adjacent_states().is_empty());
        assert!(pass.permits_end());
    }

    #[test]
    fn next_replaces_previous_target() {
        let pass = PassState::new("Step").next("A").next("B");
        assert_eq!(pass.next_state(), Some("B"));
    }

    #[test]
    fn result_is_stored_verbatim() {
        let pass = PassState::new("Inject").with_result(json!({"greeting": "hi"}));
        assert_eq!(pass.result(), Some(&json!({"greeting": "hi"})));
    }
}
