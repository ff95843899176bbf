//! Succeed and Fail: the two states that end a machine without `End`.

use super::state::{Annotated, State, StateBase};

/// Stops the machine successfully.
#[derive(Clone, Debug, PartialEq)]
pub struct SucceedState {
    pub(crate) base: StateBase,
}

impl SucceedState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: StateBase::named(name),
        }
    }
}

impl State for SucceedState {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn permits_end(&self) -> bool {
        false
    }
}

impl Annotated for SucceedState {
    fn base(&self) -> &StateBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut StateBase {
        &mut self.base
    }
}

/// Stops the machine and marks it failed.
///
/// Only `Comment` is allowed beside `Error` and `Cause`, so this kind has
/// no data selectors.
#[derive(Clone, Debug, PartialEq)]
pub struct FailState {
    pub(crate) name: String,
    pub(crate) comment: Option<String>,
    pub(crate) error: String,
    pub(crate) cause: Option<String>,
}

impl FailState {
    pub fn new(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            error: error.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}

impl State for FailState {
    fn name(&self) -> &str {
        &self.name
    }

    fn permits_end(&self) -> bool {
        false
    }
}
