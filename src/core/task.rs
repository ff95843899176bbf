//! Task states and the retry/catch policies shared with Parallel.
//!
//! Retriers and catchers are declarative configuration for the execution
//! engine. Nothing here retries anything; entries keep the order they were
//! added in.

use super::errors::ErrorName;
use super::state::{Annotated, State, StateBase, TransitionState};
use serde::Serialize;
use std::time::Duration;

fn duration_is_unset(duration: &Option<Duration>) -> bool {
    duration.map_or(true, |d| d.is_zero())
}

fn whole_seconds<S: serde::Serializer>(
    duration: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match duration {
        Some(d) => serializer.serialize_u64(d.as_secs()),
        None => serializer.serialize_none(),
    }
}

/// A retry policy entry (`Retry` array element).
///
/// # Example
///
/// ```rust
/// use stepgraph::core::{ErrorName, TaskRetry};
/// use std::time::Duration;
///
/// let retry = TaskRetry::new()
///     .with_errors([ErrorName::TaskFailed])
///     .with_interval(Duration::from_secs(2))
///     .with_max_attempts(3)
///     .with_backoff_rate(1.5);
///
/// let json = serde_json::to_value(&retry).unwrap();
/// assert_eq!(json["IntervalSeconds"], 2);
/// assert_eq!(json["MaxAttempts"], 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskRetry {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) error_equals: Vec<ErrorName>,
    #[serde(
        skip_serializing_if = "duration_is_unset",
        serialize_with = "whole_seconds"
    )]
    pub(crate) interval_seconds: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) max_attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) backoff_rate: Option<f64>,
}

impl TaskRetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_errors(mut self, errors: impl IntoIterator<Item = ErrorName>) -> Self {
        self.error_equals.extend(errors);
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval_seconds = Some(interval);
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_backoff_rate(mut self, backoff_rate: f64) -> Self {
        self.backoff_rate = Some(backoff_rate);
        self
    }

    pub fn errors(&self) -> &[ErrorName] {
        &self.error_equals
    }

    /// Delay before the first retry. Only whole seconds are representable.
    pub fn interval(&self) -> Option<Duration> {
        self.interval_seconds
    }

    pub fn backoff_rate(&self) -> Option<f64> {
        self.backoff_rate
    }
}

/// A catcher (`Catch` array element) routing matching errors to a
/// recovery state.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskCatch {
    pub(crate) error_equals: Vec<ErrorName>,
    pub(crate) next: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) result_path: Option<String>,
}

impl TaskCatch {
    pub fn new(next: impl Into<String>, errors: impl IntoIterator<Item = ErrorName>) -> Self {
        Self {
            error_equals: errors.into_iter().collect(),
            next: next.into(),
            result_path: None,
        }
    }

    pub fn with_result_path(mut self, path: impl Into<String>) -> Self {
        self.result_path = Some(path.into());
        self
    }

    pub fn errors(&self) -> &[ErrorName] {
        &self.error_equals
    }

    pub fn next_state(&self) -> &str {
        &self.next
    }
}

/// Retriers and catchers, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorHandling {
    pub(crate) retriers: Vec<TaskRetry>,
    pub(crate) catchers: Vec<TaskCatch>,
}

impl ErrorHandling {
    pub fn retriers(&self) -> &[TaskRetry] {
        &self.retriers
    }

    pub fn catchers(&self) -> &[TaskCatch] {
        &self.catchers
    }

    pub(crate) fn catch_targets(&self) -> impl Iterator<Item = &str> {
        self.catchers.iter().map(TaskCatch::next_state)
    }
}

/// What a Task invokes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskResource {
    /// A compute function bound by its logical resource id; serialized as
    /// `{"Fn::GetAtt": [id, "Arn"]}` for the provisioning layer to expand.
    Function(String),
    /// A literal resource ARN, e.g. a service integration.
    Arn(String),
}

impl TaskResource {
    pub fn function(logical_id: impl Into<String>) -> Self {
        Self::Function(logical_id.into())
    }

    pub fn arn(arn: impl Into<String>) -> Self {
        Self::Arn(arn.into())
    }

    /// The bound function id, if this resource needs invoke permission.
    pub fn function_id(&self) -> Option<&str> {
        match self {
            Self::Function(id) => Some(id),
            Self::Arn(_) => None,
        }
    }
}

/// Invokes a resource.
///
/// # Example
///
/// ```rust
/// use stepgraph::core::{ErrorName, TaskCatch, TaskResource, TaskState, TransitionState};
/// use std::time::Duration;
///
/// let charge = TaskState::new("Charge", TaskResource::function("ChargeFn"))
///     .with_timeout(Duration::from_secs(30))
///     .with_catcher(TaskCatch::new("Refund", [ErrorName::All]))
///     .next("Ship");
///
/// assert_eq!(charge.adjacent_states(), vec!["Ship", "Refund"]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TaskState {
    pub(crate) base: StateBase,
    pub(crate) next: Option<String>,
    pub(crate) resource: TaskResource,
    pub(crate) parameters: Option<serde_json::Value>,
    pub(crate) result_path: Option<String>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) heartbeat: Option<Duration>,
    pub(crate) handling: ErrorHandling,
}

impl TaskState {
    pub fn new(name: impl Into<String>, resource: TaskResource) -> Self {
        Self {
            base: StateBase::named(name),
            next: None,
            resource,
            parameters: None,
            result_path: None,
            timeout: None,
            heartbeat: None,
            handling: ErrorHandling::default(),
        }
    }

    /// Parameters passed to the resource. Must be a JSON object by the
    /// time the machine is serialized.
    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Convert any serializable value into the generic JSON form first.
    pub fn with_parameters_from<T: Serialize>(
        self,
        parameters: &T,
    ) -> Result<Self, serde_json::Error> {
        let value = serde_json::to_value(parameters)?;
        Ok(self.with_parameters(value))
    }

    pub fn with_result_path(mut self, path: impl Into<String>) -> Self {
        self.result_path = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_heartbeat(mut self, heartbeat: Duration) -> Self {
        self.heartbeat = Some(heartbeat);
        self
    }

    pub fn with_retrier(mut self, retry: TaskRetry) -> Self {
        self.handling.retriers.push(retry);
        self
    }

    pub fn with_retriers(mut self, retries: impl IntoIterator<Item = TaskRetry>) -> Self {
        self.handling.retriers.extend(retries);
        self
    }

    pub fn with_catcher(mut self, catch: TaskCatch) -> Self {
        self.handling.catchers.push(catch);
        self
    }

    pub fn with_catchers(mut self, catches: impl IntoIterator<Item = TaskCatch>) -> Self {
        self.handling.catchers.extend(catches);
        self
    }

    pub fn resource(&self) -> &TaskResource {
        &self.resource
    }

    pub fn parameters(&self) -> Option<&serde_json::Value> {
        self.parameters.as_ref()
    }

    pub fn error_handling(&self) -> &ErrorHandling {
        &self.handling
    }
}

impl State for TaskState {
    fn name(&self) -> &str {
        &self.base.name
    }
}

impl Annotated for TaskState {
    fn base(&self) -> &StateBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut StateBase {
        &mut self.base
    }
}

impl TransitionState for TaskState {
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
