//! Per-kind state encoders.
//!
//! Each kind has exactly one encoder. `Next` and `End` are mutually
//! exclusive, and `End` is only written for kinds that permit termination.

use super::error::MarshalError;
use super::machine_body;
use crate::core::{
    numeric_value, rfc3339, ChoiceBranch, ChoiceState, ErrorHandling, FailState, Literal,
    MachineState, ParallelState, PassState, State, StateBase, SucceedState, TaskResource,
    TaskState, WaitFor, WaitState,
};
use serde_json::{json, Map, Value};
use std::time::Duration;

type Fields = Map<String, Value>;

pub(crate) fn encode(state: &MachineState) -> Result<Value, MarshalError> {
    let fields = match state {
        MachineState::Pass(pass) => encode_pass(pass),
        MachineState::Task(task) => encode_task(task)?,
        MachineState::Wait(wait) => encode_wait(wait),
        MachineState::Succeed(succeed) => encode_succeed(succeed),
        MachineState::Fail(fail) => encode_fail(fail),
        MachineState::Choice(choice) => encode_choice(choice)?,
        MachineState::Parallel(parallel) => encode_parallel(parallel)?,
    };
    Ok(Value::Object(fields))
}

fn common(kind: &str, base: &StateBase) -> Fields {
    let mut fields = Fields::new();
    fields.insert("Type".into(), Value::from(kind));
    if let Some(comment) = base.comment() {
        fields.insert("Comment".into(), Value::from(comment));
    }
    if let Some(path) = base.input_path() {
        fields.insert("InputPath".into(), Value::from(path));
    }
    if let Some(path) = base.output_path() {
        fields.insert("OutputPath".into(), Value::from(path));
    }
    fields
}

fn transition(fields: &mut Fields, next: Option<&str>) {
    match next {
        Some(next) => fields.insert("Next".into(), Value::from(next)),
        None => fields.insert("End".into(), Value::Bool(true)),
    };
}

fn optional_path(fields: &mut Fields, key: &str, path: Option<&String>) {
    if let Some(path) = path {
        fields.insert(key.into(), Value::from(path.as_str()));
    }
}

fn seconds(duration: Duration) -> Value {
    numeric_value(duration.as_secs_f64())
}

fn error_handling(
    fields: &mut Fields,
    state: &str,
    handling: &ErrorHandling,
) -> Result<(), MarshalError> {
    let non_finite = handling
        .retriers()
        .iter()
        .filter_map(|retry| retry.backoff_rate())
        .any(|rate| !rate.is_finite());
    if non_finite {
        return Err(MarshalError::NonFiniteNumber {
            state: state.to_string(),
            field: "BackoffRate".to_string(),
        });
    }

    if !handling.retriers().is_empty() {
        fields.insert("Retry".into(), serde_json::to_value(handling.retriers())?);
    }
    if !handling.catchers().is_empty() {
        fields.insert("Catch".into(), serde_json::to_value(handling.catchers())?);
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn encode_pass(pass: &PassState) -> Fields {
    let mut fields = common("Pass", &pass.base);
    optional_path(&mut fields, "ResultPath", pass.result_path.as_ref());
    if let Some(result) = &pass.result {
        fields.insert("Result".into(), result.clone());
    }
    transition(&mut fields, pass.next.as_deref());
    fields
}

fn encode_task(task: &TaskState) -> Result<Fields, MarshalError> {
    let mut fields = common("Task", &task.base);
    let resource = match &task.resource {
        TaskResource::Function(id) => json!({ "Fn::GetAtt": [id, "Arn"] }),
        TaskResource::Arn(arn) => Value::from(arn.as_str()),
    };
    fields.insert("Resource".into(), resource);

    match &task.parameters {
        Some(parameters @ Value::Object(_)) => {
            fields.insert("Parameters".into(), parameters.clone());
        }
        Some(other) => {
            return Err(MarshalError::NonObjectParameters {
                state: task.name().to_string(),
                found: json_kind(other),
            });
        }
        None => {}
    }

    if let Some(timeout) = task.timeout.filter(|d| !d.is_zero()) {
        fields.insert("TimeoutSeconds".into(), seconds(timeout));
    }
    if let Some(heartbeat) = task.heartbeat.filter(|d| !d.is_zero()) {
        fields.insert("HeartbeatSeconds".into(), seconds(heartbeat));
    }
    optional_path(&mut fields, "ResultPath", task.result_path.as_ref());
    error_handling(&mut fields, task.name(), &task.handling)?;
    transition(&mut fields, task.next.as_deref());
    Ok(fields)
}

fn encode_wait(wait: &WaitState) -> Fields {
    let mut fields = common("Wait", &wait.base);
    let (key, value) = match &wait.wait {
        WaitFor::Seconds(delay) => ("Seconds", seconds(*delay)),
        WaitFor::SecondsPath(path) => ("SecondsPath", Value::from(path.as_str())),
        WaitFor::Timestamp(instant) => ("Timestamp", Value::from(rfc3339(instant))),
        WaitFor::TimestampPath(path) => ("TimestampPath", Value::from(path.as_str())),
    };
    fields.insert(key.into(), value);
    transition(&mut fields, wait.next.as_deref());
    fields
}

fn encode_succeed(succeed: &SucceedState) -> Fields {
    common("Succeed", &succeed.base)
}

fn encode_fail(fail: &FailState) -> Fields {
    let mut fields = Fields::new();
    fields.insert("Type".into(), Value::from("Fail"));
    if let Some(comment) = &fail.comment {
        fields.insert("Comment".into(), Value::from(comment.as_str()));
    }
    fields.insert("Error".into(), Value::from(fail.error.as_str()));
    if let Some(cause) = &fail.cause {
        fields.insert("Cause".into(), Value::from(cause.as_str()));
    }
    fields
}

fn encode_choice(choice: &ChoiceState) -> Result<Fields, MarshalError> {
    let non_finite = choice
        .choices
        .iter()
        .flat_map(ChoiceBranch::comparisons)
        .find(|comparison| matches!(comparison.literal(), Literal::Numeric(n) if !n.is_finite()));
    if let Some(comparison) = non_finite {
        return Err(MarshalError::NonFiniteNumber {
            state: choice.name().to_string(),
            field: comparison.predicate_name(),
        });
    }

    let mut fields = common("Choice", &choice.base);
    fields.insert("Choices".into(), serde_json::to_value(&choice.choices)?);
    if let Some(default) = &choice.default {
        fields.insert("Default".into(), Value::from(default.as_str()));
    }
    Ok(fields)
}

fn encode_parallel(parallel: &ParallelState) -> Result<Fields, MarshalError> {
    let mut fields = common("Parallel", &parallel.base);
    let branches = parallel
        .branches
        .iter()
        .map(|branch| machine_body(branch).map(Value::Object))
        .collect::<Result<Vec<_>, _>>()?;
    fields.insert("Branches".into(), Value::Array(branches));
    optional_path(&mut fields, "ResultPath", parallel.result_path.as_ref());
    error_handling(&mut fields, parallel.name(), &parallel.handling)?;
    transition(&mut fields, parallel.next.as_deref());
    Ok(fields)
}
