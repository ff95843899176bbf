//! ASL document serialization.
//!
//! Turns a frozen `StateMachine` into the JSON document consumed by the
//! execution engine. Serialization is all-or-nothing: the first failing
//! state aborts the whole document. The state table is ordered by name,
//! so identical machines always produce identical bytes.
//!
//! # Example
//!
//! ```rust
//! use stepgraph::builder::StateMachineBuilder;
//! use stepgraph::core::{PassState, SucceedState, TransitionState};
//! use stepgraph::serialize;
//!
//! let machine = StateMachineBuilder::new("Hello")
//!     .start_at(PassState::new("Greet").next("Done"))
//!     .state(SucceedState::new("Done"))
//!     .build()
//!     .unwrap();
//!
//! let document = serialize::to_document(&machine).unwrap();
//! assert_eq!(document["StartAt"], "Greet");
//! assert_eq!(document["States"]["Greet"]["Next"], "Done");
//! ```

pub mod error;
mod states;

pub use error::MarshalError;

use crate::builder::StateMachine;
use serde_json::{Map, Value};

/// `{Comment?, StartAt, States}` shared by the root document and every
/// Parallel branch.
pub(crate) fn machine_body(machine: &StateMachine) -> Result<Map<String, Value>, MarshalError> {
    let mut table = Map::new();
    for (name, state) in machine.states() {
        table.insert(name.clone(), states::encode(state)?);
    }

    let mut body = Map::new();
    if let Some(comment) = machine.comment() {
        body.insert("Comment".into(), Value::from(comment));
    }
    body.insert("StartAt".into(), Value::from(machine.start_at()));
    body.insert("States".into(), Value::Object(table));
    Ok(body)
}

/// Serialize a machine into its ASL document.
///
/// A machine made of a single state also carries a top-level `End: true`.
pub fn to_document(machine: &StateMachine) -> Result<Value, MarshalError> {
    let mut document = machine_body(machine)?;
    if machine.states().len() == 1 {
        document.insert("End".into(), Value::Bool(true));
    }
    Ok(Value::Object(document))
}

/// Serialize a machine into compact JSON text.
pub fn to_string(machine: &StateMachine) -> Result<String, MarshalError> {
    Ok(serde_json::to_string(&to_document(machine)?)?)
}

/// Serialize a machine into indented JSON text.
pub fn to_string_pretty(machine: &StateMachine) -> Result<String, MarshalError> {
    Ok(serde_json::to_string_pretty(&to_document(machine)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateMachineBuilder;
    use crate::core::{
        ParallelState, PassState, SucceedState, TaskResource, TaskState, TransitionState,
    };
    use serde_json::json;

    #[test]
    fn document_lists_every_table_entry() {
        let machine = StateMachineBuilder::new("Flow")
            .comment("three steps")
            .start_at(PassState::new("A").next("B"))
            .state(TaskState::new("B", TaskResource::function("BFn")).next("C"))
            .state(SucceedState::new("C"))
            .build()
            .unwrap();

        let document = to_document(&machine).unwrap();

        assert_eq!(document["Comment"], json!("three steps"));
        assert_eq!(document["StartAt"], json!("A"));
        let keys: Vec<&String> = document["States"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
        assert!(document.get("End").is_none());
    }

    #[test]
    fn single_state_document_carries_end() {
        let machine = StateMachineBuilder::new("Solo")
            .start_at(SucceedState::new("Done"))
            .build()
            .unwrap();

        let document = to_document(&machine).unwrap();
        assert_eq!(document["End"], json!(true));
    }

    #[test]
    fn branch_bodies_never_carry_top_level_end() {
        let branch = StateMachineBuilder::new("B")
            .start_at(SucceedState::new("Inner"))
            .build()
            .unwrap();
        let machine = StateMachineBuilder::new("Outer")
            .start_at(ParallelState::new("Fan", [branch]).next("Done"))
            .state(SucceedState::new("Done"))
            .build()
            .unwrap();

        let document = to_document(&machine).unwrap();
        let branch_body = &document["States"]["Fan"]["Branches"][0];

        assert!(branch_body.get("End").is_none());
        assert_eq!(branch_body["StartAt"], json!("Inner"));
        assert!(document["States"].get("Inner").is_none());
    }

    #[test]
    fn serialization_is_repeatable() {
        let machine = StateMachineBuilder::new("Flow")
            .start_at(PassState::new("A").next("B"))
            .state(SucceedState::new("B"))
            .build()
            .unwrap();

        assert_eq!(to_string(&machine).unwrap(), to_string(&machine).unwrap());
        let reparsed: Value = serde_json::from_str(&to_string(&machine).unwrap()).unwrap();
        assert_eq!(
            reparsed,
            json!({
                "StartAt": "A",
                "States": {"A": {"Type": "Pass", "Next": "B"}, "B": {"Type": "Succeed"}}
            })
        );
    }

    #[test]
    fn marshal_error_aborts_whole_document() {
        let machine = StateMachineBuilder::new("Broken")
            .start_at(PassState::new("A").next("B"))
            .state(TaskState::new("B", TaskResource::function("Fn")).with_parameters(json!("text")))
            .build()
            .unwrap();

        assert!(matches!(
            to_string(&machine),
            Err(MarshalError::NonObjectParameters { .. })
        ));
    }
}
