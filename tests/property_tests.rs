//! Property-based tests for graph construction and serialization.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated state graphs.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::Value;
use std::collections::BTreeSet;
use stepgraph::builder::{StateMachine, StateMachineBuilder};
use stepgraph::core::{
    ChoiceBranch, ChoiceState, Comparison, MachineState, PassState, SucceedState, TaskResource,
    TaskState, TransitionState, WaitState,
};
use stepgraph::serialize;

fn step_name(i: usize) -> String {
    format!("Step{}", i)
}

/// `Step0 -> Step1 -> ... -> Done`, with the non-start states listed in
/// the given order.
fn chain(len: usize, order: &[usize]) -> StateMachine {
    let link = |i: usize| -> MachineState {
        let next = if i + 1 < len {
            step_name(i + 1)
        } else {
            "Done".to_string()
        };
        PassState::new(step_name(i)).next(next).into()
    };

    let mut builder = StateMachineBuilder::new("Chain").start_at(link(0));
    for &i in order {
        builder = builder.state(link(i));
    }
    builder.state(SucceedState::new("Done")).build().unwrap()
}

prop_compose! {
    fn chain_layout()(len in 1..12usize)(
        order in Just((1..len).collect::<Vec<_>>()).prop_shuffle(),
        len in Just(len),
    ) -> (usize, Vec<usize>) {
        (len, order)
    }
}

/// Choice fanning out to `width` tasks that all converge on one state.
fn fan_in(width: usize) -> StateMachine {
    let branches = (0..width).map(|i| {
        ChoiceBranch::matching(Comparison::numeric_equals("$.route", i as f64), format!("Work{}", i))
    });

    let mut builder = StateMachineBuilder::new("FanIn")
        .start_at(ChoiceState::new("Route", branches).with_default("Join"));
    for i in 0..width {
        builder = builder.state(
            TaskState::new(format!("Work{}", i), TaskResource::function(format!("Fn{}", i)))
                .next("Join"),
        );
    }
    builder.state(SucceedState::new("Join")).build().unwrap()
}

fn document(machine: &StateMachine) -> Value {
    serialize::to_document(machine).unwrap()
}

proptest! {
    #[test]
    fn chain_keeps_every_state_once((len, order) in chain_layout()) {
        let machine = chain(len, &order);

        prop_assert_eq!(machine.states().len(), len + 1);
        prop_assert!(machine.construction_errors().is_empty());

        let mut expected: Vec<String> = (0..len).map(step_name).collect();
        expected.push("Done".to_string());
        prop_assert_eq!(machine.visit_order(), expected.as_slice());
    }

    #[test]
    fn converging_paths_yield_one_entry(width in 1..10usize) {
        let machine = fan_in(width);

        prop_assert_eq!(machine.states().len(), width + 2);
        prop_assert_eq!(
            machine.visit_order().iter().filter(|name| *name == "Join").count(),
            1
        );
        prop_assert_eq!(machine.function_resources().len(), width);
    }

    #[test]
    fn document_matches_visit_set((len, order) in chain_layout()) {
        let machine = chain(len, &order);
        let document = document(&machine);

        prop_assert_eq!(&document["StartAt"], &Value::from("Step0"));

        let keys: BTreeSet<&str> = document["States"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let visited: BTreeSet<&str> = machine.visit_order().iter().map(String::as_str).collect();
        prop_assert_eq!(keys, visited);
    }

    #[test]
    fn next_and_end_are_exclusive(width in 1..8usize) {
        let document = document(&fan_in(width));

        for (name, state) in document["States"].as_object().unwrap() {
            let has_next = state.get("Next").is_some();
            let has_end = state.get("End").is_some();
            prop_assert!(!(has_next && has_end), "{} has both Next and End", name);

            match state["Type"].as_str() {
                Some("Task") => prop_assert!(has_next || has_end),
                Some("Choice") | Some("Succeed") | Some("Fail") => {
                    prop_assert!(!has_next && !has_end)
                }
                _ => {}
            }
        }
    }

    #[test]
    fn timestamps_round_trip(secs in 0i64..4_102_444_800, millis in 0u32..1000) {
        let instant: DateTime<Utc> = Utc.timestamp_opt(secs, millis * 1_000_000).unwrap();
        let machine = StateMachineBuilder::new("Timer")
            .start_at(WaitState::until("Hold", instant).next("Done"))
            .state(SucceedState::new("Done"))
            .build()
            .unwrap();

        let document = document(&machine);
        let text = document["States"]["Hold"]["Timestamp"].as_str().unwrap();
        prop_assert!(text.ends_with('Z'));

        let parsed = DateTime::parse_from_rfc3339(text).unwrap().with_timezone(&Utc);
        prop_assert_eq!(parsed, instant);
    }

    #[test]
    fn whole_numbers_serialize_as_integers(n in -1_000_000i32..1_000_000) {
        let machine = StateMachineBuilder::new("Numbers")
            .start_at(ChoiceState::new(
                "Check",
                [ChoiceBranch::matching(Comparison::numeric_equals("$.n", n), "Done")],
            ))
            .state(SucceedState::new("Done"))
            .build()
            .unwrap();

        let document = document(&machine);
        let literal = &document["States"]["Check"]["Choices"][0]["NumericEquals"];
        prop_assert_eq!(literal.as_i64(), Some(i64::from(n)));
    }

    #[test]
    fn serialization_is_deterministic((len, order) in chain_layout()) {
        let shuffled = chain(len, &order);
        let sorted = chain(len, &(1..len).collect::<Vec<_>>());

        let first = serialize::to_string(&shuffled).unwrap();
        prop_assert_eq!(&first, &serialize::to_string(&shuffled).unwrap());
        prop_assert_eq!(&first, &serialize::to_string(&sorted).unwrap());
    }
}
