//! Order Workflow
//!
//! This example builds an order fulfilment state machine and prints its
//! deployable definition.
//!
//! Key concepts:
//! - States name their successors; the builder keeps only reachable ones
//! - Retry and Catch policies on a Task
//! - Validation before serialization
//! - The function list handed to the provisioning layer
//!
//! Run with: cargo run --example order_workflow

use serde_json::json;
use std::time::Duration;
use stepgraph::builder::StateMachineBuilder;
use stepgraph::core::{
    ChoiceBranch, ChoiceState, Comparison, ErrorName, FailState, PassState, SucceedState,
    TaskCatch, TaskResource, TaskRetry, TaskState, TransitionState, WaitState,
};
use stepgraph::definition::{DefinitionError, DefinitionOptions};

fn main() {
    println!("=== Order Workflow Example ===\n");

    let check_stock = ChoiceState::new(
        "CheckStock",
        [ChoiceBranch::matching(
            Comparison::boolean_equals("$.inStock", true),
            "Charge",
        )],
    )
    .with_default("WaitForStock");

    let charge = TaskState::new("Charge", TaskResource::function("ChargeFunction"))
        .with_parameters(json!({"orderId.$": "$.orderId", "amount.$": "$.total"}))
        .with_result_path("$.payment")
        .with_timeout(Duration::from_secs(30))
        .with_retrier(
            TaskRetry::new()
                .with_errors([ErrorName::Timeout])
                .with_interval(Duration::from_secs(1))
                .with_max_attempts(3)
                .with_backoff_rate(2.0),
        )
        .with_catcher(TaskCatch::new("PaymentFailed", [ErrorName::All]))
        .next("Ship");

    let machine = StateMachineBuilder::new("OrderWorkflow")
        .comment("Charge and ship an order")
        .start_at(PassState::new("Start").next("CheckStock"))
        .state(check_stock)
        .state(charge)
        .state(WaitState::delay("WaitForStock", Duration::from_secs(600)).next("CheckStock"))
        .state(TaskState::new("Ship", TaskResource::function("ShipFunction")).next("Shipped"))
        .state(SucceedState::new("Shipped"))
        .state(FailState::new("PaymentFailed", "PaymentFailed").with_cause("Card declined"))
        .role_arn("arn:aws:iam::123456789012:role/order-workflow")
        .build()
        .unwrap();

    println!("Visit order: {:?}", machine.visit_order());

    match machine.definition(&DefinitionOptions::pretty()) {
        Ok(definition) => {
            println!("Functions to grant: {:?}", definition.resources);
            println!("Role: {:?}", definition.role_arn);
            println!("\nDefinition:\n{}", definition.document);
        }
        Err(DefinitionError::Invalid(errors)) => {
            println!("Validation failed:");
            for error in errors {
                println!("  - {}", error);
            }
        }
        Err(err) => println!("Serialization failed: {}", err),
    }

    println!("\n=== Example Complete ===");
}
