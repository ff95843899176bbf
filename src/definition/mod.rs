//! The deployable output of a state machine.
//!
//! A `Definition` is everything the provisioning layer consumes: the ASL
//! document as JSON text, the compute functions the document invokes (for
//! permission wiring), and the execution role. Producing one validates the
//! machine first and serializes only if no violation was found.

use crate::builder::StateMachine;
use crate::serialize;

pub mod error;

pub use error::DefinitionError;

/// JSON text layout for the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefinitionOptions {
    /// Indent the document. Compact text is the default since the document
    /// is usually embedded as a string in another template.
    pub pretty: bool,
}

impl DefinitionOptions {
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

/// A validated, serialized state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    /// Machine name
    pub name: String,

    /// ASL document as JSON text
    pub document: String,

    /// Logical ids of every invoked function, branches included, in
    /// first-reference order without duplicates
    pub resources: Vec<String>,

    /// Execution role, if one was configured
    pub role_arn: Option<String>,
}

impl StateMachine {
    /// Validate, then serialize.
    ///
    /// Validation errors are returned as one batch and no document is
    /// produced. A serialization failure aborts the whole document.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stepgraph::builder::StateMachineBuilder;
    /// use stepgraph::core::{TaskResource, TaskState};
    /// use stepgraph::definition::DefinitionOptions;
    ///
    /// let machine = StateMachineBuilder::new("Notify")
    ///     .start_at(TaskState::new("Send", TaskResource::function("SendFn")))
    ///     .build()
    ///     .unwrap();
    ///
    /// let definition = machine.definition(&DefinitionOptions::default()).unwrap();
    /// assert_eq!(definition.resources, vec!["SendFn".to_string()]);
    /// assert!(definition.document.starts_with('{'));
    /// ```
    pub fn definition(&self, options: &DefinitionOptions) -> Result<Definition, DefinitionError> {
        let violations = self.validate();
        if !violations.is_empty() {
            return Err(DefinitionError::Invalid(violations));
        }

        let document = if options.pretty {
            serialize::to_string_pretty(self)?
        } else {
            serialize::to_string(self)?
        };
        tracing::debug!(machine = self.name(), %document, "State machine definition");

        Ok(Definition {
            name: self.name().to_string(),
            document,
            resources: self.function_resources(),
            role_arn: self.role_arn().map(str::to_string),
        })
    }
}
