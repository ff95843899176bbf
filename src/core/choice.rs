//! Choice states and their boolean rules.

use super::comparison::Comparison;
use super::state::{Annotated, State, StateBase};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One entry of a Choice state's `Choices` array.
///
/// The target is held by name and resolved against the machine's table
/// when the graph is built.
#[derive(Clone, Debug, PartialEq)]
pub enum ChoiceBranch {
    /// A single comparison: `{"Variable", "<Predicate>", "Next"}`.
    Match { comparison: Comparison, next: String },
    /// `{"And": [...], "Next"}`
    And {
        comparisons: Vec<Comparison>,
        next: String,
    },
    /// `{"Or": [...], "Next"}`
    Or {
        comparisons: Vec<Comparison>,
        next: String,
    },
    /// `{"Not": {...}, "Next"}`
    Not { comparison: Comparison, next: String },
}

impl ChoiceBranch {
    pub fn matching(comparison: Comparison, next: impl Into<String>) -> Self {
        Self::Match {
            comparison,
            next: next.into(),
        }
    }

    pub fn and(
        comparisons: impl IntoIterator<Item = Comparison>,
        next: impl Into<String>,
    ) -> Self {
        Self::And {
            comparisons: comparisons.into_iter().collect(),
            next: next.into(),
        }
    }

    pub fn or(comparisons: impl IntoIterator<Item = Comparison>, next: impl Into<String>) -> Self {
        Self::Or {
            comparisons: comparisons.into_iter().collect(),
            next: next.into(),
        }
    }

    pub fn not(comparison: Comparison, next: impl Into<String>) -> Self {
        Self::Not {
            comparison,
            next: next.into(),
        }
    }

    /// Name of the state this branch transitions to.
    pub fn next_state(&self) -> &str {
        match self {
            Self::Match { next, .. }
            | Self::And { next, .. }
            | Self::Or { next, .. }
            | Self::Not { next, .. } => next,
        }
    }

    /// Every comparison this branch evaluates.
    pub fn comparisons(&self) -> &[Comparison] {
        match self {
            Self::Match { comparison, .. } | Self::Not { comparison, .. } => {
                std::slice::from_ref(comparison)
            }
            Self::And { comparisons, .. } | Self::Or { comparisons, .. } => comparisons,
        }
    }

    /// The combinator name, or `None` for a bare comparison.
    pub fn operator(&self) -> Option<&'static str> {
        match self {
            Self::Match { .. } => None,
            Self::And { .. } => Some("And"),
            Self::Or { .. } => Some("Or"),
            Self::Not { .. } => Some("Not"),
        }
    }
}

impl Serialize for ChoiceBranch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Match { comparison, next } => {
                comparison.ensure_finite::<S::Error>()?;
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("Variable", comparison.variable())?;
                map.serialize_entry(&comparison.predicate_name(), &comparison.literal_value())?;
                map.serialize_entry("Next", next)?;
                map.end()
            }
            Self::And { comparisons, next } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("And", comparisons)?;
                map.serialize_entry("Next", next)?;
                map.end()
            }
            Self::Or { comparisons, next } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("Or", comparisons)?;
                map.serialize_entry("Next", next)?;
                map.end()
            }
            Self::Not { comparison, next } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("Not", comparison)?;
                map.serialize_entry("Next", next)?;
                map.end()
            }
        }
    }
}

/// Branches on its input. Never terminal and never has `Next`.
///
/// # Example
///
/// ```rust
/// use stepgraph::core::{ChoiceBranch, ChoiceState, Comparison};
///
/// let router = ChoiceState::new(
///     "Router",
///     [ChoiceBranch::matching(Comparison::string_equals("$.x", "go"), "Go")],
/// )
/// .with_default("Bad");
///
/// assert_eq!(router.targets(), vec!["Go", "Bad"]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceState {
    pub(crate) base: StateBase,
    pub(crate) choices: Vec<ChoiceBranch>,
    pub(crate) default: Option<String>,
}

impl ChoiceState {
    pub fn new(name: impl Into<String>, choices: impl IntoIterator<Item = ChoiceBranch>) -> Self {
        Self {
            base: StateBase::named(name),
            choices: choices.into_iter().collect(),
            default: None,
        }
    }

    /// Append another rule after the existing ones.
    pub fn with_choice(mut self, branch: ChoiceBranch) -> Self {
        self.choices.push(branch);
        self
    }

    pub fn with_default(mut self, target: impl Into<String>) -> Self {
        self.default = Some(target.into());
        self
    }

    pub fn choices(&self) -> &[ChoiceBranch] {
        &self.choices
    }

    pub fn default_state(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Every branch target in order, then the default.
    pub fn targets(&self) -> Vec<&str> {
        self.choices
            .iter()
            .map(ChoiceBranch::next_state)
            .chain(self.default.as_deref())
            .collect()
    }
}

impl State for ChoiceState {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn permits_end(&self) -> bool {
        false
    }
}

impl Annotated for ChoiceState {
    fn base(&self) -> &StateBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut StateBase {
        &mut self.base
    }
}
