//! Comparison predicates used by Choice rules.
//!
//! A comparison pairs a JSONPath variable with a typed literal and one of
//! the ASL relations. Each serializes as a single object:
//! `{"Variable": "$.x", "StringEquals": "go"}`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Relation between the variable and the literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    Equals,
    LessThan,
    GreaterThan,
    LessThanEquals,
    GreaterThanEquals,
}

impl Relation {
    fn suffix(self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::LessThan => "LessThan",
            Self::GreaterThan => "GreaterThan",
            Self::LessThanEquals => "LessThanEquals",
            Self::GreaterThanEquals => "GreaterThanEquals",
        }
    }
}

/// Typed literal compared against the variable.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    String(String),
    Numeric(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

impl Literal {
    fn prefix(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Numeric(_) => "Numeric",
            Self::Boolean(_) => "Boolean",
            Self::Timestamp(_) => "Timestamp",
        }
    }
}

/// Render an instant as RFC3339 with only the fractional digits it needs.
pub(crate) fn rfc3339(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Whole numbers serialize as integers, everything else as floats.
pub(crate) fn numeric_value(value: f64) -> serde_json::Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serde_json::Value::from(value as i64)
    } else {
        serde_json::Value::from(value)
    }
}

/// A single predicate over one input variable.
///
/// Boolean literals only support equality, so the only way to build one
/// is [`Comparison::boolean_equals`].
///
/// # Example
///
/// ```rust
/// use stepgraph::core::Comparison;
///
/// let cmp = Comparison::numeric_greater_than("$.count", 10);
/// assert_eq!(cmp.predicate_name(), "NumericGreaterThan");
///
/// let json = serde_json::to_string(&cmp).unwrap();
/// assert_eq!(json, r#"{"Variable":"$.count","NumericGreaterThan":10}"#);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    variable: String,
    relation: Relation,
    literal: Literal,
}

macro_rules! comparison_ctor {
    ($($fn_name:ident => $relation:ident, $literal:ident($ty:ty)),* $(,)?) => {
        $(
            pub fn $fn_name(variable: impl Into<String>, value: impl Into<$ty>) -> Self {
                Self::new(variable, Relation::$relation, Literal::$literal(value.into()))
            }
        )*
    };
}

impl Comparison {
    fn new(variable: impl Into<String>, relation: Relation, literal: Literal) -> Self {
        Self {
            variable: variable.into(),
            relation,
            literal,
        }
    }

    comparison_ctor! {
        string_equals => Equals, String(String),
        string_less_than => LessThan, String(String),
        string_greater_than => GreaterThan, String(String),
        string_less_than_equals => LessThanEquals, String(String),
        string_greater_than_equals => GreaterThanEquals, String(String),
        numeric_equals => Equals, Numeric(f64),
        numeric_less_than => LessThan, Numeric(f64),
        numeric_greater_than => GreaterThan, Numeric(f64),
        numeric_less_than_equals => LessThanEquals, Numeric(f64),
        numeric_greater_than_equals => GreaterThanEquals, Numeric(f64),
        timestamp_equals => Equals, Timestamp(DateTime<Utc>),
        timestamp_less_than => LessThan, Timestamp(DateTime<Utc>),
        timestamp_greater_than => GreaterThan, Timestamp(DateTime<Utc>),
        timestamp_less_than_equals => LessThanEquals, Timestamp(DateTime<Utc>),
        timestamp_greater_than_equals => GreaterThanEquals, Timestamp(DateTime<Utc>),
    }

    pub fn boolean_equals(variable: impl Into<String>, value: bool) -> Self {
        Self::new(variable, Relation::Equals, Literal::Boolean(value))
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn literal(&self) -> &Literal {
        &self.literal
    }

    /// The literal in its JSON form; timestamps canonicalize to RFC3339.
    pub(crate) fn literal_value(&self) -> serde_json::Value {
        match &self.literal {
            Literal::String(value) => serde_json::Value::from(value.as_str()),
            Literal::Numeric(value) => numeric_value(*value),
            Literal::Boolean(value) => serde_json::Value::from(*value),
            Literal::Timestamp(value) => serde_json::Value::from(rfc3339(value)),
        }
    }

    /// The ASL operator key, e.g. `TimestampLessThanEquals`.
    pub fn predicate_name(&self) -> String {
        format!("{}{}", self.literal.prefix(), self.relation.suffix())
    }
}

impl Comparison {
    /// NaN and infinities have no JSON form.
    pub(crate) fn ensure_finite<E: serde::ser::Error>(&self) -> Result<(), E> {
        match self.literal {
            Literal::Numeric(value) if !value.is_finite() => Err(E::custom(format!(
                "{} on {} must be a finite number",
                self.predicate_name(),
                self.variable
            ))),
            _ => Ok(()),
        }
    }
}

impl Serialize for Comparison {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.ensure_finite::<S::Error>()?;
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("Variable", &self.variable)?;
        map.serialize_entry(&self.predicate_name(), &self.literal_value())?;
        map.end()
    }
}
