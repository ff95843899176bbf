//! Error names matched by retriers and catchers.

use serde::{Serialize, Serializer};
use std::fmt;

/// An ASL error name. The reserved `States.*` names are variants; anything
/// else a task may raise is `Custom`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorName {
    /// `States.ALL`, the wildcard. Must appear alone and last.
    All,
    /// A task ran longer than `TimeoutSeconds` or missed a heartbeat.
    Timeout,
    TaskFailed,
    /// The task lacked privileges to run its code.
    Permissions,
    ResultPathMatchFailure,
    /// A branch of a Parallel state failed.
    BranchFailed,
    NoChoiceMatched,
    Custom(String),
}

impl ErrorName {
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "States.ALL",
            Self::Timeout => "States.Timeout",
            Self::TaskFailed => "States.TaskFailed",
            Self::Permissions => "States.Permissions",
            Self::ResultPathMatchFailure => "States.ResultPathMatchFailure",
            Self::BranchFailed => "States.BranchFailed",
            Self::NoChoiceMatched => "States.NoChoiceMatched",
            Self::Custom(name) => name,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<&str> for ErrorName {
    fn from(name: &str) -> Self {
        match name {
            "States.ALL" => Self::All,
            "States.Timeout" => Self::Timeout,
            "States.TaskFailed" => Self::TaskFailed,
            "States.Permissions" => Self::Permissions,
            "States.ResultPathMatchFailure" => Self::ResultPathMatchFailure,
            "States.BranchFailed" => Self::BranchFailed,
            "States.NoChoiceMatched" => Self::NoChoiceMatched,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for ErrorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_names_round_trip_through_str() {
        for name in [
            ErrorName::All,
            ErrorName::Timeout,
            ErrorName::TaskFailed,
            ErrorName::Permissions,
            ErrorName::ResultPathMatchFailure,
            ErrorName::BranchFailed,
            ErrorName::NoChoiceMatched,
        ] {
            assert_eq!(ErrorName::from(name.as_str()), name);
        }
    }

    #[test]
    fn custom_names_pass_through() {
        let name = ErrorName::from("PaymentDeclined");
        assert_eq!(name, ErrorName::Custom("PaymentDeclined".to_string()));
        assert_eq!(name.to_string(), "PaymentDeclined");
        assert!(!name.is_wildcard());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&ErrorName::All).unwrap();
        assert_eq!(json, "\"States.ALL\"");
    }
}
