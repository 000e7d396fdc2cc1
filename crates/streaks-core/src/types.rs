//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The provided value contained whitespace.
    #[error("{field} cannot contain whitespace: {value:?}")]
    Whitespace { field: &'static str, value: String },
}

/// Integer day under the fixed day-boundary rule.
///
/// Only differences between day numbers are meaningful.
pub type DayNumber = i64;

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                if id.chars().any(char::is_whitespace) {
                    return Err(ValidationError::Whitespace {
                        field: $field_name,
                        value: id,
                    });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated activity identifier.
    ///
    /// Activity IDs group events into one activity's history. They are typed
    /// on the command line, so they must be non-empty and free of whitespace.
    ActivityId, "activity ID"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_id_rejects_empty() {
        assert_eq!(
            ActivityId::new(""),
            Err(ValidationError::Empty {
                field: "activity ID"
            })
        );
    }

    #[test]
    fn activity_id_rejects_whitespace() {
        let err = ActivityId::new("push ups").unwrap_err();
        assert_eq!(
            err.to_string(),
            "activity ID cannot contain whitespace: \"push ups\""
        );
    }

    #[test]
    fn activity_id_serde_roundtrip() {
        let id = ActivityId::new("nitrotype").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"nitrotype\"");

        let parsed: ActivityId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn activity_id_deserialize_validates() {
        let result: Result<ActivityId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn activity_ids_order_lexicographically() {
        let a = ActivityId::new("english").unwrap();
        let b = ActivityId::new("nitrotype").unwrap();
        assert!(a < b);
    }
}
