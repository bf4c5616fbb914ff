//! Table and column identifiers.
//!
//! Identifiers are interpolated into SQL statements, so they are restricted to
//! ASCII letters, digits and underscores, and must not start with a digit.

use serde::{Deserialize, Serialize};

/// Error returned when a name is not a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid identifier: '{0}'")]
pub struct IdentifierError(pub String);

/// A validated table or column name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Validate `name` and wrap it.
    pub fn parse(name: &str) -> Result<Self, IdentifierError> {
        if is_valid_identifier(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(IdentifierError(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Letters, digits and underscore; must not start with a digit; must not be empty.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_identifier(&value) {
            Ok(Self(value))
        } else {
            Err(IdentifierError(value))
        }
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        for name in ["users", "_tmp", "Order_Items2", "a", "A_1_b"] {
            assert!(Identifier::parse(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_identifiers() {
        for name in ["", "1bad", "has space", "semi;colon", "dash-name", "quote\"", "émoji"] {
            assert_eq!(
                Identifier::parse(name),
                Err(IdentifierError(name.to_string())),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_error_names_offender() {
        let err = Identifier::parse("1bad").unwrap_err();
        assert_eq!(err.to_string(), "Invalid identifier: '1bad'");
    }

    #[test]
    fn test_serde_validates() {
        let id: Identifier = serde_json::from_str("\"events\"").unwrap();
        assert_eq!(id.as_str(), "events");
        assert!(serde_json::from_str::<Identifier>("\"drop table\"").is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"events\"");
    }
}
