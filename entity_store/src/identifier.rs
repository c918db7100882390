//! SQL identifier validation
//!
//! Table and column names are the only text ever concatenated into SQL; every
//! value goes through a bound parameter. Names are checked once when a store
//! is built.

use std::fmt;
use thiserror::Error;

/// Longest identifier PostgreSQL keeps without truncation
pub const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Words refused as bare table or column names
const RESERVED: &[&str] = &[
    "all", "alter", "and", "as", "by", "case", "check", "column", "constraint", "create",
    "default", "delete", "distinct", "drop", "else", "end", "false", "foreign", "from", "full",
    "group", "having", "in", "index", "inner", "insert", "join", "key", "left", "like", "limit",
    "not", "null", "offset", "on", "or", "order", "outer", "primary", "references", "returning",
    "right", "select", "table", "then", "true", "union", "unique", "update", "user", "view",
    "when", "where",
];

/// Reasons a table or column name is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier must not be empty")]
    Empty,
    #[error("identifier '{name}' has {length} characters, at most {} allowed", MAX_IDENTIFIER_LENGTH)]
    TooLong { name: String, length: usize },
    #[error("identifier '{0}' must begin with an ASCII letter or underscore")]
    BadStart(String),
    #[error("identifier '{0}' may only hold ASCII letters, digits and underscores")]
    BadCharacter(String),
    #[error("identifier '{0}' is a reserved SQL word")]
    Reserved(String),
}

/// A table or column name that is safe to place in SQL text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedIdentifier(String);

impl ValidatedIdentifier {
    pub fn new(name: &str) -> Result<Self, IdentifierError> {
        Self::validate(name)?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(name: &str) -> Result<(), IdentifierError> {
        let mut chars = name.chars();
        let first = chars.next().ok_or(IdentifierError::Empty)?;

        if name.len() > MAX_IDENTIFIER_LENGTH {
            return Err(IdentifierError::TooLong {
                name: name.to_string(),
                length: name.len(),
            });
        }
        if !(first == '_' || first.is_ascii_alphabetic()) {
            return Err(IdentifierError::BadStart(name.to_string()));
        }
        if chars.any(|c| c != '_' && !c.is_ascii_alphanumeric()) {
            return Err(IdentifierError::BadCharacter(name.to_string()));
        }
        if RESERVED.contains(&name.to_ascii_lowercase().as_str()) {
            return Err(IdentifierError::Reserved(name.to_string()));
        }
        Ok(())
    }
}

impl fmt::Display for ValidatedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_validation() {
        assert!(ValidatedIdentifier::new("person").is_ok());
        assert!(ValidatedIdentifier::new("address_id").is_ok());
        assert!(ValidatedIdentifier::new("_private").is_ok());

        assert!(ValidatedIdentifier::new("SELECT").is_err());
        assert!(ValidatedIdentifier::new("user").is_err());
        assert!(ValidatedIdentifier::new("123table").is_err());
        assert!(ValidatedIdentifier::new("person-name").is_err());
        assert_eq!(ValidatedIdentifier::new(""), Err(IdentifierError::Empty));
    }

    #[test]
    fn test_length_limit() {
        let long = "a".repeat(64);
        assert!(matches!(
            ValidatedIdentifier::new(&long),
            Err(IdentifierError::TooLong { length: 64, .. })
        ));
        assert!(ValidatedIdentifier::new(&"a".repeat(MAX_IDENTIFIER_LENGTH)).is_ok());
    }

    #[test]
    fn test_rejection_reasons() {
        assert!(matches!(
            ValidatedIdentifier::new("9lives"),
            Err(IdentifierError::BadStart(_))
        ));
        assert!(matches!(
            ValidatedIdentifier::new("person name"),
            Err(IdentifierError::BadCharacter(_))
        ));
        assert!(matches!(
            ValidatedIdentifier::new("Where"),
            Err(IdentifierError::Reserved(_))
        ));
        assert_eq!(
            IdentifierError::Reserved("user".to_string()).to_string(),
            "identifier 'user' is a reserved SQL word"
        );
    }

    #[test]
    fn test_sql_injection_prevention() {
        let malicious_names = [
            "person; DROP TABLE person; --",
            "person' OR '1'='1",
            "person/**/UNION/**/SELECT",
            "person\"; DELETE FROM person; --",
        ];

        for name in malicious_names {
            assert!(
                ValidatedIdentifier::new(name).is_err(),
                "Should reject malicious name: {}",
                name
            );
        }
    }
}
