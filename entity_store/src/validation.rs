//! Field-level validation for entities
//!
//! Validation runs before any store interaction so that invalid input never
//! consumes a connection.

use thiserror::Error;

/// Rejections of entity input, raised before touching the store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{entity}.{field} cannot be empty")]
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("{entity}.{field} must be greater than zero, got {value}")]
    NonPositive {
        entity: &'static str,
        field: &'static str,
        value: i64,
    },

    #[error("person must carry an address before it can be written")]
    MissingAddress,

    #[error("{entity} has no assigned id")]
    Unassigned { entity: &'static str },

    #[error("{entity} already has id {id}; use update instead of create")]
    AlreadyAssigned { entity: &'static str, id: String },
}

/// Entities that can check their own fields before a write
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Reject empty or whitespace-only text
pub fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { entity, field });
    }
    Ok(())
}

/// Reject zero or negative numbers
pub fn require_positive(
    entity: &'static str,
    field: &'static str,
    value: i64,
) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NonPositive {
            entity,
            field,
            value,
        });
    }
    Ok(())
}
