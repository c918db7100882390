//! Error types for the person registry
//!
//! Every service operation fails with [`AppError`]. Store-level failures are
//! wrapped with the entity and operation they came from; validation failures
//! keep their own variant wherever they were raised.

use config::ConfigError;
use entity_store::{StoreError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{entity} with id {id} was not found")]
    NotFound { entity: String, id: String },

    #[error("Failed to {operation} {entity}: {source}")]
    Store {
        entity: String,
        operation: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Normalize a store failure for `operation` on `entity`
    pub fn from_store(entity: &str, operation: &'static str, error: StoreError) -> Self {
        match error {
            StoreError::Validation(validation) => AppError::Validation(validation),
            source => AppError::Store {
                entity: entity.to_string(),
                operation,
                source,
            },
        }
    }

    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Whether this failure means the requested row does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::NotFound { .. }
                | AppError::Store {
                    source: StoreError::NotFound { .. },
                    ..
                }
        )
    }
}
