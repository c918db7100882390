use crate::identifier::IdentifierError;
use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No rows affected writing to {table}")]
    NoRowsAffected { table: String },

    #[error("No row in {table} with id {id}")]
    NotFound { table: String, id: String },

    #[error("Connection failure: {0}")]
    ConnectionFailure(String),

    #[error("Query '{operation}' on {table} failed: {source}")]
    Query {
        table: String,
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Transaction {stage} failed: {source}")]
    Transaction {
        stage: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid SQL identifier: {0}")]
    Identifier(#[from] IdentifierError),
}

impl StoreError {
    pub fn query(table: &str, operation: &'static str, source: sqlx::Error) -> Self {
        StoreError::Query {
            table: table.to_string(),
            operation,
            source,
        }
    }

    pub fn not_found(table: &str, id: impl ToString) -> Self {
        StoreError::NotFound {
            table: table.to_string(),
            id: id.to_string(),
        }
    }

    pub fn no_rows_affected(table: &str) -> Self {
        StoreError::NoRowsAffected {
            table: table.to_string(),
        }
    }

    pub fn transaction(stage: &'static str, source: sqlx::Error) -> Self {
        StoreError::Transaction { stage, source }
    }
}
