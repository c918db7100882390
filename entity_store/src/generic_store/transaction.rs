//! Transaction settling
//!
//! A transaction is opened on a connection the caller owns; once the work on
//! it has produced an outcome, [`settle`] commits or rolls back. Ending the
//! transaction returns the connection to auto-commit mode.

use crate::errors::StoreError;
use sqlx::{Postgres, Transaction};

/// Commit on success, roll back on failure.
///
/// A rollback that itself fails is logged and the original error is returned.
/// A failed commit is reported; sqlx rolls the transaction back when it is
/// dropped.
pub async fn settle<T>(
    tx: Transaction<'_, Postgres>,
    outcome: Result<T, StoreError>,
) -> Result<T, StoreError> {
    match outcome {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|e| StoreError::transaction("commit", e))?;
            crate::trace_log!("Transaction committed");
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback_error) = tx.rollback().await {
                tracing::error!(
                    "Rollback failed after '{}': {}",
                    error,
                    rollback_error
                );
            } else {
                crate::debug_log!("Transaction rolled back after: {}", error);
            }
            Err(error)
        }
    }
}
