//! Generic service layer
//!
//! The service owns the transaction boundary. Each write walks
//! `open connection -> begin -> participating store call -> commit | rollback
//! -> close`, and the connection is closed on every path. Input is validated
//! before a connection is opened. Reads run as single auto-commit statements.

use crate::errors::AppError;
use entity_store::prelude::*;
use sqlx::postgres::PgConnection;
use sqlx::Connection;

/// CRUD with validation and transaction demarcation for one entity type
#[derive(Debug, Clone)]
pub struct GenericService<S: EntityStore> {
    store: S,
    provider: ConnectionProvider,
}

impl<S> GenericService<S>
where
    S: EntityStore,
    S::Entity: Validate,
{
    pub fn new(store: S, provider: ConnectionProvider) -> Self {
        Self { store, provider }
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    fn entity_name(&self) -> &'static str {
        self.store.table_name()
    }

    fn fail(&self, operation: &'static str, error: StoreError) -> AppError {
        if !matches!(error, StoreError::Validation(_)) {
            tracing::error!(
                "Store error during {} on {}: {}",
                operation,
                self.entity_name(),
                error
            );
        }
        AppError::from_store(self.entity_name(), operation, error)
    }

    fn require_assigned(&self, id: S::Id) -> Result<(), AppError> {
        if !id.is_assigned() {
            return Err(ValidationError::Unassigned {
                entity: self.entity_name(),
            }
            .into());
        }
        Ok(())
    }

    async fn open(&self, operation: &'static str) -> Result<PgConnection, AppError> {
        self.provider
            .connect()
            .await
            .map_err(|e| self.fail(operation, e))
    }

    pub async fn create(&self, entity: S::Entity) -> Result<S::Entity, AppError> {
        entity.validate()?;

        let mut conn = self.open("create").await?;
        let result = match conn.begin().await {
            Ok(mut tx) => {
                let outcome = self.store.create_in(&mut tx, entity).await;
                settle(tx, outcome).await
            }
            Err(e) => Err(StoreError::transaction("begin", e)),
        };
        self.provider.release(conn).await;

        let created = result.map_err(|e| self.fail("create", e))?;
        crate::debug_log!(
            "Created {} {}",
            self.entity_name(),
            self.store.extract_id(&created)
        );
        Ok(created)
    }

    /// Raw lookup: a missing row is `Ok(None)`
    pub async fn read(&self, id: S::Id) -> Result<Option<S::Entity>, AppError> {
        self.require_assigned(id)?;
        self.store.read(id).await.map_err(|e| self.fail("read", e))
    }

    /// Lookup where a missing row is an error
    pub async fn find_by_id(&self, id: S::Id) -> Result<S::Entity, AppError> {
        self.read(id)
            .await?
            .ok_or_else(|| AppError::not_found(self.entity_name(), id))
    }

    pub async fn update(&self, entity: S::Entity) -> Result<S::Entity, AppError> {
        self.check_update(&entity)?;
        self.write_update(entity).await
    }

    /// Checks an update must pass before any connection is opened
    pub(crate) fn check_update(&self, entity: &S::Entity) -> Result<(), AppError> {
        entity.validate()?;
        self.require_assigned(self.store.extract_id(entity))
    }

    /// Update an entity that already passed [`Self::check_update`]
    pub(crate) async fn write_update(&self, entity: S::Entity) -> Result<S::Entity, AppError> {
        let mut conn = self.open("update").await?;
        let result = match conn.begin().await {
            Ok(mut tx) => {
                let outcome = self.store.update_in(&mut tx, entity).await;
                settle(tx, outcome).await
            }
            Err(e) => Err(StoreError::transaction("begin", e)),
        };
        self.provider.release(conn).await;

        result.map_err(|e| self.fail("update", e))
    }

    /// Delete by id. Deleting an id with no row succeeds.
    pub async fn delete(&self, id: S::Id) -> Result<(), AppError> {
        self.require_assigned(id)?;

        let mut conn = self.open("delete").await?;
        let result = match conn.begin().await {
            Ok(mut tx) => {
                let outcome = self.store.delete_in(&mut tx, id).await;
                settle(tx, outcome).await
            }
            Err(e) => Err(StoreError::transaction("begin", e)),
        };
        self.provider.release(conn).await;

        result.map_err(|e| self.fail("delete", e))
    }

    pub async fn find_all(&self) -> Result<Vec<S::Entity>, AppError> {
        self.store.find_all().await.map_err(|e| self.fail("find_all", e))
    }
}
