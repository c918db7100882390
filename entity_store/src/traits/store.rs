//! Trait definitions
//!
//! This module defines the persistence contract shared by all entity stores.

use crate::errors::StoreError;
use crate::identity::Identity;
use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use std::fmt::Debug;

/// CRUD operations for one entity type
///
/// Writes come in two forms. The standalone form (`create`, `update`,
/// `delete`) opens a connection and a transaction of its own and closes both
/// before returning. The participating form (`create_in`, `update_in`,
/// `delete_in`) runs on a transaction owned by the caller, who alone decides
/// to commit or roll back. Anything that needs several rows written
/// atomically must use the participating form throughout.
#[async_trait]
pub trait EntityStore: Send + Sync + Debug {
    /// The entity this store persists
    type Entity: Clone + Send + Sync + Debug + 'static;

    /// The ID type used for this entity
    type Id: Identity;

    /// Table backing this store, for error reporting
    fn table_name(&self) -> &'static str;

    /// Identity of an in-memory entity
    fn extract_id(&self, entity: &Self::Entity) -> Self::Id;

    /// Insert a new row and return the entity carrying its generated id
    async fn create(&self, entity: Self::Entity) -> Result<Self::Entity, StoreError>;

    /// Get an entity by its ID; a missing row is `Ok(None)`
    async fn read(&self, id: Self::Id) -> Result<Option<Self::Entity>, StoreError>;

    /// Update the row keyed by the entity's id; a missing row is `NotFound`
    async fn update(&self, entity: Self::Entity) -> Result<Self::Entity, StoreError>;

    /// Delete by ID. Deleting an id that does not exist is a no-op.
    async fn delete(&self, id: Self::Id) -> Result<(), StoreError>;

    /// List all entities of this type
    async fn find_all(&self) -> Result<Vec<Self::Entity>, StoreError>;

    /// [`create`](Self::create) on the caller's transaction
    async fn create_in(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entity: Self::Entity,
    ) -> Result<Self::Entity, StoreError>;

    /// [`update`](Self::update) on the caller's transaction
    async fn update_in(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entity: Self::Entity,
    ) -> Result<Self::Entity, StoreError>;

    /// [`delete`](Self::delete) on the caller's transaction
    async fn delete_in(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Self::Id,
    ) -> Result<(), StoreError>;
}
