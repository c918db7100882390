//! Generic store implementations
//!
//! This module implements the [`EntityStore`] contract once for every mapper.

use super::core::GenericStore;
use super::transaction::settle;
use crate::errors::StoreError;
use crate::traits::{EntityMapper, EntityStore};
use async_trait::async_trait;
use sqlx::postgres::PgConnection;
use sqlx::{Connection, Postgres, Row, Transaction};

impl<M: EntityMapper> GenericStore<M> {
    /// Single-row lookup on a connection the caller holds
    pub(crate) async fn read_on(
        &self,
        conn: &mut PgConnection,
        id: M::Id,
    ) -> Result<Option<M::Entity>, StoreError> {
        let table = self.table.as_str();
        crate::trace_log!("[READ] {} with id {}", self.select_by_id_sql, id);

        let row = sqlx::query(&self.select_by_id_sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| StoreError::query(table, "read", e))?;

        match row {
            Some(row) => self
                .mapper
                .map_row(&row)
                .map(Some)
                .map_err(|e| StoreError::query(table, "map_row", e)),
            None => self.mapper.read_unjoined(conn, id).await,
        }
    }

    async fn find_all_on(&self, conn: &mut PgConnection) -> Result<Vec<M::Entity>, StoreError> {
        let table = self.table.as_str();
        crate::trace_log!("[FIND_ALL] {}", self.select_all_sql);

        let rows = sqlx::query(&self.select_all_sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| StoreError::query(table, "find_all", e))?;

        rows.iter()
            .map(|row| self.mapper.map_row(row))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::query(table, "map_row", e))
    }
}

#[async_trait]
impl<M> EntityStore for GenericStore<M>
where
    M: EntityMapper,
{
    type Entity = M::Entity;
    type Id = M::Id;

    fn table_name(&self) -> &'static str {
        self.mapper.table_name()
    }

    fn extract_id(&self, entity: &Self::Entity) -> Self::Id {
        self.mapper.extract_id(entity)
    }

    async fn create(&self, entity: Self::Entity) -> Result<Self::Entity, StoreError> {
        let mut conn = self.provider.connect().await?;
        let result = match conn.begin().await {
            Ok(mut tx) => {
                let outcome = self.create_in(&mut tx, entity).await;
                settle(tx, outcome).await
            }
            Err(e) => Err(StoreError::transaction("begin", e)),
        };
        self.provider.release(conn).await;
        result
    }

    async fn read(&self, id: Self::Id) -> Result<Option<Self::Entity>, StoreError> {
        let mut conn = self.provider.connect().await?;
        let result = self.read_on(&mut conn, id).await;
        self.provider.release(conn).await;
        result
    }

    async fn update(&self, entity: Self::Entity) -> Result<Self::Entity, StoreError> {
        let mut conn = self.provider.connect().await?;
        let result = match conn.begin().await {
            Ok(mut tx) => {
                let outcome = self.update_in(&mut tx, entity).await;
                settle(tx, outcome).await
            }
            Err(e) => Err(StoreError::transaction("begin", e)),
        };
        self.provider.release(conn).await;
        result
    }

    async fn delete(&self, id: Self::Id) -> Result<(), StoreError> {
        let mut conn = self.provider.connect().await?;
        let result = match conn.begin().await {
            Ok(mut tx) => {
                let outcome = self.delete_in(&mut tx, id).await;
                settle(tx, outcome).await
            }
            Err(e) => Err(StoreError::transaction("begin", e)),
        };
        self.provider.release(conn).await;
        result
    }

    async fn find_all(&self) -> Result<Vec<Self::Entity>, StoreError> {
        let mut conn = self.provider.connect().await?;
        let result = self.find_all_on(&mut conn).await;
        self.provider.release(conn).await;
        result
    }

    async fn create_in(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut entity: Self::Entity,
    ) -> Result<Self::Entity, StoreError> {
        let table = self.table.as_str();
        self.mapper.before_write(tx, &mut entity).await?;

        crate::debug_log!("[CREATE] Inserting into {}", table);
        let row = self
            .mapper
            .build_insert(&entity)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| StoreError::query(table, "create", e))?
            .ok_or_else(|| StoreError::no_rows_affected(table))?;

        let id: M::Id = row
            .try_get(0)
            .map_err(|e| StoreError::query(table, "create", e))?;
        self.mapper.assign_id(&mut entity, id);
        crate::debug_log!("[CREATE] {} row assigned id {}", table, id);

        Ok(entity)
    }

    async fn update_in(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut entity: Self::Entity,
    ) -> Result<Self::Entity, StoreError> {
        let table = self.table.as_str();
        self.mapper.before_write(tx, &mut entity).await?;

        let id = self.mapper.extract_id(&entity);
        crate::debug_log!("[UPDATE] {} row {}", table, id);
        let result = self
            .mapper
            .build_update(&entity)
            .execute(&mut **tx)
            .await
            .map_err(|e| StoreError::query(table, "update", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(table, id));
        }
        Ok(entity)
    }

    async fn delete_in(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Self::Id,
    ) -> Result<(), StoreError> {
        let table = self.table.as_str();
        let result = sqlx::query(&self.delete_sql)
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(|e| StoreError::query(table, "delete", e))?;

        if result.rows_affected() == 0 {
            tracing::info!("No {} row with id {} to delete", table, id);
        }
        Ok(())
    }
}
