//! Per-entity mapping hooks
//!
//! This module defines the capability a concrete entity supplies so that
//! [`GenericStore`](crate::GenericStore) can persist it.

use crate::errors::StoreError;
use crate::identity::Identity;
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgConnection, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Transaction};
use std::fmt::Debug;

/// Row mapping and statement construction for one entity type
///
/// The generic store owns connections, transactions and affected-row checks;
/// a mapper only knows its table layout.
///
/// ```ignore
/// #[derive(Debug, Clone)]
/// struct TagMapper;
///
/// #[async_trait]
/// impl EntityMapper for TagMapper {
///     type Entity = Tag;
///     type Id = i32;
///
///     fn table_name(&self) -> &'static str { "tag" }
///     fn map_row(&self, row: &PgRow) -> Result<Tag, sqlx::Error> { /* ... */ }
///     fn build_insert<'q>(&self, tag: &'q Tag) -> Query<'q, Postgres, PgArguments> {
///         sqlx::query("INSERT INTO tag (label) VALUES ($1) RETURNING id").bind(tag.label.as_str())
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait EntityMapper: Send + Sync + Debug {
    /// The entity this mapper reads and writes
    type Entity: Clone + Send + Sync + Debug + Unpin + 'static;

    /// The type used for the primary key
    type Id: Identity;

    /// The table name in the database
    fn table_name(&self) -> &'static str;

    /// Get the primary key column name
    fn id_column(&self) -> &'static str {
        "id"
    }

    /// Primary key column as it must appear in the WHERE clause of
    /// [`select_sql`](Self::select_sql)
    fn qualified_id_column(&self) -> String {
        self.id_column().to_string()
    }

    /// SELECT statement without a WHERE clause, used for listing and,
    /// with an id filter appended, for single-row reads
    fn select_sql(&self) -> String {
        format!("SELECT * FROM {}", self.table_name())
    }

    /// Build an entity from one row of [`select_sql`](Self::select_sql)
    fn map_row(&self, row: &PgRow) -> Result<Self::Entity, sqlx::Error>;

    /// INSERT statement with bound values. It must end in `RETURNING <id>`
    /// so the generated identity can be assigned back.
    fn build_insert<'q>(&self, entity: &'q Self::Entity) -> Query<'q, Postgres, PgArguments>;

    /// UPDATE statement with bound values, keyed by the entity's identity
    fn build_update<'q>(&self, entity: &'q Self::Entity) -> Query<'q, Postgres, PgArguments>;

    /// Extract ID from entity
    fn extract_id(&self, entity: &Self::Entity) -> Self::Id;

    /// Store a generated identity on the entity
    fn assign_id(&self, entity: &mut Self::Entity, id: Self::Id);

    /// Runs inside the caller's transaction before the entity's own row is
    /// written. Mappers of aggregates persist dependent rows here.
    async fn before_write(
        &self,
        _tx: &mut Transaction<'_, Postgres>,
        _entity: &mut Self::Entity,
    ) -> Result<(), StoreError> {
        Ok(())
    }

    /// Fallback for a read whose SELECT returned nothing. Mappers whose
    /// SELECT joins other tables can look for the bare row here.
    async fn read_unjoined(
        &self,
        _conn: &mut PgConnection,
        _id: Self::Id,
    ) -> Result<Option<Self::Entity>, StoreError> {
        Ok(None)
    }
}
