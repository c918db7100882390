use crate::connection::ConnectionProvider;
use crate::errors::StoreError;
use crate::identifier::ValidatedIdentifier;
use crate::traits::EntityMapper;

/// Generic database store that implements [`EntityStore`](crate::EntityStore)
/// for any [`EntityMapper`]
#[derive(Clone)]
pub struct GenericStore<M: EntityMapper> {
    pub(crate) provider: ConnectionProvider,
    pub(crate) mapper: M,
    pub(crate) table: ValidatedIdentifier,
    pub(crate) select_all_sql: String,
    pub(crate) select_by_id_sql: String,
    pub(crate) delete_sql: String,
}

impl<M: EntityMapper> std::fmt::Debug for GenericStore<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericStore")
            .field("table", &self.table.as_str())
            .field("mapper", &self.mapper)
            .finish()
    }
}

impl<M: EntityMapper> GenericStore<M> {
    /// Build a store, validating the mapper's table and key names and
    /// preparing the statements the store generates itself
    pub fn new(provider: ConnectionProvider, mapper: M) -> Result<Self, StoreError> {
        let table = ValidatedIdentifier::new(mapper.table_name())?;
        let id_column = ValidatedIdentifier::new(mapper.id_column())?;

        let select_all_sql = mapper.select_sql();
        let select_by_id_sql = format!(
            "{} WHERE {} = $1",
            select_all_sql,
            mapper.qualified_id_column()
        );
        let delete_sql = format!("DELETE FROM {} WHERE {} = $1", table, id_column);

        Ok(Self {
            provider,
            mapper,
            table,
            select_all_sql,
            select_by_id_sql,
            delete_sql,
        })
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Get a reference to the connection provider
    pub fn provider(&self) -> &ConnectionProvider {
        &self.provider
    }
}
