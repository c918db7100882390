use crate::generic_store::GenericStore;
use crate::model::Address;
use crate::traits::EntityMapper;
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row};

const INSERT_SQL: &str = "INSERT INTO address (locality, region) VALUES ($1, $2) RETURNING id";
const UPDATE_SQL: &str = "UPDATE address SET locality = $1, region = $2 WHERE id = $3";

/// Maps [`Address`] onto the single `address` table
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressMapper;

/// Store for addresses, usable on its own or inside a person write
pub type AddressStore = GenericStore<AddressMapper>;

#[async_trait]
impl EntityMapper for AddressMapper {
    type Entity = Address;
    type Id = i32;

    fn table_name(&self) -> &'static str {
        "address"
    }

    fn select_sql(&self) -> String {
        "SELECT id, locality, region FROM address".to_string()
    }

    fn map_row(&self, row: &PgRow) -> Result<Address, sqlx::Error> {
        Ok(Address {
            id: row.try_get("id")?,
            locality: row.try_get("locality")?,
            region: row.try_get("region")?,
        })
    }

    fn build_insert<'q>(&self, address: &'q Address) -> Query<'q, Postgres, PgArguments> {
        sqlx::query(INSERT_SQL)
            .bind(address.locality.as_str())
            .bind(address.region.as_str())
    }

    fn build_update<'q>(&self, address: &'q Address) -> Query<'q, Postgres, PgArguments> {
        sqlx::query(UPDATE_SQL)
            .bind(address.locality.as_str())
            .bind(address.region.as_str())
            .bind(address.id)
    }

    fn extract_id(&self, address: &Address) -> i32 {
        address.id
    }

    fn assign_id(&self, address: &mut Address, id: i32) {
        address.id = id;
    }
}
