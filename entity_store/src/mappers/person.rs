//! Person persistence
//!
//! Every read joins `person` with `address`. Every write first resolves the
//! embedded address on the same transaction (insert when it has no identity,
//! update otherwise) and only then writes the person row that references it.

use super::address::AddressStore;
use crate::errors::StoreError;
use crate::generic_store::GenericStore;
use crate::identity::Identity;
use crate::model::{Address, Person};
use crate::traits::{EntityMapper, EntityStore};
use crate::validation::ValidationError;
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgConnection, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row, Transaction};

const SELECT_SQL: &str = "SELECT p.id, p.name, p.age, p.address_id, a.locality, a.region \
     FROM person p INNER JOIN address a ON p.address_id = a.id";
const SELECT_UNJOINED_SQL: &str = "SELECT id, name, age, address_id FROM person WHERE id = $1";
const INSERT_SQL: &str = "INSERT INTO person (name, age, address_id) VALUES ($1, $2, $3) RETURNING id";
const UPDATE_SQL: &str = "UPDATE person SET name = $1, age = $2, address_id = $3 WHERE id = $4";

/// Maps [`Person`] onto `person` joined with `address`
#[derive(Debug, Clone)]
pub struct PersonMapper {
    addresses: AddressStore,
}

/// Store for people and, transitively, the addresses they own
pub type PersonStore = GenericStore<PersonMapper>;

impl PersonMapper {
    pub fn new(addresses: AddressStore) -> Self {
        Self { addresses }
    }
}

#[async_trait]
impl EntityMapper for PersonMapper {
    type Entity = Person;
    type Id = i32;

    fn table_name(&self) -> &'static str {
        "person"
    }

    fn qualified_id_column(&self) -> String {
        "p.id".to_string()
    }

    fn select_sql(&self) -> String {
        SELECT_SQL.to_string()
    }

    fn map_row(&self, row: &PgRow) -> Result<Person, sqlx::Error> {
        let id: i32 = row.try_get("id")?;
        let address_id: i32 = row.try_get("address_id")?;
        let locality: Option<String> = row.try_get("locality")?;
        let region: Option<String> = row.try_get("region")?;

        let address = match (locality, region) {
            (Some(locality), Some(region)) => Some(Address::with_id(address_id, locality, region)),
            _ => {
                tracing::warn!(
                    "Integrity anomaly: person {} has no readable address row {}",
                    id,
                    address_id
                );
                None
            }
        };

        Ok(Person {
            id,
            name: row.try_get("name")?,
            age: row.try_get("age")?,
            address,
        })
    }

    fn build_insert<'q>(&self, person: &'q Person) -> Query<'q, Postgres, PgArguments> {
        sqlx::query(INSERT_SQL)
            .bind(person.name.as_str())
            .bind(person.age)
            .bind(person.address_id())
    }

    fn build_update<'q>(&self, person: &'q Person) -> Query<'q, Postgres, PgArguments> {
        sqlx::query(UPDATE_SQL)
            .bind(person.name.as_str())
            .bind(person.age)
            .bind(person.address_id())
            .bind(person.id)
    }

    fn extract_id(&self, person: &Person) -> i32 {
        person.id
    }

    fn assign_id(&self, person: &mut Person, id: i32) {
        person.id = id;
    }

    /// Resolve the embedded address on the caller's transaction so that a
    /// failure writing the person also undoes the address write
    async fn before_write(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        person: &mut Person,
    ) -> Result<(), StoreError> {
        let address = person
            .address
            .take()
            .ok_or(ValidationError::MissingAddress)?;

        let address = if address.id.is_assigned() {
            self.addresses.update_in(tx, address).await?
        } else {
            self.addresses.create_in(tx, address).await?
        };

        person.address = Some(address);
        Ok(())
    }

    async fn read_unjoined(
        &self,
        conn: &mut PgConnection,
        id: i32,
    ) -> Result<Option<Person>, StoreError> {
        let row = sqlx::query(SELECT_UNJOINED_SQL)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| StoreError::query("person", "read_unjoined", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let decode = |row: &PgRow| -> Result<(Person, i32), sqlx::Error> {
            let person = Person {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                age: row.try_get("age")?,
                address: None,
            };
            Ok((person, row.try_get("address_id")?))
        };
        let (person, address_id) =
            decode(&row).map_err(|e| StoreError::query("person", "map_row", e))?;

        tracing::warn!(
            "Integrity anomaly: person {} references missing address {}; returning it without an address",
            person.id,
            address_id
        );
        Ok(Some(person))
    }
}
