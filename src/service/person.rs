use super::base::GenericService;
use crate::errors::AppError;
use entity_store::prelude::*;

/// Person operations on top of the generic service.
///
/// Creating refuses a person that already carries an identity, and updating
/// first checks that the person row still exists.
#[derive(Debug, Clone)]
pub struct PersonService {
    base: GenericService<PersonStore>,
}

impl PersonService {
    pub fn new(store: PersonStore, provider: ConnectionProvider) -> Self {
        Self {
            base: GenericService::new(store, provider),
        }
    }

    pub fn store(&self) -> &PersonStore {
        self.base.store()
    }

    /// Insert the person and, on the same transaction, insert or update its address
    pub async fn create(&self, person: Person) -> Result<Person, AppError> {
        if person.id.is_assigned() {
            return Err(ValidationError::AlreadyAssigned {
                entity: "person",
                id: person.id.to_string(),
            }
            .into());
        }
        self.base.create(person).await
    }

    pub async fn read(&self, id: i32) -> Result<Option<Person>, AppError> {
        self.base.read(id).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Person, AppError> {
        self.base.find_by_id(id).await
    }

    /// Update an existing person. An address with no identity is inserted as
    /// a new row; any other address is overwritten in place.
    pub async fn update(&self, person: Person) -> Result<Person, AppError> {
        self.base.check_update(&person)?;
        if self.base.read(person.id).await?.is_none() {
            return Err(AppError::not_found("person", person.id));
        }
        self.base.write_update(person).await
    }

    /// Delete the person row. Its address row is left in place.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.base.delete(id).await
    }

    pub async fn find_all(&self) -> Result<Vec<Person>, AppError> {
        self.base.find_all().await
    }
}
