use super::Address;
use crate::validation::{require_positive, require_text, Validate, ValidationError};
use serde::{Deserialize, Serialize};

/// A person together with the address it owns for write purposes.
///
/// `address` is only `None` for rows read back with a dangling foreign key;
/// every write requires it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub address: Option<Address>,
}

impl Person {
    pub fn new(name: impl Into<String>, age: i32, address: Address) -> Self {
        Self {
            id: 0,
            name: name.into(),
            age,
            address: Some(address),
        }
    }

    /// Foreign key into the address table, if the address has been persisted
    pub fn address_id(&self) -> Option<i32> {
        self.address.as_ref().map(|a| a.id).filter(|id| *id > 0)
    }
}

impl Validate for Person {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("person", "name", &self.name)?;
        require_positive("person", "age", i64::from(self.age))?;
        self.address
            .as_ref()
            .ok_or(ValidationError::MissingAddress)?
            .validate()
    }
}
