use crate::validation::{require_text, Validate, ValidationError};
use serde::{Deserialize, Serialize};

/// A postal location. Identity 0 means the row has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: i32,
    pub locality: String,
    pub region: String,
}

impl Address {
    pub fn new(locality: impl Into<String>, region: impl Into<String>) -> Self {
        Self::with_id(0, locality, region)
    }

    pub fn with_id(id: i32, locality: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            id,
            locality: locality.into(),
            region: region.into(),
        }
    }
}

impl Validate for Address {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("address", "locality", &self.locality)?;
        require_text("address", "region", &self.region)
    }
}
