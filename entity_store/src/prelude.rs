//! Convenience re-exports for common entity-store usage

// Core traits
pub use crate::traits::{EntityMapper, EntityStore};

// Error types
pub use crate::errors::StoreError;
pub use crate::validation::{Validate, ValidationError};

// Core store functionality
pub use crate::connection::ConnectionProvider;
pub use crate::generic_store::{settle, GenericStore};
pub use crate::identity::Identity;

// Entities and their stores
pub use crate::mappers::{AddressMapper, AddressStore, PersonMapper, PersonStore};
pub use crate::model::{Address, Person};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use sqlx::{Postgres, Row, Transaction};
