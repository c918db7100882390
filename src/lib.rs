//! # Person Registry
//!
//! Transactional persistence of people and the addresses they own, on
//! PostgreSQL, without an ORM.
//!
//! A person and its address live in two tables. Writing a person writes its
//! address first and then the person row referencing it, on one transaction
//! owned by the service layer, so a failure on either row leaves neither.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use person_registry::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 5432, "registry".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!         30,
//!     );
//!     let registry = Registry::new(config)?;
//!
//!     let person = registry
//!         .people()
//!         .create(Person::new("Juan Perez", 30, Address::new("Godoy Cruz", "Mendoza")))
//!         .await?;
//!     println!("Created person {} living in address {:?}", person.id, person.address_id());
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;
pub mod service;

// Re-export the main public types for convenience
pub use crate::core::Registry;
pub use crate::errors::AppError;
pub use crate::service::{AddressService, GenericService, PersonService};

pub use config::{ConfigError, DatabaseConfig};

// Re-export internal crates used in the public API
pub use entity_store;

// Re-export external dependencies used in public API
pub use sqlx;
pub use async_trait;
