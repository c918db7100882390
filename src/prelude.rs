//! Convenience re-exports for common registry usage
//!
//! ```rust
//! use person_registry::prelude::*;
//! ```

// Core registry components
pub use crate::core::Registry;
pub use crate::errors::AppError;
pub use crate::service::{AddressService, GenericService, PersonService};

// Configuration
pub use config::{ConfigError, DatabaseConfig};

// Entities, stores and store traits
pub use entity_store::prelude::*;

// Common external dependencies
pub use anyhow;
pub use tokio;
