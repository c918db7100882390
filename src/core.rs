//! Core registry functionality
//!
//! This module contains the [`Registry`] coordinator, which builds the
//! connection provider, both stores and both services from one configuration.

use config::DatabaseConfig;
use entity_store::prelude::*;

use crate::errors::AppError;
use crate::service::{AddressService, PersonService};

/// Entry point that wires configuration, stores and services together
#[derive(Debug, Clone)]
pub struct Registry {
    provider: ConnectionProvider,
    addresses: AddressService,
    people: PersonService,
}

impl Registry {
    /// Create a registry from an explicit configuration. No connection is
    /// opened until the first operation.
    pub fn new(config: DatabaseConfig) -> Result<Self, AppError> {
        config.validate()?;
        let provider = ConnectionProvider::new(config)
            .map_err(|e| AppError::from_store("registry", "configure", e))?;

        let address_store = GenericStore::new(provider.clone(), AddressMapper)
            .map_err(|e| AppError::from_store("address", "configure", e))?;
        let person_store = GenericStore::new(
            provider.clone(),
            PersonMapper::new(address_store.clone()),
        )
        .map_err(|e| AppError::from_store("person", "configure", e))?;

        Ok(Self {
            addresses: AddressService::new(address_store, provider.clone()),
            people: PersonService::new(person_store, provider.clone()),
            provider,
        })
    }

    /// Create a registry from `registry.toml`, `.env` or `DB_*` variables
    pub fn from_env() -> Result<Self, AppError> {
        Self::new(DatabaseConfig::load()?)
    }

    pub fn addresses(&self) -> &AddressService {
        &self.addresses
    }

    pub fn people(&self) -> &PersonService {
        &self.people
    }

    /// Get the connection provider
    pub fn provider(&self) -> &ConnectionProvider {
        &self.provider
    }

    /// Check that the store is reachable
    pub async fn health_check(&self) -> Result<(), AppError> {
        let mut conn = self
            .provider
            .connect()
            .await
            .map_err(|e| AppError::from_store("registry", "health_check", e))?;
        let result = sqlx::query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| StoreError::query("registry", "health_check", e));
        self.provider.release(conn).await;
        result.map_err(|e| AppError::from_store("registry", "health_check", e))
    }
}
