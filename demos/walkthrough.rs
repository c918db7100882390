//! # Registry Walkthrough
//!
//! Runs the full person/address lifecycle against a live database:
//! - create an address, then a person living there
//! - read the person back through the joined query
//! - update the person, then delete it twice
//!
//! Configure the database with `registry.toml`, a `.env` file or `DB_*`
//! variables (see the `config` crate), and create the tables first:
//!
//! ```sql
//! CREATE TABLE address (id SERIAL PRIMARY KEY, locality VARCHAR(100) NOT NULL, region VARCHAR(100) NOT NULL);
//! CREATE TABLE person (id SERIAL PRIMARY KEY, name VARCHAR(100) NOT NULL, age INTEGER NOT NULL,
//!                      address_id INTEGER NOT NULL REFERENCES address(id));
//! ```

use anyhow::Context;
use person_registry::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let registry = Registry::from_env().context("failed to configure the registry")?;
    registry
        .health_check()
        .await
        .context("database is not reachable")?;

    let address = registry
        .addresses()
        .create(Address::new("Godoy Cruz", "Mendoza"))
        .await?;
    tracing::info!("Created address {}: {}, {}", address.id, address.locality, address.region);

    let person = registry
        .people()
        .create(Person::new("Juan Perez", 30, address))
        .await?;
    tracing::info!("Created person {} ({})", person.id, person.name);

    let mut found = registry.people().find_by_id(person.id).await?;
    tracing::info!("Read back: {:?}", found);

    found.age = 31;
    let updated = registry.people().update(found).await?;
    tracing::info!("Updated age to {}", updated.age);

    for person in registry.people().find_all().await? {
        tracing::info!("Listed: {} {} {:?}", person.id, person.name, person.address);
    }

    registry.people().delete(person.id).await?;
    match registry.people().find_by_id(person.id).await {
        Err(e) if e.is_not_found() => tracing::info!("Person {} is gone", person.id),
        other => anyhow::bail!("expected not-found after delete, got {:?}", other),
    }
    registry.people().delete(person.id).await?;
    tracing::info!("Deleting again is a no-op");

    Ok(())
}
