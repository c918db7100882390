//! Shared fixtures for database-backed tests
//!
//! Tests run against the PostgreSQL instance named by `DATABASE_URL` and
//! return early when it is unset. Tables are created on first use; rows are
//! never dropped, so every test tags its data with a unique marker and only
//! asserts on rows carrying that marker.

#![allow(dead_code)]

use person_registry::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const SCHEMA_LOCK_KEY: i64 = 7_240_610;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS address (
        id SERIAL PRIMARY KEY,
        locality VARCHAR(100) NOT NULL,
        region VARCHAR(100) NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS person (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        age INTEGER NOT NULL,
        address_id INTEGER NOT NULL REFERENCES address(id)
    )",
];

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Schema whose `person` table has no foreign key, so a person row may
/// reference an address that does not exist
pub const ORPHAN_SCHEMA: &str = "registry_orphans";

const ORPHAN_SCHEMA_DDL: &[&str] = &[
    "CREATE SCHEMA IF NOT EXISTS registry_orphans",
    "CREATE TABLE IF NOT EXISTS registry_orphans.address (
        id SERIAL PRIMARY KEY,
        locality VARCHAR(100) NOT NULL,
        region VARCHAR(100) NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS registry_orphans.person (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        age INTEGER NOT NULL,
        address_id INTEGER NOT NULL
    )",
];

/// Registry connected to `DATABASE_URL`, or `None` when no database is configured
pub async fn registry() -> Option<Registry> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping database-backed test");
        return None;
    };

    let registry = Registry::new(DatabaseConfig::from_url(database_url))
        .expect("DATABASE_URL must be a valid postgres URL");
    ensure_schema(registry.provider(), SCHEMA).await;
    Some(registry)
}

/// Registry whose connections resolve unqualified tables in [`ORPHAN_SCHEMA`]
pub async fn orphan_registry() -> Option<Registry> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping database-backed test");
        return None;
    };

    let base = Registry::new(DatabaseConfig::from_url(database_url.clone()))
        .expect("DATABASE_URL must be a valid postgres URL");
    ensure_schema(base.provider(), ORPHAN_SCHEMA_DDL).await;

    let separator = if database_url.contains('?') { '&' } else { '?' };
    let url = format!(
        "{}{}options=-c%20search_path%3D{}",
        database_url, separator, ORPHAN_SCHEMA
    );
    Some(Registry::new(DatabaseConfig::from_url(url)).expect("search_path URL must be valid"))
}

async fn ensure_schema(provider: &ConnectionProvider, statements: &[&str]) {
    let mut conn = provider
        .connect()
        .await
        .expect("Failed to connect to database");

    // Serialize concurrent CREATE ... IF NOT EXISTS from parallel tests
    sqlx::query("SELECT pg_advisory_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut conn)
        .await
        .expect("Failed to take schema lock");
    for statement in statements {
        sqlx::query(statement)
            .execute(&mut conn)
            .await
            .expect("Failed to create schema");
    }
    sqlx::query("SELECT pg_advisory_unlock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut conn)
        .await
        .expect("Failed to release schema lock");

    provider.release(conn).await;
}

/// Insert a person row straight into the table, bypassing the address cascade
pub async fn insert_raw_person(registry: &Registry, name: &str, age: i32, address_id: i32) -> i32 {
    let provider = registry.provider();
    let mut conn = provider.connect().await.expect("Failed to connect");
    let id: i32 = sqlx::query_scalar(
        "INSERT INTO person (name, age, address_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(age)
    .bind(address_id)
    .fetch_one(&mut conn)
    .await
    .expect("Failed to insert person row");
    provider.release(conn).await;
    id
}

/// A marker unique to this test run, short enough for a VARCHAR(100) column
pub fn unique_tag(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!(
        "{}-{}-{}-{}",
        prefix,
        std::process::id(),
        nanos,
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

/// Number of rows in `table` whose `column` equals `value`
pub async fn count_rows(registry: &Registry, table: &str, column: &str, value: &str) -> i64 {
    let provider = registry.provider();
    let mut conn = provider.connect().await.expect("Failed to connect");
    let sql = format!("SELECT COUNT(*) FROM {} WHERE {} = $1", table, column);
    let count: i64 = sqlx::query_scalar(&sql)
        .bind(value)
        .fetch_one(&mut conn)
        .await
        .expect("Failed to count rows");
    provider.release(conn).await;
    count
}

/// Foreign key stored on a person row, read straight from the table
pub async fn stored_address_id(registry: &Registry, person_id: i32) -> Option<i32> {
    let provider = registry.provider();
    let mut conn = provider.connect().await.expect("Failed to connect");
    let address_id: Option<i32> = sqlx::query_scalar("SELECT address_id FROM person WHERE id = $1")
        .bind(person_id)
        .fetch_optional(&mut conn)
        .await
        .expect("Failed to read person row");
    provider.release(conn).await;
    address_id
}
