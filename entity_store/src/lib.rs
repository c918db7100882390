//! Entity Store - persistence layer for the person registry
//!
//! This crate provides the connection provider, the generic store built over
//! per-entity [`EntityMapper`]s, the [`EntityStore`] contract with its
//! standalone and participating (caller-owned transaction) operations, and
//! the Address and Person entities with their mappers.

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

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod connection;
pub mod errors;
pub mod generic_store;
pub mod identifier;
pub mod identity;
pub mod mappers;
pub mod model;
pub mod prelude;
pub mod traits;
pub mod validation;

pub use connection::ConnectionProvider;
pub use errors::StoreError;
pub use generic_store::{settle, GenericStore};
pub use identifier::{IdentifierError, ValidatedIdentifier};
pub use identity::Identity;
pub use mappers::{AddressMapper, AddressStore, PersonMapper, PersonStore};
pub use model::{Address, Person};
pub use traits::*;
pub use validation::{Validate, ValidationError};
