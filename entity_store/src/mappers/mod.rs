//! Concrete mappers for the registry's entities

pub mod address;
pub mod person;

pub use address::{AddressMapper, AddressStore};
pub use person::{PersonMapper, PersonStore};
