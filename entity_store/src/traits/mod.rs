//! Traits for database operations
//!
//! [`EntityMapper`] is the per-entity capability the generic store is built
//! over; [`EntityStore`] is the persistence contract services program against.

pub mod mapper;
pub mod store;

pub use mapper::EntityMapper;
pub use store::EntityStore;
