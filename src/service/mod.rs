//! Service layer
//!
//! Services validate input, own transaction boundaries and normalize store
//! failures into [`AppError`](crate::AppError).

pub mod address;
pub mod base;
pub mod person;

pub use address::AddressService;
pub use base::GenericService;
pub use person::PersonService;
