pub mod core;
pub mod entity_store;
pub mod transaction;

pub use self::core::GenericStore;
pub use self::transaction::settle;
