//! Identity module
//!
//! Store-generated integer identities, where zero means "not yet persisted".

use std::fmt::{Debug, Display};

/// Primary key types usable by the generic store
pub trait Identity:
    Copy
    + Send
    + Sync
    + Debug
    + Display
    + Unpin
    + 'static
    + for<'q> sqlx::Encode<'q, sqlx::Postgres>
    + for<'r> sqlx::Decode<'r, sqlx::Postgres>
    + sqlx::Type<sqlx::Postgres>
{
    /// The identity carried by an entity that has never been inserted
    fn unassigned() -> Self;

    /// Whether this value refers to a persisted row
    fn is_assigned(&self) -> bool;
}

impl Identity for i32 {
    fn unassigned() -> Self {
        0
    }

    fn is_assigned(&self) -> bool {
        *self > 0
    }
}

impl Identity for i64 {
    fn unassigned() -> Self {
        0
    }

    fn is_assigned(&self) -> bool {
        *self > 0
    }
}
