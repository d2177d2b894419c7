//! Database layer for the item master and tag record stores.
//!
//! Data access follows the repository pattern: one repository struct per
//! table, wrapping a `PgConnection` so callers decide transaction scope.
//!
//! - [`handlers`]: repository implementations
//! - [`models`]: row structures matching the table schemas
//! - [`errors`]: database-specific error types

pub mod errors;
pub mod handlers;
pub mod models;
