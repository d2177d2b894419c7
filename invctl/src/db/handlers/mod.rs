//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection or transaction, provides
//! strongly-typed operations over one table, and returns domain models from
//! [`crate::db::models`]. Callers own transaction scope:
//!
//! ```ignore
//! use invctl::db::handlers::{Repository, Tags};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut tx = pool.begin().await?;
//!     let mut repo = Tags::new(&mut tx);
//!     let tags = repo.list().await?;
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod items;
pub mod repository;
pub mod tags;

pub use items::Items;
pub use repository::Repository;
pub use tags::Tags;
