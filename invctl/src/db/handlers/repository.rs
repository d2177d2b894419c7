//! Base repository trait for database operations.

use crate::db::errors::Result;

/// Common surface every table repository provides: row fetch by key, full
/// fetch, and provisioning insert. Mutations beyond this are table-specific
/// and live on the concrete repository.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest;

    /// The row type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync + ?Sized;

    /// Insert a new row
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Fetch a row by its identifier
    async fn get_by_id(&mut self, id: &Self::Id) -> Result<Option<Self::Response>>;

    /// Fetch every row, in the table's canonical order
    async fn list(&mut self) -> Result<Vec<Self::Response>>;
}
