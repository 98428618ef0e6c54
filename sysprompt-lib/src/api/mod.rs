//! Role service operations
//!
//! [`RoleApi`] is the seam between the table engine and the transport.
//! [`RoleClient`](crate::RoleClient) implements it over HTTP; tests and
//! alternative front ends can provide their own.

use async_trait::async_trait;

use crate::error::Error;
use crate::model::Record;
use crate::model::RecordDraft;
use crate::model::RecordId;

/// Path segment of the role collection.
pub const ROLE_COLLECTION: &str = "role";

/// CRUD operations on the single role collection.
///
/// Create does not report the assigned id: callers refresh the collection
/// afterwards and read the server's copy.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use sysprompt_lib::api::RoleApi;
///
/// let api: Arc<dyn RoleApi> = Arc::new(client);
/// let records = api.list().await?;
/// ```
#[async_trait]
pub trait RoleApi: Send + Sync {
    /// Fetches the full collection (`GET /role`).
    async fn list(&self) -> Result<Vec<Record>, Error>;

    /// Creates a record (`POST /role`).
    async fn create(&self, draft: &RecordDraft) -> Result<(), Error>;

    /// Updates a record; the id travels in the body (`PUT /role`).
    async fn update(&self, id: RecordId, draft: &RecordDraft) -> Result<(), Error>;

    /// Deletes a record (`DELETE /role/{id}`).
    async fn delete(&self, id: RecordId) -> Result<(), Error>;
}
