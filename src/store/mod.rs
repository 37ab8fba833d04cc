//! Record store for saved destinations
//!
//! The store is a plain CRUD boundary. Ownership checks and dataset
//! validation live in [`crate::destinations::DestinationService`].

use async_trait::async_trait;

use crate::Result;
use crate::models::{DestinationId, DestinationUpdate, NewDestination, SavedDestination, UserId};

pub mod fjall_store;
pub mod memory;

pub use fjall_store::FjallDestinationStore;
pub use memory::InMemoryDestinationStore;

#[async_trait]
pub trait DestinationStore: Send + Sync {
    /// Persist a new destination and return the stored record
    async fn create(&self, destination: NewDestination) -> Result<SavedDestination>;

    /// Fetch one record, `None` if the id is unknown
    async fn get(&self, id: DestinationId) -> Result<Option<SavedDestination>>;

    /// All records of one owner, most recent first
    async fn list(&self, owner: &UserId) -> Result<Vec<SavedDestination>>;

    /// Apply an update atomically and return the new record.
    /// Fails with `RecordNotFound` for unknown ids.
    async fn update(&self, id: DestinationId, update: DestinationUpdate) -> Result<SavedDestination>;

    /// Remove a record. Fails with `RecordNotFound` for unknown ids.
    async fn delete(&self, id: DestinationId) -> Result<()>;
}
