use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::DestinationStore;
use crate::models::{DestinationId, DestinationUpdate, NewDestination, SavedDestination, UserId};
use crate::{Result, TravelWeatherError};

#[derive(Debug, Default)]
struct Inner {
    next_id: DestinationId,
    records: BTreeMap<DestinationId, SavedDestination>,
}

/// Process-local store, used by tests and the `memory` backend
#[derive(Debug, Default)]
pub struct InMemoryDestinationStore {
    inner: RwLock<Inner>,
}

impl InMemoryDestinationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DestinationStore for InMemoryDestinationStore {
    async fn create(&self, destination: NewDestination) -> Result<SavedDestination> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = inner.next_id;

        let record = SavedDestination::from_new(id, destination, Utc::now());
        inner.records.insert(id, record.clone());
        debug!(id, owner = %record.owner_id, "Created destination");
        Ok(record)
    }

    async fn get(&self, id: DestinationId) -> Result<Option<SavedDestination>> {
        Ok(self.inner.read().await.records.get(&id).cloned())
    }

    async fn list(&self, owner: &UserId) -> Result<Vec<SavedDestination>> {
        let inner = self.inner.read().await;
        let mut destinations: Vec<SavedDestination> = inner
            .records
            .values()
            .filter(|record| &record.owner_id == owner)
            .cloned()
            .collect();
        SavedDestination::sort_newest_first(&mut destinations);
        Ok(destinations)
    }

    async fn update(&self, id: DestinationId, update: DestinationUpdate) -> Result<SavedDestination> {
        let mut inner = self.inner.write().await;
        let record = inner
            .records
            .get_mut(&id)
            .ok_or(TravelWeatherError::RecordNotFound { id })?;
        update.apply(record);
        debug!(id, visited = record.visited, "Updated destination");
        Ok(record.clone())
    }

    async fn delete(&self, id: DestinationId) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner
            .records
            .remove(&id)
            .map(|_| debug!(id, "Deleted destination"))
            .ok_or(TravelWeatherError::RecordNotFound { id })
    }
}
