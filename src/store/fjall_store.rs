//! Embedded on-disk destination store
//!
//! Records live in a single fjall keyspace, postcard-encoded:
//! - `meta:next_id` holds the last assigned id
//! - `destination:<id>` holds one [`SavedDestination`]
//! - `owner:<user>` holds the ids owned by a user
//!
//! fjall calls block, so every operation runs on `spawn_blocking`. Writers take
//! the lock inside the blocking task, so it stays held even when the awaiting
//! request is dropped. Changes touching several keys go through one write batch.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use fjall::{Database, Keyspace, OwnedWriteBatch};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::task;
use tracing::{debug, info};

use super::DestinationStore;
use crate::models::{DestinationId, DestinationUpdate, NewDestination, SavedDestination, UserId};
use crate::{Result, TravelWeatherError};

const NEXT_ID_KEY: &str = "meta:next_id";

fn destination_key(id: DestinationId) -> String {
    format!("destination:{id:020}")
}

fn owner_key(owner: &UserId) -> String {
    format!("owner:{owner}")
}

fn read_value<T: DeserializeOwned>(store: &Keyspace, key: &str) -> Result<Option<T>> {
    match store.get(key.as_bytes())? {
        Some(bytes) => {
            let bytes = bytes.to_vec();
            Ok(Some(postcard::from_bytes(&bytes)?))
        }
        None => Ok(None),
    }
}

fn stage_value<T: Serialize>(
    batch: &mut OwnedWriteBatch,
    store: &Keyspace,
    key: &str,
    value: &T,
) -> Result<()> {
    let bytes = postcard::to_stdvec(value)?;
    batch.insert(store, key.as_bytes(), bytes);
    Ok(())
}

pub struct FjallDestinationStore {
    db: Database,
    store: Keyspace,
    write_lock: Arc<Mutex<()>>,
}

impl FjallDestinationStore {
    /// Open (or create) the store at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db = Database::builder(path).open()?;
        let items = db.keyspace("destinations", fjall::KeyspaceCreateOptions::default)?;
        info!("Opened destination store at {}", path.display());
        Ok(Self {
            db,
            store: items,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    async fn read<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Keyspace) -> Result<T> + Send + 'static,
    {
        let store = self.store.clone();
        task::spawn_blocking(move || op(&store)).await?
    }

    /// Run `op` on the blocking pool with the write lock held for its whole duration
    async fn write<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database, &Keyspace) -> Result<T> + Send + 'static,
    {
        let db = self.db.clone();
        let store = self.store.clone();
        let lock = Arc::clone(&self.write_lock);

        task::spawn_blocking(move || {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            op(&db, &store)
        })
        .await?
    }
}

#[async_trait]
impl DestinationStore for FjallDestinationStore {
    #[tracing::instrument(name = "store_create", level = "debug", skip(self))]
    async fn create(&self, destination: NewDestination) -> Result<SavedDestination> {
        self.write(move |db, store| {
            let id = read_value::<DestinationId>(store, NEXT_ID_KEY)?.unwrap_or(0) + 1;
            let record = SavedDestination::from_new(id, destination, Utc::now());

            let index_key = owner_key(&record.owner_id);
            let mut owned: Vec<DestinationId> = read_value(store, &index_key)?.unwrap_or_default();
            owned.push(id);

            let mut batch = db.batch();
            stage_value(&mut batch, store, &destination_key(id), &record)?;
            stage_value(&mut batch, store, &index_key, &owned)?;
            stage_value(&mut batch, store, NEXT_ID_KEY, &id)?;
            batch.commit()?;

            debug!(id, "Stored destination");
            Ok(record)
        })
        .await
    }

    async fn get(&self, id: DestinationId) -> Result<Option<SavedDestination>> {
        self.read(move |store| read_value(store, &destination_key(id))).await
    }

    #[tracing::instrument(name = "store_list", level = "debug", skip(self))]
    async fn list(&self, owner: &UserId) -> Result<Vec<SavedDestination>> {
        let index_key = owner_key(owner);

        self.read(move |store| {
            let owned: Vec<DestinationId> = read_value(store, &index_key)?.unwrap_or_default();
            let mut destinations = Vec::with_capacity(owned.len());
            for id in owned {
                if let Some(record) = read_value::<SavedDestination>(store, &destination_key(id))? {
                    destinations.push(record);
                }
            }
            SavedDestination::sort_newest_first(&mut destinations);
            Ok(destinations)
        })
        .await
    }

    async fn update(&self, id: DestinationId, update: DestinationUpdate) -> Result<SavedDestination> {
        self.write(move |db, store| {
            let key = destination_key(id);
            let mut record: SavedDestination =
                read_value(store, &key)?.ok_or(TravelWeatherError::RecordNotFound { id })?;
            update.apply(&mut record);

            let mut batch = db.batch();
            stage_value(&mut batch, store, &key, &record)?;
            batch.commit()?;
            Ok(record)
        })
        .await
    }

    async fn delete(&self, id: DestinationId) -> Result<()> {
        self.write(move |db, store| {
            let key = destination_key(id);
            let record: SavedDestination =
                read_value(store, &key)?.ok_or(TravelWeatherError::RecordNotFound { id })?;

            let index_key = owner_key(&record.owner_id);
            let mut owned: Vec<DestinationId> = read_value(store, &index_key)?.unwrap_or_default();
            owned.retain(|owned_id| *owned_id != id);

            let mut batch = db.batch();
            stage_value(&mut batch, store, &index_key, &owned)?;
            batch.remove(store, key.as_bytes());
            batch.commit()?;

            debug!(id, "Removed destination");
            Ok(())
        })
        .await
    }
}
