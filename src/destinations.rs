//! Saving, listing and ticking off destinations for the signed-in user

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::dataset::Dataset;
use crate::models::{DestinationId, DestinationUpdate, Month, NewDestination, SavedDestination, UserId};
use crate::session::IdentityProvider;
use crate::store::DestinationStore;
use crate::{Result, TravelWeatherError};

/// Couples the record store with the dataset and the caller's identity
#[derive(Clone)]
pub struct DestinationService {
    store: Arc<dyn DestinationStore>,
    dataset: Arc<Dataset>,
}

impl DestinationService {
    #[must_use]
    pub fn new(store: Arc<dyn DestinationStore>, dataset: Arc<Dataset>) -> Self {
        Self { store, dataset }
    }

    fn require_user(identity: &dyn IdentityProvider) -> Result<UserId> {
        identity
            .current_user()
            .ok_or(TravelWeatherError::Unauthenticated)
    }

    /// Fetch a record and make sure the caller owns it.
    /// Records of other users look exactly like missing ones.
    async fn owned_record(&self, owner: &UserId, id: DestinationId) -> Result<SavedDestination> {
        match self.store.get(id).await? {
            Some(record) if &record.owner_id == owner => Ok(record),
            Some(_) => {
                warn!(id, user = %owner, "Access to another user's destination refused");
                Err(TravelWeatherError::RecordNotFound { id })
            }
            None => Err(TravelWeatherError::RecordNotFound { id }),
        }
    }

    /// Save `region` for `month`, copying the month's temperature at save time
    #[instrument(skip(self, identity))]
    pub async fn save(
        &self,
        identity: &dyn IdentityProvider,
        region: &str,
        month: Month,
    ) -> Result<SavedDestination> {
        let owner = Self::require_user(identity)?;

        let region = self
            .dataset
            .region(region)
            .ok_or_else(|| TravelWeatherError::validation(format!("unknown region '{}'", region.trim())))?;
        let record = region.record(month).ok_or_else(|| {
            TravelWeatherError::validation(format!("no climate data for {} in {}", region.name, month))
        })?;

        let saved = self
            .store
            .create(NewDestination {
                owner_id: owner,
                region: region.name.clone(),
                month,
                temperature: record.temperature.clone(),
            })
            .await?;

        info!(id = saved.id, region = %saved.region, %month, "Saved destination");
        Ok(saved)
    }

    /// The caller's destinations, most recent first
    pub async fn list(&self, identity: &dyn IdentityProvider) -> Result<Vec<SavedDestination>> {
        let owner = Self::require_user(identity)?;
        self.store.list(&owner).await
    }

    pub async fn set_visited(
        &self,
        identity: &dyn IdentityProvider,
        id: DestinationId,
        visited: bool,
    ) -> Result<SavedDestination> {
        let owner = Self::require_user(identity)?;
        self.owned_record(&owner, id).await?;
        self.store.update(id, DestinationUpdate::SetVisited(visited)).await
    }

    /// Flip the visited flag
    pub async fn toggle_visited(
        &self,
        identity: &dyn IdentityProvider,
        id: DestinationId,
    ) -> Result<SavedDestination> {
        let owner = Self::require_user(identity)?;
        self.owned_record(&owner, id).await?;
        self.store.update(id, DestinationUpdate::ToggleVisited).await
    }

    pub async fn delete(&self, identity: &dyn IdentityProvider, id: DestinationId) -> Result<()> {
        let owner = Self::require_user(identity)?;
        self.owned_record(&owner, id).await?;
        self.store.delete(id).await?;
        info!(id, "Deleted destination");
        Ok(())
    }
}
