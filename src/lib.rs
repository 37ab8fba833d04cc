//! `TravelWeather` - find the best month to visit a destination
//!
//! This library provides the climate dataset, the month/region search
//! engine, saved destination storage and the HTTP API around them.

pub mod api;
pub mod config;
pub mod dataset;
pub mod destinations;
pub mod error;
pub mod models;
pub mod search;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod web;

use std::sync::Arc;

use anyhow::Context;

// Re-export core types for public API
pub use config::TravelWeatherConfig;
pub use dataset::Dataset;
pub use destinations::DestinationService;
pub use error::TravelWeatherError;
pub use models::{ClimateRecord, Month, Rating, Region, SavedDestination, UserId};
pub use search::{MonthMatchPolicy, MonthReport, QueryResult, RegionReport, SearchEngine};

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelWeatherError>;

/// Dataset named by the configuration, or the built-in one
pub fn load_dataset(config: &TravelWeatherConfig) -> anyhow::Result<Dataset> {
    match &config.dataset.path {
        Some(path) => {
            let path = TravelWeatherConfig::expand_path(path);
            Dataset::load_from_path(&path)
                .with_context(|| format!("Failed to load dataset from {}", path.display()))
        }
        None => Ok(Dataset::builtin().clone()),
    }
}

/// Open the configured destination store
pub fn open_store(config: &TravelWeatherConfig) -> anyhow::Result<Arc<dyn store::DestinationStore>> {
    match config.store.backend {
        crate::config::StoreBackend::Memory => Ok(Arc::new(store::InMemoryDestinationStore::new())),
        crate::config::StoreBackend::Fjall => {
            let path = TravelWeatherConfig::expand_path(&config.store.path);
            let store = store::FjallDestinationStore::open(&path)
                .with_context(|| format!("Failed to open destination store at {}", path.display()))?;
            Ok(Arc::new(store))
        }
    }
}

/// Wire dataset, store and search policy into the HTTP state
pub fn build_state(config: &TravelWeatherConfig) -> anyhow::Result<api::AppState> {
    let dataset = Arc::new(load_dataset(config)?);
    let store = open_store(config)?;
    Ok(api::AppState {
        destinations: DestinationService::new(store, Arc::clone(&dataset)),
        dataset,
        policy: config.search.month_policy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_builtin_dataset() {
        let dataset = load_dataset(&TravelWeatherConfig::default()).unwrap();
        assert_eq!(&dataset, Dataset::builtin());
    }

    #[test]
    fn test_missing_dataset_file_is_reported() {
        let mut config = TravelWeatherConfig::default();
        config.dataset.path = Some("/nonexistent/travelweather.json".to_string());
        let err = load_dataset(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to load dataset"));
    }
}
