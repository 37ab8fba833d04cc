//! Reference climate dataset
//!
//! The dataset is a fixed table of regions validated once when it is built.
//! After construction it is never mutated, so it can be shared freely between
//! threads and queried without locking.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use tracing::{debug, info};

use crate::models::{ClimateRecord, CrowdLevel, Month, Rainfall, Rating, Region};
use crate::{Result, TravelWeatherError};

static BUILTIN: LazyLock<Dataset> =
    LazyLock::new(|| Dataset::seed().expect("built-in travel dataset must pass integrity checks"));

/// Immutable, validated collection of regions in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    regions: Vec<Region>,
}

impl Dataset {
    /// Validate and wrap a list of regions.
    ///
    /// Fails when a region name is blank, when two names collide under case
    /// folding, or when a best month has no climate record.
    pub fn new(regions: Vec<Region>) -> Result<Self> {
        let mut seen = HashSet::new();

        for region in &regions {
            if region.name.trim().is_empty() {
                return Err(TravelWeatherError::integrity("region name cannot be empty"));
            }

            if !seen.insert(region.name.to_lowercase()) {
                return Err(TravelWeatherError::integrity(format!(
                    "duplicate region name '{}'",
                    region.name
                )));
            }

            if let Some(month) = region
                .best_months
                .iter()
                .find(|month| region.record(**month).is_none())
            {
                return Err(TravelWeatherError::integrity(format!(
                    "{} lists {} as a best month but has no climate record for it",
                    region.name, month
                )));
            }
        }

        debug!("Validated dataset with {} regions", regions.len());
        Ok(Self { regions })
    }

    /// The shared built-in dataset
    #[must_use]
    pub fn builtin() -> &'static Dataset {
        &BUILTIN
    }

    /// Parse a JSON array of regions and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let regions: Vec<Region> = serde_json::from_str(json)?;
        Self::new(regions)
    }

    /// Load a JSON dataset from disk
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let dataset = Self::from_json_str(&json)?;
        info!(
            "Loaded {} regions from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Regions in declaration order
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Region names in declaration order
    pub fn region_names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|region| region.name.as_str())
    }

    /// Case-insensitive exact lookup by region name
    #[must_use]
    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|region| region.matches_name(name))
    }

    /// The twelve canonical months in calendar order
    #[must_use]
    pub fn canonical_months(&self) -> &'static [Month; 12] {
        &Month::ALL
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// The five-region table the app ships with
    pub fn seed() -> Result<Self> {
        use CrowdLevel as C;
        use Month::*;
        use Rainfall as R;
        use Rating::*;

        fn record(temperature: &str, rainfall: R, crowd: C, rating: Rating) -> ClimateRecord {
            ClimateRecord::new(temperature, rainfall, crowd, rating)
        }

        Self::new(vec![
            Region::new("Maldives")
                .with_best_months([November, December, January, February, March, April])
                .with_record(January, record("82-88°F", R::Low, C::High, Excellent))
                .with_record(February, record("82-88°F", R::Low, C::High, Excellent))
                .with_record(March, record("82-89°F", R::Low, C::Medium, Excellent))
                .with_record(April, record("83-90°F", R::Low, C::Low, Good))
                .with_record(May, record("83-88°F", R::High, C::Low, Fair))
                .with_record(November, record("82-86°F", R::Medium, C::Medium, Good))
                .with_record(December, record("82-86°F", R::Low, C::High, Excellent)),
            Region::new("Japan")
                .with_best_months([March, April, May, October, November])
                .with_record(March, record("46-55°F", R::Medium, C::High, Excellent))
                .with_record(April, record("52-63°F", R::Medium, C::VeryHigh, Excellent))
                .with_record(May, record("61-72°F", R::Medium, C::Medium, Good))
                .with_record(October, record("59-68°F", R::Low, C::Medium, Excellent))
                .with_record(November, record("50-59°F", R::Low, C::Medium, Excellent)),
            Region::new("Iceland")
                .with_best_months([June, July, August])
                .with_record(June, record("45-54°F", R::Low, C::High, Excellent))
                .with_record(July, record("48-57°F", R::Low, C::VeryHigh, Excellent))
                .with_record(August, record("46-55°F", R::Medium, C::High, Good)),
            Region::new("Thailand")
                .with_best_months([November, December, January, February])
                .with_record(November, record("75-88°F", R::Low, C::Medium, Excellent))
                .with_record(December, record("72-88°F", R::VeryLow, C::High, Excellent))
                .with_record(January, record("70-89°F", R::VeryLow, C::High, Excellent))
                .with_record(February, record("73-91°F", R::VeryLow, C::High, Excellent)),
            Region::new("Greece")
                .with_best_months([May, June, September, October])
                .with_record(May, record("64-77°F", R::Low, C::Medium, Excellent))
                .with_record(June, record("72-84°F", R::VeryLow, C::High, Excellent))
                .with_record(September, record("70-81°F", R::Low, C::Medium, Excellent))
                .with_record(October, record("61-72°F", R::Medium, C::Low, Good)),
        ])
    }
}
