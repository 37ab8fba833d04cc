//! Region model: a named destination with its best months and climate table

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ClimateRecord, Month};

/// A named travel destination (country or island group)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Unique name within a dataset
    pub name: String,
    /// Recommended months in the order the data author listed them
    pub best_months: Vec<Month>,
    /// Climate records keyed by month; not every month has one
    pub monthly_records: BTreeMap<Month, ClimateRecord>,
}

impl Region {
    /// Create a region without any months
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            best_months: Vec::new(),
            monthly_records: BTreeMap::new(),
        }
    }

    /// Builder-style helper to set the best months
    #[must_use]
    pub fn with_best_months(mut self, months: impl IntoIterator<Item = Month>) -> Self {
        self.best_months = months.into_iter().collect();
        self
    }

    /// Builder-style helper to add one month's climate record
    #[must_use]
    pub fn with_record(mut self, month: Month, record: ClimateRecord) -> Self {
        self.monthly_records.insert(month, record);
        self
    }

    #[must_use]
    pub fn record(&self, month: Month) -> Option<&ClimateRecord> {
        self.monthly_records.get(&month)
    }

    #[must_use]
    pub fn is_best_month(&self, month: Month) -> bool {
        self.best_months.contains(&month)
    }

    /// Case-insensitive exact comparison against the region name
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Records in calendar order
    pub fn records(&self) -> impl Iterator<Item = (Month, &ClimateRecord)> {
        self.monthly_records.iter().map(|(month, record)| (*month, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CrowdLevel, Rainfall, Rating};

    fn sample() -> Region {
        Region::new("Iceland")
            .with_best_months([Month::July, Month::June])
            .with_record(
                Month::July,
                ClimateRecord::new("48-57°F", Rainfall::Low, CrowdLevel::VeryHigh, Rating::Excellent),
            )
            .with_record(
                Month::June,
                ClimateRecord::new("45-54°F", Rainfall::Low, CrowdLevel::High, Rating::Excellent),
            )
    }

    #[test]
    fn test_name_matching() {
        let region = sample();
        assert!(region.matches_name("iceland"));
        assert!(region.matches_name(" ICELAND "));
        assert!(!region.matches_name("Ice"));
    }

    #[test]
    fn test_records_iterate_in_calendar_order() {
        let region = sample();
        let months: Vec<Month> = region.records().map(|(m, _)| m).collect();
        assert_eq!(months, vec![Month::June, Month::July]);
        // best months keep authored order
        assert_eq!(region.best_months, vec![Month::July, Month::June]);
    }

    #[test]
    fn test_record_lookup() {
        let region = sample();
        assert!(region.record(Month::June).is_some());
        assert!(region.record(Month::January).is_none());
        assert!(region.is_best_month(Month::July));
        assert!(!region.is_best_month(Month::August));
    }
}
