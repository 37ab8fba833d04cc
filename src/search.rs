//! Destination search over the climate dataset
//!
//! A query is classified as either a month name or a region name:
//! - a month produces a [`MonthReport`] listing regions worth visiting that month
//! - a region produces a [`RegionReport`] with its whole climate table
//! - anything else produces [`QueryResult::NotFound`]
//!
//! Matching is exact after trimming and case folding. The engine holds no
//! state beyond a shared reference to the dataset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::dataset::Dataset;
use crate::models::{ClimateRecord, Month, Region};
use crate::{Result, TravelWeatherError};

/// How regions are selected for a month query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthMatchPolicy {
    /// Regions listing the month among their best months, whatever the rating
    #[default]
    BestMonths,
    /// Regions with a Good or Excellent record for the month
    RatingFiltered,
}

impl MonthMatchPolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MonthMatchPolicy::BestMonths => "best_months",
            MonthMatchPolicy::RatingFiltered => "rating_filtered",
        }
    }
}

impl fmt::Display for MonthMatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonthMatchPolicy {
    type Err = TravelWeatherError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "best_months" => Ok(MonthMatchPolicy::BestMonths),
            "rating_filtered" => Ok(MonthMatchPolicy::RatingFiltered),
            other => Err(TravelWeatherError::validation(format!(
                "unknown month policy '{other}'. Must be one of: best_months, rating_filtered"
            ))),
        }
    }
}

/// One region's record for the queried month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthEntry {
    pub region: String,
    pub record: ClimateRecord,
}

/// Regions worth visiting in a month, in dataset order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthReport {
    pub month: Month,
    pub policy: MonthMatchPolicy,
    pub entries: Vec<MonthEntry>,
}

/// A region's annual overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionReport {
    pub region: String,
    pub best_months: Vec<Month>,
    /// Records in calendar order
    pub records: Vec<(Month, ClimateRecord)>,
}

impl From<&Region> for RegionReport {
    fn from(region: &Region) -> Self {
        Self {
            region: region.name.clone(),
            best_months: region.best_months.clone(),
            records: region
                .records()
                .map(|(month, record)| (month, record.clone()))
                .collect(),
        }
    }
}

/// Outcome of a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryResult {
    Month(MonthReport),
    Region(RegionReport),
    NotFound {
        query: String,
        /// Region names the caller could try instead
        suggestions: Vec<String>,
    },
}

impl QueryResult {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryResult::NotFound { .. })
    }
}

/// Stateless query engine bound to a dataset
#[derive(Debug, Clone, Copy)]
pub struct SearchEngine<'a> {
    dataset: &'a Dataset,
    policy: MonthMatchPolicy,
}

impl<'a> SearchEngine<'a> {
    #[must_use]
    pub fn new(dataset: &'a Dataset, policy: MonthMatchPolicy) -> Self {
        Self { dataset, policy }
    }

    /// Same engine with a different month policy
    #[must_use]
    pub fn with_policy(self, policy: MonthMatchPolicy) -> Self {
        Self { policy, ..self }
    }

    #[must_use]
    pub fn policy(&self) -> MonthMatchPolicy {
        self.policy
    }

    #[must_use]
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Classify the query and run the matching search.
    ///
    /// Returns [`TravelWeatherError::EmptyQuery`] for blank input. A query
    /// that is neither a month nor a region is a normal
    /// [`QueryResult::NotFound`], not an error.
    #[instrument(level = "debug", skip(self), fields(policy = %self.policy))]
    pub fn search(&self, query: &str) -> Result<QueryResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(TravelWeatherError::EmptyQuery);
        }

        if let Some(month) = Month::from_name(query) {
            debug!(%month, "Query classified as month");
            return Ok(QueryResult::Month(self.search_month(month)));
        }

        debug!("Query classified as region name");
        Ok(self.search_region(query))
    }

    /// Regions matching `month` under the engine's policy
    #[must_use]
    pub fn search_month(&self, month: Month) -> MonthReport {
        let entries: Vec<MonthEntry> = self
            .dataset
            .regions()
            .iter()
            .filter_map(|region| self.month_entry(region, month))
            .collect();

        debug!(%month, matches = entries.len(), "Month search finished");

        MonthReport {
            month,
            policy: self.policy,
            entries,
        }
    }

    fn month_entry(&self, region: &Region, month: Month) -> Option<MonthEntry> {
        let record = region.record(month)?;
        let included = match self.policy {
            MonthMatchPolicy::BestMonths => region.is_best_month(month),
            MonthMatchPolicy::RatingFiltered => record.rating.is_recommended(),
        };

        included.then(|| MonthEntry {
            region: region.name.clone(),
            record: record.clone(),
        })
    }

    /// Annual report for a region name, or `NotFound` echoing the query
    #[must_use]
    pub fn search_region(&self, name: &str) -> QueryResult {
        let name = name.trim();
        match self.dataset.region(name) {
            Some(region) => QueryResult::Region(RegionReport::from(region)),
            None => {
                debug!(query = name, "No region matched");
                QueryResult::NotFound {
                    query: name.to_string(),
                    suggestions: self.dataset.region_names().map(str::to_string).collect(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CrowdLevel, Rainfall, Rating};
    use rstest::rstest;

    fn engine() -> SearchEngine<'static> {
        SearchEngine::new(Dataset::builtin(), MonthMatchPolicy::BestMonths)
    }

    fn region_names(report: &MonthReport) -> Vec<&str> {
        report.entries.iter().map(|e| e.region.as_str()).collect()
    }

    fn month_report(result: QueryResult) -> MonthReport {
        match result {
            QueryResult::Month(report) => report,
            other => panic!("expected month report, got {other:?}"),
        }
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_blank_query_is_rejected(#[case] query: &str) {
        let err = engine().search(query).unwrap_err();
        assert!(matches!(err, TravelWeatherError::EmptyQuery));
    }

    #[test]
    fn test_march_best_months() {
        let report = month_report(engine().search("March").unwrap());
        assert_eq!(report.month, Month::March);
        assert_eq!(region_names(&report), vec!["Maldives", "Japan"]);
    }

    #[rstest]
    #[case("January", vec!["Maldives", "Thailand"])]
    #[case("June", vec!["Iceland", "Greece"])]
    #[case("October", vec!["Japan", "Greece"])]
    #[case("November", vec!["Maldives", "Japan", "Thailand"])]
    #[case("July", vec!["Iceland"])]
    #[case("March", vec!["Maldives", "Japan"])]
    fn test_month_search_best_months(#[case] query: &str, #[case] expected: Vec<&str>) {
        let report = month_report(engine().search(query).unwrap());
        assert_eq!(region_names(&report), expected);
    }

    #[test]
    fn test_may_policies_diverge() {
        // Maldives has a Fair May record but May is not one of its best months;
        // Japan and Greece list May and rate it Good or better.
        let best = month_report(engine().search("May").unwrap());
        assert_eq!(region_names(&best), vec!["Japan", "Greece"]);

        let filtered = engine().with_policy(MonthMatchPolicy::RatingFiltered);
        let rated = month_report(filtered.search("May").unwrap());
        assert_eq!(rated.policy, MonthMatchPolicy::RatingFiltered);
        assert_eq!(region_names(&rated), vec!["Japan", "Greece"]);
    }

    #[test]
    fn test_rating_filter_ignores_best_months() {
        let region = Region::new("Testland").with_record(
            Month::May,
            ClimateRecord::new("70°F", Rainfall::Low, CrowdLevel::Low, Rating::Good),
        );
        let fair = Region::new("Fairland").with_record(
            Month::May,
            ClimateRecord::new("70°F", Rainfall::Low, CrowdLevel::Low, Rating::Fair),
        );
        let dataset = Dataset::new(vec![region, fair]).unwrap();

        let rated = SearchEngine::new(&dataset, MonthMatchPolicy::RatingFiltered).search_month(Month::May);
        assert_eq!(region_names(&rated), vec!["Testland"]);

        let best = SearchEngine::new(&dataset, MonthMatchPolicy::BestMonths).search_month(Month::May);
        assert!(best.entries.is_empty());
    }

    #[test]
    fn test_best_month_with_fair_rating_is_included() {
        let region = Region::new("Rainland")
            .with_best_months([Month::April])
            .with_record(
                Month::April,
                ClimateRecord::new("50°F", Rainfall::High, CrowdLevel::Low, Rating::Fair),
            );
        let dataset = Dataset::new(vec![region]).unwrap();
        let engine = SearchEngine::new(&dataset, MonthMatchPolicy::BestMonths);
        assert_eq!(engine.search_month(Month::April).entries.len(), 1);
        assert!(
            engine
                .with_policy(MonthMatchPolicy::RatingFiltered)
                .search_month(Month::April)
                .entries
                .is_empty()
        );
    }

    #[test]
    fn test_month_with_no_matches_is_empty_report() {
        let report = month_report(engine().search("july").unwrap());
        assert_eq!(region_names(&report), vec!["Iceland"]);

        let empty = Dataset::new(vec![]).unwrap();
        let result = SearchEngine::new(&empty, MonthMatchPolicy::BestMonths)
            .search("December")
            .unwrap();
        assert!(matches!(result, QueryResult::Month(ref r) if r.entries.is_empty()));
    }

    #[test]
    fn test_month_entry_carries_record() {
        let report = month_report(engine().search("April").unwrap());
        let japan = report.entries.iter().find(|e| e.region == "Japan").unwrap();
        assert_eq!(japan.record.temperature, "52-63°F");
        assert_eq!(japan.record.crowd_level, CrowdLevel::VeryHigh);
    }

    #[test]
    fn test_region_search() {
        let result = engine().search("Japan").unwrap();
        let QueryResult::Region(report) = result else {
            panic!("expected region report");
        };
        assert_eq!(report.region, "Japan");
        assert_eq!(
            report.best_months,
            vec![Month::March, Month::April, Month::May, Month::October, Month::November]
        );
        let months: Vec<Month> = report.records.iter().map(|(m, _)| *m).collect();
        assert_eq!(
            months,
            vec![Month::March, Month::April, Month::May, Month::October, Month::November]
        );
    }

    #[test]
    fn test_region_records_are_in_calendar_order() {
        let QueryResult::Region(report) = engine().search("Maldives").unwrap() else {
            panic!("expected region report");
        };
        let months: Vec<Month> = report.records.iter().map(|(m, _)| *m).collect();
        assert_eq!(months.first(), Some(&Month::January));
        assert_eq!(months.last(), Some(&Month::December));
        // authored order is kept for best months
        assert_eq!(report.best_months.first(), Some(&Month::November));
    }

    #[rstest]
    #[case("japan", "Japan")]
    #[case("JAPAN", "Japan")]
    #[case("  Japan  ", "Japan")]
    #[case("march", "MARCH")]
    #[case("iceland", "IcElAnD")]
    fn test_case_insensitive(#[case] a: &str, #[case] b: &str) {
        assert_eq!(engine().search(a).unwrap(), engine().search(b).unwrap());
    }

    #[rstest]
    #[case("atlantis", "ATLANTIS")]
    #[case("new zealand", "  New Zealand ")]
    fn test_case_insensitive_not_found(#[case] a: &str, #[case] b: &str) {
        let (
            QueryResult::NotFound { query: query_a, suggestions: suggestions_a },
            QueryResult::NotFound { query: query_b, suggestions: suggestions_b },
        ) = (engine().search(a).unwrap(), engine().search(b).unwrap())
        else {
            panic!("expected not found for {a:?} and {b:?}");
        };

        // the echoed query keeps the caller's casing, everything else is identical
        assert!(query_a.eq_ignore_ascii_case(&query_b));
        assert_eq!(query_b, b.trim());
        assert_eq!(suggestions_a, suggestions_b);
    }

    #[test]
    fn test_search_is_deterministic() {
        assert_eq!(engine().search("Japan").unwrap(), engine().search("Japan").unwrap());
    }

    #[test]
    fn test_not_found() {
        let result = engine().search("Atlantis").unwrap();
        match result {
            QueryResult::NotFound { query, suggestions } => {
                assert_eq!(query, "Atlantis");
                assert_eq!(
                    suggestions,
                    vec!["Maldives", "Japan", "Iceland", "Thailand", "Greece"]
                );
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[rstest]
    #[case("Jap")]
    #[case("Mar")]
    #[case("Japan March")]
    fn test_partial_matches_are_not_found(#[case] query: &str) {
        assert!(engine().search(query).unwrap().is_not_found());
    }

    #[test]
    fn test_result_json_shape() {
        let json = serde_json::to_value(engine().search("Atlantis").unwrap()).unwrap();
        assert_eq!(json["type"], "not_found");
        assert_eq!(json["query"], "Atlantis");

        let json = serde_json::to_value(engine().search("March").unwrap()).unwrap();
        assert_eq!(json["type"], "month");
        assert_eq!(json["month"], "March");
        assert_eq!(json["policy"], "best_months");
    }

    #[rstest]
    #[case("best_months", MonthMatchPolicy::BestMonths)]
    #[case("RATING_FILTERED", MonthMatchPolicy::RatingFiltered)]
    fn test_policy_parse(#[case] input: &str, #[case] expected: MonthMatchPolicy) {
        assert_eq!(input.parse::<MonthMatchPolicy>().unwrap(), expected);
    }

    #[test]
    fn test_policy_parse_error() {
        assert!("fuzzy".parse::<MonthMatchPolicy>().is_err());
    }
}
