//! Per-month climate and crowd information for a region

use std::fmt;

use serde::{Deserialize, Serialize};

/// Qualitative rainfall label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rainfall {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
}

/// Qualitative crowd label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrowdLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

/// How well suited a month is for visiting a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Fair,
    Good,
    Excellent,
}

impl Rating {
    /// Good and Excellent months are recommended, Fair ones are not
    #[must_use]
    pub fn is_recommended(self) -> bool {
        matches!(self, Rating::Good | Rating::Excellent)
    }
}

impl fmt::Display for Rainfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rainfall::VeryLow => "Very Low",
            Rainfall::Low => "Low",
            Rainfall::Medium => "Medium",
            Rainfall::High => "High",
        })
    }
}

impl fmt::Display for CrowdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CrowdLevel::Low => "Low",
            CrowdLevel::Medium => "Medium",
            CrowdLevel::High => "High",
            CrowdLevel::VeryHigh => "Very High",
        })
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rating::Fair => "Fair",
            Rating::Good => "Good",
            Rating::Excellent => "Excellent",
        })
    }
}

/// Climate record for one region in one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClimateRecord {
    /// Display-only temperature range, e.g. "82-88°F"
    pub temperature: String,
    pub rainfall: Rainfall,
    pub crowd_level: CrowdLevel,
    pub rating: Rating,
}

impl ClimateRecord {
    #[must_use]
    pub fn new(
        temperature: impl Into<String>,
        rainfall: Rainfall,
        crowd_level: CrowdLevel,
        rating: Rating,
    ) -> Self {
        Self {
            temperature: temperature.into(),
            rainfall,
            crowd_level,
            rating,
        }
    }
}
