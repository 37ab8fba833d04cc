//! Canonical calendar months used as lookup keys

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TravelWeatherError;

/// One of the twelve canonical English month names.
///
/// Ordering follows the calendar, so a `BTreeMap<Month, _>` iterates
/// January through December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Canonical name, e.g. "January"
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Match a user-supplied string against the canonical names.
    ///
    /// Surrounding whitespace is ignored and case is folded. No prefixes or
    /// abbreviations: "Mar" is not March.
    #[must_use]
    pub fn from_name(input: &str) -> Option<Month> {
        let input = input.trim();
        Month::ALL
            .into_iter()
            .find(|month| month.name().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = TravelWeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::from_name(s)
            .ok_or_else(|| TravelWeatherError::validation(format!("'{s}' is not a month name")))
    }
}
