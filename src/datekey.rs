//! Calendar-date keys.
//!
//! A `DateKey` is the canonical `YYYY-MM-DD` identifier for one journal day.
//! Keys carry no time-of-day component; two keys are equal iff their string
//! forms are equal.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    /// Truncates a calendar date to its canonical key form.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(DATE_KEY_FORMAT).to_string())
    }

    /// Key for today in the local timezone.
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_date(&self) -> NaiveDate {
        NaiveDate::parse_from_str(&self.0, DATE_KEY_FORMAT)
            .expect("date keys hold a valid calendar date by construction")
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DateKey {
    type Err = anyhow::Error;

    /// Parses and canonicalizes a key (zero-pads month and day).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s, DATE_KEY_FORMAT)
            .map_err(|_| anyhow!("invalid date key '{s}', expected YYYY-MM-DD"))?;
        Ok(Self::from_date(date))
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The Monday on or before the given date. A Sunday maps to the Monday six
/// days prior, not the next day.
pub fn monday_of(date: NaiveDate) -> DateKey {
    let days_back = u64::from(date.weekday().num_days_from_monday());
    DateKey::from_date(date - Days::new(days_back))
}

/// The 7 consecutive keys of the week starting at `monday`, in
/// chronological order.
pub fn week_dates(monday: &DateKey) -> Vec<DateKey> {
    let start = monday.as_date();
    (0..7)
        .map(|offset| DateKey::from_date(start + Days::new(offset)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        s.parse().expect("test key should parse")
    }

    #[test]
    fn monday_of_maps_sunday_to_previous_monday() {
        // 2024-06-09 is a Sunday
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        assert_eq!(monday_of(sunday), key("2024-06-03"));
    }

    #[test]
    fn monday_of_is_identity_on_mondays() {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(monday_of(monday), key("2024-06-10"));
    }

    #[test]
    fn week_dates_yields_seven_consecutive_keys() {
        let dates = week_dates(&key("2024-06-03"));
        let expected: Vec<DateKey> = [
            "2024-06-03",
            "2024-06-04",
            "2024-06-05",
            "2024-06-06",
            "2024-06-07",
            "2024-06-08",
            "2024-06-09",
        ]
        .iter()
        .map(|s| key(s))
        .collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn week_dates_crosses_month_boundaries() {
        let dates = week_dates(&key("2024-01-29"));
        assert_eq!(dates[0], key("2024-01-29"));
        assert_eq!(dates[3], key("2024-02-01"));
        assert_eq!(dates[6], key("2024-02-04"));
    }

    #[test]
    fn parsing_canonicalizes_unpadded_keys() {
        assert_eq!(key("2024-6-5").as_str(), "2024-06-05");
    }

    #[test]
    fn parsing_rejects_malformed_keys() {
        assert!("not-a-date".parse::<DateKey>().is_err());
        assert!("2024-13-40".parse::<DateKey>().is_err());
        assert!("2024-06-05T12:00:00".parse::<DateKey>().is_err());
    }

    #[test]
    fn keys_deserialize_with_validation() {
        let ok: Result<DateKey, _> = serde_json::from_str("\"2024-06-05\"");
        assert_eq!(ok.unwrap(), key("2024-06-05"));

        let bad: Result<DateKey, _> = serde_json::from_str("\"tomorrow\"");
        assert!(bad.is_err());
    }
}
