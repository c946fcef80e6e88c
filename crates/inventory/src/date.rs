use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use cataloger_core::{DomainError, DomainResult, ValueObject};

/// Calendar date an item was bought, normalized to year-month-day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseDate(NaiveDate);

impl ValueObject for PurchaseDate {}

impl PurchaseDate {
    /// Compose a date from its parts under the strict proleptic Gregorian calendar.
    ///
    /// Impossible combinations (Feb 30, Apr 31, Feb 29 outside leap years) are errors;
    /// nothing rolls over into the following month.
    pub fn from_parts(year: i32, month: u32, day: u32) -> DomainResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                DomainError::validation(format!("no such date: {year:04}-{month:02}-{day:02}"))
            })
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl From<NaiveDate> for PurchaseDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for PurchaseDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_real_dates() {
        let d = PurchaseDate::from_parts(2023, 7, 3).unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2023, 7, 3));
        assert_eq!(d.to_string(), "2023-07-03");
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(PurchaseDate::from_parts(2024, 2, 30).is_err());
        assert!(PurchaseDate::from_parts(2024, 2, 31).is_err());
        assert!(PurchaseDate::from_parts(2023, 4, 31).is_err());
        assert!(PurchaseDate::from_parts(2023, 2, 29).is_err());
    }

    #[test]
    fn leap_day_only_in_leap_years() {
        assert!(PurchaseDate::from_parts(2024, 2, 29).is_ok());
        assert!(PurchaseDate::from_parts(2000, 2, 29).is_ok());
        assert!(PurchaseDate::from_parts(1900, 2, 29).is_err());
    }

    #[test]
    fn serializes_as_iso_date() {
        let d = PurchaseDate::from_parts(2023, 7, 3).unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2023-07-03\"");
    }
}
