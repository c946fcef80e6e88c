use core::str::FromStr;

use serde::{Deserialize, Serialize};

use cataloger_core::{DomainError, DomainResult, ValueObject};

/// Purchase price in the smallest currency unit (cents).
///
/// The form accepts a plain decimal with `.` as separator and at most two fractional
/// digits, so every accepted price is exactly representable here.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    cents: u64,
}

impl ValueObject for Price {}

impl Price {
    pub const ZERO: Price = Price { cents: 0 };
    pub const MAX: Price = Price { cents: u64::MAX };

    pub fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    /// Parse a price typed at the UI boundary.
    ///
    /// Accepted shapes: `0.d`, `0.dd`, or `[1-9]d*` optionally followed by `.d` / `.dd`.
    /// A bare `0`, a leading `.`, a trailing `.`, leading zeros, signs and more than two
    /// fractional digits are all rejected. Amounts above [`Price::MAX`] are rejected too.
    pub fn parse(text: &str) -> DomainResult<Self> {
        let invalid = || DomainError::validation(format!("invalid price: {text:?}"));

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (text, None),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if whole.starts_with('0') && (whole.len() > 1 || fraction.is_none()) {
            return Err(invalid());
        }

        let fraction_cents = match fraction {
            None => 0,
            Some(f) if (1..=2).contains(&f.len()) && f.bytes().all(|b| b.is_ascii_digit()) => {
                let digits: u64 = f.parse().map_err(|_| invalid())?;
                if f.len() == 1 { digits * 10 } else { digits }
            }
            Some(_) => return Err(invalid()),
        };

        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_cents))
            .ok_or_else(invalid)?;

        Ok(Self { cents })
    }

    pub fn saturating_add(self, other: Price) -> Price {
        Price::from_cents(self.cents.saturating_add(other.cents))
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Price::parse(s)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl core::iter::Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Price::saturating_add)
    }
}

impl<'a> core::iter::Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
