//! Field validators.
//!
//! Each validator looks at one field's text in isolation (trimmed first) and either
//! accepts it or names the [`Rule`] it breaks. No validator looks at another field:
//! February 30th passes here and is caught when the date is composed.

use cataloger_inventory::{Price, limits};

use crate::error::{EntryError, Rule};
use crate::field::Field;

pub fn name(value: &str) -> Result<(), Rule> {
    max_chars(value, limits::NAME_MAX_CHARS)
}

pub fn description(value: &str) -> Result<(), Rule> {
    max_chars(value, limits::DESCRIPTION_MAX_CHARS)
}

pub fn make(value: &str) -> Result<(), Rule> {
    max_chars(value, limits::MAKE_MAX_CHARS)
}

pub fn model(value: &str) -> Result<(), Rule> {
    max_chars(value, limits::MODEL_MAX_CHARS)
}

pub fn comments(value: &str) -> Result<(), Rule> {
    max_chars(value, limits::COMMENTS_MAX_CHARS)
}

pub fn price(value: &str) -> Result<Price, Rule> {
    Price::parse(value.trim()).map_err(|_| Rule::PriceFormat)
}

pub fn day(value: &str) -> Result<u32, Rule> {
    in_range(value, 1..=31).ok_or(Rule::DayRange)
}

pub fn month(value: &str) -> Result<u32, Rule> {
    in_range(value, 1..=12).ok_or(Rule::MonthRange)
}

/// Exactly four ASCII digits.
pub fn year(value: &str) -> Result<i32, Rule> {
    let value = value.trim();
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Rule::YearDigits);
    }
    value.parse().map_err(|_| Rule::YearDigits)
}

/// Optional; blank means 0.
pub fn serial(value: &str) -> Result<u64, Rule> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value.parse().map_err(|_| Rule::SerialFormat)
}

/// Run the validator for `field`.
pub fn check(field: Field, value: &str) -> Result<(), Rule> {
    match field {
        Field::Name => name(value),
        Field::Description => description(value),
        Field::Make => make(value),
        Field::Model => model(value),
        Field::Comments => comments(value),
        Field::Price => price(value).map(drop),
        Field::Day => day(value).map(drop),
        Field::Month => month(value).map(drop),
        Field::Year => year(value).map(drop),
        Field::Serial => serial(value).map(drop),
    }
}

pub fn is_valid(field: Field, value: &str) -> bool {
    check(field, value).is_ok()
}

/// The single annotation `field` should carry, if any.
///
/// A blank required field reports "required" rather than its format rule.
pub fn annotation(field: Field, value: &str) -> Option<EntryError> {
    if field.is_required() && value.trim().is_empty() {
        return Some(EntryError::FieldRequired(field));
    }
    check(field, value)
        .err()
        .map(|rule| EntryError::FieldFormat(field, rule))
}

fn max_chars(value: &str, max: usize) -> Result<(), Rule> {
    if value.trim().chars().count() > max {
        Err(Rule::MaxLength(max))
    } else {
        Ok(())
    }
}

fn in_range(value: &str, range: core::ops::RangeInclusive<u32>) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|v| range.contains(v))
}
